use faction_game::{
    AugmentationCatalog, FactionDiscovery, FactionName, FactionRegistry, FactionRules,
    LoadDiagnostic, PlayerFactionRefs, export_factions_save, load_factions, load_factions_str,
};
use serde_json::{Value, json};

fn fresh() -> FactionRegistry {
    FactionRegistry::with_defaults()
}

fn no_player() -> PlayerFactionRefs {
    PlayerFactionRefs::empty()
}

#[test]
fn bootstrap_links_every_catalog_offer() {
    let catalog = AugmentationCatalog::default_catalog();
    let registry = FactionRegistry::bootstrap(catalog, FactionRules::default_rules());
    for name in FactionName::ALL {
        let expected: Vec<&str> = catalog
            .iter()
            .flat_map(|aug| {
                aug.factions
                    .iter()
                    .filter(move |listed| **listed == name)
                    .map(move |_| aug.name.as_str())
            })
            .collect();
        assert_eq!(registry[name].augmentations, expected, "{name}");
        assert_eq!(registry[name].name, name);
    }
}

#[test]
fn exported_state_reloads_into_fresh_registry() {
    let mut original = fresh();
    let bitrunners = &mut original[FactionName::BitRunners];
    bitrunners.player_reputation = 150.0;
    bitrunners.set_favor(12.0);
    bitrunners.discovery = FactionDiscovery::Known;

    let text = export_factions_save(&original).to_json().unwrap();
    let mut restored = fresh();
    let report = load_factions_str(&mut restored, &text, &no_player());

    assert!(report.is_clean());
    assert_eq!(report.accepted_records, vec![FactionName::BitRunners]);
    let restored = &restored[FactionName::BitRunners];
    assert!((restored.player_reputation - 150.0).abs() < f64::EPSILON);
    assert!((restored.favor() - 12.0).abs() < f64::EPSILON);
    assert_eq!(restored.discovery, FactionDiscovery::Known);
}

#[test]
fn default_factions_are_left_out_of_the_save() {
    let save = export_factions_save(&fresh());
    assert!(save.is_empty());
    assert_eq!(save.to_json().unwrap(), "{}");

    let mut registry = fresh();
    registry[FactionName::Daedalus].discovery = FactionDiscovery::Rumored;
    let save = export_factions_save(&registry);
    assert_eq!(save.len(), 1);
    assert_eq!(
        save.to_value().unwrap(),
        json!({"Daedalus": {"discovery": "rumored"}})
    );
}

#[test]
fn malformed_top_level_input_changes_nothing() {
    let inputs = [
        json!(42),
        json!("CyberSec"),
        Value::Null,
        json!(false),
        json!([{"favor": 5}, "CyberSec"]),
    ];
    for input in inputs {
        let mut registry = fresh();
        let report = load_factions(&mut registry, &input, &no_player());
        assert_eq!(registry, fresh(), "{input}");
        assert!(report.is_clean());
        assert!(report.accepted_records.is_empty());
    }
}

#[test]
fn unknown_top_level_keys_are_ignored() {
    let mut registry = fresh();
    let report = load_factions(
        &mut registry,
        &json!({"NotARealFaction": {"favor": 5}}),
        &no_player(),
    );
    assert_eq!(registry, fresh());
    assert_eq!(report.ignored_keys, vec!["NotARealFaction"]);
}

#[test]
fn malformed_records_are_skipped_whole() {
    let mut registry = fresh();
    load_factions(
        &mut registry,
        &json!({
            "CyberSec": null,
            "NiteSec": "known",
            "Tetrads": [1, 2],
            "Netburners": 0
        }),
        &no_player(),
    );
    assert_eq!(registry, fresh());
}

#[test]
fn negative_fields_keep_prior_values() {
    let mut registry = fresh();
    registry[FactionName::Tetrads].player_reputation = 40.0;
    registry[FactionName::Tetrads].set_favor(3.0);
    load_factions(
        &mut registry,
        &json!({"Tetrads": {"playerReputation": -1, "favor": -0.5, "discovery": "rumored"}}),
        &no_player(),
    );
    let tetrads = &registry[FactionName::Tetrads];
    assert!((tetrads.player_reputation - 40.0).abs() < f64::EPSILON);
    assert!((tetrads.favor() - 3.0).abs() < f64::EPSILON);
    assert_eq!(tetrads.discovery, FactionDiscovery::Rumored);
}

#[test]
fn favor_is_capped_by_the_faction_setter() {
    let rules = FactionRules { max_favor: 50.0 };
    let mut registry = FactionRegistry::bootstrap(&AugmentationCatalog::empty(), &rules);
    load_factions(
        &mut registry,
        &json!({
            "Illuminati": {"favor": 1_000_000},
            "Daedalus": {"favor": 49.5, "playerReputation": 1e12}
        }),
        &no_player(),
    );
    assert!((registry[FactionName::Illuminati].favor() - 50.0).abs() < f64::EPSILON);
    assert!((registry[FactionName::Daedalus].favor() - 49.5).abs() < f64::EPSILON);
    assert!((registry[FactionName::Daedalus].player_reputation - 1e12).abs() < 1.0);
}

#[test]
fn joining_bans_every_enemy_and_forces_known() {
    let mut registry = fresh();
    let player = PlayerFactionRefs::joined(["Sector-12"]);
    load_factions(
        &mut registry,
        &json!({
            "Sector-12": {"discovery": "rumored"},
            "Volhaven": {"discovery": "rumored", "favor": 2}
        }),
        &player,
    );

    let sector12 = &registry[FactionName::Sector12];
    assert!(sector12.is_member && sector12.already_invited);
    assert_eq!(sector12.discovery, FactionDiscovery::Known);
    assert!(!sector12.is_banned);

    for enemy in [
        FactionName::Chongqing,
        FactionName::NewTokyo,
        FactionName::Ishima,
        FactionName::Volhaven,
    ] {
        assert!(registry[enemy].is_banned, "{enemy}");
        assert!(!registry[enemy].is_member);
    }
    assert_eq!(
        registry[FactionName::Volhaven].discovery,
        FactionDiscovery::Rumored
    );
    assert!(!registry[FactionName::Aevum].is_banned);
}

#[test]
fn bans_accumulate_across_joined_factions() {
    let mut registry = fresh();
    let player = PlayerFactionRefs::joined(["Chongqing", "Sector-12"]);
    load_factions(&mut registry, &Value::Null, &player);
    // Chongqing bans Sector-12, Aevum and Volhaven; Sector-12 adds New Tokyo and Ishima.
    for banned in [
        FactionName::Chongqing,
        FactionName::Sector12,
        FactionName::Aevum,
        FactionName::Volhaven,
        FactionName::NewTokyo,
        FactionName::Ishima,
    ] {
        assert!(registry[banned].is_banned, "{banned}");
    }
    assert!(!registry[FactionName::CyberSec].is_banned);
    let banned: Vec<_> = registry.iter().filter(|f| f.is_banned).map(|f| f.name).collect();
    assert_eq!(banned.len(), 6);
    let members: Vec<_> = registry.members().map(|f| f.name).collect();
    assert_eq!(members, vec![FactionName::Chongqing, FactionName::Sector12]);
}

#[test]
fn name_in_both_lists_ends_member_invited_known() {
    let mut registry = fresh();
    let player = PlayerFactionRefs::joined(["CyberSec"]).with_invitations(["CyberSec"]);
    load_factions(
        &mut registry,
        &json!({"CyberSec": {"discovery": "unknown"}}),
        &player,
    );
    let cybersec = &registry[FactionName::CyberSec];
    assert!(cybersec.is_member);
    assert!(cybersec.already_invited);
    assert_eq!(cybersec.discovery, FactionDiscovery::Known);
}

#[test]
fn invitations_mark_invited_without_membership() {
    let mut registry = fresh();
    let player = PlayerFactionRefs::empty().with_invitations(["NiteSec"]);
    load_factions(&mut registry, &json!({}), &player);
    let nitesec = &registry[FactionName::NiteSec];
    assert!(nitesec.already_invited);
    assert!(!nitesec.is_member);
    assert_eq!(nitesec.discovery, FactionDiscovery::Known);
    assert!(registry.iter().all(|f| !f.is_banned));
}

#[test]
fn unknown_player_entries_are_reported_and_skipped() {
    let mut registry = fresh();
    let player =
        PlayerFactionRefs::joined(["Ghosts", "NiteSec"]).with_invitations(["cybersec", "Tetrads"]);
    let report = load_factions(&mut registry, &Value::Null, &player);

    assert_eq!(
        report.diagnostics,
        vec![
            LoadDiagnostic::UnknownJoinedFaction("Ghosts".into()),
            LoadDiagnostic::UnknownInvitedFaction("cybersec".into()),
        ]
    );
    assert!(registry[FactionName::NiteSec].is_member);
    assert!(registry[FactionName::Tetrads].already_invited);
    assert!(!registry[FactionName::CyberSec].already_invited);
}

#[test]
fn membership_survives_export_only_through_player_lists() {
    let mut registry = fresh();
    load_factions(
        &mut registry,
        &Value::Null,
        &PlayerFactionRefs::joined(["Tian Di Hui"]),
    );
    let save = export_factions_save(&registry).to_value().unwrap();
    // Only discovery is persisted; flags are rebuilt from the player save.
    assert_eq!(save, json!({"Tian Di Hui": {"discovery": "known"}}));
}
