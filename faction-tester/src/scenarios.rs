use faction_game::{
    AugmentationCatalog, FactionDiscovery, FactionName, FactionRegistry, FactionRules,
    GameState, LoadDiagnostic, PlayerFactionRefs, export_factions_save, load_factions,
    load_factions_str,
};
use serde_json::{Value, json};

/// Collects failed expectations for a single scenario run.
#[derive(Debug, Default)]
pub struct Checks {
    failures: Vec<String>,
}

impl Checks {
    pub fn expect(&mut self, condition: bool, message: impl Into<String>) {
        if !condition {
            self.failures.push(message.into());
        }
    }

    pub fn into_failures(self) -> Vec<String> {
        self.failures
    }
}

pub struct LogicScenario {
    pub key: &'static str,
    pub description: &'static str,
    run: fn(&mut Checks),
}

impl LogicScenario {
    pub fn run(&self) -> Vec<String> {
        let mut checks = Checks::default();
        (self.run)(&mut checks);
        checks.into_failures()
    }
}

static SCENARIOS: &[LogicScenario] = &[
    LogicScenario {
        key: "bootstrap-backlinks",
        description: "Every faction lists the catalog augmentations that name it",
        run: bootstrap_backlinks,
    },
    LogicScenario {
        key: "round-trip",
        description: "Reputation, favor and discovery survive export and reload",
        run: round_trip,
    },
    LogicScenario {
        key: "default-omission",
        description: "Untouched factions never appear in the save",
        run: default_omission,
    },
    LogicScenario {
        key: "malformed-blobs",
        description: "Non-object save blobs load nothing and raise nothing",
        run: malformed_blobs,
    },
    LogicScenario {
        key: "unknown-keys",
        description: "Unknown faction keys and non-object records are skipped",
        run: unknown_keys,
    },
    LogicScenario {
        key: "field-guards",
        description: "Negative values are ignored and favor is capped by the setter",
        run: field_guards,
    },
    LogicScenario {
        key: "enemy-bans",
        description: "Joining a faction bans its enemies and forces known discovery",
        run: enemy_bans,
    },
    LogicScenario {
        key: "joined-and-invited",
        description: "A faction in both player lists ends member, invited and known",
        run: joined_and_invited,
    },
    LogicScenario {
        key: "unknown-player-entries",
        description: "Unknown joined/invited names are reported and skipped",
        run: unknown_player_entries,
    },
];

pub fn list_scenarios() -> impl Iterator<Item = (&'static str, &'static str)> {
    SCENARIOS.iter().map(|s| (s.key, s.description))
}

pub fn find_scenario(key: &str) -> Option<&'static LogicScenario> {
    SCENARIOS.iter().find(|s| s.key == key)
}

pub fn all_scenario_keys() -> Vec<String> {
    SCENARIOS.iter().map(|s| s.key.to_string()).collect()
}

fn bootstrap_backlinks(checks: &mut Checks) {
    let catalog = AugmentationCatalog::default_catalog();
    let registry = FactionRegistry::bootstrap(catalog, FactionRules::default_rules());
    checks.expect(
        registry.iter().count() == FactionName::COUNT,
        "registry does not hold one entry per faction",
    );
    for faction in &registry {
        let expected: Vec<&str> = catalog.offered_by(faction.name).collect();
        checks.expect(
            faction.augmentations == expected,
            format!("{} augmentations differ from the catalog", faction.name),
        );
    }
}

fn round_trip(checks: &mut Checks) {
    let mut state = GameState::default();
    let faction = &mut state.factions[FactionName::BitRunners];
    faction.player_reputation = 150.0;
    faction.set_favor(12.0);
    faction.discovery = FactionDiscovery::Known;

    let text = match state.export_factions_save().to_json() {
        Ok(text) => text,
        Err(err) => {
            checks.expect(false, format!("export failed: {err}"));
            return;
        }
    };
    let mut restored = GameState::default();
    restored.load_factions_str(&text);
    let faction = &restored.factions[FactionName::BitRunners];
    checks.expect(
        (faction.player_reputation - 150.0).abs() < f64::EPSILON,
        format!("reputation came back as {}", faction.player_reputation),
    );
    checks.expect(
        (faction.favor() - 12.0).abs() < f64::EPSILON,
        format!("favor came back as {}", faction.favor()),
    );
    checks.expect(
        faction.discovery == FactionDiscovery::Known,
        format!("discovery came back as {}", faction.discovery),
    );
}

fn default_omission(checks: &mut Checks) {
    let save = export_factions_save(&FactionRegistry::with_defaults());
    checks.expect(
        save.is_empty(),
        format!("fresh registry exported {} entries", save.len()),
    );
}

fn malformed_blobs(checks: &mut Checks) {
    for blob in [json!(7), json!("text"), Value::Null, json!([1, 2, 3])] {
        let mut registry = FactionRegistry::with_defaults();
        let report = load_factions(&mut registry, &blob, &PlayerFactionRefs::empty());
        checks.expect(
            registry == FactionRegistry::with_defaults(),
            format!("blob {blob} mutated the registry"),
        );
        checks.expect(report.is_clean(), format!("blob {blob} produced a report"));
    }
    let mut registry = FactionRegistry::with_defaults();
    load_factions_str(&mut registry, "{oops", &PlayerFactionRefs::empty());
    checks.expect(
        registry == FactionRegistry::with_defaults(),
        "unparsable text mutated the registry",
    );
}

fn unknown_keys(checks: &mut Checks) {
    let mut registry = FactionRegistry::with_defaults();
    let report = load_factions(
        &mut registry,
        &json!({"NotARealFaction": {"favor": 5}, "CyberSec": "known"}),
        &PlayerFactionRefs::empty(),
    );
    checks.expect(
        registry == FactionRegistry::with_defaults(),
        "unknown key or malformed record changed state",
    );
    checks.expect(
        report.ignored_keys.len() == 2,
        format!("expected 2 ignored keys, got {:?}", report.ignored_keys),
    );
}

fn field_guards(checks: &mut Checks) {
    let rules = FactionRules { max_favor: 25.0 };
    let mut registry = FactionRegistry::bootstrap(&AugmentationCatalog::empty(), &rules);
    registry[FactionName::NiteSec].player_reputation = 10.0;
    load_factions(
        &mut registry,
        &json!({
            "NiteSec": {"playerReputation": -3, "favor": 400},
            "Tetrads": {"favor": -1, "playerReputation": 8}
        }),
        &PlayerFactionRefs::empty(),
    );
    let nitesec = &registry[FactionName::NiteSec];
    checks.expect(
        (nitesec.player_reputation - 10.0).abs() < f64::EPSILON,
        "negative reputation overwrote the prior value",
    );
    checks.expect(
        (nitesec.favor() - 25.0).abs() < f64::EPSILON,
        format!("favor not capped, got {}", nitesec.favor()),
    );
    let tetrads = &registry[FactionName::Tetrads];
    checks.expect(tetrads.favor() == 0.0, "negative favor was applied");
    checks.expect(
        (tetrads.player_reputation - 8.0).abs() < f64::EPSILON,
        "valid reputation next to a bad favor was dropped",
    );
}

fn enemy_bans(checks: &mut Checks) {
    let mut registry = FactionRegistry::with_defaults();
    load_factions(
        &mut registry,
        &json!({"Sector-12": {"discovery": "rumored"}}),
        &PlayerFactionRefs::joined(["Sector-12"]),
    );
    for &enemy in FactionName::Sector12.info().enemies {
        checks.expect(registry[enemy].is_banned, format!("{enemy} not banned"));
    }
    checks.expect(
        registry[FactionName::Sector12].discovery == FactionDiscovery::Known,
        "membership did not override persisted discovery",
    );
    checks.expect(
        !registry[FactionName::Aevum].is_banned,
        "non-enemy faction was banned",
    );
}

fn joined_and_invited(checks: &mut Checks) {
    let mut registry = FactionRegistry::with_defaults();
    let player = PlayerFactionRefs::joined(["CyberSec"]).with_invitations(["CyberSec"]);
    load_factions(&mut registry, &Value::Null, &player);
    let faction = &registry[FactionName::CyberSec];
    checks.expect(faction.is_member, "not a member");
    checks.expect(faction.already_invited, "not invited");
    checks.expect(
        faction.discovery == FactionDiscovery::Known,
        "discovery not known",
    );
}

fn unknown_player_entries(checks: &mut Checks) {
    let mut registry = FactionRegistry::with_defaults();
    let player = PlayerFactionRefs::joined(["Ghosts"]).with_invitations(["Phantoms", "NiteSec"]);
    let report = load_factions(&mut registry, &Value::Null, &player);
    checks.expect(
        report.diagnostics
            == vec![
                LoadDiagnostic::UnknownJoinedFaction("Ghosts".into()),
                LoadDiagnostic::UnknownInvitedFaction("Phantoms".into()),
            ],
        format!("unexpected diagnostics {:?}", report.diagnostics),
    );
    checks.expect(
        registry[FactionName::NiteSec].already_invited,
        "valid invitation after an unknown one was dropped",
    );
}
