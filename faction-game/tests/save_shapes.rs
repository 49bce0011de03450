use std::hash::Hasher;

use faction_game::{
    FactionDiscovery, FactionName, GameState, PlayerFactionRefs, SaveSlot, export_factions_save,
};
use twox_hash::XxHash64;

const SAMPLE_PLAYER_SAVE: &str = r#"{
    "factions": ["CyberSec", "Sector-12"],
    "factionInvitations": ["NiteSec", "Aevum"]
}"#;

const SAMPLE_FACTIONS_SAVE: &str = r#"{
    "CyberSec": {"playerReputation": 1234.5, "favor": 7},
    "Sector-12": {"playerReputation": 50},
    "Illuminati": {"discovery": "rumored"},
    "Daedalus": {"favor": 99999999}
}"#;

#[test]
fn export_text_is_stable() {
    let mut state = GameState::default();
    let bitrunners = &mut state.factions[FactionName::BitRunners];
    bitrunners.player_reputation = 150.0;
    bitrunners.set_favor(12.0);
    bitrunners.discovery = FactionDiscovery::Known;
    state.factions[FactionName::Tetrads].discovery = FactionDiscovery::Rumored;

    let text = state.export_factions_save().to_json().unwrap();
    assert_eq!(
        text,
        r#"{"BitRunners":{"playerReputation":150.0,"favor":12.0,"discovery":"known"},"Tetrads":{"discovery":"rumored"}}"#
    );
}

#[test]
fn reload_digest_is_deterministic() {
    let first = reload_and_export();
    let second = reload_and_export();
    assert_eq!(snapshot_hash(first.as_bytes()), snapshot_hash(second.as_bytes()));
    assert!(first.contains("\"Daedalus\":{\"favor\":35331.0}"), "{first}");
}

#[test]
fn reloading_an_export_reaches_a_fixed_point() {
    let once = reload_and_export();
    let mut state = GameState::default().with_player(sample_player());
    state.load_factions_str(&once);
    let twice = state.export_factions_save().to_json().unwrap();
    assert_eq!(once, twice);
}

#[test]
fn save_slot_carries_both_blobs() {
    let mut state = GameState::default().with_player(sample_player());
    state.load_factions_str(SAMPLE_FACTIONS_SAVE);
    let slot = SaveSlot {
        player_save: serde_json::to_string(&state.player).unwrap(),
        factions_save: export_factions_save(&state.factions).to_json().unwrap(),
    };
    let decoded = SaveSlot::from_json(&slot.to_json().unwrap()).unwrap();
    assert_eq!(
        PlayerFactionRefs::from_json(&decoded.player_save).unwrap(),
        sample_player()
    );
    assert_eq!(decoded.factions_save, slot.factions_save);
}

fn sample_player() -> PlayerFactionRefs {
    PlayerFactionRefs::from_json(SAMPLE_PLAYER_SAVE).unwrap()
}

fn reload_and_export() -> String {
    let mut state = GameState::default().with_player(sample_player());
    let report = state.load_factions_str(SAMPLE_FACTIONS_SAVE);
    assert!(report.is_clean(), "{report:?}");
    state.export_factions_save().to_json().unwrap()
}

fn snapshot_hash(bytes: &[u8]) -> u64 {
    let mut hasher = XxHash64::with_seed(0);
    hasher.write(bytes);
    hasher.finish()
}
