use anyhow::{Context, Result};
use faction_game::{FactionName, GameState, LoadReport, PlayerFactionRefs};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Result of loading an on-disk save pair into a fresh game state.
#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    pub load: LoadReport,
    pub members: Vec<FactionName>,
    pub banned: Vec<FactionName>,
    pub invited: Vec<FactionName>,
    /// What the game would write back after this load.
    pub export: serde_json::Value,
}

pub fn audit_save_files(player_path: &Path, factions_path: &Path) -> Result<AuditReport> {
    let player_text = fs::read_to_string(player_path)
        .with_context(|| format!("failed to read {}", player_path.display()))?;
    let factions_text = fs::read_to_string(factions_path)
        .with_context(|| format!("failed to read {}", factions_path.display()))?;
    audit_save_text(&player_text, &factions_text)
}

pub fn audit_save_text(player_text: &str, factions_text: &str) -> Result<AuditReport> {
    let player = PlayerFactionRefs::from_json(player_text).context("player save is unreadable")?;
    let mut state = GameState::default().with_player(player);
    let load = state.load_factions_str(factions_text);
    let export = state.export_factions_save().to_value()?;

    let pick = |keep: fn(&faction_game::Faction) -> bool| -> Vec<FactionName> {
        state
            .factions
            .iter()
            .filter(|faction| keep(faction))
            .map(|faction| faction.name)
            .collect()
    };

    Ok(AuditReport {
        members: pick(|f| f.is_member),
        banned: pick(|f| f.is_banned),
        invited: pick(|f| f.already_invited && !f.is_member),
        load,
        export,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn audit_reports_membership_and_bans() {
        let report = audit_save_text(
            r#"{"factions": ["Chongqing"], "factionInvitations": ["CyberSec", "Nobody"]}"#,
            r#"{"Chongqing": {"playerReputation": 25}, "Bogus": {}}"#,
        )
        .unwrap();
        assert_eq!(report.members, vec![FactionName::Chongqing]);
        assert_eq!(
            report.banned,
            vec![
                FactionName::Aevum,
                FactionName::Sector12,
                FactionName::Volhaven,
            ]
        );
        assert_eq!(report.invited, vec![FactionName::CyberSec]);
        assert_eq!(report.load.ignored_keys, vec!["Bogus"]);
        assert_eq!(report.load.diagnostics.len(), 1);
        assert_eq!(
            report.export,
            json!({
                "Chongqing": {"playerReputation": 25.0, "discovery": "known"},
                "CyberSec": {"discovery": "known"}
            })
        );
    }

    #[test]
    fn unreadable_player_save_fails_the_audit() {
        let err = audit_save_text("nope", "{}").unwrap_err();
        assert!(err.to_string().contains("player save is unreadable"));
    }

    #[test]
    fn missing_files_name_the_path() {
        let missing = std::env::temp_dir().join("faction-tester-missing-player.json");
        let err = audit_save_files(&missing, &missing).unwrap_err();
        assert!(err.to_string().contains("faction-tester-missing-player.json"));
    }
}
