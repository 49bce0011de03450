use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::augmentations::AugmentationCatalog;
use crate::names::FactionName;
use crate::player::PlayerFactionRefs;
use crate::registry::FactionRegistry;
use crate::rules::FactionRules;
use crate::save::{FactionsSave, LoadReport, export_factions_save, load_factions};

/// The two serialized strings a save slot keeps for this subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
pub struct SaveSlot {
    pub player_save: String,
    pub factions_save: String,
}

impl SaveSlot {
    /// # Errors
    ///
    /// Returns an error if the JSON is not a save slot.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// # Errors
    ///
    /// Returns an error if the slot cannot be encoded.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Top-level owner of the faction registry for one running game.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub factions: FactionRegistry,
    pub player: PlayerFactionRefs,
}

impl GameState {
    #[must_use]
    pub fn new(catalog: &AugmentationCatalog, rules: &FactionRules) -> Self {
        Self {
            factions: FactionRegistry::bootstrap(catalog, rules),
            player: PlayerFactionRefs::empty(),
        }
    }

    #[must_use]
    pub fn with_player(mut self, player: PlayerFactionRefs) -> Self {
        self.player = player;
        self
    }

    /// Reconcile a parsed faction blob against this state's player lists.
    pub fn load_factions(&mut self, raw: &Value) -> LoadReport {
        load_factions(&mut self.factions, raw, &self.player)
    }

    pub fn load_factions_str(&mut self, save: &str) -> LoadReport {
        crate::save::load_factions_str(&mut self.factions, save, &self.player)
    }

    #[must_use]
    pub fn export_factions_save(&self) -> FactionsSave {
        export_factions_save(&self.factions)
    }

    /// Record a join the way the player save would, so the next load
    /// reconciles it.
    pub fn join_faction(&mut self, name: FactionName) {
        let name = String::from(name);
        if !self.player.factions.contains(&name) {
            self.player.factions.push(name);
        }
    }

    pub fn invite_to_faction(&mut self, name: FactionName) {
        let name = String::from(name);
        if !self.player.faction_invitations.contains(&name) {
            self.player.faction_invitations.push(name);
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(
            AugmentationCatalog::default_catalog(),
            FactionRules::default_rules(),
        )
    }
}
