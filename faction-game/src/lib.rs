//! Faction Persistence Core
//!
//! Platform-agnostic faction registry, sparse save export and best-effort
//! load reconciliation against the player's membership lists.
//! This crate carries no UI or platform-specific dependencies.

pub mod augmentations;
pub mod constants;
pub mod faction;
pub mod names;
pub mod numbers;
pub mod player;
pub mod registry;
pub mod rules;
pub mod save;
pub mod state;

// Re-export commonly used types
pub use augmentations::{AugmentationCatalog, AugmentationDef};
pub use faction::{Faction, FactionDiscovery, FactionInfo};
pub use names::FactionName;
pub use player::PlayerFactionRefs;
pub use registry::FactionRegistry;
pub use rules::{FactionRules, RulesConfigError};
pub use save::{
    FactionsSave, LoadDiagnostic, LoadReport, SaveError, SavedFaction, export_factions_save,
    load_factions, load_factions_str,
};
pub use state::{GameState, SaveSlot};

/// Trait for abstracting data loading operations
/// Platform-specific implementations should provide this
pub trait DataLoader {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the augmentation catalog used to link factions to their offers
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded.
    fn load_augmentation_catalog(&self) -> Result<AugmentationCatalog, Self::Error>;

    /// Load the faction rules (favor cap and friends)
    ///
    /// # Errors
    ///
    /// Returns an error if the rules cannot be loaded or parsed.
    fn load_rules(&self) -> Result<FactionRules, Self::Error>;
}

/// Loader backed by the data embedded in this crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticDataLoader;

impl DataLoader for StaticDataLoader {
    type Error = std::convert::Infallible;

    fn load_augmentation_catalog(&self) -> Result<AugmentationCatalog, Self::Error> {
        Ok(AugmentationCatalog::default_catalog().clone())
    }

    fn load_rules(&self) -> Result<FactionRules, Self::Error> {
        Ok(FactionRules::default_rules().clone())
    }
}

/// Trait for abstracting save/load operations\
/// Platform-specific implementations should provide this
pub trait GameStorage {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Persist a save slot
    ///
    /// # Errors
    ///
    /// Returns an error if the slot cannot be saved.
    fn save_game(&self, save_name: &str, slot: &SaveSlot) -> Result<(), Self::Error>;

    /// Read a save slot back
    ///
    /// # Errors
    ///
    /// Returns an error if the slot cannot be read.
    fn load_game(&self, save_name: &str) -> Result<Option<SaveSlot>, Self::Error>;

    /// Delete saved game
    ///
    /// # Errors
    ///
    /// Returns an error if the save cannot be deleted.
    fn delete_save(&self, save_name: &str) -> Result<(), Self::Error>;
}

/// A freshly loaded game plus what the faction loader had to say about it.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedGame {
    pub state: GameState,
    pub report: LoadReport,
}

/// Main engine tying data sources and storage to the faction state
pub struct GameEngine<L, S>
where
    L: DataLoader,
    S: GameStorage,
{
    data_loader: L,
    storage: S,
}

impl<L, S> GameEngine<L, S>
where
    L: DataLoader,
    S: GameStorage,
{
    /// Create a new game engine with the provided data loader and storage
    pub const fn new(data_loader: L, storage: S) -> Self {
        Self {
            data_loader,
            storage,
        }
    }

    /// Bootstrap a registry for a brand new game
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog or rules cannot be loaded, or the
    /// rules fail validation.
    pub fn new_game(&self) -> Result<GameState, anyhow::Error>
    where
        L::Error: Into<anyhow::Error>,
    {
        let catalog = self
            .data_loader
            .load_augmentation_catalog()
            .map_err(Into::into)?;
        let rules = self.data_loader.load_rules().map_err(Into::into)?;
        rules.validate()?;
        Ok(GameState::new(&catalog, &rules))
    }

    /// Export the faction state and persist it next to the player lists
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails or the storage rejects the slot.
    pub fn save_game(&self, save_name: &str, state: &GameState) -> Result<(), anyhow::Error>
    where
        S::Error: Into<anyhow::Error>,
    {
        let slot = SaveSlot {
            player_save: serde_json::to_string(&state.player)?,
            factions_save: state.export_factions_save().to_json()?,
        };
        self.storage.save_game(save_name, &slot).map_err(Into::into)
    }

    /// Load a slot into a freshly bootstrapped state
    ///
    /// # Errors
    ///
    /// Returns an error if bootstrap data cannot be loaded, storage fails, or
    /// the player save is unreadable. A damaged faction blob is not an error.
    pub fn load_game(&self, save_name: &str) -> Result<Option<LoadedGame>, anyhow::Error>
    where
        L::Error: Into<anyhow::Error>,
        S::Error: Into<anyhow::Error>,
    {
        let Some(slot) = self.storage.load_game(save_name).map_err(Into::into)? else {
            return Ok(None);
        };
        let player = PlayerFactionRefs::from_json(&slot.player_save)?;
        let mut state = self.new_game()?.with_player(player);
        let report = state.load_factions_str(&slot.factions_save);
        Ok(Some(LoadedGame { state, report }))
    }

    /// Remove a slot from storage
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot delete the slot.
    pub fn delete_game(&self, save_name: &str) -> Result<(), S::Error> {
        self.storage.delete_save(save_name)
    }
}
