use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::sync::OnceLock;

use crate::names::FactionName;

const DEFAULT_AUGMENTATION_DATA: &str = include_str!("../assets/data/augmentations.json");

/// Most augmentations are sold by a handful of factions.
pub type OfferingFactions = SmallVec<[FactionName; 4]>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AugmentationDef {
    pub name: String,
    #[serde(default)]
    pub factions: OfferingFactions,
}

/// Every augmentation the game knows about, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AugmentationCatalog {
    #[serde(default)]
    pub augmentations: Vec<AugmentationDef>,
}

impl AugmentationCatalog {
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            augmentations: Vec::new(),
        }
    }

    #[must_use]
    pub fn load_from_static() -> Self {
        serde_json::from_str(DEFAULT_AUGMENTATION_DATA).unwrap_or_default()
    }

    #[must_use]
    pub fn default_catalog() -> &'static Self {
        static CATALOG: OnceLock<AugmentationCatalog> = OnceLock::new();
        CATALOG.get_or_init(Self::load_from_static)
    }

    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into an augmentation catalog.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&AugmentationDef> {
        self.augmentations.iter().find(|aug| aug.name == name)
    }

    /// Names of augmentations offered by `faction`, duplicates included.
    pub fn offered_by(&self, faction: FactionName) -> impl Iterator<Item = &str> {
        self.augmentations.iter().flat_map(move |aug| {
            aug.factions
                .iter()
                .filter(move |listed| **listed == faction)
                .map(move |_| aug.name.as_str())
        })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AugmentationDef> {
        self.augmentations.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.augmentations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.augmentations.is_empty()
    }
}

impl<'a> IntoIterator for &'a AugmentationCatalog {
    type Item = &'a AugmentationDef;
    type IntoIter = std::slice::Iter<'a, AugmentationDef>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
