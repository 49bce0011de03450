use std::ops::{Index, IndexMut};

use crate::augmentations::AugmentationCatalog;
use crate::faction::Faction;
use crate::names::FactionName;
use crate::rules::FactionRules;

/// Exactly one [`Faction`] per [`FactionName`], stored by ordinal.
///
/// The table is sized at compile time and never grows or shrinks; only the
/// entries themselves are mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct FactionRegistry {
    factions: [Faction; FactionName::COUNT],
}

impl FactionRegistry {
    /// Build fresh factions and attach every catalog augmentation to the
    /// factions that offer it, preserving catalog order and duplicates.
    #[must_use]
    pub fn bootstrap(catalog: &AugmentationCatalog, rules: &FactionRules) -> Self {
        let mut registry = Self {
            factions: std::array::from_fn(|idx| {
                Faction::new(FactionName::ALL[idx], rules.max_favor)
            }),
        };
        for aug in catalog {
            for &faction in &aug.factions {
                registry[faction].augmentations.push(aug.name.clone());
            }
        }
        registry
    }

    /// Registry built from the embedded catalog and rules.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::bootstrap(
            AugmentationCatalog::default_catalog(),
            FactionRules::default_rules(),
        )
    }

    #[must_use]
    pub fn get(&self, name: FactionName) -> &Faction {
        &self.factions[name.index()]
    }

    pub fn get_mut(&mut self, name: FactionName) -> &mut Faction {
        &mut self.factions[name.index()]
    }

    /// Look up by wire name; `None` for anything outside the closed set.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Faction> {
        FactionName::from_name(name).map(|faction| self.get(faction))
    }

    /// Factions in canonical order.
    pub fn iter(&self) -> std::slice::Iter<'_, Faction> {
        self.factions.iter()
    }

    pub fn members(&self) -> impl Iterator<Item = &Faction> {
        self.iter().filter(|faction| faction.is_member)
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        FactionName::COUNT
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }
}

impl Default for FactionRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl Index<FactionName> for FactionRegistry {
    type Output = Faction;

    fn index(&self, name: FactionName) -> &Self::Output {
        self.get(name)
    }
}

impl IndexMut<FactionName> for FactionRegistry {
    fn index_mut(&mut self, name: FactionName) -> &mut Self::Output {
        self.get_mut(name)
    }
}

impl<'a> IntoIterator for &'a FactionRegistry {
    type Item = &'a Faction;
    type IntoIter = std::slice::Iter<'a, Faction>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
