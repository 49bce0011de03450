use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::names::FactionName;
use crate::numbers::clamp_number;

/// How much the player knows about a faction.
///
/// Variants are ordered by tier so promotions can use `max`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum FactionDiscovery {
    #[default]
    Unknown,
    Rumored,
    Known,
}

impl FactionDiscovery {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Rumored => "rumored",
            Self::Known => "known",
        }
    }
}

impl fmt::Display for FactionDiscovery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FactionDiscovery {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unknown" => Ok(Self::Unknown),
            "rumored" => Ok(Self::Rumored),
            "known" => Ok(Self::Known),
            _ => Err(()),
        }
    }
}

/// Static metadata attached to each faction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactionInfo {
    /// Factions that become banned once the player joins this one.
    pub enemies: &'static [FactionName],
}

const NO_ENEMIES: FactionInfo = FactionInfo { enemies: &[] };

const SECTOR12_INFO: FactionInfo = FactionInfo {
    enemies: &[
        FactionName::Chongqing,
        FactionName::NewTokyo,
        FactionName::Ishima,
        FactionName::Volhaven,
    ],
};

const CHONGQING_INFO: FactionInfo = FactionInfo {
    enemies: &[
        FactionName::Sector12,
        FactionName::Aevum,
        FactionName::Volhaven,
    ],
};

const NEW_TOKYO_INFO: FactionInfo = FactionInfo {
    enemies: &[
        FactionName::Sector12,
        FactionName::Aevum,
        FactionName::Volhaven,
    ],
};

const ISHIMA_INFO: FactionInfo = FactionInfo {
    enemies: &[
        FactionName::Sector12,
        FactionName::Aevum,
        FactionName::Volhaven,
    ],
};

const AEVUM_INFO: FactionInfo = FactionInfo {
    enemies: &[
        FactionName::Chongqing,
        FactionName::NewTokyo,
        FactionName::Ishima,
        FactionName::Volhaven,
    ],
};

const VOLHAVEN_INFO: FactionInfo = FactionInfo {
    enemies: &[
        FactionName::Chongqing,
        FactionName::Sector12,
        FactionName::NewTokyo,
        FactionName::Aevum,
        FactionName::Ishima,
    ],
};

impl FactionName {
    #[must_use]
    pub const fn info(self) -> &'static FactionInfo {
        match self {
            Self::Sector12 => &SECTOR12_INFO,
            Self::Chongqing => &CHONGQING_INFO,
            Self::NewTokyo => &NEW_TOKYO_INFO,
            Self::Ishima => &ISHIMA_INFO,
            Self::Aevum => &AEVUM_INFO,
            Self::Volhaven => &VOLHAVEN_INFO,
            _ => &NO_ENEMIES,
        }
    }
}

/// Live state of a single faction.
#[derive(Debug, Clone, PartialEq)]
pub struct Faction {
    pub name: FactionName,
    pub player_reputation: f64,
    favor: f64,
    max_favor: f64,
    pub discovery: FactionDiscovery,
    pub is_member: bool,
    pub already_invited: bool,
    pub is_banned: bool,
    /// Augmentations this faction offers, in catalog order.
    pub augmentations: Vec<String>,
}

impl Faction {
    #[must_use]
    pub fn new(name: FactionName, max_favor: f64) -> Self {
        Self {
            name,
            player_reputation: 0.0,
            favor: 0.0,
            max_favor,
            discovery: FactionDiscovery::Unknown,
            is_member: false,
            already_invited: false,
            is_banned: false,
            augmentations: Vec::new(),
        }
    }

    #[must_use]
    pub const fn info(&self) -> &'static FactionInfo {
        self.name.info()
    }

    #[must_use]
    pub fn has_enemy(&self, other: FactionName) -> bool {
        self.info().enemies.contains(&other)
    }

    #[must_use]
    pub const fn favor(&self) -> f64 {
        self.favor
    }

    #[must_use]
    pub const fn max_favor(&self) -> f64 {
        self.max_favor
    }

    /// Favor is kept in `[0, max_favor]`.
    pub fn set_favor(&mut self, value: f64) {
        self.favor = clamp_number(value, 0.0, self.max_favor);
    }

    /// Raise discovery to `tier` unless it already sits at or above it.
    pub fn promote_discovery(&mut self, tier: FactionDiscovery) {
        self.discovery = self.discovery.max(tier);
    }

    /// True when nothing about this faction would be written to a save.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.player_reputation == 0.0
            && self.favor == 0.0
            && self.discovery == FactionDiscovery::Unknown
    }
}
