use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use thiserror::Error;

use crate::constants::MAX_FAVOR;

const DEFAULT_RULES_DATA: &str = include_str!("../assets/data/faction_rules.json");

/// Tunable limits applied by faction setters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactionRules {
    #[serde(default = "default_max_favor")]
    pub max_favor: f64,
}

impl Default for FactionRules {
    fn default() -> Self {
        Self {
            max_favor: default_max_favor(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RulesConfigError {
    #[error("{field} must be finite (got {value})")]
    NotFinite { field: &'static str, value: f64 },
    #[error("{field} must be at least {min:.2} (got {value:.2})")]
    MinViolation {
        field: &'static str,
        min: f64,
        value: f64,
    },
}

impl FactionRules {
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into faction rules.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[must_use]
    pub fn load_from_static() -> Self {
        serde_json::from_str(DEFAULT_RULES_DATA).unwrap_or_default()
    }

    #[must_use]
    pub fn default_rules() -> &'static Self {
        static RULES: OnceLock<FactionRules> = OnceLock::new();
        RULES.get_or_init(Self::load_from_static)
    }

    /// # Errors
    ///
    /// Returns `RulesConfigError` when any field violates the documented bounds.
    pub fn validate(&self) -> Result<(), RulesConfigError> {
        if !self.max_favor.is_finite() {
            return Err(RulesConfigError::NotFinite {
                field: "max_favor",
                value: self.max_favor,
            });
        }
        if self.max_favor < 0.0 {
            return Err(RulesConfigError::MinViolation {
                field: "max_favor",
                min: 0.0,
                value: self.max_favor,
            });
        }
        Ok(())
    }
}

const fn default_max_favor() -> f64 {
    MAX_FAVOR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_rules_match_defaults() {
        let rules = FactionRules::load_from_static();
        assert_eq!(rules, FactionRules::default());
        assert!(rules.validate().is_ok());
        assert!(std::ptr::eq(
            FactionRules::default_rules(),
            FactionRules::default_rules()
        ));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let rules = FactionRules::from_json("{}").unwrap();
        assert!((rules.max_favor - MAX_FAVOR).abs() < f64::EPSILON);
    }

    #[test]
    fn negative_max_favor_is_rejected() {
        let rules = FactionRules::from_json(r#"{"max_favor": -1}"#).unwrap();
        assert_eq!(
            rules.validate(),
            Err(RulesConfigError::MinViolation {
                field: "max_favor",
                min: 0.0,
                value: -1.0,
            })
        );
    }

    #[test]
    fn infinite_max_favor_is_rejected() {
        let rules = FactionRules {
            max_favor: f64::INFINITY,
        };
        let err = rules.validate().unwrap_err();
        assert!(err.to_string().contains("max_favor must be finite"));
    }
}
