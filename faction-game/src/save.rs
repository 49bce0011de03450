//! Faction save export and load reconciliation.
//!
//! Saves are sparse: a faction only appears when it differs from a fresh one,
//! and within an entry only the non-default fields are written. Loading is
//! best effort. Every field is guarded on its own, so one bad value never
//! discards its neighbours, and nothing here can abort a game load.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::value::RawValue;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::faction::{Faction, FactionDiscovery};
use crate::names::FactionName;
use crate::numbers::{clamp_min, is_truthy};
use crate::player::PlayerFactionRefs;
use crate::registry::FactionRegistry;

const FIELD_REPUTATION: &str = "playerReputation";
const FIELD_FAVOR: &str = "favor";
const FIELD_DISCOVERY: &str = "discovery";

/// Persisted form of one faction. Absent fields mean "keep the default".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SavedFaction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_reputation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favor: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discovery: Option<FactionDiscovery>,
}

impl SavedFaction {
    /// Keep only the fields worth writing: truthy numbers and a discovery
    /// other than `unknown`.
    #[must_use]
    pub fn from_faction(faction: &Faction) -> Self {
        Self {
            player_reputation: Some(faction.player_reputation).filter(|rep| is_truthy(*rep)),
            favor: Some(faction.favor()).filter(|favor| is_truthy(*favor)),
            discovery: Some(faction.discovery)
                .filter(|discovery| *discovery != FactionDiscovery::Unknown),
        }
    }

    /// Pull the fields out of an untyped record, dropping each one that
    /// fails its own guard.
    #[must_use]
    pub fn from_record(record: &Map<String, Value>) -> Self {
        Self {
            player_reputation: non_negative_number(record.get(FIELD_REPUTATION)),
            favor: non_negative_number(record.get(FIELD_FAVOR)),
            discovery: record
                .get(FIELD_DISCOVERY)
                .and_then(Value::as_str)
                .and_then(|raw| raw.parse().ok()),
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.player_reputation.is_none() && self.favor.is_none() && self.discovery.is_none()
    }

    /// Write the present fields onto `faction`. Favor goes through the
    /// faction's own setter, which owns the upper bound.
    pub fn apply_to(&self, faction: &mut Faction) {
        if let Some(rep) = self.player_reputation {
            faction.player_reputation = clamp_min(rep, 0.0);
        }
        if let Some(favor) = self.favor {
            faction.set_favor(favor);
        }
        if let Some(discovery) = self.discovery {
            faction.discovery = discovery;
        }
    }
}

fn non_negative_number(value: Option<&Value>) -> Option<f64> {
    value.and_then(Value::as_f64).filter(|number| *number >= 0.0)
}

/// Sparse save in canonical faction order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FactionsSave {
    entries: Vec<(FactionName, SavedFaction)>,
}

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("failed to encode faction save: {0}")]
    Encode(#[from] serde_json::Error),
}

impl FactionsSave {
    #[must_use]
    pub fn get(&self, name: FactionName) -> Option<&SavedFaction> {
        self.entries
            .iter()
            .find(|(entry, _)| *entry == name)
            .map(|(_, record)| record)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, (FactionName, SavedFaction)> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// # Errors
    ///
    /// Returns an error if the save cannot be encoded as JSON.
    pub fn to_json(&self) -> Result<String, SaveError> {
        Ok(serde_json::to_string(self)?)
    }

    /// # Errors
    ///
    /// Returns an error if the save cannot be encoded as a JSON value.
    pub fn to_value(&self) -> Result<Value, SaveError> {
        Ok(serde_json::to_value(self)?)
    }
}

impl Serialize for FactionsSave {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(
            self.entries
                .iter()
                .map(|(name, record)| (name.as_str(), record)),
        )
    }
}

/// Walk the registry and keep only factions that differ from a fresh one.
#[must_use]
pub fn export_factions_save(registry: &FactionRegistry) -> FactionsSave {
    let entries = registry
        .iter()
        .filter_map(|faction| {
            let record = SavedFaction::from_faction(faction);
            (!record.is_empty()).then_some((faction.name, record))
        })
        .collect();
    FactionsSave { entries }
}

/// Non-fatal problems surfaced while reconciling the player's faction lists.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum LoadDiagnostic {
    #[error("Invalid faction in player save factions array: {0}")]
    UnknownJoinedFaction(String),
    #[error("Invalid faction in player save factionInvitations array: {0}")]
    UnknownInvitedFaction(String),
}

/// What a load touched and what it had to skip.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct LoadReport {
    /// Recognized factions whose record was an object and got applied.
    pub accepted_records: Vec<FactionName>,
    /// Top-level keys skipped because the name or the record was unusable.
    pub ignored_keys: Vec<String>,
    pub diagnostics: Vec<LoadDiagnostic>,
}

impl LoadReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.ignored_keys.is_empty() && self.diagnostics.is_empty()
    }

    fn ignore_key(&mut self, key: &str, reason: &str) {
        log::debug!("Skipping saved faction entry '{key}': {reason}");
        self.ignored_keys.push(key.to_string());
    }

    fn diagnose(&mut self, diagnostic: LoadDiagnostic) {
        log::error!("{diagnostic}");
        self.diagnostics.push(diagnostic);
    }
}

/// Apply a parsed faction blob, then reconcile membership and invitations
/// from the player save.
///
/// Anything that is not an object at the top level loads nothing. Joined
/// factions always end up invited and known, and every enemy of a joined
/// faction is banned; bans accumulate and are never cleared here.
pub fn load_factions(
    registry: &mut FactionRegistry,
    raw: &Value,
    player: &PlayerFactionRefs,
) -> LoadReport {
    let mut report = LoadReport::default();

    if let Some(entries) = raw.as_object() {
        apply_saved_records(registry, entries, &mut report);
    }

    for joined in &player.factions {
        let Some(name) = FactionName::from_name(joined) else {
            report.diagnose(LoadDiagnostic::UnknownJoinedFaction(joined.clone()));
            continue;
        };
        let faction = &mut registry[name];
        faction.is_member = true;
        faction.already_invited = true;
        faction.promote_discovery(FactionDiscovery::Known);
        for &enemy in name.info().enemies {
            registry[enemy].is_banned = true;
        }
    }

    for invited in &player.faction_invitations {
        let Some(name) = FactionName::from_name(invited) else {
            report.diagnose(LoadDiagnostic::UnknownInvitedFaction(invited.clone()));
            continue;
        };
        let faction = &mut registry[name];
        faction.already_invited = true;
        faction.promote_discovery(FactionDiscovery::Known);
    }

    report
}

/// Text entry point; unparsable input is treated like an empty blob.
///
/// A value serde_json cannot hold, such as a number past `f64::MAX`, costs
/// only the field it sits in rather than the whole blob.
pub fn load_factions_str(
    registry: &mut FactionRegistry,
    save: &str,
    player: &PlayerFactionRefs,
) -> LoadReport {
    let raw = serde_json::from_str::<Value>(save).unwrap_or_else(|err| {
        log::debug!("Faction save did not parse whole ({err}), retrying record by record");
        parse_by_record(save)
    });
    load_factions(registry, &raw, player)
}

type RawEntries = BTreeMap<String, Box<RawValue>>;

fn parse_by_record(save: &str) -> Value {
    match serde_json::from_str::<RawEntries>(save) {
        Ok(records) => records
            .into_iter()
            .map(|(key, record)| (key, parse_record(&record)))
            .collect::<Map<String, Value>>()
            .into(),
        Err(err) => {
            log::debug!("Faction save is not valid JSON, loading nothing from it: {err}");
            Value::Null
        }
    }
}

fn parse_record(record: &RawValue) -> Value {
    if let Ok(value) = serde_json::from_str(record.get()) {
        return value;
    }
    let Ok(fields) = serde_json::from_str::<RawEntries>(record.get()) else {
        return Value::Null;
    };
    fields
        .into_iter()
        .filter_map(|(field, raw)| match serde_json::from_str(raw.get()) {
            Ok(value) => Some((field, value)),
            Err(err) => {
                log::debug!("Dropping unreadable faction field {field}: {err}");
                None
            }
        })
        .collect::<Map<String, Value>>()
        .into()
}

fn apply_saved_records(
    registry: &mut FactionRegistry,
    entries: &Map<String, Value>,
    report: &mut LoadReport,
) {
    for (key, value) in entries {
        let Some(name) = FactionName::from_name(key) else {
            report.ignore_key(key, "not a faction");
            continue;
        };
        let Some(record) = value.as_object() else {
            report.ignore_key(key, "record is not an object");
            continue;
        };
        SavedFaction::from_record(record).apply_to(&mut registry[name]);
        report.accepted_records.push(name);
    }
}
