use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// The slice of the player save that faction loading reads.
///
/// Entries stay raw strings: the player loader does not validate them, so
/// unknown names reach [`crate::save::load_factions`] and are reported there.
/// A non-string entry is kept as its JSON text and reported the same way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PlayerFactionRefs {
    /// Joined factions, in join order.
    #[serde(default, deserialize_with = "loose_names")]
    pub factions: Vec<String>,
    /// Factions that have an outstanding or past invitation.
    #[serde(default, deserialize_with = "loose_names")]
    pub faction_invitations: Vec<String>,
}

impl PlayerFactionRefs {
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            factions: Vec::new(),
            faction_invitations: Vec::new(),
        }
    }

    /// Parse the faction arrays out of a full player save; other fields are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed. Odd list contents never fail.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[must_use]
    pub fn joined<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            factions: names.into_iter().map(Into::into).collect(),
            faction_invitations: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_invitations<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.faction_invitations = names.into_iter().map(Into::into).collect();
        self
    }
}

/// Accept whatever the save holds: `null` or a non-array reads as empty.
fn loose_names<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = match Value::deserialize(deserializer)? {
        Value::Array(entries) => entries,
        Value::Null => Vec::new(),
        other => {
            log::debug!("Player faction list is not an array, reading it as empty: {other}");
            Vec::new()
        }
    };
    Ok(entries
        .into_iter()
        .map(|entry| match entry {
            Value::String(name) => name,
            other => other.to_string(),
        })
        .collect())
}
