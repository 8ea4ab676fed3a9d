use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::StorageError;
use crate::core::generate_slug;
use crate::models::settings::InterfaceState;

pub const SNAPSHOT_NAMESPACE: &str = "beauty-flow-interface";
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredSnapshot {
    state: Value,
    #[serde(default)]
    version: u32,
    #[serde(default)]
    saved_at: Option<DateTime<Utc>>,
}

pub fn encode_snapshot(state: &InterfaceState) -> Result<String, StorageError> {
    let stored = StoredSnapshot {
        state: serde_json::to_value(state)?,
        version: SNAPSHOT_VERSION,
        saved_at: Some(Utc::now()),
    };
    Ok(serde_json::to_string(&stored)?)
}

pub fn decode_snapshot(raw: &str) -> Result<InterfaceState, StorageError> {
    let stored: StoredSnapshot = serde_json::from_str(raw)?;
    let state = migrate_snapshot(stored.version, stored.state)?;
    let mut state: InterfaceState = serde_json::from_value(state)?;
    // The stored slug is never trusted.
    state.settings.salon_slug = generate_slug(Some(&state.settings.presentation));
    Ok(state)
}

/// Bring a stored state of `version` up to `SNAPSHOT_VERSION`, one step at a
/// time. Snapshots written by a newer build are rejected.
pub fn migrate_snapshot(version: u32, mut state: Value) -> Result<Value, StorageError> {
    if version > SNAPSHOT_VERSION {
        return Err(StorageError::UnsupportedVersion {
            found: version,
            supported: SNAPSHOT_VERSION,
        });
    }

    let mut current = version;
    while current < SNAPSHOT_VERSION {
        state = match current {
            0 => migrate_v0_to_v1(state),
            other => {
                return Err(StorageError::UnsupportedVersion {
                    found: other,
                    supported: SNAPSHOT_VERSION,
                })
            }
        };
        current += 1;
    }
    Ok(state)
}

// v0 kept no slug and stored service settings as a map keyed by service id.
fn migrate_v0_to_v1(mut state: Value) -> Value {
    if let Some(settings) = state.get_mut("settings").and_then(Value::as_object_mut) {
        if !settings.contains_key("salonSlug") {
            let slug = generate_slug(settings.get("presentation").and_then(Value::as_str));
            settings.insert("salonSlug".to_string(), Value::String(slug));
        }
    }

    if let Some(map) = state
        .get_mut("serviceSettings")
        .and_then(Value::as_object_mut)
        .map(std::mem::take)
    {
        let entries = map
            .into_iter()
            .map(|(id, entry)| with_id(id, entry))
            .collect();
        state["serviceSettings"] = Value::Array(entries);
    }

    state
}

fn with_id(id: String, entry: Value) -> Value {
    match entry {
        Value::Object(mut fields) => {
            fields.entry("id").or_insert(Value::String(id));
            Value::Object(fields)
        }
        _ => {
            let mut fields = Map::new();
            fields.insert("id".to_string(), Value::String(id));
            Value::Object(fields)
        }
    }
}
