//! Data types for the slot store module.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::error::StoreError;

/// A single save submission.
///
/// Immutable once accepted; the store only relocates records between the
/// recent and history windows or drops them per retention policy. Field
/// names follow the JSON wire format (`playerId`, `saveData`, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SaveRecord {
    /// Primary player identifier.
    pub player_id: String,

    /// Stable token identifying the player independent of `player_id`
    /// (e.g. a device-bound token). Empty string when absent.
    pub ident: String,

    /// Free-form description of the submitting device.
    pub device_description: String,

    /// RFC 3339 timestamp of the save, kept as supplied by the caller.
    pub time_stamp: String,

    /// Opaque save payload. Never inspected beyond JSON well-formedness.
    pub save_data: serde_json::Value,
}

impl SaveRecord {
    /// Check that all required fields are present and the timestamp parses.
    ///
    /// `ident` is optional; an empty string means "no ident". Rejections
    /// happen before any store mutation.
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.player_id.is_empty() {
            return Err(StoreError::MissingField("playerId"));
        }
        if self.device_description.is_empty() {
            return Err(StoreError::MissingField("deviceDescription"));
        }
        if self.time_stamp.is_empty() {
            return Err(StoreError::MissingField("timeStamp"));
        }
        if self.save_data.is_null() {
            return Err(StoreError::MissingField("saveData"));
        }
        DateTime::parse_from_rfc3339(&self.time_stamp)
            .map_err(|e| StoreError::InvalidTimestamp(format!("'{}': {}", self.time_stamp, e)))?;
        Ok(())
    }

    /// UTC calendar day of the save.
    ///
    /// Returns `None` when the timestamp does not parse, which can happen
    /// for records read back from disk; such records never coalesce.
    pub fn utc_day(&self) -> Option<NaiveDate> {
        DateTime::parse_from_rfc3339(&self.time_stamp)
            .ok()
            .map(|ts| ts.with_timezone(&Utc).date_naive())
    }
}

/// Per-player container: a bounded chronological window of the most recent
/// saves plus a per-day coalesced history of displaced saves.
///
/// This is both the persisted document format and the snapshot returned to
/// callers after each accepted save. Both windows are ordered oldest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerSlots {
    /// Most recent saves, oldest at index 0.
    pub recent: Vec<SaveRecord>,

    /// Displaced saves, at most one per UTC calendar day, oldest first.
    pub history: Vec<SaveRecord>,
}
