//! Deserializable representation of an index-rule configuration snapshot.
//!
//! The types mirror the snapshot format validated by
//! `schema/content_snapshot.schema.json`: a list of configuration roots, each
//! holding index-rule entries in document order. Entries are open attribute
//! maps so callers can test arbitrary capability flags without the model
//! enumerating them up front.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Conventional attribute holding the target property's relative path.
pub const PN_NAME: &str = "name";

#[derive(Clone, Debug, Deserialize, Serialize)]
/// Full configuration snapshot as stored on disk.
pub struct ContentSnapshot {
    pub schema_version: String,
    pub roots: Vec<RuleRoot>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
/// One configuration root plus its index-rule entries in document order.
pub struct RuleRoot {
    pub path: String,
    #[serde(default)]
    pub entries: Vec<IndexRuleEntry>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(transparent)]
/// Attribute map for a single index-rule entry.
///
/// Getters follow the typed-with-default contract of the underlying store:
/// absent attributes fall back to the caller's default, and a present value
/// of the wrong type is treated the same as an absent one.
pub struct IndexRuleEntry(BTreeMap<String, Value>);

impl IndexRuleEntry {
    /// Boolean attribute with a default fallback.
    ///
    /// A present but non-boolean value yields the default; the masking is
    /// deliberate and matches how entries behave in the live store.
    pub fn flag_or(&self, name: &str, default: bool) -> bool {
        self.0.get(name).and_then(Value::as_bool).unwrap_or(default)
    }

    /// String attribute, or `None` when absent or not a string.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(Value::as_str)
    }

    /// The target property path declared by this entry, when present.
    pub fn name(&self) -> Option<&str> {
        self.text(PN_NAME)
    }
}

/// Read and parse a snapshot from disk without additional validation.
pub fn load_snapshot_from_path(path: &Path) -> Result<ContentSnapshot> {
    let data = fs::read_to_string(path)?;
    let snapshot: ContentSnapshot = serde_json::from_str(&data)?;
    Ok(snapshot)
}
