//! Shared library for the indexlens helpers.
//!
//! The crate classifies content properties as fast (declared in index-rule
//! configuration) or slow (absent from it). Public surface: the
//! `PropertyClassifier` and its pure companions (delta computation, FAST/SLOW
//! labels), the content-store boundary in `store`, and small configuration
//! helpers the binaries use to pick up rule paths from the environment.

use std::env;

pub mod classifier;
pub mod store;

pub use classifier::{
    DEFAULT_INDEX_RULES_PATH, FAST_MARKER, PropertyClassifier, SLOW_MARKER, delta_properties,
    fast_label, slow_label,
};
pub use store::{
    ContentSnapshot, ContentStore, IndexRuleEntry, READER_SERVICE_NAME, ReadSession, RuleRoot,
    SNAPSHOT_SCHEMA_VERSION, ServiceIdentity, StoreError, TreeStore, default_service_identity,
    load_snapshot_from_path,
};

/// Environment variable carrying the configured rule paths.
pub const RULE_PATHS_ENV: &str = "INDEXLENS_RULE_PATHS";

/// Split comma- or whitespace-delimited configuration lists into tokens.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .replace(',', " ")
        .split_whitespace()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Rule paths configured for this process.
///
/// Reads `INDEXLENS_RULE_PATHS` once at call time; an unset or empty variable
/// falls back to the single well-known default path.
pub fn configured_rule_paths() -> Vec<String> {
    rule_paths_from(env::var(RULE_PATHS_ENV).ok().as_deref())
}

fn rule_paths_from(raw: Option<&str>) -> Vec<String> {
    let paths = raw.map(split_list).unwrap_or_default();
    if paths.is_empty() {
        vec![DEFAULT_INDEX_RULES_PATH.to_string()]
    } else {
        paths
    }
}
