//! Fast-property classification over index-rule configuration.
//!
//! A property is *fast* when an index-rule entry names it and carries the
//! queried capability flag. The classifier walks the configured rule paths
//! through a scoped read session and aggregates entry names; it never mutates
//! the store. Failures follow the catch-and-log contract: a rejected service
//! identity yields an empty result, an unresolvable rule path is skipped with
//! a warning, and neither surfaces to the caller as an error.

use crate::store::{ContentStore, ReadSession, ServiceIdentity, default_service_identity};
use log::{error, warn};

/// Well-known location of index-rule entries when none are configured.
pub const DEFAULT_INDEX_RULES_PATH: &str = "/index/content/indexRules/properties";

/// Marker prefixed to labels for indexed properties.
pub const FAST_MARKER: &str = "FAST";
/// Marker prefixed to labels for unindexed properties.
pub const SLOW_MARKER: &str = "SLOW";

const LABEL_SEPARATOR: &str = "  ";

#[derive(Debug)]
/// Read-only classifier over a content store's index-rule configuration.
///
/// The rule paths and service identity are fixed at construction; every
/// classification call opens its own scoped session, so a single classifier
/// is safe to share across concurrent callers.
pub struct PropertyClassifier<S> {
    store: S,
    rule_paths: Vec<String>,
    identity: ServiceIdentity,
}

impl<S: ContentStore> PropertyClassifier<S> {
    /// Classifier over the default rule path with the well-known reader
    /// identity.
    pub fn new(store: S) -> Self {
        Self::with_rule_paths(store, vec![DEFAULT_INDEX_RULES_PATH.to_string()])
    }

    /// Classifier over an explicit ordered list of rule paths.
    pub fn with_rule_paths(store: S, rule_paths: Vec<String>) -> Self {
        Self {
            store,
            rule_paths,
            identity: default_service_identity(),
        }
    }

    /// Replace the service identity used to open read sessions.
    pub fn with_identity(mut self, identity: ServiceIdentity) -> Self {
        self.identity = identity;
        self
    }

    /// The ordered rule paths this classifier inspects.
    pub fn rule_paths(&self) -> &[String] {
        &self.rule_paths
    }

    /// List the properties whose index-rule entry carries `flag`.
    ///
    /// Walks the configured rule paths in order; see
    /// [`fast_properties_at`](Self::fast_properties_at) for the traversal
    /// contract.
    pub fn fast_properties(&self, flag: &str) -> Vec<String> {
        self.fast_properties_at(flag, &self.rule_paths)
    }

    /// List the properties whose index-rule entry carries `flag`, inspecting
    /// an explicit sequence of rule paths.
    ///
    /// Result order follows rule-path order, then entry document order.
    /// Duplicate names across roots are kept. An entry counts only when the
    /// flag is present, boolean, and true, and its `name` attribute is
    /// non-blank. The scoped session is acquired once per call and released
    /// on every exit path; if the session cannot be opened at all the call
    /// logs the failure and returns an empty list.
    pub fn fast_properties_at(&self, flag: &str, rule_paths: &[String]) -> Vec<String> {
        let session = match self.store.open_session(&self.identity) {
            Ok(session) => session,
            Err(err) => {
                error!(
                    "could not open a read session as '{}': {err}",
                    self.identity.as_str()
                );
                return Vec::new();
            }
        };

        let mut fast = Vec::new();
        for path in rule_paths {
            let Some(root) = session.resolve(path) else {
                warn!("could not locate index rules at [ {path} ]");
                continue;
            };

            for entry in &root.entries {
                if !entry.flag_or(flag, false) {
                    continue;
                }
                // Entries without a usable name are not fast; skip without noise.
                if let Some(name) = entry.name() {
                    if !name.trim().is_empty() {
                        fast.push(name.to_string());
                    }
                }
            }
        }
        fast
    }
}

/// Entries of `fast_properties` with no match in `other_properties`.
///
/// Matching strips one leading `./` from both sides; output preserves the
/// original strings and order of `fast_properties`, and duplicates there are
/// each tested independently.
pub fn delta_properties(fast_properties: &[String], other_properties: &[String]) -> Vec<String> {
    let mut delta = Vec::new();
    for fast in fast_properties {
        let stripped = strip_rel_prefix(fast);
        let found = other_properties
            .iter()
            .any(|other| strip_rel_prefix(other) == stripped);
        if !found {
            delta.push(fast.clone());
        }
    }
    delta
}

/// Label for an indexed property: marker, separator, then the label verbatim.
pub fn fast_label(label: &str) -> String {
    format!("{FAST_MARKER}{LABEL_SEPARATOR}{label}")
}

/// Label for an unindexed property: marker, separator, then the label verbatim.
pub fn slow_label(label: &str) -> String {
    format!("{SLOW_MARKER}{LABEL_SEPARATOR}{label}")
}

fn strip_rel_prefix(path: &str) -> &str {
    path.strip_prefix("./").unwrap_or(path)
}
