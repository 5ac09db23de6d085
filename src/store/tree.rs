//! Snapshot-backed content store implementation.
//!
//! `TreeStore` serves read sessions over an index-rule snapshot loaded from
//! disk or built in memory. Loading is strict: the file must satisfy the
//! snapshot schema and declare the expected `schema_version` so stale or
//! hand-mangled exports fail fast instead of silently classifying nothing.

use crate::store::node::{ContentSnapshot, RuleRoot, load_snapshot_from_path};
use crate::store::session::{
    ContentStore, ReadSession, ServiceIdentity, StoreError, default_service_identity,
};
use anyhow::{Context, Result, anyhow, bail};
use jsonschema::JSONSchema;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

// Reject snapshots from other exporter generations rather than risk reading
// entries whose attribute conventions have drifted.
pub const SNAPSHOT_SCHEMA_VERSION: &str = "content_snapshot_v1";

#[derive(Debug)]
/// In-memory content store holding rule roots keyed by path.
pub struct TreeStore {
    by_path: BTreeMap<String, RuleRoot>,
    authorized: BTreeSet<ServiceIdentity>,
}

impl TreeStore {
    /// Load and validate a snapshot from disk.
    ///
    /// Validates the file against the snapshot schema, checks the declared
    /// `schema_version`, and indexes roots by path. The well-known reader
    /// identity is authorized by default.
    pub fn load(path: &Path) -> Result<Self> {
        validate_against_schema(path)?;

        let snapshot = load_snapshot_from_path(path)
            .with_context(|| format!("loading {}", path.display()))?;
        validate_schema_version(&snapshot.schema_version)?;
        Ok(Self::from_snapshot(snapshot))
    }

    /// Build a store directly from an in-memory snapshot.
    ///
    /// Later roots replace earlier ones that declare the same path. The
    /// well-known reader identity is authorized by default.
    pub fn from_snapshot(snapshot: ContentSnapshot) -> Self {
        let mut by_path = BTreeMap::new();
        for root in snapshot.roots {
            by_path.insert(root.path.clone(), root);
        }
        Self {
            by_path,
            authorized: BTreeSet::from([default_service_identity()]),
        }
    }

    /// Authorize an additional service identity to open read sessions.
    pub fn authorize(&mut self, identity: ServiceIdentity) {
        self.authorized.insert(identity);
    }

    /// Withdraw a service identity's session access.
    pub fn revoke(&mut self, identity: &ServiceIdentity) {
        self.authorized.remove(identity);
    }
}

impl ContentStore for TreeStore {
    fn open_session(
        &self,
        identity: &ServiceIdentity,
    ) -> Result<Box<dyn ReadSession + '_>, StoreError> {
        if !self.authorized.contains(identity) {
            return Err(StoreError::CredentialFailure {
                identity: identity.as_str().to_string(),
            });
        }
        Ok(Box::new(TreeSession { store: self }))
    }
}

/// Read session borrowing the store for the duration of one operation.
struct TreeSession<'a> {
    store: &'a TreeStore,
}

impl ReadSession for TreeSession<'_> {
    fn resolve(&self, path: &str) -> Option<&RuleRoot> {
        self.store.by_path.get(path)
    }
}

fn validate_schema_version(schema_version: &str) -> Result<()> {
    if schema_version.is_empty() {
        bail!("schema_version must not be empty");
    }
    if schema_version != SNAPSHOT_SCHEMA_VERSION {
        bail!(
            "schema_version '{}' is not the supported '{}'",
            schema_version,
            SNAPSHOT_SCHEMA_VERSION
        );
    }
    Ok(())
}

fn validate_against_schema(snapshot_path: &Path) -> Result<()> {
    let snapshot_file = File::open(snapshot_path)
        .with_context(|| format!("opening snapshot {}", snapshot_path.display()))?;
    let snapshot_value: Value = serde_json::from_reader(BufReader::new(snapshot_file))
        .with_context(|| format!("parsing snapshot {}", snapshot_path.display()))?;

    let schema_path = canonical_snapshot_schema_path();
    let schema_value: Value = serde_json::from_reader(BufReader::new(
        File::open(&schema_path)
            .with_context(|| format!("opening schema {}", schema_path.display()))?,
    ))
    .with_context(|| format!("parsing schema {}", schema_path.display()))?;

    let compiled = JSONSchema::compile(&schema_value)
        .map_err(|err| anyhow!("compiling schema {}: {err}", schema_path.display()))?;

    if let Err(errors) = compiled.validate(&snapshot_value) {
        let details = errors
            .map(|err| err.to_string())
            .collect::<Vec<_>>()
            .join("\n");
        bail!(
            "snapshot {} failed schema validation:\n{}",
            snapshot_path.display(),
            details
        );
    }
    Ok(())
}

fn canonical_snapshot_schema_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("schema/content_snapshot.schema.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn sample_snapshot() -> ContentSnapshot {
        serde_json::from_value(json!({
            "schema_version": "content_snapshot_v1",
            "roots": [{
                "path": "/index/content/indexRules/properties",
                "entries": [
                    {"name": "jcr:title", "ordered": true},
                    {"name": "./dc:format", "ordered": false}
                ]
            }]
        }))
        .expect("snapshot fixture")
    }

    #[test]
    fn session_resolves_known_paths() {
        let store = TreeStore::from_snapshot(sample_snapshot());
        let session = store
            .open_session(&default_service_identity())
            .expect("authorized session");

        let root = session
            .resolve("/index/content/indexRules/properties")
            .expect("root present");
        assert_eq!(root.entries.len(), 2);
        assert!(session.resolve("/index/missing").is_none());
    }

    #[test]
    fn revoked_identity_is_rejected() {
        let mut store = TreeStore::from_snapshot(sample_snapshot());
        store.revoke(&default_service_identity());

        let err = store
            .open_session(&default_service_identity())
            .err()
            .expect("session must be rejected");
        assert!(matches!(err, StoreError::CredentialFailure { .. }));
    }

    #[test]
    fn authorize_admits_additional_identities() {
        let mut store = TreeStore::from_snapshot(sample_snapshot());
        let auditor = ServiceIdentity("index-auditor".to_string());
        assert!(store.open_session(&auditor).is_err());

        store.authorize(auditor.clone());
        assert!(store.open_session(&auditor).is_ok());
    }

    #[test]
    fn load_accepts_valid_snapshot_file() {
        let mut file = NamedTempFile::new().expect("temp snapshot");
        serde_json::to_writer(
            &mut file,
            &json!({
                "schema_version": "content_snapshot_v1",
                "roots": [{
                    "path": "/index/content/indexRules/properties",
                    "entries": [{"name": "jcr:title", "ordered": true}]
                }]
            }),
        )
        .expect("write snapshot");
        file.flush().expect("flush snapshot");

        let store = TreeStore::load(file.path()).expect("load snapshot");
        let session = store
            .open_session(&default_service_identity())
            .expect("authorized session");
        assert!(
            session
                .resolve("/index/content/indexRules/properties")
                .is_some()
        );
    }

    #[test]
    fn load_rejects_schema_violations() {
        let mut file = NamedTempFile::new().expect("temp snapshot");
        // roots must be an array of objects with a path.
        serde_json::to_writer(
            &mut file,
            &json!({"schema_version": "content_snapshot_v1", "roots": [{"entries": []}]}),
        )
        .expect("write snapshot");
        file.flush().expect("flush snapshot");

        let err = TreeStore::load(file.path()).expect_err("schema violation must fail");
        assert!(err.to_string().contains("failed schema validation"));
    }

    #[test]
    fn load_rejects_unknown_schema_version() {
        let mut file = NamedTempFile::new().expect("temp snapshot");
        serde_json::to_writer(
            &mut file,
            &json!({"schema_version": "content_snapshot_v0", "roots": []}),
        )
        .expect("write snapshot");
        file.flush().expect("flush snapshot");

        assert!(TreeStore::load(file.path()).is_err());
    }
}
