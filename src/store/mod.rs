//! Content-store collaborator boundary.
//!
//! This module wraps access to index-rule configuration: the snapshot data
//! model, the scoped-session traits callers consume, and the snapshot-backed
//! `TreeStore` implementation. The classifier only sees the traits; stores
//! with other backends can slot in behind the same boundary.

pub mod node;
pub mod session;
pub mod tree;

pub use node::{ContentSnapshot, IndexRuleEntry, PN_NAME, RuleRoot, load_snapshot_from_path};
pub use session::{
    ContentStore, READER_SERVICE_NAME, ReadSession, ServiceIdentity, StoreError,
    default_service_identity,
};
pub use tree::{SNAPSHOT_SCHEMA_VERSION, TreeStore};
