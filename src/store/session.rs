//! Scoped-session boundary to the content store.
//!
//! Callers never touch store internals directly: they open a credentialed
//! read session, resolve configuration roots through it, and let the session
//! drop when the operation ends. Dropping the session is the release; there
//! is no separate close call to forget on an early exit path.

use crate::store::node::RuleRoot;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Service identity conventionally granted read access to index definitions.
pub const READER_SERVICE_NAME: &str = "index-definition-reader";

/// Named service identity used to open read sessions.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceIdentity(pub String);

impl ServiceIdentity {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The well-known reader identity used when callers do not supply their own.
pub fn default_service_identity() -> ServiceIdentity {
    ServiceIdentity(READER_SERVICE_NAME.to_string())
}

/// Errors surfaced by the store collaborator when opening a session.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The service identity was rejected by the store's credential check.
    #[error("service identity '{identity}' was rejected by the content store")]
    CredentialFailure { identity: String },
}

/// Read-only view of the content store, valid for one operation.
pub trait ReadSession {
    /// Resolve a configuration root path, or `None` when the path does not
    /// exist. Entries under a resolved root are enumerated in stable order.
    fn resolve(&self, path: &str) -> Option<&RuleRoot>;
}

/// Content-store collaborator: hands out scoped, credentialed read sessions.
///
/// Implementations must be safe for concurrent callers; each caller gets an
/// independent session bound to the store borrow.
pub trait ContentStore {
    fn open_session(
        &self,
        identity: &ServiceIdentity,
    ) -> Result<Box<dyn ReadSession + '_>, StoreError>;
}
