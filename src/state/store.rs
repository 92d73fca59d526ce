//! Directory-backed key-value store for durable client state.
//!
//! One file per key under the state directory. Reads treat any failure as an
//! absent entry; writes log and swallow failures so a broken disk never
//! breaks the session.

use std::fs;
use std::path::PathBuf;

use tracing::warn;

/// Durable key for the active status filter token.
pub const KEY_ACTIVE_FILTER: &str = "activeFilter";

/// Durable key for the JSON-encoded sort entry.
pub const KEY_CURRENT_SORT: &str = "currentSort";

/// File-per-key store rooted at a state directory.
#[derive(Debug, Clone)]
pub struct StateStore {
    dir: PathBuf,
}

impl StateStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Default store location: `$XDG_STATE_HOME/wdmon` (or the platform
    /// equivalent), falling back to a relative directory when unknown.
    pub fn default_dir() -> PathBuf {
        dirs::state_dir()
            .or_else(dirs::data_local_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("wdmon")
    }

    /// Reads an entry. Any I/O failure reads as "absent".
    pub fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.dir.join(key)).ok()
    }

    /// Writes an entry. Failures are logged and swallowed.
    pub fn put(&self, key: &str, value: &str) {
        if let Err(e) = fs::create_dir_all(&self.dir) {
            warn!(error = %e, key, "state store unavailable");
            return;
        }
        if let Err(e) = fs::write(self.dir.join(key), value) {
            warn!(error = %e, key, "failed to persist state entry");
        }
    }
}
