//! Key-value persistence collaborator.
//!
//! The store survives restarts by writing versionless JSON arrays under
//! per-user keys, the same scheme the browser client uses with
//! `localStorage`. Backends are best-effort: a failed write is reported so
//! the store can log it, but never blocks or rolls back a mutation.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

use thiserror::Error;

/// Errors a storage backend can report. Always absorbed by the store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem access failed.
    #[error("storage IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The backend rejected the write (capacity, permissions).
    #[error("storage write rejected: {0}")]
    Rejected(String),
}

/// Key-value storage with string keys and string values.
///
/// The contract mirrors `localStorage`: reads yield the stored value or
/// nothing, and write failures must not take the application down.
pub trait StorageBackend {
    /// Read the value stored under `key`, if any.
    fn read(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    /// Returns an error when the backend cannot complete the write. Callers
    /// are expected to log and continue.
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Storage key for a user's session list.
pub(crate) fn chats_key(prefix: &str, user: &str) -> String {
    format!("{prefix}_chats_{user}")
}

/// Storage key for a user's cart.
pub(crate) fn cart_key(prefix: &str, user: &str) -> String {
    format!("{prefix}_cart_{user}")
}

/// In-memory backend for tests and ephemeral runs.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    /// Create an empty in-memory backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-load an entry, e.g. to simulate state left by a previous run.
    #[must_use]
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the backend holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl StorageBackend for MemoryStorage {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// File-per-key backend rooted at a directory.
///
/// The `localStorage` analogue for a desktop or console host. Keys are
/// escaped into file names through an injective mapping, so distinct user
/// identifiers can never collide on disk.
#[derive(Debug)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Create a backend rooted at `root`, creating the directory if needed.
    ///
    /// # Errors
    /// Returns an error when the root directory cannot be created.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", escape_key(key)))
    }
}

impl StorageBackend for FileStorage {
    fn read(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key)).ok()
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::write(self.path_for(key), value)?;
        Ok(())
    }
}

/// Escape a storage key into a safe file-name fragment.
///
/// ASCII alphanumerics, `.` and `-` pass through; every other byte becomes
/// `_xx` (lowercase hex), including `_` itself, which keeps the mapping
/// injective.
fn escape_key(key: &str) -> String {
    let mut escaped = String::with_capacity(key.len());
    for byte in key.bytes() {
        match byte {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'.' | b'-' => {
                escaped.push(char::from(byte));
            }
            _ => {
                let _ = write!(escaped, "_{byte:02x}");
            }
        }
    }
    escaped
}
