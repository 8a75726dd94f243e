//! Configuration for the session and cart store.

use serde::{Deserialize, Serialize};

/// Storage key prefix used by the browser client.
const DEFAULT_STORAGE_PREFIX: &str = "fsa_v1";

/// Title given to a session before its first real user message.
const DEFAULT_TITLE: &str = "New Chat";

/// Maximum number of characters kept when deriving a title from the first
/// user message.
const DEFAULT_TITLE_MAX_CHARS: usize = 20;

/// Configuration for [`crate::store::SessionCartStore`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Application prefix baked into every storage key.
    pub storage_prefix: String,
    /// Default title for freshly created sessions.
    pub default_title: String,
    /// Character budget for titles derived from the first user message.
    pub title_max_chars: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_prefix: DEFAULT_STORAGE_PREFIX.to_string(),
            default_title: DEFAULT_TITLE.to_string(),
            title_max_chars: DEFAULT_TITLE_MAX_CHARS,
        }
    }
}

impl StoreConfig {
    /// Create a new config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the storage key prefix.
    #[must_use]
    pub fn with_storage_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.storage_prefix = prefix.into();
        self
    }

    /// Set the default session title.
    #[must_use]
    pub fn with_default_title(mut self, title: impl Into<String>) -> Self {
        self.default_title = title.into();
        self
    }

    /// Set the derived-title character budget.
    #[must_use]
    pub const fn with_title_max_chars(mut self, max: usize) -> Self {
        self.title_max_chars = max;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_browser_client() {
        let config = StoreConfig::default();
        assert_eq!(config.storage_prefix, "fsa_v1");
        assert_eq!(config.default_title, "New Chat");
        assert_eq!(config.title_max_chars, 20);
    }

    #[test]
    fn test_builders() {
        let config = StoreConfig::new()
            .with_storage_prefix("fsa_test")
            .with_title_max_chars(12);
        assert_eq!(config.storage_prefix, "fsa_test");
        assert_eq!(config.title_max_chars, 12);
        assert_eq!(config.default_title, "New Chat");
    }
}
