//! Store configuration.

/// Default scope the event list is stored under.
pub const DEFAULT_SCOPE: &str = "round-tracker";

/// Default key the event list is stored under.
pub const DEFAULT_KEY: &str = "events";

/// Configuration for an event store.
///
/// The scope/key pair names the event list inside a context. Store and host
/// must agree on it; any stable pair works.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Namespace within the context.
    pub scope: String,
    /// Key within the scope.
    pub key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            scope: DEFAULT_SCOPE.to_string(),
            key: DEFAULT_KEY.to_string(),
        }
    }
}

impl StoreConfig {
    /// Creates a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the scope.
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    /// Sets the key.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();

        assert_eq!(config.scope, "round-tracker");
        assert_eq!(config.key, "events");
    }

    #[test]
    fn test_config_builder() {
        let config = StoreConfig::new()
            .with_scope("my-module")
            .with_key("scheduled");

        assert_eq!(config.scope, "my-module");
        assert_eq!(config.key, "scheduled");
    }
}
