//! Storage location configuration.
//!
//! File contexts opened by name live under the state directory:
//!
//! ```text
//! ~/.round-tracker/
//! └── contexts/
//!     ├── combat-1.json
//!     └── combat-2.json
//! ```
//!
//! # Environment Variables
//!
//! - `ROUND_TRACKER_STATE_DIR`: Override the base state directory

use std::path::PathBuf;

/// Environment variable for custom state directory.
pub const STATE_DIR_ENV: &str = "ROUND_TRACKER_STATE_DIR";

/// Default state directory name under home.
const DEFAULT_STATE_DIR: &str = ".round-tracker";

const CONTEXTS_SUBDIR: &str = "contexts";

/// Get the Round Tracker state directory.
///
/// The state directory is determined by:
/// 1. `ROUND_TRACKER_STATE_DIR` environment variable if set
/// 2. `~/.round-tracker` if home directory is available
/// 3. `.round-tracker` in current directory as fallback
pub fn state_dir() -> PathBuf {
    std::env::var_os(STATE_DIR_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            dirs::home_dir()
                .map(|h| h.join(DEFAULT_STATE_DIR))
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_DIR))
        })
}

/// Get the directory holding named file contexts.
pub fn contexts_dir() -> PathBuf {
    state_dir().join(CONTEXTS_SUBDIR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contexts_dir_under_state_dir() {
        let contexts = contexts_dir();

        assert!(contexts.starts_with(state_dir()));
        assert!(contexts.ends_with(CONTEXTS_SUBDIR));
    }
}
