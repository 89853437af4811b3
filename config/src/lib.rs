//! bsh configuration
//!
//! # Configuration Loading Priority
//!
//! 1. Compiled-in defaults
//! 2. `/etc/bsh/bsh.yaml` (system-wide)
//! 3. `~/.config/bsh/bsh.yaml` (user)
//! 4. `./bsh.yaml` (project-local)
//! 5. `BSH_CONFIG=/path/to/config.yaml` (replaces 2-4)
//! 6. A file passed to [`load_from_file`] (replaces 2-5)
//! 7. Environment variables (highest priority)
//!
//! Without `corpus.path` the sample corpus compiled into `bsh` is used.
//!
//! # Example Configuration
//!
//! ```yaml
//! corpus:
//!   path: "~/bibles/kjv.json"
//!
//! shell:
//!   prompt: "{cyan}{cwd}{reset} > "
//!   color: true
//!   bookmarks_file: "${XDG_DATA_HOME}/bsh/bookmarks.json"
//!   history:
//!     max_entries: 500
//!
//! logging:
//!   level: debug
//! ```

#![allow(missing_docs)]

mod error;
mod loader;
mod types;

use std::path::PathBuf;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use types::*;

/// Load configuration from default locations.
///
/// Searches for config files in order and merges them.
/// Environment variables override file values.
pub fn load() -> Result<BshConfig, ConfigError> {
    ConfigLoader::new().load()
}

/// Load configuration from a specific file.
pub fn load_from_file(path: &str) -> Result<BshConfig, ConfigError> {
    ConfigLoader::new().with_file(path).load()
}

/// Expands a leading `~` in a configured path.
pub fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}
