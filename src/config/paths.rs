//! Where `settings.toml` lives.
//!
//! `$STENO_FORMAT_CONFIG_DIR` is used when set.  Otherwise the platform
//! config dir reported by `dirs`:
//!
//! | Platform | Directory |
//! |----------|-----------|
//! | Windows | `%APPDATA%\steno-format\` |
//! | macOS | `~/Library/Application Support/steno-format/` |
//! | Linux | `~/.config/steno-format/` |

use std::path::PathBuf;

/// Overrides the config directory.
pub const CONFIG_DIR_ENV: &str = "STENO_FORMAT_CONFIG_DIR";

const APP_NAME: &str = "steno-format";
const SETTINGS_FILE_NAME: &str = "settings.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub config_dir: PathBuf,
    pub settings_file: PathBuf,
}

impl AppPaths {
    /// Paths from the environment override or the platform default.
    pub fn new() -> Self {
        match std::env::var_os(CONFIG_DIR_ENV) {
            Some(dir) if !dir.is_empty() => Self::in_dir(PathBuf::from(dir)),
            _ => Self::in_dir(platform_config_dir()),
        }
    }

    /// Paths rooted at an explicit directory.
    pub fn in_dir(config_dir: PathBuf) -> Self {
        let settings_file = config_dir.join(SETTINGS_FILE_NAME);
        Self {
            config_dir,
            settings_file,
        }
    }
}

impl Default for AppPaths {
    fn default() -> Self {
        Self::new()
    }
}

/// Falls back to the working directory on platforms without a config dir.
fn platform_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_file_lives_in_config_dir() {
        let paths = AppPaths::in_dir(PathBuf::from("/tmp/steno"));
        assert_eq!(paths.settings_file, PathBuf::from("/tmp/steno/settings.toml"));
        assert_eq!(paths.settings_file.parent(), Some(paths.config_dir.as_path()));
    }

    #[test]
    fn platform_dir_is_named_after_the_app() {
        assert!(platform_config_dir().ends_with(APP_NAME));
    }
}
