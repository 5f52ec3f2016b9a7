//! Formatter and orthography settings, persisted as `settings.toml`.
//!
//! Every section is `#[serde(default)]`, so a file naming only the fields a
//! user changed is still complete.

use std::path::Path;

use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};

use crate::format::{Orthography, OrthographyError};

use super::AppPaths;

// ---------------------------------------------------------------------------
// SpacePlacement
// ---------------------------------------------------------------------------

/// Where the word separator goes relative to each word.
///
/// | Variant | Output for `hello` `world` |
/// |---------|----------------------------|
/// | Before  | `" hello world"`           |
/// | After   | `"hello world "`           |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SpacePlacement {
    #[default]
    #[serde(rename = "Before Output")]
    Before,
    #[serde(rename = "After Output")]
    After,
}

// ---------------------------------------------------------------------------
// FormatterConfig
// ---------------------------------------------------------------------------

/// Settings for the output formatter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatterConfig {
    /// Capitalize the first word written after startup or a reset.
    pub start_capitalized: bool,
    /// Attach the first word written after startup or a reset.
    pub start_attached: bool,
    /// Separator placement.
    pub space_placement: SpacePlacement,
    /// Number of translations kept for undo and re-rendering.
    pub undo_levels: usize,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            start_capitalized: false,
            start_attached: false,
            space_placement: SpacePlacement::default(),
            undo_levels: 100,
        }
    }
}

// ---------------------------------------------------------------------------
// OrthographyConfig
// ---------------------------------------------------------------------------

/// Built-in suffix rule tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OrthographySystem {
    #[default]
    English,
    Spanish,
    /// No built-in rules; suffixes are appended unless `extra_rules` match.
    None,
}

/// One user rule, in regex-crate replacement syntax (`${1}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfig {
    pub pattern: String,
    pub replacement: String,
}

/// Suffix orthography settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OrthographyConfig {
    /// Built-in table.
    pub system: OrthographySystem,
    /// Rules tried before the built-in table.
    pub extra_rules: Vec<RuleConfig>,
}

impl OrthographyConfig {
    /// Compile the configured rule table.
    ///
    /// # Errors
    ///
    /// Returns [`OrthographyError::InvalidPattern`] for the first extra rule
    /// that does not compile.
    pub fn build(&self) -> Result<Orthography, OrthographyError> {
        let system = match self.system {
            OrthographySystem::English => Orthography::english(),
            OrthographySystem::Spanish => Orthography::spanish(),
            OrthographySystem::None => Orthography::empty(),
        };
        let extra = Orthography::new(
            self.extra_rules
                .iter()
                .map(|r| (r.pattern.as_str(), r.replacement.as_str())),
        )?;
        Ok(system.prepend(extra))
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// ```toml
/// [formatter]
/// start_capitalized = true
/// space_placement = "After Output"
///
/// [orthography]
/// system = "English"
/// ```
///
/// # Persistence
///
/// ```rust,no_run
/// use steno_format::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Output formatter settings.
    pub formatter: FormatterConfig,
    /// Suffix orthography settings.
    pub orthography: OrthographyConfig,
}

impl AppConfig {
    /// Read [`AppPaths::settings_file`].  A missing file yields the defaults.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("config: {} not found, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))
    }

    /// Write [`AppPaths::settings_file`], creating its directory.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("creating {}", dir.display()))?;
        }
        let text = toml::to_string_pretty(self).context("serialising settings")?;
        std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
