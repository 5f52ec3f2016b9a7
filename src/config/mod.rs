//! Configuration module for the steno formatter.
//!
//! Provides `AppConfig` (top-level settings), the formatter and orthography
//! sub-configs, `AppPaths` for the platform config directory, and TOML
//! persistence via `AppConfig::load` / `AppConfig::save`.

pub mod paths;
pub mod settings;

pub use paths::{AppPaths, CONFIG_DIR_ENV};
pub use settings::{
    AppConfig, FormatterConfig, OrthographyConfig, OrthographySystem, RuleConfig, SpacePlacement,
};
