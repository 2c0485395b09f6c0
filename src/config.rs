use crate::render::{ColorMode, RenderMode};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// User configuration loaded from config file.
/// All fields are optional; CLI flags override config, config overrides defaults.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Board rows
    pub rows: Option<usize>,
    /// Board columns
    pub cols: Option<usize>,
    /// Fraction of cells alive after randomizing (0.0-1.0)
    pub density: Option<f64>,
    /// Milliseconds between generations
    pub interval_ms: Option<u64>,
    /// Stop after this many generations (0 = unbounded)
    pub generations: Option<u64>,
    /// Default render mode
    pub render: Option<RenderMode>,
    /// Default color mode
    pub color: Option<ColorMode>,
    /// Hide status bar
    pub clean: Option<bool>,
    /// Start with the simulation stopped
    pub paused: Option<bool>,
}

/// Get the config file path: ~/.config/termlife/config.toml
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("termlife").join("config.toml"))
}

/// Load config from the default path. Returns default config if there is none.
pub fn load_config() -> Config {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => Config::default(),
    }
}

/// Load config from `path`. A missing or malformed file yields the default config.
pub fn load_config_from(path: &Path) -> Config {
    let Ok(contents) = std::fs::read_to_string(path) else {
        debug!(path = %path.display(), "no config file");
        return Config::default();
    };
    match toml::from_str(&contents) {
        Ok(config) => {
            debug!(path = %path.display(), ?config, "loaded config");
            config
        }
        Err(e) => {
            warn!("failed to parse {}: {}", path.display(), e);
            Config::default()
        }
    }
}

/// Generate a default config file with all options commented out
pub fn default_config_string() -> String {
    r#"# termlife configuration
# Use --show-config to see the active config file path.
# CLI flags override these settings.

# Board size
# rows = 20
# cols = 20

# Fraction of cells alive after randomizing (0.0-1.0)
# density = 0.3

# Milliseconds between generations (100-60000; --plain defaults to 100)
# interval_ms = 1000

# Stop after this many generations (0 = unbounded; plain output runs 100)
# generations = 0

# Render mode: ascii, half-block
# render = "ascii"

# Color mode: mono, ansi16, ansi256, true-color
# color = "true-color"

# Hide status bar
# clean = false

# Start with the simulation stopped (--start overrides)
# paused = true
"#
    .to_string()
}
