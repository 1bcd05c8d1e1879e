//! # Configuration
//!
//! Centralizes all tuning with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.glide/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.
//!
//! The force-directional flag is not configuration: it lives in the durable
//! settings store (see [`settings`](crate::core::settings)).

use clap::ValueEnum;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

use crate::core::focus::NavigationPolicy;
use crate::core::gesture::GestureConfig;
use crate::core::history::DEFAULT_HISTORY_CAPACITY;
use crate::core::input_mode::{DEFAULT_MIN_SCREEN_HEIGHT, DEFAULT_MIN_SCREEN_WIDTH};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GlideConfig {
    #[serde(default)]
    pub gestures: GesturesConfig,
    #[serde(default)]
    pub navigation: NavigationConfig,
    #[serde(default)]
    pub input_mode: InputModeConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GesturesConfig {
    pub swipe_threshold_px: Option<f32>,
    pub velocity_threshold_px_per_ms: Option<f32>,
    pub long_press_delay_ms: Option<u64>,
    pub double_tap_delay_ms: Option<u64>,
    pub pinch_threshold_px: Option<f32>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct NavigationConfig {
    pub columns: Option<usize>,
    pub history_capacity: Option<usize>,
    pub policy: Option<PolicyKind>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct InputModeConfig {
    pub min_screen_width: Option<u32>,
    pub min_screen_height: Option<u32>,
}

/// Which edge policy the library screen uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    #[default]
    Grid,
    Cycle,
}

impl std::str::FromStr for PolicyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "grid" => Ok(PolicyKind::Grid),
            "cycle" => Ok(PolicyKind::Cycle),
            other => Err(format!("unknown navigation policy: {other}")),
        }
    }
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_COLUMNS: usize = 4;
/// Widest grid a context may use.
pub const MAX_COLUMNS: usize = 8;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub gestures: GestureConfig,
    pub policy: NavigationPolicy,
    pub history_capacity: usize,
    pub min_screen_width: u32,
    pub min_screen_height: u32,
}

/// Values that came from CLI flags (None = not specified).
#[derive(Debug, Default, Clone, Copy)]
pub struct CliOverrides {
    pub columns: Option<usize>,
    pub policy: Option<PolicyKind>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.glide/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".glide").join("config.toml"))
}

/// Load config from `~/.glide/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `GlideConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<GlideConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(GlideConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(GlideConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: GlideConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# Glide Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [gestures]
# swipe_threshold_px = 50.0            # minimum travel on one axis
# velocity_threshold_px_per_ms = 0.3   # rejects slow drags
# long_press_delay_ms = 500
# double_tap_delay_ms = 300            # also the delay before a lone tap fires
# pinch_threshold_px = 30.0

# [navigation]
# columns = 4                          # or set GLIDE_COLUMNS
# history_capacity = 50
# policy = "grid"                      # "grid" clamps at edges, "cycle" wraps

# [input_mode]
# min_screen_width = 1280              # remote mode needs a screen at least this big
# min_screen_height = 720              # ...and no touch support
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &GlideConfig, cli: CliOverrides) -> ResolvedConfig {
    let defaults = GestureConfig::default();
    let g = &config.gestures;
    let gestures = GestureConfig {
        swipe_threshold_px: g.swipe_threshold_px.unwrap_or(defaults.swipe_threshold_px),
        velocity_threshold_px_per_ms: g
            .velocity_threshold_px_per_ms
            .unwrap_or(defaults.velocity_threshold_px_per_ms),
        long_press_delay_ms: g.long_press_delay_ms.unwrap_or(defaults.long_press_delay_ms),
        double_tap_delay_ms: g.double_tap_delay_ms.unwrap_or(defaults.double_tap_delay_ms),
        pinch_threshold_px: g.pinch_threshold_px.unwrap_or(defaults.pinch_threshold_px),
    };

    // Columns: CLI → env → config → default
    let columns = cli
        .columns
        .or_else(|| env_parse::<usize>("GLIDE_COLUMNS"))
        .or(config.navigation.columns)
        .unwrap_or(DEFAULT_COLUMNS)
        .clamp(1, MAX_COLUMNS);

    // Policy: CLI → env → config → default
    let policy = match cli
        .policy
        .or_else(|| env_parse::<PolicyKind>("GLIDE_POLICY"))
        .or(config.navigation.policy)
        .unwrap_or_default()
    {
        PolicyKind::Grid => NavigationPolicy::Grid { columns },
        PolicyKind::Cycle => NavigationPolicy::Cycle,
    };

    ResolvedConfig {
        gestures,
        policy,
        history_capacity: config
            .navigation
            .history_capacity
            .unwrap_or(DEFAULT_HISTORY_CAPACITY),
        min_screen_width: config
            .input_mode
            .min_screen_width
            .unwrap_or(DEFAULT_MIN_SCREEN_WIDTH),
        min_screen_height: config
            .input_mode
            .min_screen_height
            .unwrap_or(DEFAULT_MIN_SCREEN_HEIGHT),
    }
}

/// Read and parse an env var, warning (not failing) on garbage.
fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring {name}={raw:?}: not a valid value");
            None
        }
    }
}
