//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.eduquest/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::ValueEnum;

use crate::SpeechBackend;
use crate::speech::provider::{DEFAULT_LANGUAGE, DEFAULT_PITCH, DEFAULT_RATE};
use crate::speech::providers::system::DEFAULT_COMMAND;
use crate::speech::Voice;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct EduQuestConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub speech: SpeechConfig,
    #[serde(default)]
    pub timing: TimingConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub starting_points: Option<u32>,
    pub catalog_file: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SpeechConfig {
    pub backend: Option<SpeechBackend>,
    pub language: Option<String>,
    pub rate: Option<f32>,
    pub pitch: Option<f32>,
    pub command: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TimingConfig {
    pub recording_ms: Option<u64>,
    pub playback_ms: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_STARTING_POINTS: u32 = 2500;
pub const DEFAULT_RECORDING_MS: u64 = 3000;
pub const DEFAULT_PLAYBACK_MS: u64 = 4000;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

/// How long the simulated speaking-lab activities run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub recording: Duration,
    pub playback: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            recording: Duration::from_millis(DEFAULT_RECORDING_MS),
            playback: Duration::from_millis(DEFAULT_PLAYBACK_MS),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub starting_points: u32,
    /// `None` = use the built-in catalog.
    pub catalog_file: Option<PathBuf>,
    pub speech_backend: SpeechBackend,
    pub speech_command: String,
    pub voice: Voice,
    pub timing: Timing,
}

/// Values given on the command line. `None` = flag not passed.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub speech: Option<SpeechBackend>,
    pub catalog: Option<PathBuf>,
    pub points: Option<u32>,
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

/// Returns `~/.eduquest`, where the config and relative catalog paths live.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".eduquest"))
}

/// Returns the path to `~/.eduquest/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load config from `~/.eduquest/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `EduQuestConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<EduQuestConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(EduQuestConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(EduQuestConfig::default());
    }

    load_config_from(&path)
}

/// Parse a config file at an explicit path.
pub fn load_config_from(path: &Path) -> Result<EduQuestConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: EduQuestConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

const DEFAULT_CONFIG: &str = r#"# EduQuest Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# starting_points = 2500
# catalog_file = "catalog.toml"      # Path relative to ~/.eduquest/ (.toml or .json)

# [speech]
# backend = "silent"                 # "silent" (log only) or "system"
# command = "espeak-ng"              # Used by the "system" backend
# language = "en-US"
# rate = 1.0
# pitch = 1.1

# [timing]
# recording_ms = 3000                # Simulated read-aloud recording
# playback_ms = 4000                 # Listening-game clue playback
"#;

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, DEFAULT_CONFIG) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &EduQuestConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`] with an injectable environment lookup.
pub fn resolve_with_env(
    config: &EduQuestConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Starting points: CLI → env → config → default
    let starting_points = cli
        .points
        .or_else(|| {
            env("EDUQUEST_STARTING_POINTS").and_then(|v| match v.trim().parse() {
                Ok(points) => Some(points),
                Err(_) => {
                    warn!("Ignoring EDUQUEST_STARTING_POINTS={v:?}: not a number");
                    None
                }
            })
        })
        .or(config.general.starting_points)
        .unwrap_or(DEFAULT_STARTING_POINTS);

    // Catalog: CLI → env → config (relative to ~/.eduquest/) → built-in
    let catalog_file = cli
        .catalog
        .clone()
        .or_else(|| env("EDUQUEST_CATALOG").map(PathBuf::from))
        .or_else(|| {
            config
                .general
                .catalog_file
                .as_deref()
                .map(resolve_config_relative)
        });

    // Speech backend: CLI → env → config → default
    let speech_backend = cli
        .speech
        .or_else(|| {
            env("EDUQUEST_SPEECH").and_then(|v| match SpeechBackend::from_str(&v, true) {
                Ok(backend) => Some(backend),
                Err(_) => {
                    warn!("Ignoring EDUQUEST_SPEECH={v:?}: expected silent or system");
                    None
                }
            })
        })
        .or(config.speech.backend)
        .unwrap_or_default();

    let voice = Voice {
        language: config
            .speech
            .language
            .clone()
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
        rate: config.speech.rate.unwrap_or(DEFAULT_RATE),
        pitch: config.speech.pitch.unwrap_or(DEFAULT_PITCH),
    };

    ResolvedConfig {
        starting_points,
        catalog_file,
        speech_backend,
        speech_command: config
            .speech
            .command
            .clone()
            .unwrap_or_else(|| DEFAULT_COMMAND.to_string()),
        voice,
        timing: Timing {
            recording: Duration::from_millis(
                config.timing.recording_ms.unwrap_or(DEFAULT_RECORDING_MS),
            ),
            playback: Duration::from_millis(
                config.timing.playback_ms.unwrap_or(DEFAULT_PLAYBACK_MS),
            ),
        },
    }
}

/// Config-file paths are relative to `~/.eduquest/` unless absolute.
fn resolve_config_relative(file: &str) -> PathBuf {
    let path = PathBuf::from(file);
    if path.is_absolute() {
        return path;
    }
    match config_dir() {
        Some(dir) => dir.join(path),
        None => path,
    }
}
