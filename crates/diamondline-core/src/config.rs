// Configuration loading and parsing (scoring.toml).

use crate::grade::{Grade, GradeLadder};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

const SCORING_FILE: &str = "scoring.toml";

/// Tolerance for the weight-sum check.
pub const WEIGHT_SUM_EPSILON: f64 = 1e-6;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Factor weights
// ---------------------------------------------------------------------------

/// Per-factor weights used by the confidence aggregator. Must sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct FactorWeights {
    pub offensive: f64,
    pub pitching: f64,
    pub situational: f64,
    pub momentum: f64,
    pub market: f64,
    pub system: f64,
}

impl FactorWeights {
    /// The daily-pick weighting.
    pub const STANDARD: FactorWeights = FactorWeights {
        offensive: 0.20,
        pitching: 0.25,
        situational: 0.15,
        momentum: 0.20,
        market: 0.10,
        system: 0.10,
    };

    pub fn sum(&self) -> f64 {
        self.offensive + self.pitching + self.situational + self.momentum + self.market + self.system
    }

    fn named(&self) -> [(&'static str, f64); 6] {
        [
            ("offensive", self.offensive),
            ("pitching", self.pitching),
            ("situational", self.situational),
            ("momentum", self.momentum),
            ("market", self.market),
            ("system", self.system),
        ]
    }
}

impl Default for FactorWeights {
    fn default() -> Self {
        Self::STANDARD
    }
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    /// Name of the active weight profile.
    pub profile: String,
    /// Weights of the active profile.
    pub weights: FactorWeights,
    /// Every profile defined in the file, including the active one.
    pub profiles: BTreeMap<String, FactorWeights>,
    pub grading: GradingConfig,
    pub reasoning: ReasoningConfig,
    pub noise_seed: Option<u64>,
    pub data_paths: DataPaths,
}

impl Default for Config {
    fn default() -> Self {
        let mut profiles = BTreeMap::new();
        profiles.insert("standard".to_string(), FactorWeights::STANDARD);
        Config {
            profile: "standard".into(),
            weights: FactorWeights::STANDARD,
            profiles,
            grading: GradingConfig::default(),
            reasoning: ReasoningConfig::default(),
            noise_seed: None,
            data_paths: DataPaths::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// scoring.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire scoring.toml file.
#[derive(Debug, Clone, Deserialize)]
struct ScoringFile {
    scoring: ScoringSection,
    profiles: BTreeMap<String, FactorWeights>,
    #[serde(default)]
    grading: GradingConfig,
    #[serde(default)]
    reasoning: ReasoningConfig,
    #[serde(default)]
    noise: NoiseSection,
    data_paths: DataPaths,
}

#[derive(Debug, Clone, Deserialize)]
struct ScoringSection {
    profile: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct NoiseSection {
    seed: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GradingConfig {
    #[serde(default)]
    pub ladder: GradeLadder,
    #[serde(default = "default_min_grade")]
    pub min_grade: Grade,
}

impl Default for GradingConfig {
    fn default() -> Self {
        GradingConfig {
            ladder: GradeLadder::Confidence,
            min_grade: default_min_grade(),
        }
    }
}

fn default_min_grade() -> Grade {
    Grade::CPlus
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReasoningConfig {
    #[serde(default = "default_salience")]
    pub salience_threshold: f64,
    /// Use the randomized narrative generator instead of the templated sentence.
    #[serde(default)]
    pub narrative: bool,
}

impl Default for ReasoningConfig {
    fn default() -> Self {
        ReasoningConfig {
            salience_threshold: default_salience(),
            narrative: false,
        }
    }
}

fn default_salience() -> f64 {
    75.0
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DataPaths {
    /// Odds feed JSON file.
    pub games: String,
    /// Optional per-team statistics CSV. Synthetic stats are used without it.
    #[serde(default)]
    pub team_stats: Option<String>,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/scoring.toml` relative to the
/// given `base_dir`.
///
/// This is the lower-level loading primitive that does not auto-copy defaults.
/// Prefer `load_config()` which handles default initialization automatically.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let scoring_path = base_dir.join("config").join(SCORING_FILE);
    let text = read_file(&scoring_path)?;
    parse_config(&text).map_err(|e| match e {
        ParseFailure::Toml(source) => ConfigError::ParseError {
            path: scoring_path.clone(),
            source,
        },
        ParseFailure::Invalid(err) => err,
    })
}

enum ParseFailure {
    Toml(toml::de::Error),
    Invalid(ConfigError),
}

fn parse_config(text: &str) -> Result<Config, ParseFailure> {
    let file: ScoringFile = toml::from_str(text).map_err(ParseFailure::Toml)?;

    let weights = file
        .profiles
        .get(&file.scoring.profile)
        .copied()
        .ok_or_else(|| {
            ParseFailure::Invalid(ConfigError::ValidationError {
                field: "scoring.profile".into(),
                message: format!("no [profiles.{}] table defined", file.scoring.profile),
            })
        })?;

    let config = Config {
        profile: file.scoring.profile,
        weights,
        profiles: file.profiles,
        grading: file.grading,
        reasoning: file.reasoning,
        noise_seed: file.noise.seed,
        data_paths: file.data_paths,
    };

    validate(&config).map_err(ParseFailure::Invalid)?;
    Ok(config)
}

/// Seed `config/scoring.toml` from `defaults/scoring.toml` when it is missing.
/// Returns the path written, or `None` when a config file was already there.
pub fn ensure_scoring_file(base_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let target = base_dir.join("config").join(SCORING_FILE);
    if target.exists() {
        return Ok(None);
    }

    let source = base_dir.join("defaults").join(SCORING_FILE);
    if !source.is_file() {
        return Err(ConfigError::DefaultsCopyError {
            message: format!(
                "no config/{SCORING_FILE} and no defaults/{SCORING_FILE} in {}",
                base_dir.display()
            ),
        });
    }

    if let Some(dir) = target.parent() {
        std::fs::create_dir_all(dir).map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to create {}: {e}", dir.display()),
        })?;
    }
    std::fs::copy(&source, &target).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to copy {} to {}: {e}", source.display(), target.display()),
    })?;
    Ok(Some(target))
}

/// Load `config/scoring.toml` under the current working directory, seeding it
/// from `defaults/` on first run.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_scoring_file(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Check weight ranges and sums for every profile.
pub fn validate_weights(name: &str, weights: &FactorWeights) -> Result<(), ConfigError> {
    for (factor, value) in weights.named() {
        if !(0.0..=1.0).contains(&value) {
            return Err(ConfigError::ValidationError {
                field: format!("profiles.{name}.{factor}"),
                message: format!("must be between 0.0 and 1.0 inclusive, got {value}"),
            });
        }
    }
    let sum = weights.sum();
    if (sum - 1.0).abs() > WEIGHT_SUM_EPSILON {
        return Err(ConfigError::ValidationError {
            field: format!("profiles.{name}"),
            message: format!("weights must sum to 1.0, got {sum}"),
        });
    }
    Ok(())
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    for (name, weights) in &config.profiles {
        validate_weights(name, weights)?;
    }

    let salience = config.reasoning.salience_threshold;
    if !(0.0..=100.0).contains(&salience) {
        return Err(ConfigError::ValidationError {
            field: "reasoning.salience_threshold".into(),
            message: format!("must be between 0 and 100 inclusive, got {salience}"),
        });
    }

    if config.data_paths.games.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "data_paths.games".into(),
            message: "must not be empty".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
