//! # Application State
//!
//! Shared state for the Axum application. The case registry is the single
//! ownership root for all cases; it is built once here and handed to both
//! service facades as an explicit dependency.

use std::sync::Arc;

use dilemma_state::{
    CaseRegistry, RandomSource, SeededRandom, ThreadRandom, DEFAULT_CASE_COUNT,
};
use thiserror::Error;

use crate::services::{AppealService, DecisionService};

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 8080;

/// Configuration read at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Number of cases to seed, with identifiers `0..case_count`.
    pub case_count: u32,
    /// Seed for reproducible draws. `None` uses OS-seeded randomness.
    pub rng_seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            case_count: DEFAULT_CASE_COUNT,
            rng_seed: None,
        }
    }
}

/// A configuration variable was set to an unparseable value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid value for {var}: {value:?}")]
pub struct ConfigError {
    /// Variable name.
    pub var: &'static str,
    /// Raw value found.
    pub value: String,
}

impl AppConfig {
    /// Read `PORT`, `DILEMMA_CASE_COUNT` and `DILEMMA_RNG_SEED` from the
    /// process environment. Unset variables take their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`AppConfig::from_env`] with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            port: parse_var(&lookup, "PORT")?.unwrap_or(defaults.port),
            case_count: parse_var(&lookup, "DILEMMA_CASE_COUNT")?.unwrap_or(defaults.case_count),
            rng_seed: parse_var(&lookup, "DILEMMA_RNG_SEED")?,
        })
    }
}

fn parse_var<F, T>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(var) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError { var, value: raw }),
    }
}

/// Shared application state passed to all route handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub registry: Arc<CaseRegistry>,
    pub decisions: DecisionService,
    pub appeals: AppealService,
    pub config: AppConfig,
}

impl AppState {
    /// Default configuration with OS-seeded randomness.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Build state from `config`, choosing the random source from its seed.
    pub fn with_config(config: AppConfig) -> Self {
        let random: Arc<dyn RandomSource> = match config.rng_seed {
            Some(seed) => Arc::new(SeededRandom::new(seed)),
            None => Arc::new(ThreadRandom),
        };
        Self::with_random(config, random)
    }

    /// Build state with an explicit random source, shared by the base
    /// sentence draws and the appeal trials.
    pub fn with_random(config: AppConfig, random: Arc<dyn RandomSource>) -> Self {
        let registry = Arc::new(CaseRegistry::seeded(config.case_count, Arc::clone(&random)));
        Self {
            decisions: DecisionService::new(Arc::clone(&registry)),
            appeals: AppealService::new(Arc::clone(&registry), random),
            registry,
            config,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
