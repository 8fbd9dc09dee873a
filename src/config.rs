// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;

use crate::services::feed::DEFAULT_MAX_CONCURRENT_READS;
use crate::services::streak::{DEFAULT_LOOKBACK_DAYS, MAX_LOOKBACK_DAYS};

const DEFAULT_LOG_FILTER: &str = "acogo_fitness=debug,info";

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Structured JSON, one event per line
    #[default]
    Json,
    /// Human-readable, for local development
    Pretty,
}

impl FromStr for LogFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            _ => Err(()),
        }
    }
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Days of history scanned when a streak query has no lookback
    pub streak_lookback_days: u32,
    /// Bound on concurrent per-author close-friend lookups in the feed
    pub feed_max_concurrent_reads: usize,
    /// `EnvFilter` directives
    pub log_filter: String,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            streak_lookback_days: DEFAULT_LOOKBACK_DAYS,
            feed_max_concurrent_reads: DEFAULT_MAX_CONCURRENT_READS,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            log_format: LogFormat::Json,
        }
    }
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let streak_lookback_days = parse_var("STREAK_LOOKBACK_DAYS", DEFAULT_LOOKBACK_DAYS)?;
        if !(1..=MAX_LOOKBACK_DAYS).contains(&streak_lookback_days) {
            return Err(ConfigError::Invalid {
                var: "STREAK_LOOKBACK_DAYS",
                value: streak_lookback_days.to_string(),
            });
        }

        let feed_max_concurrent_reads =
            parse_var("FEED_MAX_CONCURRENT_READS", DEFAULT_MAX_CONCURRENT_READS)?;
        if feed_max_concurrent_reads == 0 {
            return Err(ConfigError::Invalid {
                var: "FEED_MAX_CONCURRENT_READS",
                value: "0".to_string(),
            });
        }

        Ok(Self {
            streak_lookback_days,
            feed_max_concurrent_reads,
            log_filter: env::var("LOG_FILTER").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string()),
            log_format: parse_var("LOG_FORMAT", LogFormat::Json)?,
        })
    }
}

fn parse_var<T: FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(var) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value }),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}
