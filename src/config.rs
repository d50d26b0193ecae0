//! Configuration loading from environment variables.
//!
//! Only policy knobs live here. Data sources arrive as CLI arguments, while
//! benchmark tuning comes from the environment so deployments can adjust
//! sample thresholds and band cutoffs without a rebuild.

use crate::domain::benchmark::{BenchmarkPolicy, BroadeningPolicy, PercentileBands};
use anyhow::{Context, Result};
use std::env;

/// Application configuration assembled from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub policy: BenchmarkPolicy,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let bands = PercentileBands::new(
            Self::parse_f64("BEGINNER_PERCENTILE_CEILING", 25.0)?,
            Self::parse_f64("INTERMEDIATE_PERCENTILE_CEILING", 60.0)?,
            Self::parse_f64("ADVANCED_PERCENTILE_CEILING", 90.0)?,
        )
        .context("Percentile band ceilings from environment")?;

        let broadening = BroadeningPolicy {
            enabled: Self::parse_bool("BROADEN_SPARSE_COHORTS", true),
            max_age_steps: Self::parse_u8("BROADEN_MAX_AGE_STEPS", 2)?,
            merge_genders: Self::parse_bool("BROADEN_MERGE_GENDERS", true),
        };

        let min_sample_size = Self::parse_usize("MIN_SAMPLE_SIZE", 5)?;
        if min_sample_size == 0 {
            anyhow::bail!("MIN_SAMPLE_SIZE must be at least 1");
        }

        Ok(Self {
            policy: BenchmarkPolicy {
                min_sample_size,
                bands,
                broadening,
            },
        })
    }

    fn parse_usize(key: &str, default: usize) -> Result<usize> {
        env::var(key)
            .unwrap_or_else(|_| default.to_string())
            .parse::<usize>()
            .context(format!("Failed to parse {}", key))
    }

    fn parse_u8(key: &str, default: u8) -> Result<u8> {
        env::var(key)
            .unwrap_or_else(|_| default.to_string())
            .parse::<u8>()
            .context(format!("Failed to parse {}", key))
    }

    fn parse_f64(key: &str, default: f64) -> Result<f64> {
        env::var(key)
            .unwrap_or_else(|_| default.to_string())
            .parse::<f64>()
            .context(format!("Failed to parse {}", key))
    }

    fn parse_bool(key: &str, default: bool) -> bool {
        env::var(key)
            .unwrap_or_else(|_| default.to_string())
            .parse::<bool>()
            .unwrap_or(default)
    }
}
