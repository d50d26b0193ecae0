use super::result::SkillLevel;
use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

/// Percentile cutoffs for the skill-band fallback used when a cohort has no
/// published standards.
///
/// Bands are half-open: a swimmer sits in the first band whose ceiling their
/// percentile is below, and at or above the advanced ceiling they are Elite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentileBands {
    beginner_ceiling: f64,
    intermediate_ceiling: f64,
    advanced_ceiling: f64,
}

impl PercentileBands {
    /// Validates that ceilings are strictly ascending and inside (0, 100).
    pub fn new(
        beginner_ceiling: f64,
        intermediate_ceiling: f64,
        advanced_ceiling: f64,
    ) -> Result<Self> {
        let ceilings = [beginner_ceiling, intermediate_ceiling, advanced_ceiling];
        if ceilings.iter().any(|c| !c.is_finite() || *c <= 0.0 || *c >= 100.0) {
            bail!(
                "Percentile band ceilings must lie strictly between 0 and 100, got {:?}",
                ceilings
            );
        }
        if beginner_ceiling >= intermediate_ceiling || intermediate_ceiling >= advanced_ceiling {
            bail!(
                "Percentile band ceilings must be strictly ascending, got {:?}",
                ceilings
            );
        }
        Ok(Self {
            beginner_ceiling,
            intermediate_ceiling,
            advanced_ceiling,
        })
    }

    pub fn level_for(&self, percentile: f64) -> SkillLevel {
        if percentile < self.beginner_ceiling {
            SkillLevel::Beginner
        } else if percentile < self.intermediate_ceiling {
            SkillLevel::Intermediate
        } else if percentile < self.advanced_ceiling {
            SkillLevel::Advanced
        } else {
            SkillLevel::Elite
        }
    }

    pub fn beginner_ceiling(&self) -> f64 {
        self.beginner_ceiling
    }

    pub fn intermediate_ceiling(&self) -> f64 {
        self.intermediate_ceiling
    }

    pub fn advanced_ceiling(&self) -> f64 {
        self.advanced_ceiling
    }
}

impl Default for PercentileBands {
    fn default() -> Self {
        Self {
            beginner_ceiling: 25.0,
            intermediate_ceiling: 60.0,
            advanced_ceiling: 90.0,
        }
    }
}

/// How far the service may widen a sparse peer slice before giving up.
///
/// Widening applies to the peer corpus only. Standards are exact-key by
/// definition and are never broadened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BroadeningPolicy {
    pub enabled: bool,
    /// Maximum age distance searched around the query age (one year per step).
    pub max_age_steps: u8,
    /// After exhausting age steps, merge both gender buckets.
    pub merge_genders: bool,
}

impl Default for BroadeningPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            max_age_steps: 2,
            merge_genders: true,
        }
    }
}

/// Tunable knobs of the benchmarking engine and service.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkPolicy {
    /// Smallest population for which a percentile counts as meaningful.
    /// Below it the rank is still reported, flagged low-confidence.
    pub min_sample_size: usize,
    pub bands: PercentileBands,
    pub broadening: BroadeningPolicy,
}

impl Default for BenchmarkPolicy {
    fn default() -> Self {
        Self {
            min_sample_size: 5,
            bands: PercentileBands::default(),
            broadening: BroadeningPolicy::default(),
        }
    }
}
