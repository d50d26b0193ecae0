use crate::domain::corpus::CorpusSummary;
use crate::domain::standards::StandardTier;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Qualitative band assigned from percentile rank when a cohort has no
/// published standards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
    Elite,
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkillLevel::Beginner => write!(f, "Beginner"),
            SkillLevel::Intermediate => write!(f, "Intermediate"),
            SkillLevel::Advanced => write!(f, "Advanced"),
            SkillLevel::Elite => write!(f, "Elite"),
        }
    }
}

/// How much to trust a reported percentile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Confidence {
    /// Population below the configured minimum sample size.
    Low,
    Normal,
}

/// Percentile standing within the peer corpus, mid-rank tie convention.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentileRank {
    /// Share of the corpus slower than the swimmer, ties split, in [0, 100].
    pub value: f64,
    pub population: usize,
    pub confidence: Confidence,
}

/// Where the swim lands against published standards, or against peers when
/// the cohort has none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Classification {
    /// Met or beat the named motivational standard.
    Standard(StandardTier),
    /// Slower than the slowest published standard for the cohort. Expected
    /// for developing swimmers, never a data fault.
    BelowStandards,
    /// No standards cover the cohort; percentile band reported instead.
    SkillBand(SkillLevel),
    /// Neither standards nor peer data available.
    Unranked,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::Standard(tier) => write!(f, "{} standard", tier),
            Classification::BelowStandards => write!(f, "below published standards"),
            Classification::SkillBand(level) => write!(f, "{} (by percentile)", level),
            Classification::Unranked => write!(f, "unranked"),
        }
    }
}

/// The next tier up and the exact time drop needed to reach it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierGoal {
    pub tier: StandardTier,
    /// Seconds to shave off the swim to hit the tier threshold, exact.
    pub delta_seconds: Decimal,
}

/// Records how far a sparse peer slice was widened to reach a usable sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CohortAdjustment {
    pub age_low: u8,
    pub age_high: u8,
    pub merged_genders: bool,
    /// Population of the exact-cohort slice before widening.
    pub base_population: usize,
    pub widened_population: usize,
}

impl fmt::Display for CohortAdjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ages {}-{}", self.age_low, self.age_high)?;
        if self.merged_genders {
            write!(f, ", genders merged")?;
        }
        write!(
            f,
            " ({} -> {} peers)",
            self.base_population, self.widened_population
        )
    }
}

/// Full verdict for one swim: standing against peers, standing against
/// standards, and the next concrete target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkResult {
    /// Absent when no peer data could be found even after widening.
    pub percentile: Option<PercentileRank>,
    pub classification: Classification,
    /// Next tier up, with the required drop. Absent at the top tier and when
    /// no standards cover the cohort.
    pub nearest_tier: Option<TierGoal>,
    /// Shape of the peer corpus the percentile was computed against.
    pub corpus: Option<CorpusSummary>,
    /// Present only when the peer slice was actually widened.
    pub adjustment: Option<CohortAdjustment>,
}

impl BenchmarkResult {
    pub fn with_adjustment(mut self, adjustment: CohortAdjustment) -> Self {
        self.adjustment = Some(adjustment);
        self
    }
}
