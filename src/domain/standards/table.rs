use super::tier::StandardTier;
use crate::domain::errors::BenchmarkError;
use crate::domain::swim::{Gender, SwimTime};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// One published time standard for a single (event, age, gender) cohort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardsRow {
    pub event: String,
    pub age: u8,
    pub gender: Gender,
    pub tier: StandardTier,
    /// Slowest time that still earns this tier; lower is faster.
    pub threshold: SwimTime,
}

impl StandardsRow {
    fn cohort_label(&self) -> String {
        format!("{} age {} {}", self.event, self.age, self.gender)
    }
}

/// Validated snapshot of one cohort's standards, ordered fastest tier first.
///
/// Construction is where data quality is enforced: thresholds must be
/// strictly monotonic with tier order (faster tier, lower time), each tier
/// may appear once, and all rows must belong to the same cohort. An empty
/// table is legal and means "standards unavailable", since not every
/// (event, age, gender) combination is published.
#[derive(Debug, Clone, Default)]
pub struct StandardsTable {
    rows: Vec<StandardsRow>,
}

impl StandardsTable {
    pub fn from_rows(mut rows: Vec<StandardsRow>) -> Result<Self, BenchmarkError> {
        let Some(first) = rows.first() else {
            return Ok(Self { rows });
        };
        let cohort = first.cohort_label();

        if let Some(stray) = rows.iter().find(|row| row.cohort_label() != cohort) {
            warn!(
                "Standards slice mixes cohorts: {} vs {}",
                cohort,
                stray.cohort_label()
            );
            return Err(BenchmarkError::CorruptStandardsData {
                cohort,
                reason: format!("rows span multiple cohorts (also {})", stray.cohort_label()),
            });
        }

        rows.sort_by(|a, b| b.tier.cmp(&a.tier));

        for pair in rows.windows(2) {
            let (faster, slower) = (&pair[0], &pair[1]);
            if faster.tier == slower.tier {
                warn!("Standards slice for {} repeats tier {}", cohort, faster.tier);
                return Err(BenchmarkError::CorruptStandardsData {
                    cohort,
                    reason: format!("tier {} appears more than once", faster.tier),
                });
            }
            if faster.threshold >= slower.threshold {
                warn!(
                    "Standards slice for {} is non-monotonic: {} at {} vs {} at {}",
                    cohort, faster.tier, faster.threshold, slower.tier, slower.threshold
                );
                return Err(BenchmarkError::CorruptStandardsData {
                    cohort,
                    reason: format!(
                        "{} threshold {} is not faster than {} threshold {}",
                        faster.tier, faster.threshold, slower.tier, slower.threshold
                    ),
                });
            }
        }

        Ok(Self { rows })
    }

    /// Rows ordered fastest tier first.
    pub fn tiers(&self) -> &[StandardsRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// The fastest published tier, if any standards exist.
    pub fn fastest(&self) -> Option<&StandardsRow> {
        self.rows.first()
    }

    /// The slowest published tier, if any standards exist.
    pub fn slowest(&self) -> Option<&StandardsRow> {
        self.rows.last()
    }
}
