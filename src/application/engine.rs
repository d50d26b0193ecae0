use crate::domain::benchmark::{
    BenchmarkPolicy, BenchmarkResult, Classification, Confidence, PercentileRank, TierGoal,
};
use crate::domain::corpus::PeerCorpus;
use crate::domain::standards::StandardsTable;
use crate::domain::swim::{SwimTime, SwimmerQuery};
use tracing::debug;

/// Pure benchmark evaluator.
///
/// Works on pre-fetched, pre-validated collections, so evaluation cannot
/// fail: corrupt standards are rejected at table construction, and missing
/// data is expressed in the verdict rather than as an error.
pub struct BenchmarkEngine {
    policy: BenchmarkPolicy,
}

impl BenchmarkEngine {
    pub fn new(policy: BenchmarkPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &BenchmarkPolicy {
        &self.policy
    }

    /// Benchmarks one swim against its cohort's standards table and peer
    /// corpus. Either collection may be empty.
    pub fn evaluate(
        &self,
        query: &SwimmerQuery,
        standards: &StandardsTable,
        corpus: &PeerCorpus,
    ) -> BenchmarkResult {
        let time = query.time;
        let percentile = self.rank(time, corpus);
        let (classification, nearest_tier) = self.classify(time, standards, percentile.as_ref());

        debug!(
            cohort = %query.cohort_label(),
            time = %time,
            classification = %classification,
            population = corpus.population(),
            "benchmark evaluated"
        );

        BenchmarkResult {
            percentile,
            classification,
            nearest_tier,
            corpus: corpus.summary(),
            adjustment: None,
        }
    }

    fn rank(&self, time: SwimTime, corpus: &PeerCorpus) -> Option<PercentileRank> {
        let value = corpus.percentile_of(&time)?;
        let population = corpus.population();
        let confidence = if population < self.policy.min_sample_size {
            Confidence::Low
        } else {
            Confidence::Normal
        };
        Some(PercentileRank {
            value,
            population,
            confidence,
        })
    }

    fn classify(
        &self,
        time: SwimTime,
        standards: &StandardsTable,
        percentile: Option<&PercentileRank>,
    ) -> (Classification, Option<TierGoal>) {
        let rows = standards.tiers();
        if rows.is_empty() {
            let classification = match percentile {
                Some(rank) => Classification::SkillBand(self.policy.bands.level_for(rank.value)),
                None => Classification::Unranked,
            };
            return (classification, None);
        }

        // Rows are sorted fastest first; the first threshold the swim meets
        // is the highest tier achieved.
        match rows.iter().position(|row| time <= row.threshold) {
            // Top tier met, nothing left to chase.
            Some(0) => (Classification::Standard(rows[0].tier), None),
            Some(idx) => {
                let next = &rows[idx - 1];
                let goal = TierGoal {
                    tier: next.tier,
                    delta_seconds: time.seconds() - next.threshold.seconds(),
                };
                (Classification::Standard(rows[idx].tier), Some(goal))
            }
            None => {
                // Slower than every published threshold. The slowest tier is
                // the entry goal.
                let goal = standards.slowest().map(|row| TierGoal {
                    tier: row.tier,
                    delta_seconds: time.seconds() - row.threshold.seconds(),
                });
                (Classification::BelowStandards, goal)
            }
        }
    }
}
