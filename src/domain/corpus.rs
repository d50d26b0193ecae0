use crate::domain::swim::{PeerResult, SwimTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use statrs::statistics::{Data, OrderStatistics};

/// Descriptive statistics for one cohort slice, for presentation context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusSummary {
    pub population: usize,
    pub fastest: SwimTime,
    pub lower_quartile: SwimTime,
    pub median: SwimTime,
    pub upper_quartile: SwimTime,
    pub slowest: SwimTime,
}

/// Immutable snapshot of the peer times for one (event, age, gender) slice.
///
/// Times are kept sorted ascending (fastest first) so rank queries are two
/// binary searches. The snapshot never outlives a single evaluation.
#[derive(Debug, Clone, Default)]
pub struct PeerCorpus {
    times: Vec<SwimTime>,
}

impl PeerCorpus {
    pub fn from_results(results: Vec<PeerResult>) -> Self {
        Self::from_times(results.into_iter().map(|r| r.time).collect())
    }

    pub fn from_times(mut times: Vec<SwimTime>) -> Self {
        times.sort();
        Self { times }
    }

    pub fn population(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Better-than percentile with mid-rank tie handling.
    ///
    /// percentile = 100 x (strictly slower + 0.5 x exactly equal) / population.
    /// Ties are split at half weight so the queried swimmer is neither
    /// favored nor penalized against peers with the identical time. Returns
    /// `None` for an empty population, so the caller omits the percentile
    /// rather than fabricating one.
    pub fn percentile_of(&self, time: &SwimTime) -> Option<f64> {
        if self.times.is_empty() {
            return None;
        }
        let population = self.times.len();
        let faster = self.times.partition_point(|t| t < time);
        let faster_or_equal = self.times.partition_point(|t| t <= time);
        let equal = faster_or_equal - faster;
        let slower = population - faster_or_equal;

        Some(100.0 * (slower as f64 + 0.5 * equal as f64) / population as f64)
    }

    /// Quartile summary of the slice, `None` when there are no peers.
    pub fn summary(&self) -> Option<CorpusSummary> {
        let fastest = *self.times.first()?;
        let slowest = *self.times.last()?;

        let mut data = Data::new(self.times.iter().map(SwimTime::as_f64).collect::<Vec<_>>());
        Some(CorpusSummary {
            population: self.times.len(),
            fastest,
            lower_quartile: Self::time_from_stat(data.lower_quartile(), fastest),
            median: Self::time_from_stat(data.median(), fastest),
            upper_quartile: Self::time_from_stat(data.upper_quartile(), fastest),
            slowest,
        })
    }

    fn time_from_stat(stat: f64, fallback: SwimTime) -> SwimTime {
        Decimal::from_f64_retain(stat)
            .map(|seconds| seconds.round_dp(2))
            .and_then(|seconds| SwimTime::from_seconds(seconds).ok())
            .unwrap_or(fallback)
    }
}
