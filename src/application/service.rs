use crate::application::engine::BenchmarkEngine;
use crate::domain::benchmark::{BenchmarkResult, CohortAdjustment};
use crate::domain::corpus::PeerCorpus;
use crate::domain::ports::BenchmarkDataProvider;
use crate::domain::standards::{StandardsRow, StandardsTable};
use crate::domain::swim::{PeerResult, SwimmerQuery};
use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info};

/// Fetches a swimmer's cohort data and runs it through the engine.
///
/// The service owns the impure half of a benchmark: concurrent provider
/// fetches, standards validation, and widening of sparse peer slices. The
/// engine stays pure underneath it.
pub struct BenchmarkService {
    provider: Arc<dyn BenchmarkDataProvider>,
    engine: BenchmarkEngine,
}

impl BenchmarkService {
    pub fn new(provider: Arc<dyn BenchmarkDataProvider>, engine: BenchmarkEngine) -> Self {
        Self { provider, engine }
    }

    pub async fn evaluate(&self, query: &SwimmerQuery) -> Result<BenchmarkResult> {
        let (standards_rows, peer_rows) = tokio::try_join!(
            self.fetch_standards(query),
            self.provider
                .fetch_peer_results(&query.event, query.age, query.gender),
        )
        .with_context(|| format!("fetching benchmark data for {}", query.cohort_label()))?;

        let standards = StandardsTable::from_rows(standards_rows)
            .with_context(|| format!("standards for {}", query.cohort_label()))?;

        debug!(
            cohort = %query.cohort_label(),
            standards = standards.len(),
            peers = peer_rows.len(),
            "cohort data fetched"
        );

        let (corpus, adjustment) = self.widen_if_sparse(query, peer_rows).await?;

        let mut result = self.engine.evaluate(query, &standards, &corpus);
        if let Some(adjustment) = adjustment {
            info!(cohort = %query.cohort_label(), %adjustment, "peer slice widened");
            result = result.with_adjustment(adjustment);
        }
        Ok(result)
    }

    /// Standards are keyed on (event, age, gender). A swimmer with no
    /// recorded gender has no key to look up, so the table stays empty and
    /// the engine falls back to percentile bands.
    async fn fetch_standards(&self, query: &SwimmerQuery) -> Result<Vec<StandardsRow>> {
        if query.gender.is_none() {
            return Ok(Vec::new());
        }
        self.provider
            .fetch_standards(&query.event, query.age, query.gender)
            .await
    }

    /// Widens a sparse peer slice per the broadening policy: nearby ages one
    /// year at a time, then both gender buckets. Standards are never widened.
    async fn widen_if_sparse(
        &self,
        query: &SwimmerQuery,
        base: Vec<PeerResult>,
    ) -> Result<(PeerCorpus, Option<CohortAdjustment>)> {
        let policy = self.engine.policy().broadening;
        let min = self.engine.policy().min_sample_size;
        let base_population = base.len();
        if !policy.enabled || base_population >= min {
            return Ok((PeerCorpus::from_results(base), None));
        }

        let mut pool = base;
        let mut fetched = BTreeSet::from([query.age]);
        let (mut lo, mut hi) = (query.age, query.age);
        for step in 1..=policy.max_age_steps {
            if pool.len() >= min {
                break;
            }
            // Both sides of the step before re-checking, so the widened range
            // stays centred on the query age.
            for age in [
                query.age.saturating_sub(step),
                query.age.saturating_add(step),
            ] {
                if fetched.insert(age) {
                    let extra = self
                        .provider
                        .fetch_peer_results(&query.event, age, query.gender)
                        .await?;
                    pool.extend(extra);
                    lo = lo.min(age);
                    hi = hi.max(age);
                }
            }
        }

        let mut merged = false;
        if pool.len() < min && policy.merge_genders && query.gender.is_some() {
            // Refetch the whole range unfiltered rather than appending the
            // other bucket, so no swim is counted twice.
            pool.clear();
            for age in lo..=hi {
                let extra = self
                    .provider
                    .fetch_peer_results(&query.event, age, None)
                    .await?;
                pool.extend(extra);
            }
            merged = true;
        }

        let widened = (lo, hi) != (query.age, query.age) || merged;
        let adjustment = widened.then(|| CohortAdjustment {
            age_low: lo,
            age_high: hi,
            merged_genders: merged,
            base_population,
            widened_population: pool.len(),
        });
        Ok((PeerCorpus::from_results(pool), adjustment))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::benchmark::{BenchmarkPolicy, Classification, Confidence};
    use crate::domain::standards::StandardTier;
    use crate::domain::swim::{Gender, SwimTime};
    use async_trait::async_trait;
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct ScriptedProvider {
        standards: Vec<StandardsRow>,
        peers: Vec<PeerResult>,
        fetches: AtomicUsize,
    }

    impl ScriptedProvider {
        fn new(standards: Vec<StandardsRow>, peers: Vec<PeerResult>) -> Self {
            Self {
                standards,
                peers,
                fetches: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl BenchmarkDataProvider for ScriptedProvider {
        async fn fetch_standards(
            &self,
            event: &str,
            age: u8,
            gender: Option<Gender>,
        ) -> Result<Vec<StandardsRow>> {
            Ok(self
                .standards
                .iter()
                .filter(|row| {
                    row.event == event && row.age == age && Some(row.gender) == gender
                })
                .cloned()
                .collect())
        }

        async fn fetch_peer_results(
            &self,
            event: &str,
            age: u8,
            gender: Option<Gender>,
        ) -> Result<Vec<PeerResult>> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            Ok(self
                .peers
                .iter()
                .filter(|peer| {
                    peer.event == event
                        && peer.age == age
                        && gender.is_none_or(|g| peer.gender == g)
                })
                .cloned()
                .collect())
        }
    }

    fn time(seconds: rust_decimal::Decimal) -> SwimTime {
        SwimTime::from_seconds(seconds).unwrap()
    }

    fn standards_row(tier: StandardTier, threshold: rust_decimal::Decimal) -> StandardsRow {
        StandardsRow {
            event: "100 Free SCY".to_string(),
            age: 12,
            gender: Gender::Female,
            tier,
            threshold: time(threshold),
        }
    }

    fn peer(age: u8, gender: Gender, seconds: rust_decimal::Decimal) -> PeerResult {
        PeerResult::new("100 Free SCY", age, gender, time(seconds))
    }

    fn service(provider: ScriptedProvider, policy: BenchmarkPolicy) -> BenchmarkService {
        BenchmarkService::new(Arc::new(provider), BenchmarkEngine::new(policy))
    }

    #[tokio::test]
    async fn test_full_cohort_needs_no_widening() {
        let standards = vec![
            standards_row(StandardTier::AAAA, dec!(58.0)),
            standards_row(StandardTier::AAA, dec!(60.0)),
            standards_row(StandardTier::AA, dec!(62.0)),
            standards_row(StandardTier::A, dec!(64.0)),
            standards_row(StandardTier::B, dec!(66.0)),
        ];
        let peers = (0..8)
            .map(|i| peer(12, Gender::Female, dec!(59.0) + rust_decimal::Decimal::from(i)))
            .collect();
        let provider = ScriptedProvider::new(standards, peers);
        let service = service(provider, BenchmarkPolicy::default());

        let query = SwimmerQuery::new("100 Free SCY", 12, Some(Gender::Female), time(dec!(61.5)));
        let result = service.evaluate(&query).await.unwrap();

        assert_eq!(result.classification, Classification::Standard(StandardTier::AA));
        assert_eq!(result.nearest_tier.unwrap().delta_seconds, dec!(1.5));
        assert!(result.adjustment.is_none());
        assert_eq!(result.percentile.unwrap().confidence, Confidence::Normal);
    }

    #[tokio::test]
    async fn test_sparse_slice_widens_to_nearby_ages() {
        let peers = vec![
            peer(12, Gender::Female, dec!(61.0)),
            peer(11, Gender::Female, dec!(63.0)),
            peer(11, Gender::Female, dec!(64.0)),
            peer(13, Gender::Female, dec!(60.0)),
            peer(13, Gender::Female, dec!(59.5)),
        ];
        let provider = ScriptedProvider::new(Vec::new(), peers);
        let service = service(provider, BenchmarkPolicy::default());

        let query = SwimmerQuery::new("100 Free SCY", 12, Some(Gender::Female), time(dec!(62.0)));
        let result = service.evaluate(&query).await.unwrap();

        let adjustment = result.adjustment.unwrap();
        assert_eq!((adjustment.age_low, adjustment.age_high), (11, 13));
        assert!(!adjustment.merged_genders);
        assert_eq!(adjustment.base_population, 1);
        assert_eq!(adjustment.widened_population, 5);
        assert_eq!(result.percentile.unwrap().population, 5);
    }

    #[tokio::test]
    async fn test_widening_merges_genders_without_double_counting() {
        // Two girls in range, three boys. Ages alone cannot reach five.
        let peers = vec![
            peer(12, Gender::Female, dec!(61.0)),
            peer(13, Gender::Female, dec!(60.0)),
            peer(12, Gender::Male, dec!(58.0)),
            peer(11, Gender::Male, dec!(62.0)),
            peer(14, Gender::Male, dec!(57.0)),
        ];
        let provider = ScriptedProvider::new(Vec::new(), peers);
        let service = service(provider, BenchmarkPolicy::default());

        let query = SwimmerQuery::new("100 Free SCY", 12, Some(Gender::Female), time(dec!(59.0)));
        let result = service.evaluate(&query).await.unwrap();

        let adjustment = result.adjustment.unwrap();
        assert!(adjustment.merged_genders);
        assert_eq!((adjustment.age_low, adjustment.age_high), (10, 14));
        // Girls already pooled must not appear twice after the merge.
        assert_eq!(adjustment.widened_population, 5);
    }

    #[tokio::test]
    async fn test_widening_disabled_keeps_sparse_slice() {
        let peers = vec![
            peer(12, Gender::Female, dec!(61.0)),
            peer(11, Gender::Female, dec!(63.0)),
        ];
        let provider = ScriptedProvider::new(Vec::new(), peers);
        let mut policy = BenchmarkPolicy::default();
        policy.broadening.enabled = false;
        let service = service(provider, policy);

        let query = SwimmerQuery::new("100 Free SCY", 12, Some(Gender::Female), time(dec!(62.0)));
        let result = service.evaluate(&query).await.unwrap();

        assert!(result.adjustment.is_none());
        let rank = result.percentile.unwrap();
        assert_eq!(rank.population, 1);
        assert_eq!(rank.confidence, Confidence::Low);
    }

    #[tokio::test]
    async fn test_unknown_gender_skips_standards_lookup() {
        let standards = vec![standards_row(StandardTier::B, dec!(66.0))];
        let peers = (0..6)
            .map(|i| peer(12, Gender::Female, dec!(60.0) + rust_decimal::Decimal::from(i)))
            .collect();
        let provider = ScriptedProvider::new(standards, peers);
        let service = service(provider, BenchmarkPolicy::default());

        let query = SwimmerQuery::new("100 Free SCY", 12, None, time(dec!(59.0)));
        let result = service.evaluate(&query).await.unwrap();

        assert!(matches!(result.classification, Classification::SkillBand(_)));
        assert!(result.nearest_tier.is_none());
    }

    #[tokio::test]
    async fn test_corrupt_standards_surface_as_error() {
        // B faster than AAAA, which no real table allows.
        let standards = vec![
            standards_row(StandardTier::AAAA, dec!(58.0)),
            standards_row(StandardTier::B, dec!(55.0)),
        ];
        let provider = ScriptedProvider::new(standards, Vec::new());
        let service = service(provider, BenchmarkPolicy::default());

        let query = SwimmerQuery::new("100 Free SCY", 12, Some(Gender::Female), time(dec!(60.0)));
        let err = service.evaluate(&query).await.unwrap_err();

        use crate::domain::errors::BenchmarkError;
        assert!(matches!(
            err.downcast_ref::<BenchmarkError>(),
            Some(BenchmarkError::CorruptStandardsData { .. })
        ));
    }
}
