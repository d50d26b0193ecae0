use crate::application::service::BenchmarkService;
use crate::domain::benchmark::BenchmarkResult;
use crate::domain::swim::SwimmerQuery;
use rayon::prelude::*;
use std::sync::Arc;
use tracing::debug;

/// Outcome of a single roster entry in a batch run.
///
/// Errors are carried per entry so one bad cohort never sinks the rest of
/// the roster.
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub query: SwimmerQuery,
    pub result: Result<BenchmarkResult, String>,
}

/// Evaluates a whole roster across the Rayon pool.
///
/// Each entry blocks on its own async fetch from a Rayon worker thread, so
/// this must run inside a multi-thread Tokio runtime. Outcomes come back in
/// roster order.
pub struct BatchRunner {
    service: Arc<BenchmarkService>,
}

impl BatchRunner {
    pub fn new(service: Arc<BenchmarkService>) -> Self {
        Self { service }
    }

    pub async fn evaluate_all(&self, roster: Vec<SwimmerQuery>) -> Vec<BatchOutcome> {
        let handle = tokio::runtime::Handle::current();
        debug!(entries = roster.len(), "batch evaluation started");

        roster
            .into_par_iter()
            .map(|query| {
                let service = self.service.clone();
                let entry = query.clone(); // Clone before moving into async
                let result = handle
                    .block_on(async move { service.evaluate(&entry).await })
                    .map_err(|e| format!("{:#}", e));
                BatchOutcome { query, result }
            })
            .collect()
    }
}
