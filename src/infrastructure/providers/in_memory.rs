//! In-Memory Benchmark Data Provider
//!
//! Thread-safe, in-memory implementation of the `BenchmarkDataProvider`
//! port. Holds standards and peer results behind `Arc<RwLock>` so tests and
//! single-process deployments can seed and query the same store.
//!
//! Data is lost on restart. For a durable source, implement
//! `BenchmarkDataProvider` over a database or a sanctioning body's API.

use crate::domain::ports::BenchmarkDataProvider;
use crate::domain::standards::StandardsRow;
use crate::domain::swim::{Gender, PeerResult};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

pub struct InMemoryProvider {
    standards: Arc<RwLock<Vec<StandardsRow>>>,
    results: Arc<RwLock<Vec<PeerResult>>>,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self {
            standards: Arc::new(RwLock::new(Vec::new())),
            results: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn seeded(standards: Vec<StandardsRow>, results: Vec<PeerResult>) -> Self {
        Self {
            standards: Arc::new(RwLock::new(standards)),
            results: Arc::new(RwLock::new(results)),
        }
    }

    pub async fn add_standards(&self, rows: Vec<StandardsRow>) {
        self.standards.write().await.extend(rows);
    }

    pub async fn add_result(&self, result: PeerResult) {
        self.results.write().await.push(result);
    }

    pub async fn result_count(&self) -> usize {
        self.results.read().await.len()
    }
}

impl Default for InMemoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BenchmarkDataProvider for InMemoryProvider {
    async fn fetch_standards(
        &self,
        event: &str,
        age: u8,
        gender: Option<Gender>,
    ) -> Result<Vec<StandardsRow>> {
        let standards = self.standards.read().await;
        Ok(standards
            .iter()
            .filter(|row| row.event == event && row.age == age && Some(row.gender) == gender)
            .cloned()
            .collect())
    }

    async fn fetch_peer_results(
        &self,
        event: &str,
        age: u8,
        gender: Option<Gender>,
    ) -> Result<Vec<PeerResult>> {
        let results = self.results.read().await;
        Ok(results
            .iter()
            .filter(|r| {
                r.event == event && r.age == age && gender.is_none_or(|g| r.gender == g)
            })
            .cloned()
            .collect())
    }
}
