use crate::domain::standards::StandardsRow;
use crate::domain::swim::{Gender, PeerResult};
use anyhow::Result;
use async_trait::async_trait;

// Need async_trait for async functions in traits
#[async_trait]
pub trait BenchmarkDataProvider: Send + Sync {
    /// Standards rows for the exact (event, age, gender) key. A swimmer with
    /// no recorded gender has no standards row to match, so `None` yields an
    /// empty slice.
    async fn fetch_standards(
        &self,
        event: &str,
        age: u8,
        gender: Option<Gender>,
    ) -> Result<Vec<StandardsRow>>;

    /// Peer swims for the given slice. `gender: None` means both buckets.
    async fn fetch_peer_results(
        &self,
        event: &str,
        age: u8,
        gender: Option<Gender>,
    ) -> Result<Vec<PeerResult>>;
}
