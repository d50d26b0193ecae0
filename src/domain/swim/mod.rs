// Swimmer-facing value objects: normalized times, queries, observed results
pub mod time;
pub mod types;

pub use time::SwimTime;
pub use types::{Gender, PeerResult, SwimmerQuery};
