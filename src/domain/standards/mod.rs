// Published time standards: graded tiers and the validated per-cohort ladder
pub mod table;
pub mod tier;

pub use table::{StandardsRow, StandardsTable};
pub use tier::StandardTier;
