// Benchmark verdict types and tuning policy
pub mod policy;
pub mod result;

pub use policy::{BenchmarkPolicy, BroadeningPolicy, PercentileBands};
pub use result::{
    BenchmarkResult, Classification, CohortAdjustment, Confidence, PercentileRank, SkillLevel,
    TierGoal,
};
