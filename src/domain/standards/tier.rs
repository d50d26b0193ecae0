use anyhow::bail;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// USA-Swimming-style graded time standard.
///
/// Declaration order is slowest to fastest, so the derived `Ord` ranks
/// `B < A < AA < AAA < AAAA`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StandardTier {
    B,
    A,
    AA,
    AAA,
    AAAA,
}

impl StandardTier {
    /// All tiers, slowest first.
    pub fn all() -> Vec<StandardTier> {
        vec![
            StandardTier::B,
            StandardTier::A,
            StandardTier::AA,
            StandardTier::AAA,
            StandardTier::AAAA,
        ]
    }
}

impl fmt::Display for StandardTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StandardTier::B => write!(f, "B"),
            StandardTier::A => write!(f, "A"),
            StandardTier::AA => write!(f, "AA"),
            StandardTier::AAA => write!(f, "AAA"),
            StandardTier::AAAA => write!(f, "AAAA"),
        }
    }
}

impl FromStr for StandardTier {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "B" => Ok(StandardTier::B),
            "A" => Ok(StandardTier::A),
            "AA" => Ok(StandardTier::AA),
            "AAA" => Ok(StandardTier::AAA),
            "AAAA" => Ok(StandardTier::AAAA),
            _ => bail!("Invalid standard tier: {}. Must be B, A, AA, AAA or AAAA", s),
        }
    }
}
