use super::time::SwimTime;
use anyhow::bail;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Gender bucket of published standards and observed results.
///
/// Queries carry `Option<Gender>`: `None` means the caller did not specify
/// one and the peer slice spans both buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "M"),
            Gender::Female => write!(f, "F"),
        }
    }
}

impl FromStr for Gender {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "m" | "male" | "boys" => Ok(Gender::Male),
            "f" | "female" | "girls" => Ok(Gender::Female),
            _ => bail!("Invalid gender: {}. Must be 'M' or 'F'", s),
        }
    }
}

/// One benchmarking request: who swam what, how fast.
///
/// Built at the intake boundary (time already validated through
/// [`SwimTime::parse`]) and consumed once by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwimmerQuery {
    /// Event identifier, e.g. "100 Free SCY".
    pub event: String,
    pub age: u8,
    pub gender: Option<Gender>,
    pub time: SwimTime,
}

impl SwimmerQuery {
    pub fn new(
        event: impl Into<String>,
        age: u8,
        gender: Option<Gender>,
        time: SwimTime,
    ) -> Self {
        Self {
            event: event.into(),
            age,
            gender,
            time,
        }
    }

    /// Human-readable cohort key for logs and error messages.
    pub fn cohort_label(&self) -> String {
        match self.gender {
            Some(gender) => format!("{} age {} {}", self.event, self.age, gender),
            None => format!("{} age {} any gender", self.event, self.age),
        }
    }
}

/// One observed peer performance in the (event, age, gender) bucket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeerResult {
    pub event: String,
    pub age: u8,
    pub gender: Gender,
    pub time: SwimTime,
    /// Meet date, when the source carries one. Not used for ranking.
    pub recorded_at: Option<DateTime<Utc>>,
}

impl PeerResult {
    pub fn new(event: impl Into<String>, age: u8, gender: Gender, time: SwimTime) -> Self {
        Self {
            event: event.into(),
            age,
            gender,
            time,
            recorded_at: None,
        }
    }

    pub fn recorded_at(mut self, at: DateTime<Utc>) -> Self {
        self.recorded_at = Some(at);
        self
    }
}
