//! CSV-Backed Benchmark Data Provider
//!
//! Loads standards and peer results from CSV exports at startup and serves
//! them read-only. This is the adapter behind the CLI: meet software and
//! times databases all export CSV, so it doubles as the on-ramp for real
//! club data.
//!
//! Expected columns:
//! - standards: `event,age,gender,tier,threshold`
//! - results:   `event,age,gender,time,date` (date optional, `YYYY-MM-DD`)
//! - roster:    `event,age,gender,time` (gender may be blank)

use crate::domain::ports::BenchmarkDataProvider;
use crate::domain::standards::{StandardTier, StandardsRow};
use crate::domain::swim::{Gender, PeerResult, SwimTime, SwimmerQuery};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;

#[derive(Debug, Deserialize)]
struct StandardsRecord {
    event: String,
    age: u8,
    gender: String,
    tier: String,
    threshold: String,
}

#[derive(Debug, Deserialize)]
struct ResultRecord {
    event: String,
    age: u8,
    gender: String,
    time: String,
    #[serde(default)]
    date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RosterRecord {
    event: String,
    age: u8,
    #[serde(default)]
    gender: Option<String>,
    time: String,
}

pub fn load_standards(path: &Path) -> Result<Vec<StandardsRow>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut rdr = csv::Reader::from_reader(BufReader::new(file));

    let mut rows = Vec::new();
    for (i, record) in rdr.deserialize().enumerate() {
        let context = || format!("standards row {} in {}", i + 1, path.display());
        let record: StandardsRecord = record.with_context(context)?;
        rows.push(StandardsRow {
            gender: record.gender.parse::<Gender>().with_context(context)?,
            tier: record.tier.parse::<StandardTier>().with_context(context)?,
            threshold: SwimTime::parse(&record.threshold).with_context(context)?,
            event: record.event,
            age: record.age,
        });
    }
    info!(rows = rows.len(), path = %path.display(), "standards loaded");
    Ok(rows)
}

pub fn load_peer_results(path: &Path) -> Result<Vec<PeerResult>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut rdr = csv::Reader::from_reader(BufReader::new(file));

    let mut results = Vec::new();
    for (i, record) in rdr.deserialize().enumerate() {
        let record: ResultRecord =
            record.with_context(|| format!("result row {} in {}", i + 1, path.display()))?;
        let context = || format!("result row {} in {}", i + 1, path.display());

        let mut result = PeerResult::new(
            &record.event,
            record.age,
            record.gender.parse::<Gender>().with_context(context)?,
            SwimTime::parse(&record.time).with_context(context)?,
        );
        if let Some(date) = record.date.as_deref() {
            let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").with_context(context)?;
            result = result.recorded_at(date.and_time(NaiveTime::MIN).and_utc());
        }
        results.push(result);
    }
    info!(rows = results.len(), path = %path.display(), "peer results loaded");
    Ok(results)
}

/// Roster rows are swims to evaluate, not data to benchmark against, so
/// gender may be blank and times arrive in raw meet format.
pub fn load_roster(path: &Path) -> Result<Vec<SwimmerQuery>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut rdr = csv::Reader::from_reader(BufReader::new(file));

    let mut roster = Vec::new();
    for (i, record) in rdr.deserialize().enumerate() {
        let record: RosterRecord =
            record.with_context(|| format!("roster row {} in {}", i + 1, path.display()))?;
        let context = || format!("roster row {} in {}", i + 1, path.display());

        let gender = match record.gender.as_deref() {
            Some(raw) if !raw.trim().is_empty() => {
                Some(raw.parse::<Gender>().with_context(context)?)
            }
            _ => None,
        };
        let time = SwimTime::parse(&record.time).with_context(context)?;
        roster.push(SwimmerQuery::new(&record.event, record.age, gender, time));
    }
    Ok(roster)
}

/// Read-only provider over CSV snapshots, loaded once at construction.
pub struct CsvProvider {
    standards: Vec<StandardsRow>,
    results: Vec<PeerResult>,
}

impl CsvProvider {
    pub fn from_paths(standards: &Path, results: &Path) -> Result<Self> {
        Ok(Self {
            standards: load_standards(standards)?,
            results: load_peer_results(results)?,
        })
    }
}

#[async_trait]
impl BenchmarkDataProvider for CsvProvider {
    async fn fetch_standards(
        &self,
        event: &str,
        age: u8,
        gender: Option<Gender>,
    ) -> Result<Vec<StandardsRow>> {
        Ok(self
            .standards
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
        Ok(self
            .results
            .iter()
            .filter(|r| r.event == event && r.age == age && gender.is_none_or(|g| r.gender == g))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_standards_parses_rows() {
        let path = write_temp(
            "swimbench_standards_ok.csv",
            "event,age,gender,tier,threshold\n\
             100 Free SCY,12,F,AAAA,58.00\n\
             100 Free SCY,12,F,B,1:06.00\n",
        );
        let rows = load_standards(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].tier, StandardTier::AAAA);
        assert_eq!(rows[1].threshold.to_string(), "1:06.00");
    }

    #[test]
    fn test_load_standards_reports_row_number_on_bad_time() {
        let path = write_temp(
            "swimbench_standards_bad.csv",
            "event,age,gender,tier,threshold\n\
             100 Free SCY,12,F,AAAA,58.00\n\
             100 Free SCY,12,F,AAA,1:63.00\n",
        );
        let err = load_standards(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("row 2"), "error was: {:#}", err);
    }

    #[test]
    fn test_load_results_with_and_without_dates() {
        let path = write_temp(
            "swimbench_results_ok.csv",
            "event,age,gender,time,date\n\
             100 Free SCY,12,F,1:01.50,2026-03-14\n\
             100 Free SCY,12,F,59.80,\n",
        );
        let results = load_peer_results(&path).unwrap();
        assert_eq!(results.len(), 2);
        assert!(results[0].recorded_at.is_some());
        assert!(results[1].recorded_at.is_none());
    }

    #[test]
    fn test_load_roster_allows_blank_gender() {
        let path = write_temp(
            "swimbench_roster_ok.csv",
            "event,age,gender,time\n\
             100 Free SCY,12,F,1:01.50\n\
             50 Back SCY,9,,41.3\n",
        );
        let roster = load_roster(&path).unwrap();
        assert_eq!(roster.len(), 2);
        assert_eq!(roster[0].gender, Some(Gender::Female));
        assert_eq!(roster[1].gender, None);
    }

    #[tokio::test]
    async fn test_csv_provider_serves_filtered_slices() {
        let standards = write_temp(
            "swimbench_provider_standards.csv",
            "event,age,gender,tier,threshold\n\
             100 Free SCY,12,F,B,1:06.00\n",
        );
        let results = write_temp(
            "swimbench_provider_results.csv",
            "event,age,gender,time,date\n\
             100 Free SCY,12,F,1:01.50,\n\
             100 Free SCY,12,M,58.90,\n\
             100 Free SCY,11,F,1:04.20,\n",
        );
        let provider = CsvProvider::from_paths(&standards, &results).unwrap();

        let rows = provider
            .fetch_standards("100 Free SCY", 12, Some(Gender::Female))
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);

        let both = provider
            .fetch_peer_results("100 Free SCY", 12, None)
            .await
            .unwrap();
        assert_eq!(both.len(), 2);
    }
}
