use std::io::Read;

use dentaku_core::Calculator;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur when reading a key tape.
#[derive(Debug, Error)]
pub enum TapeError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("tape is empty")]
    Empty,
}

impl From<csv::Error> for TapeError {
    fn from(err: csv::Error) -> Self {
        TapeError::CsvParse(err.to_string())
    }
}

/// One row of a key tape.
///
/// - `key`: the key to press, exactly as the engine receives it
/// - `expected`: the display text expected afterwards (empty to skip the check)
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct TapeRecord {
    pub key: String,
    #[serde(deserialize_with = "deserialize_optional_text")]
    pub expected: Option<String>,
}

fn deserialize_optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()))
}

/// A step whose display did not match the tape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TapeMismatch {
    /// 1-based row number, not counting the header.
    pub step: usize,
    pub key: String,
    pub expected: String,
    pub actual: String,
}

/// Outcome of replaying a tape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TapeReport {
    /// Keys fed to the engine.
    pub steps: usize,
    /// Steps that carried an expectation.
    pub checked: usize,
    pub mismatches: Vec<TapeMismatch>,
    /// Display after the last key.
    pub final_display: String,
}

impl TapeReport {
    pub fn passed(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// Reads key tapes from CSV and replays them against a [`Calculator`].
///
/// A tape is a CSV file with a `key,expected` header, one key per row.
/// Replaying feeds every key in order and compares the display after each
/// key that has an expectation.
pub struct TapeLoader;

impl TapeLoader {
    /// Parse tape records from a CSV reader.
    ///
    /// The reader can be any type that implements `Read`, such as a file or
    /// a byte slice. Keys are not trimmed so that a blank key reaches the
    /// engine as-is.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<TapeRecord>, TapeError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::None)
            .from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: TapeRecord = result?;
            records.push(record);
        }

        if records.is_empty() {
            return Err(TapeError::Empty);
        }

        Ok(records)
    }

    /// Feed every record's key into `calc` and collect mismatches.
    ///
    /// The calculator is used as given; call [`Calculator::reset`] first for
    /// a clean run.
    pub fn replay(
        calc: &mut Calculator,
        records: &[TapeRecord],
    ) -> TapeReport {
        let mut report = TapeReport::default();

        for (index, record) in records.iter().enumerate() {
            let actual = calc.accept(&record.key).to_string();
            report.steps += 1;

            let Some(expected) = &record.expected else {
                continue;
            };
            report.checked += 1;

            if *expected != actual {
                debug!(step = index + 1, key = %record.key, %expected, %actual, "tape mismatch");
                report.mismatches.push(TapeMismatch {
                    step: index + 1,
                    key: record.key.clone(),
                    expected: expected.clone(),
                    actual,
                });
            }
        }

        report.final_display = calc.display_text().to_string();
        info!(
            steps = report.steps,
            checked = report.checked,
            mismatches = report.mismatches.len(),
            "tape replayed"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const ADDITION_TAPE: &str = "key,expected
5,5
+,5
3,3
=,8
";

    #[test]
    fn parse_reads_keys_and_expectations() {
        let records = TapeLoader::parse(ADDITION_TAPE.as_bytes()).unwrap();

        assert_eq!(records.len(), 4);
        assert_eq!(
            records[3],
            TapeRecord {
                key: "=".to_string(),
                expected: Some("8".to_string()),
            }
        );
    }

    #[test]
    fn parse_treats_blank_expectation_as_unchecked() {
        let records = TapeLoader::parse("key,expected\n5,\n=, \n".as_bytes()).unwrap();

        assert_eq!(records[0].expected, None);
        assert_eq!(records[1].expected, None);
    }

    #[test]
    fn parse_rejects_header_only_tape() {
        let result = TapeLoader::parse("key,expected\n".as_bytes());

        assert!(matches!(result, Err(TapeError::Empty)));
    }

    #[test]
    fn parse_rejects_missing_column() {
        let result = TapeLoader::parse("key\n5\n".as_bytes());

        assert!(matches!(result, Err(TapeError::CsvParse(_))));
    }

    #[test]
    fn replay_passes_matching_tape() {
        let records = TapeLoader::parse(ADDITION_TAPE.as_bytes()).unwrap();
        let mut calc = Calculator::new();

        let report = TapeLoader::replay(&mut calc, &records);

        assert!(report.passed());
        assert_eq!(report.steps, 4);
        assert_eq!(report.checked, 4);
        assert_eq!(report.final_display, "8");
    }

    #[test]
    fn replay_records_mismatch_with_step_number() {
        let records =
            TapeLoader::parse("key,expected\n4,4\n*,4\n2,2\n+,8\n1,1\n=,5\n".as_bytes()).unwrap();
        let mut calc = Calculator::new();

        let report = TapeLoader::replay(&mut calc, &records);

        assert_eq!(
            report.mismatches,
            vec![TapeMismatch {
                step: 6,
                key: "=".to_string(),
                expected: "5".to_string(),
                actual: "9".to_string(),
            }]
        );
    }

    #[test]
    fn replay_feeds_unknown_keys_to_error_path() {
        let records = TapeLoader::parse("key,expected\n7,7\nx,Err\n2,2\n".as_bytes()).unwrap();
        let mut calc = Calculator::new();

        let report = TapeLoader::replay(&mut calc, &records);

        assert!(report.passed());
    }
}
