use serde::{Deserialize, Serialize};

use crate::config::{STATUS_ERROR, STATUS_SUCCESS, TEST_RESULT_TYPE};
use crate::records::{LogRecord, ParsedLog};

// ============================================================================
// Result types
// ============================================================================

/// Success/failure summary over a set of test-run records.
///
/// The same shape describes one file and one network; wire names match the
/// dashboard's expectations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunStatistics {
    #[serde(rename = "success")]
    pub success_count: u64,
    #[serde(rename = "failure")]
    pub failure_count: u64,
    #[serde(rename = "totalDuration")]
    pub total_duration_ms: f64,
    pub total_runs: u64,
    #[serde(rename = "successRate")]
    pub success_rate_percent: f64,
    #[serde(rename = "failureRate")]
    pub failure_rate_percent: f64,
    pub latest_timestamp: String,
    pub malformed_lines: u64,
}

pub type FileStatistics = RunStatistics;
pub type NetworkStatistics = RunStatistics;

// ============================================================================
// Accumulator
// ============================================================================

/// Mergeable fold state. `observe` and `merge` are associative and
/// commutative; rates only exist after `finish`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tally {
    success_count: u64,
    failure_count: u64,
    total_duration_ms: f64,
    latest_timestamp: String,
    malformed_lines: u64,
}

impl Tally {
    pub fn observe(&mut self, record: &LogRecord) {
        if record.kind != TEST_RESULT_TYPE {
            return;
        }

        match record.status.as_str() {
            STATUS_SUCCESS => {
                self.success_count += 1;
                self.total_duration_ms += sanitize_duration(record.duration);
            }
            STATUS_ERROR => self.failure_count += 1,
            _ => {}
        }

        self.bump_latest(&record.timestamp);
    }

    pub fn record_malformed(&mut self, lines: usize) {
        self.malformed_lines += lines as u64;
    }

    pub fn merge(&mut self, other: &Tally) {
        self.success_count += other.success_count;
        self.failure_count += other.failure_count;
        self.total_duration_ms += other.total_duration_ms;
        self.malformed_lines += other.malformed_lines;
        self.bump_latest(&other.latest_timestamp);
    }

    pub fn finish(self) -> RunStatistics {
        let total_runs = self.success_count + self.failure_count;
        let (success_rate_percent, failure_rate_percent) =
            rates(self.success_count, self.failure_count);

        RunStatistics {
            success_count: self.success_count,
            failure_count: self.failure_count,
            total_duration_ms: self.total_duration_ms,
            total_runs,
            success_rate_percent,
            failure_rate_percent,
            latest_timestamp: self.latest_timestamp,
            malformed_lines: self.malformed_lines,
        }
    }

    fn bump_latest(&mut self, timestamp: &str) {
        if timestamp > self.latest_timestamp.as_str() {
            self.latest_timestamp = timestamp.to_string();
        }
    }
}

impl From<&RunStatistics> for Tally {
    fn from(stats: &RunStatistics) -> Self {
        Tally {
            success_count: stats.success_count,
            failure_count: stats.failure_count,
            total_duration_ms: stats.total_duration_ms,
            latest_timestamp: stats.latest_timestamp.clone(),
            malformed_lines: stats.malformed_lines,
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn sanitize_duration(duration: Option<f64>) -> f64 {
    match duration {
        Some(ms) if ms.is_finite() && ms > 0.0 => ms,
        _ => 0.0,
    }
}

/// Percent rates, both zero when there are no runs. The failure rate is the
/// complement of the success rate so the pair sums to exactly 100.
fn rates(success_count: u64, failure_count: u64) -> (f64, f64) {
    let total_runs = success_count + failure_count;
    if total_runs == 0 {
        return (0.0, 0.0);
    }
    let success = success_count as f64 / total_runs as f64 * 100.0;
    (success, 100.0 - success)
}

// ============================================================================
// Aggregation
// ============================================================================

fn fold<'a>(records: impl IntoIterator<Item = &'a LogRecord>) -> Tally {
    let mut tally = Tally::default();
    for record in records {
        tally.observe(record);
    }
    tally
}

pub fn aggregate<'a>(records: impl IntoIterator<Item = &'a LogRecord>) -> FileStatistics {
    fold(records).finish()
}

/// Aggregate a parsed file, carrying its malformed-line count.
pub fn aggregate_parsed(parsed: &ParsedLog) -> FileStatistics {
    let mut tally = fold(&parsed.records);
    tally.record_malformed(parsed.malformed_lines);
    tally.finish()
}
