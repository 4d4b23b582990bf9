#![allow(dead_code)]

use std::path::Path;
use std::time::{Duration, SystemTime};

pub const BASE_EPOCH_SECS: u64 = 1_730_000_000;

/// Write a log file and pin its mtime to `BASE_EPOCH_SECS + age_secs`.
pub fn write_log(dir: &Path, name: &str, content: &str, age_secs: u64) {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    let file = std::fs::File::options().write(true).open(&path).unwrap();
    file.set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(BASE_EPOCH_SECS + age_secs))
        .unwrap();
}

pub fn success(duration: u64, timestamp: &str) -> String {
    format!(
        r#"{{"type":"test_result","status":"success","duration":{},"timestamp":"{}"}}"#,
        duration, timestamp
    )
}

pub fn failure(timestamp: &str) -> String {
    format!(
        r#"{{"type":"test_result","status":"error","timestamp":"{}"}}"#,
        timestamp
    )
}

pub fn lines(lines: &[String]) -> String {
    let mut content = lines.join("\n");
    content.push('\n');
    content
}
