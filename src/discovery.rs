use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

use crate::error::StatsError;
use crate::network::NetworkTable;
use crate::rollup::SkippedFile;

/// A log file found in the log directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogFileDescriptor {
    pub name: String,
    pub network: String,
    #[serde(rename = "timestamp", serialize_with = "serialize_iso")]
    pub last_modified: DateTime<Utc>,
}

fn serialize_iso<S: Serializer>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&to_iso(dt))
}

/// ISO-8601 in UTC with millisecond precision, e.g. `2024-11-02T10:05:00.123Z`.
pub fn to_iso(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Result of one directory scan.
#[derive(Debug, Default)]
pub struct Discovery {
    pub files: Vec<LogFileDescriptor>,
    /// Matching entries whose metadata could not be read.
    pub unreadable: Vec<SkippedFile>,
}

/// Scan `dir` for regular files ending in `suffix`. Order is unspecified.
pub async fn discover(
    dir: &Path,
    suffix: &str,
    networks: &NetworkTable,
) -> Result<Discovery, StatsError> {
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .map_err(|source| directory_unavailable(dir, source))?;

    let mut found = Discovery::default();
    loop {
        let entry = match entries.next_entry().await {
            Ok(Some(entry)) => entry,
            Ok(None) => break,
            Err(source) => return Err(directory_unavailable(dir, source)),
        };

        let name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(raw) => {
                debug!("Skipping non-UTF-8 file name {:?}", raw);
                continue;
            }
        };
        if !name.ends_with(suffix) {
            continue;
        }

        // Follows symlinks, like a plain stat
        let metadata = match tokio::fs::metadata(entry.path()).await {
            Ok(m) => m,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Log file {} vanished during scan", name);
                continue;
            }
            Err(source) => {
                found.unreadable.push(unreadable(name, source));
                continue;
            }
        };
        if !metadata.is_file() {
            continue;
        }

        let modified = match metadata.modified() {
            Ok(modified) => modified,
            Err(source) => {
                found.unreadable.push(unreadable(name, source));
                continue;
            }
        };

        found.files.push(LogFileDescriptor {
            network: networks.categorize(&name).to_string(),
            last_modified: modified.into(),
            name,
        });
    }

    Ok(found)
}

fn unreadable(name: String, source: std::io::Error) -> SkippedFile {
    let reason = StatsError::FileReadFailure {
        name: name.clone(),
        source,
    }
    .to_string();
    SkippedFile { name, reason }
}

fn directory_unavailable(dir: &Path, source: std::io::Error) -> StatsError {
    StatsError::DirectoryUnavailable {
        path: dir.to_path_buf(),
        source,
    }
}
