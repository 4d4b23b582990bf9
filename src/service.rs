//! Directory-bound entry points used by the HTTP layer.
//!
//! Every call rescans the log directory and rereads files; nothing is
//! cached between requests.

use futures::stream::{self, StreamExt};
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tracing::{info, warn};

use crate::config::{ServiceConfig, ROLLUP_READ_CONCURRENCY};
use crate::discovery::{self, Discovery, LogFileDescriptor};
use crate::error::StatsError;
use crate::listing::{self, Page, PageRequest};
use crate::network::NetworkTable;
use crate::records;
use crate::rollup::{self, NetworkRollup, SkippedFile};
use crate::stats::{self, FileStatistics};

#[derive(Debug, Clone)]
pub struct LogService {
    log_dir: PathBuf,
    suffix: String,
    networks: NetworkTable,
}

impl LogService {
    pub fn new(log_dir: impl Into<PathBuf>, suffix: impl Into<String>, networks: NetworkTable) -> Self {
        Self {
            log_dir: log_dir.into(),
            suffix: suffix.into(),
            networks,
        }
    }

    pub fn from_config(config: &ServiceConfig, networks: NetworkTable) -> Self {
        Self::new(config.log_dir.clone(), config.suffix.clone(), networks)
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    pub fn networks(&self) -> &NetworkTable {
        &self.networks
    }

    pub async fn list_files(&self, request: &PageRequest) -> Result<Page<LogFileDescriptor>, StatsError> {
        let found = self.discover().await?;
        for skipped in &found.unreadable {
            warn!("Leaving {} out of listing: {}", skipped.name, skipped.reason);
        }
        let mut page = listing::paginate(found.files, request);
        page.skipped_files = found.unreadable;
        Ok(page)
    }

    pub async fn file_statistics(&self, file_name: &str) -> Result<FileStatistics, StatsError> {
        let path = self.resolve(file_name)?;
        let bytes = read_file(&path, file_name).await?;
        Ok(parse_and_aggregate(file_name, &bytes))
    }

    /// Roll every discovered file up into per-network statistics. Files that
    /// fail to read are reported in `skipped_files`; the rest still count.
    pub async fn network_statistics(&self) -> Result<NetworkRollup, StatsError> {
        let found = self.discover().await?;
        let file_count = found.files.len() + found.unreadable.len();

        let results: Vec<(LogFileDescriptor, Result<FileStatistics, StatsError>)> =
            stream::iter(found.files)
                .map(|file| async move {
                    let path = self.log_dir.join(&file.name);
                    let stats = read_file(&path, &file.name)
                        .await
                        .map(|bytes| parse_and_aggregate(&file.name, &bytes));
                    (file, stats)
                })
                .buffer_unordered(ROLLUP_READ_CONCURRENCY)
                .collect()
                .await;

        let mut per_file = Vec::with_capacity(results.len());
        let mut skipped_files = found.unreadable;
        for (file, result) in results {
            match result {
                Ok(stats) => per_file.push((file.network, stats)),
                Err(e) => {
                    warn!("Leaving {} out of network rollup: {}", file.name, e);
                    skipped_files.push(SkippedFile {
                        name: file.name,
                        reason: e.to_string(),
                    });
                }
            }
        }
        skipped_files.sort_by(|a, b| a.name.cmp(&b.name));

        let networks = rollup::rollup(per_file);
        info!(
            "Rolled up {} log files into {} networks ({} skipped)",
            file_count,
            networks.len(),
            skipped_files.len()
        );

        Ok(NetworkRollup {
            networks,
            skipped_files,
        })
    }

    /// Raw contents of one log file, unparsed.
    pub async fn raw_file(&self, file_name: &str) -> Result<bytes::Bytes, StatsError> {
        let path = self.resolve(file_name)?;
        read_file(&path, file_name).await.map(bytes::Bytes::from)
    }

    async fn discover(&self) -> Result<Discovery, StatsError> {
        discovery::discover(&self.log_dir, &self.suffix, &self.networks).await
    }

    /// Map a client-supplied name to a path inside the log directory.
    fn resolve(&self, file_name: &str) -> Result<PathBuf, StatsError> {
        validate_file_name(file_name)?;
        if !file_name.ends_with(&self.suffix) {
            return Err(StatsError::FileNotFound(file_name.to_string()));
        }
        Ok(self.log_dir.join(file_name))
    }
}

/// Accept only a single normal path component without control characters.
pub fn validate_file_name(file_name: &str) -> Result<(), StatsError> {
    let invalid = || StatsError::InvalidFileName(file_name.to_string());

    if file_name.is_empty()
        || file_name.contains(['/', '\\'])
        || file_name.chars().any(char::is_control)
    {
        return Err(invalid());
    }
    let mut components = Path::new(file_name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(invalid()),
    }
}

async fn read_file(path: &Path, file_name: &str) -> Result<Vec<u8>, StatsError> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(bytes),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            Err(StatsError::FileNotFound(file_name.to_string()))
        }
        Err(source) => Err(StatsError::FileReadFailure {
            name: file_name.to_string(),
            source,
        }),
    }
}

fn parse_and_aggregate(file_name: &str, bytes: &[u8]) -> FileStatistics {
    let content = records::decode(bytes);
    let parsed = records::parse(&content);
    if parsed.malformed_lines > 0 {
        warn!(
            "Skipped {} malformed line(s) in {}",
            parsed.malformed_lines, file_name
        );
    }
    stats::aggregate_parsed(&parsed)
}
