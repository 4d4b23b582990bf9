use serde::Serialize;
use std::collections::BTreeMap;

use crate::stats::{FileStatistics, NetworkStatistics, Tally};

/// A file left out of a rollup because it could not be read.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedFile {
    pub name: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkRollup {
    pub networks: BTreeMap<String, NetworkStatistics>,
    pub skipped_files: Vec<SkippedFile>,
}

/// Group per-file statistics by network and re-derive rates from the summed
/// counts.
pub fn rollup<N, S>(files: impl IntoIterator<Item = (N, S)>) -> BTreeMap<String, NetworkStatistics>
where
    N: Into<String>,
    S: std::borrow::Borrow<FileStatistics>,
{
    let mut tallies: BTreeMap<String, Tally> = BTreeMap::new();

    for (network, stats) in files {
        tallies
            .entry(network.into())
            .or_default()
            .merge(&Tally::from(stats.borrow()));
    }

    tallies
        .into_iter()
        .map(|(network, tally)| (network, tally.finish()))
        .collect()
}
