use anyhow::Context;
use serde::Deserialize;
use std::path::Path;

use crate::config::FALLBACK_NETWORK;
use crate::network::{NetworkRule, NetworkTable};

/// On-disk form of the network table.
#[derive(Debug, Deserialize)]
pub struct NetworkSettings {
    pub networks: Vec<NetworkRule>,
    #[serde(default = "default_fallback")]
    pub fallback: String,
}

fn default_fallback() -> String {
    FALLBACK_NETWORK.to_string()
}

impl From<NetworkSettings> for NetworkTable {
    fn from(settings: NetworkSettings) -> Self {
        NetworkTable::new(settings.networks, settings.fallback)
    }
}

pub fn load_network_table(path: &Path) -> anyhow::Result<NetworkTable> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read networks file {:?}", path))?;
    let settings: NetworkSettings = serde_json::from_str(&content)
        .with_context(|| format!("Invalid networks file {:?}", path))?;
    Ok(settings.into())
}

/// Use the file when one is configured, otherwise the built-in table.
pub fn resolve_network_table(path: Option<&Path>) -> anyhow::Result<NetworkTable> {
    match path {
        Some(path) => load_network_table(path),
        None => Ok(NetworkTable::default()),
    }
}
