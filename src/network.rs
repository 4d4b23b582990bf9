//! Maps log file names to network ids.
//!
//! The mapping is an ordered list of `(prefix, network)` rules plus a
//! fallback network. The first rule whose prefix matches the file name wins;
//! a name that matches no rule lands in the fallback, so categorization is
//! total.

use serde::{Deserialize, Serialize};

use crate::config::{ALL_NETWORKS, DEFAULT_NETWORKS, FALLBACK_NETWORK};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkRule {
    pub prefix: String,
    pub network: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkTable {
    rules: Vec<NetworkRule>,
    fallback: String,
}

impl NetworkTable {
    pub fn new(rules: Vec<NetworkRule>, fallback: impl Into<String>) -> Self {
        Self {
            rules,
            fallback: fallback.into(),
        }
    }

    pub fn rules(&self) -> &[NetworkRule] {
        &self.rules
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    pub fn categorize(&self, file_name: &str) -> &str {
        self.rules
            .iter()
            .find(|rule| file_name.starts_with(&rule.prefix))
            .map(|rule| rule.network.as_str())
            .unwrap_or(self.fallback.as_str())
    }
}

impl Default for NetworkTable {
    fn default() -> Self {
        let rules = DEFAULT_NETWORKS
            .iter()
            .map(|(prefix, network)| NetworkRule {
                prefix: prefix.to_string(),
                network: network.to_string(),
            })
            .collect();
        Self::new(rules, FALLBACK_NETWORK)
    }
}

/// Network selector for listings: every network, or exactly one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkFilter {
    All,
    Only(String),
}

impl NetworkFilter {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") => NetworkFilter::All,
            Some(ALL_NETWORKS) => NetworkFilter::All,
            Some(network) => NetworkFilter::Only(network.to_string()),
        }
    }

    pub fn matches(&self, network: &str) -> bool {
        match self {
            NetworkFilter::All => true,
            NetworkFilter::Only(wanted) => wanted == network,
        }
    }
}
