//! Flight provider selection.

use serde::Deserialize;

use crate::adapter::outbound::amadeus::AmadeusConfig;
use crate::adapter::outbound::synthetic::SyntheticConfig;

/// Which provider backs the monitor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Deterministic offline fares.
    #[default]
    Synthetic,
    /// Amadeus Self-Service API.
    Amadeus,
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Synthetic => write!(f, "synthetic"),
            Self::Amadeus => write!(f, "amadeus"),
        }
    }
}

/// `[provider]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub kind: ProviderKind,
    #[serde(default)]
    pub synthetic: SyntheticConfig,
    #[serde(default)]
    pub amadeus: AmadeusConfig,
}
