//! Types for the snapshot service API

use serde::{Deserialize, Serialize};

/// Client configuration
#[derive(Debug, Clone)]
pub struct SnapshotConfig {
    /// Base URL for the snapshot service HTTP API
    pub base_url: String,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Response from the balance endpoint. A missing balance means the address
/// held nothing at that height.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceResponse {
    /// Base-unit balance as a decimal string
    pub balance: Option<String>,
}
