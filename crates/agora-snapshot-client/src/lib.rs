//! Agora Snapshot Client
//!
//! HTTP client for the historical-balance snapshot service. The service
//! indexes token balances per chain height so that voting power can be
//! evaluated as of a proposal's snapshot height instead of the live
//! balance.
//!
//! # Example
//!
//! ```rust,no_run
//! use agora_snapshot_client::{SnapshotClient, SnapshotConfig};
//! use agora_contract::{Address, TokenId};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = SnapshotClient::new(SnapshotConfig {
//!     base_url: "http://localhost:8080".into(),
//!     ..Default::default()
//! });
//!
//! let balance = client
//!     .balance_at(4321, &TokenId::new("tti_01"), &Address::new("agora_voter"))
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod types;

pub use client::SnapshotClient;
pub use error::{Result, SnapshotError};
pub use types::{BalanceResponse, SnapshotConfig};
