//! Agora SDK - DAO Governance Client
//!
//! Client data-access layer for the Agora governance platform. The
//! authoritative state lives in an on-chain contract; this crate turns
//! domain operations into contract calls and queries, reconciles the
//! results with an in-memory read cache, and runs the
//! write-then-confirm-then-refresh lifecycle of mutating operations.
//!
//! # Architecture
//!
//! - **Read path**: cache-first pagination over spaces, proposals and
//!   votes, with an explicit degrade-to-cache policy when a query fails.
//! - **Write path**: submit → bounded confirmation poll → event scan for
//!   the assigned id → read-back, so callers get contract-authoritative
//!   entities rather than optimistic guesses.
//! - **Derived values**: voting power, deposits and tallies as pure
//!   integer arithmetic over base units.
//!
//! Signing, submission and wire decoding are injected through the traits
//! in [`rpc`]; the typed contract schema lives in `agora-contract`.
//!
//! # Example
//!
//! ```rust,ignore
//! use agora_sdk::{GovernanceClient, PageRequest};
//!
//! let client = GovernanceClient::new(descriptor, rpc, tokens, chain)
//!     .with_address(wallet_address);
//!
//! // Cache-first listing
//! let spaces = client.spaces(PageRequest::default()).await;
//!
//! // Write with confirmed read-back
//! let space = client.create_space(profile).await?;
//! ```

// In-memory entity cache
pub mod cache;

// Governance client (read path + write path)
pub mod client;

// Error types
pub mod error;

// Derived values: voting power, deposits, tallies
pub mod power;

// Injected collaborator seams
pub mod rpc;

// Domain DTOs
pub mod types;

// Re-export the client types
pub use client::{ConfirmPolicy, GovernanceClient};

// Re-export cache and error types
pub use cache::GovernanceCache;
pub use error::{ClientError, Result};

// Re-export derived-value helpers
pub use power::{proposal_deposit, scale_to_base_units, voting_power, Tally};

// Re-export collaborator seams
pub use rpc::{
    BalanceSource, CallHandle, CallReceipt, ChainInfo, ContractRpc, Funding, LiveBalances,
    RpcError, RpcResult, SnapshotBalances, TokenDirectory,
};

// Re-export domain types
pub use types::{
    ChoiceAction, CreateProposalInput, PageRequest, Proposal, ProposalState, Space, SpaceProfile,
    SpaceSettings, Token, TokenInfo, Vote,
};

// Re-export from the underlying crates
pub use agora_contract::{Address, ContractDescriptor, Network, TokenId};
pub use agora_snapshot_client::{SnapshotClient, SnapshotConfig};
