//! Injected collaborator seams.
//!
//! The client never signs, submits or decodes wire traffic itself; the
//! hosting application supplies implementations of these traits. All of
//! them are object-safe so a host can hand in trait objects.

use agora_contract::{
    Address, ContractDescriptor, EventKind, EventRecord, GovernanceCall, GovernanceQuery, TokenId,
    Value,
};
use agora_snapshot_client::{SnapshotClient, SnapshotError};
use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;

use crate::types::TokenInfo;

/// Failure surfaced by a collaborator.
#[derive(Debug, Error)]
pub enum RpcError {
    /// Network-level failure: node unreachable, request timed out.
    #[error("transport error: {0}")]
    Transport(String),

    /// The contract refused the call or query.
    #[error("contract rejected: {0}")]
    Rejected(String),
}

/// Result type for collaborator calls.
pub type RpcResult<T> = std::result::Result<T, RpcError>;

/// A submitted but not yet confirmed contract call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallHandle {
    /// Hash of the request block carrying the call.
    pub tx_hash: String,
}

/// Receipt for a confirmed contract call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallReceipt {
    /// Height at which the call was received by the contract.
    pub height: u64,
}

/// Token transfer attached to a contract call (fees and deposits).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Funding {
    pub token: TokenId,
    /// Base-unit amount as a decimal integer string.
    pub amount: String,
}

impl Funding {
    pub fn new(token: TokenId, amount: impl Into<String>) -> Self {
        Self {
            token,
            amount: amount.into(),
        }
    }
}

/// Signing, submitting and querying transport for the governance contract.
#[async_trait]
pub trait ContractRpc: Send + Sync {
    /// Sign and submit a state-changing call, optionally funded with a
    /// token transfer. Returns as soon as the request block is accepted;
    /// confirmation is observed separately through [`Self::receipt`].
    async fn submit(
        &self,
        contract: &ContractDescriptor,
        call: &GovernanceCall,
        funding: Option<&Funding>,
    ) -> RpcResult<CallHandle>;

    /// Receipt for a previously submitted call, or `None` while the
    /// contract has not yet received it.
    async fn receipt(
        &self,
        contract: &ContractDescriptor,
        handle: &CallHandle,
    ) -> RpcResult<Option<CallReceipt>>;

    /// Execute a read-only query and decode its outputs positionally.
    async fn query(
        &self,
        contract: &ContractDescriptor,
        query: &GovernanceQuery,
    ) -> RpcResult<Vec<Value>>;

    /// Decoded log records for one event name from `from_height` onward.
    async fn scan_events(
        &self,
        contract: &ContractDescriptor,
        from_height: u64,
        kind: EventKind,
    ) -> RpcResult<Vec<EventRecord>>;
}

/// Chain-level token metadata lookup.
#[async_trait]
pub trait TokenDirectory: Send + Sync {
    async fn token_info(&self, id: &TokenId) -> RpcResult<TokenInfo>;
}

/// Chain state the client needs beyond the contract itself.
#[async_trait]
pub trait ChainInfo: Send + Sync {
    /// Current snapshot height, recorded into new proposals.
    async fn snapshot_height(&self) -> RpcResult<u64>;
}

/// Base-unit balance of an address in a token as of a chain height.
#[async_trait]
pub trait BalanceSource: Send + Sync {
    async fn balance_at(
        &self,
        height: u64,
        token: &TokenId,
        address: &Address,
    ) -> RpcResult<u128>;
}

/// Balance source backed by the snapshot service. A key the service has
/// never indexed reads as zero.
pub struct SnapshotBalances {
    client: SnapshotClient,
}

impl SnapshotBalances {
    pub fn new(client: SnapshotClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl BalanceSource for SnapshotBalances {
    async fn balance_at(
        &self,
        height: u64,
        token: &TokenId,
        address: &Address,
    ) -> RpcResult<u128> {
        match self.client.balance_at(height, token, address).await {
            Ok(balance) => Ok(balance),
            Err(SnapshotError::NotFound(_)) => Ok(0),
            Err(err) => Err(RpcError::Transport(err.to_string())),
        }
    }
}

/// Balance source for hosts that already hold a live balance snapshot
/// keyed by token id (e.g. the connected wallet's balance map). Height
/// and address are ignored; the map is assumed to belong to the signer.
#[derive(Debug, Clone, Default)]
pub struct LiveBalances {
    balances: HashMap<TokenId, u128>,
}

impl LiveBalances {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, token: TokenId, base_units: u128) {
        self.balances.insert(token, base_units);
    }
}

impl From<HashMap<TokenId, u128>> for LiveBalances {
    fn from(balances: HashMap<TokenId, u128>) -> Self {
        Self { balances }
    }
}

#[async_trait]
impl BalanceSource for LiveBalances {
    async fn balance_at(
        &self,
        _height: u64,
        token: &TokenId,
        _address: &Address,
    ) -> RpcResult<u128> {
        Ok(self.balances.get(token).copied().unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_live_balances_defaults_to_zero() {
        let mut balances = LiveBalances::new();
        balances.insert(TokenId::new("tti_01"), 500);

        let held = balances
            .balance_at(0, &TokenId::new("tti_01"), &Address::new("agora_a"))
            .await
            .unwrap();
        assert_eq!(held, 500);

        let missing = balances
            .balance_at(0, &TokenId::new("tti_02"), &Address::new("agora_a"))
            .await
            .unwrap();
        assert_eq!(missing, 0);
    }
}
