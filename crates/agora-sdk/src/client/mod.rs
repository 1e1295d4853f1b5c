//! The governance client.
//!
//! One instance per session. Reads prefer the in-memory cache and fall
//! back to contract queries; writes run submit → confirm → event scan →
//! read-back so the caller always receives contract-authoritative state,
//! never an optimistic guess.
//!
//! Everything network-shaped is injected (see [`crate::rpc`]); the client
//! owns only the cache and the sequencing.

mod reads;
mod writes;

use agora_contract::{Address, ContractDescriptor, GovernanceCall, GovernanceQuery, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use crate::cache::GovernanceCache;
use crate::error::{ClientError, Result};
use crate::rpc::{BalanceSource, CallHandle, ChainInfo, ContractRpc, Funding, TokenDirectory};

/// Bounded confirmation polling for submitted calls.
#[derive(Debug, Clone, Copy)]
pub struct ConfirmPolicy {
    /// How many times to ask for a receipt before giving up.
    pub attempts: u32,
    /// Pause between receipt polls.
    pub interval: Duration,
}

impl Default for ConfirmPolicy {
    fn default() -> Self {
        Self {
            attempts: 60,
            interval: Duration::from_secs(1),
        }
    }
}

/// A call that has been submitted and confirmed on-chain.
#[derive(Debug, Clone)]
pub(crate) struct ConfirmedCall {
    pub tx_hash: String,
    pub height: u64,
}

/// Client for the Agora governance contract.
pub struct GovernanceClient {
    contract: ContractDescriptor,
    rpc: Arc<dyn ContractRpc>,
    tokens: Arc<dyn TokenDirectory>,
    chain: Arc<dyn ChainInfo>,
    balances: Option<Arc<dyn BalanceSource>>,
    address: Option<Address>,
    confirm: ConfirmPolicy,
    cache: Mutex<GovernanceCache>,
}

impl GovernanceClient {
    pub fn new(
        contract: ContractDescriptor,
        rpc: Arc<dyn ContractRpc>,
        tokens: Arc<dyn TokenDirectory>,
        chain: Arc<dyn ChainInfo>,
    ) -> Self {
        Self {
            contract,
            rpc,
            tokens,
            chain,
            balances: None,
            address: None,
            confirm: ConfirmPolicy::default(),
            cache: Mutex::new(GovernanceCache::new()),
        }
    }

    /// Attach the signer address write operations act as.
    pub fn with_address(mut self, address: Address) -> Self {
        self.address = Some(address);
        self
    }

    /// Attach a balance source for voting-power evaluation.
    pub fn with_balance_source(mut self, balances: Arc<dyn BalanceSource>) -> Self {
        self.balances = Some(balances);
        self
    }

    pub fn with_confirm_policy(mut self, confirm: ConfirmPolicy) -> Self {
        self.confirm = confirm;
        self
    }

    /// The configured signer address, if any.
    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    pub(crate) fn require_address(&self) -> Result<&Address> {
        self.address.as_ref().ok_or(ClientError::NoSigner)
    }

    pub(crate) async fn run_query(&self, query: GovernanceQuery) -> Result<Vec<Value>> {
        Ok(self.rpc.query(&self.contract, &query).await?)
    }

    /// Submit a call and wait for its receipt within the confirm budget.
    pub(crate) async fn call_confirmed(
        &self,
        call: GovernanceCall,
        funding: Option<Funding>,
    ) -> Result<ConfirmedCall> {
        let handle = self
            .rpc
            .submit(&self.contract, &call, funding.as_ref())
            .await?;
        let receipt = self.await_receipt(&handle).await?;
        Ok(ConfirmedCall {
            tx_hash: handle.tx_hash,
            height: receipt.height,
        })
    }

    async fn await_receipt(&self, handle: &CallHandle) -> Result<crate::rpc::CallReceipt> {
        for attempt in 0..self.confirm.attempts {
            if let Some(receipt) = self.rpc.receipt(&self.contract, handle).await? {
                return Ok(receipt);
            }
            tracing::debug!(
                tx_hash = %handle.tx_hash,
                attempt,
                "call not yet received, polling again"
            );
            tokio::time::sleep(self.confirm.interval).await;
        }
        Err(ClientError::ConfirmationTimeout {
            attempts: self.confirm.attempts,
        })
    }
}
