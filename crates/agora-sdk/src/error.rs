//! Error types for the Agora SDK

use agora_contract::{AbiError, EventKind};
use agora_snapshot_client::SnapshotError;
use thiserror::Error;

use crate::rpc::RpcError;

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// SDK error types
#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport or contract-level failure from the injected RPC
    #[error("contract rpc error: {0}")]
    Rpc(#[from] RpcError),

    /// A query output did not decode against the declared schema
    #[error("abi decode error: {0}")]
    Abi(#[from] AbiError),

    /// The snapshot balance service failed
    #[error("snapshot service error: {0}")]
    Snapshot(#[from] SnapshotError),

    /// Entity does not exist on-chain
    #[error("not found: {0}")]
    NotFound(String),

    /// Operation needs a configured signer address
    #[error("no signer address configured")]
    NoSigner,

    /// Caller-supplied input failed a precondition check
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A submitted call was never confirmed within the retry budget
    #[error("call not confirmed after {attempts} attempts")]
    ConfirmationTimeout { attempts: u32 },

    /// No matching event was emitted at or after the confirmed height
    #[error("no {kind:?} event found at or after height {from_height}")]
    MissingEvent { kind: EventKind, from_height: u64 },

    /// Token-amount arithmetic left the 128-bit range
    #[error("token amount overflows 128-bit range")]
    AmountOverflow,
}
