//! ABI ground values exchanged with the governance contract.
//!
//! A transport decodes every output slot of a contract call into one of
//! these ground types, in declared output order. Typed accessors turn a
//! slot into a Rust value or a precise [`AbiError`].

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result type for schema-level decoding.
pub type Result<T> = std::result::Result<T, AbiError>;

/// Decoding error for contract values and output rows.
#[derive(Debug, Error)]
pub enum AbiError {
    /// A slot held a different ground type than the output declares.
    #[error("type mismatch: expected {expected}, got {got}")]
    TypeMismatch {
        expected: &'static str,
        got: &'static str,
    },

    /// An output tuple had fewer slots than the method declares.
    #[error("output arity mismatch: expected {expected} values, got {got}")]
    Arity { expected: usize, got: usize },

    /// Parallel output columns disagree on length.
    #[error("ragged output columns: expected {expected} rows, got {got}")]
    RaggedColumns { expected: usize, got: usize },

    /// Text does not fit the 32-byte fixed-width encoding.
    #[error("fixed-width text over 32 bytes ({0} bytes)")]
    TextTooLong(usize),

    /// A numeric value does not fit the target integer width.
    #[error("numeric value out of range: {0}")]
    NumberOutOfRange(String),
}

/// An account address on the host chain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Address {
    fn from(raw: &str) -> Self {
        Self(raw.to_owned())
    }
}

/// A token identifier on the host chain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenId(String);

impl TokenId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TokenId {
    fn from(raw: &str) -> Self {
        Self(raw.to_owned())
    }
}

/// One decoded slot of a contract call's inputs or outputs.
///
/// `uint256` slots are carried as `u128`: every quantity this client
/// handles (ids, timestamps, counts, 18-decimal token amounts) fits with
/// exact integer arithmetic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Uint(u128),
    Bool(bool),
    Address(Address),
    TokenId(TokenId),
    Bytes32([u8; 32]),
    Str(String),
    UintList(Vec<u128>),
    AddressList(Vec<Address>),
    TokenIdList(Vec<TokenId>),
    Bytes32List(Vec<[u8; 32]>),
    StrList(Vec<String>),
    UintMatrix(Vec<Vec<u128>>),
}

impl Value {
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Value::Uint(_) => "uint",
            Value::Bool(_) => "bool",
            Value::Address(_) => "address",
            Value::TokenId(_) => "tokenId",
            Value::Bytes32(_) => "bytes32",
            Value::Str(_) => "string",
            Value::UintList(_) => "uint[]",
            Value::AddressList(_) => "address[]",
            Value::TokenIdList(_) => "tokenId[]",
            Value::Bytes32List(_) => "bytes32[]",
            Value::StrList(_) => "string[]",
            Value::UintMatrix(_) => "uint[][]",
        }
    }

    fn mismatch(&self, expected: &'static str) -> AbiError {
        AbiError::TypeMismatch {
            expected,
            got: self.kind(),
        }
    }

    pub fn as_uint(&self) -> Result<u128> {
        match self {
            Value::Uint(v) => Ok(*v),
            other => Err(other.mismatch("uint")),
        }
    }

    /// Narrow a `uint` slot to `u64` (indices, timestamps, counts).
    pub fn as_u64(&self) -> Result<u64> {
        let wide = self.as_uint()?;
        u64::try_from(wide).map_err(|_| AbiError::NumberOutOfRange(wide.to_string()))
    }

    /// Narrow a `uint` slot to `u8` (token decimals).
    pub fn as_u8(&self) -> Result<u8> {
        let wide = self.as_uint()?;
        u8::try_from(wide).map_err(|_| AbiError::NumberOutOfRange(wide.to_string()))
    }

    pub fn as_bool(&self) -> Result<bool> {
        match self {
            Value::Bool(v) => Ok(*v),
            other => Err(other.mismatch("bool")),
        }
    }

    pub fn as_address(&self) -> Result<&Address> {
        match self {
            Value::Address(v) => Ok(v),
            other => Err(other.mismatch("address")),
        }
    }

    pub fn as_token_id(&self) -> Result<&TokenId> {
        match self {
            Value::TokenId(v) => Ok(v),
            other => Err(other.mismatch("tokenId")),
        }
    }

    pub fn as_bytes32(&self) -> Result<&[u8; 32]> {
        match self {
            Value::Bytes32(v) => Ok(v),
            other => Err(other.mismatch("bytes32")),
        }
    }

    pub fn as_str(&self) -> Result<&str> {
        match self {
            Value::Str(v) => Ok(v),
            other => Err(other.mismatch("string")),
        }
    }

    pub fn as_uint_list(&self) -> Result<&[u128]> {
        match self {
            Value::UintList(v) => Ok(v),
            other => Err(other.mismatch("uint[]")),
        }
    }

    pub fn as_address_list(&self) -> Result<&[Address]> {
        match self {
            Value::AddressList(v) => Ok(v),
            other => Err(other.mismatch("address[]")),
        }
    }

    pub fn as_token_id_list(&self) -> Result<&[TokenId]> {
        match self {
            Value::TokenIdList(v) => Ok(v),
            other => Err(other.mismatch("tokenId[]")),
        }
    }

    pub fn as_bytes32_list(&self) -> Result<&[[u8; 32]]> {
        match self {
            Value::Bytes32List(v) => Ok(v),
            other => Err(other.mismatch("bytes32[]")),
        }
    }

    pub fn as_str_list(&self) -> Result<&[String]> {
        match self {
            Value::StrList(v) => Ok(v),
            other => Err(other.mismatch("string[]")),
        }
    }

    pub fn as_uint_matrix(&self) -> Result<&[Vec<u128>]> {
        match self {
            Value::UintMatrix(v) => Ok(v),
            other => Err(other.mismatch("uint[][]")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessor_type_mismatch() {
        let value = Value::Str("hello".into());
        let err = value.as_uint().unwrap_err();
        match err {
            AbiError::TypeMismatch { expected, got } => {
                assert_eq!(expected, "uint");
                assert_eq!(got, "string");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_u64_narrowing_rejects_wide_values() {
        let value = Value::Uint(u128::from(u64::MAX) + 1);
        assert!(value.as_u64().is_err());
        assert_eq!(Value::Uint(42).as_u64().unwrap(), 42);
    }
}
