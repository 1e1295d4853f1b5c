//! Agora Contract Schema
//!
//! Typed schema for the on-chain governance contract: method descriptors,
//! read-only queries, decoded output rows and event records.
//!
//! The underlying chain decodes contract call results positionally by the
//! declared output order of each method. Instead of a runtime ABI lookup
//! keyed by method-name strings, every method is a variant of a tagged
//! union carrying strongly-typed inputs, and every output tuple has a
//! typed row with its own `decode` function. A transport only needs to
//! map [`Value`] slots to and from the wire.
//!
//! # Example
//!
//! ```rust,ignore
//! use agora_contract::{GovernanceQuery, SpacesPage};
//!
//! let query = GovernanceQuery::GetSpaces { skip: 0, limit: 10 };
//! let values = transport.query(&descriptor, &query).await?;
//! let rows = SpacesPage::decode(&values)?;
//! ```

pub mod descriptor;
pub mod events;
pub mod methods;
pub mod outputs;
pub mod text;
pub mod value;

pub use descriptor::{native_token, ContractDescriptor, Network};
pub use events::{EventData, EventKind, EventRecord};
pub use methods::{GovernanceCall, GovernanceQuery};
pub use outputs::{
    decode_address, decode_address_list, decode_bool, decode_u64, decode_uint,
    ProposalDetailRow, ProposalSummaryPage, ProposalSummaryRow, SettingsRow, SpaceDetailRow,
    SpaceSummaryRow, SpacesPage, UserSpaceRow, UserSpacesPage, VoteRow, VotesPage,
};
pub use value::{AbiError, Address, TokenId, Value};
