//! Domain DTOs hydrated from contract query results.
//!
//! None of these carry identity beyond their on-chain counterpart. Fields
//! the contract only returns from secondary queries (`description`,
//! `owner`, `admins`, proposal `choices` and friends) are `Option`s:
//! `None` means "not fetched yet", and cache merges never let a `None`
//! overwrite a known value.

use agora_contract::{Address, TokenId};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Current wall-clock time as unix seconds.
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// Token metadata, assembled from up to two sources: the token directory
/// (name, symbol, decimals) and space rows (decimals only).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub id: TokenId,
    pub name: String,
    pub symbol: String,
    pub decimals: Option<u8>,
}

impl Token {
    /// Placeholder for a token only known by id.
    pub fn unknown(id: TokenId) -> Self {
        Self {
            id,
            name: String::new(),
            symbol: String::new(),
            decimals: None,
        }
    }
}

/// A DAO organization unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Space {
    pub id: u64,
    pub name: String,
    pub avatar: String,
    pub website: String,
    /// Free text, only returned by the detail query.
    pub description: Option<String>,
    pub member_count: u64,
    pub token: Token,
    pub is_private: bool,
    pub owner: Option<Address>,
    /// Loaded on demand via the admin listing query.
    pub admins: Option<Vec<Address>>,
    /// The contract exposes no member listing, only counts and per-address
    /// membership checks; this stays empty.
    pub members: Vec<Address>,
}

/// Per-space proposal rules. Cached per space id, invalidated on update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceSettings {
    /// Human-scale token amount required to create a proposal.
    pub create_proposal_threshold: u128,
    pub only_admins_can_create_proposal: bool,
}

/// The on-chain action bound to one proposal choice, executed if the
/// choice wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceAction {
    pub executor: Address,
    pub calldata: [u8; 32],
}

/// Lifecycle phase of a proposal, derived from its window and the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProposalState {
    Pending,
    Active,
    Closed,
}

impl ProposalState {
    /// State of a `[start, end)` window at `now`. Boundary-exact: a
    /// proposal is active the second it starts and closed the second it
    /// ends.
    pub fn at(start: u64, end: u64, now: u64) -> Self {
        if now < start {
            ProposalState::Pending
        } else if now < end {
            ProposalState::Active
        } else {
            ProposalState::Closed
        }
    }
}

/// A time-boxed decision with weighted choices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proposal {
    /// Scoped to the space, not globally unique.
    pub id: u64,
    pub space_id: u64,
    pub title: String,
    pub description: String,
    /// Unix seconds.
    pub start: u64,
    pub end: u64,
    /// Only returned by the detail query.
    pub author: Option<Address>,
    /// Chain height whose balances determine voting power.
    pub snapshot: Option<u64>,
    /// Decoded choice labels; `None` until the detail query runs.
    pub choices: Option<Vec<String>>,
    /// One action per choice, aligned with `choices`.
    pub pass_actions: Option<Vec<ChoiceAction>>,
    /// Per-choice base-unit vote totals; refreshed on re-fetch.
    pub tallies: Option<Vec<u128>>,
}

impl Proposal {
    /// Whether the detail query has populated the lazily-loaded fields.
    pub fn is_detailed(&self) -> bool {
        self.choices.is_some()
    }

    /// State at an explicit time. Never stored: always recomputed so the
    /// cached entity cannot drift.
    pub fn state_at(&self, now: u64) -> ProposalState {
        ProposalState::at(self.start, self.end, now)
    }

    /// State at the current wall-clock time.
    pub fn state(&self) -> ProposalState {
        self.state_at(unix_now())
    }
}

/// One cast vote: base-unit amounts spread over the proposal's choices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vote {
    /// Position within the proposal's vote list.
    pub id: u64,
    pub space: u64,
    pub proposal: u64,
    pub author: Address,
    pub choices: Vec<u128>,
}

impl Vote {
    /// Total base-unit amount across all choices.
    pub fn amount(&self) -> u128 {
        self.choices
            .iter()
            .copied()
            .fold(0u128, u128::saturating_add)
    }
}

/// Offset pagination for list operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub skip: u32,
    pub limit: u32,
}

impl PageRequest {
    pub fn new(skip: u32, limit: u32) -> Self {
        Self { skip, limit }
    }

    /// Exclusive end of the requested window.
    pub fn end(&self) -> u64 {
        u64::from(self.skip) + u64::from(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { skip: 0, limit: 10 }
    }
}

/// Token directory lookup result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenInfo {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// Profile fields shared by space creation and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceProfile {
    pub name: String,
    pub description: String,
    pub token: TokenId,
    pub avatar: String,
    pub website: String,
}

/// Input for proposal creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateProposalInput {
    pub space_id: u64,
    pub title: String,
    pub description: String,
    /// Choice labels; each must fit the 32-byte fixed-width encoding.
    pub choices: Vec<String>,
    /// One action per choice, aligned with `choices`.
    pub actions: Vec<ChoiceAction>,
    pub start: u64,
    pub end: u64,
}
