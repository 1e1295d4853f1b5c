//! Decoded contract event records.
//!
//! Entity-creating calls discover the id the contract assigned by scanning
//! the event log from the confirmed call's height. Each record carries the
//! emitting block height and, when the transport surfaces it, the hash of
//! the account block that produced the log, so a caller can correlate an
//! event with its own call instead of guessing by position.

use crate::value::{Address, TokenId};
use serde::{Deserialize, Serialize};

/// Event names declared by the governance contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    SpaceCreated,
    SpaceUpdated,
    ProposalCreated,
    ProposalExecuted,
    JoinedSpace,
    LeftSpace,
}

impl EventKind {
    /// The event name as declared in the contract.
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::SpaceCreated => "SpaceCreated",
            EventKind::SpaceUpdated => "SpaceUpdated",
            EventKind::ProposalCreated => "ProposalCreated",
            EventKind::ProposalExecuted => "ProposalExecuted",
            EventKind::JoinedSpace => "JoinedSpace",
            EventKind::LeftSpace => "LeftSpace",
        }
    }
}

/// Decoded fields of one emitted event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventData {
    SpaceCreated {
        id: u64,
        token: TokenId,
        name: [u8; 32],
        avatar: [u8; 32],
        description: String,
    },
    SpaceUpdated {
        id: u64,
    },
    ProposalCreated {
        id: u64,
        space_id: u64,
        author: Address,
        title: String,
        start: u64,
        end: u64,
    },
    ProposalExecuted {
        proposal_id: u64,
        space_id: u64,
        choice: u64,
    },
    JoinedSpace {
        space_id: u64,
        user: Address,
    },
    LeftSpace {
        space_id: u64,
        user: Address,
    },
}

impl EventData {
    pub fn kind(&self) -> EventKind {
        match self {
            EventData::SpaceCreated { .. } => EventKind::SpaceCreated,
            EventData::SpaceUpdated { .. } => EventKind::SpaceUpdated,
            EventData::ProposalCreated { .. } => EventKind::ProposalCreated,
            EventData::ProposalExecuted { .. } => EventKind::ProposalExecuted,
            EventData::JoinedSpace { .. } => EventKind::JoinedSpace,
            EventData::LeftSpace { .. } => EventKind::LeftSpace,
        }
    }
}

/// One decoded log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Height of the block that emitted the event.
    pub height: u64,
    /// Hash of the emitting account block, when the transport decodes it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<String>,
    pub data: EventData,
}

impl EventRecord {
    pub fn kind(&self) -> EventKind {
        self.data.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_follows_data() {
        let record = EventRecord {
            height: 99,
            tx_hash: None,
            data: EventData::SpaceCreated {
                id: 3,
                token: TokenId::new("tti_01"),
                name: [0u8; 32],
                avatar: [0u8; 32],
                description: String::new(),
            },
        };
        assert_eq!(record.kind(), EventKind::SpaceCreated);
        assert_eq!(record.kind().name(), "SpaceCreated");
    }
}
