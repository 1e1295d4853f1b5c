//! Method descriptors for the governance contract.
//!
//! State-changing methods and read-only queries are separate tagged
//! unions. Each variant carries the method's typed inputs; the contract
//! method name and the positional parameter list are derived from the
//! variant, so a caller can never pair a name with the wrong tuple.

use crate::value::{Address, TokenId, Value};
use serde::{Deserialize, Serialize};

/// A state-changing contract call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GovernanceCall {
    CreateSpace {
        name: [u8; 32],
        description: String,
        token: TokenId,
        avatar: [u8; 32],
        website: [u8; 32],
        token_decimals: u8,
    },
    UpdateSpace {
        space_id: u64,
        name: [u8; 32],
        description: String,
        token: TokenId,
        token_decimals: u8,
        avatar: [u8; 32],
        website: [u8; 32],
    },
    UpdateSpaceProposalThreshold {
        space_id: u64,
        threshold: u128,
        only_admins: bool,
    },
    SetSpaceAdmins {
        space_id: u64,
        admins: Vec<Address>,
    },
    CreateProposal {
        space_id: u64,
        title: String,
        description: String,
        start: u64,
        end: u64,
        snapshot: u64,
        choices: Vec<[u8; 32]>,
        executors: Vec<Address>,
        calldata: Vec<[u8; 32]>,
    },
    /// Multi-choice weighted vote: one base-unit amount per choice.
    VoteOnProposal {
        space_id: u64,
        proposal_id: u64,
        amounts: Vec<u128>,
    },
    JoinSpace {
        space_id: u64,
    },
    LeaveSpace {
        space_id: u64,
    },
    ExecuteProposal {
        space_id: u64,
        proposal_id: u64,
    },
    RedeemSpaceCreationFee {
        space_id: u64,
    },
}

impl GovernanceCall {
    /// The contract method this call targets.
    pub fn method_name(&self) -> &'static str {
        match self {
            GovernanceCall::CreateSpace { .. } => "createSpace",
            GovernanceCall::UpdateSpace { .. } => "updateSpace",
            GovernanceCall::UpdateSpaceProposalThreshold { .. } => {
                "updateSpaceCreateProposalThreshold"
            }
            GovernanceCall::SetSpaceAdmins { .. } => "setSpaceAdmins",
            GovernanceCall::CreateProposal { .. } => "createProposal",
            GovernanceCall::VoteOnProposal { .. } => "voteOnProposal",
            GovernanceCall::JoinSpace { .. } => "joinSpace",
            GovernanceCall::LeaveSpace { .. } => "leaveSpace",
            GovernanceCall::ExecuteProposal { .. } => "executeProposal",
            GovernanceCall::RedeemSpaceCreationFee { .. } => "redeemSpaceCreationFee",
        }
    }

    /// Positional parameters in the contract's declared input order.
    pub fn params(&self) -> Vec<Value> {
        match self {
            GovernanceCall::CreateSpace {
                name,
                description,
                token,
                avatar,
                website,
                token_decimals,
            } => vec![
                Value::Bytes32(*name),
                Value::Str(description.clone()),
                Value::TokenId(token.clone()),
                Value::Bytes32(*avatar),
                Value::Bytes32(*website),
                Value::Uint(u128::from(*token_decimals)),
            ],
            GovernanceCall::UpdateSpace {
                space_id,
                name,
                description,
                token,
                token_decimals,
                avatar,
                website,
            } => vec![
                Value::Uint(u128::from(*space_id)),
                Value::Bytes32(*name),
                Value::Str(description.clone()),
                Value::TokenId(token.clone()),
                Value::Uint(u128::from(*token_decimals)),
                Value::Bytes32(*avatar),
                Value::Bytes32(*website),
            ],
            GovernanceCall::UpdateSpaceProposalThreshold {
                space_id,
                threshold,
                only_admins,
            } => vec![
                Value::Uint(u128::from(*space_id)),
                Value::Uint(*threshold),
                Value::Bool(*only_admins),
            ],
            GovernanceCall::SetSpaceAdmins { space_id, admins } => vec![
                Value::Uint(u128::from(*space_id)),
                Value::AddressList(admins.clone()),
            ],
            GovernanceCall::CreateProposal {
                space_id,
                title,
                description,
                start,
                end,
                snapshot,
                choices,
                executors,
                calldata,
            } => vec![
                Value::Uint(u128::from(*space_id)),
                Value::Str(title.clone()),
                Value::Str(description.clone()),
                Value::Uint(u128::from(*start)),
                Value::Uint(u128::from(*end)),
                Value::Uint(u128::from(*snapshot)),
                Value::Bytes32List(choices.clone()),
                Value::AddressList(executors.clone()),
                Value::Bytes32List(calldata.clone()),
            ],
            GovernanceCall::VoteOnProposal {
                space_id,
                proposal_id,
                amounts,
            } => vec![
                Value::Uint(u128::from(*space_id)),
                Value::Uint(u128::from(*proposal_id)),
                Value::UintList(amounts.clone()),
            ],
            GovernanceCall::JoinSpace { space_id }
            | GovernanceCall::LeaveSpace { space_id }
            | GovernanceCall::RedeemSpaceCreationFee { space_id } => {
                vec![Value::Uint(u128::from(*space_id))]
            }
            GovernanceCall::ExecuteProposal {
                space_id,
                proposal_id,
            } => vec![
                Value::Uint(u128::from(*space_id)),
                Value::Uint(u128::from(*proposal_id)),
            ],
        }
    }
}

/// A read-only contract query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GovernanceQuery {
    GetSpaces { skip: u32, limit: u32 },
    GetSpacesCount,
    GetUserSpaces { user: Address },
    GetSpace { id: u64 },
    GetSpaceOwner { id: u64 },
    GetSpaceAdmins { id: u64 },
    GetSpaceSettings { id: u64 },
    GetProposals { space: u64, skip: u32, limit: u32 },
    GetProposalsCount { space: u64 },
    GetProposal { space: u64, proposal: u64 },
    GetVotes { space: u64, proposal: u64, skip: u32, limit: u32 },
    GetVotesCount { space: u64, proposal: u64 },
    HasVoted { space: u64, proposal: u64, voter: Address },
    IsSpaceAdmin { space: u64, user: Address },
    IsSpaceMember { space: u64, user: Address },
    IsProposalExecuted { space: u64, proposal: u64 },
    CanRedeemSpaceCreationFee { space: u64 },
    WinningChoice { space: u64, proposal: u64 },
    SpaceCreationFee,
}

impl GovernanceQuery {
    /// The contract view method this query targets.
    pub fn method_name(&self) -> &'static str {
        match self {
            GovernanceQuery::GetSpaces { .. } => "getSpaces",
            GovernanceQuery::GetSpacesCount => "getSpacesCount",
            GovernanceQuery::GetUserSpaces { .. } => "getUserSpaces",
            GovernanceQuery::GetSpace { .. } => "getSpaceExternal",
            GovernanceQuery::GetSpaceOwner { .. } => "getSpaceOwner",
            GovernanceQuery::GetSpaceAdmins { .. } => "getSpaceAdmins",
            GovernanceQuery::GetSpaceSettings { .. } => "getSpaceSettings",
            GovernanceQuery::GetProposals { .. } => "getSpaceProposals",
            GovernanceQuery::GetProposalsCount { .. } => "getSpaceProposalsCount",
            GovernanceQuery::GetProposal { .. } => "getSpaceProposal",
            GovernanceQuery::GetVotes { .. } => "getSpaceProposalVotes",
            GovernanceQuery::GetVotesCount { .. } => "getSpaceProposalVotesCount",
            GovernanceQuery::HasVoted { .. } => "hasVoted",
            GovernanceQuery::IsSpaceAdmin { .. } => "isSpaceAdmin",
            GovernanceQuery::IsSpaceMember { .. } => "isSpaceMember",
            GovernanceQuery::IsProposalExecuted { .. } => "isProposalExecuted",
            GovernanceQuery::CanRedeemSpaceCreationFee { .. } => "canRedeemSpaceCreationFee",
            GovernanceQuery::WinningChoice { .. } => "getWinningChoiceIndex",
            GovernanceQuery::SpaceCreationFee => "SPACE_CREATION_FEE",
        }
    }

    /// Positional parameters in the contract's declared input order.
    pub fn params(&self) -> Vec<Value> {
        match self {
            GovernanceQuery::GetSpaces { skip, limit } => vec![
                Value::Uint(u128::from(*skip)),
                Value::Uint(u128::from(*limit)),
            ],
            GovernanceQuery::GetSpacesCount | GovernanceQuery::SpaceCreationFee => Vec::new(),
            GovernanceQuery::GetUserSpaces { user } => vec![Value::Address(user.clone())],
            GovernanceQuery::GetSpace { id }
            | GovernanceQuery::GetSpaceOwner { id }
            | GovernanceQuery::GetSpaceAdmins { id }
            | GovernanceQuery::GetSpaceSettings { id } => vec![Value::Uint(u128::from(*id))],
            GovernanceQuery::GetProposals { space, skip, limit } => vec![
                Value::Uint(u128::from(*space)),
                Value::Uint(u128::from(*skip)),
                Value::Uint(u128::from(*limit)),
            ],
            GovernanceQuery::GetProposalsCount { space }
            | GovernanceQuery::CanRedeemSpaceCreationFee { space } => {
                vec![Value::Uint(u128::from(*space))]
            }
            GovernanceQuery::GetProposal { space, proposal }
            | GovernanceQuery::GetVotesCount { space, proposal }
            | GovernanceQuery::IsProposalExecuted { space, proposal }
            | GovernanceQuery::WinningChoice { space, proposal } => vec![
                Value::Uint(u128::from(*space)),
                Value::Uint(u128::from(*proposal)),
            ],
            GovernanceQuery::GetVotes {
                space,
                proposal,
                skip,
                limit,
            } => vec![
                Value::Uint(u128::from(*space)),
                Value::Uint(u128::from(*proposal)),
                Value::Uint(u128::from(*skip)),
                Value::Uint(u128::from(*limit)),
            ],
            GovernanceQuery::HasVoted {
                space,
                proposal,
                voter,
            } => vec![
                Value::Uint(u128::from(*space)),
                Value::Uint(u128::from(*proposal)),
                Value::Address(voter.clone()),
            ],
            GovernanceQuery::IsSpaceAdmin { space, user }
            | GovernanceQuery::IsSpaceMember { space, user } => vec![
                Value::Uint(u128::from(*space)),
                Value::Address(user.clone()),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text;

    #[test]
    fn test_create_space_param_order() {
        let call = GovernanceCall::CreateSpace {
            name: text::encode("orchard").unwrap(),
            description: "community orchard fund".into(),
            token: TokenId::new("tti_00aa"),
            avatar: text::encode("ipfs://av").unwrap(),
            website: text::encode("orchard.example").unwrap(),
            token_decimals: 18,
        };
        assert_eq!(call.method_name(), "createSpace");
        let params = call.params();
        assert_eq!(params.len(), 6);
        assert_eq!(params[1], Value::Str("community orchard fund".into()));
        assert_eq!(params[5], Value::Uint(18));
    }

    #[test]
    fn test_update_space_places_decimals_before_avatar() {
        let call = GovernanceCall::UpdateSpace {
            space_id: 3,
            name: text::encode("orchard").unwrap(),
            description: String::new(),
            token: TokenId::new("tti_00aa"),
            token_decimals: 8,
            avatar: [0u8; 32],
            website: [0u8; 32],
        };
        let params = call.params();
        assert_eq!(params[4], Value::Uint(8));
        assert!(matches!(params[5], Value::Bytes32(_)));
    }

    #[test]
    fn test_query_names() {
        let query = GovernanceQuery::GetProposal {
            space: 1,
            proposal: 2,
        };
        assert_eq!(query.method_name(), "getSpaceProposal");
        assert_eq!(query.params(), vec![Value::Uint(1), Value::Uint(2)]);
        assert_eq!(
            GovernanceQuery::SpaceCreationFee.method_name(),
            "SPACE_CREATION_FEE"
        );
        assert!(GovernanceQuery::SpaceCreationFee.params().is_empty());
    }
}
