//! Write path: submit → confirm → event scan → read-back.
//!
//! Every operation resolves its prerequisite lookups first, submits
//! exactly one contract call, and only touches the cache through the
//! final read-back — a failure anywhere aborts the whole operation with
//! nothing partially cached.

use agora_contract::{
    native_token, text, Address, EventData, EventKind, GovernanceCall,
};

use super::{ConfirmedCall, GovernanceClient};
use crate::error::{ClientError, Result};
use crate::power::{proposal_deposit, scale_to_base_units};
use crate::rpc::{ChainInfo, ContractRpc, Funding, TokenDirectory};
use crate::types::{CreateProposalInput, Proposal, Space, SpaceProfile, SpaceSettings, Token};

impl GovernanceClient {
    // ==================== Spaces ====================

    /// Create a space and return its contract-authoritative state. The
    /// creation fee is paid in the native token; the assigned id comes
    /// from the `SpaceCreated` event emitted by the confirmed call.
    pub async fn create_space(&self, profile: SpaceProfile) -> Result<Space> {
        self.require_address()?;
        let info = self.tokens.token_info(&profile.token).await?;
        self.cache.lock().await.upsert_token(Token {
            id: profile.token.clone(),
            name: info.name,
            symbol: info.symbol,
            decimals: Some(info.decimals),
        });
        let fee = self.space_creation_fee().await?;

        let call = GovernanceCall::CreateSpace {
            name: text::encode(&profile.name)?,
            description: profile.description,
            token: profile.token,
            avatar: text::encode(&profile.avatar)?,
            website: text::encode(&profile.website)?,
            token_decimals: info.decimals,
        };
        let funding = Funding::new(native_token(), fee.to_string());
        let confirmed = self.call_confirmed(call, Some(funding)).await?;

        let id = self.assigned_id(&confirmed, EventKind::SpaceCreated).await?;
        self.refresh_space(id).await
    }

    /// Update a space's profile and return the refreshed entity.
    pub async fn update_space(&self, space_id: u64, profile: SpaceProfile) -> Result<Space> {
        self.require_address()?;
        let info = self.tokens.token_info(&profile.token).await?;

        let call = GovernanceCall::UpdateSpace {
            space_id,
            name: text::encode(&profile.name)?,
            description: profile.description,
            token: profile.token,
            token_decimals: info.decimals,
            avatar: text::encode(&profile.avatar)?,
            website: text::encode(&profile.website)?,
        };
        self.call_confirmed(call, None).await?;
        self.refresh_space(space_id).await
    }

    /// Update proposal-creation rules; the cached settings are dropped
    /// before the forced re-read.
    pub async fn update_space_proposal_threshold(
        &self,
        space_id: u64,
        threshold: u128,
        only_admins: bool,
    ) -> Result<SpaceSettings> {
        self.require_address()?;
        let call = GovernanceCall::UpdateSpaceProposalThreshold {
            space_id,
            threshold,
            only_admins,
        };
        self.call_confirmed(call, None).await?;
        self.cache.lock().await.invalidate_settings(space_id);
        self.refresh_space_settings(space_id).await
    }

    /// Replace the admin set and return the refreshed list.
    pub async fn update_space_admins(
        &self,
        space_id: u64,
        admins: Vec<Address>,
    ) -> Result<Vec<Address>> {
        self.require_address()?;
        let call = GovernanceCall::SetSpaceAdmins { space_id, admins };
        self.call_confirmed(call, None).await?;
        self.load_space_admins(space_id).await
    }

    pub async fn join_space(&self, space_id: u64) -> Result<()> {
        self.require_address()?;
        self.call_confirmed(GovernanceCall::JoinSpace { space_id }, None)
            .await?;
        Ok(())
    }

    pub async fn leave_space(&self, space_id: u64) -> Result<()> {
        self.require_address()?;
        self.call_confirmed(GovernanceCall::LeaveSpace { space_id }, None)
            .await?;
        Ok(())
    }

    /// Reclaim the creation fee once the contract allows it.
    pub async fn redeem_space_creation_fee(&self, space_id: u64) -> Result<()> {
        self.require_address()?;
        self.call_confirmed(GovernanceCall::RedeemSpaceCreationFee { space_id }, None)
            .await?;
        Ok(())
    }

    // ==================== Proposals ====================

    /// Create a proposal and return its contract-authoritative state.
    ///
    /// Resolution order matters: the space (token decimals), its settings
    /// (threshold), the caller's admin status and the current snapshot
    /// height are all read before the call is built, because they decide
    /// the deposit and the snapshot the contract will store.
    pub async fn create_proposal(&self, input: CreateProposalInput) -> Result<Proposal> {
        self.require_address()?;
        if input.choices.is_empty() {
            return Err(ClientError::InvalidInput("a proposal needs choices".into()));
        }
        if input.actions.len() != input.choices.len() {
            return Err(ClientError::InvalidInput(format!(
                "{} actions for {} choices",
                input.actions.len(),
                input.choices.len()
            )));
        }
        if input.end <= input.start {
            return Err(ClientError::InvalidInput(
                "voting window must end after it starts".into(),
            ));
        }

        let space = self.space(input.space_id).await?;
        let settings = self.space_settings(input.space_id).await?;
        let is_admin = self.is_space_admin(input.space_id).await?;
        let snapshot = self.chain.snapshot_height().await?;

        let decimals = space.token.decimals.unwrap_or(0);
        let deposit = proposal_deposit(is_admin, settings.create_proposal_threshold, decimals)?;

        let choices = input
            .choices
            .iter()
            .map(|choice| text::encode(choice))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let call = GovernanceCall::CreateProposal {
            space_id: input.space_id,
            title: input.title,
            description: input.description,
            start: input.start,
            end: input.end,
            snapshot,
            choices,
            executors: input.actions.iter().map(|a| a.executor.clone()).collect(),
            calldata: input.actions.iter().map(|a| a.calldata).collect(),
        };
        let funding = Funding::new(space.token.id.clone(), deposit);
        let confirmed = self.call_confirmed(call, Some(funding)).await?;

        let id = self
            .assigned_id(&confirmed, EventKind::ProposalCreated)
            .await?;
        self.refresh_proposal(input.space_id, id).await
    }

    /// Cast a multi-choice weighted vote. `amounts` are human-scale token
    /// amounts, one per choice; the transfer funding the vote is their
    /// base-unit sum.
    pub async fn vote(&self, space_id: u64, proposal_id: u64, amounts: &[u128]) -> Result<()> {
        self.require_address()?;
        let space = self.space(space_id).await?;
        let decimals = space.token.decimals.unwrap_or(0);

        let base_units = amounts
            .iter()
            .map(|amount| scale_to_base_units(*amount, decimals))
            .collect::<Result<Vec<_>>>()?;
        let total = base_units
            .iter()
            .try_fold(0u128, |acc, v| acc.checked_add(*v))
            .ok_or(ClientError::AmountOverflow)?;

        let call = GovernanceCall::VoteOnProposal {
            space_id,
            proposal_id,
            amounts: base_units,
        };
        let funding = Funding::new(space.token.id.clone(), total.to_string());
        self.call_confirmed(call, Some(funding)).await?;
        Ok(())
    }

    /// Execute the winning choice's bound action.
    pub async fn execute_proposal(&self, space_id: u64, proposal_id: u64) -> Result<()> {
        self.require_address()?;
        let call = GovernanceCall::ExecuteProposal {
            space_id,
            proposal_id,
        };
        self.call_confirmed(call, None).await?;
        Ok(())
    }

    // ==================== Id extraction ====================

    /// Id the contract assigned to an entity created by `confirmed`.
    ///
    /// Scans the event log from the confirmed height. When the transport
    /// attributes tx hashes to log records, the record emitted by our own
    /// call wins; otherwise the last matching record is taken, which holds
    /// up unless a concurrent creation lands at the same height after
    /// ours.
    async fn assigned_id(&self, confirmed: &ConfirmedCall, kind: EventKind) -> Result<u64> {
        let records = self
            .rpc
            .scan_events(&self.contract, confirmed.height, kind)
            .await?;

        let own = records
            .iter()
            .rev()
            .find(|r| r.kind() == kind && r.tx_hash.as_deref() == Some(confirmed.tx_hash.as_str()));
        let record = own
            .or_else(|| records.iter().rev().find(|r| r.kind() == kind))
            .ok_or(ClientError::MissingEvent {
                kind,
                from_height: confirmed.height,
            })?;

        match &record.data {
            EventData::SpaceCreated { id, .. } => Ok(*id),
            EventData::ProposalCreated { id, .. } => Ok(*id),
            _ => Err(ClientError::MissingEvent {
                kind,
                from_height: confirmed.height,
            }),
        }
    }
}
