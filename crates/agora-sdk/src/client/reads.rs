//! Read path: cache-first pagination, merge-on-fetch single entities and
//! uncached status queries.
//!
//! List operations degrade to the cache on query failure: the error is
//! logged and the caller receives whatever slice is already known. Single
//! entity fetches and status queries propagate failures — there is no
//! stale-but-plausible answer for those.

use agora_contract::{
    decode_address, decode_address_list, decode_bool, decode_u64, decode_uint, Address,
    GovernanceQuery, ProposalDetailRow, ProposalSummaryPage, SettingsRow, SpaceDetailRow,
    SpacesPage, UserSpacesPage, VotesPage,
};

use super::GovernanceClient;
use crate::error::{ClientError, Result};
use crate::power;
use crate::rpc::{BalanceSource, TokenDirectory};
use crate::types::{
    ChoiceAction, PageRequest, Proposal, Space, SpaceSettings, Token, Vote,
};

impl GovernanceClient {
    // ==================== Spaces ====================

    /// Page `[skip, skip+limit)` of the space listing. Served from cache
    /// when enough items are already known; degrades to the cached slice
    /// when the contract query fails.
    pub async fn spaces(&self, page: PageRequest) -> Vec<Space> {
        {
            let cache = self.cache.lock().await;
            if cache.spaces_len() as u64 >= page.end() {
                return cache.spaces_page(&page);
            }
        }
        match self.fetch_spaces(&page).await {
            Ok(spaces) => spaces,
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    skip = page.skip,
                    limit = page.limit,
                    "space listing query failed, serving cached slice"
                );
                self.cache.lock().await.spaces_page(&page)
            }
        }
    }

    async fn fetch_spaces(&self, page: &PageRequest) -> Result<Vec<Space>> {
        let values = self
            .run_query(GovernanceQuery::GetSpaces {
                skip: page.skip,
                limit: page.limit,
            })
            .await?;
        let rows = SpacesPage::decode(&values)?;

        let mut cache = self.cache.lock().await;
        let mut spaces = Vec::with_capacity(rows.len());
        for (offset, row) in rows.into_iter().enumerate() {
            let space = Space {
                // The listing is dense: ids are positions in the global
                // space list.
                id: u64::from(page.skip) + offset as u64,
                name: row.name,
                avatar: row.avatar,
                website: row.website,
                description: None,
                member_count: row.member_count,
                token: Token::unknown(row.token),
                is_private: false,
                owner: None,
                admins: None,
                members: Vec::new(),
            };
            spaces.push(cache.upsert_space(space).clone());
        }
        Ok(spaces)
    }

    /// A space with its lazily-loaded fields populated. Cached copies are
    /// reused once the detail query has run.
    pub async fn space(&self, id: u64) -> Result<Space> {
        {
            let cache = self.cache.lock().await;
            if let Some(space) = cache.space(id) {
                if space.description.is_some() {
                    return Ok(space.clone());
                }
            }
        }
        self.fetch_space(id).await
    }

    /// Re-read a space from the contract, bypassing the cache.
    pub async fn refresh_space(&self, id: u64) -> Result<Space> {
        self.fetch_space(id).await
    }

    /// Detail fetch composes three lookups — the space row, the token
    /// directory and the owner query — and merges them into one entity.
    async fn fetch_space(&self, id: u64) -> Result<Space> {
        let values = self.run_query(GovernanceQuery::GetSpace { id }).await?;
        if values.is_empty() {
            return Err(ClientError::NotFound(format!("space {id}")));
        }
        let row = SpaceDetailRow::decode(&values)?;

        let info = self.tokens.token_info(&row.token).await?;
        let owner_values = self.run_query(GovernanceQuery::GetSpaceOwner { id }).await?;
        let owner = decode_address(&owner_values)?;

        let mut cache = self.cache.lock().await;
        cache.upsert_token(Token {
            id: row.token.clone(),
            name: info.name,
            symbol: info.symbol,
            decimals: Some(info.decimals),
        });
        let mut token = cache.token(&row.token);
        // The space row's decimals are authoritative for proposals.
        token.decimals = Some(row.token_decimals);

        let space = Space {
            id,
            name: row.name,
            avatar: row.avatar,
            website: row.website,
            description: Some(row.description),
            member_count: row.member_count,
            token,
            is_private: false,
            owner: Some(owner),
            admins: None,
            members: Vec::new(),
        };
        Ok(cache.upsert_space(space).clone())
    }

    /// Spaces the configured address has joined. Uncached; empty without
    /// a configured address and on query failure.
    pub async fn user_spaces(&self) -> Vec<Space> {
        let Some(address) = self.address.clone() else {
            return Vec::new();
        };
        let result: Result<Vec<Space>> = async {
            let values = self
                .run_query(GovernanceQuery::GetUserSpaces { user: address })
                .await?;
            let rows = UserSpacesPage::decode(&values)?;
            Ok(rows
                .into_iter()
                .map(|row| Space {
                    id: row.id,
                    name: row.name,
                    avatar: row.avatar,
                    website: String::new(),
                    description: None,
                    member_count: 0,
                    token: Token::unknown(Default::default()),
                    is_private: false,
                    owner: None,
                    admins: None,
                    members: Vec::new(),
                })
                .collect())
        }
        .await;

        match result {
            Ok(spaces) => spaces,
            Err(err) => {
                tracing::warn!(error = %err, "user space listing failed");
                Vec::new()
            }
        }
    }

    /// Admin list for a space, loaded on demand and cached on the entity.
    pub async fn load_space_admins(&self, space_id: u64) -> Result<Vec<Address>> {
        let values = self
            .run_query(GovernanceQuery::GetSpaceAdmins { id: space_id })
            .await?;
        let admins = decode_address_list(&values)?;
        self.cache
            .lock()
            .await
            .set_space_admins(space_id, admins.clone());
        Ok(admins)
    }

    // ==================== Space settings ====================

    pub async fn space_settings(&self, space_id: u64) -> Result<SpaceSettings> {
        if let Some(settings) = self.cache.lock().await.settings(space_id) {
            return Ok(settings);
        }
        self.refresh_space_settings(space_id).await
    }

    /// Re-read settings from the contract, bypassing the cache.
    pub async fn refresh_space_settings(&self, space_id: u64) -> Result<SpaceSettings> {
        let values = self
            .run_query(GovernanceQuery::GetSpaceSettings { id: space_id })
            .await?;
        let row = SettingsRow::decode(&values)?;
        let settings = SpaceSettings {
            create_proposal_threshold: row.proposal_threshold,
            only_admins_can_create_proposal: row.only_admins_can_create_proposal,
        };
        self.cache.lock().await.put_settings(space_id, settings);
        Ok(settings)
    }

    // ==================== Proposals ====================

    /// Page `[skip, skip+limit)` of a space's proposals, cache-first with
    /// degrade-to-cache on failure.
    pub async fn proposals(&self, space_id: u64, page: PageRequest) -> Vec<Proposal> {
        {
            let cache = self.cache.lock().await;
            if cache.proposals_len(space_id) as u64 >= page.end() {
                return cache.proposals_page(space_id, &page);
            }
        }
        match self.fetch_proposals(space_id, &page).await {
            Ok(proposals) => proposals,
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    space_id,
                    skip = page.skip,
                    limit = page.limit,
                    "proposal listing query failed, serving cached slice"
                );
                self.cache.lock().await.proposals_page(space_id, &page)
            }
        }
    }

    async fn fetch_proposals(&self, space_id: u64, page: &PageRequest) -> Result<Vec<Proposal>> {
        let values = self
            .run_query(GovernanceQuery::GetProposals {
                space: space_id,
                skip: page.skip,
                limit: page.limit,
            })
            .await?;
        let rows = ProposalSummaryPage::decode(&values)?;

        let mut cache = self.cache.lock().await;
        let mut proposals = Vec::with_capacity(rows.len());
        for row in rows {
            let proposal = Proposal {
                id: row.id,
                space_id,
                title: row.title,
                description: row.description,
                start: row.start,
                end: row.end,
                author: None,
                snapshot: None,
                choices: None,
                pass_actions: None,
                tallies: None,
            };
            proposals.push(cache.upsert_proposal(proposal).clone());
        }
        Ok(proposals)
    }

    /// A proposal with its detail fields populated.
    pub async fn proposal(&self, space_id: u64, id: u64) -> Result<Proposal> {
        {
            let cache = self.cache.lock().await;
            if let Some(proposal) = cache.proposal(space_id, id) {
                if proposal.is_detailed() {
                    return Ok(proposal.clone());
                }
            }
        }
        self.fetch_proposal(space_id, id).await
    }

    /// Re-read a proposal (and its vote counts) from the contract.
    pub async fn refresh_proposal(&self, space_id: u64, id: u64) -> Result<Proposal> {
        self.fetch_proposal(space_id, id).await
    }

    async fn fetch_proposal(&self, space_id: u64, id: u64) -> Result<Proposal> {
        let values = self
            .run_query(GovernanceQuery::GetProposal {
                space: space_id,
                proposal: id,
            })
            .await?;
        if values.is_empty() {
            return Err(ClientError::NotFound(format!(
                "proposal {id} in space {space_id}"
            )));
        }
        let row = ProposalDetailRow::decode(&values)?;

        let pass_actions = row
            .executors
            .iter()
            .zip(row.calldata.iter())
            .map(|(executor, calldata)| ChoiceAction {
                executor: executor.clone(),
                calldata: *calldata,
            })
            .collect();
        let proposal = Proposal {
            id,
            space_id,
            title: row.title,
            description: row.description,
            start: row.start,
            end: row.end,
            author: Some(row.author),
            snapshot: Some(row.snapshot),
            choices: Some(row.choices),
            pass_actions: Some(pass_actions),
            tallies: Some(row.tallies),
        };
        Ok(self.cache.lock().await.upsert_proposal(proposal).clone())
    }

    // ==================== Votes ====================

    /// Page `[skip, skip+limit)` of a proposal's votes, cache-first with
    /// degrade-to-cache on failure.
    pub async fn votes(&self, space_id: u64, proposal_id: u64, page: PageRequest) -> Vec<Vote> {
        {
            let cache = self.cache.lock().await;
            if cache.votes_len(space_id, proposal_id) as u64 >= page.end() {
                return cache.votes_page(space_id, proposal_id, &page);
            }
        }
        match self.fetch_votes(space_id, proposal_id, &page).await {
            Ok(votes) => votes,
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    space_id,
                    proposal_id,
                    skip = page.skip,
                    limit = page.limit,
                    "vote listing query failed, serving cached slice"
                );
                self.cache
                    .lock()
                    .await
                    .votes_page(space_id, proposal_id, &page)
            }
        }
    }

    async fn fetch_votes(
        &self,
        space_id: u64,
        proposal_id: u64,
        page: &PageRequest,
    ) -> Result<Vec<Vote>> {
        let values = self
            .run_query(GovernanceQuery::GetVotes {
                space: space_id,
                proposal: proposal_id,
                skip: page.skip,
                limit: page.limit,
            })
            .await?;
        let rows = VotesPage::decode(&values)?;

        let mut cache = self.cache.lock().await;
        let mut votes = Vec::with_capacity(rows.len());
        for (offset, row) in rows.into_iter().enumerate() {
            let vote = Vote {
                id: u64::from(page.skip) + offset as u64,
                space: space_id,
                proposal: proposal_id,
                author: row.voter,
                choices: row.amounts,
            };
            cache.upsert_vote(vote.clone());
            votes.push(vote);
        }
        Ok(votes)
    }

    // ==================== Status queries ====================
    //
    // Answers change on-chain without the client seeing a write, so none
    // of these are cached.

    pub async fn spaces_count(&self) -> Result<u64> {
        let values = self.run_query(GovernanceQuery::GetSpacesCount).await?;
        Ok(decode_u64(&values)?)
    }

    pub async fn proposals_count(&self, space_id: u64) -> Result<u64> {
        let values = self
            .run_query(GovernanceQuery::GetProposalsCount { space: space_id })
            .await?;
        Ok(decode_u64(&values)?)
    }

    pub async fn votes_count(&self, space_id: u64, proposal_id: u64) -> Result<u64> {
        let values = self
            .run_query(GovernanceQuery::GetVotesCount {
                space: space_id,
                proposal: proposal_id,
            })
            .await?;
        Ok(decode_u64(&values)?)
    }

    /// Whether the configured address administers the space. `false`
    /// without a configured address.
    pub async fn is_space_admin(&self, space_id: u64) -> Result<bool> {
        let Some(user) = self.address.clone() else {
            return Ok(false);
        };
        let values = self
            .run_query(GovernanceQuery::IsSpaceAdmin {
                space: space_id,
                user,
            })
            .await?;
        Ok(decode_bool(&values)?)
    }

    /// Whether the configured address is a member of the space. `false`
    /// without a configured address.
    pub async fn is_space_member(&self, space_id: u64) -> Result<bool> {
        let Some(user) = self.address.clone() else {
            return Ok(false);
        };
        let values = self
            .run_query(GovernanceQuery::IsSpaceMember {
                space: space_id,
                user,
            })
            .await?;
        Ok(decode_bool(&values)?)
    }

    pub async fn has_user_voted(
        &self,
        space_id: u64,
        proposal_id: u64,
        user: &Address,
    ) -> Result<bool> {
        let values = self
            .run_query(GovernanceQuery::HasVoted {
                space: space_id,
                proposal: proposal_id,
                voter: user.clone(),
            })
            .await?;
        Ok(decode_bool(&values)?)
    }

    pub async fn is_proposal_executed(&self, space_id: u64, proposal_id: u64) -> Result<bool> {
        let values = self
            .run_query(GovernanceQuery::IsProposalExecuted {
                space: space_id,
                proposal: proposal_id,
            })
            .await?;
        Ok(decode_bool(&values)?)
    }

    pub async fn can_redeem_space_creation_fee(&self, space_id: u64) -> Result<bool> {
        let values = self
            .run_query(GovernanceQuery::CanRedeemSpaceCreationFee { space: space_id })
            .await?;
        Ok(decode_bool(&values)?)
    }

    /// Index of the currently winning choice.
    pub async fn winning_choice(&self, space_id: u64, proposal_id: u64) -> Result<u64> {
        let values = self
            .run_query(GovernanceQuery::WinningChoice {
                space: space_id,
                proposal: proposal_id,
            })
            .await?;
        Ok(decode_u64(&values)?)
    }

    /// Base-unit fee for creating a space, from the contract constant.
    /// Queried once and cached for the session.
    pub async fn space_creation_fee(&self) -> Result<u128> {
        if let Some(fee) = self.cache.lock().await.space_creation_fee() {
            return Ok(fee);
        }
        let values = self.run_query(GovernanceQuery::SpaceCreationFee).await?;
        let fee = decode_uint(&values)?;
        self.cache.lock().await.put_space_creation_fee(fee);
        Ok(fee)
    }

    // ==================== Voting power ====================

    /// Whole-token voting power of the configured address in a space's
    /// token as of `height`. Zero without a balance source or address.
    pub async fn voting_power(&self, space_id: u64, height: u64) -> Result<u128> {
        let (Some(balances), Some(address)) = (self.balances.as_ref(), self.address.as_ref())
        else {
            return Ok(0);
        };
        let space = self.space(space_id).await?;
        let decimals = space.token.decimals.unwrap_or(0);
        let balance = balances
            .balance_at(height, &space.token.id, address)
            .await?;
        Ok(power::voting_power(balance, decimals))
    }
}
