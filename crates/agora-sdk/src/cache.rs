//! In-memory read cache for governance entities.
//!
//! Entries are keyed by the same id spaces the contract uses: space id,
//! (space, proposal), (space, proposal, vote position) and token id.
//! Upserts merge additively: a payload that lacks an optional field never
//! erases a value a previous payload established. There is no eviction;
//! the cache lives as long as the client session.

use agora_contract::TokenId;
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashMap};

use crate::types::{PageRequest, Proposal, Space, SpaceSettings, Token, Vote};

#[derive(Debug, Default)]
pub struct GovernanceCache {
    spaces: BTreeMap<u64, Space>,
    settings: HashMap<u64, SpaceSettings>,
    proposals: HashMap<u64, BTreeMap<u64, Proposal>>,
    votes: HashMap<(u64, u64), BTreeMap<u64, Vote>>,
    tokens: HashMap<TokenId, Token>,
    space_creation_fee: Option<u128>,
}

impl GovernanceCache {
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Tokens ====================

    /// Best known state of a token: the cached entry, or a placeholder
    /// holding only the id.
    pub fn token(&self, id: &TokenId) -> Token {
        self.tokens
            .get(id)
            .cloned()
            .unwrap_or_else(|| Token::unknown(id.clone()))
    }

    /// Merge token metadata. Name and symbol only move forward from empty;
    /// `decimals` is kept when the incoming payload does not carry it —
    /// directory lookups and space rows each know different fields.
    pub fn upsert_token(&mut self, incoming: Token) {
        let merged = match self.tokens.get(&incoming.id) {
            Some(prev) => Token {
                id: incoming.id.clone(),
                name: if incoming.name.is_empty() {
                    prev.name.clone()
                } else {
                    incoming.name
                },
                symbol: if incoming.symbol.is_empty() {
                    prev.symbol.clone()
                } else {
                    incoming.symbol
                },
                decimals: incoming.decimals.or(prev.decimals),
            },
            None => incoming,
        };
        self.tokens.insert(merged.id.clone(), merged);
    }

    // ==================== Spaces ====================

    pub fn space(&self, id: u64) -> Option<&Space> {
        self.spaces.get(&id)
    }

    /// Idempotent upsert. Fresh scalar fields overwrite; lazily-loaded
    /// fields (`description`, `owner`, `admins`) survive a payload that
    /// does not carry them.
    pub fn upsert_space(&mut self, mut space: Space) -> &Space {
        self.upsert_token(space.token.clone());
        space.token = self.token(&space.token.id);
        match self.spaces.entry(space.id) {
            Entry::Occupied(slot) => {
                let prev = slot.into_mut();
                prev.name = space.name;
                prev.avatar = space.avatar;
                prev.website = space.website;
                prev.member_count = space.member_count;
                prev.is_private = space.is_private;
                prev.token = space.token;
                if space.description.is_some() {
                    prev.description = space.description;
                }
                if space.owner.is_some() {
                    prev.owner = space.owner;
                }
                if space.admins.is_some() {
                    prev.admins = space.admins;
                }
                prev
            }
            Entry::Vacant(slot) => slot.insert(space),
        }
    }

    pub fn set_space_admins(&mut self, id: u64, admins: Vec<agora_contract::Address>) {
        if let Some(space) = self.spaces.get_mut(&id) {
            space.admins = Some(admins);
        }
    }

    pub fn spaces_len(&self) -> usize {
        self.spaces.len()
    }

    /// Cached slice `[skip, skip+limit)` of the space listing, in id order.
    pub fn spaces_page(&self, page: &PageRequest) -> Vec<Space> {
        self.spaces
            .values()
            .skip(page.skip as usize)
            .take(page.limit as usize)
            .cloned()
            .collect()
    }

    // ==================== Space settings ====================

    pub fn settings(&self, space_id: u64) -> Option<SpaceSettings> {
        self.settings.get(&space_id).copied()
    }

    pub fn put_settings(&mut self, space_id: u64, settings: SpaceSettings) {
        self.settings.insert(space_id, settings);
    }

    pub fn invalidate_settings(&mut self, space_id: u64) {
        self.settings.remove(&space_id);
    }

    // ==================== Proposals ====================

    pub fn proposal(&self, space_id: u64, id: u64) -> Option<&Proposal> {
        self.proposals.get(&space_id)?.get(&id)
    }

    /// Idempotent upsert. Summary rows and detail rows merge: detail-only
    /// fields survive a later summary payload, and tallies are replaced
    /// only when the incoming payload carries a fresh count.
    pub fn upsert_proposal(&mut self, proposal: Proposal) -> &Proposal {
        let per_space = self.proposals.entry(proposal.space_id).or_default();
        match per_space.entry(proposal.id) {
            Entry::Occupied(slot) => {
                let prev = slot.into_mut();
                prev.title = proposal.title;
                prev.description = proposal.description;
                prev.start = proposal.start;
                prev.end = proposal.end;
                if proposal.author.is_some() {
                    prev.author = proposal.author;
                }
                if proposal.snapshot.is_some() {
                    prev.snapshot = proposal.snapshot;
                }
                if proposal.choices.is_some() {
                    prev.choices = proposal.choices;
                }
                if proposal.pass_actions.is_some() {
                    prev.pass_actions = proposal.pass_actions;
                }
                if proposal.tallies.is_some() {
                    prev.tallies = proposal.tallies;
                }
                prev
            }
            Entry::Vacant(slot) => slot.insert(proposal),
        }
    }

    pub fn proposals_len(&self, space_id: u64) -> usize {
        self.proposals.get(&space_id).map_or(0, BTreeMap::len)
    }

    pub fn proposals_page(&self, space_id: u64, page: &PageRequest) -> Vec<Proposal> {
        self.proposals
            .get(&space_id)
            .map(|per_space| {
                per_space
                    .values()
                    .skip(page.skip as usize)
                    .take(page.limit as usize)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    // ==================== Votes ====================

    /// Votes are append-only on-chain; an upsert for an existing position
    /// is an idempotent overwrite.
    pub fn upsert_vote(&mut self, vote: Vote) {
        self.votes
            .entry((vote.space, vote.proposal))
            .or_default()
            .insert(vote.id, vote);
    }

    pub fn votes_len(&self, space_id: u64, proposal_id: u64) -> usize {
        self.votes
            .get(&(space_id, proposal_id))
            .map_or(0, BTreeMap::len)
    }

    pub fn votes_page(&self, space_id: u64, proposal_id: u64, page: &PageRequest) -> Vec<Vote> {
        self.votes
            .get(&(space_id, proposal_id))
            .map(|per_proposal| {
                per_proposal
                    .values()
                    .skip(page.skip as usize)
                    .take(page.limit as usize)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    // ==================== Contract constants ====================

    pub fn space_creation_fee(&self) -> Option<u128> {
        self.space_creation_fee
    }

    pub fn put_space_creation_fee(&mut self, fee: u128) {
        self.space_creation_fee = Some(fee);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_contract::Address;

    fn space(id: u64, token: Token) -> Space {
        Space {
            id,
            name: format!("space-{id}"),
            avatar: String::new(),
            website: String::new(),
            description: None,
            member_count: 0,
            token,
            is_private: false,
            owner: None,
            admins: None,
            members: Vec::new(),
        }
    }

    #[test]
    fn test_token_decimals_survive_partial_payload() {
        let mut cache = GovernanceCache::new();
        cache.upsert_token(Token {
            id: TokenId::new("tti_01"),
            name: "Orchard".into(),
            symbol: "ORC".into(),
            decimals: Some(18),
        });
        // A later payload without decimals (e.g. a bare listing row).
        cache.upsert_token(Token::unknown(TokenId::new("tti_01")));

        let token = cache.token(&TokenId::new("tti_01"));
        assert_eq!(token.decimals, Some(18));
        assert_eq!(token.name, "Orchard");
        assert_eq!(token.symbol, "ORC");
    }

    #[test]
    fn test_space_description_survives_listing_refresh() {
        let mut cache = GovernanceCache::new();
        let mut detailed = space(3, Token::unknown(TokenId::new("tti_01")));
        detailed.description = Some("a community orchard".into());
        detailed.owner = Some(Address::new("agora_owner"));
        cache.upsert_space(detailed);

        // Listing payloads carry no description or owner.
        let merged = cache
            .upsert_space(space(3, Token::unknown(TokenId::new("tti_01"))))
            .clone();
        assert_eq!(merged.description.as_deref(), Some("a community orchard"));
        assert_eq!(merged.owner, Some(Address::new("agora_owner")));
    }

    #[test]
    fn test_spaces_page_slices_in_id_order() {
        let mut cache = GovernanceCache::new();
        for id in 0..6 {
            cache.upsert_space(space(id, Token::unknown(TokenId::new("tti_01"))));
        }
        assert_eq!(cache.spaces_len(), 6);

        let page = cache.spaces_page(&PageRequest::new(2, 3));
        let ids: Vec<u64> = page.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![2, 3, 4]);
    }

    #[test]
    fn test_proposal_detail_survives_summary_refresh() {
        let mut cache = GovernanceCache::new();
        let detailed = Proposal {
            id: 0,
            space_id: 1,
            title: "Fund the orchard".into(),
            description: "Plant 40 trees".into(),
            start: 100,
            end: 200,
            author: Some(Address::new("agora_author")),
            snapshot: Some(4321),
            choices: Some(vec!["yes".into(), "no".into()]),
            pass_actions: Some(Vec::new()),
            tallies: Some(vec![3, 4]),
        };
        cache.upsert_proposal(detailed);

        let summary = Proposal {
            id: 0,
            space_id: 1,
            title: "Fund the orchard".into(),
            description: "Plant 40 trees".into(),
            start: 100,
            end: 200,
            author: None,
            snapshot: None,
            choices: None,
            pass_actions: None,
            tallies: None,
        };
        let merged = cache.upsert_proposal(summary).clone();
        assert_eq!(merged.choices, Some(vec!["yes".into(), "no".into()]));
        assert_eq!(merged.snapshot, Some(4321));
        assert_eq!(merged.tallies, Some(vec![3, 4]));
        assert!(merged.is_detailed());
    }

    #[test]
    fn test_settings_invalidation() {
        let mut cache = GovernanceCache::new();
        cache.put_settings(
            7,
            SpaceSettings {
                create_proposal_threshold: 50,
                only_admins_can_create_proposal: false,
            },
        );
        assert!(cache.settings(7).is_some());
        cache.invalidate_settings(7);
        assert!(cache.settings(7).is_none());
    }

    #[test]
    fn test_votes_keyed_by_scope_and_position() {
        let mut cache = GovernanceCache::new();
        for id in 0..4 {
            cache.upsert_vote(Vote {
                id,
                space: 1,
                proposal: 2,
                author: Address::new(format!("agora_{id}")),
                choices: vec![id as u128, 0],
            });
        }
        assert_eq!(cache.votes_len(1, 2), 4);
        assert_eq!(cache.votes_len(1, 3), 0);

        let page = cache.votes_page(1, 2, &PageRequest::new(1, 2));
        let ids: Vec<u64> = page.iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }
}
