//! In-memory mock collaborators for driving the client in tests.
#![allow(dead_code)]

use agora_contract::{
    text, Address, ContractDescriptor, EventData, EventKind, EventRecord, GovernanceCall,
    GovernanceQuery, TokenId, Value,
};
use agora_sdk::rpc::{
    CallHandle, CallReceipt, ChainInfo, ContractRpc, Funding, RpcError, RpcResult, TokenDirectory,
};
use agora_sdk::TokenInfo;
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// Scripted transport. Query responses are queued per contract method
/// name; submissions, receipts and event scans are recorded or replayed
/// from in-memory state.
#[derive(Default)]
pub struct MockRpc {
    responses: Mutex<HashMap<&'static str, VecDeque<Result<Vec<Value>, String>>>>,
    pub query_log: Mutex<Vec<&'static str>>,
    pub submissions: Mutex<Vec<(GovernanceCall, Option<Funding>)>>,
    receipts: Mutex<VecDeque<Option<u64>>>,
    default_height: Mutex<u64>,
    events: Mutex<Vec<EventRecord>>,
}

impl MockRpc {
    pub fn new() -> Self {
        let rpc = Self::default();
        *rpc.default_height.lock().unwrap() = 1;
        rpc
    }

    /// Queue a successful response for one execution of `method`.
    pub fn expect_query(&self, method: &'static str, values: Vec<Value>) {
        self.responses
            .lock()
            .unwrap()
            .entry(method)
            .or_default()
            .push_back(Ok(values));
    }

    /// Queue a transport failure for one execution of `method`.
    pub fn fail_query(&self, method: &'static str, message: &str) {
        self.responses
            .lock()
            .unwrap()
            .entry(method)
            .or_default()
            .push_back(Err(message.to_owned()));
    }

    /// Script the next receipt polls; `None` entries mean "not yet
    /// received". Once the script is drained, polls confirm at the
    /// default height.
    pub fn script_receipts(&self, receipts: Vec<Option<u64>>) {
        *self.receipts.lock().unwrap() = receipts.into();
    }

    pub fn set_default_height(&self, height: u64) {
        *self.default_height.lock().unwrap() = height;
    }

    pub fn add_event(&self, record: EventRecord) {
        self.events.lock().unwrap().push(record);
    }

    pub fn queries_named(&self, method: &str) -> usize {
        self.query_log
            .lock()
            .unwrap()
            .iter()
            .filter(|name| **name == method)
            .count()
    }

    pub fn submitted(&self) -> Vec<(GovernanceCall, Option<Funding>)> {
        self.submissions.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContractRpc for MockRpc {
    async fn submit(
        &self,
        _contract: &ContractDescriptor,
        call: &GovernanceCall,
        funding: Option<&Funding>,
    ) -> RpcResult<CallHandle> {
        let mut submissions = self.submissions.lock().unwrap();
        let tx_hash = format!("0xtx{}", submissions.len());
        submissions.push((call.clone(), funding.cloned()));
        Ok(CallHandle { tx_hash })
    }

    async fn receipt(
        &self,
        _contract: &ContractDescriptor,
        _handle: &CallHandle,
    ) -> RpcResult<Option<CallReceipt>> {
        if let Some(scripted) = self.receipts.lock().unwrap().pop_front() {
            return Ok(scripted.map(|height| CallReceipt { height }));
        }
        let height = *self.default_height.lock().unwrap();
        Ok(Some(CallReceipt { height }))
    }

    async fn query(
        &self,
        _contract: &ContractDescriptor,
        query: &GovernanceQuery,
    ) -> RpcResult<Vec<Value>> {
        let method = query.method_name();
        self.query_log.lock().unwrap().push(method);
        let scripted = self
            .responses
            .lock()
            .unwrap()
            .get_mut(method)
            .and_then(VecDeque::pop_front);
        match scripted {
            Some(Ok(values)) => Ok(values),
            Some(Err(message)) => Err(RpcError::Transport(message)),
            None => Err(RpcError::Transport(format!("unscripted query: {method}"))),
        }
    }

    async fn scan_events(
        &self,
        _contract: &ContractDescriptor,
        from_height: u64,
        kind: EventKind,
    ) -> RpcResult<Vec<EventRecord>> {
        Ok(self
            .events
            .lock()
            .unwrap()
            .iter()
            .filter(|record| record.height >= from_height && record.kind() == kind)
            .cloned()
            .collect())
    }
}

/// Token directory backed by a fixed map.
#[derive(Default)]
pub struct MockTokens {
    infos: HashMap<TokenId, TokenInfo>,
}

impl MockTokens {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, id: &str, name: &str, symbol: &str, decimals: u8) -> Self {
        self.infos.insert(
            TokenId::new(id),
            TokenInfo {
                name: name.to_owned(),
                symbol: symbol.to_owned(),
                decimals,
            },
        );
        self
    }
}

#[async_trait]
impl TokenDirectory for MockTokens {
    async fn token_info(&self, id: &TokenId) -> RpcResult<TokenInfo> {
        self.infos
            .get(id)
            .cloned()
            .ok_or_else(|| RpcError::Rejected(format!("unknown token {id}")))
    }
}

/// Chain info with a fixed snapshot height.
pub struct MockChain {
    pub height: u64,
}

#[async_trait]
impl ChainInfo for MockChain {
    async fn snapshot_height(&self) -> RpcResult<u64> {
        Ok(self.height)
    }
}

// ==================== Value builders ====================

pub fn bytes32(text_value: &str) -> [u8; 32] {
    text::encode(text_value).unwrap()
}

/// Output of `getSpaces` for rows of `(name, token, member_count)`.
pub fn spaces_page_values(rows: &[(&str, &str, u64)]) -> Vec<Value> {
    vec![
        Value::Bytes32List(rows.iter().map(|(name, _, _)| bytes32(name)).collect()),
        Value::TokenIdList(rows.iter().map(|(_, token, _)| TokenId::new(*token)).collect()),
        Value::Bytes32List(rows.iter().map(|_| bytes32("avatar")).collect()),
        Value::Bytes32List(rows.iter().map(|_| bytes32("site.example")).collect()),
        Value::UintList(rows.iter().map(|(_, _, count)| u128::from(*count)).collect()),
    ]
}

/// Output of `getSpaceExternal`.
pub fn space_detail_values(
    name: &str,
    description: &str,
    token: &str,
    member_count: u64,
    decimals: u8,
) -> Vec<Value> {
    vec![
        Value::Bytes32(bytes32(name)),
        Value::Str(description.to_owned()),
        Value::TokenId(TokenId::new(token)),
        Value::Bytes32(bytes32("avatar")),
        Value::Bytes32(bytes32("site.example")),
        Value::Uint(u128::from(member_count)),
        Value::Uint(u128::from(decimals)),
    ]
}

/// Output of `getSpaceSettings`.
pub fn settings_values(threshold: u128, only_admins: bool) -> Vec<Value> {
    vec![Value::Uint(threshold), Value::Bool(only_admins)]
}

/// Output of `getSpaceProposals` for rows of `(id, title)`.
pub fn proposal_page_values(rows: &[(u64, &str)]) -> Vec<Value> {
    vec![
        Value::UintList(rows.iter().map(|(id, _)| u128::from(*id)).collect()),
        Value::StrList(rows.iter().map(|(_, title)| (*title).to_owned()).collect()),
        Value::StrList(rows.iter().map(|_| String::new()).collect()),
        Value::UintList(rows.iter().map(|_| 100u128).collect()),
        Value::UintList(rows.iter().map(|_| 200u128).collect()),
        Value::UintList(rows.iter().map(|_| 2u128).collect()),
    ]
}

/// Output of `getSpaceProposal` with two choices.
pub fn proposal_detail_values(title: &str, author: &str, tallies: (u128, u128)) -> Vec<Value> {
    vec![
        Value::Str(title.to_owned()),
        Value::Str("details".to_owned()),
        Value::Address(Address::new(author)),
        Value::Uint(100),
        Value::Uint(200),
        Value::Uint(4321),
        Value::Bytes32List(vec![bytes32("yes"), bytes32("no")]),
        Value::AddressList(vec![Address::new("agora_exec"), Address::new("")]),
        Value::Bytes32List(vec![[0u8; 32], [0u8; 32]]),
        Value::UintList(vec![tallies.0, tallies.1]),
    ]
}

/// Output of `getSpaceProposalVotes` for rows of `(voter, amounts)`.
pub fn votes_page_values(rows: &[(&str, Vec<u128>)]) -> Vec<Value> {
    vec![
        Value::AddressList(rows.iter().map(|(voter, _)| Address::new(*voter)).collect()),
        Value::UintMatrix(rows.iter().map(|(_, amounts)| amounts.clone()).collect()),
    ]
}

// ==================== Event builders ====================

pub fn space_created(id: u64, height: u64, tx_hash: Option<&str>) -> EventRecord {
    EventRecord {
        height,
        tx_hash: tx_hash.map(str::to_owned),
        data: EventData::SpaceCreated {
            id,
            token: TokenId::new("tti_01"),
            name: bytes32("space"),
            avatar: bytes32("avatar"),
            description: String::new(),
        },
    }
}

pub fn proposal_created(id: u64, space_id: u64, height: u64, tx_hash: Option<&str>) -> EventRecord {
    EventRecord {
        height,
        tx_hash: tx_hash.map(str::to_owned),
        data: EventData::ProposalCreated {
            id,
            space_id,
            author: Address::new("agora_author"),
            title: "proposal".to_owned(),
            start: 100,
            end: 200,
        },
    }
}
