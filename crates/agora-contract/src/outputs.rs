//! Typed rows decoded from contract query outputs.
//!
//! Ranged queries return their results column-major (one list per output
//! slot); the row types here re-assemble them row-major and check that the
//! columns agree on length, so a decoding bug surfaces as an [`AbiError`]
//! instead of a misaligned page.

use crate::text;
use crate::value::{AbiError, Address, Result, TokenId, Value};

fn expect_len(values: &[Value], expected: usize) -> Result<()> {
    if values.len() < expected {
        return Err(AbiError::Arity {
            expected,
            got: values.len(),
        });
    }
    Ok(())
}

fn expect_rows(expected: usize, got: usize) -> Result<()> {
    if expected != got {
        return Err(AbiError::RaggedColumns { expected, got });
    }
    Ok(())
}

/// Decode a single-`uint` output.
pub fn decode_uint(values: &[Value]) -> Result<u128> {
    expect_len(values, 1)?;
    values[0].as_uint()
}

/// Decode a single-`uint` output narrowed to `u64`.
pub fn decode_u64(values: &[Value]) -> Result<u64> {
    expect_len(values, 1)?;
    values[0].as_u64()
}

/// Decode a single-`bool` output.
pub fn decode_bool(values: &[Value]) -> Result<bool> {
    expect_len(values, 1)?;
    values[0].as_bool()
}

/// Decode a single-`address` output.
pub fn decode_address(values: &[Value]) -> Result<Address> {
    expect_len(values, 1)?;
    values[0].as_address().cloned()
}

/// Decode a single `address[]` output.
pub fn decode_address_list(values: &[Value]) -> Result<Vec<Address>> {
    expect_len(values, 1)?;
    Ok(values[0].as_address_list()?.to_vec())
}

/// One row of the `getSpaces` page.
#[derive(Debug, Clone, PartialEq)]
pub struct SpaceSummaryRow {
    pub name: String,
    pub token: TokenId,
    pub avatar: String,
    pub website: String,
    pub member_count: u64,
}

/// Page decoder for `getSpaces`:
/// `(names[], tokens[], avatars[], websites[], memberCounts[])`.
pub struct SpacesPage;

impl SpacesPage {
    pub fn decode(values: &[Value]) -> Result<Vec<SpaceSummaryRow>> {
        expect_len(values, 5)?;
        let names = values[0].as_bytes32_list()?;
        let tokens = values[1].as_token_id_list()?;
        let avatars = values[2].as_bytes32_list()?;
        let websites = values[3].as_bytes32_list()?;
        let member_counts = values[4].as_uint_list()?;
        expect_rows(names.len(), tokens.len())?;
        expect_rows(names.len(), avatars.len())?;
        expect_rows(names.len(), websites.len())?;
        expect_rows(names.len(), member_counts.len())?;

        let mut rows = Vec::with_capacity(names.len());
        for i in 0..names.len() {
            rows.push(SpaceSummaryRow {
                name: text::decode(&names[i]),
                token: tokens[i].clone(),
                avatar: text::decode(&avatars[i]),
                website: text::decode(&websites[i]),
                member_count: u64::try_from(member_counts[i])
                    .map_err(|_| AbiError::NumberOutOfRange(member_counts[i].to_string()))?,
            });
        }
        Ok(rows)
    }
}

/// One row of the `getUserSpaces` listing.
#[derive(Debug, Clone, PartialEq)]
pub struct UserSpaceRow {
    pub id: u64,
    pub name: String,
    pub avatar: String,
}

/// Page decoder for `getUserSpaces`: `(spaceIds[], names[], avatars[])`.
pub struct UserSpacesPage;

impl UserSpacesPage {
    pub fn decode(values: &[Value]) -> Result<Vec<UserSpaceRow>> {
        expect_len(values, 3)?;
        let ids = values[0].as_uint_list()?;
        let names = values[1].as_bytes32_list()?;
        let avatars = values[2].as_bytes32_list()?;
        expect_rows(ids.len(), names.len())?;
        expect_rows(ids.len(), avatars.len())?;

        let mut rows = Vec::with_capacity(ids.len());
        for i in 0..ids.len() {
            rows.push(UserSpaceRow {
                id: u64::try_from(ids[i])
                    .map_err(|_| AbiError::NumberOutOfRange(ids[i].to_string()))?,
                name: text::decode(&names[i]),
                avatar: text::decode(&avatars[i]),
            });
        }
        Ok(rows)
    }
}

/// Decoded output of `getSpaceExternal`.
#[derive(Debug, Clone, PartialEq)]
pub struct SpaceDetailRow {
    pub name: String,
    pub description: String,
    pub token: TokenId,
    pub avatar: String,
    pub website: String,
    pub member_count: u64,
    pub token_decimals: u8,
}

impl SpaceDetailRow {
    pub fn decode(values: &[Value]) -> Result<Self> {
        expect_len(values, 7)?;
        Ok(Self {
            name: text::decode(values[0].as_bytes32()?),
            description: values[1].as_str()?.to_owned(),
            token: values[2].as_token_id()?.clone(),
            avatar: text::decode(values[3].as_bytes32()?),
            website: text::decode(values[4].as_bytes32()?),
            member_count: values[5].as_u64()?,
            token_decimals: values[6].as_u8()?,
        })
    }
}

/// Decoded output of `getSpaceSettings`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SettingsRow {
    pub proposal_threshold: u128,
    pub only_admins_can_create_proposal: bool,
}

impl SettingsRow {
    pub fn decode(values: &[Value]) -> Result<Self> {
        expect_len(values, 2)?;
        Ok(Self {
            proposal_threshold: values[0].as_uint()?,
            only_admins_can_create_proposal: values[1].as_bool()?,
        })
    }
}

/// One row of the `getSpaceProposals` page. Choices, actions and tallies
/// are only available from the per-proposal detail query.
#[derive(Debug, Clone, PartialEq)]
pub struct ProposalSummaryRow {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub start: u64,
    pub end: u64,
    pub choices_count: u64,
}

/// Page decoder for `getSpaceProposals`:
/// `(proposalIds[], titles[], descriptions[], startTimes[], endTimes[], choicesCount[])`.
pub struct ProposalSummaryPage;

impl ProposalSummaryPage {
    pub fn decode(values: &[Value]) -> Result<Vec<ProposalSummaryRow>> {
        expect_len(values, 6)?;
        let ids = values[0].as_uint_list()?;
        let titles = values[1].as_str_list()?;
        let descriptions = values[2].as_str_list()?;
        let starts = values[3].as_uint_list()?;
        let ends = values[4].as_uint_list()?;
        let choice_counts = values[5].as_uint_list()?;
        expect_rows(ids.len(), titles.len())?;
        expect_rows(ids.len(), descriptions.len())?;
        expect_rows(ids.len(), starts.len())?;
        expect_rows(ids.len(), ends.len())?;
        expect_rows(ids.len(), choice_counts.len())?;

        let narrow = |v: u128| {
            u64::try_from(v).map_err(|_| AbiError::NumberOutOfRange(v.to_string()))
        };
        let mut rows = Vec::with_capacity(ids.len());
        for i in 0..ids.len() {
            rows.push(ProposalSummaryRow {
                id: narrow(ids[i])?,
                title: titles[i].clone(),
                description: descriptions[i].clone(),
                start: narrow(starts[i])?,
                end: narrow(ends[i])?,
                choices_count: narrow(choice_counts[i])?,
            });
        }
        Ok(rows)
    }
}

/// Decoded output of `getSpaceProposal`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProposalDetailRow {
    pub title: String,
    pub description: String,
    pub author: Address,
    pub start: u64,
    pub end: u64,
    pub snapshot: u64,
    pub choices: Vec<String>,
    pub executors: Vec<Address>,
    pub calldata: Vec<[u8; 32]>,
    pub tallies: Vec<u128>,
}

impl ProposalDetailRow {
    pub fn decode(values: &[Value]) -> Result<Self> {
        expect_len(values, 10)?;
        let choices_raw = values[6].as_bytes32_list()?;
        let executors = values[7].as_address_list()?;
        let calldata = values[8].as_bytes32_list()?;
        let tallies = values[9].as_uint_list()?;
        expect_rows(choices_raw.len(), executors.len())?;
        expect_rows(choices_raw.len(), calldata.len())?;
        expect_rows(choices_raw.len(), tallies.len())?;

        Ok(Self {
            title: values[0].as_str()?.to_owned(),
            description: values[1].as_str()?.to_owned(),
            author: values[2].as_address()?.clone(),
            start: values[3].as_u64()?,
            end: values[4].as_u64()?,
            snapshot: values[5].as_u64()?,
            choices: choices_raw.iter().map(text::decode).collect(),
            executors: executors.to_vec(),
            calldata: calldata.to_vec(),
            tallies: tallies.to_vec(),
        })
    }
}

/// One row of the `getSpaceProposalVotes` page: a voter and the base-unit
/// amount they put on each choice.
#[derive(Debug, Clone, PartialEq)]
pub struct VoteRow {
    pub voter: Address,
    pub amounts: Vec<u128>,
}

/// Page decoder for `getSpaceProposalVotes`: `(voters[], votes[][])`.
pub struct VotesPage;

impl VotesPage {
    pub fn decode(values: &[Value]) -> Result<Vec<VoteRow>> {
        expect_len(values, 2)?;
        let voters = values[0].as_address_list()?;
        let amounts = values[1].as_uint_matrix()?;
        expect_rows(voters.len(), amounts.len())?;

        Ok(voters
            .iter()
            .zip(amounts.iter())
            .map(|(voter, row)| VoteRow {
                voter: voter.clone(),
                amounts: row.clone(),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bytes32(text_value: &str) -> [u8; 32] {
        text::encode(text_value).unwrap()
    }

    #[test]
    fn test_spaces_page_decodes_row_major() {
        let values = vec![
            Value::Bytes32List(vec![bytes32("alpha"), bytes32("beta")]),
            Value::TokenIdList(vec![TokenId::new("tti_01"), TokenId::new("tti_02")]),
            Value::Bytes32List(vec![bytes32("a.png"), bytes32("b.png")]),
            Value::Bytes32List(vec![bytes32("a.example"), bytes32("b.example")]),
            Value::UintList(vec![12, 7]),
        ];
        let rows = SpacesPage::decode(&values).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "alpha");
        assert_eq!(rows[1].token.as_str(), "tti_02");
        assert_eq!(rows[1].member_count, 7);
    }

    #[test]
    fn test_ragged_columns_rejected() {
        let values = vec![
            Value::Bytes32List(vec![bytes32("alpha"), bytes32("beta")]),
            Value::TokenIdList(vec![TokenId::new("tti_01")]),
            Value::Bytes32List(vec![bytes32("a"), bytes32("b")]),
            Value::Bytes32List(vec![bytes32("a"), bytes32("b")]),
            Value::UintList(vec![1, 2]),
        ];
        assert!(matches!(
            SpacesPage::decode(&values),
            Err(AbiError::RaggedColumns { expected: 2, got: 1 })
        ));
    }

    #[test]
    fn test_proposal_detail_decodes_choices_and_tallies() {
        let values = vec![
            Value::Str("Fund the orchard".into()),
            Value::Str("Plant 40 trees".into()),
            Value::Address(Address::new("agora_author")),
            Value::Uint(100),
            Value::Uint(200),
            Value::Uint(4321),
            Value::Bytes32List(vec![bytes32("yes"), bytes32("no")]),
            Value::AddressList(vec![Address::new("agora_exec"), Address::new("")]),
            Value::Bytes32List(vec![[1u8; 32], [0u8; 32]]),
            Value::UintList(vec![30, 12]),
        ];
        let row = ProposalDetailRow::decode(&values).unwrap();
        assert_eq!(row.choices, vec!["yes", "no"]);
        assert_eq!(row.tallies, vec![30, 12]);
        assert_eq!(row.snapshot, 4321);
    }

    #[test]
    fn test_votes_page_pairs_voters_with_amounts() {
        let values = vec![
            Value::AddressList(vec![Address::new("agora_a"), Address::new("agora_b")]),
            Value::UintMatrix(vec![vec![5, 0], vec![1, 2]]),
        ];
        let rows = VotesPage::decode(&values).unwrap();
        assert_eq!(rows[0].voter.as_str(), "agora_a");
        assert_eq!(rows[1].amounts, vec![1, 2]);
    }

    #[test]
    fn test_arity_checked_before_types() {
        assert!(matches!(
            SettingsRow::decode(&[Value::Uint(1)]),
            Err(AbiError::Arity { expected: 2, got: 1 })
        ));
    }
}
