//! Pure derived values: voting power, deposits and vote tallies.
//!
//! Token amounts are exact `u128` base units. Conversions multiply or
//! divide by `10^decimals` with checked integer arithmetic — at 18-decimal
//! scale a float would round balances near the unit boundary the wrong
//! way.

use crate::error::{ClientError, Result};
use crate::types::Proposal;

/// `10^decimals`, or `None` when the scale itself leaves u128 range.
fn pow10(decimals: u8) -> Option<u128> {
    10u128.checked_pow(u32::from(decimals))
}

/// Human-scale voting power of a base-unit balance: `balance / 10^decimals`
/// by integer division.
pub fn voting_power(base_units: u128, decimals: u8) -> u128 {
    pow10(decimals).map_or(0, |scale| base_units / scale)
}

/// Scale a human-scale amount to base units: `amount * 10^decimals`.
pub fn scale_to_base_units(amount: u128, decimals: u8) -> Result<u128> {
    let scale = pow10(decimals).ok_or(ClientError::AmountOverflow)?;
    amount.checked_mul(scale).ok_or(ClientError::AmountOverflow)
}

/// Deposit attached to a `createProposal` call, as the decimal string the
/// transport sends. Admins and zero-threshold spaces propose for free.
pub fn proposal_deposit(is_admin: bool, threshold: u128, decimals: u8) -> Result<String> {
    if is_admin || threshold == 0 {
        return Ok("0".to_owned());
    }
    Ok(scale_to_base_units(threshold, decimals)?.to_string())
}

/// Aggregated vote counts for a proposal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tally {
    totals: Vec<u128>,
    total: u128,
}

impl Tally {
    pub fn new(totals: Vec<u128>) -> Self {
        let total = totals.iter().copied().fold(0u128, u128::saturating_add);
        Self { totals, total }
    }

    /// Tally of an already-fetched proposal, once the detail query has
    /// populated its counts.
    pub fn of(proposal: &Proposal) -> Option<Self> {
        proposal.tallies.clone().map(Self::new)
    }

    pub fn total(&self) -> u128 {
        self.total
    }

    pub fn choice_total(&self, choice: usize) -> u128 {
        self.totals.get(choice).copied().unwrap_or(0)
    }

    /// Share of the total carried by one choice, in `[0, 1]`. `None` when
    /// nothing has been voted yet or the choice does not exist — no
    /// percentage is computed against a zero total.
    pub fn share(&self, choice: usize) -> Option<f64> {
        if self.total == 0 {
            return None;
        }
        let count = *self.totals.get(choice)?;
        Some(count as f64 / self.total as f64)
    }
}
