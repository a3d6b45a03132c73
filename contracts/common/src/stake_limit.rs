//! Block-indexed stake limit bucket.
//!
//! The bucket holds at most `max_limit` and regains `growth_per_block` for
//! every ledger closed after `prev_block`. Nothing in this module touches
//! storage: callers pass the current ledger sequence in and persist the
//! returned [`LimiterState`] themselves.

use soroban_sdk::contracttype;

/// Current limit reported when no limit is configured.
pub const UNLIMITED: u128 = u128::MAX;

/// Largest configurable `max_limit`. Keeps every configured capacity
/// strictly below [`UNLIMITED`].
pub const MAX_STAKE_LIMIT: u128 = (1 << 96) - 1;

/// Largest allowed `max_limit / growth_per_block`; the recovery counter is
/// a 32-bit block count.
pub const MAX_RECOVERY_BLOCKS: u128 = u32::MAX as u128;

// ── Types ────────────────────────────────────────────────────────────────────

/// Persisted bucket of a single pool.
///
/// `max_limit == 0` encodes "no limit configured". Use [`LimiterState::limit`]
/// instead of comparing the raw fields.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LimiterState {
    pub max_limit: u128,
    pub growth_per_block: u128,
    pub prev_limit: u128,
    pub prev_block: u64,
}

/// Decoded view of the limit configuration.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StakeLimit {
    Unlimited,
    Limited { max: u128, growth_per_block: u128 },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StakeLimitError {
    /// The supplied ledger precedes the one the bucket was anchored at.
    InvalidBlockOrder { prev_block: u64, now_block: u64 },
    /// Zero limit, zero growth, a limit above [`MAX_STAKE_LIMIT`], or a
    /// recovery period that overflows the counter.
    InvalidConfiguration,
    /// The requested amount is larger than the capacity available right now.
    InsufficientCapacity { requested: u128, available: u128 },
}

impl LimiterState {
    /// Empty, unlimited bucket anchored at `now_block`.
    pub fn new(now_block: u64) -> Self {
        Self {
            prev_block: now_block,
            ..Self::default()
        }
    }

    pub fn limit(&self) -> StakeLimit {
        if self.max_limit == 0 {
            StakeLimit::Unlimited
        } else {
            StakeLimit::Limited {
                max: self.max_limit,
                growth_per_block: self.growth_per_block,
            }
        }
    }

    pub fn is_limit_set(&self) -> bool {
        matches!(self.limit(), StakeLimit::Limited { .. })
    }

    /// Blocks needed to refill an empty bucket. Zero when unlimited.
    pub fn full_recovery_blocks(&self) -> u128 {
        match self.limit() {
            StakeLimit::Unlimited => 0,
            StakeLimit::Limited {
                max,
                growth_per_block,
            } => max.checked_div(growth_per_block).unwrap_or(0),
        }
    }
}

// ── Algorithm ────────────────────────────────────────────────────────────────

fn elapsed_blocks(state: &LimiterState, now_block: u64) -> Result<u64, StakeLimitError> {
    now_block
        .checked_sub(state.prev_block)
        .ok_or(StakeLimitError::InvalidBlockOrder {
            prev_block: state.prev_block,
            now_block,
        })
}

/// Capacity available at `now_block`.
///
/// Returns [`UNLIMITED`] when no limit is configured. Otherwise the recorded
/// capacity plus linear growth since `prev_block`, saturating at `max_limit`.
pub fn current_capacity(state: &LimiterState, now_block: u64) -> Result<u128, StakeLimitError> {
    let StakeLimit::Limited {
        max,
        growth_per_block,
    } = state.limit()
    else {
        return Ok(UNLIMITED);
    };

    let elapsed = elapsed_blocks(state, now_block)?;
    let grown = u128::from(elapsed).saturating_mul(growth_per_block);

    Ok(state.prev_limit.saturating_add(grown).min(max))
}

/// Takes `amount` out of the bucket at `now_block`.
///
/// An unlimited bucket is returned unchanged: there is nothing to drain.
pub fn consume(
    state: &LimiterState,
    now_block: u64,
    amount: u128,
) -> Result<LimiterState, StakeLimitError> {
    let available = current_capacity(state, now_block)?;
    if amount > available {
        return Err(StakeLimitError::InsufficientCapacity {
            requested: amount,
            available,
        });
    }

    if !state.is_limit_set() {
        return Ok(state.clone());
    }

    Ok(LimiterState {
        prev_limit: available - amount,
        prev_block: now_block,
        ..state.clone()
    })
}

/// Installs a new limit. The bucket always restarts full at `now_block`.
pub fn set_configuration(
    state: &LimiterState,
    now_block: u64,
    max_limit: u128,
    growth_per_block: u128,
) -> Result<LimiterState, StakeLimitError> {
    if max_limit == 0 || growth_per_block == 0 || max_limit > MAX_STAKE_LIMIT {
        return Err(StakeLimitError::InvalidConfiguration);
    }
    if max_limit / growth_per_block > MAX_RECOVERY_BLOCKS {
        return Err(StakeLimitError::InvalidConfiguration);
    }
    elapsed_blocks(state, now_block)?;

    Ok(LimiterState {
        max_limit,
        growth_per_block,
        prev_limit: max_limit,
        prev_block: now_block,
    })
}

/// Drops the limit. `prev_block` is kept as-is.
pub fn clear_configuration(state: &LimiterState) -> LimiterState {
    LimiterState::new(state.prev_block)
}
