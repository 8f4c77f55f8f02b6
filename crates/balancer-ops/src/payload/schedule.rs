//! Reward schedule arithmetic in base units.

use alloy_primitives::U256;

/// Gauge injectors pay out once per epoch.
pub const SECONDS_PER_WEEK: u64 = 604_800;

/// Total paid by a schedule, `None` on overflow.
pub fn total_distribution(amount_per_period: U256, periods: u64) -> Option<U256> {
    amount_per_period.checked_mul(U256::from(periods))
}

/// Per-second emission of one weekly period, rounded down.
pub fn rate_per_second(amount_per_period: U256) -> U256 {
    amount_per_period / U256::from(SECONDS_PER_WEEK)
}
