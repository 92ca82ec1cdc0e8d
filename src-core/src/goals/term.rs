//! Goal-term estimation shared by the recommendation path and goal creation.

use num_traits::ToPrimitive;
use rust_decimal::Decimal;

use crate::goals::goals_model::Frequency;

/// Saturating default for indeterminate horizons (one-time contributions
/// that cannot reach the target on their own).
pub const FALLBACK_HORIZON_MONTHS: u32 = 120;

/// Estimated number of months to reach `target_amount` contributing
/// `contribution_amount` at `frequency`.
///
/// Contributions are normalized to a monthly-equivalent rate. A one-time
/// contribution that covers the target completes in a single month; an
/// insufficient one-time contribution yields the fixed long-horizon
/// fallback rather than an error. Caller guarantees `target_amount > 0`.
pub fn estimate_duration_months(
    target_amount: Decimal,
    contribution_amount: Decimal,
    frequency: Frequency,
) -> u32 {
    let monthly_equivalent = frequency.monthly_equivalent(contribution_amount);
    if monthly_equivalent > Decimal::ZERO {
        (target_amount / monthly_equivalent)
            .ceil()
            .to_u32()
            .unwrap_or(FALLBACK_HORIZON_MONTHS)
    } else if contribution_amount >= target_amount {
        1
    } else {
        FALLBACK_HORIZON_MONTHS
    }
}
