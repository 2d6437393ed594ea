use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places every `share` is reported with.
pub const SHARE_DECIMALS: u32 = 2;

/// Prepare a report value for output.
///
/// - When `decimals` is set, the value is rounded (half away from zero) to that
///   many decimal places first.
/// - Trailing zeros are stripped (`Decimal::normalize()`), so `1600.00` renders
///   as `1600`.
pub fn round_value(value: Decimal, decimals: Option<u32>) -> Decimal {
    let rounded = match decimals {
        Some(dp) => value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero),
        None => value,
    };
    rounded.normalize()
}

/// Round a percentage share to two decimals, half away from zero.
///
/// Unlike [`round_value`] the scale is fixed, so a full share renders as
/// `100.00`.
pub fn round_share(raw: Decimal) -> Decimal {
    let mut rounded =
        raw.round_dp_with_strategy(SHARE_DECIMALS, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(SHARE_DECIMALS);
    rounded
}
