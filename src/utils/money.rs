use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds half away from zero to `precision` fractional digits, padding with zeros.
pub fn quantize(amount: Decimal, precision: u32) -> Decimal {
    let mut rounded =
        amount.round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(precision);
    rounded
}

/// Whole minor units contained in `amount`, truncated toward zero. `None` when
/// `amount` does not fit at `precision` fractional digits.
pub fn minor_units(amount: Decimal, precision: u32) -> Option<i128> {
    let mut truncated = amount.round_dp_with_strategy(precision, RoundingStrategy::ToZero);
    truncated.rescale(precision);
    (truncated.scale() == precision).then_some(truncated.mantissa())
}

pub fn from_minor_units(units: i128, precision: u32) -> Decimal {
    Decimal::from_i128_with_scale(units, precision)
}
