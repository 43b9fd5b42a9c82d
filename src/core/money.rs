use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Smallest billable unit. Every levied amount is a multiple of this.
pub const BILLING_UNIT: Decimal = dec!(10);

/// Floor an amount to the nearest 10 won (원 미만 절사 단위).
///
/// Negative amounts floor away from zero, so the result never exceeds the input.
pub fn round_down_to_ten(amount: Decimal) -> Decimal {
    (amount / BILLING_UNIT).floor() * BILLING_UNIT
}

/// `amount × rate%`, keeping full precision.
pub fn percent_of(amount: Decimal, rate: Decimal) -> Decimal {
    amount * rate / dec!(100)
}

/// Whole won with thousands separators, e.g. `1,234,560`.
pub fn format_won(amount: Decimal) -> String {
    let whole = amount.round_dp(0).abs().to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if amount.round_dp(0).is_sign_negative() && !amount.round_dp(0).is_zero() {
        format!("-{grouped}")
    } else {
        grouped
    }
}
