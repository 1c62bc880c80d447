//! Currency helpers shared by every income rule.
//!
//! Rounding, averaging over partially filled yearly figures, and the stable
//! currency label embedded in explanations.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of months in a year, the divisor of every annual basis.
pub const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Rounds a figure to the cent, half away from zero, at scale 2.
///
/// # Examples
///
/// ```
/// use revenue_engine::calculation::round_currency;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let rounded = round_currency(Decimal::from_str("2166.665").unwrap());
/// assert_eq!(rounded.to_string(), "2166.67");
///
/// let whole = round_currency(Decimal::from(1950));
/// assert_eq!(whole.to_string(), "1950.00");
/// ```
pub fn round_currency(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

/// Mean of the strictly positive figures among `values`.
///
/// Absent, zero and negative entries are ignored; when nothing remains the
/// result is zero.
///
/// # Examples
///
/// ```
/// use revenue_engine::calculation::average_of_present;
/// use rust_decimal::Decimal;
///
/// let values = [Some(Decimal::from(1200)), None, Some(Decimal::from(1800))];
/// assert_eq!(average_of_present(values), Decimal::from(1500));
/// assert_eq!(average_of_present(Vec::<Option<Decimal>>::new()), Decimal::ZERO);
/// ```
pub fn average_of_present<I>(values: I) -> Decimal
where
    I: IntoIterator<Item = Option<Decimal>>,
{
    let present: Vec<Decimal> = values
        .into_iter()
        .flatten()
        .filter(|value| *value > Decimal::ZERO)
        .collect();

    if present.is_empty() {
        return Decimal::ZERO;
    }

    let sum: Decimal = present.iter().copied().sum();
    sum / Decimal::from(present.len())
}

/// Formats a figure as `1 234 567.89 €`.
///
/// The thousands separator is a space, the decimal separator a dot, and the
/// figure is rounded with [`round_currency`] first.
///
/// # Examples
///
/// ```
/// use revenue_engine::calculation::currency_label;
/// use rust_decimal::Decimal;
///
/// assert_eq!(currency_label(Decimal::from(1950)), "1 950.00 €");
/// ```
pub fn currency_label(value: Decimal) -> String {
    let rounded = round_currency(value);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let digits = rounded.abs().to_string();
    let (integer_part, fraction_part) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut grouped = String::with_capacity(integer_part.len() + integer_part.len() / 3);
    for (index, digit) in integer_part.chars().enumerate() {
        if index > 0 && (integer_part.len() - index) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(digit);
    }

    format!("{}{}.{} €", sign, grouped, fraction_part)
}
