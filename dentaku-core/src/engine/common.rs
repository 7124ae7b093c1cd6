//! Decimal helpers shared by the entry and operator handlers.
//!
//! Every arithmetic step goes through a checked operation so that leaving
//! the range of [`Decimal`] surfaces as [`EngineError::ArithmeticOverflow`]
//! instead of a panic.

use rust_decimal::Decimal;

use crate::engine::EngineError;
use crate::models::Operator;

/// Deepest decimal place a typed digit can land on.
pub const MAX_FRACTION_PLACES: u32 = 28;

/// Formats a value for the display using the decimal type's own string form.
///
/// Trailing zeros carried in the scale are kept. A zero result never
/// renders with a minus sign.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use dentaku_core::engine::common::format_decimal;
///
/// assert_eq!(format_decimal(dec!(8)), "8");
/// assert_eq!(format_decimal(dec!(1.50)), "1.50");
/// assert_eq!(format_decimal(-dec!(0.0)), "0.0");
/// ```
pub fn format_decimal(value: Decimal) -> String {
    if value.is_zero() {
        value.abs().to_string()
    } else {
        value.to_string()
    }
}

/// Renders the term being typed, with the sign prefix when one was entered.
pub fn format_entry(
    entered: Decimal,
    is_negative: bool,
) -> String {
    let sign = if is_negative { "-" } else { "" };
    format!("{sign}{}", format_decimal(entered))
}

/// Shifts an integer-mode entry one place left and appends `digit`.
pub fn shift_in_digit(
    entered: Decimal,
    digit: u8,
) -> Result<Decimal, EngineError> {
    entered
        .checked_mul(Decimal::TEN)
        .and_then(|shifted| shifted.checked_add(Decimal::from(digit)))
        .ok_or(EngineError::ArithmeticOverflow)
}

/// Adds `digit` at the given decimal place (1 = tenths).
///
/// The result carries the exact scale of the typed digits, so a trailing
/// zero stays visible. A digit that would not fit in the 96-bit mantissa is
/// an overflow rather than a rounded term.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use dentaku_core::engine::common::append_fraction_digit;
///
/// assert_eq!(append_fraction_digit(dec!(1), 5, 1), Ok(dec!(1.5)));
/// assert_eq!(append_fraction_digit(dec!(1.5), 0, 2).unwrap().to_string(), "1.50");
/// assert_eq!(append_fraction_digit(dec!(1), 0, 1).unwrap().to_string(), "1.0");
/// ```
pub fn append_fraction_digit(
    entered: Decimal,
    digit: u8,
    place: u32,
) -> Result<Decimal, EngineError> {
    if place > MAX_FRACTION_PLACES {
        return Err(EngineError::ArithmeticOverflow);
    }
    let scale = entered.scale().max(place);
    let widened = 10_i128
        .checked_pow(scale - entered.scale())
        .and_then(|factor| entered.mantissa().checked_mul(factor));
    let addend = 10_i128
        .checked_pow(scale - place)
        .and_then(|factor| i128::from(digit).checked_mul(factor));
    let mantissa = widened
        .zip(addend)
        .and_then(|(widened, addend)| widened.checked_add(addend))
        .ok_or(EngineError::ArithmeticOverflow)?;

    Decimal::try_from_i128_with_scale(mantissa, scale).map_err(|_| EngineError::ArithmeticOverflow)
}

/// Applies `op` to the accumulator and a signed operand.
///
/// `Equals` leaves the accumulator untouched. Division by zero is reported
/// before any arithmetic happens.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use dentaku_core::{EngineError, Operator};
/// use dentaku_core::engine::common::apply_operator;
///
/// assert_eq!(apply_operator(Operator::Add, dec!(5), dec!(3)), Ok(dec!(8)));
/// assert_eq!(apply_operator(Operator::Equals, dec!(8), dec!(0)), Ok(dec!(8)));
/// assert_eq!(
///     apply_operator(Operator::Divide, dec!(9), dec!(0)),
///     Err(EngineError::DivideByZero)
/// );
/// ```
pub fn apply_operator(
    op: Operator,
    accumulator: Decimal,
    operand: Decimal,
) -> Result<Decimal, EngineError> {
    let result = match op {
        Operator::Add => accumulator.checked_add(operand),
        Operator::Subtract => accumulator.checked_sub(operand),
        Operator::Multiply => accumulator.checked_mul(operand),
        Operator::Divide => {
            if operand.is_zero() {
                return Err(EngineError::DivideByZero);
            }
            accumulator.checked_div(operand)
        }
        Operator::Equals => Some(accumulator),
    };
    result.ok_or(EngineError::ArithmeticOverflow)
}
