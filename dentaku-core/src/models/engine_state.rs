use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::Operator;

/// Everything the calculator remembers between keys.
///
/// `EngineState::default()` is the post-reset state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EngineState {
    /// Result of every operator applied so far.
    pub accumulator: Decimal,

    /// Magnitude of the term being typed. The sign lives in `is_negative`.
    pub entered_value: Decimal,

    /// Set by a leading `-` before the first digit of a term.
    pub is_negative: bool,

    /// Decimal place the next fractional digit lands on.
    /// 0 while still typing the integer part.
    pub fraction_digits: u32,

    /// Operator applied when the next operator or `=` arrives.
    pub pending_operator: Operator,
}

impl EngineState {
    /// The current term with its sign applied.
    pub fn signed_entry(&self) -> Decimal {
        if self.is_negative && !self.entered_value.is_zero() {
            -self.entered_value
        } else {
            self.entered_value
        }
    }

    /// Drops the term once it has been folded into the accumulator.
    pub(crate) fn consume_term(
        &mut self,
        next: Operator,
    ) {
        self.entered_value = Decimal::ZERO;
        self.pending_operator = next;
        self.is_negative = false;
        self.fraction_digits = 0;
    }
}
