use thiserror::Error;

/// Conditions that send the calculator down the error path.
///
/// None of these escape [`Calculator::accept`](crate::Calculator::accept):
/// the engine logs the error, resets and shows the error marker instead.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EngineError {
    /// The key is not part of the calculator's alphabet.
    #[error("unrecognized input '{0}'")]
    UnrecognizedInput(String),

    /// A second `.` was typed for the same term.
    #[error("second decimal point in one term")]
    RepeatedDecimalPoint,

    /// `/` was applied with a zero divisor.
    #[error("divide by zero")]
    DivideByZero,

    /// A value left the range the decimal type can hold.
    #[error("arithmetic overflow")]
    ArithmeticOverflow,
}

impl EngineError {
    /// Stable tag for structured log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnrecognizedInput(_) => "unrecognized_input",
            Self::RepeatedDecimalPoint => "repeated_decimal_point",
            Self::DivideByZero => "divide_by_zero",
            Self::ArithmeticOverflow => "arithmetic_overflow",
        }
    }
}
