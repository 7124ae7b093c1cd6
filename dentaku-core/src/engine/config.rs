use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Marker shown on the display after any error.
pub const DEFAULT_ERROR_MARKER: &str = "Err";

/// Errors raised while validating an [`EngineConfig`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The error marker must contain visible text.
    #[error("error marker must not be empty")]
    EmptyErrorMarker,

    /// The error marker must not read as a number.
    #[error("error marker '{0}' could be mistaken for a number")]
    NumericErrorMarker(String),
}

/// Tunable engine behaviour.
///
/// # Example
///
/// ```
/// use dentaku_core::{Calculator, EngineConfig};
///
/// let config = EngineConfig {
///     error_marker: "E".to_string(),
/// };
///
/// let mut calc = Calculator::with_config(config).unwrap();
/// assert_eq!(calc.press_keys("1/0="), "E");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Text placed on the display when the error path runs.
    pub error_marker: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            error_marker: DEFAULT_ERROR_MARKER.to_string(),
        }
    }
}

impl EngineConfig {
    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if:
    /// - `error_marker` is empty or whitespace only
    /// - `error_marker` parses as a decimal number
    pub fn validate(&self) -> Result<(), ConfigError> {
        let marker = self.error_marker.trim();
        if marker.is_empty() {
            return Err(ConfigError::EmptyErrorMarker);
        }
        if marker.parse::<Decimal>().is_ok() {
            return Err(ConfigError::NumericErrorMarker(
                self.error_marker.clone(),
            ));
        }
        Ok(())
    }
}
