//! The key-by-key calculator engine.
//!
//! Keys arrive one at a time through [`Calculator::accept`]. Operators are
//! evaluated one step behind their entry: typing an operator applies the
//! *previously* pending operator to the accumulator and the current term,
//! then parks the new operator until the next one (or `=`) arrives. The
//! result is strict left-to-right evaluation with no precedence.
//!
//! # Key Handling
//!
//! | Key | Effect |
//! |-----|--------|
//! | `0`-`9` | Append a digit to the term (integer or fractional place) |
//! | `.` | Switch the term to fractional entry |
//! | `-` on an empty term | Mark the term negative |
//! | `+ - * / =` | Apply the pending operator, then remember this one |
//! | `c` | Reset everything |
//!
//! A digit typed straight after `=` starts a fresh calculation.
//!
//! # Example
//!
//! ```
//! use dentaku_core::Calculator;
//!
//! let mut calc = Calculator::new();
//!
//! assert_eq!(calc.press_keys("4*2+1="), "9");
//! assert_eq!(calc.press_keys("c-5="), "-5");
//! assert_eq!(calc.press_keys("9/0="), "Err");
//! assert_eq!(calc.accept("7"), "7");
//! ```

use tracing::{debug, warn};

use crate::engine::common::{
    append_fraction_digit, apply_operator, format_decimal, format_entry, shift_in_digit,
};
use crate::engine::observer::{DisplayListener, Listeners};
use crate::engine::{ConfigError, EngineConfig, EngineError};
use crate::models::{EngineState, Operator, Symbol};

/// Which value the display is rendered from after a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Readout {
    /// The term being typed, with its sign.
    Entry,
    /// The running result.
    Accumulator,
}

/// A four-function calculator driven by single-key input.
///
/// Each instance owns its state outright; independent calculators need
/// independent instances.
#[derive(Debug)]
pub struct Calculator {
    state: EngineState,
    display: String,
    config: EngineConfig,
    last_error: Option<EngineError>,
    listeners: Listeners,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

impl Calculator {
    /// Creates a calculator in the reset state with the default configuration.
    pub fn new() -> Self {
        Self::from_valid_config(EngineConfig::default())
    }

    /// Creates a calculator with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration fails validation.
    pub fn with_config(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: EngineConfig) -> Self {
        let mut calc = Self {
            state: EngineState::default(),
            display: String::new(),
            config,
            last_error: None,
            listeners: Listeners::default(),
        };
        calc.refresh_display(Readout::Entry);
        calc
    }

    /// Feeds one key and returns the display text afterwards.
    ///
    /// Invalid keys and illegal arithmetic never surface as errors here:
    /// the engine logs the reason, resets, and shows the error marker. The
    /// reason stays available from [`Calculator::last_error`] until the next
    /// key is handled successfully.
    pub fn accept(
        &mut self,
        symbol: &str,
    ) -> &str {
        self.notifying(|calc| {
            let outcome = Symbol::classify(symbol).and_then(|s| calc.dispatch(s));
            match outcome {
                Ok(readout) => {
                    calc.last_error = None;
                    if let Some(readout) = readout {
                        calc.refresh_display(readout);
                    }
                }
                Err(error) => calc.fail(error),
            }
            debug!(display = %calc.display, "display refreshed");
        });
        &self.display
    }

    /// Feeds every key from `symbols` in order and returns the final display.
    pub fn accept_all<I, S>(
        &mut self,
        symbols: I,
    ) -> &str
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for symbol in symbols {
            self.accept(symbol.as_ref());
        }
        &self.display
    }

    /// Feeds each character of `keys` as its own key. Whitespace is skipped.
    pub fn press_keys(
        &mut self,
        keys: &str,
    ) -> &str {
        let mut buf = [0u8; 4];
        for ch in keys.chars().filter(|c| !c.is_whitespace()) {
            self.accept(ch.encode_utf8(&mut buf));
        }
        &self.display
    }

    /// Returns the engine to its initial state, as if `c` had been typed.
    pub fn reset(&mut self) {
        self.notifying(|calc| {
            calc.last_error = None;
            calc.reset_state();
            calc.refresh_display(Readout::Entry);
        });
    }

    /// Current display text.
    pub fn display_text(&self) -> &str {
        &self.display
    }

    /// Read-only view of the internal state.
    pub fn state(&self) -> &EngineState {
        &self.state
    }

    /// Reason for the most recent error, cleared by the next successful key.
    pub fn last_error(&self) -> Option<&EngineError> {
        self.last_error.as_ref()
    }

    /// Configuration the calculator was built with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Registers a listener called whenever the display text changes.
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::{Arc, Mutex};
    /// use dentaku_core::Calculator;
    ///
    /// let seen = Arc::new(Mutex::new(Vec::new()));
    /// let sink = seen.clone();
    ///
    /// let mut calc = Calculator::new();
    /// calc.subscribe(move |text: &str| sink.lock().unwrap().push(text.to_string()));
    /// calc.press_keys("12+");
    ///
    /// // `+` leaves the display at 12, so no third notification
    /// assert_eq!(*seen.lock().unwrap(), vec!["1", "12"]);
    /// ```
    pub fn subscribe<L>(
        &mut self,
        listener: L,
    ) where
        L: DisplayListener + 'static,
    {
        self.listeners.push(Box::new(listener));
        debug!(listeners = self.listeners.len(), "display listener registered");
    }

    /// Runs `f` and notifies listeners once if the display text changed.
    fn notifying<F>(
        &mut self,
        f: F,
    ) where
        F: FnOnce(&mut Self),
    {
        let before = self.display.clone();
        f(self);
        if self.display != before {
            self.listeners.notify(&self.display);
        }
    }

    fn dispatch(
        &mut self,
        symbol: Symbol,
    ) -> Result<Option<Readout>, EngineError> {
        debug!(key = symbol.as_str(), category = ?symbol.category(), "dispatching key");
        match symbol {
            Symbol::Clear => {
                self.reset_state();
                Ok(Some(Readout::Entry))
            }
            Symbol::DecimalPoint => self.begin_fraction().map(|()| None),
            Symbol::Operator(op) => self.enter_operator(op),
            Symbol::Digit(digit) => self.enter_digit(digit).map(Some),
        }
    }

    fn reset_state(&mut self) {
        self.state = EngineState::default();
    }

    /// Switches the current term to fractional entry.
    fn begin_fraction(&mut self) -> Result<(), EngineError> {
        if self.state.fraction_digits != 0 {
            return Err(EngineError::RepeatedDecimalPoint);
        }
        self.state.fraction_digits = 1;
        Ok(())
    }

    /// Folds one digit into the term.
    fn enter_digit(
        &mut self,
        digit: u8,
    ) -> Result<Readout, EngineError> {
        // A digit after `=` starts over
        if self.state.pending_operator == Operator::Equals {
            self.reset_state();
        }

        let state = &mut self.state;
        state.entered_value = if state.fraction_digits == 0 {
            shift_in_digit(state.entered_value, digit)?
        } else {
            let value = append_fraction_digit(state.entered_value, digit, state.fraction_digits)?;
            state.fraction_digits += 1;
            value
        };

        Ok(Readout::Entry)
    }

    /// Applies the pending operator and parks `op` in its place.
    ///
    /// A `-` on an empty term (other than straight after `=`) is the sign of
    /// the next number, not an operator.
    fn enter_operator(
        &mut self,
        op: Operator,
    ) -> Result<Option<Readout>, EngineError> {
        let state = &mut self.state;

        if state.entered_value.is_zero()
            && op == Operator::Subtract
            && state.pending_operator != Operator::Equals
        {
            state.is_negative = true;
            return Ok(None);
        }

        let operand = state.signed_entry();
        state.accumulator = apply_operator(state.pending_operator, state.accumulator, operand)?;
        state.consume_term(op);

        Ok(Some(Readout::Accumulator))
    }

    fn refresh_display(
        &mut self,
        readout: Readout,
    ) {
        self.display = match readout {
            Readout::Entry => format_entry(self.state.entered_value, self.state.is_negative),
            Readout::Accumulator => format_decimal(self.state.accumulator),
        };
    }

    /// Error path: log, reset, show the marker.
    fn fail(
        &mut self,
        error: EngineError,
    ) {
        warn!(kind = error.kind(), reason = %error, "input rejected, calculator reset");
        self.reset_state();
        self.display = self.config.error_marker.clone();
        self.last_error = Some(error);
    }
}
