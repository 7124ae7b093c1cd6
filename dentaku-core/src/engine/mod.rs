//! Key handling and arithmetic for the calculator.
//!
//! [`Calculator`] is the entry point. The helpers in [`common`] carry the
//! checked decimal arithmetic and display formatting it relies on.

mod calculator;
pub mod common;
mod config;
mod error;
mod observer;

pub use calculator::Calculator;
pub use config::{ConfigError, DEFAULT_ERROR_MARKER, EngineConfig};
pub use error::EngineError;
pub use observer::DisplayListener;
