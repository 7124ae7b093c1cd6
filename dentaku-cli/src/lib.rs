pub mod config;
pub mod logging;
pub mod session;
pub mod tape;

pub use config::CliConfig;
pub use tape::{TapeError, TapeLoader, TapeMismatch, TapeRecord, TapeReport};
