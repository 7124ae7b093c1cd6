pub mod engine;
pub mod models;

pub use engine::{Calculator, ConfigError, DisplayListener, EngineConfig, EngineError};
pub use models::*;
