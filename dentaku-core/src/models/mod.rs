mod engine_state;
mod operator;
mod symbol;

pub use engine_state::EngineState;
pub use operator::Operator;
pub use symbol::{Symbol, SymbolCategory};
