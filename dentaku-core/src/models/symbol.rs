use serde::{Deserialize, Serialize};

use crate::engine::EngineError;
use crate::models::Operator;

/// The three groups a key can fall into before dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SymbolCategory {
    Special,
    Operator,
    Digit,
}

/// A single recognized calculator key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Symbol {
    /// `c`
    Clear,
    /// `.`
    DecimalPoint,
    Operator(Operator),
    /// `0` to `9`, stored as its numeric value.
    Digit(u8),
}

impl Symbol {
    /// Classifies a raw key string.
    ///
    /// Keys are single characters from `0-9 . + - * / = c`. Anything else,
    /// including the empty string or a multi-character string, is rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// use dentaku_core::{EngineError, Operator, Symbol};
    ///
    /// assert_eq!(Symbol::classify("7"), Ok(Symbol::Digit(7)));
    /// assert_eq!(Symbol::classify("*"), Ok(Symbol::Operator(Operator::Multiply)));
    /// assert_eq!(
    ///     Symbol::classify("%"),
    ///     Err(EngineError::UnrecognizedInput("%".to_string()))
    /// );
    /// ```
    pub fn classify(s: &str) -> Result<Self, EngineError> {
        match s {
            "c" => Ok(Self::Clear),
            "." => Ok(Self::DecimalPoint),
            _ => {
                if let Some(op) = Operator::parse(s) {
                    return Ok(Self::Operator(op));
                }
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch @ '0'..='9'), None) => Ok(Self::Digit(ch as u8 - b'0')),
                    _ => Err(EngineError::UnrecognizedInput(s.to_string())),
                }
            }
        }
    }

    pub fn category(&self) -> SymbolCategory {
        match self {
            Self::Clear | Self::DecimalPoint => SymbolCategory::Special,
            Self::Operator(_) => SymbolCategory::Operator,
            Self::Digit(_) => SymbolCategory::Digit,
        }
    }

    /// Canonical key text, as it would be typed.
    pub fn as_str(&self) -> &'static str {
        const DIGITS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];
        match self {
            Self::Clear => "c",
            Self::DecimalPoint => ".",
            Self::Operator(op) => op.as_str(),
            Self::Digit(d) => DIGITS[usize::from(*d % 10)],
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    // =========================================================================
    // classify tests
    // =========================================================================

    #[test]
    fn classify_specials() {
        assert_eq!(Symbol::classify("c"), Ok(Symbol::Clear));
        assert_eq!(Symbol::classify("."), Ok(Symbol::DecimalPoint));
    }

    #[test]
    fn classify_operators() {
        assert_eq!(
            Symbol::classify("+"),
            Ok(Symbol::Operator(Operator::Add))
        );
        assert_eq!(
            Symbol::classify("-"),
            Ok(Symbol::Operator(Operator::Subtract))
        );
        assert_eq!(
            Symbol::classify("/"),
            Ok(Symbol::Operator(Operator::Divide))
        );
        assert_eq!(
            Symbol::classify("="),
            Ok(Symbol::Operator(Operator::Equals))
        );
    }

    #[test]
    fn classify_all_digits() {
        for d in 0..=9u8 {
            let key = d.to_string();
            assert_eq!(Symbol::classify(&key), Ok(Symbol::Digit(d)));
        }
    }

    #[test]
    fn classify_rejects_uppercase_clear() {
        assert_eq!(
            Symbol::classify("C"),
            Err(EngineError::UnrecognizedInput("C".to_string()))
        );
    }

    #[test]
    fn classify_rejects_empty_and_multi_character_keys() {
        assert_eq!(
            Symbol::classify(""),
            Err(EngineError::UnrecognizedInput(String::new()))
        );
        assert_eq!(
            Symbol::classify("12"),
            Err(EngineError::UnrecognizedInput("12".to_string()))
        );
        assert_eq!(
            Symbol::classify("c."),
            Err(EngineError::UnrecognizedInput("c.".to_string()))
        );
    }

    #[test]
    fn classify_rejects_non_ascii_digits() {
        // Full-width seven
        assert!(Symbol::classify("\u{FF17}").is_err());
    }

    // =========================================================================
    // category / as_str tests
    // =========================================================================

    #[test]
    fn category_groups_keys() {
        assert_eq!(Symbol::Clear.category(), SymbolCategory::Special);
        assert_eq!(Symbol::DecimalPoint.category(), SymbolCategory::Special);
        assert_eq!(
            Symbol::Operator(Operator::Multiply).category(),
            SymbolCategory::Operator
        );
        assert_eq!(Symbol::Digit(4).category(), SymbolCategory::Digit);
    }

    #[test]
    fn as_str_matches_typed_key() {
        for key in ["c", ".", "+", "-", "*", "/", "=", "0", "5", "9"] {
            let symbol = Symbol::classify(key).unwrap();
            assert_eq!(symbol.as_str(), key);
        }
    }
}
