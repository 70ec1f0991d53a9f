//! Error types for palette parsing and validation

use std::fmt;
use std::num::ParseIntError;

/// Error returned when a hex colour string cannot be parsed.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseColorError {
    /// Not 3 or 6 hex digits after stripping '#'
    InvalidLength,
    /// Invalid hexadecimal character
    InvalidHex(ParseIntError),
}

impl From<ParseIntError> for ParseColorError {
    fn from(err: ParseIntError) -> Self {
        ParseColorError::InvalidHex(err)
    }
}

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseColorError::InvalidLength => {
                write!(f, "invalid hex color length (expected 3 or 6 characters)")
            }
            ParseColorError::InvalidHex(err) => write!(f, "invalid hex character: {err}"),
        }
    }
}

impl std::error::Error for ParseColorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseColorError::InvalidHex(err) => Some(err),
            ParseColorError::InvalidLength => None,
        }
    }
}

/// Error returned when a palette cannot be built.
#[derive(Debug, Clone, PartialEq)]
pub enum PaletteError {
    /// A palette must have exactly four colours
    WrongColourCount {
        /// Number of colours supplied
        found: usize,
    },
    /// A colour string failed to parse
    ParseColor {
        /// Position of the offending colour
        index: usize,
        source: ParseColorError,
    },
}

impl fmt::Display for PaletteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaletteError::WrongColourCount { found } => {
                write!(f, "a palette needs exactly 4 colours, got {found}")
            }
            PaletteError::ParseColor { index, source } => {
                write!(f, "invalid colour at index {index}: {source}")
            }
        }
    }
}

impl std::error::Error for PaletteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PaletteError::ParseColor { source, .. } => Some(source),
            PaletteError::WrongColourCount { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_display() {
        assert_eq!(
            PaletteError::WrongColourCount { found: 3 }.to_string(),
            "a palette needs exactly 4 colours, got 3"
        );
        assert_eq!(
            PaletteError::ParseColor {
                index: 2,
                source: ParseColorError::InvalidLength
            }
            .to_string(),
            "invalid colour at index 2: invalid hex color length (expected 3 or 6 characters)"
        );
    }

    #[test]
    fn test_source_chain() {
        let err = PaletteError::ParseColor {
            index: 0,
            source: ParseColorError::InvalidLength,
        };
        assert!(err.source().is_some());
        assert!(PaletteError::WrongColourCount { found: 5 }.source().is_none());
    }
}
