//! QR error-correction levels.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error-correction level used when encoding the symbol.
///
/// Higher levels survive more obscured modules (e.g. a logo pasted over the
/// center) at the cost of a larger symbol.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCorrection {
    /// ~7% recovery
    Low,
    /// ~15% recovery
    Medium,
    /// ~25% recovery
    Quartile,
    /// ~30% recovery
    #[default]
    High,
}

impl ErrorCorrection {
    pub fn letter(&self) -> char {
        match self {
            ErrorCorrection::Low => 'L',
            ErrorCorrection::Medium => 'M',
            ErrorCorrection::Quartile => 'Q',
            ErrorCorrection::High => 'H',
        }
    }
}

impl FromStr for ErrorCorrection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "l" | "low" => Ok(ErrorCorrection::Low),
            "m" | "medium" => Ok(ErrorCorrection::Medium),
            "q" | "quartile" => Ok(ErrorCorrection::Quartile),
            "h" | "high" => Ok(ErrorCorrection::High),
            other => Err(format!(
                "unknown error-correction level '{}' (expected L, M, Q or H)",
                other
            )),
        }
    }
}

impl fmt::Display for ErrorCorrection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_letters_and_names() {
        assert_eq!("L".parse::<ErrorCorrection>().unwrap(), ErrorCorrection::Low);
        assert_eq!("medium".parse::<ErrorCorrection>().unwrap(), ErrorCorrection::Medium);
        assert_eq!(" q ".parse::<ErrorCorrection>().unwrap(), ErrorCorrection::Quartile);
        assert_eq!("High".parse::<ErrorCorrection>().unwrap(), ErrorCorrection::High);
        assert!("x".parse::<ErrorCorrection>().is_err());
    }

    #[test]
    fn test_default_is_high() {
        assert_eq!(ErrorCorrection::default(), ErrorCorrection::High);
        assert_eq!(ErrorCorrection::default().to_string(), "H");
    }
}
