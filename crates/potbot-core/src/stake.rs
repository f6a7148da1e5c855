//! Stake argument schema and rake math.

use std::str::FromStr;

/// Fraction of each stake shown as the house fee. Display only; nothing is transferred.
pub const RAKE_RATE: f64 = 0.20;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StakeError {
    #[error("missing stake amount")]
    Missing,

    #[error("stake amount is not a number: {0}")]
    NotANumber(String),

    #[error("stake amount must be positive")]
    NotPositive,
}

/// A validated, finite, strictly positive stake amount.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct StakeAmount(f64);

impl StakeAmount {
    pub fn new(value: f64) -> Result<Self, StakeError> {
        if !value.is_finite() {
            return Err(StakeError::NotANumber(value.to_string()));
        }
        if value <= 0.0 {
            return Err(StakeError::NotPositive);
        }
        Ok(Self(value))
    }

    /// Parse the first whitespace-separated token of a command's free-text arguments.
    pub fn parse_args(args: &str) -> Result<Self, StakeError> {
        args.split_whitespace()
            .next()
            .ok_or(StakeError::Missing)?
            .parse()
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn rake(self) -> f64 {
        self.0 * RAKE_RATE
    }
}

impl FromStr for StakeAmount {
    type Err = StakeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(StakeError::Missing);
        }
        let value = s
            .parse::<f64>()
            .map_err(|_| StakeError::NotANumber(s.to_string()))?;
        Self::new(value)
    }
}

/// Outcome of a stake: what was added, the displayed rake, and the new pot total.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StakeReceipt {
    pub amount: StakeAmount,
    pub rake: f64,
    pub total: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_first_token() {
        assert_eq!(StakeAmount::parse_args("1.5").unwrap().value(), 1.5);
        assert_eq!(StakeAmount::parse_args("  0.25 sol please").unwrap().value(), 0.25);
        assert_eq!(StakeAmount::parse_args("1e-3").unwrap().value(), 0.001);
    }

    #[test]
    fn rejects_missing() {
        assert_eq!(StakeAmount::parse_args(""), Err(StakeError::Missing));
        assert_eq!(StakeAmount::parse_args("   "), Err(StakeError::Missing));
    }

    #[test]
    fn rejects_non_numeric() {
        for bad in ["abc", "1,5", "$5", "five", "0x10"] {
            assert!(
                matches!(StakeAmount::parse_args(bad), Err(StakeError::NotANumber(_))),
                "{bad}"
            );
        }
    }

    #[test]
    fn rejects_non_finite() {
        for bad in ["NaN", "inf", "-inf", "infinity"] {
            assert!(
                matches!(StakeAmount::parse_args(bad), Err(StakeError::NotANumber(_))),
                "{bad}"
            );
        }
    }

    #[test]
    fn rejects_non_positive() {
        for bad in ["0", "-0", "0.0", "-1", "-0.001"] {
            assert_eq!(StakeAmount::parse_args(bad), Err(StakeError::NotPositive), "{bad}");
        }
    }

    #[test]
    fn rake_is_twenty_percent() {
        let a = StakeAmount::new(2.5).unwrap();
        assert!((a.rake() - 0.5).abs() < 1e-12);
        let a = StakeAmount::new(0.001).unwrap();
        assert!((a.rake() - 0.0002).abs() < 1e-15);
    }
}
