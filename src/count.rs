//! Participant count parsing and validation
//!
//! The participant count is the only value that crosses from the entry form
//! into the display grid. It must be strictly positive; large counts are
//! accepted but flagged because the grid gets cramped.

use std::{fmt::Display, num::NonZeroUsize, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A strictly positive number of players
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ParticipantCount(NonZeroUsize);

impl ParticipantCount {
    /// Creates a count, returning `None` for zero
    pub fn new(count: usize) -> Option<Self> {
        NonZeroUsize::new(count).map(Self)
    }

    /// Returns the count as a plain integer
    pub fn get(self) -> usize {
        self.0.get()
    }

    /// Checks the count against the layout warning threshold
    ///
    /// # Returns
    ///
    /// A warning if the count exceeds `threshold`, `None` otherwise
    pub fn warning(self, threshold: usize) -> Option<LargeCountWarning> {
        (self.get() > threshold).then_some(LargeCountWarning {
            count: self.get(),
            threshold,
        })
    }
}

impl Display for ParticipantCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Errors that block a submitted count
#[derive(Error, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidCount {
    /// Nothing was entered
    #[error("please enter the number of players")]
    Empty,
    /// The input is not an integer
    #[error("please enter a valid number of players")]
    NotANumber,
    /// The input is zero or negative
    #[error("the number of players must be at least 1")]
    NotPositive,
}

/// Non-blocking advisory for counts that may not lay out well
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LargeCountWarning {
    /// The accepted count
    pub count: usize,
    /// The threshold it exceeded
    pub threshold: usize,
}

impl Display for LargeCountWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} players may not fit well on screen, at most {} is recommended",
            self.count, self.threshold
        )
    }
}

impl FromStr for ParticipantCount {
    type Err = InvalidCount;

    /// Parses a count from free text
    ///
    /// Surrounding whitespace and a leading sign are accepted. Anything that
    /// is not an integer is rejected, as is any value below one.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCount`] describing why the text was rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(InvalidCount::Empty);
        }

        let digits = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidCount::NotANumber);
        }

        if trimmed.starts_with('-') {
            return Err(InvalidCount::NotPositive);
        }

        // all digits, so the only failure left is overflow
        let value: usize = digits.parse().map_err(|_| InvalidCount::NotANumber)?;

        Self::new(value).ok_or(InvalidCount::NotPositive)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_number() {
        assert_eq!("5".parse::<ParticipantCount>().unwrap().get(), 5);
    }

    #[test]
    fn test_parse_trims_whitespace_and_plus() {
        assert_eq!("  12 ".parse::<ParticipantCount>().unwrap().get(), 12);
        assert_eq!("+7".parse::<ParticipantCount>().unwrap().get(), 7);
        assert_eq!("007".parse::<ParticipantCount>().unwrap().get(), 7);
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!("".parse::<ParticipantCount>(), Err(InvalidCount::Empty));
        assert_eq!("   ".parse::<ParticipantCount>(), Err(InvalidCount::Empty));
    }

    #[test]
    fn test_parse_not_a_number() {
        for input in ["abc", "3.5", "5abc", "+", "-", "1 2", "0x10"] {
            assert_eq!(
                input.parse::<ParticipantCount>(),
                Err(InvalidCount::NotANumber),
                "{input}"
            );
        }
    }

    #[test]
    fn test_parse_not_positive() {
        assert_eq!("0".parse::<ParticipantCount>(), Err(InvalidCount::NotPositive));
        assert_eq!("-3".parse::<ParticipantCount>(), Err(InvalidCount::NotPositive));
        assert_eq!("-0".parse::<ParticipantCount>(), Err(InvalidCount::NotPositive));
    }

    #[test]
    fn test_parse_overflow_is_not_a_number() {
        let huge = "9".repeat(40);
        assert_eq!(huge.parse::<ParticipantCount>(), Err(InvalidCount::NotANumber));
    }

    #[test]
    fn test_new_rejects_zero() {
        assert!(ParticipantCount::new(0).is_none());
        assert_eq!(ParticipantCount::new(1).unwrap().get(), 1);
    }

    #[test]
    fn test_warning_above_threshold_only() {
        let at = ParticipantCount::new(26).unwrap();
        let above = ParticipantCount::new(27).unwrap();

        assert!(at.warning(26).is_none());
        assert_eq!(
            above.warning(26),
            Some(LargeCountWarning {
                count: 27,
                threshold: 26
            })
        );
    }

    #[test]
    fn test_warning_message_mentions_counts() {
        let warning = ParticipantCount::new(40).unwrap().warning(26).unwrap();
        let text = warning.to_string();

        assert!(text.contains("40"));
        assert!(text.contains("26"));
    }
}
