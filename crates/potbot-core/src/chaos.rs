//! Chaos score: one uniform draw mapped to a cosmetic sentiment label.

use std::{fmt, ops::RangeInclusive};

pub const SCORE_RANGE: RangeInclusive<u8> = 1..=100;
pub const BULLISH_ABOVE: u8 = 70;
pub const BEARISH_BELOW: u8 = 30;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sentiment {
    Bullish,
    Bearish,
    Neutral,
}

impl Sentiment {
    pub fn for_score(score: u8) -> Self {
        if score > BULLISH_ABOVE {
            Self::Bullish
        } else if score < BEARISH_BELOW {
            Self::Bearish
        } else {
            Self::Neutral
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Bullish => "bullish",
            Self::Bearish => "bearish",
            Self::Neutral => "neutral",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Self::Bullish => "🐂",
            Self::Bearish => "🐻",
            Self::Neutral => "😐",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChaosReading {
    pub score: u8,
    pub sentiment: Sentiment,
}

impl ChaosReading {
    pub fn from_score(score: u8) -> Self {
        Self {
            score,
            sentiment: Sentiment::for_score(score),
        }
    }

    pub fn roll() -> Self {
        Self::from_score(rand::random_range(SCORE_RANGE))
    }
}
