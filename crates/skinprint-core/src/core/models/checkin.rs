use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Highest severity a check-in slider can record (0 none, 1 mild, 2 moderate, 3 severe).
pub const MAX_SEVERITY: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Concern {
    Breakout,
    Irritation,
    Dryness,
    Redness,
}

impl Concern {
    pub const ALL: [Concern; 4] = [
        Concern::Breakout,
        Concern::Irritation,
        Concern::Dryness,
        Concern::Redness,
    ];
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid concern: '{0}'. Expected breakout, irritation, dryness or redness.")]
pub struct ParseConcernError(pub String);

impl FromStr for Concern {
    type Err = ParseConcernError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "breakout" | "breakouts" => Ok(Concern::Breakout),
            "irritation" => Ok(Concern::Irritation),
            "dryness" => Ok(Concern::Dryness),
            "redness" => Ok(Concern::Redness),
            _ => Err(ParseConcernError(s.to_string())),
        }
    }
}

impl fmt::Display for Concern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Concern::Breakout => "breakout",
                Concern::Irritation => "irritation",
                Concern::Dryness => "dryness",
                Concern::Redness => "redness",
            }
        )
    }
}

/// A daily skin check-in. Missing scores in stored records read as zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Checkin {
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub breakout: u8,
    #[serde(default)]
    pub irritation: u8,
    #[serde(default)]
    pub dryness: u8,
    #[serde(default)]
    pub redness: u8,
    #[serde(default)]
    pub tried_something_new: bool,
}

impl Checkin {
    pub fn new(date: DateTime<Utc>) -> Self {
        Self {
            date,
            breakout: 0,
            irritation: 0,
            dryness: 0,
            redness: 0,
            tried_something_new: false,
        }
    }

    pub fn score(&self, concern: Concern) -> u8 {
        match concern {
            Concern::Breakout => self.breakout,
            Concern::Irritation => self.irritation,
            Concern::Dryness => self.dryness,
            Concern::Redness => self.redness,
        }
    }

    /// Sets a score, clamped to [`MAX_SEVERITY`].
    pub fn with_score(mut self, concern: Concern, score: u8) -> Self {
        let score = score.min(MAX_SEVERITY);
        match concern {
            Concern::Breakout => self.breakout = score,
            Concern::Irritation => self.irritation = score,
            Concern::Dryness => self.dryness = score,
            Concern::Redness => self.redness = score,
        }
        self
    }

    /// A reaction is any concern scored above mild.
    pub fn is_reaction(&self) -> bool {
        Concern::ALL.iter().any(|&concern| self.score(concern) > 1)
    }
}
