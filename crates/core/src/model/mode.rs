use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Which question sequence a session runs over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizMode {
    /// Untimed run over the practice sequence.
    #[default]
    Practice,
    /// 90-second sprint over the timed sequence.
    Timed,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown quiz mode: {0}")]
pub struct ParseModeError(String);

impl QuizMode {
    pub const ALL: [QuizMode; 2] = [QuizMode::Practice, QuizMode::Timed];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            QuizMode::Practice => "practice",
            QuizMode::Timed => "timed",
        }
    }

    #[must_use]
    pub fn is_timed(self) -> bool {
        matches!(self, QuizMode::Timed)
    }
}

impl fmt::Display for QuizMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuizMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "practice" | "normal" => Ok(QuizMode::Practice),
            "timed" | "sprint" => Ok(QuizMode::Timed),
            other => Err(ParseModeError(other.to_string())),
        }
    }
}
