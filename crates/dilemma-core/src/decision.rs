//! # Decision
//!
//! The one-time, irrevocable choice a party makes.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A party's choice between betraying and cooperating with the other party.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    /// Testify against the other party.
    Betray,
    /// Stay silent.
    Cooperate,
}

impl Decision {
    /// The canonical wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Betray => "BETRAY",
            Self::Cooperate => "COOPERATE",
        }
    }

    /// The betrayal flag recorded on a party.
    pub fn betrayed(&self) -> bool {
        matches!(self, Self::Betray)
    }
}

impl FromStr for Decision {
    type Err = ValidationError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        if token.eq_ignore_ascii_case("BETRAY") {
            Ok(Self::Betray)
        } else if token.eq_ignore_ascii_case("COOPERATE") {
            Ok(Self::Cooperate)
        } else {
            Err(ValidationError::UnknownDecision(s.to_string()))
        }
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
