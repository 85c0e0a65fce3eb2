//! # Payoff Table
//!
//! Fixed policy; not configurable.
//!
//! | party 0   | party 1   | reduction(0) | reduction(1) |
//! |-----------|-----------|--------------|--------------|
//! | COOPERATE | COOPERATE | 5            | 5            |
//! | COOPERATE | BETRAY    | 2            | 3            |
//! | BETRAY    | COOPERATE | 3            | 2            |
//! | BETRAY    | BETRAY    | 1            | 1            |

use dilemma_core::{Decision, PartyIndex};
use serde::{Deserialize, Serialize};

/// Sentence reductions, in years, granted to each party at resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payoff {
    /// Reduction for party 0.
    pub first: u32,
    /// Reduction for party 1.
    pub second: u32,
}

impl Payoff {
    /// The reduction owed to `party`.
    pub fn for_party(&self, party: PartyIndex) -> u32 {
        if party == PartyIndex::FIRST {
            self.first
        } else {
            self.second
        }
    }
}

/// Look up the reductions for a pair of decisions.
pub fn payoff(first: Decision, second: Decision) -> Payoff {
    let (first, second) = match (first, second) {
        (Decision::Cooperate, Decision::Cooperate) => (5, 5),
        (Decision::Cooperate, Decision::Betray) => (2, 3),
        (Decision::Betray, Decision::Cooperate) => (3, 2),
        (Decision::Betray, Decision::Betray) => (1, 1),
    };
    Payoff { first, second }
}
