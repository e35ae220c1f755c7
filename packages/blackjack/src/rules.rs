use serde::{Deserialize, Serialize};

use crate::hand::BLACKJACK;
use crate::TableError;

/// Table configuration. `Default` is the reference house: 100 starting chips,
/// dealer draws through 17, at most four players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRules {
    /// Chips each player sits down with
    pub starting_chips: u64,

    /// Dealer keeps drawing while its score is at or below this value.
    /// The house rule hits on 17 itself, hard or soft.
    pub dealer_hits_through: u16,

    /// Maximum players per session; keeps a round within one deck
    pub max_players: usize,
}

impl Default for TableRules {
    fn default() -> Self {
        Self {
            starting_chips: 100,
            dealer_hits_through: 17,
            max_players: 4,
        }
    }
}

impl TableRules {
    pub fn validate(&self) -> Result<(), TableError> {
        if self.starting_chips == 0 {
            return Err(TableError::InvalidRules("starting chips must be positive"));
        }
        if self.dealer_hits_through > BLACKJACK {
            return Err(TableError::InvalidRules("dealer cutoff cannot exceed 21"));
        }
        if self.max_players == 0 {
            return Err(TableError::InvalidRules("table needs at least one seat"));
        }
        Ok(())
    }

    pub fn dealer_should_hit(&self, score: u16) -> bool {
        score <= self.dealer_hits_through
    }

    /// Check a roster of player names against the seat limit.
    pub fn validate_roster<S: AsRef<str>>(&self, names: &[S]) -> Result<(), TableError> {
        if names.is_empty() || names.len() > self.max_players {
            return Err(TableError::InvalidRoster(format!(
                "number of players must be between 1 and {}",
                self.max_players
            )));
        }
        for (i, name) in names.iter().enumerate() {
            let name = name.as_ref();
            if name.trim().is_empty() {
                return Err(TableError::InvalidRoster("player name cannot be empty".into()));
            }
            if names[..i].iter().any(|other| other.as_ref() == name) {
                return Err(TableError::InvalidRoster(format!("duplicate player name '{name}'")));
            }
        }
        Ok(())
    }
}
