use serde::{Deserialize, Serialize};

use crate::TableError;

/// Chip ledger for one player. `bet <= total` holds at all times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    total: u64,
    bet: u64,
}

impl Wallet {
    pub fn new(total: u64) -> Self {
        Self { total, bet: 0 }
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn bet(&self) -> u64 {
        self.bet
    }

    pub fn is_broke(&self) -> bool {
        self.total == 0
    }

    /// Stake `amount` for the current round. A rejected bet leaves the
    /// wallet untouched.
    pub fn place_bet(&mut self, amount: u64) -> Result<(), TableError> {
        if amount > self.total {
            return Err(TableError::InsufficientChips {
                requested: amount,
                available: self.total,
            });
        }
        self.bet = amount;
        Ok(())
    }

    /// Returns the amount won.
    pub fn win_bet(&mut self) -> u64 {
        let won = self.bet;
        self.total += won;
        self.bet = 0;
        won
    }

    /// Returns the amount lost.
    pub fn lose_bet(&mut self) -> u64 {
        let lost = self.bet;
        // bet was checked against total at placement and total has not moved since
        self.total -= lost;
        self.bet = 0;
        lost
    }

    pub fn tie_bet(&mut self) {
        self.bet = 0;
    }
}
