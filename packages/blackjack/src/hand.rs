use serde::{Deserialize, Serialize};

use crate::Card;

pub const BLACKJACK: u16 = 21;

/// Per-round result for one player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandOutcome {
    Win,
    Lose,
    Tie,
    /// Went over 21 while drawing; charged on the spot and never compared
    /// against the dealer.
    BustedDuringTurn,
}

/// Normalized score for a raw total holding `aces` aces counted as 11.
///
/// Returns the score and how many aces still count as 11 afterwards. Each
/// step converts one ace from 11 to 1, and only while the total is over 21.
pub fn normalize_score(raw_total: u16, aces: u8) -> (u16, u8) {
    let mut total = raw_total;
    let mut soft_aces = aces;
    while total > BLACKJACK && soft_aces > 0 {
        total -= 10;
        soft_aces -= 1;
    }
    (total, soft_aces)
}

/// Cards received by one participant during one round.
///
/// `raw_total` and `aces` are maintained incrementally by `add_card`; the
/// normalized score is derived from them on demand and never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Card>,
    raw_total: u16,
    aces: u8,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_card(&mut self, card: Card) {
        self.raw_total += card.value() as u16;
        if card.is_ace() {
            self.aces += 1;
        }
        self.cards.push(card);
    }

    pub fn score(&self) -> u16 {
        normalize_score(self.raw_total, self.aces).0
    }

    pub fn is_busted(&self) -> bool {
        self.score() > BLACKJACK
    }

    /// At least one ace is still counted as 11.
    pub fn is_soft(&self) -> bool {
        normalize_score(self.raw_total, self.aces).1 > 0
    }

    pub fn is_natural(&self) -> bool {
        self.cards.len() == 2 && self.score() == BLACKJACK
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn raw_total(&self) -> u16 {
        self.raw_total
    }

    pub fn aces(&self) -> u8 {
        self.aces
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
