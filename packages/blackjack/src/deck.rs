use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{Card, TableError};

pub const DECK_SIZE: usize = 52;

/// A single 52-card deck. Dealing pops from the end of `cards`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Fresh, unshuffled deck covering every suit/rank pair exactly once.
    pub fn new() -> Self {
        let cards = (0..DECK_SIZE).filter_map(Card::from_index).collect();
        Self { cards }
    }

    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::new();
        deck.shuffle(rng);
        deck
    }

    /// Deck dealing `cards` in reverse order (last element first). Used to
    /// stack scenarios.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    pub fn deal(&mut self) -> Result<Card, TableError> {
        self.cards.pop().ok_or(TableError::EmptyDeck)
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}
