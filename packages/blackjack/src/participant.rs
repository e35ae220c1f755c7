use serde::{Deserialize, Serialize};

use crate::{Card, Hand, Wallet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Dealer,
    Player,
}

/// Anyone seated at the table: holds a name and a hand that is reset every
/// round. Only `Player` carries a wallet.
pub trait Participant {
    fn name(&self) -> &str;
    fn role(&self) -> Role;
    fn hand(&self) -> &Hand;
    fn hand_mut(&mut self) -> &mut Hand;

    fn reset_hand(&mut self) {
        *self.hand_mut() = Hand::new();
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    name: String,
    hand: Hand,
    wallet: Wallet,
}

impl Player {
    pub fn new(name: impl Into<String>, chips: u64) -> Self {
        Self {
            name: name.into(),
            hand: Hand::new(),
            wallet: Wallet::new(chips),
        }
    }

    pub fn wallet(&self) -> &Wallet {
        &self.wallet
    }

    pub fn wallet_mut(&mut self) -> &mut Wallet {
        &mut self.wallet
    }

    pub fn chips(&self) -> u64 {
        self.wallet.total()
    }
}

impl Participant for Player {
    fn name(&self) -> &str {
        &self.name
    }

    fn role(&self) -> Role {
        Role::Player
    }

    fn hand(&self) -> &Hand {
        &self.hand
    }

    fn hand_mut(&mut self) -> &mut Hand {
        &mut self.hand
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dealer {
    name: String,
    hand: Hand,
}

impl Dealer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hand: Hand::new(),
        }
    }

    /// Cards the table may see before the dealer's turn: everything but the
    /// first (hole) card.
    pub fn up_cards(&self) -> &[Card] {
        self.hand.cards().get(1..).unwrap_or(&[])
    }
}

impl Default for Dealer {
    fn default() -> Self {
        Self::new("Dealer")
    }
}

impl Participant for Dealer {
    fn name(&self) -> &str {
        &self.name
    }

    fn role(&self) -> Role {
        Role::Dealer
    }

    fn hand(&self) -> &Hand {
        &self.hand
    }

    fn hand_mut(&mut self) -> &mut Hand {
        &mut self.hand
    }
}
