//! Seams to the outside world: where decisions come from and where table
//! announcements go. The engine never touches a terminal.

use serde::{Deserialize, Serialize};

use crate::{Action, Card, Dealer, HandOutcome, Player, TableError};

/// Supplies human decisions. Implementations own any retry-until-valid loop.
pub trait TableInput {
    /// Chips to stake this round. Values above the balance are handed back
    /// through `TableEvent::BetRejected` and asked for again.
    fn bet(&mut self, player: &Player) -> u64;

    /// Hit or stand. `dealer` is passed so the caller can show the up cards.
    fn action(&mut self, player: &Player, dealer: &Dealer) -> Action;

    /// Asked between rounds for every player who still has chips.
    fn keep_playing(&mut self, player: &Player) -> bool;
}

/// Receives announcements as the round progresses. Purely decorative.
pub trait TableOutput {
    fn announce(&mut self, event: &TableEvent);
}

/// Output sink that drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl TableOutput for Silent {
    fn announce(&mut self, _event: &TableEvent) {}
}

/// Collects events in order; handy for tests and replays.
impl TableOutput for Vec<TableEvent> {
    fn announce(&mut self, event: &TableEvent) {
        self.push(event.clone());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RetireReason {
    OutOfChips,
    Declined,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableEvent {
    RoundStarted {
        round: u32,
    },
    BetPlaced {
        player: String,
        amount: u64,
    },
    BetRejected {
        player: String,
        error: TableError,
    },
    /// Opening two cards for a player.
    CardsDealt {
        player: String,
        cards: Vec<Card>,
        score: u16,
        soft: bool,
        natural: bool,
    },
    /// Dealer's opening cards with the hole card withheld.
    DealerShowing {
        up_cards: Vec<Card>,
    },
    PlayerHit {
        player: String,
        card: Card,
        score: u16,
    },
    PlayerStood {
        player: String,
        score: u16,
        soft: bool,
    },
    PlayerBusted {
        player: String,
        score: u16,
        lost: u64,
        balance: u64,
    },
    DealerRevealed {
        cards: Vec<Card>,
        score: u16,
    },
    DealerHit {
        card: Card,
        score: u16,
    },
    DealerStood {
        score: u16,
    },
    DealerBusted {
        score: u16,
    },
    AllPlayersBusted,
    Settled {
        player: String,
        outcome: HandOutcome,
        score: u16,
        amount: u64,
        balance: u64,
    },
    PlayerRetired {
        player: String,
        reason: RetireReason,
    },
    SessionOver {
        rounds: u32,
    },
}
