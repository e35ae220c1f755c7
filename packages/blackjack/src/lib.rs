mod card;
mod deck;
mod error;
mod hand;
pub mod input;
mod interface;
mod participant;
mod round;
mod rules;
mod session;
mod wallet;

pub use card::{Card, Rank, Suit};
pub use deck::{Deck, DECK_SIZE};
pub use error::TableError;
pub use hand::{normalize_score, Hand, HandOutcome, BLACKJACK};
pub use interface::{RetireReason, Silent, TableEvent, TableInput, TableOutput};
pub use participant::{Dealer, Participant, Player, Role};
pub use round::{Action, PlayerResult, RoundEngine, RoundPhase, RoundReport};
pub use rules::TableRules;
pub use session::{PlayerStanding, Session, SessionSummary};
pub use wallet::Wallet;
