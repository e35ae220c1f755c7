use blackjack::{Card, HandOutcome, RetireReason, TableEvent};
use crossterm::style::{Color, Stylize};

/// How a line should stand out on the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Good,
    Bad,
    Notice,
    Deal,
}

impl Tone {
    fn color(self) -> Option<Color> {
        match self {
            Tone::Plain => None,
            Tone::Good => Some(Color::Green),
            Tone::Bad => Some(Color::Red),
            Tone::Notice => Some(Color::Magenta),
            Tone::Deal => Some(Color::Cyan),
        }
    }
}

pub fn paint(tone: Tone, text: &str) -> String {
    match tone.color() {
        Some(color) => text.with(color).to_string(),
        None => text.to_string(),
    }
}

pub fn cards(cards: &[Card]) -> String {
    cards
        .iter()
        .map(Card::to_display)
        .collect::<Vec<_>>()
        .join(" ")
}

/// "value 17", "soft 17" or "natural 21".
pub fn value_label(score: u16, soft: bool, natural: bool) -> String {
    if natural {
        format!("natural {score}")
    } else if soft {
        format!("soft {score}")
    } else {
        format!("value {score}")
    }
}

/// Dealer's hand before the reveal: the hole card stays face down.
pub fn hidden_hand(up_cards: &[Card]) -> String {
    let mut shown = vec!["[hidden]".to_string()];
    shown.extend(up_cards.iter().map(Card::to_display));
    shown.join(" ")
}

pub fn describe(event: &TableEvent, dealer: &str) -> (Tone, String) {
    match event {
        TableEvent::RoundStarted { round } => (Tone::Notice, format!("Starting round {round}.")),
        TableEvent::BetPlaced { player, amount } => {
            (Tone::Good, format!("{player} bets {amount} chips."))
        }
        TableEvent::BetRejected { player, error } => (Tone::Bad, format!("{player}: {error}")),
        TableEvent::CardsDealt {
            player,
            cards: dealt,
            score,
            soft,
            natural,
        } => (
            if *natural { Tone::Good } else { Tone::Plain },
            format!(
                "{player}'s hand: {} ({})",
                cards(dealt),
                value_label(*score, *soft, *natural)
            ),
        ),
        TableEvent::DealerShowing { up_cards } => (
            Tone::Plain,
            format!("{dealer}'s hand: {}", hidden_hand(up_cards)),
        ),
        TableEvent::PlayerHit {
            player,
            card,
            score,
        } => (
            Tone::Deal,
            format!("{player} hits and draws the {} (value {score})", card.long_name()),
        ),
        TableEvent::PlayerStood {
            player,
            score,
            soft,
        } => (
            Tone::Plain,
            if *soft {
                format!("{player} stands on soft {score}.")
            } else {
                format!("{player} stands on {score}.")
            },
        ),
        TableEvent::PlayerBusted {
            player,
            score,
            lost,
            balance,
        } => (
            Tone::Bad,
            format!("{player} busts with {score} and loses {lost} chips. {player} now has {balance} chips."),
        ),
        TableEvent::DealerRevealed { cards: dealt, score } => (
            Tone::Notice,
            format!("{dealer} reveals: {} (value {score})", cards(dealt)),
        ),
        TableEvent::DealerHit { card, score } => {
            (
                Tone::Deal,
                format!("{dealer} hits and draws the {} (value {score})", card.long_name()),
            )
        }
        TableEvent::DealerStood { score } => (Tone::Plain, format!("{dealer} stands on {score}.")),
        TableEvent::DealerBusted { score } => (Tone::Bad, format!("{dealer} busts with {score}.")),
        TableEvent::AllPlayersBusted => {
            (Tone::Notice, format!("All players busted. {dealer} wins."))
        }
        TableEvent::Settled {
            player,
            outcome,
            score,
            amount,
            balance,
        } => match outcome {
            HandOutcome::Win => (
                Tone::Good,
                format!("{player} wins {amount} chips with {score}. {player} now has {balance} chips."),
            ),
            HandOutcome::Lose | HandOutcome::BustedDuringTurn => (
                Tone::Bad,
                format!("{player} loses {amount} chips with {score}. {player} now has {balance} chips."),
            ),
            HandOutcome::Tie => (
                Tone::Notice,
                format!("{player} ties on {score} and keeps the {amount} chip bet. {player} has {balance} chips."),
            ),
        },
        TableEvent::PlayerRetired { player, reason } => match reason {
            RetireReason::OutOfChips => (
                Tone::Bad,
                format!("{player} will not play the next round: out of chips."),
            ),
            RetireReason::Declined => {
                (Tone::Notice, format!("{player} will not play the next round."))
            }
        },
        TableEvent::SessionOver { rounds } => {
            (Tone::Notice, format!("Session over after {rounds} round(s)."))
        }
    }
}
