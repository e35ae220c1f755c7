//! Pure validation of raw player input.
//!
//! The retry loop belongs to whoever reads the input; these functions only
//! classify one line at a time so they can be tested with canned strings.

use thiserror::Error;

use crate::Action;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation<T> {
    Accepted(T),
    Rejected(Rejection),
}

impl<T> Validation<T> {
    pub fn accepted(self) -> Option<T> {
        match self {
            Validation::Accepted(value) => Some(value),
            Validation::Rejected(_) => None,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("a bet must be a whole number of chips")]
    NotANumber,
    #[error("you only have {available} chips")]
    InsufficientChips { available: u64 },
    #[error("please choose 1 (hit) or 2 (stand)")]
    UnknownAction,
    #[error("please answer y or n")]
    UnknownAnswer,
}

pub fn validate_bet(raw: &str, available: u64) -> Validation<u64> {
    let Ok(amount) = raw.trim().parse::<u64>() else {
        return Validation::Rejected(Rejection::NotANumber);
    };
    if amount > available {
        return Validation::Rejected(Rejection::InsufficientChips { available });
    }
    Validation::Accepted(amount)
}

pub fn parse_action(raw: &str) -> Validation<Action> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "h" | "hit" => Validation::Accepted(Action::Hit),
        "2" | "s" | "stand" => Validation::Accepted(Action::Stand),
        _ => Validation::Rejected(Rejection::UnknownAction),
    }
}

/// Between rounds: only the first letter counts, and empty input means
/// keep playing.
pub fn parse_continue(raw: &str) -> Validation<bool> {
    match raw.trim().chars().next().map(|c| c.to_ascii_lowercase()) {
        None | Some('y') => Validation::Accepted(true),
        Some('n') => Validation::Accepted(false),
        Some(_) => Validation::Rejected(Rejection::UnknownAnswer),
    }
}
