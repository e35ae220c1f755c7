use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("insufficient chips: bet of {requested} exceeds balance of {available}")]
    InsufficientChips { requested: u64, available: u64 },
    /// A round asked for more cards than the deck holds. Never expected with a
    /// valid roster; treat as an internal fault.
    #[error("deck exhausted: no cards left to deal")]
    EmptyDeck,
    #[error("invalid roster: {0}")]
    InvalidRoster(String),
    #[error("invalid rules: {0}")]
    InvalidRules(&'static str),
    #[error("round already finished")]
    RoundFinished,
}
