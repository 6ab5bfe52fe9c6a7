use thiserror::Error;

use crate::core::Card;

use super::Chips;

/// Everything that can go wrong at the table. All of these raise
/// before any state is touched, so a rejected call never leaves a
/// partially applied action behind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("A bet of {value} is below the table minimum of {min}")]
    InsufficientBet { value: Chips, min: Chips },
    #[error("A raise of {value} is below the minimum raise of {min} and is not an all-in")]
    InsufficientRaise { value: Chips, min: Chips },
    #[error("Cannot check while facing a bet of {to_call}")]
    CheckNotAllowed { to_call: Chips },
    #[error("Combos cannot be revealed before the showdown")]
    ShowdownNotReached,
    #[error("Winners cannot be determined yet")]
    CannotParseWinners,
    #[error("Seat {0} is already taken")]
    SeatTaken(usize),
    #[error("All seats are taken")]
    FullTable,
    #[error("No player in seat {0}")]
    PlayerNotOnTable(usize),
    #[error("The button seat is empty, cannot derive the blind seats")]
    EmptyButtonSeat,
    #[error("No seat left to act on this street")]
    NoPlayerToAct,
    #[error("The {0} cannot be dealt yet")]
    StreetNotReady(super::Street),
    #[error("Card {0} is not available in the deck")]
    CardUnavailable(Card),
    #[error("Chip amounts cannot be negative, got {0}")]
    NegativeChips(Chips),
    #[error("A table can seat between 2 and 10 players, not {0}")]
    InvalidRingSize(usize),
    #[error("Seat {0} does not exist at this table")]
    NoSuchSeat(usize),
    #[error("The deck has run out of cards")]
    EmptyDeck,
    #[error(transparent)]
    Evaluation(#[from] crate::evaluate::EvaluatorError),
}
