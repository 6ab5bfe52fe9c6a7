use thiserror::Error;

use super::Card;

/// This is the core error type for the
/// holdem-table library. It uses `thiserror` to provide
/// readable error messages
#[derive(Error, Debug, Clone, PartialEq, Eq, Hash)]
pub enum HoldemTableError {
    #[error("Unable to parse value")]
    UnexpectedValueChar,
    #[error("Unable to parse suit")]
    UnexpectedSuitChar,
    #[error("Error reading characters while parsing")]
    TooFewChars,
    #[error("Extra un-used characters found after parsing")]
    UnparsedCharsRemaining,
    #[error("No value, suit, street or position is spelled {0:?}")]
    UnknownAlias(String),
    #[error("Card {0} has already been dealt")]
    CardNotInDeck(Card),
    #[error("Card {0} is still in the deck")]
    CardStillInDeck(Card),
}
