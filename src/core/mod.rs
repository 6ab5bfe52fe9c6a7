//! This is the core module. It exports the code that is
//! agnostic to any single poker style.

/// card.rs has value and suit.
mod card;
/// Re-export Card, Value, and Suit
pub use self::card::{Card, Suit, Value};

/// Deck is the normal 52 card deck.
mod deck;
/// Export `Deck`
pub use self::deck::Deck;

/// Errors for everything card and parse related.
mod error;
/// Export the error enum.
pub use self::error::HoldemTableError;
