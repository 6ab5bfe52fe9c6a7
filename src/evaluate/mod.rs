//! The hand strength evaluator: a bit-packed card encoding, a
//! process-wide prime-product lookup table, and the stateless
//! [`Evaluator`] over them.

/// 32 bit packed card used only in here.
mod bit_card;
/// Export `BitCard`
pub use self::bit_card::BitCard;

/// The build-once map from 5 card hands to the 7462 strengths.
mod lookup;
/// Export the table, the class enum, and the class boundaries.
pub use self::lookup::{HandClass, LOOKUP_TABLE, LookupTable, WORST_HIGH_CARD};

/// The evaluator itself.
mod evaluator;
/// Export `Evaluator`
pub use self::evaluator::{Evaluator, EvaluatorError};
