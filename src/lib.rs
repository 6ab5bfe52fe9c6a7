//! holdem-table is a library for driving No-Limit Hold'em hands.
//! It models a full table (seating, blinds, betting rounds with
//! legal-action enforcement, street progression and side-pot
//! payouts) on top of a fast 5 to 7 card hand evaluator.
//!
//! The crate has no I/O of its own. An ingestion layer feeds the
//! table resolved [`table::TableEvent`]s (from whatever wire format
//! it parses) and reads back pot, stack, legality and hand strength
//! queries. Tables are strictly single-writer; the card types and
//! the evaluator's lookup table are immutable and shared, so
//! independent hands can be processed on as many threads as you
//! like.
//!
//! ```
//! use holdem_table::core::Card;
//! use holdem_table::evaluate::Evaluator;
//!
//! let evaluator = Evaluator::new();
//! let hole = [Card::try_from("As").unwrap(), Card::try_from("Ks").unwrap()];
//! let board: Vec<Card> = ["Qs", "Js", "Ts"]
//!     .iter()
//!     .map(|s| Card::try_from(*s).unwrap())
//!     .collect();
//!
//! // A royal flush is the best possible score.
//! assert_eq!(1, evaluator.evaluate(&hole, &board).unwrap());
//! ```

/// Allow all the core card functionality to be used
/// externally. Everything in core should be agnostic
/// to poker style.
pub mod core;
/// The 5 to 7 card hand strength evaluator.
pub mod evaluate;
/// The betting/turn-order state machine.
pub mod table;
