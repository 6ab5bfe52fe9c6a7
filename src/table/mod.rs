//! The betting state machine: streets, positions, the pot, seated
//! players, validated actions, and the [`Table`] that owns them all.

/// Chip amounts. Signed so that bad inputs fail loudly instead of
/// wrapping.
pub type Chips = i32;

/// The five betting rounds.
mod street;
/// Export `Street`
pub use self::street::Street;

/// Seat positions relative to the blinds.
mod position;
/// Export `Position`
pub use self::position::Position;

/// The pot and the street's bet level.
mod pot;
/// Export `Pot`
pub use self::pot::Pot;

/// A seat occupant and its betting queries.
mod player;
/// Export `TablePlayer`
pub use self::player::TablePlayer;

/// The validated betting actions.
mod action;
/// Export `Action`
pub use self::action::Action;

/// Everything that can go wrong at the table.
mod error;
/// Export the error enum.
pub use self::error::TableError;

/// The root aggregate.
mod table;
/// Export `Table`
pub use self::table::Table;

/// The resolved ingestion events.
mod event;
/// Export `TableEvent`
pub use self::event::TableEvent;
