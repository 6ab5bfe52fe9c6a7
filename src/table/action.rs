use std::fmt;

use super::Chips;

/// A betting decision by the seat whose turn it is. Validation
/// happens against the live table state in
/// [`Table::play`](super::Table::play) before anything mutates;
/// once applied, the action is appended to the acting player's
/// street log and never touched again.
///
/// `Bet` carries the full amount of an opening bet. `Raise` carries
/// the amount added on top of the call.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Fold,
    Check,
    Call,
    Bet(Chips),
    Raise(Chips),
}

impl Action {
    /// Bets and raises take the initiative; everything else doesn't.
    pub const fn is_aggressive(&self) -> bool {
        matches!(self, Action::Bet(_) | Action::Raise(_))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Fold => write!(f, "fold"),
            Action::Check => write!(f, "check"),
            Action::Call => write!(f, "call"),
            Action::Bet(value) => write!(f, "bet {value}"),
            Action::Raise(value) => write!(f, "raise {value}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggression() {
        assert!(Action::Bet(100).is_aggressive());
        assert!(Action::Raise(100).is_aggressive());
        assert!(!Action::Call.is_aggressive());
        assert!(!Action::Check.is_aggressive());
        assert!(!Action::Fold.is_aggressive());
    }

    #[test]
    fn test_display() {
        assert_eq!("bet 100", Action::Bet(100).to_string());
        assert_eq!("fold", Action::Fold.to_string());
    }
}
