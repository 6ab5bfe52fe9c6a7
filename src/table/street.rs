use std::fmt;
use std::str::FromStr;

use crate::core::HoldemTableError;

/// One betting round. Streets only ever move forward:
/// preflop, flop, turn, river, then showdown.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Street {
    #[default]
    Preflop = 0,
    Flop = 1,
    Turn = 2,
    River = 3,
    Showdown = 4,
}

impl Street {
    /// All five streets in order.
    pub const fn all() -> [Street; 5] {
        [
            Street::Preflop,
            Street::Flop,
            Street::Turn,
            Street::River,
            Street::Showdown,
        ]
    }

    /// The following street. Showdown is terminal.
    pub const fn next(self) -> Street {
        match self {
            Street::Preflop => Street::Flop,
            Street::Flop => Street::Turn,
            Street::Turn => Street::River,
            Street::River => Street::Showdown,
            Street::Showdown => Street::Showdown,
        }
    }

    /// How many community cards are on the board while this
    /// street is being played.
    pub const fn board_len(self) -> usize {
        match self {
            Street::Preflop => 0,
            Street::Flop => 3,
            Street::Turn => 4,
            Street::River | Street::Showdown => 5,
        }
    }

    /// Is there any betting left to do on this street?
    pub const fn is_betting(self) -> bool {
        !matches!(self, Street::Showdown)
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Street::Preflop => write!(f, "preflop"),
            Street::Flop => write!(f, "flop"),
            Street::Turn => write!(f, "turn"),
            Street::River => write!(f, "river"),
            Street::Showdown => write!(f, "showdown"),
        }
    }
}

/// Hand histories spell streets many ways; the alias table is only
/// consulted at parse time.
impl FromStr for Street {
    type Err = HoldemTableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        match lower.as_str() {
            "p" | "pf" | "pre" | "preflop" | "pre-flop" => Ok(Street::Preflop),
            "f" | "flop" => Ok(Street::Flop),
            "t" | "turn" => Ok(Street::Turn),
            "r" | "river" => Ok(Street::River),
            "s" | "sd" | "showdown" => Ok(Street::Showdown),
            _ => Err(HoldemTableError::UnknownAlias(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_only() {
        let mut street = Street::Preflop;
        for expected in [Street::Flop, Street::Turn, Street::River, Street::Showdown] {
            street = street.next();
            assert_eq!(expected, street);
        }
        // Terminal.
        assert_eq!(Street::Showdown, Street::Showdown.next());
    }

    #[test]
    fn test_board_len() {
        assert_eq!(0, Street::Preflop.board_len());
        assert_eq!(3, Street::Flop.board_len());
        assert_eq!(4, Street::Turn.board_len());
        assert_eq!(5, Street::River.board_len());
        assert_eq!(5, Street::Showdown.board_len());
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!(Street::Preflop, "PRE-FLOP".parse().unwrap());
        assert_eq!(Street::Flop, "f".parse().unwrap());
        assert_eq!(Street::Showdown, "sd".parse().unwrap());
        assert!("fourth street".parse::<Street>().is_err());
    }
}
