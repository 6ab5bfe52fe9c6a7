use std::fmt;
use std::str::FromStr;

use crate::core::HoldemTableError;

use super::error::TableError;

/// A seat's position relative to the blinds. Ten canonical values
/// cover a full ring; shorter-handed tables use a subset.
///
/// Ordering comes from the explicit preflop/postflop order tables,
/// never from declaration order.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    SmallBlind,
    BigBlind,
    UnderTheGun,
    UnderTheGun1,
    UnderTheGun2,
    UnderTheGun3,
    Lojack,
    Hijack,
    Cutoff,
    Button,
}

/// The middle positions between the big blind and the button,
/// filled in first-to-act order as the ring grows.
const MIDDLE: [Position; 7] = [
    Position::UnderTheGun,
    Position::UnderTheGun1,
    Position::UnderTheGun2,
    Position::UnderTheGun3,
    Position::Lojack,
    Position::Hijack,
    Position::Cutoff,
];

impl Position {
    /// Acting order preflop: under the gun first, blinds last.
    pub const fn preflop_order(self) -> u8 {
        match self {
            Position::UnderTheGun => 0,
            Position::UnderTheGun1 => 1,
            Position::UnderTheGun2 => 2,
            Position::UnderTheGun3 => 3,
            Position::Lojack => 4,
            Position::Hijack => 5,
            Position::Cutoff => 6,
            Position::Button => 7,
            Position::SmallBlind => 8,
            Position::BigBlind => 9,
        }
    }

    /// Acting order postflop: the blinds move to the front,
    /// the button stays last.
    pub const fn postflop_order(self) -> u8 {
        match self {
            Position::SmallBlind => 0,
            Position::BigBlind => 1,
            Position::UnderTheGun => 2,
            Position::UnderTheGun1 => 3,
            Position::UnderTheGun2 => 4,
            Position::UnderTheGun3 => 5,
            Position::Lojack => 6,
            Position::Hijack => 7,
            Position::Cutoff => 8,
            Position::Button => 9,
        }
    }

    /// Canonical short code.
    pub const fn as_str(self) -> &'static str {
        match self {
            Position::SmallBlind => "SB",
            Position::BigBlind => "BB",
            Position::UnderTheGun => "UTG",
            Position::UnderTheGun1 => "UTG+1",
            Position::UnderTheGun2 => "UTG+2",
            Position::UnderTheGun3 => "UTG+3",
            Position::Lojack => "LJ",
            Position::Hijack => "HJ",
            Position::Cutoff => "CO",
            Position::Button => "BTN",
        }
    }

    /// The positions at an n-handed table, in seating order starting
    /// from the small blind. Heads-up the button is the small blind,
    /// so only SB and BB appear.
    pub fn ring(n: usize) -> Result<Vec<Position>, TableError> {
        if !(2..=10).contains(&n) {
            return Err(TableError::InvalidRingSize(n));
        }
        let mut ring = vec![Position::SmallBlind, Position::BigBlind];
        ring.extend_from_slice(&MIDDLE[..n.saturating_sub(3)]);
        if n >= 3 {
            ring.push(Position::Button);
        }
        Ok(ring)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Provider histories spell positions many ways; consulted only at
/// parse time.
impl FromStr for Position {
    type Err = HoldemTableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        match lower.as_str() {
            "sb" | "small blind" | "smallblind" | "small_blind" => Ok(Position::SmallBlind),
            "bb" | "big blind" | "bigblind" | "big_blind" => Ok(Position::BigBlind),
            "utg" | "under the gun" => Ok(Position::UnderTheGun),
            "utg+1" | "utg1" => Ok(Position::UnderTheGun1),
            "utg+2" | "utg2" => Ok(Position::UnderTheGun2),
            "utg+3" | "utg3" => Ok(Position::UnderTheGun3),
            "lj" | "lojack" => Ok(Position::Lojack),
            "hj" | "hijack" => Ok(Position::Hijack),
            "co" | "cutoff" => Ok(Position::Cutoff),
            "btn" | "button" | "dealer" | "d" => Ok(Position::Button),
            _ => Err(HoldemTableError::UnknownAlias(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heads_up_ring() {
        assert_eq!(
            vec![Position::SmallBlind, Position::BigBlind],
            Position::ring(2).unwrap()
        );
    }

    #[test]
    fn test_three_handed_ring() {
        assert_eq!(
            vec![Position::SmallBlind, Position::BigBlind, Position::Button],
            Position::ring(3).unwrap()
        );
    }

    #[test]
    fn test_six_handed_ring() {
        let ring = Position::ring(6).unwrap();
        assert_eq!(6, ring.len());
        assert_eq!(Position::SmallBlind, ring[0]);
        assert_eq!(Position::BigBlind, ring[1]);
        assert_eq!(Position::UnderTheGun, ring[2]);
        assert_eq!(Position::Button, ring[5]);
    }

    #[test]
    fn test_full_ring_uses_all_ten() {
        let ring = Position::ring(10).unwrap();
        assert_eq!(10, ring.len());
        for w in ring.windows(2) {
            assert_ne!(w[0], w[1]);
        }
        assert_eq!(Position::Button, ring[9]);
    }

    #[test]
    fn test_ring_size_bounds() {
        assert!(Position::ring(1).is_err());
        assert!(Position::ring(11).is_err());
    }

    #[test]
    fn test_orders_agree() {
        // Postflop order is preflop order with the blinds rotated
        // to the front.
        let ring = Position::ring(10).unwrap();
        let mut preflop = ring.clone();
        preflop.sort_by_key(|p| p.preflop_order());
        let mut rotated = preflop.clone();
        rotated.rotate_right(2);
        let mut postflop = ring;
        postflop.sort_by_key(|p| p.postflop_order());
        assert_eq!(rotated, postflop);
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!(Position::SmallBlind, "Small Blind".parse().unwrap());
        assert_eq!(Position::Button, "dealer".parse().unwrap());
        assert_eq!(Position::UnderTheGun1, "UTG+1".parse().unwrap());
        assert!("the chair".parse::<Position>().is_err());
    }
}
