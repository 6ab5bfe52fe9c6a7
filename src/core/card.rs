use std::fmt;
use std::str::FromStr;

use super::error::HoldemTableError;

/// Card rank or value.
/// This is basically the face value - 2
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(PartialEq, PartialOrd, Eq, Ord, Debug, Clone, Copy, Hash)]
pub enum Value {
    /// 2
    Two = 0,
    /// 3
    Three = 1,
    /// 4
    Four = 2,
    /// 5
    Five = 3,
    /// 6
    Six = 4,
    /// 7
    Seven = 5,
    /// 8
    Eight = 6,
    /// 9
    Nine = 7,
    /// T
    Ten = 8,
    /// J
    Jack = 9,
    /// Q
    Queen = 10,
    /// K
    King = 11,
    /// A
    Ace = 12,
}

/// Constant of all the values.
/// This is what `Value::values()` returns
const VALUES: [Value; 13] = [
    Value::Two,
    Value::Three,
    Value::Four,
    Value::Five,
    Value::Six,
    Value::Seven,
    Value::Eight,
    Value::Nine,
    Value::Ten,
    Value::Jack,
    Value::Queen,
    Value::King,
    Value::Ace,
];

/// The prime associated with each value, two through ace.
/// Prime factorization is unique, so the product of five
/// of these identifies a rank multiset for the evaluator.
const PRIMES: [u32; 13] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41];

impl Value {
    /// Get all of the `Value`'s that are possible.
    /// This is used to iterate through all possible
    /// values when creating a new deck, or
    /// generating all possible starting hands.
    pub const fn values() -> [Value; 13] {
        VALUES
    }

    /// Take a u8 and convert it to a value.
    ///
    /// # Panics
    ///
    /// Panics if the u8 is not in the range 0..=12.
    pub fn from_u8(v: u8) -> Value {
        VALUES[v as usize]
    }

    /// The prime number for this value, used by the evaluator.
    pub const fn prime(self) -> u32 {
        PRIMES[self as usize]
    }

    /// The character that represents this value.
    pub const fn to_char(self) -> char {
        match self {
            Value::Ace => 'A',
            Value::King => 'K',
            Value::Queen => 'Q',
            Value::Jack => 'J',
            Value::Ten => 'T',
            Value::Nine => '9',
            Value::Eight => '8',
            Value::Seven => '7',
            Value::Six => '6',
            Value::Five => '5',
            Value::Four => '4',
            Value::Three => '3',
            Value::Two => '2',
        }
    }

    pub fn from_char(c: char) -> Option<Value> {
        match c.to_ascii_uppercase() {
            'A' => Some(Value::Ace),
            'K' => Some(Value::King),
            'Q' => Some(Value::Queen),
            'J' => Some(Value::Jack),
            'T' => Some(Value::Ten),
            '9' => Some(Value::Nine),
            '8' => Some(Value::Eight),
            '7' => Some(Value::Seven),
            '6' => Some(Value::Six),
            '5' => Some(Value::Five),
            '4' => Some(Value::Four),
            '3' => Some(Value::Three),
            '2' => Some(Value::Two),
            _ => None,
        }
    }
}

/// Hand histories spell values many ways ("A", "ace", "10").
/// The alias table is only consulted at parse time; ordering
/// always comes from the discriminant.
impl FromStr for Value {
    type Err = HoldemTableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        match lower.as_str() {
            "a" | "ace" => Ok(Value::Ace),
            "k" | "king" => Ok(Value::King),
            "q" | "queen" => Ok(Value::Queen),
            "j" | "jack" => Ok(Value::Jack),
            "t" | "10" | "ten" => Ok(Value::Ten),
            "9" | "nine" => Ok(Value::Nine),
            "8" | "eight" => Ok(Value::Eight),
            "7" | "seven" => Ok(Value::Seven),
            "6" | "six" => Ok(Value::Six),
            "5" | "five" => Ok(Value::Five),
            "4" | "four" => Ok(Value::Four),
            "3" | "three" => Ok(Value::Three),
            "2" | "two" | "deuce" => Ok(Value::Two),
            _ => Err(HoldemTableError::UnknownAlias(s.to_string())),
        }
    }
}

/// Enum for the four different suits.
/// While this has support for ordering it's not
/// sensical. The sorting is only there to allow sorting cards.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(PartialEq, PartialOrd, Eq, Ord, Debug, Clone, Copy, Hash)]
pub enum Suit {
    /// Spades
    Spade = 0,
    /// Clubs
    Club = 1,
    /// Hearts
    Heart = 2,
    /// Diamonds
    Diamond = 3,
}

/// All of the `Suit`'s. This is what `Suit::suits()` returns.
const SUITS: [Suit; 4] = [Suit::Spade, Suit::Club, Suit::Heart, Suit::Diamond];

impl Suit {
    /// Provide all the Suit's that there are.
    pub const fn suits() -> [Suit; 4] {
        SUITS
    }

    /// Take a u8 and convert it to a suit.
    ///
    /// # Panics
    ///
    /// Panics if the u8 is not in the range 0..=3.
    pub fn from_u8(s: u8) -> Suit {
        SUITS[s as usize]
    }

    /// The character that represents this suit.
    pub const fn to_char(self) -> char {
        match self {
            Suit::Spade => 's',
            Suit::Club => 'c',
            Suit::Heart => 'h',
            Suit::Diamond => 'd',
        }
    }

    pub fn from_char(s: char) -> Option<Suit> {
        match s.to_ascii_lowercase() {
            'd' => Some(Suit::Diamond),
            's' => Some(Suit::Spade),
            'h' => Some(Suit::Heart),
            'c' => Some(Suit::Club),
            _ => None,
        }
    }
}

impl FromStr for Suit {
    type Err = HoldemTableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        match lower.as_str() {
            "s" | "spade" | "spades" => Ok(Suit::Spade),
            "c" | "club" | "clubs" => Ok(Suit::Club),
            "h" | "heart" | "hearts" => Ok(Suit::Heart),
            "d" | "diamond" | "diamonds" => Ok(Suit::Diamond),
            _ => Err(HoldemTableError::UnknownAlias(s.to_string())),
        }
    }
}

/// The main struct of the core module.
/// This is a carrier for Suit and Value combined.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(PartialEq, PartialOrd, Eq, Ord, Debug, Clone, Copy, Hash)]
pub struct Card {
    /// The face value of this card.
    pub value: Value,
    /// The suit of this card.
    pub suit: Suit,
}

impl Card {
    /// Create a new card from value and suit.
    pub const fn new(value: Value, suit: Suit) -> Self {
        Self { value, suit }
    }

    /// An iterator over all 52 cards, in key order.
    /// The iterator is restartable; every call starts fresh.
    ///
    /// ```
    /// use holdem_table::core::Card;
    ///
    /// assert_eq!(52, Card::all().count());
    /// ```
    pub fn all() -> impl Iterator<Item = Card> {
        (0..52u8).map(Card::from)
    }
}

/// Compact integer key for a card: `value * 4 + suit`.
/// Used to index registries and to enumerate the full deck.
impl From<Card> for u8 {
    fn from(c: Card) -> u8 {
        (c.value as u8) * 4 + (c.suit as u8)
    }
}

impl From<u8> for Card {
    /// # Panics
    ///
    /// Panics if the key is not in the range 0..=51.
    fn from(key: u8) -> Card {
        Card {
            value: Value::from_u8(key / 4),
            suit: Suit::from_u8(key % 4),
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value.to_char(), self.suit.to_char())
    }
}

impl TryFrom<&str> for Card {
    type Error = HoldemTableError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let mut chars = s.chars();
        let vc = chars.next().ok_or(HoldemTableError::TooFewChars)?;
        let sc = chars.next().ok_or(HoldemTableError::TooFewChars)?;
        let value = Value::from_char(vc).ok_or(HoldemTableError::UnexpectedValueChar)?;
        let suit = Suit::from_char(sc).ok_or(HoldemTableError::UnexpectedSuitChar)?;
        if chars.next().is_some() {
            return Err(HoldemTableError::UnparsedCharsRemaining);
        }
        Ok(Card { value, suit })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem;

    #[test]
    fn test_constructor() {
        let c = Card {
            value: Value::Three,
            suit: Suit::Spade,
        };
        assert_eq!(Suit::Spade, c.suit);
        assert_eq!(Value::Three, c.value);
    }

    #[test]
    fn test_compare() {
        let c1 = Card {
            value: Value::Three,
            suit: Suit::Spade,
        };
        let c2 = Card {
            value: Value::Four,
            suit: Suit::Spade,
        };
        let c3 = Card {
            value: Value::Four,
            suit: Suit::Club,
        };

        // Make sure that equals works
        assert!(c1 == c1);
        // Make sure that the values are ordered
        assert!(c1 < c2);
        assert!(c2 > c1);
        // Make sure that suit is used.
        assert!(c3 > c2);
    }

    #[test]
    fn test_value_cmp() {
        assert!(Value::Two < Value::Ace);
        assert!(Value::King < Value::Ace);
        assert_eq!(Value::Two, Value::Two);
    }

    #[test]
    fn test_from_u8() {
        assert_eq!(Value::Two, Value::from_u8(0));
        assert_eq!(Value::Ace, Value::from_u8(12));
    }

    #[test]
    fn test_key_roundtrip() {
        for key in 0..52u8 {
            let c = Card::from(key);
            assert_eq!(key, u8::from(c));
        }
    }

    #[test]
    fn test_all_distinct() {
        let cards: Vec<Card> = Card::all().collect();
        assert_eq!(52, cards.len());
        for (i, a) in cards.iter().enumerate() {
            for b in cards[i + 1..].iter() {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_primes() {
        assert_eq!(2, Value::Two.prime());
        assert_eq!(41, Value::Ace.prime());
        // All primes are distinct and ascending with value.
        for w in Value::values().windows(2) {
            assert!(w[0].prime() < w[1].prime());
        }
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!(Value::Ace, "ace".parse().unwrap());
        assert_eq!(Value::Ace, "A".parse().unwrap());
        assert_eq!(Value::Ten, "10".parse().unwrap());
        assert_eq!(Suit::Spade, "SPADES".parse().unwrap());
        assert_eq!(Suit::Diamond, "d".parse().unwrap());
        assert!("joker".parse::<Value>().is_err());
    }

    #[test]
    fn test_try_from_str() {
        let c = Card::try_from("As").unwrap();
        assert_eq!(Value::Ace, c.value);
        assert_eq!(Suit::Spade, c.suit);
        assert_eq!("As", c.to_string());
        assert!(Card::try_from("A").is_err());
        assert!(Card::try_from("Asx").is_err());
    }

    #[test]
    fn test_size() {
        // Card should be really small. Hopefully just two u8's
        assert!(mem::size_of::<Card>() <= 4);
    }
}
