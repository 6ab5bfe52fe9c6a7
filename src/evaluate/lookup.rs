use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use crate::core::Value;

/// The worst rank within each of the nine hand classes, from a
/// straight flush (best) down to an unpaired high card (worst).
pub const WORST_STRAIGHT_FLUSH: u16 = 10;
pub const WORST_FOUR_OF_A_KIND: u16 = 166;
pub const WORST_FULL_HOUSE: u16 = 322;
pub const WORST_FLUSH: u16 = 1599;
pub const WORST_STRAIGHT: u16 = 1609;
pub const WORST_THREE_OF_A_KIND: u16 = 2467;
pub const WORST_TWO_PAIR: u16 = 3325;
pub const WORST_PAIR: u16 = 6185;
pub const WORST_HIGH_CARD: u16 = 7462;

/// One of the nine classes of 5 card hand strength.
/// The explicit discriminant is the conventional class number,
/// 1 for a straight flush through 9 for a high card.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HandClass {
    StraightFlush = 1,
    FourOfAKind = 2,
    FullHouse = 3,
    Flush = 4,
    Straight = 5,
    ThreeOfAKind = 6,
    TwoPair = 7,
    Pair = 8,
    HighCard = 9,
}

/// Ascending class boundaries. The class of a score is the first
/// entry whose boundary is >= the score.
const CLASS_BOUNDARIES: [(u16, HandClass); 9] = [
    (WORST_STRAIGHT_FLUSH, HandClass::StraightFlush),
    (WORST_FOUR_OF_A_KIND, HandClass::FourOfAKind),
    (WORST_FULL_HOUSE, HandClass::FullHouse),
    (WORST_FLUSH, HandClass::Flush),
    (WORST_STRAIGHT, HandClass::Straight),
    (WORST_THREE_OF_A_KIND, HandClass::ThreeOfAKind),
    (WORST_TWO_PAIR, HandClass::TwoPair),
    (WORST_PAIR, HandClass::Pair),
    (WORST_HIGH_CARD, HandClass::HighCard),
];

impl HandClass {
    /// The class of the given evaluator score, None outside 1..=7462.
    pub fn of(score: u16) -> Option<HandClass> {
        if score == 0 {
            return None;
        }
        CLASS_BOUNDARIES
            .iter()
            .find(|(worst, _)| score <= *worst)
            .map(|(_, class)| *class)
    }

    /// Human readable class name.
    pub const fn as_str(self) -> &'static str {
        match self {
            HandClass::StraightFlush => "Straight Flush",
            HandClass::FourOfAKind => "Four of a Kind",
            HandClass::FullHouse => "Full House",
            HandClass::Flush => "Flush",
            HandClass::Straight => "Straight",
            HandClass::ThreeOfAKind => "Three of a Kind",
            HandClass::TwoPair => "Two Pair",
            HandClass::Pair => "Pair",
            HandClass::HighCard => "High Card",
        }
    }
}

impl fmt::Display for HandClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The ten 13-bit straight patterns, strongest first:
/// broadway down to the wheel.
const STRAIGHT_PATTERNS: [u16; 10] = [
    0x1F00, // A K Q J T
    0x0F80, // K Q J T 9
    0x07C0, // Q J T 9 8
    0x03E0, // J T 9 8 7
    0x01F0, // T 9 8 7 6
    0x00F8, // 9 8 7 6 5
    0x007C, // 8 7 6 5 4
    0x003E, // 7 6 5 4 3
    0x001F, // 6 5 4 3 2
    0x100F, // 5 4 3 2 A
];

/// Precomputed map from 5 card hands to one of the 7462 distinct
/// relative strengths. Rank 1 is a royal flush, rank 7462 the worst
/// unsuited high card. Built once per process and never mutated, so
/// it is safe to share read-only across every table.
///
/// Two keys cover everything:
///
/// * `flushes`: the OR of the five value masks, for hands where all
///   five cards share a suit (straight flushes and plain flushes).
/// * `unsuited`: the product of the five value primes. The product
///   is injective over value multisets, so it distinguishes every
///   paired, tripled and quaded hand as well as straights and high
///   cards.
pub struct LookupTable {
    flushes: HashMap<u16, u16>,
    unsuited: HashMap<u32, u16>,
}

/// The process-wide table. First access pays the construction cost,
/// afterwards lookups are two hash probes at worst.
pub static LOOKUP_TABLE: LazyLock<LookupTable> = LazyLock::new(LookupTable::new);

impl LookupTable {
    fn new() -> Self {
        let mut table = LookupTable {
            flushes: HashMap::with_capacity(1287),
            unsuited: HashMap::with_capacity(6175),
        };
        table.fill_flushes_straights_and_high_cards();
        table.fill_multiples();
        table
    }

    /// The rank of a five-flush with the given OR'd value pattern.
    pub fn flush_rank(&self, pattern: u16) -> Option<u16> {
        self.flushes.get(&pattern).copied()
    }

    /// The rank of an unsuited hand with the given prime product.
    pub fn unsuited_rank(&self, product: u32) -> Option<u16> {
        self.unsuited.get(&product).copied()
    }

    fn fill_flushes_straights_and_high_cards(&mut self) {
        // Straight flushes take ranks 1..=10; the same patterns
        // unsuited are the straights at 1600..=1609.
        for (i, pattern) in STRAIGHT_PATTERNS.iter().enumerate() {
            self.flushes.insert(*pattern, 1 + i as u16);
            self.unsuited
                .insert(prime_product_of_pattern(*pattern), WORST_FLUSH + 1 + i as u16);
        }

        // Every other way to choose 5 of 13 values, in ascending
        // bit-pattern order via the next-permutation trick. 0b11111
        // itself is the six-high straight so the walk starts past it.
        let mut patterns: Vec<u16> = Vec::with_capacity(1277);
        let mut v: u32 = 0b11111;
        for _ in 0..1286 {
            v = next_bit_permutation(v);
            if !STRAIGHT_PATTERNS.contains(&(v as u16)) {
                patterns.push(v as u16);
            }
        }

        // Walked back from the strongest pattern: suited these are
        // the plain flushes, unsuited the high cards.
        for (i, pattern) in patterns.iter().rev().enumerate() {
            self.flushes
                .insert(*pattern, WORST_FULL_HOUSE + 1 + i as u16);
            self.unsuited
                .insert(prime_product_of_pattern(*pattern), WORST_PAIR + 1 + i as u16);
        }
    }

    /// Quads, full houses, trips, two pairs and pairs, enumerated in
    /// descending strength so ranks can be handed out sequentially.
    fn fill_multiples(&mut self) {
        let desc: Vec<Value> = Value::values().iter().rev().copied().collect();

        let mut rank = WORST_STRAIGHT_FLUSH + 1;
        for quad in &desc {
            for kicker in desc.iter().filter(|v| *v != quad) {
                let product = quad.prime().pow(4) * kicker.prime();
                self.unsuited.insert(product, rank);
                rank += 1;
            }
        }

        let mut rank = WORST_FOUR_OF_A_KIND + 1;
        for trip in &desc {
            for pair in desc.iter().filter(|v| *v != trip) {
                let product = trip.prime().pow(3) * pair.prime().pow(2);
                self.unsuited.insert(product, rank);
                rank += 1;
            }
        }

        let mut rank = WORST_STRAIGHT + 1;
        for trip in &desc {
            let kickers: Vec<Value> = desc.iter().filter(|v| *v != trip).copied().collect();
            for (i, k1) in kickers.iter().enumerate() {
                for k2 in kickers[i + 1..].iter() {
                    let product = trip.prime().pow(3) * k1.prime() * k2.prime();
                    self.unsuited.insert(product, rank);
                    rank += 1;
                }
            }
        }

        let mut rank = WORST_THREE_OF_A_KIND + 1;
        for (i, p1) in desc.iter().enumerate() {
            for p2 in desc[i + 1..].iter() {
                for kicker in desc.iter().filter(|v| *v != p1 && *v != p2) {
                    let product = p1.prime().pow(2) * p2.prime().pow(2) * kicker.prime();
                    self.unsuited.insert(product, rank);
                    rank += 1;
                }
            }
        }

        let mut rank = WORST_TWO_PAIR + 1;
        for pair in &desc {
            let kickers: Vec<Value> = desc.iter().filter(|v| *v != pair).copied().collect();
            for (i, k1) in kickers.iter().enumerate() {
                for (j, k2) in kickers[i + 1..].iter().enumerate() {
                    for k3 in kickers[i + 1 + j + 1..].iter() {
                        let product =
                            pair.prime().pow(2) * k1.prime() * k2.prime() * k3.prime();
                        self.unsuited.insert(product, rank);
                        rank += 1;
                    }
                }
            }
        }
    }
}

/// The product of the value primes for every set bit of a pattern.
fn prime_product_of_pattern(pattern: u16) -> u32 {
    Value::values()
        .iter()
        .filter(|v| pattern & (1 << (**v as u16)) != 0)
        .map(|v| v.prime())
        .product()
}

/// The lexicographically next integer with the same popcount.
fn next_bit_permutation(v: u32) -> u32 {
    let t = v | (v - 1);
    (t + 1) | (((!t & (t + 1)) - 1) >> (v.trailing_zeros() + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_bit_permutation() {
        // 0b11111 -> 0b101111 -> 0b110111 -> ...
        assert_eq!(0b101111, next_bit_permutation(0b11111));
        assert_eq!(0b110111, next_bit_permutation(0b101111));
        let mut v = 0b11111u32;
        for _ in 0..1286 {
            let next = next_bit_permutation(v);
            assert!(next > v);
            assert_eq!(5, next.count_ones());
            v = next;
        }
        // The walk ends at the top five bits of the 13.
        assert_eq!(0b1111100000000, v);
    }

    #[test]
    fn test_table_sizes() {
        let t = &*LOOKUP_TABLE;
        // 10 straight flushes + 1277 flushes
        assert_eq!(1287, t.flushes.len());
        // everything else
        assert_eq!(6175, t.unsuited.len());
    }

    #[test]
    fn test_royal_flush_is_one() {
        assert_eq!(Some(1), LOOKUP_TABLE.flush_rank(0x1F00));
    }

    #[test]
    fn test_wheel_straight_flush_is_ten() {
        assert_eq!(Some(10), LOOKUP_TABLE.flush_rank(0x100F));
    }

    #[test]
    fn test_worst_high_card() {
        // 7 5 4 3 2 unsuited is the floor of the whole table.
        let product = prime_product_of_pattern(0b101111);
        assert_eq!(Some(WORST_HIGH_CARD), LOOKUP_TABLE.unsuited_rank(product));
    }

    #[test]
    fn test_best_quads() {
        // Four aces with a king kicker.
        let product = Value::Ace.prime().pow(4) * Value::King.prime();
        assert_eq!(
            Some(WORST_STRAIGHT_FLUSH + 1),
            LOOKUP_TABLE.unsuited_rank(product)
        );
    }

    #[test]
    fn test_worst_pair() {
        // 2 2 5 4 3: the weakest one-pair hand.
        let product = Value::Two.prime().pow(2)
            * Value::Five.prime()
            * Value::Four.prime()
            * Value::Three.prime();
        assert_eq!(Some(WORST_PAIR), LOOKUP_TABLE.unsuited_rank(product));
    }

    #[test]
    fn test_all_ranks_covered() {
        let mut seen = vec![false; WORST_HIGH_CARD as usize + 1];
        for rank in LOOKUP_TABLE.flushes.values() {
            seen[*rank as usize] = true;
        }
        for rank in LOOKUP_TABLE.unsuited.values() {
            seen[*rank as usize] = true;
        }
        let missing: Vec<usize> = (1..seen.len()).filter(|i| !seen[*i]).collect();
        assert!(missing.is_empty(), "unassigned ranks: {missing:?}");
    }

    #[test]
    fn test_class_boundaries() {
        assert_eq!(Some(HandClass::StraightFlush), HandClass::of(1));
        assert_eq!(Some(HandClass::StraightFlush), HandClass::of(10));
        assert_eq!(Some(HandClass::FourOfAKind), HandClass::of(11));
        assert_eq!(Some(HandClass::Flush), HandClass::of(487));
        assert_eq!(Some(HandClass::HighCard), HandClass::of(7462));
        assert_eq!(None, HandClass::of(0));
        assert_eq!(None, HandClass::of(7463));
        assert_eq!("Flush", HandClass::Flush.to_string());
    }
}
