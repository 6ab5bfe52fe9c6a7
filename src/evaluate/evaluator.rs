use thiserror::Error;

use crate::core::Card;

use super::bit_card::BitCard;
use super::lookup::{HandClass, LOOKUP_TABLE, WORST_HIGH_CARD};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvaluatorError {
    #[error("Evaluating needs 5 to 7 cards, got {0}")]
    InvalidHandSize(usize),
    #[error("Card {0} appears more than once")]
    DuplicateCard(Card),
    #[error("{0} is not a valid hand score")]
    UnknownScore(u16),
}

/// Stateless 5 to 7 card hand strength evaluator over the
/// process-wide [`LookupTable`](crate::evaluate::LookupTable).
/// Scores are 1 (royal flush) through 7462 (seven-five high);
/// lower is better.
#[derive(Debug, Clone, Copy, Default)]
pub struct Evaluator;

impl Evaluator {
    pub fn new() -> Self {
        Evaluator
    }

    /// Score the best 5 card hand from hole cards plus board.
    ///
    /// A pure function of the combined card set: the split between
    /// `hole` and `board` and the order within each are irrelevant.
    ///
    /// ```
    /// use holdem_table::core::Card;
    /// use holdem_table::evaluate::Evaluator;
    ///
    /// let hole = [Card::try_from("9s").unwrap(), Card::try_from("8h").unwrap()];
    /// let board: Vec<Card> = ["As", "Kd", "Ts", "Js", "Qs"]
    ///     .iter()
    ///     .map(|s| Card::try_from(*s).unwrap())
    ///     .collect();
    ///
    /// assert_eq!(487, Evaluator::new().evaluate(&hole, &board).unwrap());
    /// ```
    pub fn evaluate(&self, hole: &[Card], board: &[Card]) -> Result<u16, EvaluatorError> {
        let cards: Vec<Card> = hole.iter().chain(board.iter()).copied().collect();
        let n = cards.len();
        if !(5..=7).contains(&n) {
            return Err(EvaluatorError::InvalidHandSize(n));
        }
        for (i, card) in cards.iter().enumerate() {
            if cards[i + 1..].contains(card) {
                return Err(EvaluatorError::DuplicateCard(*card));
            }
        }

        let bits: Vec<BitCard> = cards.into_iter().map(BitCard::from).collect();
        let mut best = u16::MAX;
        for a in 0..n - 4 {
            for b in a + 1..n - 3 {
                for c in b + 1..n - 2 {
                    for d in c + 1..n - 1 {
                        for e in d + 1..n {
                            let score =
                                Self::five([bits[a], bits[b], bits[c], bits[d], bits[e]]);
                            best = best.min(score);
                        }
                    }
                }
            }
        }
        Ok(best)
    }

    /// Score exactly five encoded cards: flush fast-path on the
    /// AND'd suit masks, otherwise the prime-product lookup.
    fn five(cards: [BitCard; 5]) -> u16 {
        let suited = cards.iter().fold(0xF000u32, |acc, c| acc & c.bits()) & 0xF000;
        if suited != 0 {
            let pattern = cards.iter().fold(0u32, |acc, c| acc | c.value_mask()) as u16;
            LOOKUP_TABLE
                .flush_rank(pattern)
                .expect("the flush table covers every five card flush")
        } else {
            let product: u32 = cards.iter().map(|c| c.prime()).product();
            LOOKUP_TABLE
                .unsuited_rank(product)
                .expect("the unsuited table covers every five card hand")
        }
    }

    /// The class of a score, 1 (straight flush) through 9 (high card).
    pub fn rank_class(&self, score: u16) -> Result<HandClass, EvaluatorError> {
        HandClass::of(score).ok_or(EvaluatorError::UnknownScore(score))
    }

    /// Human readable class name for a score.
    pub fn class_string(&self, score: u16) -> Result<&'static str, EvaluatorError> {
        self.rank_class(score).map(HandClass::as_str)
    }

    /// The fraction of the 7462 distinct strengths at or above this
    /// score. 0 is unbeatable, 1 the floor.
    pub fn rank_percentage(&self, score: u16) -> f64 {
        f64::from(score) / f64::from(WORST_HIGH_CARD)
    }
}
