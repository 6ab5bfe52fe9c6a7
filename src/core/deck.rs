use rand::Rng;
use rand::seq::SliceRandom;

use super::card::Card;
use super::error::HoldemTableError;

/// An owned, shuffleable deck of cards. Each `Table` owns exactly
/// one; a drawn card leaves the deck until it is `replace`d or the
/// deck is `reset`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Deck {
    /// Card storage.
    cards: Vec<Card>,
}

impl Deck {
    /// Create the default 52 card deck, in key order.
    ///
    /// ```
    /// use holdem_table::core::Deck;
    ///
    /// assert_eq!(52, Deck::new().len());
    /// ```
    pub fn new() -> Self {
        Self {
            cards: Card::all().collect(),
        }
    }

    /// Randomly shuffle the deck.
    /// This will ensure the there's no order to the deck.
    pub fn shuffle<R: Rng>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng)
    }

    /// Deal the top card if there is one there to deal.
    /// None if the deck is empty. Random after a shuffle.
    pub fn deal(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Draw a specific card from anywhere in the deck.
    pub fn draw(&mut self, c: &Card) -> Result<Card, HoldemTableError> {
        match self.cards.iter().position(|held| held == c) {
            Some(idx) => Ok(self.cards.swap_remove(idx)),
            None => Err(HoldemTableError::CardNotInDeck(*c)),
        }
    }

    /// Put a previously drawn card back into the deck.
    pub fn replace(&mut self, c: Card) -> Result<(), HoldemTableError> {
        if self.contains(&c) {
            return Err(HoldemTableError::CardStillInDeck(c));
        }
        self.cards.push(c);
        Ok(())
    }

    /// Restore the full 52 cards, dropping any dealt state.
    pub fn reset(&mut self) {
        self.cards.clear();
        self.cards.extend(Card::all());
    }

    /// Given a card, is it in the current deck?
    pub fn contains(&self, c: &Card) -> bool {
        self.cards.contains(c)
    }

    /// How many cards are there in the deck.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Have all of the cards been dealt from this deck?
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Get an iterator from this deck
    pub fn iter(&self) -> std::slice::Iter<'_, Card> {
        self.cards.iter()
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

/// Turn a deck into an iterator
impl IntoIterator for Deck {
    type Item = Card;
    type IntoIter = std::vec::IntoIter<Card>;
    /// Consume this deck and create a new iterator.
    fn into_iter(self) -> Self::IntoIter {
        self.cards.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::card::{Suit, Value};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_contains_in() {
        let d = Deck::new();
        assert!(d.contains(&Card {
            value: Value::Eight,
            suit: Suit::Heart,
        }));
    }

    #[test]
    fn test_draw_specific() {
        let mut d = Deck::new();
        let c = Card {
            value: Value::Ace,
            suit: Suit::Heart,
        };
        assert!(d.contains(&c));
        assert_eq!(c, d.draw(&c).unwrap());
        assert!(!d.contains(&c));
        assert_eq!(Err(HoldemTableError::CardNotInDeck(c)), d.draw(&c));
    }

    #[test]
    fn test_replace() {
        let mut d = Deck::new();
        let c = Card {
            value: Value::Nine,
            suit: Suit::Club,
        };
        assert!(d.replace(c).is_err());
        d.draw(&c).unwrap();
        assert!(d.replace(c).is_ok());
        assert_eq!(52, d.len());
    }

    #[test]
    fn test_deal_then_reset() {
        let mut d = Deck::new();
        let mut rng = StdRng::seed_from_u64(420);
        d.shuffle(&mut rng);

        let dealt = d.deal().unwrap();
        assert_eq!(51, d.len());
        assert!(!d.contains(&dealt));

        d.reset();
        assert_eq!(52, d.len());
        assert!(d.contains(&dealt));
    }

    #[test]
    fn test_shuffle_rng() {
        let mut d_one = Deck::new();
        let mut d_two = Deck::new();

        let mut rng_one = StdRng::seed_from_u64(420);
        let mut rng_two = StdRng::seed_from_u64(420);

        d_one.shuffle(&mut rng_one);
        d_two.shuffle(&mut rng_two);

        assert_eq!(d_one, d_two);
    }
}
