use super::Chips;
use super::error::TableError;

/// The chips wagered during the current hand, together with the
/// highest total bet of the current street. All chip movement flows
/// through [`add`](Pot::add) and
/// [`update_highest_bet`](Pot::update_highest_bet); there is no other
/// mutation path.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pot {
    value: Chips,
    highest_bet: Chips,
}

impl Pot {
    pub fn new() -> Self {
        Pot::default()
    }

    /// The total wagered this hand.
    pub fn value(&self) -> Chips {
        self.value
    }

    /// The highest total bet any seat has made this street.
    pub fn highest_bet(&self) -> Chips {
        self.highest_bet
    }

    /// Move chips into the pot.
    pub fn add(&mut self, amount: Chips) -> Result<(), TableError> {
        if amount < 0 {
            return Err(TableError::NegativeChips(amount));
        }
        self.value += amount;
        Ok(())
    }

    /// Record a street bet level. Only ever raises the stored level.
    pub fn update_highest_bet(&mut self, amount: Chips) -> Result<(), TableError> {
        if amount < 0 {
            return Err(TableError::NegativeChips(amount));
        }
        if amount > self.highest_bet {
            self.highest_bet = amount;
        }
        Ok(())
    }

    /// Hand boundary: zero everything.
    pub fn reset(&mut self) {
        self.value = 0;
        self.highest_bet = 0;
    }

    /// Street boundary: the pot carries over, the bet level does not.
    pub fn reset_street(&mut self) {
        self.highest_bet = 0;
    }
}
