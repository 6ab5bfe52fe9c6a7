use crate::core::Card;

use super::Chips;
use super::action::Action;
use super::error::TableError;
use super::table::Table;

/// The resolved form of a provider's hand-history events: every one
/// names a seat, a move kind, and optionally an amount or cards.
/// The table never sees the provider's wire format; whatever the
/// ingestion layer parses, it hands over one of these.
///
/// Card fields are optional everywhere a draw can happen: `None`
/// means "deal randomly from the live deck", used when a history
/// doesn't show the cards.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TableEvent {
    PostAnte { seat: usize, amount: Chips },
    PostSmallBlind { seat: usize, amount: Chips },
    PostBigBlind { seat: usize, amount: Chips },
    DealCombo { seat: usize, cards: Option<[Card; 2]> },
    Play { action: Action },
    DealFlop { cards: Option<[Card; 3]> },
    DealTurn { card: Option<Card> },
    DealRiver { card: Option<Card> },
    EnterShowdown,
    Reveal { seat: usize, cards: Option<[Card; 2]> },
}

impl Table {
    /// Apply one resolved event. Errors leave the table untouched,
    /// so a caller can mark a single hand unconvertible and move on
    /// with the rest of its batch.
    pub fn apply(&mut self, event: TableEvent) -> Result<(), TableError> {
        match event {
            TableEvent::PostAnte { seat, amount } => self.post_ante(seat, amount),
            TableEvent::PostSmallBlind { seat, amount } => self.post_small_blind(seat, amount),
            TableEvent::PostBigBlind { seat, amount } => self.post_big_blind(seat, amount),
            TableEvent::DealCombo { seat, cards } => self.deal_combo(seat, cards),
            TableEvent::Play { action } => self.play(action),
            TableEvent::DealFlop { cards } => self.deal_flop(cards),
            TableEvent::DealTurn { card } => self.deal_turn(card),
            TableEvent::DealRiver { card } => self.deal_river(card),
            TableEvent::EnterShowdown => self.enter_showdown(),
            TableEvent::Reveal { seat, cards } => self.reveal_combo(seat, cards),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::TablePlayer;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn card(code: &str) -> Card {
        Card::try_from(code).unwrap()
    }

    #[test]
    fn test_full_hand_from_events() {
        let mut table = Table::new(2, 10).unwrap();
        table.sit(TablePlayer::new("hero", 1000), 0).unwrap();
        table.sit(TablePlayer::new("villain", 1000), 1).unwrap();
        table.set_button(0).unwrap();
        let mut rng = StdRng::seed_from_u64(420);
        table.start_hand(&mut rng).unwrap();

        let events = [
            TableEvent::PostSmallBlind { seat: 0, amount: 5 },
            TableEvent::PostBigBlind { seat: 1, amount: 10 },
            TableEvent::DealCombo {
                seat: 0,
                cards: Some([card("As"), card("Ks")]),
            },
            TableEvent::DealCombo { seat: 1, cards: None },
            TableEvent::Play {
                action: Action::Raise(20),
            },
            TableEvent::Play {
                action: Action::Call,
            },
            TableEvent::DealFlop { cards: None },
            TableEvent::Play {
                action: Action::Bet(40),
            },
            TableEvent::Play {
                action: Action::Fold,
            },
        ];
        for event in events {
            table.apply(event).unwrap();
        }

        assert!(table.hand_ended());
        table.calculate_and_distribute_rewards().unwrap();
        assert_eq!(0, table.pot().value());
        // Villain folded to the flop bet; hero wins the preflop pot
        // plus its own bet back.
        assert_eq!(1030, table.player(0).unwrap().stack);
        assert_eq!(970, table.player(1).unwrap().stack);
        assert_eq!(100, table.player(0).unwrap().hand_reward);
    }

    #[test]
    fn test_rejected_event_leaves_state_alone() {
        let mut table = Table::new(2, 10).unwrap();
        table.sit(TablePlayer::new("hero", 100), 0).unwrap();
        table.sit(TablePlayer::new("villain", 100), 1).unwrap();
        table.set_button(0).unwrap();
        let mut rng = StdRng::seed_from_u64(420);
        table.start_hand(&mut rng).unwrap();
        table
            .apply(TableEvent::PostSmallBlind { seat: 0, amount: 5 })
            .unwrap();
        table
            .apply(TableEvent::PostBigBlind { seat: 1, amount: 10 })
            .unwrap();

        let pot_before = table.pot().value();
        let err = table.apply(TableEvent::Play {
            action: Action::Check,
        });
        assert!(err.is_err());
        assert_eq!(pot_before, table.pot().value());
        assert_eq!(Some(0), table.current_seat());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_events_roundtrip_through_json() {
        let event = TableEvent::DealFlop {
            cards: Some([card("2c"), card("7d"), card("9h")]),
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: TableEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }
}
