use crate::core::Card;

use super::Chips;
use super::action::Action;
use super::position::Position;
use super::street::Street;

/// A seat occupant. Players are created on their own and attached to
/// a table with [`Table::sit`](super::Table::sit); `init_stack` and
/// `stack` persist across hands, everything else is hand-scoped and
/// reset by [`reset_hand_status`](TablePlayer::reset_hand_status).
///
/// The betting queries are pure functions of the player plus the
/// table context passed in explicitly; the seat-level wrappers on
/// [`Table`](super::Table) supply that context.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct TablePlayer {
    pub name: String,
    /// The stack the player sat down with.
    pub init_stack: Chips,
    pub stack: Chips,
    /// Total committed on the current street.
    pub current_bet: Chips,
    /// Total committed over the whole hand, antes included.
    pub invested: Chips,
    pub folded: bool,
    /// Has the player acted since the last bet level change?
    pub played: bool,
    /// Did this player make the last aggressive action this street?
    pub has_initiative: bool,
    pub position: Option<Position>,
    /// The two hole cards, once dealt or revealed.
    pub combo: Option<[Card; 2]>,
    /// Chips won at the last payout.
    pub hand_reward: Chips,
    /// Per-street log of everything this player did this hand.
    actions: Vec<(Street, Action)>,
}

impl TablePlayer {
    pub fn new(name: impl Into<String>, stack: Chips) -> Self {
        TablePlayer {
            name: name.into(),
            init_stack: stack,
            stack,
            current_bet: 0,
            invested: 0,
            folded: false,
            played: false,
            has_initiative: false,
            position: None,
            combo: None,
            hand_reward: 0,
            actions: Vec::new(),
        }
    }

    /// Chips needed to match the current bet level, capped by stack.
    pub fn to_call(&self, highest_bet: Chips) -> Chips {
        self.stack.min((highest_bet - self.current_bet).max(0))
    }

    /// The minimum extra amount a legal raise must add on top of the
    /// call, given the table's current minimum total bet.
    pub fn min_raise(&self, min_bet: Chips, highest_bet: Chips) -> Chips {
        (min_bet - (self.to_call(highest_bet) + self.current_bet)).max(0)
    }

    /// Can this stack do anything beyond calling?
    pub fn stack_enables_raise(&self, highest_bet: Chips) -> bool {
        self.stack > self.to_call(highest_bet)
    }

    pub fn is_all_in(&self) -> bool {
        self.stack == 0
    }

    /// Still contesting the pot?
    pub fn is_in_hand(&self) -> bool {
        !self.folded
    }

    pub fn has_revealed(&self) -> bool {
        self.combo.is_some()
    }

    /// Does this seat still owe the street an action?
    pub fn can_play(&self, highest_bet: Chips) -> bool {
        !self.is_all_in() && !(self.to_call(highest_bet) == 0 && self.played) && !self.folded
    }

    /// Pot odds being offered: infinite when there is nothing to
    /// call, else pot value over the call amount.
    pub fn pot_odds(&self, pot_value: Chips, highest_bet: Chips) -> f64 {
        let to_call = self.to_call(highest_bet);
        if to_call == 0 {
            f64::INFINITY
        } else {
            f64::from(pot_value) / f64::from(to_call)
        }
    }

    /// The equity needed to break even on a call.
    pub fn req_equity(&self, pot_value: Chips, highest_bet: Chips) -> f64 {
        1.0 / (1.0 + self.pot_odds(pot_value, highest_bet))
    }

    /// Commit chips toward the street's bet level. Returns how much
    /// actually moved (capped by the stack).
    pub(crate) fn pay(&mut self, amount: Chips) -> Chips {
        let paid = self.stack.min(amount);
        self.stack -= paid;
        self.current_bet += paid;
        self.invested += paid;
        paid
    }

    /// Commit dead chips (antes): they count as invested but not
    /// toward the street's bet level.
    pub(crate) fn pay_dead(&mut self, amount: Chips) -> Chips {
        let paid = self.stack.min(amount);
        self.stack -= paid;
        self.invested += paid;
        paid
    }

    pub(crate) fn record(&mut self, street: Street, action: Action) {
        self.actions.push((street, action));
    }

    /// Everything the player did on the given street, oldest first.
    pub fn actions_on(&self, street: Street) -> impl Iterator<Item = &Action> {
        self.actions
            .iter()
            .filter(move |(s, _)| *s == street)
            .map(|(_, a)| a)
    }

    /// Clear everything hand-scoped. Stacks persist.
    pub fn reset_hand_status(&mut self) {
        self.current_bet = 0;
        self.invested = 0;
        self.folded = false;
        self.played = false;
        self.has_initiative = false;
        self.combo = None;
        self.hand_reward = 0;
        self.actions.clear();
    }

    /// Street boundary: the street bet level restarts, the hand
    /// investment stays.
    pub(crate) fn street_reset(&mut self) {
        self.current_bet = 0;
        self.played = false;
        self.has_initiative = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_to_call_capped_by_stack() {
        let mut player = TablePlayer::new("bob", 100);
        assert_eq!(100, player.to_call(500));
        player.current_bet = 40;
        // Owes 500 - 40 but only has 100 behind.
        assert_eq!(100, player.to_call(500));
        assert_eq!(0, player.to_call(20));
    }

    #[test]
    fn test_min_raise() {
        let mut player = TablePlayer::new("bob", 1000);
        // Facing a bet of 100 with a min total of 200: the raise
        // must add at least 100 on top of the call.
        assert_eq!(100, player.min_raise(200, 100));
        player.current_bet = 100;
        assert_eq!(100, player.min_raise(200, 100));
    }

    #[test]
    fn test_can_play() {
        let mut player = TablePlayer::new("bob", 100);
        assert!(player.can_play(0));
        player.played = true;
        assert!(!player.can_play(0));
        // A new bet reopens the action.
        assert!(player.can_play(50));
        player.folded = true;
        assert!(!player.can_play(50));
    }

    #[test]
    fn test_all_in_cannot_play() {
        let mut player = TablePlayer::new("bob", 100);
        player.pay(100);
        assert!(player.is_all_in());
        assert!(!player.can_play(500));
    }

    #[test]
    fn test_pay_tracks_invested() {
        let mut player = TablePlayer::new("bob", 100);
        assert_eq!(10, player.pay_dead(10));
        assert_eq!(0, player.current_bet);
        assert_eq!(40, player.pay(40));
        assert_eq!(40, player.current_bet);
        assert_eq!(50, player.invested);
        // Paying past the stack caps out.
        assert_eq!(50, player.pay(500));
        assert_eq!(100, player.invested);
        assert!(player.is_all_in());
    }

    #[test]
    fn test_pot_odds() {
        let mut player = TablePlayer::new("bob", 1000);
        assert!(player.pot_odds(100, 0).is_infinite());
        assert_relative_eq!(0.0, player.req_equity(100, 0));
        player.current_bet = 0;
        // 100 in the pot, 50 to call: 2:1, needs a third equity.
        assert_relative_eq!(2.0, player.pot_odds(100, 50));
        assert_relative_eq!(1.0 / 3.0, player.req_equity(100, 50));
    }

    #[test]
    fn test_reset_hand_status() {
        let mut player = TablePlayer::new("bob", 100);
        player.pay(30);
        player.folded = true;
        player.played = true;
        player.combo = Some([Card::try_from("As").unwrap(), Card::try_from("Kd").unwrap()]);
        player.record(Street::Preflop, Action::Fold);

        player.reset_hand_status();
        assert_eq!(70, player.stack);
        assert_eq!(100, player.init_stack);
        assert_eq!(0, player.invested);
        assert!(!player.folded);
        assert!(player.combo.is_none());
        assert_eq!(0, player.actions_on(Street::Preflop).count());
    }
}
