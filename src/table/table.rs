use rand::Rng;
use tracing::event;

use crate::core::{Card, Deck};
use crate::evaluate::{Evaluator, HandClass};

use super::Chips;
use super::action::Action;
use super::error::TableError;
use super::player::TablePlayer;
use super::position::Position;
use super::pot::Pot;
use super::street::Street;

/// The root aggregate: seats, board, deck, pot, street, turn cursor
/// and betting counters for a single No-Limit Hold'em table.
///
/// The table is strictly single-writer. One action is validated and
/// applied at a time; a rejected action returns an error before any
/// state is touched. Everything shared between tables (cards, the
/// evaluator's lookup table) is immutable, so independent tables can
/// be driven from separate threads with nothing in common.
#[derive(Debug, Clone)]
pub struct Table {
    seats: Vec<Option<TablePlayer>>,
    board: Vec<Card>,
    deck: Deck,
    pot: Pot,
    street: Street,
    current_seat: Option<usize>,
    button: Option<usize>,
    big_blind: Chips,
    /// The minimum total bet level a bet or raise must reach.
    min_bet: Chips,
    cnt_bets: u32,
    cnt_calls: u32,
    cnt_cold_calls: u32,
    cnt_limps: u32,
    evaluator: Evaluator,
}

impl Table {
    /// A table with `num_seats` empty seats (2..=10) and the given
    /// big blind size.
    pub fn new(num_seats: usize, big_blind: Chips) -> Result<Self, TableError> {
        if !(2..=10).contains(&num_seats) {
            return Err(TableError::InvalidRingSize(num_seats));
        }
        if big_blind < 0 {
            return Err(TableError::NegativeChips(big_blind));
        }
        Ok(Table {
            seats: vec![None; num_seats],
            board: Vec::with_capacity(5),
            deck: Deck::new(),
            pot: Pot::new(),
            street: Street::Preflop,
            current_seat: None,
            button: None,
            big_blind,
            min_bet: big_blind,
            cnt_bets: 0,
            cnt_calls: 0,
            cnt_cold_calls: 0,
            cnt_limps: 0,
            evaluator: Evaluator::new(),
        })
    }

    // ----- seating -------------------------------------------------

    /// Seat a player. Fails if the seat is occupied or no seat is
    /// free.
    pub fn sit(&mut self, player: TablePlayer, seat: usize) -> Result<(), TableError> {
        if seat >= self.seats.len() {
            return Err(TableError::NoSuchSeat(seat));
        }
        if self.seats.iter().all(|s| s.is_some()) {
            return Err(TableError::FullTable);
        }
        if self.seats[seat].is_some() {
            return Err(TableError::SeatTaken(seat));
        }
        self.seats[seat] = Some(player);
        self.reassign_positions();
        Ok(())
    }

    /// Remove and return the player in the given seat.
    pub fn sit_out(&mut self, seat: usize) -> Result<TablePlayer, TableError> {
        if seat >= self.seats.len() {
            return Err(TableError::NoSuchSeat(seat));
        }
        let player = self.seats[seat]
            .take()
            .ok_or(TableError::PlayerNotOnTable(seat))?;
        if self.button == Some(seat) {
            self.button = None;
        }
        self.reassign_positions();
        Ok(player)
    }

    /// Move the dealer button. The seat must be occupied since the
    /// blind seats derive from it.
    pub fn set_button(&mut self, seat: usize) -> Result<(), TableError> {
        if seat >= self.seats.len() || self.seats[seat].is_none() {
            return Err(TableError::EmptyButtonSeat);
        }
        self.button = Some(seat);
        self.reassign_positions();
        Ok(())
    }

    pub fn button(&self) -> Option<usize> {
        self.button
    }

    pub fn num_players(&self) -> usize {
        self.seats.iter().filter(|s| s.is_some()).count()
    }

    pub fn player(&self, seat: usize) -> Option<&TablePlayer> {
        self.seats.get(seat).and_then(|s| s.as_ref())
    }

    /// Every occupied seat with its player, in seat order.
    pub fn players(&self) -> impl Iterator<Item = (usize, &TablePlayer)> {
        self.seats
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|p| (i, p)))
    }

    fn player_mut(&mut self, seat: usize) -> Result<&mut TablePlayer, TableError> {
        self.seats
            .get_mut(seat)
            .and_then(|s| s.as_mut())
            .ok_or(TableError::PlayerNotOnTable(seat))
    }

    /// Occupied seats scanned circularly starting at `start`.
    fn occupied_from(&self, start: usize) -> Vec<usize> {
        (0..self.seats.len())
            .map(|i| (start + i) % self.seats.len())
            .filter(|i| self.seats[*i].is_some())
            .collect()
    }

    /// The small and big blind seats, derived from the button.
    /// Heads-up the button posts the small blind.
    fn blind_seats(&self) -> Result<(usize, usize), TableError> {
        let button = self.button.ok_or(TableError::EmptyButtonSeat)?;
        if self.seats[button].is_none() {
            return Err(TableError::EmptyButtonSeat);
        }
        let occupied = self.occupied_from(button);
        match occupied.len() {
            0 | 1 => Err(TableError::EmptyButtonSeat),
            2 => Ok((occupied[0], occupied[1])),
            _ => Ok((occupied[1], occupied[2])),
        }
    }

    /// Positions are assigned relative to the big blind seat and
    /// recomputed whenever seating changes. A no-op while the blind
    /// seats cannot be derived yet.
    fn reassign_positions(&mut self) {
        let Ok((sb, _)) = self.blind_seats() else {
            for seat in self.seats.iter_mut().flatten() {
                seat.position = None;
            }
            return;
        };
        let order = self.occupied_from(sb);
        let Ok(ring) = Position::ring(order.len()) else {
            return;
        };
        for (seat, position) in order.into_iter().zip(ring) {
            if let Some(player) = self.seats[seat].as_mut() {
                player.position = Some(position);
            }
        }
    }

    // ----- hand lifecycle ------------------------------------------

    /// Start a fresh hand: new shuffled deck, cleared board and pot,
    /// every player's hand status reset, cursor on the first preflop
    /// seat. Blinds and combos arrive afterwards as events.
    pub fn start_hand<R: Rng>(&mut self, rng: &mut R) -> Result<(), TableError> {
        let (_, bb) = self.blind_seats()?;
        self.pot.reset();
        self.board.clear();
        self.deck.reset();
        self.deck.shuffle(rng);
        self.street = Street::Preflop;
        self.min_bet = self.big_blind;
        self.cnt_bets = 0;
        self.cnt_calls = 0;
        self.cnt_cold_calls = 0;
        self.cnt_limps = 0;
        for player in self.seats.iter_mut().flatten() {
            player.reset_hand_status();
        }
        self.reassign_positions();
        let next = self.occupied_from((bb + 1) % self.seats.len());
        self.current_seat = next.first().copied();
        event!(
            tracing::Level::DEBUG,
            players = self.num_players(),
            "hand started"
        );
        Ok(())
    }

    /// Deal a player's two hole cards out of the shared deck, either
    /// the named cards or at random. Drawing from the one deck is
    /// what keeps every combo disjoint from the board and from every
    /// other combo.
    pub fn deal_combo(
        &mut self,
        seat: usize,
        cards: Option<[Card; 2]>,
    ) -> Result<(), TableError> {
        let known = self
            .player(seat)
            .ok_or(TableError::PlayerNotOnTable(seat))?
            .combo;
        match (known, cards) {
            // Already dealt; announcing the same combo again is fine.
            (Some(held), Some(named)) if held == named => Ok(()),
            (Some(_), None) => Ok(()),
            (Some(_), Some(named)) => Err(TableError::CardUnavailable(named[0])),
            (None, Some(named)) => {
                if named[0] == named[1] {
                    return Err(TableError::CardUnavailable(named[1]));
                }
                for card in &named {
                    if !self.deck.contains(card) {
                        return Err(TableError::CardUnavailable(*card));
                    }
                }
                for card in &named {
                    self.deck
                        .draw(card)
                        .map_err(|_| TableError::CardUnavailable(*card))?;
                }
                self.player_mut(seat)?.combo = Some(named);
                Ok(())
            }
            (None, None) => {
                if self.deck.len() < 2 {
                    return Err(TableError::EmptyDeck);
                }
                let first = self.deck.deal().ok_or(TableError::EmptyDeck)?;
                let second = self.deck.deal().ok_or(TableError::EmptyDeck)?;
                self.player_mut(seat)?.combo = Some([first, second]);
                Ok(())
            }
        }
    }

    // ----- forced bets ---------------------------------------------

    /// Post a dead ante. Antes swell the pot without moving the
    /// street's bet level and without using up the seat's action.
    pub fn post_ante(&mut self, seat: usize, amount: Chips) -> Result<(), TableError> {
        if amount < 0 {
            return Err(TableError::NegativeChips(amount));
        }
        let paid = self.player_mut(seat)?.pay_dead(amount);
        self.pot.add(paid)
    }

    /// Post the small blind: a forced, live bet.
    pub fn post_small_blind(&mut self, seat: usize, amount: Chips) -> Result<(), TableError> {
        self.post_blind(seat, amount)
    }

    /// Post the big blind. Records the table's big blind size, which
    /// anchors `min_bet` for the rest of the hand.
    pub fn post_big_blind(&mut self, seat: usize, amount: Chips) -> Result<(), TableError> {
        self.post_blind(seat, amount)?;
        self.big_blind = amount;
        self.min_bet = 2 * amount;
        Ok(())
    }

    fn post_blind(&mut self, seat: usize, amount: Chips) -> Result<(), TableError> {
        if amount < 0 {
            return Err(TableError::NegativeChips(amount));
        }
        let player = self.player_mut(seat)?;
        let paid = player.pay(amount);
        let level = player.current_bet;
        self.pot.add(paid)?;
        self.pot.update_highest_bet(level)
    }

    // ----- betting queries -----------------------------------------

    pub fn street(&self) -> Street {
        self.street
    }

    pub fn pot(&self) -> &Pot {
        &self.pot
    }

    pub fn board(&self) -> &[Card] {
        &self.board
    }

    pub fn big_blind(&self) -> Chips {
        self.big_blind
    }

    /// The minimum total level a bet or raise must reach right now.
    pub fn min_bet(&self) -> Chips {
        self.min_bet
    }

    pub fn cnt_bets(&self) -> u32 {
        self.cnt_bets
    }

    pub fn cnt_calls(&self) -> u32 {
        self.cnt_calls
    }

    pub fn cnt_cold_calls(&self) -> u32 {
        self.cnt_cold_calls
    }

    pub fn cnt_limps(&self) -> u32 {
        self.cnt_limps
    }

    /// The seat whose turn it is, if anyone can still act.
    pub fn current_seat(&self) -> Option<usize> {
        self.current_seat
    }

    pub fn current_player(&self) -> Option<&TablePlayer> {
        self.current_seat.and_then(|s| self.player(s))
    }

    /// Seat-level wrapper over [`TablePlayer::to_call`].
    pub fn to_call(&self, seat: usize) -> Result<Chips, TableError> {
        self.player(seat)
            .map(|p| p.to_call(self.pot.highest_bet()))
            .ok_or(TableError::PlayerNotOnTable(seat))
    }

    /// Seat-level wrapper over [`TablePlayer::min_raise`].
    pub fn min_raise(&self, seat: usize) -> Result<Chips, TableError> {
        self.player(seat)
            .map(|p| p.min_raise(self.min_bet, self.pot.highest_bet()))
            .ok_or(TableError::PlayerNotOnTable(seat))
    }

    pub fn pot_odds(&self, seat: usize) -> Result<f64, TableError> {
        self.player(seat)
            .map(|p| p.pot_odds(self.pot.value(), self.pot.highest_bet()))
            .ok_or(TableError::PlayerNotOnTable(seat))
    }

    pub fn req_equity(&self, seat: usize) -> Result<f64, TableError> {
        self.player(seat)
            .map(|p| p.req_equity(self.pot.value(), self.pot.highest_bet()))
            .ok_or(TableError::PlayerNotOnTable(seat))
    }

    /// The deepest stack this seat can actually play for: its own,
    /// capped by the biggest stack among the other contesters.
    pub fn effective_stack(&self, seat: usize) -> Result<Chips, TableError> {
        let own = self
            .player(seat)
            .ok_or(TableError::PlayerNotOnTable(seat))?
            .stack;
        let deepest_other = self
            .players()
            .filter(|(i, p)| *i != seat && p.is_in_hand())
            .map(|(_, p)| p.stack)
            .max()
            .unwrap_or(0);
        Ok(own.min(deepest_other))
    }

    /// The classic side-pot entitlement cap: the most this seat can
    /// be paid out of the current pot. Zero once folded.
    pub fn max_reward(&self, seat: usize) -> Result<Chips, TableError> {
        let player = self
            .player(seat)
            .ok_or(TableError::PlayerNotOnTable(seat))?;
        if player.folded {
            return Ok(0);
        }
        let own = player.invested;
        Ok(self.players().map(|(_, p)| own.min(p.invested)).sum())
    }

    /// Suggested open sizes: fixed multiples of the minimum preflop,
    /// a pot-fraction ladder postflop.
    pub fn bet_sizings(&self) -> Vec<Chips> {
        match self.street {
            Street::Preflop => [2, 3, 4, 5].iter().map(|m| m * self.min_bet).collect(),
            _ => {
                let pot = self.pot.value();
                vec![pot / 3, pot / 2, 2 * pot / 3, 3 * pot / 4, pot]
            }
        }
    }

    // ----- turn order ----------------------------------------------

    /// Seats in acting order for the current street. Preflop the
    /// order starts immediately after the big blind; postflop the
    /// blinds move to the front and the button acts last.
    pub fn playing_order(&self) -> Vec<usize> {
        let Ok((sb, bb)) = self.blind_seats() else {
            return Vec::new();
        };
        match self.street {
            Street::Preflop => self.occupied_from((bb + 1) % self.seats.len()),
            _ => self.occupied_from(sb),
        }
    }

    fn seat_can_play(&self, seat: usize) -> bool {
        self.player(seat)
            .is_some_and(|p| p.can_play(self.pot.highest_bet()))
    }

    /// Move the cursor to the next seat that still owes an action,
    /// skipping folded, all-in and already-matched seats. The cursor
    /// goes empty when the street is over.
    pub fn advance_seat_playing(&mut self) {
        let order = self.playing_order();
        if order.is_empty() {
            self.current_seat = None;
            return;
        }
        let start = match self.current_seat {
            Some(seat) => order.iter().position(|s| *s == seat).map_or(0, |i| i + 1),
            None => 0,
        };
        self.current_seat = (0..order.len())
            .map(|i| order[(start + i) % order.len()])
            .find(|seat| self.seat_can_play(*seat));
    }

    // ----- actions -------------------------------------------------

    /// Validate and apply an action for the seat whose turn it is,
    /// then advance the cursor. A returned error means nothing
    /// changed.
    pub fn play(&mut self, action: Action) -> Result<(), TableError> {
        self.execute_action(action)?;
        self.advance_seat_playing();
        Ok(())
    }

    /// Validate and apply an action without touching the cursor.
    pub fn execute_action(&mut self, action: Action) -> Result<(), TableError> {
        if !self.street.is_betting() {
            return Err(TableError::NoPlayerToAct);
        }
        let seat = self.current_seat.ok_or(TableError::NoPlayerToAct)?;
        let highest = self.pot.highest_bet();
        let min_bet = self.min_bet;
        let street = self.street;

        // Validate against a shared borrow first; nothing below may
        // fail once mutation starts.
        let player = self
            .player(seat)
            .ok_or(TableError::PlayerNotOnTable(seat))?;
        let to_call = player.to_call(highest);
        let had_played = player.played;
        match action {
            Action::Fold | Action::Call => {}
            Action::Check => {
                if to_call != 0 {
                    return Err(TableError::CheckNotAllowed { to_call });
                }
            }
            Action::Bet(value) => {
                if to_call != 0 || value < min_bet {
                    return Err(TableError::InsufficientBet {
                        value,
                        min: min_bet,
                    });
                }
            }
            Action::Raise(added) => {
                let min_raise = player.min_raise(min_bet, highest);
                let is_all_in = added + to_call >= player.stack;
                if added < min_raise && !is_all_in {
                    return Err(TableError::InsufficientRaise {
                        value: added,
                        min: min_raise,
                    });
                }
            }
        }

        match action {
            Action::Fold => {
                let player = self.player_mut(seat)?;
                player.folded = true;
                player.played = true;
            }
            Action::Check => {
                self.player_mut(seat)?.played = true;
            }
            Action::Call => {
                let player = self.player_mut(seat)?;
                let paid = player.pay(to_call);
                player.played = true;
                let level = player.current_bet;
                self.pot.add(paid)?;
                self.pot.update_highest_bet(level)?;
                self.cnt_calls += 1;
                if to_call > 0 && street == Street::Preflop {
                    if highest == self.big_blind {
                        self.cnt_limps += 1;
                    } else if !had_played {
                        // Calling a raise without having voluntarily
                        // entered the street yet; blind posts don't
                        // count as having played.
                        self.cnt_cold_calls += 1;
                    }
                }
            }
            Action::Bet(value) => {
                let player = self.player_mut(seat)?;
                let paid = player.pay(value);
                player.played = true;
                let level = player.current_bet;
                self.pot.add(paid)?;
                self.pot.update_highest_bet(level)?;
                self.min_bet = (2 * level - highest).max(self.min_bet);
                self.cnt_bets += 1;
                self.move_initiative(seat);
            }
            Action::Raise(added) => {
                let player = self.player_mut(seat)?;
                let paid = player.pay(added + to_call);
                player.played = true;
                let level = player.current_bet;
                self.pot.add(paid)?;
                self.pot.update_highest_bet(level)?;
                self.min_bet = (2 * level - highest).max(self.min_bet);
                self.cnt_bets += 1;
                self.move_initiative(seat);
            }
        }
        self.player_mut(seat)?.record(street, action);
        event!(
            tracing::Level::TRACE,
            seat,
            %action,
            pot = self.pot.value(),
            "action applied"
        );
        Ok(())
    }

    fn move_initiative(&mut self, seat: usize) {
        for (i, player) in self
            .seats
            .iter_mut()
            .enumerate()
            .filter_map(|(i, s)| s.as_mut().map(|p| (i, p)))
        {
            player.has_initiative = i == seat;
        }
    }

    // ----- street machine ------------------------------------------

    /// Seats still contesting the pot.
    pub fn contesters(&self) -> Vec<usize> {
        self.players()
            .filter(|(_, p)| p.is_in_hand())
            .map(|(i, _)| i)
            .collect()
    }

    /// Betting on the current street is finished: nobody owes an
    /// action, a lone contester has matched the bet level, or at
    /// showdown every contester has revealed.
    pub fn street_ended(&self) -> bool {
        if self.street == Street::Showdown {
            return self
                .contesters()
                .iter()
                .all(|s| self.player(*s).is_some_and(|p| p.has_revealed()));
        }
        let order = self.playing_order();
        if !order.iter().any(|s| self.seat_can_play(*s)) {
            return true;
        }
        let contesters = self.contesters();
        contesters.len() == 1
            && self
                .player(contesters[0])
                .is_some_and(|p| p.current_bet == self.pot.highest_bet())
    }

    /// One contester left, or a fully revealed showdown.
    pub fn hand_ended(&self) -> bool {
        let contesters = self.contesters();
        contesters.len() == 1
            || (self.street == Street::Showdown
                && contesters
                    .iter()
                    .all(|s| self.player(*s).is_some_and(|p| p.has_revealed())))
    }

    /// The street is done but the hand is not: time to deal.
    pub fn next_street_ready(&self) -> bool {
        self.street_ended() && !self.hand_ended()
    }

    /// Deal the flop, either the named cards or at random.
    pub fn deal_flop(&mut self, cards: Option<[Card; 3]>) -> Result<(), TableError> {
        self.deal_street(Street::Flop, &cards.map(|c| c.to_vec()))
    }

    /// Deal the turn.
    pub fn deal_turn(&mut self, card: Option<Card>) -> Result<(), TableError> {
        self.deal_street(Street::Turn, &card.map(|c| vec![c]))
    }

    /// Deal the river.
    pub fn deal_river(&mut self, card: Option<Card>) -> Result<(), TableError> {
        self.deal_street(Street::River, &card.map(|c| vec![c]))
    }

    /// Move from the river into the showdown.
    pub fn enter_showdown(&mut self) -> Result<(), TableError> {
        if self.street != Street::River || !self.next_street_ready() {
            return Err(TableError::StreetNotReady(Street::Showdown));
        }
        self.street = Street::Showdown;
        self.street_reset();
        Ok(())
    }

    fn deal_street(
        &mut self,
        target: Street,
        cards: &Option<Vec<Card>>,
    ) -> Result<(), TableError> {
        let legal = self.street.next() == target
            && self.next_street_ready()
            && self.board.len() == self.street.board_len();
        if !legal {
            return Err(TableError::StreetNotReady(target));
        }
        let needed = target.board_len() - self.board.len();
        if let Some(named) = cards {
            if named.len() != needed {
                return Err(TableError::StreetNotReady(target));
            }
            for (i, card) in named.iter().enumerate() {
                if !self.deck.contains(card) || named[..i].contains(card) {
                    return Err(TableError::CardUnavailable(*card));
                }
            }
            for card in named {
                self.deck
                    .draw(card)
                    .map_err(|_| TableError::CardUnavailable(*card))?;
                self.board.push(*card);
            }
        } else {
            for _ in 0..needed {
                let card = self
                    .deck
                    .deal()
                    .ok_or(TableError::StreetNotReady(target))?;
                self.board.push(card);
            }
        }
        self.street = target;
        self.street_reset();
        event!(
            tracing::Level::DEBUG,
            street = %target,
            board = ?self.board,
            "street dealt"
        );
        Ok(())
    }

    /// Street boundary: bet level and counters restart, the minimum
    /// bet drops back to the big blind, every seat's street state
    /// clears, and the cursor lands on the first seat of the new
    /// order that can act.
    fn street_reset(&mut self) {
        self.pot.reset_street();
        self.min_bet = self.big_blind;
        self.cnt_bets = 0;
        self.cnt_calls = 0;
        self.cnt_cold_calls = 0;
        self.cnt_limps = 0;
        for player in self.seats.iter_mut().flatten() {
            player.street_reset();
        }
        self.current_seat = None;
        self.advance_seat_playing();
    }

    // ----- showdown & payout ---------------------------------------

    /// Reveal a contester's hole cards at showdown. Before the
    /// showdown (and while the hand is live) this fails without
    /// touching anything.
    pub fn reveal_combo(
        &mut self,
        seat: usize,
        cards: Option<[Card; 2]>,
    ) -> Result<(), TableError> {
        if self.street != Street::Showdown && !self.hand_ended() {
            return Err(TableError::ShowdownNotReached);
        }
        self.deal_combo(seat, cards)
    }

    /// Are all contesting strengths knowable?
    pub fn can_parse_winners(&self) -> bool {
        if !self.hand_ended() {
            return false;
        }
        let contesters = self.contesters();
        contesters.len() == 1
            || contesters
                .iter()
                .all(|s| self.player(*s).is_some_and(|p| p.has_revealed()))
    }

    /// The score of a contester's best five card hand.
    pub fn hand_score(&self, seat: usize) -> Result<u16, TableError> {
        let player = self
            .player(seat)
            .ok_or(TableError::PlayerNotOnTable(seat))?;
        let combo = player.combo.ok_or(TableError::CannotParseWinners)?;
        Ok(self.evaluator.evaluate(&combo, &self.board)?)
    }

    /// The rank class of a contester's best hand.
    pub fn rank_class(&self, seat: usize) -> Result<HandClass, TableError> {
        let score = self.hand_score(seat)?;
        Ok(self.evaluator.rank_class(score)?)
    }

    /// The class name of a contester's best hand.
    pub fn class_string(&self, seat: usize) -> Result<&'static str, TableError> {
        let score = self.hand_score(seat)?;
        Ok(self.evaluator.class_string(score)?)
    }

    /// Contesting seats grouped into strength tiers, best first.
    /// Fails before every contesting strength is knowable.
    pub fn winners(&self) -> Result<Vec<Vec<usize>>, TableError> {
        if !self.can_parse_winners() {
            return Err(TableError::CannotParseWinners);
        }
        let contesters = self.contesters();
        if contesters.len() == 1 {
            return Ok(vec![contesters]);
        }
        let mut by_score = std::collections::BTreeMap::<u16, Vec<usize>>::new();
        for seat in contesters {
            by_score.entry(self.hand_score(seat)?).or_default().push(seat);
        }
        Ok(by_score.into_values().collect())
    }

    /// Compute every contester's `hand_reward` from the pot, layer by
    /// layer, without moving any chips yet.
    pub fn calculate_rewards(&mut self) -> Result<(), TableError> {
        let tiers = self.winners()?;
        let invested: Vec<(usize, Chips)> =
            self.players().map(|(i, p)| (i, p.invested)).collect();
        let rewards = reward_map(&invested, &tiers);
        for (seat, reward) in rewards {
            self.player_mut(seat)?.hand_reward = reward;
        }
        Ok(())
    }

    /// Compute rewards and move the chips: stacks grow by their
    /// reward and the pot empties. Chips are conserved: the sum of
    /// all stacks afterwards equals the pre-hand total.
    pub fn calculate_and_distribute_rewards(&mut self) -> Result<(), TableError> {
        self.calculate_rewards()?;
        for player in self.seats.iter_mut().flatten() {
            player.stack += player.hand_reward;
        }
        self.pot.reset();
        event!(tracing::Level::DEBUG, "pot distributed");
        Ok(())
    }
}

/// Split the pot over strength tiers against an immutable snapshot
/// of each seat's investment. Tiers are processed best to worst; each
/// pass collects the layer up to the smallest remaining investment
/// among the tier's members and splits it evenly (odd chips go to the
/// earliest members). Anything no tier is entitled to, an uncalled
/// over-investment, flows back to whoever staked it.
fn reward_map(invested: &[(usize, Chips)], tiers: &[Vec<usize>]) -> Vec<(usize, Chips)> {
    let mut remaining: Vec<(usize, Chips)> = invested.to_vec();
    let mut rewards: Vec<(usize, Chips)> = invested.iter().map(|(s, _)| (*s, 0)).collect();

    let stake = |remaining: &[(usize, Chips)], seat: usize| {
        remaining
            .iter()
            .find(|(s, _)| *s == seat)
            .map_or(0, |(_, c)| *c)
    };
    let credit = |rewards: &mut Vec<(usize, Chips)>, seat: usize, amount: Chips| {
        if let Some(entry) = rewards.iter_mut().find(|(s, _)| *s == seat) {
            entry.1 += amount;
        }
    };

    for tier in tiers {
        let mut members: Vec<usize> = tier.clone();
        members.sort_by_key(|s| stake(&remaining, *s));

        let mut start = 0;
        while start < members.len() {
            // The shallowest member caps this layer.
            let cap = stake(&remaining, members[start]);
            if cap == 0 {
                start += 1;
                continue;
            }
            let mut layer: Chips = 0;
            for (_, inv) in remaining.iter_mut() {
                let collected = (*inv).min(cap);
                *inv -= collected;
                layer += collected;
            }
            let n = (members.len() - start) as Chips;
            let share = layer / n;
            let bonus = layer % n;
            for (i, seat) in members[start..].iter().enumerate() {
                credit(&mut rewards, *seat, share + Chips::from((i as Chips) < bonus));
            }
            start += 1;
        }
    }

    // Refund whatever nobody could win.
    for (seat, inv) in remaining {
        if inv > 0 {
            credit(&mut rewards, seat, inv);
        }
    }
    rewards
}
