//! Authoritative table state and the transitions that drive it.
//!
//! `TableState` is a reducer over player commands and timer fires. It
//! never reads the clock, spawns nothing, and sleeps nowhere: callers
//! pass `now` into every entry point and learn from
//! [`TableState::next_deadline`] when to come back. All fields are
//! private, so every reachable state was produced by a validated
//! transition.

use std::fmt;
use std::time::Instant;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::betting::Ledger;
use super::config::TableConfig;
use super::constants::{COMMUNITY_CARDS, HOLE_CARDS, MAX_SEATS};
use super::entities::{
    BetKind, Card, Chips, Deck, Phase, Player, PlayerId, Round, SeatIndex, Seats,
};
use super::snapshot::{SeatSnapshot, TableSnapshot};
use super::turns;
use crate::eval::{self, HandStrength};

/// Reasons the table refuses a command. State is untouched whenever one
/// of these comes back.
#[derive(Clone, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum RejectedCommand {
    #[error("already seated at this table")]
    AlreadySeated,
    #[error("need ${needed} but only have ${available}")]
    InsufficientFunds { needed: Chips, available: Chips },
    #[error("seat {0} is not yours")]
    NotSeated(SeatIndex),
    #[error("not your turn")]
    OutOfTurn,
    #[error("seat {0} is taken")]
    SeatOccupied(SeatIndex),
    #[error("seat {0} does not exist")]
    SeatOutOfRange(SeatIndex),
}

/// Commands a client can submit against a seat. Identity rides along on
/// every command and is checked against the seat's occupant.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Command {
    Join {
        seat_idx: SeatIndex,
        id: PlayerId,
        name: String,
    },
    Exit {
        seat_idx: SeatIndex,
        id: PlayerId,
    },
    Call {
        seat_idx: SeatIndex,
        id: PlayerId,
    },
    Raise {
        seat_idx: SeatIndex,
        id: PlayerId,
    },
    Fold {
        seat_idx: SeatIndex,
        id: PlayerId,
    },
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Join { seat_idx, name, .. } => format!("{name} joins seat {seat_idx}"),
            Self::Exit { seat_idx, .. } => format!("seat {seat_idx} exits"),
            Self::Call { seat_idx, .. } => format!("seat {seat_idx} calls"),
            Self::Raise { seat_idx, .. } => format!("seat {seat_idx} raises"),
            Self::Fold { seat_idx, .. } => format!("seat {seat_idx} folds"),
        };
        write!(f, "{repr}")
    }
}

/// The state a timer was armed in. A fire whose guard no longer matches
/// the live state is stale and must do nothing. Guards come only from
/// [`TableState::next_deadline`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TimerGuard {
    phase: Phase,
    round: Option<Round>,
}

impl fmt::Display for TimerGuard {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.round {
            Some(round) => write!(f, "{}/{round}", self.phase),
            None => write!(f, "{}", self.phase),
        }
    }
}

/// Authoritative state of one table.
#[derive(Debug)]
pub struct TableState {
    config: TableConfig,
    seats: Seats,
    deck: Deck,
    community: Vec<Card>,
    ledger: Ledger,
    phase: Phase,
    round: Option<Round>,
    turn: Option<SeatIndex>,
    winners: Vec<SeatIndex>,
    last_winner: Option<SeatIndex>,
    status: Option<String>,
    actions_this_round: u32,
    phase_entered_at: Instant,
    round_entered_at: Instant,
}

impl TableState {
    #[must_use]
    pub fn new(config: TableConfig, now: Instant) -> Self {
        Self {
            config,
            seats: Seats::new(),
            deck: Deck::default(),
            community: Vec::with_capacity(COMMUNITY_CARDS),
            ledger: Ledger::default(),
            phase: Phase::Idle,
            round: None,
            turn: None,
            winners: Vec::new(),
            last_winner: None,
            status: Some("waiting for players".to_string()),
            actions_this_round: 0,
            phase_entered_at: now,
            round_entered_at: now,
        }
    }

    #[must_use]
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub const fn round(&self) -> Option<Round> {
        self.round
    }

    #[must_use]
    pub const fn turn(&self) -> Option<SeatIndex> {
        self.turn
    }

    /// Validate and apply one command. Rejections leave the state
    /// exactly as it was.
    pub fn apply(&mut self, command: Command, now: Instant) -> Result<(), RejectedCommand> {
        match command {
            Command::Join { seat_idx, id, name } => self.join(seat_idx, id, name, now),
            Command::Exit { seat_idx, id } => self.exit(seat_idx, &id, now),
            Command::Call { seat_idx, id } => self.bet(seat_idx, &id, BetKind::Call, now),
            Command::Raise { seat_idx, id } => self.bet(seat_idx, &id, BetKind::Raise, now),
            Command::Fold { seat_idx, id } => self.fold(seat_idx, &id, now),
        }
    }

    /// Apply the transition a timer fire asks for. Returns `false` when
    /// the guard no longer matches and nothing was done.
    pub fn on_timer(&mut self, guard: TimerGuard, now: Instant) -> bool {
        if guard.phase != self.phase || guard.round != self.round {
            warn!(
                "table '{}': ignoring stale timer armed at {guard}, table is now at {}",
                self.config.name,
                TimerGuard {
                    phase: self.phase,
                    round: self.round
                },
            );
            return false;
        }
        match (self.phase, self.round) {
            (Phase::Queued, _) => self.enter_phase(Phase::Active, now),
            (Phase::Active, Some(Round::Intermission)) => self.enter_round(Round::Preflop, now),
            (Phase::Active, Some(Round::Showdown)) => self.enter_round(Round::Intermission, now),
            (Phase::End, _) => self.full_reset(now),
            _ => return false,
        }
        true
    }

    /// When the table next moves on its own, and the guard that must
    /// still hold at fire time. `None` while the table is waiting on
    /// players rather than the clock.
    #[must_use]
    pub fn next_deadline(&self) -> Option<(TimerGuard, Instant)> {
        let fire_at = match (self.phase, self.round) {
            (Phase::Queued, _) => self.phase_entered_at + self.config.queue_delay,
            (Phase::Active, Some(Round::Intermission)) => {
                self.round_entered_at + self.config.intermission_delay
            }
            (Phase::Active, Some(Round::Showdown)) => {
                self.round_entered_at + self.config.showdown_delay
            }
            (Phase::End, _) => self.phase_entered_at + self.config.end_delay,
            _ => return None,
        };
        let guard = TimerGuard {
            phase: self.phase,
            round: self.round,
        };
        Some((guard, fire_at))
    }

    /// Full table view at `now`, safe to hand to any observer.
    #[must_use]
    pub fn snapshot(&self, now: Instant) -> TableSnapshot {
        let seats = (0..MAX_SEATS)
            .map(|seat_idx| {
                self.seats.get(seat_idx).map(|player| SeatSnapshot {
                    id: player.id.clone(),
                    name: player.name.clone(),
                    money: player.money,
                    bet: player.bet,
                    action: player.action,
                    hand: player.hand.clone(),
                })
            })
            .collect();
        TableSnapshot {
            table: self.config.name.clone(),
            phase: self.phase,
            round: self.round,
            turn: self.turn,
            pot: self.ledger.pot(),
            current_bet: self.ledger.current_bet(),
            community: self.community.clone(),
            winners: self.winners.clone(),
            status: self.status.clone(),
            actions_this_round: self.actions_this_round,
            deck_remaining: self.deck.remaining(),
            phase_elapsed: now.duration_since(self.phase_entered_at),
            round_elapsed: self
                .round
                .map(|_| now.duration_since(self.round_entered_at)),
            seats,
        }
    }

    // === Commands ===

    fn join(
        &mut self,
        seat_idx: SeatIndex,
        id: PlayerId,
        name: String,
        now: Instant,
    ) -> Result<(), RejectedCommand> {
        if seat_idx >= MAX_SEATS {
            return Err(RejectedCommand::SeatOutOfRange(seat_idx));
        }
        if self.seats.get(seat_idx).is_some() {
            return Err(RejectedCommand::SeatOccupied(seat_idx));
        }
        if self.seats.seat_of(&id).is_some() {
            return Err(RejectedCommand::AlreadySeated);
        }
        // A seat taken while a hand is running holds no cards until the
        // next hand deals.
        self.seats
            .occupy(Player::new(id, name, seat_idx, self.config.starting_stake));
        if self.phase == Phase::Idle && self.seats.occupancy() >= 2 {
            self.enter_phase(Phase::Queued, now);
        }
        Ok(())
    }

    fn exit(
        &mut self,
        seat_idx: SeatIndex,
        id: &PlayerId,
        now: Instant,
    ) -> Result<(), RejectedCommand> {
        if seat_idx >= MAX_SEATS {
            return Err(RejectedCommand::SeatOutOfRange(seat_idx));
        }
        match self.seats.get(seat_idx) {
            Some(player) if player.id == *id => {}
            _ => return Err(RejectedCommand::NotSeated(seat_idx)),
        }
        let held_turn = self.turn == Some(seat_idx);
        self.seats.clear(seat_idx);
        match self.seats.occupancy() {
            0 => self.full_reset(now),
            // Forfeiture needs a hand still being bet. At showdown the
            // pot has already been paid out; in intermission nothing is
            // staked yet.
            1 if self.phase == Phase::Active && self.round.is_some_and(Round::is_betting) => {
                self.forfeit_to_survivor(now);
            }
            1 if self.phase == Phase::Queued || self.phase == Phase::Active => {
                self.enter_phase(Phase::End, now);
                // A settled hand stays on display through the wind-down.
                if self.round != Some(Round::Showdown) {
                    self.round = None;
                    self.status = Some("waiting for players".to_string());
                }
            }
            _ => self.repair_after_exit(seat_idx, held_turn, now),
        }
        Ok(())
    }

    fn bet(
        &mut self,
        seat_idx: SeatIndex,
        id: &PlayerId,
        kind: BetKind,
        now: Instant,
    ) -> Result<(), RejectedCommand> {
        self.check_turn(seat_idx, id)?;
        let Some(player) = self.seats.get_mut(seat_idx) else {
            return Err(RejectedCommand::NotSeated(seat_idx));
        };
        let bet = self.ledger.place(player, kind)?;
        debug!("table '{}': seat {seat_idx} places {bet}", self.config.name);
        self.actions_this_round += 1;
        self.advance_after_action(seat_idx, now);
        Ok(())
    }

    fn fold(
        &mut self,
        seat_idx: SeatIndex,
        id: &PlayerId,
        now: Instant,
    ) -> Result<(), RejectedCommand> {
        self.check_turn(seat_idx, id)?;
        if let Some(player) = self.seats.get_mut(seat_idx) {
            player.fold();
        }
        self.actions_this_round += 1;
        self.advance_after_action(seat_idx, now);
        Ok(())
    }

    /// A betting command must come from the seat holding the turn, with
    /// the identity that owns the seat.
    fn check_turn(&self, seat_idx: SeatIndex, id: &PlayerId) -> Result<(), RejectedCommand> {
        if seat_idx >= MAX_SEATS {
            return Err(RejectedCommand::SeatOutOfRange(seat_idx));
        }
        match self.seats.get(seat_idx) {
            Some(player) if player.id == *id => {}
            _ => return Err(RejectedCommand::NotSeated(seat_idx)),
        }
        if self.turn != Some(seat_idx) {
            return Err(RejectedCommand::OutOfTurn);
        }
        Ok(())
    }

    // === Transitions ===

    /// Phase edges only ever step forward along idle, queued, active,
    /// end; idle is reached again only through [`TableState::full_reset`].
    fn enter_phase(&mut self, phase: Phase, now: Instant) {
        self.phase = phase;
        self.phase_entered_at = now;
        match phase {
            Phase::Idle => {}
            Phase::Queued => self.status = Some("game starting soon".to_string()),
            Phase::Active => self.enter_round(Round::Intermission, now),
            // End statuses differ between forfeit and wind-down, so the
            // caller sets them.
            Phase::End => {}
        }
    }

    fn enter_round(&mut self, round: Round, now: Instant) {
        self.round = Some(round);
        self.round_entered_at = now;
        self.actions_this_round = 0;
        for player in self.seats.iter_occupied_mut() {
            player.action = None;
        }
        match round {
            Round::Intermission => {
                // Hand boundary: chips already won stay with their
                // owners, everything else about the hand is discarded.
                self.ledger.reset();
                self.deck = Deck::default();
                self.community.clear();
                self.winners.clear();
                self.turn = None;
                for player in self.seats.iter_occupied_mut() {
                    player.reset_for_hand();
                }
                self.status = Some("new round starting".to_string());
            }
            Round::Preflop => {
                self.deck = Deck::shuffled();
                self.deal_hole_cards();
                self.turn = turns::first_to_act(&self.seats, self.last_winner);
            }
            Round::Flop => {
                self.reveal_community_to(3);
                self.turn = turns::first_to_act(&self.seats, None);
            }
            Round::Turn => {
                self.reveal_community_to(4);
                self.turn = turns::first_to_act(&self.seats, None);
            }
            Round::River => {
                self.reveal_community_to(COMMUNITY_CARDS);
                self.turn = turns::first_to_act(&self.seats, None);
            }
            Round::Showdown => {
                self.turn = None;
                self.status = Some("distributing pot".to_string());
                self.resolve_showdown();
            }
        }
    }

    /// After a seat acts, either the hand is down to one live seat and
    /// goes straight to showdown, the turn moves on, or the betting
    /// round is complete.
    fn advance_after_action(&mut self, seat_idx: SeatIndex, now: Instant) {
        if self.seats.live_count() == 1 {
            self.enter_round(Round::Showdown, now);
            return;
        }
        match turns::next_to_act(&self.seats, seat_idx) {
            Some(next_seat) => self.turn = Some(next_seat),
            None => self.advance_round(now),
        }
    }

    fn advance_round(&mut self, now: Instant) {
        let next = match self.round {
            Some(Round::Preflop) => Round::Flop,
            Some(Round::Flop) => Round::Turn,
            Some(Round::Turn) => Round::River,
            Some(Round::River) => Round::Showdown,
            // No betting round in progress, nothing to advance.
            _ => return,
        };
        self.enter_round(next, now);
    }

    /// Two cards to every occupied seat, dealt one at a time around the
    /// table.
    fn deal_hole_cards(&mut self) {
        for _ in 0..HOLE_CARDS {
            for player in self.seats.iter_occupied_mut() {
                if let Some(card) = self.deck.deal() {
                    player.hand.push(card);
                }
            }
        }
    }

    fn reveal_community_to(&mut self, count: usize) {
        while self.community.len() < count {
            match self.deck.deal() {
                Some(card) => self.community.push(card),
                None => break,
            }
        }
    }

    /// Award the pot. One live seat takes it without comparison;
    /// otherwise every live hand is evaluated against the board and the
    /// pot splits evenly across the maximal strengths.
    fn resolve_showdown(&mut self) {
        let live: Vec<SeatIndex> = self.seats.live_seats().collect();
        let mut tie_category = None;
        self.winners = match live.as_slice() {
            [] => Vec::new(),
            [sole] => vec![*sole],
            _ => {
                let strengths: Vec<HandStrength> = live
                    .iter()
                    .map(|&seat_idx| self.strength_of(seat_idx))
                    .collect();
                let best = eval::argmax(&strengths);
                if best.len() > 1 {
                    tie_category = Some(strengths[best[0]].rank);
                }
                best.into_iter().map(|i| live[i]).collect()
            }
        };
        self.award_pot();
        self.last_winner = self.winners.first().copied();
        match self.winners.as_slice() {
            [] => {}
            [winner] => {
                if let Some(player) = self.seats.get(*winner) {
                    self.status = Some(player.name.clone());
                }
            }
            _ => {
                let repr = match tie_category {
                    Some(category) => format!("tie ({category})"),
                    None => "tie".to_string(),
                };
                self.status = Some(repr);
            }
        }
    }

    fn strength_of(&self, seat_idx: SeatIndex) -> HandStrength {
        let mut cards = Vec::with_capacity(HOLE_CARDS + COMMUNITY_CARDS);
        if let Some(player) = self.seats.get(seat_idx) {
            cards.extend_from_slice(&player.hand);
        }
        cards.extend_from_slice(&self.community);
        eval::eval(&cards)
    }

    /// Floor split across the winners; the remainder goes with the
    /// lowest winning seat. The pot stays on display until the next
    /// hand resets it.
    fn award_pot(&mut self) {
        if self.winners.is_empty() {
            return;
        }
        let pot = self.ledger.pot();
        let share = pot / self.winners.len() as Chips;
        let remainder = pot % self.winners.len() as Chips;
        for (position, seat_idx) in self.winners.clone().into_iter().enumerate() {
            if let Some(player) = self.seats.get_mut(seat_idx) {
                player.money += share + if position == 0 { remainder } else { 0 };
            }
        }
    }

    /// One seat left while a hand was still being bet: they take the
    /// pot without any card comparison.
    fn forfeit_to_survivor(&mut self, now: Instant) {
        self.enter_phase(Phase::End, now);
        self.round = Some(Round::Showdown);
        self.round_entered_at = now;
        self.actions_this_round = 0;
        self.turn = None;
        for player in self.seats.iter_occupied_mut() {
            player.action = None;
        }
        let survivor = self.seats.occupied_seats().next();
        if let Some(survivor) = survivor {
            self.winners = vec![survivor];
            self.award_pot();
            self.last_winner = Some(survivor);
        }
        self.status = Some("last player standing".to_string());
    }

    /// Occupancy stayed at two or more after an exit. A departure mid
    /// betting round may have left one live hand, or freed the turn.
    fn repair_after_exit(&mut self, seat_idx: SeatIndex, held_turn: bool, now: Instant) {
        if !self.round.is_some_and(Round::is_betting) {
            return;
        }
        if self.seats.live_count() == 1 {
            self.enter_round(Round::Showdown, now);
            return;
        }
        if held_turn {
            match turns::next_to_act(&self.seats, seat_idx) {
                Some(next_seat) => self.turn = Some(next_seat),
                None => self.advance_round(now),
            }
        }
    }

    /// Everything except the seats themselves goes back to the initial
    /// state. Seated players keep their money; with two or more still
    /// seated the next game queues immediately.
    fn full_reset(&mut self, now: Instant) {
        self.ledger.reset();
        self.deck = Deck::default();
        self.community.clear();
        self.winners.clear();
        self.last_winner = None;
        self.turn = None;
        self.round = None;
        self.round_entered_at = now;
        self.actions_this_round = 0;
        for player in self.seats.iter_occupied_mut() {
            player.reset_for_hand();
        }
        self.enter_phase(Phase::Idle, now);
        self.status = Some("waiting for players".to_string());
        if self.seats.occupancy() >= 2 {
            self.enter_phase(Phase::Queued, now);
        }
    }
}
