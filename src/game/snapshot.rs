//! Published table views.
//!
//! A snapshot is the full table state at one instant, cheap to clone
//! and safe to serialize. Clients are trusted, so hole cards are
//! included for every seat and the client side decides what to show.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::entities::{Action, Card, Chips, Phase, PlayerId, Round, SeatIndex};

/// One occupied seat as seen from outside the table.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct SeatSnapshot {
    /// External identity the seat was claimed with
    pub id: PlayerId,

    /// Display name
    pub name: String,

    /// Chips behind, not counting chips already bet
    pub money: Chips,

    /// Chips this player has put in during the current hand
    pub bet: Chips,

    /// Last action taken this betting round, if any
    pub action: Option<Action>,

    /// Hole cards; empty between hands and for seats dealt in later
    pub hand: Vec<Card>,
}

/// Full table state at one instant.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct TableSnapshot {
    /// Table name
    pub table: String,

    /// Lifecycle phase
    pub phase: Phase,

    /// Hand round, `None` outside an active game
    pub round: Option<Round>,

    /// Seat whose action the table is waiting on
    pub turn: Option<SeatIndex>,

    /// Chips in the middle
    pub pot: Chips,

    /// Amount the table is currently playing at
    pub current_bet: Chips,

    /// Community cards revealed so far
    pub community: Vec<Card>,

    /// Winning seats of the last showdown, ascending
    pub winners: Vec<SeatIndex>,

    /// Human-readable table status line
    pub status: Option<String>,

    /// Actions taken in the current betting round
    pub actions_this_round: u32,

    /// Cards left in the deck
    pub deck_remaining: usize,

    /// Time spent in the current phase
    pub phase_elapsed: Duration,

    /// Time spent in the current round, `None` when round is `None`
    pub round_elapsed: Option<Duration>,

    /// All seats in index order, vacant seats as `None`
    pub seats: Vec<Option<SeatSnapshot>>,
}

impl TableSnapshot {
    /// Number of occupied seats
    #[must_use]
    pub fn occupancy(&self) -> usize {
        self.seats.iter().filter(|seat| seat.is_some()).count()
    }

    /// Seat view by index, `None` when vacant or out of range
    #[must_use]
    pub fn seat(&self, seat_idx: SeatIndex) -> Option<&SeatSnapshot> {
        self.seats.get(seat_idx).and_then(Option::as_ref)
    }
}
