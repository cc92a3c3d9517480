//! Turn scheduling over the seat registry.
//!
//! Scans run in increasing seat order and wrap past the highest index.
//! Only live seats are ever scheduled; folded seats and seats taken
//! mid-hand hold no cards and are skipped.

use super::constants::MAX_SEATS;
use super::entities::{Player, SeatIndex, Seats};

fn is_live(seats: &Seats, seat_idx: SeatIndex) -> bool {
    seats.get(seat_idx).is_some_and(Player::is_live)
}

/// First seat to act in a fresh hand: the live seat after the previous
/// hand's winner when one is known, otherwise the lowest live seat.
#[must_use]
pub fn first_to_act(seats: &Seats, last_winner: Option<SeatIndex>) -> Option<SeatIndex> {
    match last_winner {
        Some(winner) => (1..=MAX_SEATS)
            .map(|offset| (winner + offset) % MAX_SEATS)
            .find(|&seat_idx| is_live(seats, seat_idx)),
        None => seats.live_seats().next(),
    }
}

/// Next live seat after `after` with no recorded action this round.
/// `None` means every live seat has acted and the round is complete.
#[must_use]
pub fn next_to_act(seats: &Seats, after: SeatIndex) -> Option<SeatIndex> {
    (1..=MAX_SEATS)
        .map(|offset| (after + offset) % MAX_SEATS)
        .find(|&seat_idx| {
            seats
                .get(seat_idx)
                .is_some_and(|player| player.is_live() && player.action.is_none())
        })
}
