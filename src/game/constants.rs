//! Fixed table dimensions and betting units.

use super::entities::Chips;

/// Number of seats at a table. Seats are addressed by index and never
/// reordered.
pub const MAX_SEATS: usize = 8;

/// Stake granted to every player when they take a seat.
pub const STARTING_STAKE: Chips = 1000;

/// Minimum opening amount when nobody has bet yet this hand.
pub const OPENING_BET: Chips = 3;

/// Hole cards dealt to each occupied seat at preflop.
pub const HOLE_CARDS: usize = 2;

/// Community cards revealed by the river.
pub const COMMUNITY_CARDS: usize = 5;

/// Cards in a fresh deck.
pub const DECK_SIZE: usize = 52;
