//! Table simulation core - state machine and game logic.
//!
//! This module provides the authoritative table implementation:
//! - Two-level state machine (table phase nested with hand round)
//! - Seat registry and turn rotation over sparse occupancy
//! - Betting ledger with the call/raise ladder
//! - Dealing, showdown resolution, and pot splitting
//!
//! Everything here is synchronous and clock-free: commands and timer
//! fires carry their own `now`, and [`state::TableState::next_deadline`]
//! tells the caller when to come back. The async shell in
//! [`crate::table`] owns the inbox and the timers.

pub mod betting;
pub mod config;
pub mod constants;
pub mod entities;
pub mod snapshot;
pub mod state;
pub mod turns;
