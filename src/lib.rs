//! # Holdem Table
//!
//! An authoritative multi-seat Texas hold'em table simulation.
//!
//! This library runs one table end to end: seat lifecycle, card
//! dealing, a two-level phase/round state machine, turn rotation over
//! sparse seats, a simplified betting ledger, and showdown resolution
//! with tie splitting. Clients are trusted observers; the table is the
//! single authority and every mutation funnels through one validated
//! command step.
//!
//! ## Architecture
//!
//! The table lifecycle walks **idle → queued → active → end → idle**,
//! gated on seat occupancy and timers. While active, each hand cycles
//! through the rounds:
//!
//! - **Intermission**: hand-boundary reset, winnings on display
//! - **Preflop**: fresh shuffled deck, two hole cards per seat
//! - **Flop/Turn/River**: community cards revealed, betting in turn
//! - **Showdown**: live hands compared, pot split across the winners
//!
//! ## Core Modules
//!
//! - [`game`]: table state, entities, betting, turn order, snapshots
//! - [`eval`]: 5-7 card hand strength evaluation
//! - [`table`]: Tokio actor owning a table, with its inbox and timers
//!
//! ## Example
//!
//! ```
//! use holdem_table::game::config::TableConfig;
//! use holdem_table::{PlayerId, TableActor};
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, handle) = TableActor::new(TableConfig::default());
//!     tokio::spawn(actor.run());
//!
//!     let reply = handle.join(0, PlayerId::new("p-1"), "Alice").await.unwrap();
//!     assert!(reply.is_applied());
//! }
//! ```

/// Hand strength evaluation.
pub mod eval;

/// Core table state, entities, and transitions.
pub mod game;
pub use game::{
    config::TableConfig,
    constants::{self, MAX_SEATS, OPENING_BET, STARTING_STAKE},
    entities::{self, Card, Chips, Deck, Phase, PlayerId, Round, SeatIndex, Suit, Value},
    snapshot::{SeatSnapshot, TableSnapshot},
    state::{Command, RejectedCommand, TableState, TimerGuard},
};

/// Async actor shell around a table.
pub mod table;
pub use table::{TableActor, TableHandle, TableMessage, TableReply};
