//! Async shell around the table core.
//!
//! Each table runs as a single Tokio task that owns its
//! [`TableState`](crate::game::state::TableState) and is the only thing
//! that ever mutates it. Commands arrive through an mpsc inbox and are
//! applied strictly in arrival order; phase and round timers are driven
//! by the same loop, re-armed from the state after every message and
//! guard-checked at fire time. Observers follow a watch channel that
//! carries a fresh snapshot after every applied command or timer
//! transition.
//!
//! ## Example
//!
//! ```
//! use holdem_table::game::config::TableConfig;
//! use holdem_table::table::TableActor;
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, handle) = TableActor::new(TableConfig::default());
//!     tokio::spawn(actor.run());
//!
//!     let snapshot = handle.snapshot().await.unwrap();
//!     assert_eq!(snapshot.occupancy(), 0);
//! }
//! ```

pub mod actor;
pub mod messages;

pub use actor::{TableActor, TableHandle};
pub use messages::{TableMessage, TableReply};
