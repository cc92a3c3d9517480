//! Table actor message types.

use tokio::sync::oneshot;

use crate::game::snapshot::TableSnapshot;
use crate::game::state::{Command, RejectedCommand};

/// Messages that can be sent to a TableActor
#[derive(Debug)]
pub enum TableMessage {
    /// Player command to validate and apply
    Apply {
        command: Command,
        response: oneshot::Sender<TableReply>,
    },

    /// Get the current table snapshot
    GetSnapshot {
        response: oneshot::Sender<TableSnapshot>,
    },

    /// Close the table
    Close {
        response: oneshot::Sender<TableReply>,
    },
}

/// Verdict on a submitted command
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TableReply {
    /// Command validated and applied; a fresh snapshot was published
    Applied,

    /// Command refused; the table is unchanged
    Rejected(RejectedCommand),
}

impl TableReply {
    /// Check if the command was applied
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }

    /// Get the rejection if the command was refused
    #[must_use]
    pub const fn rejection(&self) -> Option<&RejectedCommand> {
        match self {
            Self::Applied => None,
            Self::Rejected(rejection) => Some(rejection),
        }
    }
}
