//! Table configuration models.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::constants::{OPENING_BET, STARTING_STAKE};
use super::entities::Chips;

/// Table configuration. Controls pacing and stakes; seat count and the
/// betting ladder are fixed by the rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    /// Table name, used for logging
    pub name: String,

    /// How long a queued table waits before the first hand starts
    pub queue_delay: Duration,

    /// Pause between hands while winnings are on display
    pub intermission_delay: Duration,

    /// How long showdown results stay up before the next intermission
    pub showdown_delay: Duration,

    /// How long the end screen stays up before the table resets
    pub end_delay: Duration,

    /// Chips granted to every player on their first seat
    pub starting_stake: Chips,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            name: "main".to_string(),
            queue_delay: Duration::from_millis(2500),
            intermission_delay: Duration::from_secs(10),
            showdown_delay: Duration::from_secs(10),
            end_delay: Duration::from_secs(10),
            starting_stake: STARTING_STAKE,
        }
    }
}

impl TableConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Table name must not be empty".to_string());
        }

        if self.starting_stake < OPENING_BET {
            return Err("Starting stake must cover the opening bet".to_string());
        }

        Ok(())
    }
}
