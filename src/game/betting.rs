//! Pot and table-bet bookkeeping, including the bet ladder.

use std::fmt;

use super::constants::OPENING_BET;
use super::entities::{BetKind, Chips, Player};
use super::state::RejectedCommand;

/// A bet that was applied to the ledger.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Bet {
    pub kind: BetKind,
    pub amount: Chips,
}

impl fmt::Display for Bet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let amount = self.amount;
        let repr = match self.kind {
            BetKind::Call => format!("call of {amount}"),
            BetKind::Raise => format!("raise of {amount}"),
        };
        write!(f, "{repr}")
    }
}

/// Tracks the pot and the table bet for the current hand. All chip
/// movement between players and the pot funnels through [`Ledger::place`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Ledger {
    pot: Chips,
    current_bet: Chips,
}

impl Ledger {
    #[must_use]
    pub fn pot(&self) -> Chips {
        self.pot
    }

    #[must_use]
    pub fn current_bet(&self) -> Chips {
        self.current_bet
    }

    /// The amount a call costs right now: the opening unit when nobody
    /// has bet this hand, otherwise the table bet.
    #[must_use]
    pub fn call_amount(&self) -> Chips {
        if self.current_bet == 0 {
            OPENING_BET
        } else {
            self.current_bet
        }
    }

    /// A raise always costs double the call.
    #[must_use]
    pub fn raise_amount(&self) -> Chips {
        2 * self.call_amount()
    }

    #[must_use]
    pub fn amount_for(&self, kind: BetKind) -> Chips {
        match kind {
            BetKind::Call => self.call_amount(),
            BetKind::Raise => self.raise_amount(),
        }
    }

    /// Validate and apply a bet: debit the player, credit the pot, and
    /// ratchet the table bet. The player record is untouched on rejection.
    pub fn place(&mut self, player: &mut Player, kind: BetKind) -> Result<Bet, RejectedCommand> {
        let amount = self.amount_for(kind);
        if amount > player.money {
            return Err(RejectedCommand::InsufficientFunds {
                needed: amount,
                available: player.money,
            });
        }
        player.money -= amount;
        player.bet += amount;
        player.action = Some(kind.into());
        self.pot += amount;
        self.current_bet = self.current_bet.max(amount);
        Ok(Bet { kind, amount })
    }

    /// Hand-boundary reset.
    pub fn reset(&mut self) {
        self.pot = 0;
        self.current_bet = 0;
    }
}
