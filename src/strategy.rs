//! Bet-size state machine.
//!
//! Martingale-style sizing: the bet grows by the loss-adder fraction after
//! every loss and snaps back to the base bet after a win. The strategy has
//! no terminal state and no internal cap; bankruptcy is decided by the
//! trial runner against the account balance.

/// Tracks the current bet across one trial.
#[derive(Debug, Clone)]
pub struct BettingStrategy {
    base_bet: f64,
    loss_adder_fraction: f64,
    current_bet: f64,
}

impl BettingStrategy {
    pub fn new(base_bet: f64, loss_adder_fraction: f64) -> Self {
        Self {
            base_bet,
            loss_adder_fraction,
            current_bet: base_bet,
        }
    }

    pub fn current_bet(&self) -> f64 {
        self.current_bet
    }

    /// A lost roll: grow the bet by the loss-adder fraction.
    pub fn lose(&mut self) {
        self.current_bet += self.current_bet * self.loss_adder_fraction;
    }

    /// A won roll: reset the bet to the base bet.
    pub fn win(&mut self) {
        self.current_bet = self.base_bet;
    }

    /// Reset to the starting state, ready for a fresh trial.
    pub fn reset(&mut self) {
        self.current_bet = self.base_bet;
    }
}
