//! Trial and batch results.
//!
//! A trial records the balance after every wager; the aggregate combines
//! many trials into summary statistics.

use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// Outcome of a single trial, immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialResult {
    balances: Vec<f64>,
    rolls_survived: usize,
    average_balance: f64,
}

impl TrialResult {
    /// Build a result from the balance recorded after each wager.
    ///
    /// A zero-roll trial (starting balance could not cover the base bet)
    /// is valid; its average balance is reported as 0.0 and it is skipped
    /// by the balance mean in [`aggregate`].
    pub fn new(balances: Vec<f64>) -> Self {
        let rolls_survived = balances.len();
        let average_balance = if balances.is_empty() {
            0.0
        } else {
            balances.iter().sum::<f64>() / balances.len() as f64
        };
        Self {
            balances,
            rolls_survived,
            average_balance,
        }
    }

    /// Balance after each wager, in order.
    pub fn balances(&self) -> &[f64] {
        &self.balances
    }

    /// Number of wagers placed before bankruptcy.
    pub fn rolls_survived(&self) -> usize {
        self.rolls_survived
    }

    /// Mean balance over the trial, 0.0 for a zero-roll trial.
    pub fn average_balance(&self) -> f64 {
        self.average_balance
    }

    pub fn is_empty(&self) -> bool {
        self.rolls_survived == 0
    }
}

/// Summary statistics over a batch of trials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateResult {
    trials: Vec<TrialResult>,
    average_rolls_survived: f64,
    average_balance: f64,
}

impl AggregateResult {
    pub fn trials(&self) -> &[TrialResult] {
        &self.trials
    }

    pub fn trial_count(&self) -> usize {
        self.trials.len()
    }

    pub fn average_rolls_survived(&self) -> f64 {
        self.average_rolls_survived
    }

    /// Mean of the per-trial average balances (mean of means, not a pooled
    /// mean over every recorded balance).
    pub fn average_balance(&self) -> f64 {
        self.average_balance
    }
}

/// Combine trial results into an [`AggregateResult`].
///
/// Zero-roll trials count toward the rolls average but are excluded from
/// the balance mean, since they carry no balance observations. When every
/// trial is empty the average balance is 0.0.
pub fn aggregate(trials: Vec<TrialResult>) -> Result<AggregateResult, SimError> {
    if trials.is_empty() {
        return Err(SimError::EmptyBatch);
    }

    let total_rolls: usize = trials.iter().map(|t| t.rolls_survived()).sum();
    let average_rolls_survived = total_rolls as f64 / trials.len() as f64;

    let non_empty: Vec<&TrialResult> = trials.iter().filter(|t| !t.is_empty()).collect();
    let average_balance = if non_empty.is_empty() {
        0.0
    } else {
        non_empty.iter().map(|t| t.average_balance()).sum::<f64>() / non_empty.len() as f64
    };

    Ok(AggregateResult {
        trials,
        average_rolls_survived,
        average_balance,
    })
}
