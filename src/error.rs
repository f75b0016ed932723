//! Simulation error types.
//!
//! Soft conditions (out-of-range payout, zero-roll trials) are logged and
//! never abort a batch; only structurally invalid requests surface here.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    /// A batch was requested with no trials, or aggregation was asked to
    /// average zero results.
    #[error("cannot aggregate an empty batch: at least one trial is required")]
    EmptyBatch,
}

/// Reject a zero trial count before any trial runs.
pub fn validate_trial_count(trial_count: usize) -> Result<(), SimError> {
    if trial_count == 0 {
        return Err(SimError::EmptyBatch);
    }
    Ok(())
}
