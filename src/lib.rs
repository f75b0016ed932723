//! Dicesim - Martingale dice betting simulator
//!
//! This library provides:
//! - A single-round dice roll model at the platform's 2-decimal resolution
//! - Loss-adding (martingale-style) bet sizing with reset on win
//! - Trial execution to bankruptcy with per-wager balance recording
//! - Batch aggregation into summary statistics with progress reporting
//!
//! # Example
//!
//! ```
//! use dicesim::{run_batch_seeded, Account, Configuration};
//!
//! // 1 unit base bet at 2x payout, doubling after every loss
//! let config = Configuration::new(1.0, 2.0, 100, 100);
//! let account = Account::new(200.0);
//!
//! let summary = run_batch_seeded(config, &account, 50, 42, |_| {}).unwrap();
//! println!("Average rolls survived: {:.1}", summary.average_rolls_survived());
//! ```

pub mod account;
pub mod config;
pub mod error;
pub mod roll;
pub mod simulation;
pub mod strategy;

// Re-export commonly used types
pub use account::Account;
pub use config::{Configuration, PAYOUT_MAX, PAYOUT_MIN};
pub use error::SimError;
pub use roll::DiceRoller;
pub use simulation::{
    aggregate, run_batch, run_batch_seeded, AggregateResult, BatchRunner, TrialResult, TrialRunner,
};
pub use strategy::BettingStrategy;
