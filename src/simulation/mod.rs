//! Monte Carlo simulation engine: trial execution, batching, aggregation.

pub mod results;
pub mod runner;

pub use results::{aggregate, AggregateResult, TrialResult};
pub use runner::{run_batch, run_batch_seeded, BatchRunner, TrialRunner};
