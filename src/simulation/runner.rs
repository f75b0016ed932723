//! Trial and batch execution.
//!
//! A trial drives one betting sequence to bankruptcy on a private copy of
//! the account. A batch runs many independent trials sequentially and
//! aggregates them; the loop is externally steppable so a caller can
//! interleave progress reporting or stop early between trials.

use rand::rngs::StdRng;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::warn;

use super::results::{aggregate, AggregateResult, TrialResult};
use crate::account::Account;
use crate::config::Configuration;
use crate::error::{validate_trial_count, SimError};
use crate::roll::DiceRoller;
use crate::strategy::BettingStrategy;

/// Runs single trials to bankruptcy.
pub struct TrialRunner<R: Rng> {
    config: Configuration,
    roller: DiceRoller<R>,
}

impl TrialRunner<StdRng> {
    pub fn new(config: Configuration) -> Self {
        Self {
            config,
            roller: DiceRoller::new(),
        }
    }
}

impl TrialRunner<ChaCha8Rng> {
    pub fn from_seed(config: Configuration, seed: u64) -> Self {
        Self {
            config,
            roller: DiceRoller::from_seed(seed),
        }
    }
}

impl<R: Rng> TrialRunner<R> {
    pub fn with_roller(config: Configuration, roller: DiceRoller<R>) -> Self {
        Self { config, roller }
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Run one trial against a private copy of `account` until the balance
    /// can no longer cover the next wager.
    ///
    /// Bankruptcy is not a zero balance: the trial ends as soon as the
    /// remaining balance is at or below the current bet. A starting balance
    /// at or below the base bet yields a valid zero-roll result.
    pub fn run_trial(&mut self, account: &Account) -> TrialResult {
        let mut account = account.clone();
        let mut strategy = BettingStrategy::new(
            self.config.base_bet(),
            self.config.loss_adder_fraction(),
        );

        let mut balances = Vec::new();

        while account.balance() > strategy.current_bet() {
            account.subtract(strategy.current_bet());

            if self.roller.roll(self.config.win_probability()) {
                let payout = strategy.current_bet() * self.config.payout_multiplier();
                account.add(payout);
                strategy.win();
            } else {
                strategy.lose();
            }

            balances.push(account.balance());
        }

        if balances.is_empty() {
            warn!(
                balance = account.balance(),
                base_bet = self.config.base_bet(),
                "starting balance does not allow a single roll"
            );
        }

        TrialResult::new(balances)
    }
}

/// Steppable batch of independent trials.
///
/// Each [`step`](BatchRunner::step) runs exactly one trial on a fresh copy
/// of the account template and yields its result, so the caller decides
/// when to report progress or stop issuing further trials.
pub struct BatchRunner<R: Rng> {
    runner: TrialRunner<R>,
    account: Account,
    remaining: usize,
    results: Vec<TrialResult>,
}

impl BatchRunner<StdRng> {
    pub fn new(config: Configuration, account: Account) -> Self {
        let remaining = config.trial_count();
        Self {
            runner: TrialRunner::new(config),
            account,
            remaining,
            results: Vec::with_capacity(remaining),
        }
    }
}

impl BatchRunner<ChaCha8Rng> {
    pub fn from_seed(config: Configuration, account: Account, seed: u64) -> Self {
        let remaining = config.trial_count();
        Self {
            runner: TrialRunner::from_seed(config, seed),
            account,
            remaining,
            results: Vec::with_capacity(remaining),
        }
    }
}

impl<R: Rng> BatchRunner<R> {
    /// Run the next trial, or return `None` once the batch is exhausted.
    pub fn step(&mut self) -> Option<&TrialResult> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let result = self.runner.run_trial(&self.account);
        self.results.push(result);
        self.results.last()
    }

    /// Trials completed so far.
    pub fn completed(&self) -> usize {
        self.results.len()
    }

    /// Trials still to run.
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// Aggregate whatever has been run so far.
    pub fn finish(self) -> Result<AggregateResult, SimError> {
        aggregate(self.results)
    }

    /// Run all remaining trials, invoking `on_progress` with a fractional
    /// completion value at `progress_checkpoints` evenly spaced points.
    ///
    /// The checkpoint count is clamped to the trial count so every
    /// checkpoint lands on a whole trial.
    pub fn run<F>(mut self, progress_checkpoints: usize, mut on_progress: F) -> Result<AggregateResult, SimError>
    where
        F: FnMut(f64),
    {
        let total = self.runner.config.trial_count();
        validate_trial_count(total)?;

        let checkpoints = progress_checkpoints.clamp(1, total);
        let interval = total / checkpoints;

        while self.step().is_some() {
            let done = self.completed();
            if done % interval == 0 {
                on_progress(done as f64 / total as f64);
            }
        }

        self.finish()
    }
}

/// Run a full batch with an entropy-seeded roller.
///
/// Validates the trial count before any trial runs; a zero trial count is
/// rejected as [`SimError::EmptyBatch`].
pub fn run_batch<F>(
    config: Configuration,
    account: &Account,
    progress_checkpoints: usize,
    on_progress: F,
) -> Result<AggregateResult, SimError>
where
    F: FnMut(f64),
{
    validate_trial_count(config.trial_count())?;
    BatchRunner::new(config, account.clone()).run(progress_checkpoints, on_progress)
}

/// Run a full batch with a deterministic, seeded roller.
pub fn run_batch_seeded<F>(
    config: Configuration,
    account: &Account,
    progress_checkpoints: usize,
    seed: u64,
    on_progress: F,
) -> Result<AggregateResult, SimError>
where
    F: FnMut(f64),
{
    validate_trial_count(config.trial_count())?;
    BatchRunner::from_seed(config, account.clone(), seed).run(progress_checkpoints, on_progress)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doubling_config(trials: usize) -> Configuration {
        // base bet 1 at 2x payout, doubling on loss
        Configuration::new(1.0, 2.0, trials, 100)
    }

    #[test]
    fn test_trial_terminates_at_bankruptcy() {
        let mut runner = TrialRunner::from_seed(doubling_config(1), 1);
        let result = runner.run_trial(&Account::new(200.0));

        assert!(result.rolls_survived() > 0);

        // The final recorded balance could not cover the next wager; every
        // recorded balance is positive because a wager is only placed when
        // the balance strictly exceeds it.
        for &balance in result.balances() {
            assert!(balance > 0.0);
        }
    }

    #[test]
    fn test_trial_balance_step_invariant() {
        // Each step moves the balance by -bet (loss) or -bet + bet*payout
        // (win); it never exceeds the pre-wager balance plus the credited
        // payout.
        let config = doubling_config(1);
        let payout = config.payout_multiplier();
        let mut runner = TrialRunner::from_seed(config, 5);
        let result = runner.run_trial(&Account::new(100.0));

        let mut prev = 100.0;
        let mut bet = 1.0;
        for &balance in result.balances() {
            let lost = prev - bet;
            let won = prev - bet + bet * payout;
            if (balance - won).abs() < 1e-9 {
                bet = 1.0;
            } else {
                assert!(
                    (balance - lost).abs() < 1e-9,
                    "balance {} is neither win ({}) nor loss ({})",
                    balance,
                    won,
                    lost
                );
                bet *= 2.0;
            }
            assert!(balance <= won + 1e-9);
            prev = balance;
        }
    }

    #[test]
    fn test_insufficient_starting_balance_yields_empty_trial() {
        let mut runner = TrialRunner::from_seed(Configuration::new(10.0, 2.0, 1, 0), 1);
        let result = runner.run_trial(&Account::new(5.0));

        assert!(result.is_empty());
        assert_eq!(result.rolls_survived(), 0);
    }

    #[test]
    fn test_trial_does_not_mutate_template() {
        let template = Account::new(200.0);
        let mut runner = TrialRunner::from_seed(doubling_config(1), 3);
        let _ = runner.run_trial(&template);
        assert_eq!(template.balance(), 200.0);
    }

    #[test]
    fn test_batch_runner_steps() {
        let mut batch = BatchRunner::from_seed(doubling_config(5), Account::new(200.0), 11);

        assert_eq!(batch.remaining(), 5);
        let mut steps = 0;
        while batch.step().is_some() {
            steps += 1;
        }
        assert_eq!(steps, 5);
        assert_eq!(batch.completed(), 5);
        assert_eq!(batch.remaining(), 0);

        let agg = batch.finish().unwrap();
        assert_eq!(agg.trial_count(), 5);
    }

    #[test]
    fn test_batch_runner_early_stop() {
        // A caller may stop issuing trials between steps and aggregate the
        // partial batch.
        let mut batch = BatchRunner::from_seed(doubling_config(100), Account::new(200.0), 17);
        for _ in 0..10 {
            batch.step();
        }
        let agg = batch.finish().unwrap();
        assert_eq!(agg.trial_count(), 10);
    }

    #[test]
    fn test_run_batch_end_to_end() {
        let account = Account::new(200.0);
        let agg = run_batch_seeded(doubling_config(100), &account, 50, 42, |_| {}).unwrap();

        assert_eq!(agg.trial_count(), 100);
        assert!(agg.average_rolls_survived() > 0.0);
        assert_eq!(account.balance(), 200.0);
    }

    #[test]
    fn test_run_batch_rejects_zero_trials() {
        let account = Account::new(200.0);
        let err = run_batch(doubling_config(0), &account, 50, |_| {}).unwrap_err();
        assert!(matches!(err, SimError::EmptyBatch));
    }

    #[test]
    fn test_progress_checkpoints_clamped() {
        // More checkpoints than trials: clamp to one callback per trial.
        let account = Account::new(200.0);
        let mut fractions = Vec::new();
        run_batch_seeded(doubling_config(4), &account, 50, 7, |f| fractions.push(f)).unwrap();

        assert_eq!(fractions.len(), 4);
        assert_eq!(fractions.last().copied(), Some(1.0));
        for pair in fractions.windows(2) {
            assert!(pair[1] > pair[0]);
        }
    }

    #[test]
    fn test_progress_checkpoint_spacing() {
        let account = Account::new(200.0);
        let mut fractions = Vec::new();
        run_batch_seeded(doubling_config(100), &account, 10, 7, |f| fractions.push(f)).unwrap();

        // 100 trials, 10 checkpoints: callback every 10 trials
        assert_eq!(fractions.len(), 10);
        assert!((fractions[0] - 0.1).abs() < 1e-9);
        assert!((fractions[9] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_seeded_batches_are_reproducible() {
        let account = Account::new(200.0);
        let a = run_batch_seeded(doubling_config(20), &account, 1, 99, |_| {}).unwrap();
        let b = run_batch_seeded(doubling_config(20), &account, 1, 99, |_| {}).unwrap();

        assert_eq!(a.average_rolls_survived(), b.average_rolls_survived());
        assert_eq!(a.average_balance(), b.average_balance());
    }
}
