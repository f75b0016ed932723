//! Strategy Configuration
//!
//! Holds the per-run betting parameters and derives the win probability
//! from the payout multiplier. The derivation mirrors the dice site's own
//! payout table: a power function fitted to the site's payout/chance pairs.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Minimum payout multiplier accepted by the modeled platform.
pub const PAYOUT_MIN: f64 = 1.01202;
/// Maximum payout multiplier accepted by the modeled platform.
pub const PAYOUT_MAX: f64 = 9900.0;

/// Immutable-per-run strategy parameters plus derived values.
///
/// `win_probability` and `loss_adder_fraction` are derived fields; they are
/// recomputed eagerly whenever their inputs change and are never set
/// directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Configuration {
    base_bet: f64,
    payout_multiplier: f64,
    loss_adder_percent: u32,
    trial_count: usize,
    win_probability: f64,
    loss_adder_fraction: f64,
}

impl Configuration {
    /// Create a configuration from the values as they appear on the
    /// betting screen.
    ///
    /// An out-of-range payout multiplier is logged as a warning but not
    /// rejected; the win-probability formula is applied regardless.
    pub fn new(
        base_bet: f64,
        payout_multiplier: f64,
        trial_count: usize,
        loss_adder_percent: u32,
    ) -> Self {
        let mut config = Self {
            base_bet,
            payout_multiplier,
            loss_adder_percent,
            trial_count,
            win_probability: 0.0,
            loss_adder_fraction: loss_adder_percent as f64 / 100.0,
        };
        config.win_probability = config.calc_win_probability();
        config
    }

    /// Win chance the platform grants for the current payout multiplier,
    /// as a percentage rounded to two decimals.
    ///
    /// The curve was fitted from the site's accepted payout/chance pairs:
    /// f(x) = 98.998 * x^-0.99999. High payout means low chance and vice
    /// versa.
    fn calc_win_probability(&self) -> f64 {
        self.check_valid_payout();

        let chance = 98.998 * self.payout_multiplier.powf(-0.99999);
        (chance * 100.0).round() / 100.0
    }

    /// Check the payout multiplier against the platform's accepted range.
    ///
    /// Returns false and logs a warning when out of range. The simulation
    /// still proceeds: this is a soft condition.
    pub fn check_valid_payout(&self) -> bool {
        let valid = (PAYOUT_MIN..=PAYOUT_MAX).contains(&self.payout_multiplier);
        if !valid {
            warn!(
                payout = self.payout_multiplier,
                "payout multiplier outside the range [{}, {}] accepted by the platform",
                PAYOUT_MIN,
                PAYOUT_MAX
            );
        }
        valid
    }

    pub fn set_base_bet(&mut self, base_bet: f64) {
        self.base_bet = base_bet;
    }

    /// Change the payout multiplier and recompute the derived win
    /// probability.
    pub fn set_payout_multiplier(&mut self, payout_multiplier: f64) {
        self.payout_multiplier = payout_multiplier;
        self.win_probability = self.calc_win_probability();
    }

    pub fn set_trial_count(&mut self, trial_count: usize) {
        self.trial_count = trial_count;
    }

    /// Change the loss adder percent and recompute the derived fraction.
    pub fn set_loss_adder_percent(&mut self, loss_adder_percent: u32) {
        self.loss_adder_percent = loss_adder_percent;
        self.loss_adder_fraction = loss_adder_percent as f64 / 100.0;
    }

    pub fn base_bet(&self) -> f64 {
        self.base_bet
    }

    pub fn payout_multiplier(&self) -> f64 {
        self.payout_multiplier
    }

    pub fn loss_adder_percent(&self) -> u32 {
        self.loss_adder_percent
    }

    /// Loss adder as a multiplier fraction (percent / 100).
    pub fn loss_adder_fraction(&self) -> f64 {
        self.loss_adder_fraction
    }

    pub fn trial_count(&self) -> usize {
        self.trial_count
    }

    /// Derived win chance as a percentage, used directly as the roll-under
    /// threshold.
    pub fn win_probability(&self) -> f64 {
        self.win_probability
    }
}

impl Default for Configuration {
    /// The reference scenario: 1 unit base bet at 2x payout, doubling on
    /// every loss, 100 trials.
    fn default() -> Self {
        Self::new(1.0, 2.0, 100, 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expected_chance(payout: f64) -> f64 {
        (98.998 * payout.powf(-0.99999) * 100.0).round() / 100.0
    }

    #[test]
    fn test_win_probability_formula() {
        let config = Configuration::new(10.0, 2.0, 100, 0);
        assert!((config.win_probability() - expected_chance(2.0)).abs() < 1e-9);
        // 2x payout lands just below a coin flip
        assert!((config.win_probability() - 49.5).abs() < 0.01);
    }

    #[test]
    fn test_win_probability_at_range_edges() {
        let low = Configuration::new(10.0, PAYOUT_MIN, 100, 0);
        let high = Configuration::new(10.0, PAYOUT_MAX, 100, 0);

        assert!((low.win_probability() - expected_chance(PAYOUT_MIN)).abs() < 1e-9);
        assert!((high.win_probability() - expected_chance(PAYOUT_MAX)).abs() < 1e-9);
        assert!(low.win_probability() < 100.0);
        assert!(high.win_probability() > 0.0);
    }

    #[test]
    fn test_win_probability_monotonic_in_payout() {
        let payouts = [1.01202, 1.5, 2.0, 3.0, 5.0, 10.0, 50.0, 100.0, 1000.0, 9900.0];
        let chances: Vec<f64> = payouts
            .iter()
            .map(|&p| Configuration::new(10.0, p, 100, 0).win_probability())
            .collect();

        for pair in chances.windows(2) {
            assert!(
                pair[1] <= pair[0],
                "win probability must be non-increasing in payout: {:?}",
                chances
            );
        }
    }

    #[test]
    fn test_set_payout_recomputes_win_probability() {
        let mut config = Configuration::new(10.0, 2.0, 100, 0);
        let before = config.win_probability();

        config.set_payout_multiplier(4.0);

        assert!(config.win_probability() < before);
        assert!((config.win_probability() - expected_chance(4.0)).abs() < 1e-9);
    }

    #[test]
    fn test_set_loss_adder_recomputes_fraction() {
        let mut config = Configuration::new(10.0, 2.0, 100, 0);
        assert_eq!(config.loss_adder_fraction(), 0.0);

        config.set_loss_adder_percent(50);

        assert_eq!(config.loss_adder_percent(), 50);
        assert!((config.loss_adder_fraction() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_out_of_range_payout_is_soft() {
        // Accepted, flagged, formula still applied
        let config = Configuration::new(10.0, 10_000.0, 100, 0);
        assert!(!config.check_valid_payout());
        assert!((config.win_probability() - expected_chance(10_000.0)).abs() < 1e-9);
    }

    #[test]
    fn test_in_range_payout_is_valid() {
        let config = Configuration::new(10.0, 2.0, 100, 0);
        assert!(config.check_valid_payout());
    }

    #[test]
    fn test_default_scenario() {
        let config = Configuration::default();
        assert_eq!(config.base_bet(), 1.0);
        assert_eq!(config.payout_multiplier(), 2.0);
        assert_eq!(config.loss_adder_percent(), 100);
        assert_eq!(config.trial_count(), 100);
    }
}
