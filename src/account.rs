//! Account balance holder.
//!
//! Each trial operates on its own clone of the account so that runs never
//! interfere with each other or with the caller's template.

use serde::{Deserialize, Serialize};

/// Mutable balance holder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    balance: f64,
}

impl Account {
    pub fn new(balance: f64) -> Self {
        Self { balance }
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    pub fn set_balance(&mut self, balance: f64) {
        self.balance = balance;
    }

    /// Add to the balance and return the new value.
    pub fn add(&mut self, amount: f64) -> f64 {
        self.balance += amount;
        self.balance
    }

    /// Subtract from the balance and return the new value.
    pub fn subtract(&mut self, amount: f64) -> f64 {
        self.balance -= amount;
        self.balance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_subtract() {
        let mut account = Account::new(100.0);
        assert_eq!(account.add(25.0), 125.0);
        assert_eq!(account.subtract(50.0), 75.0);
        assert_eq!(account.balance(), 75.0);
    }

    #[test]
    fn test_clone_is_independent() {
        let template = Account::new(200.0);
        let mut copy = template.clone();

        copy.subtract(200.0);

        assert_eq!(copy.balance(), 0.0);
        assert_eq!(template.balance(), 200.0);
    }
}
