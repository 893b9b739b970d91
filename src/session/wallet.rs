//! Player money

use serde::{Deserialize, Serialize};

/// Currency sign used in money labels
pub const CURRENCY_SIGN: char = 'È';

/// Player balance. Subtracting below zero is allowed; callers gate spending
/// with [`Wallet::can_afford`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Wallet {
    balance: f32,
}

impl Wallet {
    pub fn new(balance: f32) -> Self {
        Self { balance }
    }

    pub fn balance(&self) -> f32 {
        self.balance
    }

    pub fn add(&mut self, amount: f32) {
        self.balance += amount;
        log::debug!("Money: {}", self.display());
    }

    pub fn subtract(&mut self, amount: f32) {
        self.balance -= amount;
        log::debug!("Money: {}", self.display());
    }

    pub fn can_afford(&self, cost: f32) -> bool {
        self.balance >= cost
    }

    /// Label text, two decimals
    pub fn display(&self) -> String {
        format!("{}{:.2}", CURRENCY_SIGN, self.balance)
    }
}
