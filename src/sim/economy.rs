use std::fmt;

use crate::config::EconomyConfig;

/// Money, lives and the run clock. Money is unsigned and every spend is
/// checked first, so a balance can never go negative.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Economy {
    pub money: u32,
    pub lives: u32,
    pub tower_cost: u32,
    pub wave_number: u32,
    pub elapsed_secs: u64,
}

/// A player action the game rules refused. State is left untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejected {
    InsufficientFunds { cost: u32, available: u32 },
    MaxLevel { level: u32 },
}

impl fmt::Display for Rejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejected::InsufficientFunds { cost, available } => {
                write!(f, "need {} money, have {}", cost, available)
            }
            Rejected::MaxLevel { level } => write!(f, "already at max level {}", level),
        }
    }
}

impl std::error::Error for Rejected {}

impl Economy {
    pub fn new(cfg: &EconomyConfig) -> Self {
        Self {
            money: cfg.starting_money,
            lives: cfg.starting_lives,
            tower_cost: cfg.tower_cost,
            wave_number: 1,
            elapsed_secs: 0,
        }
    }

    pub fn can_afford(&self, cost: u32) -> bool {
        self.money >= cost
    }

    pub fn spend(&mut self, cost: u32) -> Result<(), Rejected> {
        if !self.can_afford(cost) {
            return Err(Rejected::InsufficientFunds { cost, available: self.money });
        }
        self.money -= cost;
        Ok(())
    }

    pub fn earn(&mut self, amount: u32) {
        self.money = self.money.saturating_add(amount);
    }

    /// Removes one life; returns true when none are left.
    pub fn lose_life(&mut self) -> bool {
        self.lives = self.lives.saturating_sub(1);
        self.lives == 0
    }
}
