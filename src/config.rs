//! Tunable game constants. Every section falls back to the stock values, so a
//! stored override only needs the fields it changes.

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::sim::geometry::Point;

pub const CONFIG_STORAGE_KEY: &str = "td_config";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self { width: 800, height: 600 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    pub starting_money: u32,
    pub tower_cost: u32,
    pub starting_lives: u32,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self { starting_money: 60, tower_cost: 10, starting_lives: 5 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TowerConfig {
    pub range: f64,
    pub fire_interval_ms: f64,
    pub upgrade_cost: u32,
    pub max_level: u32,
    pub range_per_level: f64,
    pub interval_step_ms: f64,
    pub upgrade_cost_step: u32,
    /// Cursor distance under which a tower counts as hovered.
    pub pick_radius: f64,
}

impl Default for TowerConfig {
    fn default() -> Self {
        Self {
            range: 100.0,
            fire_interval_ms: 1000.0,
            upgrade_cost: 20,
            max_level: 10,
            range_per_level: 10.0,
            interval_step_ms: 50.0,
            upgrade_cost_step: 10,
            pick_radius: 20.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    pub speed: f64,
    pub damage: i32,
    /// Money granted when a hit takes an enemy to zero health.
    pub kill_reward: u32,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self { speed: 5.0, damage: 10, kill_reward: 5 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
    /// Spawn delay is `max(random * jitter, floor)`.
    pub spawn_delay_floor_ms: f64,
    pub spawn_delay_jitter_ms: f64,
    pub wave_interval_ms: f64,
    pub base_wave_size: u32,
    pub base_health: i32,
    pub health_per_wave: i32,
    pub speed_factor: f64,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            spawn_delay_floor_ms: 2000.0,
            spawn_delay_jitter_ms: 1000.0,
            wave_interval_ms: 17_500.0,
            base_wave_size: 5,
            base_health: 50,
            health_per_wave: 5,
            speed_factor: 2.0,
        }
    }
}

pub fn default_paths() -> Vec<Vec<Point>> {
    vec![vec![
        Point::new(0.0, 300.0),
        Point::new(100.0, 300.0),
        Point::new(100.0, 550.0),
        Point::new(400.0, 550.0),
        Point::new(400.0, 150.0),
        Point::new(700.0, 150.0),
        Point::new(700.0, 0.0),
    ]]
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub canvas: CanvasConfig,
    pub economy: EconomyConfig,
    pub tower: TowerConfig,
    pub projectile: ProjectileConfig,
    pub wave: WaveConfig,
    pub paths: Vec<Vec<Point>>,
    pub log_level: LevelFilter,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            canvas: CanvasConfig::default(),
            economy: EconomyConfig::default(),
            tower: TowerConfig::default(),
            projectile: ProjectileConfig::default(),
            wave: WaveConfig::default(),
            paths: default_paths(),
            log_level: LevelFilter::Info,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(e) => write!(f, "config is not valid JSON: {}", e),
            ConfigError::Invalid(why) => write!(f, "config rejected: {}", why),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl GameConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let cfg: GameConfig = serde_json::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.paths.is_empty() {
            return Err(ConfigError::Invalid("at least one path is required"));
        }
        if self.paths.iter().any(|p| p.is_empty()) {
            return Err(ConfigError::Invalid("paths need at least one waypoint"));
        }
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(ConfigError::Invalid("canvas size must be positive"));
        }
        if self.tower.max_level == 0 {
            return Err(ConfigError::Invalid("tower max level must be at least 1"));
        }
        Ok(())
    }

    /// Reads the override stored in localStorage. No stored override means
    /// the defaults.
    pub fn load_from_storage() -> Result<Self, ConfigError> {
        let raw = web_sys::window()
            .and_then(|win| win.local_storage().ok().flatten())
            .and_then(|store| store.get_item(CONFIG_STORAGE_KEY).ok().flatten());
        match raw {
            Some(raw) => Self::from_json(&raw),
            None => Ok(Self::default()),
        }
    }
}
