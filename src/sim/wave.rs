//! Wave spawning as an explicit state machine, polled once per simulation tick.

use rand::Rng;

use crate::config::WaveConfig;

#[derive(Clone, Debug, PartialEq)]
pub enum WavePhase {
    /// Run not started yet.
    Dormant,
    Spawning { wave_count: u32, spawned: u32, next_spawn_at_ms: f64 },
    /// Wave fully spawned. Once the field is clear the next wave is
    /// scheduled at `next_wave_at_ms`.
    Idle { next_wave_at_ms: Option<f64> },
}

/// What the spawner wants placed on the field this tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnOrder {
    pub path_id: usize,
    pub speed: f64,
    pub health: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WaveEvent {
    WaveStarted { wave: u32, wave_count: u32 },
    WaveAdvanced { wave: u32 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct WaveSpawner {
    pub phase: WavePhase,
    cfg: WaveConfig,
}

pub fn enemy_speed(cfg: &WaveConfig, wave: u32) -> f64 {
    cfg.speed_factor / (wave as f64 + 1.0)
}

pub fn enemy_health(cfg: &WaveConfig, wave: u32) -> i32 {
    cfg.base_health + wave as i32 * cfg.health_per_wave
}

impl WaveSpawner {
    pub fn new(cfg: WaveConfig) -> Self {
        Self { phase: WavePhase::Dormant, cfg }
    }

    pub fn is_dormant(&self) -> bool {
        self.phase == WavePhase::Dormant
    }

    /// Always the floor with stock settings, since the jitter never exceeds it.
    pub fn spawn_delay_ms<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        (rng.r#gen::<f64>() * self.cfg.spawn_delay_jitter_ms).max(self.cfg.spawn_delay_floor_ms)
    }

    fn order<R: Rng + ?Sized>(&self, wave: u32, path_count: usize, rng: &mut R) -> SpawnOrder {
        SpawnOrder {
            path_id: rng.gen_range(0..path_count.max(1)),
            speed: enemy_speed(&self.cfg, wave),
            health: enemy_health(&self.cfg, wave),
        }
    }

    /// Opens wave `wave` and returns its first enemy.
    pub fn begin_wave<R: Rng + ?Sized>(
        &mut self,
        now_ms: f64,
        wave: u32,
        path_count: usize,
        rng: &mut R,
    ) -> (SpawnOrder, WaveEvent) {
        let order = self.order(wave, path_count, rng);
        let wave_count = (rng.r#gen::<f64>() * wave as f64).floor() as u32 + self.cfg.base_wave_size;
        self.phase = if 1 < wave_count {
            WavePhase::Spawning {
                wave_count,
                spawned: 1,
                next_spawn_at_ms: now_ms + self.spawn_delay_ms(rng),
            }
        } else {
            WavePhase::Idle { next_wave_at_ms: None }
        };
        (order, WaveEvent::WaveStarted { wave, wave_count })
    }

    /// Advances the schedule. `live_enemies` gates the move to the next wave;
    /// `wave_number` is bumped here when that happens.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        now_ms: f64,
        live_enemies: usize,
        wave_number: &mut u32,
        path_count: usize,
        rng: &mut R,
    ) -> (Option<SpawnOrder>, Option<WaveEvent>) {
        match self.phase.clone() {
            WavePhase::Dormant => (None, None),
            WavePhase::Spawning { wave_count, spawned, next_spawn_at_ms } => {
                if now_ms < next_spawn_at_ms {
                    return (None, None);
                }
                let order = self.order(*wave_number, path_count, rng);
                let spawned = spawned + 1;
                self.phase = if spawned < wave_count {
                    WavePhase::Spawning {
                        wave_count,
                        spawned,
                        next_spawn_at_ms: now_ms + self.spawn_delay_ms(rng),
                    }
                } else {
                    WavePhase::Idle { next_wave_at_ms: None }
                };
                (Some(order), None)
            }
            WavePhase::Idle { next_wave_at_ms: None } => {
                if live_enemies > 0 {
                    return (None, None);
                }
                *wave_number += 1;
                self.phase = WavePhase::Idle {
                    next_wave_at_ms: Some(now_ms + self.cfg.wave_interval_ms),
                };
                (None, Some(WaveEvent::WaveAdvanced { wave: *wave_number }))
            }
            WavePhase::Idle { next_wave_at_ms: Some(at) } => {
                if now_ms < at {
                    return (None, None);
                }
                let (order, event) = self.begin_wave(now_ms, *wave_number, path_count, rng);
                (Some(order), Some(event))
            }
        }
    }
}
