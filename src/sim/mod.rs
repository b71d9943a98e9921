//! Browser-free simulation core: entities, economy, wave schedule and the
//! per-frame tick that ties them together.

pub mod economy;
pub mod enemy;
pub mod geometry;
pub mod projectile;
pub mod target;
pub mod tower;
pub mod wave;

use rand::Rng;

use crate::config::GameConfig;
use economy::{Economy, Rejected};
use enemy::{Enemy, Movement};
use geometry::Point;
use projectile::{Projectile, ProjectileOutcome};
use target::EnemyId;
use tower::Tower;
use wave::{SpawnOrder, WaveEvent, WaveSpawner};

/// Things that happened during a tick, for logging and the UI shell.
#[derive(Clone, Debug, PartialEq)]
pub enum FrameEvent {
    WaveStarted { wave: u32, wave_count: u32 },
    WaveAdvanced { wave: u32 },
    EnemySpawned { id: EnemyId, path_id: usize },
    EnemyLeaked { id: EnemyId, lives_left: u32 },
    EnemyKilled { id: EnemyId, reward: u32 },
    TowerFired { tower: usize, target: EnemyId },
    GameOver { wave: u32, elapsed_secs: u64 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickEffect {
    Upgraded { towers: usize },
    Placed,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub config: GameConfig,
    pub economy: Economy,
    pub enemies: Vec<Enemy>,
    pub towers: Vec<Tower>,
    pub projectiles: Vec<Projectile>,
    pub spawner: WaveSpawner,
    pub cursor: Point,
    pub started: bool,
    next_enemy_id: u32,
}

impl GameState {
    pub fn new(config: GameConfig) -> Self {
        Self {
            economy: Economy::new(&config.economy),
            spawner: WaveSpawner::new(config.wave.clone()),
            enemies: Vec::new(),
            towers: Vec::new(),
            projectiles: Vec::new(),
            cursor: Point::default(),
            started: false,
            next_enemy_id: 0,
            config,
        }
    }

    pub fn paths(&self) -> &[Vec<Point>] {
        &self.config.paths
    }

    /// Back to the initial state, equivalent to a fresh page load.
    pub fn reset(&mut self) {
        *self = Self::new(self.config.clone());
    }

    /// Starts the run and opens the first wave. No-op once running.
    pub fn start<R: Rng + ?Sized>(&mut self, now_ms: f64, rng: &mut R) -> Vec<FrameEvent> {
        if self.started {
            return Vec::new();
        }
        self.started = true;
        let path_count = self.config.paths.len();
        let (order, event) =
            self.spawner.begin_wave(now_ms, self.economy.wave_number, path_count, rng);
        let mut events = vec![wave_event(event)];
        events.push(self.spawn(order));
        events
    }

    /// Once-per-second run clock.
    pub fn tick_second(&mut self) {
        if self.started {
            self.economy.elapsed_secs = self.economy.elapsed_secs.saturating_add(1);
        }
    }

    pub fn set_cursor(&mut self, at: Point) {
        self.cursor = at;
    }

    fn spawn(&mut self, order: SpawnOrder) -> FrameEvent {
        let id = EnemyId(self.next_enemy_id);
        self.next_enemy_id = self.next_enemy_id.wrapping_add(1);
        let path = &self.config.paths[order.path_id];
        self.enemies.push(Enemy::spawn(id, order.path_id, path, order.speed, order.health));
        FrameEvent::EnemySpawned { id, path_id: order.path_id }
    }

    fn refresh_hover(&mut self) {
        let radius = self.config.tower.pick_radius;
        for t in &mut self.towers {
            t.update_hover(self.cursor, radius);
        }
    }

    pub fn place_tower(&mut self, at: Point) -> Result<(), Rejected> {
        self.economy.spend(self.economy.tower_cost)?;
        self.towers.push(Tower::new(at, &self.config.tower));
        Ok(())
    }

    pub fn upgrade_tower(&mut self, idx: usize) -> Result<u32, Rejected> {
        let Some(tower) = self.towers.get_mut(idx) else {
            return Ok(0);
        };
        tower.upgrade(&mut self.economy, &self.config.tower)
    }

    /// A click upgrades every tower under the cursor; only a click on open
    /// ground places a new tower.
    pub fn click(&mut self, at: Point) -> Result<ClickEffect, Rejected> {
        self.cursor = at;
        self.refresh_hover();
        let hovered: Vec<usize> =
            self.towers.iter().enumerate().filter(|(_, t)| t.hovered).map(|(i, _)| i).collect();
        if hovered.is_empty() {
            self.place_tower(at)?;
            return Ok(ClickEffect::Placed);
        }
        let mut upgraded = 0;
        let mut last_err = None;
        for idx in hovered {
            match self.upgrade_tower(idx) {
                Ok(_) => upgraded += 1,
                Err(e) => last_err = Some(e),
            }
        }
        match (upgraded, last_err) {
            (0, Some(e)) => Err(e),
            _ => Ok(ClickEffect::Upgraded { towers: upgraded }),
        }
    }

    /// One simulation frame. Order: spawner, enemies, game-over check, tower
    /// hover, tower fire, projectiles.
    pub fn tick<R: Rng + ?Sized>(&mut self, now_ms: f64, rng: &mut R) -> Vec<FrameEvent> {
        let mut events = Vec::new();
        if !self.started {
            return events;
        }

        let path_count = self.config.paths.len();
        let (order, wave_evt) = self.spawner.update(
            now_ms,
            self.enemies.len(),
            &mut self.economy.wave_number,
            path_count,
            rng,
        );
        if let Some(e) = wave_evt {
            events.push(wave_event(e));
        }
        if let Some(order) = order {
            events.push(self.spawn(order));
        }

        let Self { enemies, economy, config, .. } = &mut *self;
        enemies.retain_mut(|e| {
            if e.health <= 0 {
                return false;
            }
            match e.advance(&config.paths[e.path_id]) {
                Movement::ReachedEnd => {
                    economy.lose_life();
                    events.push(FrameEvent::EnemyLeaked { id: e.id, lives_left: economy.lives });
                    false
                }
                _ => true,
            }
        });

        if self.economy.lives == 0 {
            events.push(FrameEvent::GameOver {
                wave: self.economy.wave_number,
                elapsed_secs: self.economy.elapsed_secs,
            });
            self.reset();
            return events;
        }

        self.refresh_hover();

        let shot = &self.config.projectile;
        for (i, tower) in self.towers.iter_mut().enumerate() {
            if let Some(p) = tower.attempt_shoot(&self.enemies, now_ms, shot) {
                events.push(FrameEvent::TowerFired { tower: i, target: p.target });
                self.projectiles.push(p);
            }
        }

        let Self { projectiles, enemies, economy, config, .. } = &mut *self;
        let reward = config.projectile.kill_reward;
        projectiles.retain_mut(|p| {
            if let ProjectileOutcome::Impact { target, killed: true } = p.advance(enemies) {
                economy.earn(reward);
                events.push(FrameEvent::EnemyKilled { id: target, reward });
            }
            p.active
        });

        events
    }
}

fn wave_event(e: WaveEvent) -> FrameEvent {
    match e {
        WaveEvent::WaveStarted { wave, wave_count } => FrameEvent::WaveStarted { wave, wave_count },
        WaveEvent::WaveAdvanced { wave } => FrameEvent::WaveAdvanced { wave },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EconomyConfig;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use wave::WavePhase;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn straight_path_config() -> GameConfig {
        GameConfig {
            paths: vec![vec![Point::new(0.0, 0.0), Point::new(1000.0, 0.0)]],
            ..GameConfig::default()
        }
    }

    /// A started game with no spawner activity, so tests control the field.
    fn running(config: GameConfig) -> GameState {
        let mut g = GameState::new(config);
        g.started = true;
        g.spawner.phase = WavePhase::Idle { next_wave_at_ms: Some(f64::INFINITY) };
        g
    }

    fn add_enemy(g: &mut GameState, at: Point, speed: f64, health: i32) -> EnemyId {
        let id = EnemyId(g.next_enemy_id);
        g.next_enemy_id += 1;
        let mut e = Enemy::spawn(id, 0, &g.config.paths[0], speed, health);
        e.position = at;
        g.enemies.push(e);
        id
    }

    #[test]
    fn nothing_moves_before_start() {
        let mut g = GameState::new(GameConfig::default());
        assert!(g.tick(1000.0, &mut rng()).is_empty());
        g.tick_second();
        assert_eq!(g.economy.elapsed_secs, 0);
        assert!(g.enemies.is_empty());
    }

    #[test]
    fn start_is_idempotent() {
        let mut g = GameState::new(GameConfig::default());
        let events = g.start(0.0, &mut rng());
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], FrameEvent::WaveStarted { wave: 1, wave_count: 5 }));
        assert_eq!(g.enemies.len(), 1);
        assert_eq!(g.enemies[0].position, Point::new(0.0, 300.0));
        assert_eq!(g.enemies[0].speed, 1.0);
        assert_eq!(g.enemies[0].health, 55);

        assert!(g.start(10.0, &mut rng()).is_empty());
        assert_eq!(g.enemies.len(), 1);
        g.tick_second();
        assert_eq!(g.economy.elapsed_secs, 1);
    }

    #[test]
    fn placement_spends_tower_cost_and_rejects_when_short() {
        let cfg = GameConfig {
            economy: EconomyConfig { starting_money: 15, ..Default::default() },
            ..GameConfig::default()
        };
        let mut g = GameState::new(cfg);
        assert_eq!(g.click(Point::new(200.0, 200.0)), Ok(ClickEffect::Placed));
        assert_eq!(g.economy.money, 5);
        assert_eq!(
            g.click(Point::new(400.0, 400.0)),
            Err(Rejected::InsufficientFunds { cost: 10, available: 5 })
        );
        assert_eq!(g.towers.len(), 1);
        assert_eq!(g.economy.money, 5);
    }

    #[test]
    fn click_on_tower_upgrades_instead_of_placing() {
        let mut g = GameState::new(GameConfig::default());
        g.click(Point::new(200.0, 200.0)).unwrap();
        assert_eq!(g.economy.money, 50);
        assert_eq!(g.click(Point::new(205.0, 200.0)), Ok(ClickEffect::Upgraded { towers: 1 }));
        assert_eq!(g.towers.len(), 1);
        assert_eq!(g.towers[0].level, 2);
        assert_eq!(g.economy.money, 30);
        // second upgrade costs 30, leaving nothing for the third
        g.click(Point::new(200.0, 205.0)).unwrap();
        assert_eq!(g.economy.money, 0);
        assert!(g.click(Point::new(200.0, 200.0)).is_err());
        assert_eq!(g.towers[0].level, 3);
        assert_eq!(g.towers.len(), 1);
    }

    #[test]
    fn five_hits_kill_and_reward_exactly_once() {
        let mut g = running(straight_path_config());
        let start_money = g.economy.money;
        let id = add_enemy(&mut g, Point::new(0.0, 0.0), 1.0, 50);
        for _ in 0..2 {
            g.projectiles.push(Projectile::new(Point::new(2.0, 0.0), id, 5.0, 10));
        }
        g.tick(0.0, &mut rng());
        assert_eq!(g.enemies[0].health, 30);
        assert_eq!(g.economy.money, start_money);
        assert!(g.projectiles.is_empty());

        for _ in 0..4 {
            let at = g.enemies[0].position;
            g.projectiles.push(Projectile::new(Point::new(at.x + 1.0, 0.0), id, 5.0, 10));
        }
        let events = g.tick(16.0, &mut rng());
        let kills: Vec<_> =
            events.iter().filter(|e| matches!(e, FrameEvent::EnemyKilled { .. })).collect();
        assert_eq!(kills, vec![&FrameEvent::EnemyKilled { id, reward: 5 }]);
        assert_eq!(g.enemies[0].health, 0);
        assert_eq!(g.economy.money, start_money + 5);
        assert!(g.projectiles.is_empty());

        g.tick(32.0, &mut rng());
        assert!(g.enemies.is_empty());
        assert_eq!(g.economy.money, start_money + 5);
    }

    #[test]
    fn health_only_drops_in_damage_steps() {
        let mut g = running(straight_path_config());
        g.place_tower(Point::new(150.0, 0.0)).unwrap();
        add_enemy(&mut g, Point::new(0.0, 0.0), 1.0, 500);
        let mut rng = rng();
        let mut last = 500;
        let mut now = 0.0;
        for _ in 0..600 {
            g.tick(now, &mut rng);
            now += 16.0;
            let Some(e) = g.enemies.first() else { break };
            assert!(e.health <= last);
            assert_eq!((last - e.health) % 10, 0);
            last = e.health;
        }
        assert!(last < 500);
    }

    #[test]
    fn tower_in_game_never_double_fires() {
        let mut g = running(straight_path_config());
        g.place_tower(Point::new(100.0, 50.0)).unwrap();
        add_enemy(&mut g, Point::new(100.0, 0.0), 0.0, 10_000);
        let mut rng = rng();
        let mut fired = Vec::new();
        let mut now = 0.0;
        for _ in 0..400 {
            for e in g.tick(now, &mut rng) {
                if let FrameEvent::TowerFired { .. } = e {
                    fired.push(now);
                }
            }
            now += 16.0;
        }
        assert!(fired.len() >= 5);
        for w in fired.windows(2) {
            assert!(w[1] - w[0] > 1000.0);
        }
    }

    #[test]
    fn leak_costs_one_life_and_removes_enemy() {
        let mut g = running(straight_path_config());
        add_enemy(&mut g, Point::new(1000.0, 0.0), 1.0, 50);
        g.enemies[0].path_index = 1;
        let events = g.tick(0.0, &mut rng());
        assert_eq!(g.economy.lives, 4);
        assert!(g.enemies.is_empty());
        assert!(events.contains(&FrameEvent::EnemyLeaked { id: EnemyId(0), lives_left: 4 }));
    }

    #[test]
    fn dead_enemy_on_last_waypoint_does_not_leak() {
        let mut g = running(straight_path_config());
        add_enemy(&mut g, Point::new(1000.0, 0.0), 1.0, 0);
        g.enemies[0].path_index = 1;
        g.tick(0.0, &mut rng());
        assert_eq!(g.economy.lives, 5);
        assert!(g.enemies.is_empty());
    }

    #[test]
    fn last_life_lost_resets_everything_once() {
        let cfg = GameConfig {
            economy: EconomyConfig { starting_lives: 1, ..Default::default() },
            ..straight_path_config()
        };
        let mut g = running(cfg.clone());
        g.place_tower(Point::new(500.0, 500.0)).unwrap();
        g.economy.elapsed_secs = 12;
        for _ in 0..2 {
            add_enemy(&mut g, Point::new(1000.0, 0.0), 1.0, 50);
        }
        for e in &mut g.enemies {
            e.path_index = 1;
        }
        let events = g.tick(0.0, &mut rng());
        let overs: Vec<_> =
            events.iter().filter(|e| matches!(e, FrameEvent::GameOver { .. })).collect();
        assert_eq!(overs, vec![&FrameEvent::GameOver { wave: 1, elapsed_secs: 12 }]);
        assert_eq!(g, GameState::new(cfg));

        assert!(g.tick(16.0, &mut rng()).is_empty());
    }

    #[test]
    fn removal_never_skips_neighbours() {
        let mut g = running(straight_path_config());
        for x in [0.0, 10.0, 20.0, 30.0] {
            add_enemy(&mut g, Point::new(x, 0.0), 1.0, 50);
        }
        g.enemies[0].health = 0;
        g.enemies[1].health = 0;
        g.tick(0.0, &mut rng());
        let xs: Vec<f64> = g.enemies.iter().map(|e| e.position.x).collect();
        assert_eq!(xs, vec![21.0, 31.0]);
    }

    #[test]
    fn full_wave_plays_out_and_next_wave_arrives() {
        let mut g = GameState::new(GameConfig {
            economy: EconomyConfig { starting_lives: 50, ..Default::default() },
            ..GameConfig::default()
        });
        let mut rng = rng();
        let mut now = 0.0;
        g.start(now, &mut rng);
        let mut spawned = 1;
        let mut advanced = false;
        while now < 600_000.0 && !advanced {
            now += 16.0;
            for e in g.tick(now, &mut rng) {
                match e {
                    FrameEvent::EnemySpawned { .. } => spawned += 1,
                    FrameEvent::WaveAdvanced { wave } => {
                        assert_eq!(wave, 2);
                        advanced = true;
                    }
                    _ => {}
                }
            }
        }
        assert!(advanced);
        assert_eq!(spawned, 5);
        assert_eq!(g.economy.lives, 45);
        assert_eq!(g.economy.wave_number, 2);
    }
}
