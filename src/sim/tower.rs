use super::economy::{Economy, Rejected};
use super::geometry::{Point, distance};
use super::projectile::Projectile;
use super::target::Targetable;
use crate::config::{ProjectileConfig, TowerConfig};

#[derive(Clone, Debug, PartialEq)]
pub struct Tower {
    pub position: Point,
    pub range: f64,
    pub fire_interval_ms: f64,
    /// `None` until the first shot, so a fresh tower may fire immediately.
    pub last_shot_ms: Option<f64>,
    pub level: u32,
    pub upgrade_cost: u32,
    pub hovered: bool,
}

impl Tower {
    pub fn new(position: Point, cfg: &TowerConfig) -> Self {
        Self {
            position,
            range: cfg.range,
            fire_interval_ms: cfg.fire_interval_ms,
            last_shot_ms: None,
            level: 1,
            upgrade_cost: cfg.upgrade_cost,
            hovered: false,
        }
    }

    pub fn ready(&self, now_ms: f64) -> bool {
        match self.last_shot_ms {
            Some(last) => now_ms - last > self.fire_interval_ms,
            None => true,
        }
    }

    pub fn in_range(&self, p: Point) -> bool {
        distance(self.position, p) < self.range
    }

    /// Fires at the first live target in iteration order that is strictly
    /// inside range. At most one projectile per call.
    pub fn attempt_shoot<T: Targetable>(
        &mut self,
        targets: &[T],
        now_ms: f64,
        shot: &ProjectileConfig,
    ) -> Option<Projectile> {
        if !self.ready(now_ms) {
            return None;
        }
        let target = targets.iter().find(|t| t.is_alive() && self.in_range(t.position()))?;
        self.last_shot_ms = Some(now_ms);
        Some(Projectile::new(self.position, target.handle(), shot.speed, shot.damage))
    }

    /// Returns the amount paid.
    pub fn upgrade(&mut self, economy: &mut Economy, cfg: &TowerConfig) -> Result<u32, Rejected> {
        if self.level >= cfg.max_level {
            return Err(Rejected::MaxLevel { level: self.level });
        }
        let paid = self.upgrade_cost;
        economy.spend(paid)?;
        self.level += 1;
        self.range += cfg.range_per_level;
        self.fire_interval_ms -= cfg.interval_step_ms;
        self.upgrade_cost += cfg.upgrade_cost_step;
        Ok(paid)
    }

    pub fn update_hover(&mut self, cursor: Point, pick_radius: f64) {
        self.hovered = distance(self.position, cursor) < pick_radius;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EconomyConfig;
    use crate::sim::enemy::Enemy;
    use crate::sim::target::EnemyId;

    fn enemy_at(id: u32, x: f64, y: f64) -> Enemy {
        Enemy::spawn(EnemyId(id), 0, &[Point::new(x, y)], 1.0, 50)
    }

    fn rich() -> Economy {
        Economy::new(&EconomyConfig { starting_money: 10_000, ..Default::default() })
    }

    #[test]
    fn fires_once_per_interval_while_target_in_range() {
        let cfg = TowerConfig::default();
        let shot = ProjectileConfig::default();
        let mut t = Tower::new(Point::new(100.0, 100.0), &cfg);
        let enemies = vec![enemy_at(1, 130.0, 140.0)]; // distance 50

        let mut fired_at = Vec::new();
        let mut now = 0.0;
        while now <= 5000.0 {
            if t.attempt_shoot(&enemies, now, &shot).is_some() {
                fired_at.push(now);
            }
            now += 16.0;
        }
        assert!(fired_at.len() >= 4);
        for pair in fired_at.windows(2) {
            assert!(pair[1] - pair[0] > 1000.0);
            assert!(pair[1] - pair[0] <= 1016.0);
        }
    }

    #[test]
    fn strict_interval_boundary() {
        let mut t = Tower::new(Point::new(100.0, 100.0), &TowerConfig::default());
        let shot = ProjectileConfig::default();
        let enemies = vec![enemy_at(1, 100.0, 150.0)];
        assert!(t.attempt_shoot(&enemies, 0.0, &shot).is_some());
        assert!(t.attempt_shoot(&enemies, 500.0, &shot).is_none());
        assert!(t.attempt_shoot(&enemies, 1000.0, &shot).is_none());
        assert!(t.attempt_shoot(&enemies, 1001.0, &shot).is_some());
    }

    #[test]
    fn picks_first_in_range_not_nearest() {
        let mut t = Tower::new(Point::new(0.0, 0.0), &TowerConfig::default());
        let enemies = vec![
            enemy_at(1, 500.0, 0.0),
            enemy_at(2, 90.0, 0.0),
            enemy_at(3, 10.0, 0.0),
        ];
        let p = t.attempt_shoot(&enemies, 0.0, &ProjectileConfig::default()).unwrap();
        assert_eq!(p.target, EnemyId(2));
        assert_eq!(p.position, t.position);
    }

    #[test]
    fn range_is_strict_and_idle_tower_keeps_its_timer() {
        let mut t = Tower::new(Point::new(0.0, 0.0), &TowerConfig::default());
        let enemies = vec![enemy_at(1, 100.0, 0.0)];
        assert!(t.attempt_shoot(&enemies, 0.0, &ProjectileConfig::default()).is_none());
        assert_eq!(t.last_shot_ms, None);
    }

    #[test]
    fn dead_targets_are_skipped() {
        let mut t = Tower::new(Point::new(0.0, 0.0), &TowerConfig::default());
        let mut dead = enemy_at(1, 10.0, 0.0);
        dead.health = 0;
        let enemies = vec![dead, enemy_at(2, 20.0, 0.0)];
        let p = t.attempt_shoot(&enemies, 0.0, &ProjectileConfig::default()).unwrap();
        assert_eq!(p.target, EnemyId(2));
    }

    #[test]
    fn upgrade_improves_stats_and_raises_cost() {
        let cfg = TowerConfig::default();
        let mut eco = Economy::new(&EconomyConfig { starting_money: 25, ..Default::default() });
        let mut t = Tower::new(Point::new(0.0, 0.0), &cfg);
        assert_eq!(t.upgrade(&mut eco, &cfg), Ok(20));
        assert_eq!(t.level, 2);
        assert_eq!(t.range, 110.0);
        assert_eq!(t.fire_interval_ms, 950.0);
        assert_eq!(t.upgrade_cost, 30);
        assert_eq!(eco.money, 5);
    }

    #[test]
    fn rejected_upgrade_changes_nothing() {
        let cfg = TowerConfig::default();
        let mut eco = Economy::new(&EconomyConfig { starting_money: 19, ..Default::default() });
        let mut t = Tower::new(Point::new(0.0, 0.0), &cfg);
        let before = t.clone();
        assert_eq!(
            t.upgrade(&mut eco, &cfg),
            Err(Rejected::InsufficientFunds { cost: 20, available: 19 })
        );
        assert_eq!(t, before);
        assert_eq!(eco.money, 19);
    }

    #[test]
    fn level_is_capped_and_cost_strictly_increases() {
        let cfg = TowerConfig::default();
        let mut eco = rich();
        let mut t = Tower::new(Point::new(0.0, 0.0), &cfg);
        let mut last_cost = t.upgrade_cost;
        while t.level < cfg.max_level {
            t.upgrade(&mut eco, &cfg).unwrap();
            assert!(t.upgrade_cost > last_cost);
            last_cost = t.upgrade_cost;
        }
        assert_eq!(t.level, 10);
        assert_eq!(t.fire_interval_ms, 550.0);
        let money = eco.money;
        assert_eq!(t.upgrade(&mut eco, &cfg), Err(Rejected::MaxLevel { level: 10 }));
        assert_eq!(t.level, 10);
        assert_eq!(eco.money, money);
    }

    #[test]
    fn hover_uses_pick_radius() {
        let mut t = Tower::new(Point::new(50.0, 50.0), &TowerConfig::default());
        t.update_hover(Point::new(60.0, 50.0), 20.0);
        assert!(t.hovered);
        t.update_hover(Point::new(70.0, 50.0), 20.0);
        assert!(!t.hovered);
    }
}
