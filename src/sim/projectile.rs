use super::geometry::{Point, Step, step_towards};
use super::target::{Damageable, EnemyId, Targetable, find_mut};

#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub position: Point,
    pub target: EnemyId,
    pub speed: f64,
    pub damage: i32,
    pub active: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProjectileOutcome {
    /// Already spent; nothing happened.
    Inactive,
    /// Target vanished or died before arrival. No damage dealt.
    Lost,
    InFlight,
    Impact { target: EnemyId, killed: bool },
}

impl Projectile {
    pub fn new(position: Point, target: EnemyId, speed: f64, damage: i32) -> Self {
        Self { position, target, speed, damage, active: true }
    }

    /// Homes on the target's current position and resolves the hit.
    pub fn advance<T: Damageable>(&mut self, targets: &mut [T]) -> ProjectileOutcome {
        if !self.active {
            return ProjectileOutcome::Inactive;
        }
        let Some(target) = find_mut(targets, self.target).filter(|t| t.is_alive()) else {
            self.active = false;
            return ProjectileOutcome::Lost;
        };
        match step_towards(self.position, target.position(), self.speed) {
            Step::Arrived => {
                self.active = false;
                let killed = target.take_damage(self.damage);
                ProjectileOutcome::Impact { target: self.target, killed }
            }
            Step::Moved(p) => {
                self.position = p;
                ProjectileOutcome::InFlight
            }
        }
    }
}
