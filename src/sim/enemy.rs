use super::geometry::{Point, Step, step_towards};
use super::target::{Damageable, EnemyId, Targetable};

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub id: EnemyId,
    pub position: Point,
    /// Units travelled per tick, fixed at spawn.
    pub speed: f64,
    pub health: i32,
    pub max_health: i32,
    /// Index into the owning state's path list.
    pub path_id: usize,
    /// Index of the waypoint the enemy last reached.
    pub path_index: usize,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Movement {
    Moved,
    ReachedWaypoint(usize),
    ReachedEnd,
}

impl Enemy {
    /// Spawns at the first waypoint of `path`.
    pub fn spawn(id: EnemyId, path_id: usize, path: &[Point], speed: f64, health: i32) -> Self {
        Self {
            id,
            position: path.first().copied().unwrap_or_default(),
            speed,
            health,
            max_health: health,
            path_id,
            path_index: 0,
        }
    }

    pub fn advance(&mut self, path: &[Point]) -> Movement {
        if self.path_index + 1 >= path.len() {
            return Movement::ReachedEnd;
        }
        let next = path[self.path_index + 1];
        match step_towards(self.position, next, self.speed) {
            Step::Arrived => {
                self.position = next;
                self.path_index += 1;
                Movement::ReachedWaypoint(self.path_index)
            }
            Step::Moved(p) => {
                self.position = p;
                Movement::Moved
            }
        }
    }

    /// Fraction of health remaining, clamped to `[0, 1]` for health bars.
    pub fn health_fraction(&self) -> f64 {
        if self.max_health <= 0 {
            return 0.0;
        }
        (self.health as f64 / self.max_health as f64).clamp(0.0, 1.0)
    }
}

impl Targetable for Enemy {
    fn handle(&self) -> EnemyId {
        self.id
    }

    fn position(&self) -> Point {
        self.position
    }

    fn is_alive(&self) -> bool {
        self.health > 0
    }
}

impl Damageable for Enemy {
    fn take_damage(&mut self, amount: i32) -> bool {
        let was_alive = self.is_alive();
        self.health -= amount;
        was_alive && !self.is_alive()
    }
}
