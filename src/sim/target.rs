//! Capabilities towers and projectiles need from whatever they shoot at.
//! Targets are referred to by a stable handle, never by index or reference,
//! so removal from the live collection cannot leave a dangling target.

use super::geometry::Point;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EnemyId(pub u32);

pub trait Targetable {
    fn handle(&self) -> EnemyId;
    fn position(&self) -> Point;
    fn is_alive(&self) -> bool;
}

pub trait Damageable: Targetable {
    /// Applies `amount` and reports whether this hit took the target to zero.
    fn take_damage(&mut self, amount: i32) -> bool;
}

pub fn find_mut<T: Targetable>(targets: &mut [T], id: EnemyId) -> Option<&mut T> {
    targets.iter_mut().find(|t| t.handle() == id)
}
