// Geometry helpers shared by enemy movement, tower targeting and projectiles.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

pub fn distance(a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    (dx * dx + dy * dy).sqrt()
}

/// Unit vector from `from` to `to`, or `None` when the points coincide.
pub fn direction(from: Point, to: Point) -> Option<(f64, f64)> {
    let d = distance(from, to);
    if d <= 0.0 {
        return None;
    }
    Some(((to.x - from.x) / d, (to.y - from.y) / d))
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Step {
    /// Target was closer than one step; the caller decides whether to snap.
    Arrived,
    Moved(Point),
}

/// One fixed-length step towards `to`. Arrival uses a strict `distance < speed`.
pub fn step_towards(from: Point, to: Point, speed: f64) -> Step {
    if distance(from, to) < speed {
        return Step::Arrived;
    }
    match direction(from, to) {
        Some((ux, uy)) => Step::Moved(Point::new(from.x + ux * speed, from.y + uy * speed)),
        // zero speed on top of the target
        None => Step::Moved(from),
    }
}
