//! Frame drawing against a minimal surface: filled rects and circles,
//! stroked polylines, text. The canvas implementation lives at the bottom.

use web_sys::CanvasRenderingContext2d;

use crate::sim::GameState;
use crate::sim::enemy::Enemy;
use crate::sim::geometry::Point;

const BACKGROUND: &str = "#50C878";
const PATH_COLOR: &str = "#EADDCA";
const PATH_WIDTH: f64 = 65.0;
const ENEMY_RADIUS: f64 = 15.0;
const TOWER_RADIUS: f64 = 20.0;
const PROJECTILE_RADIUS: f64 = 3.0;
const HEALTH_BAR_WIDTH: f64 = 30.0;
const HEALTH_BAR_HEIGHT: f64 = 5.0;
const HEALTH_BAR_OFFSET: f64 = 25.0;
const HUD_FONT: &str = "20px Arial";
const LABEL_FONT: &str = "12px Arial";

pub trait Surface {
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: &str);
    fn fill_circle(&mut self, center: Point, radius: f64, color: &str);
    fn stroke_polyline(&mut self, points: &[Point], width: f64, color: &str);
    fn fill_text(&mut self, text: &str, x: f64, y: f64, font: &str, color: &str);
}

pub fn health_color(fraction: f64) -> &'static str {
    if fraction >= 0.5 {
        "green"
    } else if fraction >= 0.25 {
        "yellow"
    } else {
        "red"
    }
}

fn draw_enemy<S: Surface + ?Sized>(s: &mut S, e: &Enemy) {
    let p = e.position;
    s.fill_circle(p, ENEMY_RADIUS, "red");
    let bar_x = p.x - HEALTH_BAR_WIDTH / 2.0;
    let bar_y = p.y - HEALTH_BAR_OFFSET;
    s.fill_rect(bar_x, bar_y, HEALTH_BAR_WIDTH, HEALTH_BAR_HEIGHT, "black");
    let frac = e.health_fraction();
    s.fill_rect(bar_x, bar_y, HEALTH_BAR_WIDTH * frac, HEALTH_BAR_HEIGHT, health_color(frac));
}

pub fn hud_lines(game: &GameState) -> [String; 4] {
    let eco = &game.economy;
    [
        format!("Money: {}", eco.money),
        format!("Time: {}", eco.elapsed_secs),
        format!("Lives: {}", eco.lives),
        format!("Wave: {}", eco.wave_number),
    ]
}

/// Draws one frame. Dead enemies and spent projectiles are skipped.
pub fn render_frame<S: Surface + ?Sized>(game: &GameState, s: &mut S) {
    let canvas = &game.config.canvas;
    s.fill_rect(0.0, 0.0, canvas.width as f64, canvas.height as f64, BACKGROUND);
    for path in game.paths() {
        s.stroke_polyline(path, PATH_WIDTH, PATH_COLOR);
    }
    for e in game.enemies.iter().filter(|e| e.health > 0) {
        draw_enemy(s, e);
    }
    for t in &game.towers {
        let color = if t.hovered { "lightblue" } else { "blue" };
        s.fill_circle(t.position, TOWER_RADIUS, color);
        s.fill_text(
            &format!("Lv{}", t.level),
            t.position.x - 10.0,
            t.position.y + 5.0,
            LABEL_FONT,
            "white",
        );
    }
    for p in game.projectiles.iter().filter(|p| p.active) {
        s.fill_circle(p.position, PROJECTILE_RADIUS, "yellow");
    }
    for (i, line) in hud_lines(game).iter().enumerate() {
        s.fill_text(line, 10.0, 20.0 + 40.0 * i as f64, HUD_FONT, "white");
    }
}

impl Surface for CanvasRenderingContext2d {
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: &str) {
        self.set_fill_style_str(color);
        CanvasRenderingContext2d::fill_rect(self, x, y, w, h);
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: &str) {
        self.set_fill_style_str(color);
        self.begin_path();
        self.arc(center.x, center.y, radius, 0.0, std::f64::consts::PI * 2.0).ok();
        self.fill();
    }

    fn stroke_polyline(&mut self, points: &[Point], width: f64, color: &str) {
        let Some(first) = points.first() else { return };
        self.set_stroke_style_str(color);
        self.set_line_width(width);
        self.begin_path();
        self.move_to(first.x, first.y);
        for p in &points[1..] {
            self.line_to(p.x, p.y);
        }
        self.stroke();
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, font: &str, color: &str) {
        self.set_fill_style_str(color);
        self.set_font(font);
        CanvasRenderingContext2d::fill_text(self, text, x, y).ok();
    }
}
