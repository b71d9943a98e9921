//! Yew-facing run state. Wraps the simulation and turns UI actions into
//! simulation calls; everything stateful lives in `GameState`.

use std::rc::Rc;
use yew::Reducible;

use crate::config::GameConfig;
use crate::sim::geometry::Point;
use crate::sim::{ClickEffect, FrameEvent, GameState};

/// Summary of the run that just ended, shown on the game-over overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LostRun {
    pub wave: u32,
    pub elapsed_secs: u64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RunState {
    pub game: GameState,
    /// Bumped on every game over, so the view can fire its notice once.
    pub game_overs: u32,
    pub last_loss: Option<LostRun>,
    pub version: u64,
}

impl RunState {
    pub fn new(config: GameConfig) -> Self {
        Self { game: GameState::new(config), game_overs: 0, last_loss: None, version: 0 }
    }

    fn log_events(&mut self, events: &[FrameEvent]) {
        for e in events {
            match *e {
                FrameEvent::WaveStarted { wave, wave_count } => {
                    log::info!("wave {} started ({} enemies)", wave, wave_count)
                }
                FrameEvent::WaveAdvanced { wave } => log::info!("wave {} incoming", wave),
                FrameEvent::EnemyLeaked { lives_left, .. } => {
                    log::debug!("enemy leaked, lives left {}", lives_left)
                }
                FrameEvent::EnemyKilled { id, reward } => {
                    log::debug!("enemy {:?} killed, +{}", id, reward)
                }
                FrameEvent::GameOver { wave, elapsed_secs } => {
                    log::warn!("game over on wave {} after {}s", wave, elapsed_secs);
                    self.game_overs = self.game_overs.wrapping_add(1);
                    self.last_loss = Some(LostRun { wave, elapsed_secs });
                }
                FrameEvent::EnemySpawned { .. } | FrameEvent::TowerFired { .. } => {}
            }
        }
    }
}

#[derive(Clone, Debug)]
pub enum RunAction {
    StartRun { now_ms: f64 },
    TickSecond, // called once per elapsed real second
    SimTick { now_ms: f64 }, // once per animation frame
    PointerMove { x: f64, y: f64 },
    Click { x: f64, y: f64 },
}

impl Reducible for RunState {
    type Action = RunAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use RunAction::*;
        let mut new = (*self).clone();
        let mut rng = rand::thread_rng();
        match action {
            StartRun { now_ms } => {
                if new.game.started {
                    return self;
                }
                log::info!("run started");
                new.last_loss = None;
                let events = new.game.start(now_ms, &mut rng);
                new.log_events(&events);
            }
            TickSecond => {
                if !new.game.started {
                    return self;
                }
                new.game.tick_second();
            }
            SimTick { now_ms } => {
                if !new.game.started {
                    return self;
                }
                let events = new.game.tick(now_ms, &mut rng);
                new.log_events(&events);
            }
            PointerMove { x, y } => new.game.set_cursor(Point::new(x, y)),
            Click { x, y } => match new.game.click(Point::new(x, y)) {
                Ok(ClickEffect::Placed) => {
                    log::info!("tower placed at ({:.0}, {:.0}), money {}", x, y, new.game.economy.money)
                }
                Ok(ClickEffect::Upgraded { towers }) => {
                    log::info!("upgraded {} tower(s), money {}", towers, new.game.economy.money)
                }
                Err(e) => {
                    log::debug!("click at ({:.0}, {:.0}) ignored: {}", x, y, e);
                    return self;
                }
            },
        }
        new.version = new.version.wrapping_add(1);
        Rc::new(new)
    }
}
