use super::run_view::RunView;
use crate::config::GameConfig;
use crate::model::RunState;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct AppProps {
    pub config: GameConfig,
}

#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
    let run_state = {
        let config = props.config.clone();
        use_reducer(move || RunState::new(config))
    };
    let last_resources = use_mut_ref(|| (0u32, 0u32));

    // Terminal notice: one alert per game over
    {
        let game_overs = run_state.game_overs;
        use_effect_with(game_overs, move |n| {
            if *n > 0 {
                if let Some(win) = web_sys::window() {
                    let _ = win.alert_with_message("Game Over");
                }
            }
            || ()
        });
    }

    // Log resource changes
    {
        let last_resources = last_resources.clone();
        use_effect_with(
            (run_state.game.economy.money, run_state.game.economy.lives),
            move |deps| {
                let (money, lives) = *deps;
                let mut prev = last_resources.borrow_mut();
                if prev.0 != money {
                    log::trace!("money: {} -> {}", prev.0, money);
                }
                if prev.1 != lives {
                    log::debug!("lives: {} -> {}", prev.1, lives);
                }
                *prev = (money, lives);
                || ()
            },
        );
    }

    html! {
        <div id="root">
            <RunView run_state={run_state.clone()} />
        </div>
    }
}
