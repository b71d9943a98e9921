mod components;
mod config;
mod model;
mod render;
mod sim;
mod util;

use components::app::{App, AppProps};
use config::{CONFIG_STORAGE_KEY, GameConfig};

fn main() {
    console_error_panic_hook::set_once();
    let (config, config_err) = match GameConfig::load_from_storage() {
        Ok(cfg) => (cfg, None),
        Err(e) => (GameConfig::default(), Some(e)),
    };
    if let Err(e) = util::init_logging(config.log_level) {
        web_sys::console::warn_1(&format!("logger already set: {}", e).into());
    }
    if let Some(e) = config_err {
        log::warn!("ignoring stored {}: {}", CONFIG_STORAGE_KEY, e);
    }
    yew::Renderer::<App>::with_props(AppProps { config }).render();
}
