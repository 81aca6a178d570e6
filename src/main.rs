//! Scripted cart page demo
//!
//! Usage: `storefront-demo [CONFIG_PATH]`
//!
//! Without a path the config under the user config dir is used when present,
//! otherwise the built-in sample. A config file that exists but does not
//! parse is an error either way.

use std::path::PathBuf;
use std::process::ExitCode;

use storefront::{CartPage, ConfigError, PageConfig, ScriptStep};
use storefront_ui::constants::REVEAL_DURATION;
use storefront_ui::Renderer;
use web_time::Instant;

const VIEWPORT: (f32, f32) = (1024.0, 768.0);

fn load_config() -> Result<PageConfig, ConfigError> {
    match std::env::args().nth(1) {
        Some(path) => PageConfig::load(&PathBuf::from(path)),
        None => Ok(PageConfig::load_from_default_path()?.unwrap_or_default()),
    }
}

fn main() -> ExitCode {
    // Until the config is loaded only warnings and errors show
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Trace)
        .init();
    log::set_max_level(log::LevelFilter::Warn);

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Could not load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };
    log::set_max_level(config.log_level.to_level_filter());

    let mut page = CartPage::from_config(&config);

    for (index, step) in config.script.iter().enumerate() {
        let event = match step {
            ScriptStep::ClickOn { target } => match page.target_point(target) {
                Some((x, y)) => storefront_ui::Event::left_press(x, y),
                None => {
                    log::warn!("Step {}: {:?} is not on screen, skipping", index + 1, target);
                    continue;
                }
            },
            _ => match step.to_event() {
                Some(event) => event,
                None => continue,
            },
        };

        match page.dispatch(&event) {
            Some(message) => log::info!("Step {}: {:?}", index + 1, message),
            None => log::debug!("Step {}: no message", index + 1),
        }
    }

    let mut renderer = Renderer::new(VIEWPORT.0, VIEWPORT.1);
    page.render(&mut renderer, Instant::now() + REVEAL_DURATION);
    for text in renderer.texts() {
        println!("{}", text);
    }

    let totals = page.totals();
    log::info!(
        "Final totals: subtotal {}, discount {}, shipping {}, total {}",
        totals.sub_total,
        totals.discount,
        totals.shipping_fee,
        totals.total
    );

    ExitCode::SUCCESS
}
