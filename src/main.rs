mod app;
mod config;
mod deck;
mod error;
mod input;
mod state;
mod style;
mod view;

use app::SlidesApp;
use config::Config;
use deck::Deck;
use eframe::egui;
use error::SlidesError;
use log::{error, info, warn};
use state::ProgressStore;
use std::env;
use std::process;

const RESET_FLAG: &str = "--reset-progress";

/// A configured deck that fails to load is reported and replaced by the bundled one
fn load_deck(config: &Config) -> Result<Deck, SlidesError> {
    if let Some(path) = config.deck_path() {
        match Deck::load(&path) {
            Ok(deck) => {
                info!("Loaded deck from {}", path.display());
                return Ok(deck);
            }
            Err(e) => error!(
                "Failed to load deck {}: {}; using the bundled deck",
                path.display(),
                e
            ),
        }
    }
    Deck::bundled()
}

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = Config::create_default() {
        warn!("Could not write default config: {}", e);
    }
    let config = Config::load();

    let deck = match load_deck(&config) {
        Ok(deck) => deck,
        Err(e) => {
            error!("Bundled deck is invalid: {}", e);
            process::exit(1);
        }
    };

    let mut store = ProgressStore::open_default();
    for arg in env::args().skip(1) {
        if arg == RESET_FLAG {
            store.clear();
            info!("Progress reset");
        } else {
            warn!("Ignoring unknown argument {}", arg);
        }
    }

    let title = deck.title.clone();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width, config.window.height])
            .with_title(title.clone()),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| Ok(Box::new(SlidesApp::new(cc, config, deck, store)))),
    )
}
