// ============================================================================
// DESKLITE FRONT - Cliente web del helpdesk (WASM puro, sin framework)
// ============================================================================

use wasm_bindgen::prelude::*;

pub mod app;
pub mod config;
pub mod dom;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;
pub mod views;

use app::App;
use config::CONFIG;

#[wasm_bindgen(start)]
pub fn run() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    if CONFIG.enable_logging {
        wasm_logger::init(wasm_logger::Config::default());
    }

    log::info!(
        "🚀 [INIT] DeskLite Front ({}) contra {}",
        CONFIG.environment,
        CONFIG.backend_url()
    );

    App::new().run()
}
