// ============================================================================
// HEADER COMPARTIDO - Identidad, tema, health y logout
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{append_child, get_element_by_id, on_click, set_text_content, ElementBuilder};
use crate::models::Profile;
use crate::state::AppState;
use crate::utils::constants::LOGIN_PATH;
use crate::utils::storage::navigate_to;

pub fn render_header(state: &AppState, profile: &Profile, title: &str) -> Result<Element, JsValue> {
    let header = ElementBuilder::new("header")?.class("app-header").build();

    let heading = ElementBuilder::new("h1")?.text(title).build();
    append_child(&header, &heading)?;

    let identity = ElementBuilder::new("span")?
        .class("header-identity")
        .text(&format!("{} ({})", profile.email, profile.role.as_str()))
        .build();
    append_child(&header, &identity)?;

    // Indicador de salud del backend, se resuelve async
    let health = ElementBuilder::new("span")?
        .id("health-indicator")?
        .class("health-indicator")
        .text("…")
        .build();
    append_child(&header, &health)?;
    {
        let api = state.api.clone();
        spawn_local(async move {
            let status = api.health().await;
            if let Some(el) = get_element_by_id("health-indicator") {
                set_text_content(&el, &format!("API: {}", status));
            }
        });
    }

    // Toggle de tema
    let theme_btn = ElementBuilder::new("button")?
        .class("btn-theme")
        .text("🌓")
        .build();
    {
        let state = state.clone();
        on_click(&theme_btn, move |_| {
            state.toggle_theme();
        })?;
    }
    append_child(&header, &theme_btn)?;

    // Logout: limpieza local + redirect, sin llamada al servidor
    let logout_btn = ElementBuilder::new("button")?
        .class("btn-logout")
        .text("Salir")
        .build();
    {
        let session = state.session.clone();
        on_click(&logout_btn, move |_| {
            log::info!("👋 [HEADER] Logout manual");
            session.logout();
            navigate_to(LOGIN_PATH);
        })?;
    }
    append_child(&header, &logout_btn)?;

    Ok(header)
}
