// ============================================================================
// APP - Enrutado por página y montaje de la vista
// ============================================================================
// Cada página HTML (login/user/operator/admin) monta la misma app; el path
// decide qué vista se renderiza y el guard decide si el visitante se queda.
// ============================================================================

use chrono::Utc;
use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{append_child, clear_children, get_element_by_id};
use crate::models::{Role, SessionStatus};
use crate::services::{path_by_role, require_role};
use crate::state::AppState;
use crate::utils::constants::{ADMIN_HOME_PATH, LOGIN_PATH, OPERATOR_HOME_PATH, USER_HOME_PATH};
use crate::utils::storage::{current_path, navigate_to};
use crate::views;

pub struct App {
    state: AppState,
}

impl App {
    pub fn new() -> Self {
        Self {
            state: AppState::new(),
        }
    }

    pub fn run(&self) -> Result<(), JsValue> {
        self.state.apply_theme();

        let path = current_path();
        log::info!("🚀 [APP] Arrancando en {}", path);

        let view = match path.as_str() {
            USER_HOME_PATH => {
                let Some(profile) = require_role(&self.state.session, &[Role::User]) else {
                    return Ok(());
                };
                views::render_user(&self.state, &profile)?
            }
            OPERATOR_HOME_PATH => {
                let Some(profile) = require_role(&self.state.session, &[Role::Operator]) else {
                    return Ok(());
                };
                views::render_operator(&self.state, &profile)?
            }
            ADMIN_HOME_PATH => {
                let Some(profile) = require_role(&self.state.session, &[Role::Admin]) else {
                    return Ok(());
                };
                views::render_admin(&self.state, &profile)?
            }
            // Cualquier otra cosa (incluido "/") cae en el login
            _ => {
                // Con sesión vigente el login no tiene nada que mostrar
                if self.state.session.status(Utc::now()) == SessionStatus::Valid {
                    if let Some(profile) = self.state.session.current_user() {
                        log::info!("✅ [APP] Sesión vigente, saltando el login");
                        navigate_to(path_by_role(profile.role));
                        return Ok(());
                    }
                }
                if path != LOGIN_PATH && path != "/" {
                    log::warn!("⚠️ [APP] Path desconocido {}, mostrando login", path);
                }
                views::render_login(&self.state)?
            }
        };

        self.mount(&view)
    }

    /// Monta la vista en #app (o en <body> si la página no lo trae)
    fn mount(&self, view: &Element) -> Result<(), JsValue> {
        let target = match get_element_by_id("app") {
            Some(el) => el,
            None => crate::dom::document()
                .and_then(|d| d.body())
                .map(|b| b.into())
                .ok_or_else(|| JsValue::from_str("No hay donde montar la app"))?,
        };
        clear_children(&target);
        append_child(&target, view)
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
