// ============================================================================
// APP STATE - Dependencias compartidas de la aplicación
// ============================================================================
// La sesión y el gateway se inyectan explícitamente a cada vista a través
// de este objeto. Nada de accessors globales escondidos.
// ============================================================================

use crate::services::api_client::ApiClient;
use crate::services::session_service::SessionService;

#[derive(Clone)]
pub struct AppState {
    pub session: SessionService,
    pub api: ApiClient,
}

impl AppState {
    pub fn new() -> Self {
        let session = SessionService::new();
        let api = ApiClient::new(session.clone());
        Self { session, api }
    }

    /// Aplica el tema persistido como clase del <body>
    pub fn apply_theme(&self) {
        let theme = self.session.theme();
        if let Some(body) = crate::dom::document().and_then(|d| d.body()) {
            body.set_class_name(&format!("theme-{}", theme));
        }
    }

    pub fn toggle_theme(&self) {
        let next = if self.session.theme() == "dark" { "light" } else { "dark" };
        self.session.set_theme(next);
        self.apply_theme();
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
