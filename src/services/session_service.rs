// ============================================================================
// SESSION SERVICE - Sesión local (token + perfil como UN registro atómico)
// ============================================================================
// El token y el perfil se persisten juntos bajo una sola clave: no existe
// la ventana de inconsistencia de guardarlos por separado. El servicio se
// inyecta explícitamente en cada vista/cliente, nada de estado global.
// ============================================================================

use std::rc::Rc;

use chrono::{DateTime, Utc};

use crate::models::{Profile, SessionRecord, SessionStatus};
use crate::utils::constants::{KEY_REMEMBER_ME, KEY_SESSION, KEY_THEME};

/// Acceso clave-valor al almacenamiento persistente. `BrowserStorage` es el
/// backend real; `MemoryStorage` sirve para tests.
pub trait SessionBackend {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&self, key: &str, value: &str) -> Result<(), String>;
    fn delete(&self, key: &str) -> Result<(), String>;
}

/// Backend sobre `window.localStorage`
pub struct BrowserStorage;

impl SessionBackend for BrowserStorage {
    fn read(&self, key: &str) -> Option<String> {
        crate::utils::storage::get_local_storage()?.get_item(key).ok()?
    }

    fn write(&self, key: &str, value: &str) -> Result<(), String> {
        let storage = crate::utils::storage::get_local_storage()
            .ok_or("No se pudo acceder a localStorage")?;
        storage
            .set_item(key, value)
            .map_err(|_| "Error guardando en localStorage".to_string())
    }

    fn delete(&self, key: &str) -> Result<(), String> {
        let storage = crate::utils::storage::get_local_storage()
            .ok_or("No se pudo acceder a localStorage")?;
        storage
            .remove_item(key)
            .map_err(|_| "Error eliminando de localStorage".to_string())
    }
}

/// Backend en memoria (tests y entornos sin navegador)
#[derive(Default)]
pub struct MemoryStorage {
    data: std::cell::RefCell<std::collections::HashMap<String, String>>,
}

impl SessionBackend for MemoryStorage {
    fn read(&self, key: &str) -> Option<String> {
        self.data.borrow().get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) -> Result<(), String> {
        self.data.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), String> {
        self.data.borrow_mut().remove(key);
        Ok(())
    }
}

#[derive(Clone)]
pub struct SessionService {
    backend: Rc<dyn SessionBackend>,
}

impl SessionService {
    pub fn new() -> Self {
        Self::with_backend(Rc::new(BrowserStorage))
    }

    pub fn with_backend(backend: Rc<dyn SessionBackend>) -> Self {
        Self { backend }
    }

    /// Registro completo. JSON corrupto o ausente → `None`, nunca panic.
    pub fn record(&self) -> Option<SessionRecord> {
        let raw = self.backend.read(KEY_SESSION)?;
        serde_json::from_str(&raw).ok()
    }

    pub fn token(&self) -> Option<String> {
        self.record().map(|r| r.token)
    }

    pub fn current_user(&self) -> Option<Profile> {
        self.record().map(|r| r.user)
    }

    /// Escritura atómica del login: token, perfil y expiración juntos
    pub fn store_login(&self, record: &SessionRecord) {
        match serde_json::to_string(record) {
            Ok(json) => {
                if let Err(e) = self.backend.write(KEY_SESSION, &json) {
                    log::error!("❌ [SESSION] Error guardando sesión: {}", e);
                }
            }
            Err(e) => log::error!("❌ [SESSION] Error serializando sesión: {}", e),
        }
    }

    /// Refresca el perfil cacheado sin tocar el token. Sin sesión es no-op.
    pub fn set_current_user(&self, user: Profile) {
        if let Some(mut rec) = self.record() {
            rec.user = user;
            self.store_login(&rec);
        }
    }

    /// Limpieza local incondicional. No llama al servidor.
    pub fn logout(&self) {
        if let Err(e) = self.backend.delete(KEY_SESSION) {
            log::error!("❌ [SESSION] Error limpiando sesión: {}", e);
        }
    }

    /// Estado de la sesión respecto a `now`: válida, expirada o ausente
    pub fn status(&self, now: DateTime<Utc>) -> SessionStatus {
        match self.record() {
            Some(rec) => rec.status(now),
            None => SessionStatus::Absent,
        }
    }

    // ---- Preferencias de UI (claves propias, fuera del registro de sesión)

    pub fn theme(&self) -> String {
        self.backend
            .read(KEY_THEME)
            .unwrap_or_else(|| "light".to_string())
    }

    pub fn set_theme(&self, theme: &str) {
        if let Err(e) = self.backend.write(KEY_THEME, theme) {
            log::warn!("⚠️ [SESSION] No se pudo guardar el tema: {}", e);
        }
    }

    pub fn remember_me(&self) -> bool {
        self.backend
            .read(KEY_REMEMBER_ME)
            .map(|v| v == "true")
            .unwrap_or(false)
    }

    pub fn set_remember_me(&self, remember: bool) {
        let v = if remember { "true" } else { "false" };
        if let Err(e) = self.backend.write(KEY_REMEMBER_ME, v) {
            log::warn!("⚠️ [SESSION] No se pudo guardar remember_me: {}", e);
        }
    }
}

impl Default for SessionService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use chrono::Duration;

    fn service() -> SessionService {
        SessionService::with_backend(Rc::new(MemoryStorage::default()))
    }

    fn profile() -> Profile {
        Profile {
            id: 7,
            email: "user@example.com".to_string(),
            role: Role::User,
            name: None,
            is_active: Some(true),
        }
    }

    #[test]
    fn json_corrupto_se_trata_como_ausente() {
        let backend = Rc::new(MemoryStorage::default());
        backend.write(KEY_SESSION, "{no es json").unwrap();
        let svc = SessionService::with_backend(backend);

        assert_eq!(svc.current_user(), None);
        assert_eq!(svc.token(), None);
        assert_eq!(svc.status(Utc::now()), SessionStatus::Absent);
    }

    #[test]
    fn login_guarda_token_y_perfil_juntos() {
        let svc = service();
        svc.store_login(&SessionRecord {
            token: "T1".to_string(),
            user: profile(),
            expires_at: None,
        });

        assert_eq!(svc.token().as_deref(), Some("T1"));
        assert_eq!(svc.current_user().unwrap().id, 7);
        assert_eq!(svc.status(Utc::now()), SessionStatus::Valid);
    }

    #[test]
    fn logout_limpia_token_y_perfil() {
        let svc = service();
        svc.store_login(&SessionRecord {
            token: "T1".to_string(),
            user: profile(),
            expires_at: None,
        });
        svc.logout();

        assert_eq!(svc.token(), None);
        assert_eq!(svc.current_user(), None);
    }

    #[test]
    fn sesion_expirada_se_reporta() {
        let svc = service();
        let now = Utc::now();
        svc.store_login(&SessionRecord {
            token: "T1".to_string(),
            user: profile(),
            expires_at: Some(now - Duration::minutes(5)),
        });

        assert_eq!(svc.status(now), SessionStatus::Expired);
    }

    #[test]
    fn preferencias_sobreviven_al_logout() {
        let svc = service();
        svc.set_theme("dark");
        svc.set_remember_me(true);
        svc.store_login(&SessionRecord {
            token: "T1".to_string(),
            user: profile(),
            expires_at: None,
        });
        svc.logout();

        assert_eq!(svc.theme(), "dark");
        assert!(svc.remember_me());
    }

    #[test]
    fn set_current_user_conserva_el_token() {
        let svc = service();
        svc.store_login(&SessionRecord {
            token: "T1".to_string(),
            user: profile(),
            expires_at: None,
        });

        let mut updated = profile();
        updated.name = Some("Alice".to_string());
        svc.set_current_user(updated);

        assert_eq!(svc.token().as_deref(), Some("T1"));
        assert_eq!(svc.current_user().unwrap().name.as_deref(), Some("Alice"));
    }
}
