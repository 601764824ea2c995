use web_sys::{window, Storage};

pub fn get_local_storage() -> Option<Storage> {
    window()?.local_storage().ok()?
}

/// Redirige el navegador a otra página (login, home del rol, etc.)
pub fn navigate_to(path: &str) {
    if let Some(win) = window() {
        if let Err(e) = win.location().set_href(path) {
            log::error!("❌ Error navegando a {}: {:?}", path, e);
        }
    }
}

/// Path actual del documento ("/login.html", "/user.html", ...)
pub fn current_path() -> String {
    window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}
