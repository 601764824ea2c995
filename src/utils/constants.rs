// Claves de localStorage y paths de las páginas

/// Registro atómico de sesión (token + perfil juntos)
pub const KEY_SESSION: &str = "desklite_session";
/// Preferencia de tema ("light" | "dark")
pub const KEY_THEME: &str = "desklite_theme";
/// Flag de "recordarme" del formulario de login
pub const KEY_REMEMBER_ME: &str = "desklite_remember_me";

pub const LOGIN_PATH: &str = "/login.html";
pub const USER_HOME_PATH: &str = "/user.html";
pub const OPERATOR_HOME_PATH: &str = "/operator.html";
pub const ADMIN_HOME_PATH: &str = "/admin.html";

/// TTL del token según el backend: 60 min normal, 30 días con remember_me
pub const TOKEN_TTL_MINUTES: i64 = 60;
pub const TOKEN_TTL_REMEMBER_MINUTES: i64 = 60 * 24 * 30;
