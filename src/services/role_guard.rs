// ============================================================================
// ROLE GUARD - Autorización por rol con redirect
// ============================================================================
// No verifica firma ni contenido del token: confía en la caché local hasta
// que el backend conteste 401. Lo único que sí valida localmente es la
// expiración estimada del registro de sesión.
// ============================================================================

use chrono::Utc;

use crate::models::{Profile, Role, SessionStatus};
use crate::services::session_service::SessionService;
use crate::utils::constants::{
    ADMIN_HOME_PATH, LOGIN_PATH, OPERATOR_HOME_PATH, USER_HOME_PATH,
};
use crate::utils::storage::navigate_to;

/// Home de cada rol
pub fn path_by_role(role: Role) -> &'static str {
    match role {
        Role::Admin => ADMIN_HOME_PATH,
        Role::Operator => OPERATOR_HOME_PATH,
        Role::User => USER_HOME_PATH,
    }
}

/// Decisión pura del guard, separada del efecto de navegación
#[derive(Clone, PartialEq, Debug)]
pub enum GuardOutcome {
    Allow(Profile),
    RedirectLogin,
    RedirectHome(Role),
}

pub fn guard(
    profile: Option<Profile>,
    has_token: bool,
    allowed: &[Role],
) -> GuardOutcome {
    let profile = match profile {
        Some(p) if has_token => p,
        _ => return GuardOutcome::RedirectLogin,
    };
    if !allowed.contains(&profile.role) {
        return GuardOutcome::RedirectHome(profile.role);
    }
    GuardOutcome::Allow(profile)
}

/// Autoriza la vista actual. `None` significa "ya se disparó una navegación,
/// NO sigas renderizando": el redirect del navegador es asíncrono y el
/// código del caller seguiría ejecutándose si no corta.
pub fn require_role(session: &SessionService, allowed: &[Role]) -> Option<Profile> {
    // Sesión expirada: se limpia y se trata como ausente
    if session.status(Utc::now()) == SessionStatus::Expired {
        log::info!("⏰ [GUARD] Sesión expirada, limpiando y redirigiendo a login");
        session.logout();
        navigate_to(LOGIN_PATH);
        return None;
    }

    let has_token = session.token().is_some();
    match guard(session.current_user(), has_token, allowed) {
        GuardOutcome::Allow(profile) => Some(profile),
        GuardOutcome::RedirectLogin => {
            log::info!("🔒 [GUARD] Sin sesión, redirigiendo a login");
            navigate_to(LOGIN_PATH);
            None
        }
        GuardOutcome::RedirectHome(role) => {
            log::info!("🔒 [GUARD] Rol {} fuera de la vista, redirigiendo a su home", role.as_str());
            navigate_to(path_by_role(role));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(role: Role) -> Profile {
        Profile {
            id: 1,
            email: "x@example.com".to_string(),
            role,
            name: None,
            is_active: None,
        }
    }

    #[test]
    fn sin_sesion_redirige_a_login() {
        assert_eq!(guard(None, false, &[Role::Admin]), GuardOutcome::RedirectLogin);
        // Perfil sin token tampoco alcanza
        assert_eq!(
            guard(Some(profile(Role::Admin)), false, &[Role::Admin]),
            GuardOutcome::RedirectLogin
        );
    }

    #[test]
    fn rol_equivocado_redirige_a_su_home() {
        let out = guard(Some(profile(Role::Admin)), true, &[Role::Operator]);
        assert_eq!(out, GuardOutcome::RedirectHome(Role::Admin));
        assert_eq!(path_by_role(Role::Admin), "/admin.html");
    }

    #[test]
    fn rol_correcto_devuelve_el_perfil_sin_tocar() {
        let p = profile(Role::User);
        match guard(Some(p.clone()), true, &[Role::User]) {
            GuardOutcome::Allow(got) => assert_eq!(got, p),
            other => panic!("se esperaba Allow, fue {:?}", other),
        }
    }

    #[test]
    fn paths_por_rol() {
        assert_eq!(path_by_role(Role::User), "/user.html");
        assert_eq!(path_by_role(Role::Operator), "/operator.html");
    }
}
