// ============================================================================
// AUTH SERVICE - Login, registro y recuperación de contraseña
// ============================================================================

use chrono::{DateTime, Duration, Utc};

use crate::models::{
    LoginRequest, LoginResponse, Profile, RegisterOperatorRequest, RegisterRequest,
    SessionRecord,
};
use crate::services::api_client::ApiClient;
use crate::services::error::ApiError;
use crate::services::session_service::SessionService;
use crate::utils::constants::{TOKEN_TTL_MINUTES, TOKEN_TTL_REMEMBER_MINUTES};

/// Expiración estimada del token. El backend no manda `expires_in`, pero sus
/// TTL están documentados: 60 min, o 30 días con remember_me.
pub fn token_expiry(now: DateTime<Utc>, remember_me: bool) -> DateTime<Utc> {
    let minutes = if remember_me {
        TOKEN_TTL_REMEMBER_MINUTES
    } else {
        TOKEN_TTL_MINUTES
    };
    now + Duration::minutes(minutes)
}

/// Valida la respuesta del login y persiste el registro de sesión ATÓMICO
/// (token + perfil + expiración en una sola escritura).
pub fn store_session_from_response(
    session: &SessionService,
    response: &LoginResponse,
    remember_me: bool,
    now: DateTime<Utc>,
) -> Result<Profile, ApiError> {
    let token = response.effective_token().ok_or_else(|| {
        ApiError::Decode(
            response
                .detail
                .clone()
                .unwrap_or_else(|| "respuesta de login sin token".to_string()),
        )
    })?;
    let user = response.user.clone().ok_or_else(|| {
        ApiError::Decode("respuesta de login sin perfil de usuario".to_string())
    })?;

    session.store_login(&SessionRecord {
        token: token.to_string(),
        user: user.clone(),
        expires_at: Some(token_expiry(now, remember_me)),
    });
    session.set_remember_me(remember_me);

    Ok(user)
}

/// Login completo: request, validación de la respuesta y persistencia.
/// Devuelve el perfil; el caller decide la navegación (`path_by_role`).
pub async fn login(
    api: &ApiClient,
    username: &str,
    password: &str,
    remember_me: bool,
) -> Result<Profile, ApiError> {
    let request = LoginRequest {
        username: username.to_string(),
        password: password.to_string(),
        remember_me,
    };
    let response = api.login(&request).await?;
    let profile = store_session_from_response(api.session(), &response, remember_me, Utc::now())?;
    log::info!(
        "✅ [AUTH] Sesión iniciada: {} (rol {})",
        profile.email,
        profile.role.as_str()
    );
    Ok(profile)
}

/// Registro de usuario final. El backend devuelve token + perfil, así que
/// el alta deja la sesión iniciada directamente.
pub async fn register(
    api: &ApiClient,
    request: &RegisterRequest,
) -> Result<Profile, ApiError> {
    let response = api.register(request).await?;
    store_session_from_response(api.session(), &response, false, Utc::now())
}

/// Alta de operador: solo crea la solicitud, no inicia sesión
pub async fn register_operator(
    api: &ApiClient,
    request: &RegisterOperatorRequest,
) -> Result<(), ApiError> {
    api.register_operator(request).await?;
    log::info!("📨 [AUTH] Solicitud de operador enviada: {}", request.email);
    Ok(())
}

pub async fn request_password_recovery(api: &ApiClient, email: &str) -> Result<(), ApiError> {
    api.request_password_recovery(email).await
}

pub async fn reset_password(
    api: &ApiClient,
    email: &str,
    password: &str,
) -> Result<(), ApiError> {
    api.reset_password(email, password).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use crate::services::role_guard::path_by_role;
    use crate::services::session_service::MemoryStorage;
    use std::rc::Rc;

    fn session() -> SessionService {
        SessionService::with_backend(Rc::new(MemoryStorage::default()))
    }

    #[test]
    fn login_con_remember_me_guarda_sesion_y_apunta_al_home_del_rol() {
        // Escenario: user@example.com / secret con remember_me=true,
        // backend responde {access_token:"T1", user:{id:7, role:"user"}}
        let svc = session();
        let response: LoginResponse = serde_json::from_str(
            r#"{"access_token":"T1","user":{"id":7,"email":"user@example.com","role":"user"}}"#,
        )
        .unwrap();

        let now = Utc::now();
        let profile = store_session_from_response(&svc, &response, true, now).unwrap();

        assert_eq!(svc.token().as_deref(), Some("T1"));
        assert_eq!(svc.current_user().unwrap().id, 7);
        assert!(svc.remember_me());
        assert_eq!(path_by_role(profile.role), "/user.html");

        // TTL extendido de 30 días
        let rec = svc.record().unwrap();
        assert_eq!(rec.expires_at, Some(now + Duration::minutes(60 * 24 * 30)));
    }

    #[test]
    fn respuesta_sin_token_no_toca_la_sesion() {
        let svc = session();
        let response: LoginResponse =
            serde_json::from_str(r#"{"detail":"Невірний пароль"}"#).unwrap();

        let err = store_session_from_response(&svc, &response, false, Utc::now()).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
        assert_eq!(svc.token(), None);
        assert_eq!(svc.current_user(), None);
    }

    #[test]
    fn expiracion_normal_es_de_una_hora() {
        let now = Utc::now();
        assert_eq!(token_expiry(now, false), now + Duration::minutes(60));
    }

    #[test]
    fn el_token_acepta_la_clave_alternativa() {
        let svc = session();
        let response: LoginResponse = serde_json::from_str(
            r#"{"token":"T2","user":{"id":1,"email":"op@example.com","role":"operator"}}"#,
        )
        .unwrap();
        let profile = store_session_from_response(&svc, &response, false, Utc::now()).unwrap();
        assert_eq!(svc.token().as_deref(), Some("T2"));
        assert_eq!(profile.role, Role::Operator);
    }
}
