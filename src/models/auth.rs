use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Rol del usuario autenticado. Decide qué página es su "home".
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Operator,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Operator => "operator",
            Role::Admin => "admin",
        }
    }
}

/// Perfil cacheado en el login. Snapshot inmutable hasta el próximo login.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Profile {
    pub id: i64,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// Estado de la sesión respecto a su expiración
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SessionStatus {
    Valid,
    Expired,
    Absent,
}

/// Registro atómico de sesión: token + perfil viajan y se persisten JUNTOS.
/// Un registro válido siempre tiene ambos valores presentes.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct SessionRecord {
    pub token: String,
    pub user: Profile,
    /// Expiración estimada del token. `None` si no se pudo derivar.
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl SessionRecord {
    /// Clasifica el registro respecto al instante `now`
    pub fn status(&self, now: DateTime<Utc>) -> SessionStatus {
        match self.expires_at {
            Some(exp) if now >= exp => SessionStatus::Expired,
            _ => SessionStatus::Valid,
        }
    }
}

#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    pub remember_me: bool,
}

/// Respuesta del login. El backend puede devolver `access_token` o `token`.
#[derive(Clone, PartialEq, Debug, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<Profile>,
    #[serde(default)]
    pub detail: Option<String>,
}

impl LoginResponse {
    /// Token efectivo: primero `access_token`, si no `token`
    pub fn effective_token(&self) -> Option<&str> {
        self.access_token
            .as_deref()
            .or(self.token.as_deref())
    }
}

#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
}

#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct RegisterOperatorRequest {
    pub email: String,
    pub phone: String,
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[derive(Clone, PartialEq, Debug, Deserialize)]
pub struct CheckEmailResponse {
    pub exists: bool,
}

/// Solicitud de recuperación de contraseña pendiente (cola del admin).
/// El admin emite el link de reseteo desde su panel.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct RecoveryRequest {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub link_sent: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

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
    fn record_sin_expiracion_es_valido() {
        let rec = SessionRecord {
            token: "T1".to_string(),
            user: profile(),
            expires_at: None,
        };
        assert_eq!(rec.status(Utc::now()), SessionStatus::Valid);
    }

    #[test]
    fn record_expirado_se_detecta() {
        let now = Utc::now();
        let rec = SessionRecord {
            token: "T1".to_string(),
            user: profile(),
            expires_at: Some(now - Duration::minutes(1)),
        };
        assert_eq!(rec.status(now), SessionStatus::Expired);

        let rec = SessionRecord {
            expires_at: Some(now + Duration::minutes(1)),
            ..rec
        };
        assert_eq!(rec.status(now), SessionStatus::Valid);
    }

    #[test]
    fn login_response_tolera_ambas_claves_de_token() {
        let r: LoginResponse =
            serde_json::from_str(r#"{"access_token":"A","user":null}"#).unwrap();
        assert_eq!(r.effective_token(), Some("A"));

        let r: LoginResponse = serde_json::from_str(r#"{"token":"B"}"#).unwrap();
        assert_eq!(r.effective_token(), Some("B"));

        let r: LoginResponse = serde_json::from_str(r#"{"detail":"nope"}"#).unwrap();
        assert_eq!(r.effective_token(), None);
    }

    #[test]
    fn recovery_request_tolera_campos_ausentes() {
        let r: RecoveryRequest =
            serde_json::from_str(r#"{"id":3,"email":"user@example.com"}"#).unwrap();
        assert_eq!(r.id, 3);
        assert!(!r.link_sent);
        assert_eq!(r.created_at, None);

        let r: RecoveryRequest = serde_json::from_str(
            r#"{"id":4,"email":"x@example.com","created_at":"2026-08-01","link_sent":true}"#,
        )
        .unwrap();
        assert!(r.link_sent);
    }

    #[test]
    fn role_serializa_en_minusculas() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), r#""admin""#);
        let r: Role = serde_json::from_str(r#""operator""#).unwrap();
        assert_eq!(r, Role::Operator);
    }
}
