// ============================================================================
// API CLIENT - Gateway HTTP tipado (stateless salvo la sesión inyectada)
// ============================================================================
// Un solo cliente para todos los endpoints REST:
// - adjunta el bearer token en cada request saliente si hay sesión
// - intercepta 401: limpia la sesión y fuerza navegación a login
// - timeout fijo por request (uno solo usa el timeout extendido)
// Sin retries ni refresh de token: cada fallo es terminal para ese intento.
// ============================================================================

use futures::future::{select, Either};
use gloo_net::http::{Request, RequestBuilder, Response};
use gloo_timers::future::TimeoutFuture;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::config::CONFIG;
use crate::models::{
    AdminStats, Answer, CheckEmailResponse, LoginRequest, LoginResponse, OperatorFeedback,
    OperatorProductivity, OperatorSignup, Paginated, Profile, Question, QuestionCreate,
    QuestionStatus, RawId, RecoveryRequest, RegisterOperatorRequest, RegisterRequest, Ticket,
    TicketCreate, TicketPatch, TicketStatus,
};
use crate::services::error::ApiError;
use crate::services::session_service::SessionService;
use crate::utils::constants::LOGIN_PATH;
use crate::utils::storage::navigate_to;

/// Extrae el `detail` legible de un cuerpo de error. FastAPI manda
/// `{"detail": "..."}`; cualquier otro texto no vacío se usa tal cual.
pub fn extract_detail(body: Option<String>) -> Option<String> {
    let body = body?;
    if let Ok(v) = serde_json::from_str::<Value>(&body) {
        if let Some(d) = v.get("detail").and_then(|d| d.as_str()) {
            return Some(d.to_string());
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Clasificación pura de una respuesta entrante. El 401 limpia la sesión
/// aquí mismo (la navegación queda en el caller, que sí tiene navegador);
/// cualquier otro no-2xx se vuelve `Api { status, detail }`.
fn classify_response(
    session: &SessionService,
    status: u16,
    ok: bool,
    body: Option<String>,
) -> Result<(), ApiError> {
    if status == 401 {
        session.logout();
        return Err(ApiError::Unauthorized);
    }
    if !ok {
        return Err(ApiError::Api {
            status,
            detail: extract_detail(body),
        });
    }
    Ok(())
}

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    session: SessionService,
}

impl ApiClient {
    pub fn new(session: SessionService) -> Self {
        Self {
            base_url: CONFIG.backend_url().to_string(),
            session,
        }
    }

    pub fn with_base_url(base_url: &str, session: SessionService) -> Self {
        Self {
            base_url: base_url.to_string(),
            session,
        }
    }

    pub fn session(&self) -> &SessionService {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Adjunta `Authorization: Bearer <token>` si hay sesión
    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(tok) => builder.header("Authorization", &format!("Bearer {}", tok)),
            None => builder,
        }
    }

    /// Envía el request con timeout. El transporte caído es `Network`,
    /// el timeout vencido es `Timeout`.
    async fn send_with_timeout(
        &self,
        request: Request,
        timeout_ms: u32,
    ) -> Result<Response, ApiError> {
        let fut = request.send();
        futures::pin_mut!(fut);
        let timeout = TimeoutFuture::new(timeout_ms);
        futures::pin_mut!(timeout);

        match select(fut, timeout).await {
            Either::Left((result, _)) => {
                result.map_err(|e| ApiError::Network(e.to_string()))
            }
            Either::Right(_) => Err(ApiError::Timeout(timeout_ms)),
        }
    }

    /// Interceptor de entrada: 401 → logout local + redirect a login, y el
    /// error original se propaga igual (fail-fast, nada se traga en silencio).
    async fn check(&self, response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        let ok = response.ok();
        let body = if ok || status == 401 {
            None
        } else {
            response.text().await.ok()
        };
        match classify_response(&self.session, status, ok, body) {
            Ok(()) => Ok(response),
            Err(ApiError::Unauthorized) => {
                log::warn!("🔒 [API] 401 recibido, redirigiendo a login");
                navigate_to(LOGIN_PATH);
                Err(ApiError::Unauthorized)
            }
            Err(e) => Err(e),
        }
    }

    async fn execute(&self, request: Request, timeout_ms: u32) -> Result<Response, ApiError> {
        let response = self.send_with_timeout(request, timeout_ms).await?;
        self.check(response).await
    }

    async fn get_raw(
        &self,
        path: &str,
        query: &[(&str, String)],
        timeout_ms: u32,
    ) -> Result<Response, ApiError> {
        let builder = Request::get(&self.url(path))
            .query(query.iter().map(|(k, v)| (*k, v.as_str())));
        let request = self
            .authorize(builder)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        self.execute(request, timeout_ms).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let response = self
            .get_raw(path, query, CONFIG.request_timeout_ms)
            .await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn send_json<B: Serialize>(
        &self,
        builder: RequestBuilder,
        body: &B,
    ) -> Result<Response, ApiError> {
        let request = self
            .authorize(builder)
            .json(body)
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        self.execute(request, CONFIG.request_timeout_ms).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.send_json(Request::post(&self.url(path)), body).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn patch_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .send_json(Request::patch(&self.url(path)), body)
            .await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let request = self
            .authorize(Request::delete(&self.url(path)))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        self.execute(request, CONFIG.request_timeout_ms).await?;
        Ok(())
    }

    // ========================================================================
    // Auth
    // ========================================================================

    /// ¿Existe el email? (pantalla de registro y recovery)
    pub async fn check_email(&self, email: &str) -> Result<bool, ApiError> {
        let r: CheckEmailResponse = self
            .get_json("/auth/check_email", &[("email", email.to_string())])
            .await?;
        Ok(r.exists)
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        log::info!("🔐 [API] Login de {}", request.username);
        self.post_json("/auth/login", request).await
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<LoginResponse, ApiError> {
        self.post_json("/auth/register", request).await
    }

    /// El alta de operador crea una solicitud pendiente, no una cuenta
    pub async fn register_operator(
        &self,
        request: &RegisterOperatorRequest,
    ) -> Result<(), ApiError> {
        let _: Value = self.post_json("/auth/register-operator", request).await?;
        Ok(())
    }

    pub async fn request_password_recovery(&self, email: &str) -> Result<(), ApiError> {
        let body = serde_json::json!({ "email": email });
        let _: Value = self
            .post_json("/auth/password-recovery-request", &body)
            .await?;
        Ok(())
    }

    pub async fn reset_password(&self, email: &str, password: &str) -> Result<(), ApiError> {
        let body = serde_json::json!({ "email": email, "password": password });
        let _: Value = self.post_json("/auth/reset-password", &body).await?;
        Ok(())
    }

    /// Cola de solicitudes de recuperación pendientes (panel de admin)
    pub async fn list_password_recovery_requests(
        &self,
    ) -> Result<Vec<RecoveryRequest>, ApiError> {
        self.get_json("/auth/password-recovery-requests", &[]).await
    }

    /// Emite el link de reseteo para una solicitud concreta
    pub async fn send_recovery_link(&self, id: i64) -> Result<(), ApiError> {
        let body = serde_json::json!({});
        let _: Value = self
            .post_json(
                &format!("/auth/password-recovery-requests/{}/send-link", id),
                &body,
            )
            .await?;
        Ok(())
    }

    // ========================================================================
    // Tickets
    // ========================================================================

    pub async fn list_tickets(
        &self,
        page: u32,
        limit: u32,
        author_id: Option<i64>,
    ) -> Result<Paginated<Ticket>, ApiError> {
        let mut query = vec![
            ("page", page.to_string()),
            ("limit", limit.to_string()),
        ];
        if let Some(author) = author_id {
            query.push(("author_id", author.to_string()));
        }
        let body: Value = self.get_json("/tickets", &query).await?;
        Paginated::from_value(body, page, limit)
    }

    pub async fn create_ticket(&self, payload: &TicketCreate) -> Result<Ticket, ApiError> {
        self.post_json("/tickets", payload).await
    }

    /// Borrado suave: PATCH a status=canceled
    pub async fn cancel_ticket(&self, id: &RawId) -> Result<Ticket, ApiError> {
        self.update_ticket_status(id, TicketStatus::Canceled).await
    }

    /// Borrado duro (DELETE real)
    pub async fn hard_delete_ticket(&self, id: &RawId) -> Result<(), ApiError> {
        let n = id.to_i64()?;
        self.delete(&format!("/tickets/{}", n)).await
    }

    pub async fn update_ticket_status(
        &self,
        id: &RawId,
        target: TicketStatus,
    ) -> Result<Ticket, ApiError> {
        let n = id.to_i64()?;
        let patch = TicketPatch {
            status: Some(target),
            ..Default::default()
        };
        self.patch_json(&format!("/tickets/{}", n), &patch).await
    }

    /// PATCH genérico (por ejemplo status + assignee_id en un solo request)
    pub async fn patch_ticket(
        &self,
        id: &RawId,
        patch: &TicketPatch,
    ) -> Result<Ticket, ApiError> {
        let n = id.to_i64()?;
        self.patch_json(&format!("/tickets/{}", n), patch).await
    }

    /// Atajo del operador: aprobar = status done
    pub async fn approve_ticket(&self, id: &RawId) -> Result<Ticket, ApiError> {
        self.update_ticket_status(id, TicketStatus::Done).await
    }

    /// Atajo del operador: escalar al admin = status triage
    pub async fn send_to_admin(&self, id: &RawId) -> Result<Ticket, ApiError> {
        self.update_ticket_status(id, TicketStatus::Triage).await
    }

    /// Tickets de un usuario concreto (panel de admin)
    pub async fn list_user_tickets(
        &self,
        user_id: i64,
        limit: u32,
    ) -> Result<Paginated<Ticket>, ApiError> {
        self.list_tickets(1, limit, Some(user_id)).await
    }

    // ========================================================================
    // Admin
    // ========================================================================

    pub async fn admin_stats(&self) -> Result<AdminStats, ApiError> {
        self.get_json("/admin/stats", &[]).await
    }

    pub async fn list_users(&self, page: u32, limit: u32) -> Result<Paginated<Profile>, ApiError> {
        let query = [("page", page.to_string()), ("limit", limit.to_string())];
        let body: Value = self.get_json("/admin/users", &query).await?;
        Paginated::from_value(body, page, limit)
    }

    pub async fn delete_user(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/admin/users/{}", id)).await
    }

    pub async fn list_operator_signups(&self) -> Result<Vec<OperatorSignup>, ApiError> {
        self.get_json("/admin/operator-signups", &[]).await
    }

    pub async fn approve_operator_signup(&self, id: i64) -> Result<(), ApiError> {
        let body = serde_json::json!({});
        let _: Value = self
            .post_json(&format!("/admin/operator-signups/{}/approve", id), &body)
            .await?;
        Ok(())
    }

    /// Agregación pesada en el backend: este endpoint usa el timeout largo
    pub async fn operator_productivity(
        &self,
        days: u32,
    ) -> Result<Vec<OperatorProductivity>, ApiError> {
        let query = [("days", days.to_string())];
        let response = self
            .get_raw(
                "/admin/operator-productivity",
                &query,
                CONFIG.long_request_timeout_ms,
            )
            .await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub async fn send_operator_feedback(
        &self,
        operator_id: i64,
        message: &str,
    ) -> Result<OperatorFeedback, ApiError> {
        let body = serde_json::json!({
            "operator_id": operator_id,
            "message": message,
        });
        self.post_json("/admin/operator-feedback", &body).await
    }

    /// Feedback dirigido al operador autenticado (endpoint propio, no /admin)
    pub async fn list_my_feedback(&self) -> Result<Vec<OperatorFeedback>, ApiError> {
        self.get_json("/operator/feedback", &[]).await
    }

    // ========================================================================
    // Q&A
    // ========================================================================

    pub async fn create_question(&self, payload: &QuestionCreate) -> Result<Question, ApiError> {
        self.post_json("/questions", payload).await
    }

    pub async fn list_questions(
        &self,
        status: Option<QuestionStatus>,
        author_id: Option<i64>,
        limit: Option<u32>,
    ) -> Result<Vec<Question>, ApiError> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(s) = status {
            query.push(("status", s.as_str().to_string()));
        }
        if let Some(a) = author_id {
            query.push(("author_id", a.to_string()));
        }
        if let Some(l) = limit {
            query.push(("limit", l.to_string()));
        }
        self.get_json("/questions", &query).await
    }

    pub async fn list_answers(&self, question_id: i64) -> Result<Vec<Answer>, ApiError> {
        self.get_json(&format!("/questions/{}/answers", question_id), &[])
            .await
    }

    pub async fn answer_question(
        &self,
        question_id: i64,
        content: &str,
    ) -> Result<Answer, ApiError> {
        let body = serde_json::json!({ "content": content });
        self.post_json(&format!("/questions/{}/answer", question_id), &body)
            .await
    }

    pub async fn close_question(&self, question_id: i64) -> Result<Question, ApiError> {
        let body = serde_json::json!({});
        self.patch_json(&format!("/questions/{}/close", question_id), &body)
            .await
    }

    // ========================================================================
    // Health
    // ========================================================================

    /// El fallo de transporte es un VALOR ("down"), no un error: alimenta el
    /// indicador del header, no un formulario.
    pub async fn health(&self) -> String {
        match self.get_raw("/health", &[], CONFIG.request_timeout_ms).await {
            Ok(response) => match response.json::<Value>().await {
                Ok(Value::String(s)) => s,
                Ok(v) => v
                    .get("status")
                    .and_then(|s| s.as_str())
                    .unwrap_or("ok")
                    .to_string(),
                Err(_) => "ok".to_string(),
            },
            Err(_) => "down".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Profile, Role, SessionRecord};
    use crate::services::session_service::MemoryStorage;
    use std::rc::Rc;

    fn session_con_login() -> SessionService {
        let svc = SessionService::with_backend(Rc::new(MemoryStorage::default()));
        svc.store_login(&SessionRecord {
            token: "T1".to_string(),
            user: Profile {
                id: 7,
                email: "user@example.com".to_string(),
                role: Role::User,
                name: None,
                is_active: None,
            },
            expires_at: None,
        });
        svc
    }

    #[test]
    fn un_401_limpia_token_y_perfil_y_propaga_unauthorized() {
        let svc = session_con_login();

        let err = classify_response(&svc, 401, false, None).unwrap_err();
        assert_eq!(err, ApiError::Unauthorized);
        assert_eq!(svc.token(), None);
        assert_eq!(svc.current_user(), None);
    }

    #[test]
    fn un_error_http_conserva_la_sesion_y_el_detail() {
        let svc = session_con_login();

        let err = classify_response(
            &svc,
            409,
            false,
            Some(r#"{"detail":"Користувач із такою поштою вже існує"}"#.to_string()),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ApiError::Api {
                status: 409,
                detail: Some("Користувач із такою поштою вже існує".to_string()),
            }
        );
        // La sesión sigue intacta: solo el 401 la toca
        assert_eq!(svc.token().as_deref(), Some("T1"));
    }

    #[test]
    fn una_respuesta_ok_no_toca_nada() {
        let svc = session_con_login();

        assert!(classify_response(&svc, 200, true, None).is_ok());
        assert_eq!(svc.token().as_deref(), Some("T1"));
        assert_eq!(svc.current_user().unwrap().id, 7);
    }

    #[test]
    fn extract_detail_lee_el_detail_de_fastapi() {
        let d = extract_detail(Some(r#"{"detail":"Невірний пароль"}"#.to_string()));
        assert_eq!(d.as_deref(), Some("Невірний пароль"));
    }

    #[test]
    fn extract_detail_acepta_texto_plano() {
        assert_eq!(
            extract_detail(Some("gateway exploded".to_string())).as_deref(),
            Some("gateway exploded")
        );
        assert_eq!(extract_detail(Some("   ".to_string())), None);
        assert_eq!(extract_detail(None), None);
    }

    #[test]
    fn extract_detail_ignora_json_sin_detail() {
        // JSON válido sin clave detail: se conserva el cuerpo crudo
        let d = extract_detail(Some(r#"{"error":"boom"}"#.to_string()));
        assert_eq!(d.as_deref(), Some(r#"{"error":"boom"}"#));
    }
}
