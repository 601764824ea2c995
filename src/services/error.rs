use thiserror::Error;

/// Taxonomía de fallos del gateway:
/// - transporte (red caída, CORS, DNS)
/// - timeout del request
/// - 401 (manejado globalmente con logout + redirect, pero igual se propaga)
/// - 4xx/5xx con `detail` legible para mostrar en el formulario
/// - payload que no coincide con ninguna forma aceptada
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("Error de red: {0}")]
    Network(String),

    #[error("Timeout tras {0} ms")]
    Timeout(u32),

    #[error("Sesión expirada o inválida")]
    Unauthorized,

    #[error("HTTP {status}: {}", detail.as_deref().unwrap_or("sin detalle"))]
    Api {
        status: u16,
        detail: Option<String>,
    },

    #[error("Respuesta ilegible: {0}")]
    Decode(String),
}

impl ApiError {
    /// Mensaje para mostrar inline en un formulario
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Api {
                detail: Some(d), ..
            } => d.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_prefiere_el_detail_del_backend() {
        let e = ApiError::Api {
            status: 409,
            detail: Some("Користувач із такою поштою вже існує".to_string()),
        };
        assert_eq!(e.user_message(), "Користувач із такою поштою вже існує");

        let e = ApiError::Api {
            status: 500,
            detail: None,
        };
        assert!(e.user_message().contains("500"));
    }
}
