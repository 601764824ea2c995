use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub backend_url_development: String,
    pub backend_url_production: String,
    pub environment: String,
    pub enable_logging: bool,
    /// Timeout por defecto de cada request (ms)
    pub request_timeout_ms: u32,
    /// Timeout extendido para agregaciones pesadas (ms)
    pub long_request_timeout_ms: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url_development: "http://localhost:8000/api".to_string(),
            backend_url_production: "/api".to_string(),
            environment: "development".to_string(),
            enable_logging: true,
            request_timeout_ms: 100_000,
            long_request_timeout_ms: 45_000,
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        Self {
            backend_url_development: option_env!("BACKEND_URL_DEVELOPMENT")
                .unwrap_or("http://localhost:8000/api").to_string(),
            backend_url_production: option_env!("BACKEND_URL_PRODUCTION")
                .unwrap_or("/api").to_string(),
            environment: option_env!("ENVIRONMENT")
                .unwrap_or("development").to_string(),
            enable_logging: option_env!("ENABLE_LOGGING")
                .unwrap_or("true").parse().unwrap_or(true),
            request_timeout_ms: option_env!("REQUEST_TIMEOUT_MS")
                .unwrap_or("100000").parse().unwrap_or(100_000),
            long_request_timeout_ms: option_env!("LONG_REQUEST_TIMEOUT_MS")
                .unwrap_or("45000").parse().unwrap_or(45_000),
        }
    }

    /// Obtiene la URL del backend según el entorno actual
    pub fn backend_url(&self) -> &str {
        match self.environment.as_str() {
            "production" => &self.backend_url_production,
            _ => &self.backend_url_development,
        }
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_url_sigue_al_entorno() {
        let mut cfg = AppConfig::default();
        assert_eq!(cfg.backend_url(), "http://localhost:8000/api");

        cfg.environment = "production".to_string();
        assert_eq!(cfg.backend_url(), "/api");
    }
}
