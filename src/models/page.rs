// ============================================================================
// PAGINACIÓN - Envelope normalizado de los endpoints de lista
// ============================================================================
// El backend no es consistente: una lista puede llegar como {items:[...]},
// {tickets:[...]}, {results:[...]}, {users:[...]} o como array pelado.
// Aquí la tolerancia es un paso de parseo EXPLÍCITO: o el payload coincide
// con una de esas formas declaradas, o es un error de decodificación.
// ============================================================================

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::services::error::ApiError;

/// Identificador que el backend manda a veces como número y a veces como
/// string numérico. Se normaliza a i64 antes de construir cualquier path.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Num(i64),
    Text(String),
}

impl RawId {
    pub fn to_i64(&self) -> Result<i64, ApiError> {
        match self {
            RawId::Num(n) => Ok(*n),
            RawId::Text(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| ApiError::Decode(format!("id no numérico: {:?}", s))),
        }
    }
}

impl From<i64> for RawId {
    fn from(n: i64) -> Self {
        RawId::Num(n)
    }
}

impl std::fmt::Display for RawId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RawId::Num(n) => write!(f, "{}", n),
            RawId::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Resultado tipado de cualquier endpoint de lista
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub items: Vec<T>,
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(default)]
    page: Option<u32>,
    #[serde(default)]
    limit: Option<u32>,
    #[serde(default)]
    total: Option<u64>,
    #[serde(default)]
    items: Option<Value>,
    #[serde(default)]
    tickets: Option<Value>,
    #[serde(default)]
    results: Option<Value>,
    #[serde(default)]
    users: Option<Value>,
}

impl<T: DeserializeOwned> Paginated<T> {
    /// Normaliza las formas de envelope aceptadas a un `Paginated<T>`.
    /// `page`/`limit` del request rellenan lo que el backend no devuelva.
    pub fn from_value(body: Value, page: u32, limit: u32) -> Result<Self, ApiError> {
        // Array pelado: sin metadata de paginación
        if body.is_array() {
            let items: Vec<T> = serde_json::from_value(body)
                .map_err(|e| ApiError::Decode(e.to_string()))?;
            return Ok(Self {
                page,
                limit,
                total: items.len() as u64,
                items,
            });
        }

        let env: Envelope = serde_json::from_value(body)
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        let raw = env
            .items
            .or(env.tickets)
            .or(env.results)
            .or(env.users)
            .ok_or_else(|| {
                ApiError::Decode(
                    "respuesta de lista sin clave reconocida (items/tickets/results/users)"
                        .to_string(),
                )
            })?;

        let items: Vec<T> = serde_json::from_value(raw)
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        Ok(Self {
            page: env.page.unwrap_or(page),
            limit: env.limit.unwrap_or(limit),
            total: env.total.unwrap_or(items.len() as u64),
            items,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, PartialEq, Deserialize)]
    struct Row {
        id: i64,
    }

    #[test]
    fn normaliza_envelope_items() {
        let v = json!({"page": 2, "limit": 10, "total": 31, "items": [{"id": 1}]});
        let p: Paginated<Row> = Paginated::from_value(v, 1, 50).unwrap();
        assert_eq!(p.page, 2);
        assert_eq!(p.limit, 10);
        assert_eq!(p.total, 31);
        assert_eq!(p.items, vec![Row { id: 1 }]);
    }

    #[test]
    fn normaliza_envelope_tickets_y_results() {
        let v = json!({"tickets": [{"id": 1}, {"id": 2}]});
        let p: Paginated<Row> = Paginated::from_value(v, 1, 10).unwrap();
        assert_eq!(p.items.len(), 2);
        assert_eq!(p.total, 2);
        assert_eq!(p.page, 1);

        let v = json!({"results": [{"id": 9}]});
        let p: Paginated<Row> = Paginated::from_value(v, 3, 10).unwrap();
        assert_eq!(p.items, vec![Row { id: 9 }]);
        assert_eq!(p.page, 3);
    }

    #[test]
    fn normaliza_array_pelado() {
        let v = json!([{"id": 5}]);
        let p: Paginated<Row> = Paginated::from_value(v, 1, 10).unwrap();
        assert_eq!(p.items, vec![Row { id: 5 }]);
        assert_eq!(p.limit, 10);
    }

    #[test]
    fn forma_desconocida_es_error_explicito() {
        let v = json!({"data": [{"id": 1}]});
        let err = Paginated::<Row>::from_value(v, 1, 10).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn raw_id_se_normaliza_a_numero() {
        assert_eq!(RawId::Num(4).to_i64().unwrap(), 4);
        assert_eq!(RawId::Text("17".to_string()).to_i64().unwrap(), 17);
        assert!(RawId::Text("abc".to_string()).to_i64().is_err());
    }
}
