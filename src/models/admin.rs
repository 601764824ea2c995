use serde::{Deserialize, Serialize};

// DTOs del panel de administración. Son comportamiento opaco del servidor:
// el cliente solo los muestra.

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct AdminUserStat {
    pub email: String,
    pub tickets_created: u64,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct AdminOperatorStat {
    pub email: String,
    pub in_progress: u64,
    pub done: u64,
    pub canceled: u64,
    #[serde(default)]
    pub avg_resolution_minutes: Option<f64>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct AdminQaStat {
    pub question_id: i64,
    pub title: String,
    pub user_email: String,
    pub answers: u64,
    #[serde(default)]
    pub last_answer_at: Option<String>,
}

#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct AdminStats {
    #[serde(default)]
    pub users: Vec<AdminUserStat>,
    #[serde(default)]
    pub operators: Vec<AdminOperatorStat>,
    #[serde(default)]
    pub qa: Vec<AdminQaStat>,
}

/// Solicitud pendiente de alta de operador
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct OperatorSignup {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct OperatorSeriesPoint {
    pub date: String,
    pub count: u64,
    #[serde(default)]
    pub avg_minutes: Option<f64>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct OperatorProductivity {
    pub operator_id: i64,
    pub email: String,
    pub series: Vec<OperatorSeriesPoint>,
}

/// Feedback del admin hacia un operador
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct OperatorFeedback {
    pub id: i64,
    pub operator_id: i64,
    #[serde(default)]
    pub operator_email: Option<String>,
    #[serde(default)]
    pub author_id: Option<i64>,
    #[serde(default)]
    pub author_email: Option<String>,
    pub message: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub is_read: bool,
}
