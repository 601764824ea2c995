use serde::{Deserialize, Serialize};

/// Estado de una pregunta: new → answered → closed (lo hace cumplir el backend)
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionStatus {
    New,
    Answered,
    Closed,
}

impl QuestionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionStatus::New => "new",
            QuestionStatus::Answered => "answered",
            QuestionStatus::Closed => "closed",
        }
    }
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    pub author_id: i64,
    pub title: String,
    pub content: String,
    pub status: QuestionStatus,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Una respuesta referencia exactamente una pregunta; el operador es opcional
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Answer {
    pub id: i64,
    pub question_id: i64,
    #[serde(default)]
    pub operator_id: Option<i64>,
    pub content: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct QuestionCreate {
    pub title: String,
    pub content: String,
}
