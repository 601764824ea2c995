use serde::{Deserialize, Serialize};

use crate::models::page::RawId;

/// Ciclo de vida del ticket. Las transiciones las valida el backend;
/// el cliente solo las transporta.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    New,
    Triage,
    InProgress,
    Blocked,
    Done,
    Canceled,
    Archived,
}

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::New => "new",
            TicketStatus::Triage => "triage",
            TicketStatus::InProgress => "in_progress",
            TicketStatus::Blocked => "blocked",
            TicketStatus::Done => "done",
            TicketStatus::Canceled => "canceled",
            TicketStatus::Archived => "archived",
        }
    }
}

/// Departamento destino de la solicitud
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dept {
    Dev,
    Impl,
    Info,
    Mgmt,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Ticket {
    pub id: RawId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub deadline: Option<String>,
    pub status: TicketStatus,
    #[serde(default)]
    pub assignee_id: Option<RawId>,
    #[serde(default)]
    pub dept: Option<Dept>,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub work_email: Option<String>,
    #[serde(default)]
    pub backup_email: Option<String>,
}

#[derive(Clone, PartialEq, Debug, Default, Serialize)]
pub struct TicketCreate {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dept: Option<Dept>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_email: Option<String>,
}

/// PATCH parcial de un ticket (por ejemplo status + assignee_id juntos)
#[derive(Clone, PartialEq, Debug, Default, Serialize)]
pub struct TicketPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TicketStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializa_en_snake_case() {
        assert_eq!(
            serde_json::to_string(&TicketStatus::InProgress).unwrap(),
            r#""in_progress""#
        );
        let s: TicketStatus = serde_json::from_str(r#""canceled""#).unwrap();
        assert_eq!(s, TicketStatus::Canceled);
    }

    #[test]
    fn ticket_tolera_id_numerico_o_string() {
        let t: Ticket = serde_json::from_str(
            r#"{"id": 3, "title": "a", "status": "new"}"#,
        )
        .unwrap();
        assert_eq!(t.id.to_i64().unwrap(), 3);

        let t: Ticket = serde_json::from_str(
            r#"{"id": "42", "title": "b", "status": "triage", "dept": "impl"}"#,
        )
        .unwrap();
        assert_eq!(t.id.to_i64().unwrap(), 42);
        assert_eq!(t.dept, Some(Dept::Impl));
    }

    #[test]
    fn patch_omite_campos_ausentes() {
        let p = TicketPatch {
            status: Some(TicketStatus::Done),
            ..Default::default()
        };
        assert_eq!(serde_json::to_string(&p).unwrap(), r#"{"status":"done"}"#);
    }
}
