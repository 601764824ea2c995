// ============================================================================
// OPERATOR VIEW - Cola de tickets, preguntas abiertas y feedback recibido
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{
    append_child, clear_children, create_element, get_element_by_id, header_row, on_change,
    on_click, select_value, set_attribute, set_text_content, td, textarea_value, ElementBuilder,
};
use crate::models::{Profile, Question, RawId, Ticket, TicketPatch, TicketStatus};
use crate::state::AppState;
use crate::views::shared::render_header;

const PAGE_SIZE: u32 = 20;

const STATUS_OPTIONS: [TicketStatus; 7] = [
    TicketStatus::New,
    TicketStatus::Triage,
    TicketStatus::InProgress,
    TicketStatus::Blocked,
    TicketStatus::Done,
    TicketStatus::Canceled,
    TicketStatus::Archived,
];

fn parse_status(value: &str) -> Option<TicketStatus> {
    STATUS_OPTIONS.iter().copied().find(|s| s.as_str() == value)
}

pub fn render_operator(state: &AppState, profile: &Profile) -> Result<Element, JsValue> {
    log::info!("🎬 [OPERATOR] Renderizando cola de trabajo");

    let root = ElementBuilder::new("div")?.class("operator-screen").build();
    append_child(&root, &render_header(state, profile, "Cola de tickets")?)?;

    let tickets_section = ElementBuilder::new("section")?.class("tickets-section").build();
    let tickets_heading = ElementBuilder::new("h2")?.text("Tickets").build();
    append_child(&tickets_section, &tickets_heading)?;
    let tickets_box = ElementBuilder::new("div")?.id("operator-tickets")?.build();
    append_child(&tickets_section, &tickets_box)?;
    append_child(&root, &tickets_section)?;

    let questions_section = ElementBuilder::new("section")?.class("questions-section").build();
    let questions_heading = ElementBuilder::new("h2")?.text("Preguntas abiertas").build();
    append_child(&questions_section, &questions_heading)?;
    let questions_box = ElementBuilder::new("div")?.id("operator-questions")?.build();
    append_child(&questions_section, &questions_box)?;
    append_child(&root, &questions_section)?;

    let feedback_section = ElementBuilder::new("section")?.class("feedback-section").build();
    let feedback_heading = ElementBuilder::new("h2")?.text("Feedback recibido").build();
    append_child(&feedback_section, &feedback_heading)?;
    let feedback_box = ElementBuilder::new("div")?.id("operator-feedback")?.build();
    append_child(&feedback_section, &feedback_box)?;
    append_child(&root, &feedback_section)?;

    load_tickets(state.clone(), profile.id, 1);
    load_questions(state.clone());
    load_feedback(state.clone());

    Ok(root)
}

// ============================================================================
// Tickets
// ============================================================================

fn load_tickets(state: AppState, operator_id: i64, page: u32) {
    spawn_local(async move {
        let Some(container) = get_element_by_id("operator-tickets") else {
            return;
        };
        match state.api.list_tickets(page, PAGE_SIZE, None).await {
            Ok(result) => {
                clear_children(&container);
                match ticket_table(&state, operator_id, page, &result.items) {
                    Ok(table) => {
                        let _ = append_child(&container, &table);
                    }
                    Err(e) => log::error!("❌ [OPERATOR] Armando tabla: {:?}", e),
                }
                if let Ok(pager) = pager(&state, operator_id, page, result.total, PAGE_SIZE) {
                    let _ = append_child(&container, &pager);
                }
            }
            Err(e) => {
                log::error!("❌ [OPERATOR] Cargando tickets: {}", e);
                set_text_content(&container, &e.user_message());
            }
        }
    });
}

fn pager(
    state: &AppState,
    operator_id: i64,
    page: u32,
    total: u64,
    limit: u32,
) -> Result<Element, JsValue> {
    let wrap = ElementBuilder::new("div")?.class("pager").build();
    let pages = ((total as u32).saturating_add(limit - 1) / limit).max(1);

    let prev = ElementBuilder::new("button")?.class("btn-pager").text("←").build();
    if page <= 1 {
        set_attribute(&prev, "disabled", "disabled")?;
    } else {
        let state = state.clone();
        on_click(&prev, move |_| load_tickets(state.clone(), operator_id, page - 1))?;
    }

    let label = ElementBuilder::new("span")?
        .text(&format!("Página {} de {}", page, pages))
        .build();

    let next = ElementBuilder::new("button")?.class("btn-pager").text("→").build();
    if page >= pages {
        set_attribute(&next, "disabled", "disabled")?;
    } else {
        let state = state.clone();
        on_click(&next, move |_| load_tickets(state.clone(), operator_id, page + 1))?;
    }

    append_child(&wrap, &prev)?;
    append_child(&wrap, &label)?;
    append_child(&wrap, &next)?;
    Ok(wrap)
}

fn status_select(ticket: &Ticket) -> Result<Element, JsValue> {
    let select = create_element("select")?;
    set_attribute(&select, "id", &format!("status-{}", ticket.id))?;
    for status in STATUS_OPTIONS {
        let opt = ElementBuilder::new("option")?
            .attr("value", status.as_str())?
            .text(status.as_str())
            .build();
        if status == ticket.status {
            set_attribute(&opt, "selected", "selected")?;
        }
        append_child(&select, &opt)?;
    }
    Ok(select)
}

fn ticket_table(
    state: &AppState,
    operator_id: i64,
    page: u32,
    tickets: &[Ticket],
) -> Result<Element, JsValue> {
    let table = ElementBuilder::new("table")?.class("tickets-table").build();
    append_child(
        &table,
        &header_row(&["Título", "Descripción", "Fecha límite", "Estado", "Acciones"])?,
    )?;

    if tickets.is_empty() {
        let row = ElementBuilder::new("tr")?.build();
        let cell = td("La cola está vacía")?;
        set_attribute(&cell, "colspan", "5")?;
        append_child(&row, &cell)?;
        append_child(&table, &row)?;
        return Ok(table);
    }

    for ticket in tickets {
        let row = ElementBuilder::new("tr")?.build();
        append_child(&row, &td(&ticket.title)?)?;
        append_child(&row, &td(ticket.description.as_deref().unwrap_or("-"))?)?;
        append_child(&row, &td(ticket.deadline.as_deref().unwrap_or("-"))?)?;

        // Select de estado: el cambio dispara un solo PATCH que también
        // asigna el ticket al operador que lo tomó
        let status_cell = ElementBuilder::new("td")?.build();
        let select = status_select(ticket)?;
        let select_id = format!("status-{}", ticket.id);
        {
            let state = state.clone();
            let id = ticket.id.clone();
            let select_id = select_id.clone();
            on_change(&select, move |_| {
                let Some(target) = parse_status(&select_value(&select_id)) else {
                    return;
                };
                let state = state.clone();
                let id = id.clone();
                spawn_local(async move {
                    let patch = TicketPatch {
                        status: Some(target),
                        assignee_id: Some(operator_id),
                        ..Default::default()
                    };
                    match state.api.patch_ticket(&id, &patch).await {
                        Ok(_) => log::info!("✅ [OPERATOR] Ticket → {}", target.as_str()),
                        Err(e) => log::error!("❌ [OPERATOR] Cambiando estado: {}", e),
                    }
                    // Éxito o error, la tabla se vuelve a pedir al backend
                    load_tickets(state, operator_id, page);
                });
            })?;
        }
        append_child(&status_cell, &select)?;
        append_child(&row, &status_cell)?;

        let actions = ElementBuilder::new("td")?.class("row-actions").build();

        let approve_btn = ElementBuilder::new("button")?
            .class("btn-approve")
            .text("Aprobar")
            .build();
        {
            let state = state.clone();
            let id = ticket.id.clone();
            on_click(&approve_btn, move |_| {
                run_ticket_action(state.clone(), operator_id, page, id.clone(), Action::Approve);
            })?;
        }
        append_child(&actions, &approve_btn)?;

        let escalate_btn = ElementBuilder::new("button")?
            .class("btn-escalate")
            .text("Al admin")
            .build();
        {
            let state = state.clone();
            let id = ticket.id.clone();
            on_click(&escalate_btn, move |_| {
                run_ticket_action(state.clone(), operator_id, page, id.clone(), Action::Escalate);
            })?;
        }
        append_child(&actions, &escalate_btn)?;

        let delete_btn = ElementBuilder::new("button")?
            .class("btn-delete")
            .text("Eliminar")
            .build();
        {
            let state = state.clone();
            let id = ticket.id.clone();
            on_click(&delete_btn, move |_| {
                run_ticket_action(state.clone(), operator_id, page, id.clone(), Action::Delete);
            })?;
        }
        append_child(&actions, &delete_btn)?;

        append_child(&row, &actions)?;
        append_child(&table, &row)?;
    }

    Ok(table)
}

enum Action {
    Approve,
    Escalate,
    Delete,
}

fn run_ticket_action(state: AppState, operator_id: i64, page: u32, id: RawId, action: Action) {
    spawn_local(async move {
        let result = match action {
            Action::Approve => state.api.approve_ticket(&id).await.map(|_| ()),
            Action::Escalate => state.api.send_to_admin(&id).await.map(|_| ()),
            Action::Delete => state.api.hard_delete_ticket(&id).await,
        };
        match result {
            Ok(()) => load_tickets(state, operator_id, page),
            Err(e) => log::error!("❌ [OPERATOR] Acción sobre ticket: {}", e),
        }
    });
}

// ============================================================================
// Preguntas
// ============================================================================

fn load_questions(state: AppState) {
    spawn_local(async move {
        let Some(container) = get_element_by_id("operator-questions") else {
            return;
        };
        // El operador trabaja lo pendiente: new y answered (cerradas no)
        match state.api.list_questions(None, None, None).await {
            Ok(questions) => {
                clear_children(&container);
                let open: Vec<&Question> = questions
                    .iter()
                    .filter(|q| q.status != crate::models::QuestionStatus::Closed)
                    .collect();
                if open.is_empty() {
                    set_text_content(&container, "No hay preguntas pendientes");
                    return;
                }
                for question in open {
                    if let Ok(card) = question_card(&state, question) {
                        let _ = append_child(&container, &card);
                    }
                }
            }
            Err(e) => {
                log::error!("❌ [OPERATOR] Cargando preguntas: {}", e);
                set_text_content(&container, &e.user_message());
            }
        }
    });
}

fn question_card(state: &AppState, question: &Question) -> Result<Element, JsValue> {
    let card = ElementBuilder::new("div")?.class("question-card").build();
    let title = ElementBuilder::new("h3")?
        .text(&format!("{} [{}]", question.title, question.status.as_str()))
        .build();
    let body = ElementBuilder::new("p")?.text(&question.content).build();
    append_child(&card, &title)?;
    append_child(&card, &body)?;

    let answer_id = format!("answer-input-{}", question.id);
    let answer_input = create_element("textarea")?;
    set_attribute(&answer_input, "id", &answer_id)?;
    set_attribute(&answer_input, "placeholder", "Escribí la respuesta")?;
    append_child(&card, &answer_input)?;

    let answer_btn = ElementBuilder::new("button")?
        .class("btn-primary")
        .text("Responder")
        .build();
    {
        let state = state.clone();
        let question_id = question.id;
        on_click(&answer_btn, move |_| {
            let content = textarea_value(&format!("answer-input-{}", question_id));
            if content.trim().is_empty() {
                return;
            }
            let state = state.clone();
            spawn_local(async move {
                match state.api.answer_question(question_id, &content).await {
                    Ok(_) => load_questions(state),
                    Err(e) => log::error!("❌ [OPERATOR] Respondiendo: {}", e),
                }
            });
        })?;
    }
    append_child(&card, &answer_btn)?;

    let close_btn = ElementBuilder::new("button")?
        .class("btn-secondary")
        .text("Cerrar")
        .build();
    {
        let state = state.clone();
        let question_id = question.id;
        on_click(&close_btn, move |_| {
            let state = state.clone();
            spawn_local(async move {
                match state.api.close_question(question_id).await {
                    Ok(_) => load_questions(state),
                    Err(e) => log::error!("❌ [OPERATOR] Cerrando pregunta: {}", e),
                }
            });
        })?;
    }
    append_child(&card, &close_btn)?;

    Ok(card)
}

// ============================================================================
// Feedback
// ============================================================================

fn load_feedback(state: AppState) {
    spawn_local(async move {
        let Some(container) = get_element_by_id("operator-feedback") else {
            return;
        };
        match state.api.list_my_feedback().await {
            Ok(items) => {
                clear_children(&container);
                if items.is_empty() {
                    set_text_content(&container, "Sin mensajes");
                    return;
                }
                for item in items {
                    let line = format!(
                        "{}: {}",
                        item.author_email.as_deref().unwrap_or("admin"),
                        item.message
                    );
                    if let Ok(p) = ElementBuilder::new("p") {
                        let _ = append_child(&container, &p.class("feedback-item").text(&line).build());
                    }
                }
            }
            Err(e) => {
                log::error!("❌ [OPERATOR] Cargando feedback: {}", e);
                set_text_content(&container, &e.user_message());
            }
        }
    });
}
