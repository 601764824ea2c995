// ============================================================================
// USER VIEW - Mis tickets + preguntas y respuestas
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{
    append_child, clear_children, create_element, get_element_by_id, header_row, input_value,
    on_click, on_submit, select_value, set_attribute, set_class_name, set_text_content, td,
    textarea_value, ElementBuilder,
};
use crate::models::{Dept, Profile, QuestionCreate, RawId, Ticket, TicketCreate, TicketStatus};
use crate::state::AppState;
use crate::views::shared::render_header;

const PAGE_SIZE: u32 = 10;

fn show_message(id: &str, message: &str) {
    if let Some(el) = get_element_by_id(id) {
        set_text_content(&el, message);
    }
}

pub fn render_user(state: &AppState, profile: &Profile) -> Result<Element, JsValue> {
    log::info!("🎬 [USER] Renderizando panel de usuario");

    let root = ElementBuilder::new("div")?.class("user-screen").build();
    append_child(&root, &render_header(state, profile, "Mis solicitudes")?)?;

    append_child(&root, &ticket_form(state, profile)?)?;

    // Contenedor de la tabla de tickets, se llena async
    let tickets_section = ElementBuilder::new("section")?.class("tickets-section").build();
    let tickets_heading = ElementBuilder::new("h2")?.text("Mis tickets").build();
    append_child(&tickets_section, &tickets_heading)?;
    let tickets_box = ElementBuilder::new("div")?.id("user-tickets")?.build();
    append_child(&tickets_section, &tickets_box)?;
    append_child(&root, &tickets_section)?;

    append_child(&root, &questions_section(state, profile)?)?;

    load_tickets(state.clone(), profile.id, 1);
    load_questions(state.clone(), profile.id);

    Ok(root)
}

// ============================================================================
// Tickets
// ============================================================================

fn load_tickets(state: AppState, author_id: i64, page: u32) {
    spawn_local(async move {
        let Some(container) = get_element_by_id("user-tickets") else {
            return;
        };
        match state.api.list_tickets(page, PAGE_SIZE, Some(author_id)).await {
            Ok(result) => {
                clear_children(&container);
                match ticket_table(&state, author_id, &result.items) {
                    Ok(table) => {
                        let _ = append_child(&container, &table);
                        if let Ok(pager) =
                            pager(&state, author_id, page, result.total, PAGE_SIZE)
                        {
                            let _ = append_child(&container, &pager);
                        }
                    }
                    Err(e) => log::error!("❌ [USER] No se pudo armar la tabla: {:?}", e),
                }
            }
            Err(e) => {
                log::error!("❌ [USER] Cargando tickets: {}", e);
                set_text_content(&container, &e.user_message());
            }
        }
    });
}

fn pager(
    state: &AppState,
    author_id: i64,
    page: u32,
    total: u64,
    limit: u32,
) -> Result<Element, JsValue> {
    let wrap = ElementBuilder::new("div")?.class("pager").build();
    let pages = ((total as u32).saturating_add(limit - 1) / limit).max(1);

    let label = ElementBuilder::new("span")?
        .text(&format!("Página {} de {}", page, pages))
        .build();

    let prev = ElementBuilder::new("button")?.class("btn-pager").text("←").build();
    if page <= 1 {
        set_attribute(&prev, "disabled", "disabled")?;
    } else {
        let state = state.clone();
        on_click(&prev, move |_| load_tickets(state.clone(), author_id, page - 1))?;
    }

    let next = ElementBuilder::new("button")?.class("btn-pager").text("→").build();
    if page >= pages {
        set_attribute(&next, "disabled", "disabled")?;
    } else {
        let state = state.clone();
        on_click(&next, move |_| load_tickets(state.clone(), author_id, page + 1))?;
    }

    append_child(&wrap, &prev)?;
    append_child(&wrap, &label)?;
    append_child(&wrap, &next)?;
    Ok(wrap)
}

fn ticket_table(
    state: &AppState,
    author_id: i64,
    tickets: &[Ticket],
) -> Result<Element, JsValue> {
    let table = ElementBuilder::new("table")?.class("tickets-table").build();
    append_child(
        &table,
        &header_row(&["Título", "Estado", "Fecha límite", "Departamento", "Acciones"])?,
    )?;

    if tickets.is_empty() {
        let row = ElementBuilder::new("tr")?.build();
        let cell = td("Todavía no hay tickets")?;
        set_attribute(&cell, "colspan", "5")?;
        append_child(&row, &cell)?;
        append_child(&table, &row)?;
        return Ok(table);
    }

    for ticket in tickets {
        let row = ElementBuilder::new("tr")?.build();
        append_child(&row, &td(&ticket.title)?)?;
        append_child(&row, &td(ticket.status.as_str())?)?;
        append_child(&row, &td(ticket.deadline.as_deref().unwrap_or("-"))?)?;
        append_child(
            &row,
            &td(ticket
                .dept
                .map(|d| match d {
                    Dept::Dev => "dev",
                    Dept::Impl => "impl",
                    Dept::Info => "info",
                    Dept::Mgmt => "mgmt",
                })
                .unwrap_or("-"))?,
        )?;

        let actions = ElementBuilder::new("td")?.class("row-actions").build();

        // Cancelar: soft delete, el ticket queda visible como "canceled"
        if ticket.status != TicketStatus::Canceled {
            let cancel_btn = ElementBuilder::new("button")?
                .class("btn-cancel")
                .text("Cancelar")
                .build();
            let state2 = state.clone();
            let id = ticket.id.clone();
            on_click(&cancel_btn, move |_| {
                cancel_ticket(state2.clone(), author_id, id.clone());
            })?;
            append_child(&actions, &cancel_btn)?;
        }

        // Eliminar: borrado definitivo
        let delete_btn = ElementBuilder::new("button")?
            .class("btn-delete")
            .text("Eliminar")
            .build();
        let state2 = state.clone();
        let id = ticket.id.clone();
        on_click(&delete_btn, move |_| {
            delete_ticket(state2.clone(), author_id, id.clone());
        })?;
        append_child(&actions, &delete_btn)?;

        append_child(&row, &actions)?;
        append_child(&table, &row)?;
    }

    Ok(table)
}

fn cancel_ticket(state: AppState, author_id: i64, id: RawId) {
    spawn_local(async move {
        match state.api.cancel_ticket(&id).await {
            Ok(_) => load_tickets(state, author_id, 1),
            Err(e) => log::error!("❌ [USER] Cancelando ticket: {}", e),
        }
    });
}

fn delete_ticket(state: AppState, author_id: i64, id: RawId) {
    spawn_local(async move {
        match state.api.hard_delete_ticket(&id).await {
            Ok(()) => load_tickets(state, author_id, 1),
            Err(e) => log::error!("❌ [USER] Eliminando ticket: {}", e),
        }
    });
}

fn labeled_input(id: &str, label: &str, input_type: &str) -> Result<Element, JsValue> {
    let group = ElementBuilder::new("div")?.class("form-group").build();
    let lbl = ElementBuilder::new("label")?.attr("for", id)?.text(label).build();
    let input = create_element("input")?;
    set_attribute(&input, "type", input_type)?;
    set_attribute(&input, "id", id)?;
    set_class_name(&input, "form-input");
    append_child(&group, &lbl)?;
    append_child(&group, &input)?;
    Ok(group)
}

fn dept_select() -> Result<Element, JsValue> {
    let group = ElementBuilder::new("div")?.class("form-group").build();
    let lbl = ElementBuilder::new("label")?
        .attr("for", "ticket-dept")?
        .text("Departamento")
        .build();
    let select = create_element("select")?;
    set_attribute(&select, "id", "ticket-dept")?;
    for (value, text) in [
        ("", "Sin asignar"),
        ("dev", "Desarrollo"),
        ("impl", "Implementación"),
        ("info", "Informática"),
        ("mgmt", "Gestión"),
    ] {
        let opt = ElementBuilder::new("option")?.attr("value", value)?.text(text).build();
        append_child(&select, &opt)?;
    }
    append_child(&group, &lbl)?;
    append_child(&group, &select)?;
    Ok(group)
}

fn ticket_form(state: &AppState, profile: &Profile) -> Result<Element, JsValue> {
    let sec = ElementBuilder::new("section")?.class("ticket-form-section").build();
    let heading = ElementBuilder::new("h2")?.text("Nueva solicitud").build();
    append_child(&sec, &heading)?;

    let form = create_element("form")?;
    set_class_name(&form, "ticket-form");

    append_child(&form, &labeled_input("ticket-title", "Título", "text")?)?;

    let desc_group = ElementBuilder::new("div")?.class("form-group").build();
    let desc_label = ElementBuilder::new("label")?
        .attr("for", "ticket-description")?
        .text("Descripción")
        .build();
    let desc = create_element("textarea")?;
    set_attribute(&desc, "id", "ticket-description")?;
    set_class_name(&desc, "form-input");
    append_child(&desc_group, &desc_label)?;
    append_child(&desc_group, &desc)?;
    append_child(&form, &desc_group)?;

    append_child(&form, &labeled_input("ticket-deadline", "Fecha límite", "date")?)?;
    append_child(&form, &dept_select()?)?;
    append_child(&form, &labeled_input("ticket-topic", "Tema", "text")?)?;
    append_child(&form, &labeled_input("ticket-phone", "Teléfono", "tel")?)?;
    append_child(&form, &labeled_input("ticket-work-email", "Email laboral", "email")?)?;
    append_child(
        &form,
        &labeled_input("ticket-backup-email", "Email alternativo", "email")?,
    )?;

    let error = ElementBuilder::new("div")?.id("ticket-error")?.class("form-error").build();
    append_child(&form, &error)?;

    let submit = ElementBuilder::new("button")?
        .attr("type", "submit")?
        .class("btn-primary")
        .text("Crear ticket")
        .build();
    append_child(&form, &submit)?;

    {
        let state = state.clone();
        let author_id = profile.id;
        on_submit(&form, move || {
            let title = input_value("ticket-title");
            if title.trim().is_empty() {
                show_message("ticket-error", "El título es obligatorio");
                return;
            }

            let opt = |v: String| if v.is_empty() { None } else { Some(v) };
            let dept = match select_value("ticket-dept").as_str() {
                "dev" => Some(Dept::Dev),
                "impl" => Some(Dept::Impl),
                "info" => Some(Dept::Info),
                "mgmt" => Some(Dept::Mgmt),
                _ => None,
            };
            let payload = TicketCreate {
                title,
                description: opt(textarea_value("ticket-description")),
                deadline: opt(input_value("ticket-deadline")),
                dept,
                topic: opt(input_value("ticket-topic")),
                position: None,
                phone: opt(input_value("ticket-phone")),
                work_email: opt(input_value("ticket-work-email")),
                backup_email: opt(input_value("ticket-backup-email")),
            };

            show_message("ticket-error", "");
            let state = state.clone();
            spawn_local(async move {
                match state.api.create_ticket(&payload).await {
                    Ok(ticket) => {
                        log::info!("💾 [USER] Ticket creado: {}", ticket.id);
                        load_tickets(state, author_id, 1);
                    }
                    Err(e) => show_message("ticket-error", &e.user_message()),
                }
            });
        })?;
    }

    append_child(&sec, &form)?;
    Ok(sec)
}

// ============================================================================
// Preguntas y respuestas
// ============================================================================

fn questions_section(state: &AppState, profile: &Profile) -> Result<Element, JsValue> {
    let sec = ElementBuilder::new("section")?.class("questions-section").build();
    let heading = ElementBuilder::new("h2")?.text("Preguntas").build();
    append_child(&sec, &heading)?;

    // Formulario para preguntar
    let form = create_element("form")?;
    set_class_name(&form, "question-form");
    append_child(&form, &labeled_input("question-title", "Título", "text")?)?;

    let content_group = ElementBuilder::new("div")?.class("form-group").build();
    let content_label = ElementBuilder::new("label")?
        .attr("for", "question-content")?
        .text("Pregunta")
        .build();
    let content = create_element("textarea")?;
    set_attribute(&content, "id", "question-content")?;
    set_class_name(&content, "form-input");
    append_child(&content_group, &content_label)?;
    append_child(&content_group, &content)?;
    append_child(&form, &content_group)?;

    let error = ElementBuilder::new("div")?.id("question-error")?.class("form-error").build();
    append_child(&form, &error)?;

    let submit = ElementBuilder::new("button")?
        .attr("type", "submit")?
        .class("btn-primary")
        .text("Preguntar")
        .build();
    append_child(&form, &submit)?;

    {
        let state = state.clone();
        let author_id = profile.id;
        on_submit(&form, move || {
            let title = input_value("question-title");
            let content = textarea_value("question-content");
            if title.trim().is_empty() || content.trim().is_empty() {
                show_message("question-error", "Completá título y pregunta");
                return;
            }

            show_message("question-error", "");
            let state = state.clone();
            spawn_local(async move {
                let payload = QuestionCreate { title, content };
                match state.api.create_question(&payload).await {
                    Ok(_) => load_questions(state, author_id),
                    Err(e) => show_message("question-error", &e.user_message()),
                }
            });
        })?;
    }
    append_child(&sec, &form)?;

    let list = ElementBuilder::new("div")?.id("user-questions")?.build();
    append_child(&sec, &list)?;
    Ok(sec)
}

fn load_questions(state: AppState, author_id: i64) {
    spawn_local(async move {
        let Some(container) = get_element_by_id("user-questions") else {
            return;
        };
        match state.api.list_questions(None, Some(author_id), None).await {
            Ok(questions) => {
                clear_children(&container);
                for question in &questions {
                    if let Ok(card) = question_card(&state, question) {
                        let _ = append_child(&container, &card);
                    }
                }
                if questions.is_empty() {
                    set_text_content(&container, "Todavía no hiciste preguntas");
                }
            }
            Err(e) => {
                log::error!("❌ [USER] Cargando preguntas: {}", e);
                set_text_content(&container, &e.user_message());
            }
        }
    });
}

fn question_card(state: &AppState, question: &crate::models::Question) -> Result<Element, JsValue> {
    let card = ElementBuilder::new("div")?.class("question-card").build();
    let title = ElementBuilder::new("h3")?
        .text(&format!("{} [{}]", question.title, question.status.as_str()))
        .build();
    let body = ElementBuilder::new("p")?.text(&question.content).build();
    append_child(&card, &title)?;
    append_child(&card, &body)?;

    let answers_id = format!("answers-{}", question.id);
    let answers_box = ElementBuilder::new("div")?.id(&answers_id)?.class("answers-box").build();

    let show_btn = ElementBuilder::new("button")?
        .class("btn-secondary")
        .text("Ver respuestas")
        .build();
    {
        let state = state.clone();
        let question_id = question.id;
        on_click(&show_btn, move |_| {
            let state = state.clone();
            let answers_id = format!("answers-{}", question_id);
            spawn_local(async move {
                let Some(bx) = get_element_by_id(&answers_id) else {
                    return;
                };
                match state.api.list_answers(question_id).await {
                    Ok(answers) => {
                        clear_children(&bx);
                        if answers.is_empty() {
                            set_text_content(&bx, "Sin respuestas todavía");
                            return;
                        }
                        for answer in answers {
                            if let Ok(p) = ElementBuilder::new("p") {
                                let _ = append_child(
                                    &bx,
                                    &p.class("answer").text(&answer.content).build(),
                                );
                            }
                        }
                    }
                    Err(e) => set_text_content(&bx, &e.user_message()),
                }
            });
        })?;
    }

    append_child(&card, &show_btn)?;
    append_child(&card, &answers_box)?;
    Ok(card)
}
