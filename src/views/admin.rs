// ============================================================================
// ADMIN VIEW - Estadísticas, usuarios, altas de operador y productividad
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{
    append_child, clear_children, create_element, get_element_by_id, header_row, input_value,
    on_click, on_submit, set_attribute, set_class_name, set_text_content, td, textarea_value,
    ElementBuilder,
};
use crate::models::{AdminStats, Profile, Question, Role};
use crate::state::AppState;
use crate::views::shared::render_header;

const USERS_PAGE_SIZE: u32 = 20;
const DEFAULT_PRODUCTIVITY_DAYS: u32 = 30;

fn show_message(id: &str, message: &str) {
    if let Some(el) = get_element_by_id(id) {
        set_text_content(&el, message);
    }
}

pub fn render_admin(state: &AppState, profile: &Profile) -> Result<Element, JsValue> {
    log::info!("🎬 [ADMIN] Renderizando panel de administración");

    let root = ElementBuilder::new("div")?.class("admin-screen").build();
    append_child(&root, &render_header(state, profile, "Administración")?)?;

    for (id, title) in [
        ("admin-stats", "Estadísticas"),
        ("admin-users", "Usuarios"),
        ("admin-signups", "Solicitudes de operador"),
        ("admin-recovery", "Recuperaciones de contraseña"),
        ("admin-questions", "Preguntas y respuestas"),
        ("admin-productivity", "Productividad de operadores"),
    ] {
        let sec = ElementBuilder::new("section")?.class("admin-section").build();
        let heading = ElementBuilder::new("h2")?.text(title).build();
        append_child(&sec, &heading)?;
        if id == "admin-productivity" {
            append_child(&sec, &productivity_controls(state)?)?;
        }
        let container = ElementBuilder::new("div")?.id(id)?.build();
        append_child(&sec, &container)?;
        append_child(&root, &sec)?;
    }

    append_child(&root, &feedback_form(state)?)?;

    load_stats(state.clone());
    load_users(state.clone(), 1);
    load_signups(state.clone());
    load_recovery_requests(state.clone());
    load_questions(state.clone());
    load_productivity(state.clone(), DEFAULT_PRODUCTIVITY_DAYS);

    Ok(root)
}

// ============================================================================
// Estadísticas
// ============================================================================

fn load_stats(state: AppState) {
    spawn_local(async move {
        let Some(container) = get_element_by_id("admin-stats") else {
            return;
        };
        match state.api.admin_stats().await {
            Ok(stats) => {
                clear_children(&container);
                if let Ok(tables) = stats_tables(&stats) {
                    for table in tables {
                        let _ = append_child(&container, &table);
                    }
                }
            }
            Err(e) => {
                log::error!("❌ [ADMIN] Cargando estadísticas: {}", e);
                set_text_content(&container, &e.user_message());
            }
        }
    });
}

fn stats_tables(stats: &AdminStats) -> Result<Vec<Element>, JsValue> {
    let mut tables = Vec::new();

    let users = ElementBuilder::new("table")?.class("stats-table").build();
    append_child(&users, &header_row(&["Usuario", "Tickets creados"])?)?;
    for row in &stats.users {
        let tr = ElementBuilder::new("tr")?.build();
        append_child(&tr, &td(&row.email)?)?;
        append_child(&tr, &td(&row.tickets_created.to_string())?)?;
        append_child(&users, &tr)?;
    }
    tables.push(users);

    let operators = ElementBuilder::new("table")?.class("stats-table").build();
    append_child(
        &operators,
        &header_row(&["Operador", "En curso", "Resueltos", "Cancelados", "Resolución media (min)"])?,
    )?;
    for row in &stats.operators {
        let tr = ElementBuilder::new("tr")?.build();
        append_child(&tr, &td(&row.email)?)?;
        append_child(&tr, &td(&row.in_progress.to_string())?)?;
        append_child(&tr, &td(&row.done.to_string())?)?;
        append_child(&tr, &td(&row.canceled.to_string())?)?;
        let avg = row
            .avg_resolution_minutes
            .map(|m| format!("{:.1}", m))
            .unwrap_or_else(|| "-".to_string());
        append_child(&tr, &td(&avg)?)?;
        append_child(&operators, &tr)?;
    }
    tables.push(operators);

    let qa = ElementBuilder::new("table")?.class("stats-table").build();
    append_child(
        &qa,
        &header_row(&["Pregunta", "Usuario", "Respuestas", "Última respuesta"])?,
    )?;
    for row in &stats.qa {
        let tr = ElementBuilder::new("tr")?.build();
        append_child(&tr, &td(&row.title)?)?;
        append_child(&tr, &td(&row.user_email)?)?;
        append_child(&tr, &td(&row.answers.to_string())?)?;
        append_child(&tr, &td(row.last_answer_at.as_deref().unwrap_or("-"))?)?;
        append_child(&qa, &tr)?;
    }
    tables.push(qa);

    Ok(tables)
}

// ============================================================================
// Usuarios
// ============================================================================

fn load_users(state: AppState, page: u32) {
    spawn_local(async move {
        let Some(container) = get_element_by_id("admin-users") else {
            return;
        };
        match state.api.list_users(page, USERS_PAGE_SIZE).await {
            Ok(result) => {
                clear_children(&container);
                if let Ok(table) = users_table(&state, page, &result.items) {
                    let _ = append_child(&container, &table);
                }
                let pages =
                    ((result.total as u32).saturating_add(USERS_PAGE_SIZE - 1) / USERS_PAGE_SIZE).max(1);
                if let Ok(pager) = users_pager(&state, page, pages) {
                    let _ = append_child(&container, &pager);
                }
                // Caja de detalle: tickets del usuario seleccionado
                if let Ok(detail) = ElementBuilder::new("div") {
                    if let Ok(detail) = detail.id("admin-user-tickets") {
                        let _ = append_child(&container, &detail.build());
                    }
                }
            }
            Err(e) => {
                log::error!("❌ [ADMIN] Cargando usuarios: {}", e);
                set_text_content(&container, &e.user_message());
            }
        }
    });
}

fn users_pager(state: &AppState, page: u32, pages: u32) -> Result<Element, JsValue> {
    let wrap = ElementBuilder::new("div")?.class("pager").build();

    let prev = ElementBuilder::new("button")?.class("btn-pager").text("←").build();
    if page <= 1 {
        set_attribute(&prev, "disabled", "disabled")?;
    } else {
        let state = state.clone();
        on_click(&prev, move |_| load_users(state.clone(), page - 1))?;
    }

    let label = ElementBuilder::new("span")?
        .text(&format!("Página {} de {}", page, pages))
        .build();

    let next = ElementBuilder::new("button")?.class("btn-pager").text("→").build();
    if page >= pages {
        set_attribute(&next, "disabled", "disabled")?;
    } else {
        let state = state.clone();
        on_click(&next, move |_| load_users(state.clone(), page + 1))?;
    }

    append_child(&wrap, &prev)?;
    append_child(&wrap, &label)?;
    append_child(&wrap, &next)?;
    Ok(wrap)
}

fn users_table(state: &AppState, page: u32, users: &[Profile]) -> Result<Element, JsValue> {
    let table = ElementBuilder::new("table")?.class("users-table").build();
    append_child(&table, &header_row(&["Email", "Rol", "Activo", "Acciones"])?)?;

    for user in users {
        let row = ElementBuilder::new("tr")?.build();
        append_child(&row, &td(&user.email)?)?;
        append_child(&row, &td(user.role.as_str())?)?;
        append_child(
            &row,
            &td(match user.is_active {
                Some(true) => "sí",
                Some(false) => "no",
                None => "-",
            })?,
        )?;

        let actions = ElementBuilder::new("td")?.class("row-actions").build();

        let tickets_btn = ElementBuilder::new("button")?
            .class("btn-secondary")
            .text("Ver tickets")
            .build();
        {
            let state = state.clone();
            let user_id = user.id;
            let email = user.email.clone();
            on_click(&tickets_btn, move |_| {
                load_user_tickets(state.clone(), user_id, email.clone());
            })?;
        }
        append_child(&actions, &tickets_btn)?;

        // No hay botón para que el admin se borre a sí mismo u otro admin
        if user.role != Role::Admin {
            let delete_btn = ElementBuilder::new("button")?
                .class("btn-delete")
                .text("Eliminar")
                .build();
            let state2 = state.clone();
            let user_id = user.id;
            on_click(&delete_btn, move |_| {
                let state = state2.clone();
                spawn_local(async move {
                    match state.api.delete_user(user_id).await {
                        Ok(()) => {
                            log::info!("🗑️ [ADMIN] Usuario {} eliminado", user_id);
                            load_users(state, page);
                        }
                        Err(e) => log::error!("❌ [ADMIN] Eliminando usuario: {}", e),
                    }
                });
            })?;
            append_child(&actions, &delete_btn)?;
        }

        append_child(&row, &actions)?;
        append_child(&table, &row)?;
    }

    Ok(table)
}

fn load_user_tickets(state: AppState, user_id: i64, email: String) {
    spawn_local(async move {
        let Some(container) = get_element_by_id("admin-user-tickets") else {
            return;
        };
        match state.api.list_user_tickets(user_id, 50).await {
            Ok(result) => {
                clear_children(&container);
                if let Ok(heading) = ElementBuilder::new("h3") {
                    let _ = append_child(
                        &container,
                        &heading.text(&format!("Tickets de {}", email)).build(),
                    );
                }
                let Ok(table) = ElementBuilder::new("table") else {
                    return;
                };
                let table = table.class("tickets-table").build();
                if let Ok(head) = header_row(&["Título", "Estado", "Fecha límite"]) {
                    let _ = append_child(&table, &head);
                }
                for ticket in &result.items {
                    let Ok(tr) = ElementBuilder::new("tr") else {
                        continue;
                    };
                    let tr = tr.build();
                    for text in [
                        ticket.title.as_str(),
                        ticket.status.as_str(),
                        ticket.deadline.as_deref().unwrap_or("-"),
                    ] {
                        if let Ok(cell) = td(text) {
                            let _ = append_child(&tr, &cell);
                        }
                    }
                    let _ = append_child(&table, &tr);
                }
                let _ = append_child(&container, &table);
            }
            Err(e) => {
                log::error!("❌ [ADMIN] Tickets de usuario: {}", e);
                set_text_content(&container, &e.user_message());
            }
        }
    });
}

// ============================================================================
// Altas de operador
// ============================================================================

fn load_signups(state: AppState) {
    spawn_local(async move {
        let Some(container) = get_element_by_id("admin-signups") else {
            return;
        };
        match state.api.list_operator_signups().await {
            Ok(signups) => {
                clear_children(&container);
                if signups.is_empty() {
                    set_text_content(&container, "No hay solicitudes pendientes");
                    return;
                }
                let Ok(table) = ElementBuilder::new("table") else {
                    return;
                };
                let table = table.class("signups-table").build();
                if let Ok(head) = header_row(&["Email", "Nombre", "Teléfono", ""]) {
                    let _ = append_child(&table, &head);
                }
                for signup in &signups {
                    let Ok(tr) = ElementBuilder::new("tr") else {
                        continue;
                    };
                    let tr = tr.build();
                    for text in [
                        signup.email.as_str(),
                        signup.full_name.as_deref().unwrap_or("-"),
                        signup.phone.as_deref().unwrap_or("-"),
                    ] {
                        if let Ok(cell) = td(text) {
                            let _ = append_child(&tr, &cell);
                        }
                    }
                    let Ok(cell) = ElementBuilder::new("td") else {
                        continue;
                    };
                    let cell = cell.build();
                    if let Ok(approve) = ElementBuilder::new("button") {
                        let approve = approve.class("btn-approve").text("Aprobar").build();
                        let state2 = state.clone();
                        let signup_id = signup.id;
                        let _ = on_click(&approve, move |_| {
                            let state = state2.clone();
                            spawn_local(async move {
                                match state.api.approve_operator_signup(signup_id).await {
                                    Ok(()) => {
                                        log::info!("✅ [ADMIN] Alta {} aprobada", signup_id);
                                        load_signups(state);
                                    }
                                    Err(e) => log::error!("❌ [ADMIN] Aprobando alta: {}", e),
                                }
                            });
                        });
                        let _ = append_child(&cell, &approve);
                    }
                    let _ = append_child(&tr, &cell);
                    let _ = append_child(&table, &tr);
                }
                let _ = append_child(&container, &table);
            }
            Err(e) => {
                log::error!("❌ [ADMIN] Cargando solicitudes: {}", e);
                set_text_content(&container, &e.user_message());
            }
        }
    });
}

// ============================================================================
// Recuperaciones de contraseña
// ============================================================================

fn load_recovery_requests(state: AppState) {
    spawn_local(async move {
        let Some(container) = get_element_by_id("admin-recovery") else {
            return;
        };
        match state.api.list_password_recovery_requests().await {
            Ok(requests) => {
                clear_children(&container);
                if requests.is_empty() {
                    set_text_content(&container, "No hay solicitudes pendientes");
                    return;
                }
                let Ok(table) = ElementBuilder::new("table") else {
                    return;
                };
                let table = table.class("recovery-table").build();
                if let Ok(head) = header_row(&["Email", "Fecha", "Estado", ""]) {
                    let _ = append_child(&table, &head);
                }
                for request in &requests {
                    let Ok(tr) = ElementBuilder::new("tr") else {
                        continue;
                    };
                    let tr = tr.build();
                    for text in [
                        request.email.as_str(),
                        request.created_at.as_deref().unwrap_or("-"),
                        if request.link_sent { "link enviado" } else { "pendiente" },
                    ] {
                        if let Ok(cell) = td(text) {
                            let _ = append_child(&tr, &cell);
                        }
                    }
                    let Ok(cell) = ElementBuilder::new("td") else {
                        continue;
                    };
                    let cell = cell.build();
                    if !request.link_sent {
                        if let Ok(send) = ElementBuilder::new("button") {
                            let send = send.class("btn-approve").text("Enviar link").build();
                            let state2 = state.clone();
                            let request_id = request.id;
                            let _ = on_click(&send, move |_| {
                                let state = state2.clone();
                                spawn_local(async move {
                                    match state.api.send_recovery_link(request_id).await {
                                        Ok(()) => {
                                            log::info!(
                                                "📨 [ADMIN] Link de reseteo emitido para la solicitud {}",
                                                request_id
                                            );
                                            load_recovery_requests(state);
                                        }
                                        Err(e) => {
                                            log::error!("❌ [ADMIN] Enviando link: {}", e)
                                        }
                                    }
                                });
                            });
                            let _ = append_child(&cell, &send);
                        }
                    }
                    let _ = append_child(&tr, &cell);
                    let _ = append_child(&table, &tr);
                }
                let _ = append_child(&container, &table);
            }
            Err(e) => {
                log::error!("❌ [ADMIN] Cargando recuperaciones: {}", e);
                set_text_content(&container, &e.user_message());
            }
        }
    });
}

// ============================================================================
// Preguntas y respuestas (solo lectura)
// ============================================================================

fn load_questions(state: AppState) {
    spawn_local(async move {
        let Some(container) = get_element_by_id("admin-questions") else {
            return;
        };
        match state.api.list_questions(None, None, None).await {
            Ok(questions) => {
                clear_children(&container);
                if questions.is_empty() {
                    set_text_content(&container, "No hay preguntas");
                    return;
                }
                for question in &questions {
                    if let Ok(card) = question_card(&state, question) {
                        let _ = append_child(&container, &card);
                    }
                }
            }
            Err(e) => {
                log::error!("❌ [ADMIN] Cargando preguntas: {}", e);
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

    let answers_id = format!("admin-answers-{}", question.id);
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
            let answers_id = format!("admin-answers-{}", question_id);
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

// ============================================================================
// Productividad
// ============================================================================

fn productivity_controls(state: &AppState) -> Result<Element, JsValue> {
    let wrap = ElementBuilder::new("div")?.class("productivity-controls").build();

    let input = create_element("input")?;
    set_attribute(&input, "type", "number")?;
    set_attribute(&input, "id", "productivity-days")?;
    set_attribute(&input, "min", "1")?;
    set_attribute(&input, "value", &DEFAULT_PRODUCTIVITY_DAYS.to_string())?;
    append_child(&wrap, &input)?;

    let refresh = ElementBuilder::new("button")?
        .class("btn-secondary")
        .text("Recalcular")
        .build();
    {
        let state = state.clone();
        on_click(&refresh, move |_| {
            let days = input_value("productivity-days")
                .trim()
                .parse::<u32>()
                .unwrap_or(DEFAULT_PRODUCTIVITY_DAYS);
            load_productivity(state.clone(), days);
        })?;
    }
    append_child(&wrap, &refresh)?;

    Ok(wrap)
}

fn load_productivity(state: AppState, days: u32) {
    spawn_local(async move {
        let Some(container) = get_element_by_id("admin-productivity") else {
            return;
        };
        set_text_content(&container, "Calculando…");
        // Endpoint pesado: usa el timeout largo del cliente
        match state.api.operator_productivity(days).await {
            Ok(rows) => {
                clear_children(&container);
                let Ok(table) = ElementBuilder::new("table") else {
                    return;
                };
                let table = table.class("productivity-table").build();
                if let Ok(head) =
                    header_row(&["Operador", "Día", "Resueltos", "Media (min)"])
                {
                    let _ = append_child(&table, &head);
                }
                for row in &rows {
                    for point in &row.series {
                        let Ok(tr) = ElementBuilder::new("tr") else {
                            continue;
                        };
                        let tr = tr.build();
                        let avg = point
                            .avg_minutes
                            .map(|m| format!("{:.1}", m))
                            .unwrap_or_else(|| "-".to_string());
                        for text in [
                            row.email.as_str(),
                            point.date.as_str(),
                            &point.count.to_string(),
                            &avg,
                        ] {
                            if let Ok(cell) = td(text) {
                                let _ = append_child(&tr, &cell);
                            }
                        }
                        let _ = append_child(&table, &tr);
                    }
                }
                let _ = append_child(&container, &table);
            }
            Err(e) => {
                log::error!("❌ [ADMIN] Productividad: {}", e);
                set_text_content(&container, &e.user_message());
            }
        }
    });
}

// ============================================================================
// Feedback a operadores
// ============================================================================

fn feedback_form(state: &AppState) -> Result<Element, JsValue> {
    let sec = ElementBuilder::new("section")?.class("admin-section").build();
    let heading = ElementBuilder::new("h2")?.text("Feedback a operador").build();
    append_child(&sec, &heading)?;

    let form = create_element("form")?;
    set_class_name(&form, "feedback-form");

    let id_group = ElementBuilder::new("div")?.class("form-group").build();
    let id_label = ElementBuilder::new("label")?
        .attr("for", "feedback-operator-id")?
        .text("ID del operador")
        .build();
    let id_input = create_element("input")?;
    set_attribute(&id_input, "type", "number")?;
    set_attribute(&id_input, "id", "feedback-operator-id")?;
    set_class_name(&id_input, "form-input");
    append_child(&id_group, &id_label)?;
    append_child(&id_group, &id_input)?;
    append_child(&form, &id_group)?;

    let msg_group = ElementBuilder::new("div")?.class("form-group").build();
    let msg_label = ElementBuilder::new("label")?
        .attr("for", "feedback-message")?
        .text("Mensaje")
        .build();
    let msg_input = create_element("textarea")?;
    set_attribute(&msg_input, "id", "feedback-message")?;
    set_class_name(&msg_input, "form-input");
    append_child(&msg_group, &msg_label)?;
    append_child(&msg_group, &msg_input)?;
    append_child(&form, &msg_group)?;

    let status = ElementBuilder::new("div")?.id("feedback-status")?.class("form-error").build();
    append_child(&form, &status)?;

    let submit = ElementBuilder::new("button")?
        .attr("type", "submit")?
        .class("btn-primary")
        .text("Enviar")
        .build();
    append_child(&form, &submit)?;

    {
        let state = state.clone();
        on_submit(&form, move || {
            let operator_id = match input_value("feedback-operator-id").trim().parse::<i64>() {
                Ok(n) => n,
                Err(_) => {
                    show_message("feedback-status", "Ingresá un ID numérico");
                    return;
                }
            };
            let message = textarea_value("feedback-message");
            if message.trim().is_empty() {
                show_message("feedback-status", "El mensaje no puede estar vacío");
                return;
            }

            show_message("feedback-status", "");
            let state = state.clone();
            spawn_local(async move {
                match state.api.send_operator_feedback(operator_id, &message).await {
                    Ok(_) => show_message("feedback-status", "Feedback enviado"),
                    Err(e) => show_message("feedback-status", &e.user_message()),
                }
            });
        })?;
    }

    append_child(&sec, &form)?;
    Ok(sec)
}
