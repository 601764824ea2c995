// ============================================================================
// LOGIN VIEW - Login, registro, alta de operador y recuperación de contraseña
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{
    append_child, checkbox_checked, create_element, get_element_by_id, input_value, on_submit,
    set_attribute, set_class_name, set_text_content, ElementBuilder,
};
use crate::models::{RegisterOperatorRequest, RegisterRequest};
use crate::services::auth_service;
use crate::services::role_guard::path_by_role;
use crate::state::AppState;
use crate::utils::storage::navigate_to;

/// Muestra un error o mensaje inline en el div indicado
fn show_message(id: &str, message: &str) {
    if let Some(el) = get_element_by_id(id) {
        set_text_content(&el, message);
    }
}

fn form_group(id: &str, label_text: &str, input_type: &str) -> Result<Element, JsValue> {
    let group = ElementBuilder::new("div")?.class("form-group").build();

    let label = ElementBuilder::new("label")?
        .attr("for", id)?
        .text(label_text)
        .build();

    let input = create_element("input")?;
    set_attribute(&input, "type", input_type)?;
    set_attribute(&input, "id", id)?;
    set_attribute(&input, "name", id)?;
    set_class_name(&input, "form-input");

    append_child(&group, &label)?;
    append_child(&group, &input)?;
    Ok(group)
}

fn section(title: &str) -> Result<Element, JsValue> {
    let sec = ElementBuilder::new("section")?.class("auth-section").build();
    let h = ElementBuilder::new("h2")?.text(title).build();
    append_child(&sec, &h)?;
    Ok(sec)
}

fn error_div(id: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?.id(id)?.class("form-error").build())
}

pub fn render_login(state: &AppState) -> Result<Element, JsValue> {
    log::info!("🎬 [LOGIN] Renderizando página de acceso");

    let screen = ElementBuilder::new("div")?.class("login-screen").build();

    let heading = ElementBuilder::new("h1")?.text("DeskLite").build();
    append_child(&screen, &heading)?;

    append_child(&screen, &login_form(state)?)?;
    append_child(&screen, &register_form(state)?)?;
    append_child(&screen, &operator_signup_form(state)?)?;
    append_child(&screen, &recovery_forms(state)?)?;

    Ok(screen)
}

fn login_form(state: &AppState) -> Result<Element, JsValue> {
    let sec = section("Iniciar sesión")?;
    let form = create_element("form")?;
    set_class_name(&form, "login-form");

    append_child(&form, &form_group("login-email", "Email", "email")?)?;
    append_child(&form, &form_group("login-password", "Contraseña", "password")?)?;

    // Remember me: precargado desde la preferencia persistida
    let remember_group = ElementBuilder::new("div")?.class("form-group-inline").build();
    let remember = create_element("input")?;
    set_attribute(&remember, "type", "checkbox")?;
    set_attribute(&remember, "id", "login-remember")?;
    if state.session.remember_me() {
        set_attribute(&remember, "checked", "checked")?;
    }
    let remember_label = ElementBuilder::new("label")?
        .attr("for", "login-remember")?
        .text("Recordarme")
        .build();
    append_child(&remember_group, &remember)?;
    append_child(&remember_group, &remember_label)?;
    append_child(&form, &remember_group)?;

    append_child(&form, &error_div("login-error")?)?;

    let submit = ElementBuilder::new("button")?
        .attr("type", "submit")?
        .class("btn-primary")
        .text("Entrar")
        .build();
    append_child(&form, &submit)?;

    {
        let api = state.api.clone();
        on_submit(&form, move || {
            let email = input_value("login-email");
            let password = input_value("login-password");
            let remember = checkbox_checked("login-remember");

            if email.is_empty() || password.is_empty() {
                show_message("login-error", "Completá email y contraseña");
                return;
            }

            show_message("login-error", "");
            let api = api.clone();
            spawn_local(async move {
                match auth_service::login(&api, &email, &password, remember).await {
                    Ok(profile) => navigate_to(path_by_role(profile.role)),
                    Err(e) => {
                        log::error!("❌ [LOGIN] {}", e);
                        show_message("login-error", &e.user_message());
                    }
                }
            });
        })?;
    }

    append_child(&sec, &form)?;
    Ok(sec)
}

fn register_form(state: &AppState) -> Result<Element, JsValue> {
    let sec = section("Crear cuenta")?;
    let form = create_element("form")?;
    set_class_name(&form, "register-form");

    append_child(&form, &form_group("reg-email", "Email", "email")?)?;
    append_child(&form, &form_group("reg-password", "Contraseña", "password")?)?;
    append_child(&form, &form_group("reg-name", "Nombre completo", "text")?)?;
    append_child(&form, &form_group("reg-phone", "Teléfono", "tel")?)?;
    append_child(&form, &form_group("reg-position", "Puesto", "text")?)?;
    append_child(&form, &error_div("reg-error")?)?;

    let submit = ElementBuilder::new("button")?
        .attr("type", "submit")?
        .class("btn-primary")
        .text("Registrarme")
        .build();
    append_child(&form, &submit)?;

    {
        let api = state.api.clone();
        on_submit(&form, move || {
            let email = input_value("reg-email");
            let password = input_value("reg-password");
            if email.is_empty() || password.is_empty() {
                show_message("reg-error", "Email y contraseña son obligatorios");
                return;
            }

            let opt = |v: String| if v.is_empty() { None } else { Some(v) };
            let request = RegisterRequest {
                email: email.clone(),
                password,
                full_name: opt(input_value("reg-name")),
                phone: opt(input_value("reg-phone")),
                position: opt(input_value("reg-position")),
            };

            show_message("reg-error", "");
            let api = api.clone();
            spawn_local(async move {
                // Chequeo previo de duplicado para dar feedback inmediato
                match api.check_email(&email).await {
                    Ok(true) => {
                        show_message("reg-error", "Ese email ya está registrado");
                        return;
                    }
                    Ok(false) => {}
                    Err(e) => {
                        // El chequeo es cortesía: si falla, el registro decide
                        log::warn!("⚠️ [REGISTER] check_email falló: {}", e);
                    }
                }

                match auth_service::register(&api, &request).await {
                    Ok(profile) => navigate_to(path_by_role(profile.role)),
                    Err(e) => show_message("reg-error", &e.user_message()),
                }
            });
        })?;
    }

    append_child(&sec, &form)?;
    Ok(sec)
}

fn operator_signup_form(state: &AppState) -> Result<Element, JsValue> {
    let sec = section("Solicitar cuenta de operador")?;
    let form = create_element("form")?;
    set_class_name(&form, "operator-signup-form");

    append_child(&form, &form_group("op-email", "Email", "email")?)?;
    append_child(&form, &form_group("op-phone", "Teléfono", "tel")?)?;
    append_child(&form, &form_group("op-name", "Nombre completo", "text")?)?;
    append_child(&form, &error_div("op-message")?)?;

    let submit = ElementBuilder::new("button")?
        .attr("type", "submit")?
        .class("btn-secondary")
        .text("Enviar solicitud")
        .build();
    append_child(&form, &submit)?;

    {
        let api = state.api.clone();
        on_submit(&form, move || {
            let email = input_value("op-email");
            let phone = input_value("op-phone");
            let full_name = input_value("op-name");
            if email.is_empty() || phone.is_empty() || full_name.is_empty() {
                show_message("op-message", "Todos los campos son obligatorios");
                return;
            }

            let request = RegisterOperatorRequest {
                email,
                phone,
                full_name,
                password: None,
            };
            let api = api.clone();
            spawn_local(async move {
                match auth_service::register_operator(&api, &request).await {
                    Ok(()) => show_message(
                        "op-message",
                        "Solicitud enviada. Un administrador la revisará.",
                    ),
                    Err(e) => show_message("op-message", &e.user_message()),
                }
            });
        })?;
    }

    append_child(&sec, &form)?;
    Ok(sec)
}

fn recovery_forms(state: &AppState) -> Result<Element, JsValue> {
    let sec = section("Recuperar contraseña")?;

    // Paso 1: dejar el email para crear la solicitud de recuperación
    let request_form = create_element("form")?;
    set_class_name(&request_form, "recovery-form");
    append_child(&request_form, &form_group("rec-email", "Email", "email")?)?;
    append_child(&request_form, &error_div("rec-message")?)?;
    let request_btn = ElementBuilder::new("button")?
        .attr("type", "submit")?
        .class("btn-secondary")
        .text("Solicitar recuperación")
        .build();
    append_child(&request_form, &request_btn)?;

    {
        let api = state.api.clone();
        on_submit(&request_form, move || {
            let email = input_value("rec-email");
            if email.is_empty() {
                show_message("rec-message", "Ingresá tu email");
                return;
            }
            let api = api.clone();
            spawn_local(async move {
                match auth_service::request_password_recovery(&api, &email).await {
                    Ok(()) => show_message("rec-message", "Solicitud registrada"),
                    Err(e) => show_message("rec-message", &e.user_message()),
                }
            });
        })?;
    }
    append_child(&sec, &request_form)?;

    // Paso 2: establecer la contraseña nueva
    let reset_form = create_element("form")?;
    set_class_name(&reset_form, "reset-form");
    append_child(&reset_form, &form_group("reset-email", "Email", "email")?)?;
    append_child(
        &reset_form,
        &form_group("reset-password", "Contraseña nueva", "password")?,
    )?;
    append_child(&reset_form, &error_div("reset-message")?)?;
    let reset_btn = ElementBuilder::new("button")?
        .attr("type", "submit")?
        .class("btn-secondary")
        .text("Cambiar contraseña")
        .build();
    append_child(&reset_form, &reset_btn)?;

    {
        let api = state.api.clone();
        on_submit(&reset_form, move || {
            let email = input_value("reset-email");
            let password = input_value("reset-password");
            if email.is_empty() || password.is_empty() {
                show_message("reset-message", "Completá email y contraseña nueva");
                return;
            }
            let api = api.clone();
            spawn_local(async move {
                match auth_service::reset_password(&api, &email, &password).await {
                    Ok(()) => show_message("reset-message", "Contraseña actualizada, ya podés entrar"),
                    Err(e) => show_message("reset-message", &e.user_message()),
                }
            });
        })?;
    }
    append_child(&sec, &reset_form)?;

    Ok(sec)
}
