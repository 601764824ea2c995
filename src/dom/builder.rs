// ============================================================================
// ELEMENT BUILDER - Builder pattern para armar elementos
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::element::{append_child, create_element, set_attribute, set_class_name, set_text_content};

pub struct ElementBuilder {
    element: Element,
}

impl ElementBuilder {
    pub fn new(tag: &str) -> Result<Self, JsValue> {
        Ok(Self {
            element: create_element(tag)?,
        })
    }

    /// Reemplaza todas las clases
    pub fn class(self, class: &str) -> Self {
        set_class_name(&self.element, class);
        self
    }

    pub fn id(self, id: &str) -> Result<Self, JsValue> {
        set_attribute(&self.element, "id", id)?;
        Ok(self)
    }

    pub fn text(self, text: &str) -> Self {
        set_text_content(&self.element, text);
        self
    }

    pub fn child(self, child: Element) -> Result<Self, JsValue> {
        append_child(&self.element, &child)?;
        Ok(self)
    }

    pub fn attr(self, name: &str, value: &str) -> Result<Self, JsValue> {
        set_attribute(&self.element, name, value)?;
        Ok(self)
    }

    pub fn build(self) -> Element {
        self.element
    }
}

/// Celda de tabla con texto (las tablas CRUD las usan en todas las vistas)
pub fn td(text: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("td")?.text(text).build())
}

/// Cabecera de tabla
pub fn th(text: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("th")?.text(text).build())
}

/// Fila de cabecera completa a partir de los títulos de columna
pub fn header_row(titles: &[&str]) -> Result<Element, JsValue> {
    let tr = ElementBuilder::new("tr")?.build();
    for title in titles {
        append_child(&tr, &th(title)?)?;
    }
    Ok(tr)
}
