//! Template Registry
//!
//! All templates are compiled into the binary and parsed once at startup.
//! Names end in `.html`, so Tera autoescapes every interpolated value.

use axum::response::Html;
use serde::Serialize;
use tera::{Context, Tera};

use crate::error::FleetResult;

const TEMPLATES: [(&str, &str); 10] = [
    ("layout.html", include_str!("../../templates/layout.html")),
    ("dashboard.html", include_str!("../../templates/dashboard.html")),
    ("cars/list.html", include_str!("../../templates/cars/list.html")),
    ("cars/form.html", include_str!("../../templates/cars/form.html")),
    (
        "customers/list.html",
        include_str!("../../templates/customers/list.html"),
    ),
    (
        "customers/form.html",
        include_str!("../../templates/customers/form.html"),
    ),
    ("rentals/list.html", include_str!("../../templates/rentals/list.html")),
    ("rentals/form.html", include_str!("../../templates/rentals/form.html")),
    (
        "services/list.html",
        include_str!("../../templates/services/list.html"),
    ),
    (
        "services/form.html",
        include_str!("../../templates/services/form.html"),
    ),
];

/// Parsed templates, shared read-only by all handlers
pub struct Views {
    tera: Tera,
}

impl Views {
    /// Parse every template; fails on the first syntax error
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        // Added as one batch so `extends` can resolve the layout
        tera.add_raw_templates(TEMPLATES)?;
        Ok(Self { tera })
    }

    pub fn render<T: Serialize>(&self, template: &str, view: &T) -> FleetResult<Html<String>> {
        let context = Context::from_serialize(view)?;
        let html = self.tera.render(template, &context)?;
        Ok(Html(html))
    }
}
