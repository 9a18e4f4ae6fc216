//! The view renderer: a handlebars registry over embedded page templates.
//! Handlers hand it a template name and a JSON data mapping and get markup
//! back; nothing else in the crate knows what the pages look like.

use std::sync::Arc;

use axum::response::Html;
use handlebars::Handlebars;
use serde_json::Value;

const TEMPLATES: &[(&str, &str)] = &[
    ("login", include_str!("templates/login.hbs")),
    ("layout", include_str!("templates/layout.hbs")),
    ("manager_dashboard", include_str!("templates/manager_dashboard.hbs")),
    ("zookeeper_dashboard", include_str!("templates/zookeeper_dashboard.hbs")),
    ("animals", include_str!("templates/animals.hbs")),
    ("add_animal", include_str!("templates/add_animal.hbs")),
    ("habitats", include_str!("templates/habitats.hbs")),
    ("visitors", include_str!("templates/visitors.hbs")),
    ("visitors_unvisited", include_str!("templates/visitors_unvisited.hbs")),
    ("edit_visitor", include_str!("templates/edit_visitor.hbs")),
    ("veterinary", include_str!("templates/veterinary.hbs")),
    ("add_vet_record", include_str!("templates/add_vet_record.hbs")),
];

#[derive(Clone)]
pub struct Views {
    registry: Arc<Handlebars<'static>>,
}

impl Views {
    pub fn new() -> Self {
        let mut registry = Handlebars::new();
        registry
            .register_partial("flashes", include_str!("templates/flashes.hbs"))
            .expect("flashes partial");
        for (name, source) in TEMPLATES {
            registry
                .register_template_string(name, *source)
                .unwrap_or_else(|e| panic!("template {}: {}", name, e));
        }
        Self {
            registry: Arc::new(registry),
        }
    }

    pub fn page(&self, name: &str, data: &Value) -> Html<String> {
        match self.registry.render(name, data) {
            Ok(markup) => Html(markup),
            Err(e) => {
                tracing::error!("failed to render template {}: {}", name, e);
                Html(format!("<h1>Template error</h1><p>{}</p>", e))
            }
        }
    }
}

impl Default for Views {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn every_template_registers() {
        let views = Views::new();
        for (name, _) in TEMPLATES {
            assert!(views.registry.get_template(name).is_some(), "missing {}", name);
        }
    }

    #[test]
    fn login_renders_error_and_flashes() {
        let views = Views::new();
        let Html(markup) = views.page(
            "login",
            &json!({
                "error": "Incorrect username or password!",
                "flashes": [{"message": "Logged out.", "category": "success"}],
            }),
        );
        assert!(markup.contains("Incorrect username or password!"));
        assert!(markup.contains("Logged out."));
    }

    #[test]
    fn manager_dashboard_renders_report_rows() {
        let views = Views::new();
        let Html(markup) = views.page(
            "manager_dashboard",
            &json!({
                "username": "margaret",
                "animal_count": 5,
                "total_capacity": 28,
                "ticket_report": [
                    {"date": "2026-02-11", "average_price": 21.25, "tickets_sold": 2},
                ],
                "flashes": [],
            }),
        );
        assert!(markup.contains("margaret"));
        assert!(markup.contains("2026-02-11"));
        assert!(markup.contains("28"));
    }

    #[test]
    fn animals_renders_joined_rows() {
        let views = Views::new();
        let Html(markup) = views.page(
            "animals",
            &json!({
                "animals": [{
                    "animal_id": 101,
                    "animal_name": "Zuri",
                    "species": "Lion",
                    "gender": "Female",
                    "age": 6,
                    "habitat_name": "Savanna North",
                    "habitat_type": "Grassland",
                }],
                "flashes": [],
            }),
        );
        assert!(markup.contains("Zuri"));
        assert!(markup.contains("Savanna North"));
    }

    #[test]
    fn add_vet_record_renders_dropdowns() {
        let views = Views::new();
        let Html(markup) = views.page(
            "add_vet_record",
            &json!({
                "animals": [{"animal_id": 101, "name": "Zuri", "species": "Lion"}],
                "vets": [{"employee_id": 3, "name": "Dr. Lena Voss"}],
                "flashes": [],
            }),
        );
        assert!(markup.contains("Zuri"));
        assert!(markup.contains("Dr. Lena Voss"));
    }

    #[test]
    fn unknown_template_degrades_to_error_page() {
        let views = Views::new();
        let Html(markup) = views.page("nope", &json!({}));
        assert!(markup.contains("Template error"));
    }
}
