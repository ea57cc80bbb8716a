// This file is part of the product EVE Routes.
// SPDX-FileCopyrightText: 2026 EVE Routes contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use minijinja::{Value, context};

use crate::frontend::{FormState, RouteListView};

#[derive(Debug, Clone)]
pub struct ErrorPageContext {
    app_name: String,
}

impl ErrorPageContext {
    pub fn new(app_name: &str) -> Self {
        Self {
            app_name: app_name.to_string(),
        }
    }

    pub fn to_value(&self) -> Value {
        context! {
            app_name => &self.app_name
        }
    }
}

/// Everything the route planner page needs: the form, the results and an
/// optional catalog error shown above the form.
#[derive(Debug, Clone)]
pub struct RoutePageContext {
    app_name: String,
    description: String,
    base_path: String,
    form: FormState,
    routes: RouteListView,
    catalog_error: Option<String>,
}

impl RoutePageContext {
    pub fn new(
        app_name: &str,
        description: &str,
        base_path: &str,
        form: &FormState,
        routes: &RouteListView,
        catalog_error: Option<&str>,
    ) -> Self {
        Self {
            app_name: app_name.to_string(),
            description: description.to_string(),
            base_path: base_path.to_string(),
            form: form.clone(),
            routes: routes.clone(),
            catalog_error: catalog_error.map(str::to_string),
        }
    }

    pub fn to_value(&self) -> Value {
        context! {
            app_name => &self.app_name,
            description => &self.description,
            base_path => &self.base_path,
            form => Value::from_serialize(&self.form),
            routes => Value::from_serialize(&self.routes),
            catalog_error => &self.catalog_error
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{RouteResult, RouteStep};
    use crate::frontend::QueryState;
    use crate::templates::{MiniJinjaEngine, TemplateEngine};

    fn render_routes(view: &RouteListView) -> String {
        let form = FormState::hydrate(&[], &QueryState::default());
        let context = RoutePageContext::new("EVE Routes", "", "/eve-routes", &form, view, None);
        MiniJinjaEngine::new()
            .render("routes/route_list.html", context.to_value())
            .expect("rendered")
    }

    #[test]
    fn renders_one_step_with_sec_status_class() {
        let mut view = RouteListView::default();
        view.show_routes(&RouteResult {
            routes: vec![vec![RouteStep {
                name: "Jita".to_string(),
                sec_status: "highsec".to_string(),
            }]],
        });

        let html = render_routes(&view);
        assert_eq!(html.matches("<ol class=\"route\">").count(), 1);
        assert_eq!(html.matches("<li ").count(), 1);
        assert!(html.contains("<li class=\"highsec\">Jita</li>"));
        assert!(!html.contains("hidden"));
    }

    #[test]
    fn hidden_container_renders_no_routes() {
        let html = render_routes(&RouteListView::default());
        assert!(html.contains("<div id=\"routes-list\" hidden>"));
        assert!(!html.contains("<ol"));
    }

    #[test]
    fn page_shows_catalog_error() {
        let form = FormState::hydrate(&[], &QueryState::default());
        let context = RoutePageContext::new(
            "EVE Routes",
            "Route planner",
            "/eve-routes",
            &form,
            &RouteListView::default(),
            Some("Could not load catalogs"),
        );
        let html = MiniJinjaEngine::new()
            .render("routes/index.html", context.to_value())
            .expect("rendered");
        assert!(html.contains("class=\"notice catalog-error\""));
        assert!(html.contains("Could not load catalogs"));
        assert!(html.contains("<p>Route planner</p>"));
    }
}
