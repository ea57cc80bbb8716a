// This file is part of the product EVE Routes.
// SPDX-FileCopyrightText: 2026 EVE Routes contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::{HttpRequest, HttpResponse, Result, web};

use crate::app_state::AppState;
use crate::templates::{ErrorPageContext, TemplateEngine, render_minijinja_template};

#[derive(Clone)]
pub struct ErrorRenderer {
    app_name: String,
}

impl ErrorRenderer {
    pub fn new(app_name: String) -> Self {
        Self { app_name }
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }
}

pub fn serve_404(
    renderer: &ErrorRenderer,
    template_engine: Option<&dyn TemplateEngine>,
) -> Result<HttpResponse> {
    let html = render_error_page(
        renderer.app_name(),
        template_engine,
        "error_404.html",
        fallback_404_html,
    );
    Ok(no_cache(HttpResponse::NotFound()).body(html))
}

pub fn serve_500(
    renderer: &ErrorRenderer,
    template_engine: Option<&dyn TemplateEngine>,
) -> Result<HttpResponse> {
    let html = render_error_page(
        renderer.app_name(),
        template_engine,
        "error_500.html",
        fallback_500_html,
    );
    Ok(no_cache(HttpResponse::InternalServerError()).body(html))
}

/// Default service: anything no route matched.
pub async fn not_found(req: HttpRequest, app_state: web::Data<AppState>) -> Result<HttpResponse> {
    log::debug!("No route for {} {}", req.method(), req.path());
    serve_404(&app_state.error_renderer, Some(app_state.templates.as_ref()))
}

fn render_error_page(
    app_name: &str,
    template_engine: Option<&dyn TemplateEngine>,
    template_name: &str,
    fallback: fn(&str) -> String,
) -> String {
    let context = ErrorPageContext::new(app_name).to_value();
    match template_engine {
        Some(engine) => match render_minijinja_template(engine, template_name, context) {
            Ok(html) => html,
            Err(e) => {
                log::error!("Failed to render {} template: {}", template_name, e);
                fallback(app_name)
            }
        },
        None => fallback(app_name),
    }
}

fn no_cache(mut builder: actix_web::HttpResponseBuilder) -> actix_web::HttpResponseBuilder {
    builder
        .content_type("text/html; charset=utf-8")
        .insert_header(("Cache-Control", "no-cache, no-store, must-revalidate"))
        .insert_header(("Pragma", "no-cache"))
        .insert_header(("Expires", "0"));
    builder
}

fn fallback_404_html(app_name: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html><head><title>404 - Page Not Found | {}</title></head>
<body><h1>404 - Page Not Found</h1></body></html>"#,
        app_name
    )
}

fn fallback_500_html(app_name: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html><head><title>500 - Internal Server Error | {}</title></head>
<body><h1>500 - Internal Server Error</h1></body></html>"#,
        app_name
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::MiniJinjaEngine;
    use actix_web::body::to_bytes;
    use actix_web::http::StatusCode;

    #[actix_web::test]
    async fn renders_404_from_template() {
        let renderer = ErrorRenderer::new("EVE Routes".to_string());
        let engine = MiniJinjaEngine::new();
        let resp = serve_404(&renderer, Some(&engine)).expect("response");
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body = to_bytes(resp.into_body()).await.expect("body");
        let body = String::from_utf8_lossy(&body);
        assert!(body.contains("404 - Page Not Found | EVE Routes"));
        assert!(body.contains("has no page at this address"));
    }

    #[actix_web::test]
    async fn falls_back_without_engine() {
        let renderer = ErrorRenderer::new("EVE Routes".to_string());
        let resp = serve_500(&renderer, None).expect("response");
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = to_bytes(resp.into_body()).await.expect("body");
        assert!(String::from_utf8_lossy(&body).contains("500 - Internal Server Error"));
    }
}
