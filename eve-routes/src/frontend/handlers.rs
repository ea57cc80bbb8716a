// This file is part of the product EVE Routes.
// SPDX-FileCopyrightText: 2026 EVE Routes contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::{HttpRequest, HttpResponse, Result, web};
use log::error;

use super::controller::ViewController;
use crate::app_state::AppState;
use crate::client::LocalRoutesApi;
use crate::config::ValidatedConfig;
use crate::error::serve_500;
use crate::templates::{RoutePageContext, render_minijinja_template};

/// The route planner page. A non-empty query string is the submitted form.
pub async fn index(
    req: HttpRequest,
    config: web::Data<ValidatedConfig>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let api = LocalRoutesApi::new(app_state.catalog.clone());
    let (controller, outcome) = ViewController::initialize(api, req.query_string()).await;

    let context = RoutePageContext::new(
        &config.app.name,
        &config.app.description,
        config.route_prefix(),
        controller.form(),
        controller.results(),
        outcome.catalog_error.as_deref(),
    )
    .to_value();

    match render_minijinja_template(app_state.templates.as_ref(), "routes/index.html", context) {
        Ok(html) => Ok(HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(html)),
        Err(e) => {
            error!("Failed to render route page: {}", e);
            serve_500(&app_state.error_renderer, None)
        }
    }
}
