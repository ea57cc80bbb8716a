// This file is part of the product EVE Routes.
// SPDX-FileCopyrightText: 2026 EVE Routes contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};
use log::{debug, info};

use super::types::{ErrorBody, ListResponse, RouteRequest, RouteResponse};
use crate::app_state::AppState;

pub async fn list_tags(app_state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ListResponse::items(app_state.catalog.tag_names().to_vec()))
}

pub async fn list_systems(app_state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ListResponse::items(app_state.catalog.system_names()))
}

/// The body is decoded here rather than through `web::Json` so malformed
/// input gets the same `{"Error": ...}` shape as every other failure.
pub async fn get_routes(app_state: web::Data<AppState>, body: web::Bytes) -> HttpResponse {
    let request: RouteRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            debug!("Rejecting malformed route request: {}", e);
            return error_response(StatusCode::BAD_REQUEST, &format!("invalid request: {}", e));
        }
    };

    match app_state.catalog.find_routes(&request) {
        Ok(routes) => {
            debug!(
                "Found {} route(s) from {:?} to {}{}",
                routes.len(),
                request.from_systems,
                request.to_system,
                request.to_tag
            );
            HttpResponse::Ok().json(RouteResponse { routes })
        }
        Err(e) => {
            info!("Route request from {:?} failed: {}", request.from_systems, e);
            let status = StatusCode::from_u16(e.http_status()).unwrap_or(StatusCode::BAD_REQUEST);
            error_response(status, &e.to_string())
        }
    }
}

fn error_response(status: StatusCode, message: &str) -> HttpResponse {
    HttpResponse::build(status).json(ErrorBody::new(message))
}
