// This file is part of the product EVE Routes.
// SPDX-FileCopyrightText: 2026 EVE Routes contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::web;

mod handlers;
mod types;

pub use types::{ErrorBody, ListResponse, RouteRequest, RouteResponse, RouteResult, RouteStep};

pub fn configure(cfg: &mut web::ServiceConfig, prefix: &str) {
    cfg.service(
        web::scope(&format!("{}/api", prefix))
            .route("/list_tags", web::get().to(handlers::list_tags))
            .route("/list_systems", web::get().to(handlers::list_systems))
            .route("/get_routes", web::post().to(handlers::get_routes)),
    );
}
