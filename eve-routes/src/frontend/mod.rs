// This file is part of the product EVE Routes.
// SPDX-FileCopyrightText: 2026 EVE Routes contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::web;

pub mod controller;
pub mod form;
pub mod handlers;
pub mod query;
pub mod tag_order;
pub mod view;

pub use controller::{
    Catalogs, ControllerPhase, InitOutcome, Submission, SystemCatalog, ViewController,
    fetch_catalogs,
};
pub use form::{FormState, TagOption, TagSelect, split_system_list};
pub use query::QueryState;
pub use tag_order::{TagCatalog, compare_tags, sort_tags};
pub use view::RouteListView;

/// Serves the page at `prefix` and `prefix/`; `prefix` is empty at the root.
pub fn configure(cfg: &mut web::ServiceConfig, prefix: &str) {
    if prefix.is_empty() {
        cfg.route("/", web::get().to(handlers::index));
    } else {
        cfg.route(prefix, web::get().to(handlers::index))
            .route(&format!("{}/", prefix), web::get().to(handlers::index));
    }
}
