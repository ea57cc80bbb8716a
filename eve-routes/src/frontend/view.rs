// This file is part of the product EVE Routes.
// SPDX-FileCopyrightText: 2026 EVE Routes contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use serde::Serialize;

use crate::api::{RouteResult, RouteStep};

/// State of the results container below the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RouteListView {
    pub visible: bool,
    pub routes: Vec<Vec<RouteStep>>,
    pub error: Option<String>,
}

impl RouteListView {
    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn clear(&mut self) {
        self.routes.clear();
        self.error = None;
    }

    /// Replaces whatever was shown with `result` and makes the container visible.
    pub fn show_routes(&mut self, result: &RouteResult) {
        self.clear();
        self.routes = result.routes.clone();
        self.visible = true;
    }

    pub fn show_error(&mut self, message: impl Into<String>) {
        self.clear();
        self.error = Some(message.into());
        self.visible = true;
    }

    pub fn route_count(&self) -> usize {
        self.routes.len()
    }
}
