// This file is part of the product EVE Routes.
// SPDX-FileCopyrightText: 2026 EVE Routes contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

//! Page controller: catalog fetch, form hydration and the route
//! request/render cycle, driven against any [`RoutesApi`].

use futures_util::future::join;
use log::{debug, warn};

use super::form::FormState;
use super::query::QueryState;
use super::tag_order::TagCatalog;
use super::view::RouteListView;
use crate::api::{RouteRequest, RouteResult};
use crate::client::{ApiError, RoutesApi};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerPhase {
    Initializing,
    Ready,
}

/// System names from `list_systems`. Fetched alongside the tags but not
/// used by the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SystemCatalog {
    names: Vec<String>,
}

impl SystemCatalog {
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalogs {
    pub tags: TagCatalog,
    pub systems: SystemCatalog,
}

/// Fetches both catalogs concurrently; either failure fails the whole fetch.
pub async fn fetch_catalogs<A: RoutesApi>(api: &A) -> Result<Catalogs, ApiError> {
    let (tags, systems) = join(api.list_tags(), api.list_systems()).await;
    Ok(Catalogs {
        tags: TagCatalog::new(tags?),
        systems: SystemCatalog::new(systems?),
    })
}

/// What happened while the page was being initialized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitOutcome {
    pub query: QueryState,
    pub systems: SystemCatalog,
    pub catalog_error: Option<String>,
    pub auto_submitted: bool,
}

/// A route request that has been issued but not yet applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub sequence: u64,
    pub request: RouteRequest,
}

pub struct ViewController<A> {
    api: A,
    phase: ControllerPhase,
    form: FormState,
    results: RouteListView,
    last_issued: u64,
}

impl<A: RoutesApi> ViewController<A> {
    /// Fetches the catalogs, hydrates the form from `raw_query` and, when the
    /// query string is non-empty, submits it once.
    pub async fn initialize(api: A, raw_query: &str) -> (Self, InitOutcome) {
        let query = QueryState::parse(raw_query);
        let mut controller = Self {
            api,
            phase: ControllerPhase::Initializing,
            form: FormState::hydrate(&[], &query),
            results: RouteListView::default(),
            last_issued: 0,
        };
        let mut outcome = InitOutcome {
            query,
            ..InitOutcome::default()
        };

        match fetch_catalogs(&controller.api).await {
            Ok(catalogs) => {
                controller.form = FormState::hydrate(&catalogs.tags.sorted(), &outcome.query);
                outcome.systems = catalogs.systems;

                if !outcome.query.is_empty() {
                    let form = controller.form.clone();
                    controller.submit_route(&form).await;
                    outcome.auto_submitted = true;
                }
            }
            Err(e) => {
                warn!("Failed to load tag and system catalogs: {}", e);
                outcome.catalog_error = Some(format!("Could not load catalogs: {}", e));
            }
        }

        controller.phase = ControllerPhase::Ready;
        (controller, outcome)
    }

    pub fn phase(&self) -> ControllerPhase {
        self.phase
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn results(&self) -> &RouteListView {
        &self.results
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Issues one `get_routes` call for `form` and renders the reply.
    /// Returns whether the reply was applied.
    pub async fn submit_route(&mut self, form: &FormState) -> bool {
        let submission = self.begin_submission(form);
        let outcome = self.api.get_routes(&submission.request).await;
        self.finish_submission(submission.sequence, outcome)
    }

    /// Hides and clears the results and numbers the new request.
    pub fn begin_submission(&mut self, form: &FormState) -> Submission {
        self.last_issued += 1;
        self.results.hide();
        self.results.clear();
        Submission {
            sequence: self.last_issued,
            request: form.route_request(),
        }
    }

    /// Applies a reply unless a newer submission has been issued since.
    pub fn finish_submission(
        &mut self,
        sequence: u64,
        outcome: Result<RouteResult, ApiError>,
    ) -> bool {
        if sequence != self.last_issued {
            debug!(
                "Discarding reply to submission {}; submission {} is newer",
                sequence, self.last_issued
            );
            return false;
        }

        match outcome {
            Ok(result) => {
                debug!("Rendering {} route(s)", result.routes.len());
                self.results.show_routes(&result);
            }
            Err(e) => {
                debug!("Route request failed: {}", e);
                self.results.show_error(e.to_string());
            }
        }
        true
    }
}
