// This file is part of the product EVE Routes.
// SPDX-FileCopyrightText: 2026 EVE Routes contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

#![allow(dead_code)]

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use eve_routes::api;
use eve_routes::app_state::AppState;
use eve_routes::catalog::RouteCatalog;
use eve_routes::config::{Config, ValidatedConfig};
use eve_routes::error;
use eve_routes::frontend;
use eve_routes::runtime_paths::RuntimePaths;
use eve_routes::util::test_fixtures::TestFixtureRoot;
use std::sync::Arc;

pub struct TestHarness {
    pub fixture: TestFixtureRoot,
    pub config: Arc<ValidatedConfig>,
    pub runtime_paths: RuntimePaths,
    pub app_state: Arc<AppState>,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_base_path("/eve-routes")
    }

    pub fn with_base_path(base_path: &str) -> Self {
        let fixture = TestFixtureRoot::new_unique("integration").expect("fixture root");
        fixture.seed_runtime().expect("seed runtime");

        let mut config = Config::load(fixture.path()).expect("config");
        config.routes.base_path = base_path.to_string();
        let config = config.validate().expect("valid config");

        let runtime_paths =
            RuntimePaths::from_root(fixture.path(), &config).expect("runtime paths");
        let catalog = RouteCatalog::load(&runtime_paths.system_data_file, config.routes.max_routes)
            .expect("catalog");
        let app_state = Arc::new(AppState::new(&config.app.name, Arc::new(catalog)));

        Self {
            fixture,
            config: Arc::new(config),
            runtime_paths,
            app_state,
        }
    }

    pub fn prefix(&self) -> String {
        self.config.route_prefix().to_string()
    }

    pub fn app_bundle(&self) -> AppBundle {
        AppBundle {
            config: self.config.clone(),
            app_state: self.app_state.clone(),
        }
    }
}

#[derive(Clone)]
pub struct AppBundle {
    pub config: Arc<ValidatedConfig>,
    pub app_state: Arc<AppState>,
}

pub fn build_test_app(
    bundle: AppBundle,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let api_prefix = bundle.config.route_prefix().to_string();
    let page_prefix = api_prefix.clone();

    App::new()
        .app_data(web::Data::from(bundle.config))
        .app_data(web::Data::from(bundle.app_state))
        .configure(move |cfg| api::configure(cfg, &api_prefix))
        .configure(move |cfg| frontend::configure(cfg, &page_prefix))
        .default_service(web::route().to(error::not_found))
}

pub fn body_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
