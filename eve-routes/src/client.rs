// This file is part of the product EVE Routes.
// SPDX-FileCopyrightText: 2026 EVE Routes contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use awc::Client;
use log::debug;
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::api::{ErrorBody, ListResponse, RouteRequest, RouteResult, RouteStep};
use crate::catalog::RouteCatalog;

const MAX_RESPONSE_BYTES: usize = 16 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    Transport(String),
    Rejected { status: u16, message: String },
    Decode(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(msg) => write!(f, "Request failed: {}", msg),
            ApiError::Rejected { status, message } => write!(f, "{} (HTTP {})", message, status),
            ApiError::Decode(msg) => write!(f, "Invalid response: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

/// The three routing endpoints, as seen by a caller.
#[allow(async_fn_in_trait)]
pub trait RoutesApi {
    async fn list_tags(&self) -> Result<Vec<String>, ApiError>;
    async fn list_systems(&self) -> Result<Vec<String>, ApiError>;
    async fn get_routes(&self, request: &RouteRequest) -> Result<RouteResult, ApiError>;
}

/// Answers from the catalog loaded in this process.
#[derive(Clone)]
pub struct LocalRoutesApi {
    catalog: Arc<RouteCatalog>,
}

impl LocalRoutesApi {
    pub fn new(catalog: Arc<RouteCatalog>) -> Self {
        Self { catalog }
    }
}

impl RoutesApi for LocalRoutesApi {
    async fn list_tags(&self) -> Result<Vec<String>, ApiError> {
        Ok(self.catalog.tag_names().to_vec())
    }

    async fn list_systems(&self) -> Result<Vec<String>, ApiError> {
        Ok(self.catalog.system_names())
    }

    async fn get_routes(&self, request: &RouteRequest) -> Result<RouteResult, ApiError> {
        match self.catalog.find_routes(request) {
            Ok(routes) => Ok(RouteResult {
                routes: routes
                    .iter()
                    .map(|route| route.iter().map(RouteStep::from).collect())
                    .collect(),
            }),
            Err(e) => Err(ApiError::Rejected {
                status: e.http_status(),
                message: e.to_string(),
            }),
        }
    }
}

/// Talks to a running server. `base_url` includes the base path, e.g.
/// `http://127.0.0.1:8080/eve-routes`.
pub struct HttpRoutesApi {
    client: Client,
    base_url: String,
}

impl HttpRoutesApi {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let client = Client::builder().timeout(timeout).finish();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, name: &str) -> String {
        format!("{}/api/{}", self.base_url, name)
    }

    async fn get_list(&self, name: &str) -> Result<Vec<String>, ApiError> {
        let url = self.endpoint(name);
        debug!("GET {}", url);
        let mut response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let body = response
            .body()
            .limit(MAX_RESPONSE_BYTES)
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let list: ListResponse = decode_response(response.status().as_u16(), &body)?;
        if !list.error.is_empty() {
            return Err(ApiError::Rejected {
                status: response.status().as_u16(),
                message: list.error,
            });
        }
        Ok(list.items)
    }
}

impl RoutesApi for HttpRoutesApi {
    async fn list_tags(&self) -> Result<Vec<String>, ApiError> {
        self.get_list("list_tags").await
    }

    async fn list_systems(&self) -> Result<Vec<String>, ApiError> {
        self.get_list("list_systems").await
    }

    async fn get_routes(&self, request: &RouteRequest) -> Result<RouteResult, ApiError> {
        let url = self.endpoint("get_routes");
        debug!("POST {}", url);
        let mut response = self
            .client
            .post(&url)
            .send_json(request)
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let body = response
            .body()
            .limit(MAX_RESPONSE_BYTES)
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        decode_response(response.status().as_u16(), &body)
    }
}

/// Decodes a success body as `T`, or turns an error status into `Rejected`
/// carrying the server's `Error` text when there is one.
pub fn decode_response<T: DeserializeOwned>(status: u16, body: &[u8]) -> Result<T, ApiError> {
    if (200..300).contains(&status) {
        return serde_json::from_slice(body).map_err(|e| ApiError::Decode(e.to_string()));
    }

    let message = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .map(|body| body.error)
        .filter(|error| !error.is_empty())
        .unwrap_or_else(|| String::from_utf8_lossy(body).trim().to_string());

    Err(ApiError::Rejected { status, message })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::test_fixtures::sample_contents;

    fn local_api() -> LocalRoutesApi {
        let catalog = RouteCatalog::from_contents(sample_contents(), 50).expect("catalog");
        LocalRoutesApi::new(Arc::new(catalog))
    }

    #[test]
    fn decodes_success_body() {
        let result: RouteResult = decode_response(
            200,
            br#"{"Routes": [[{"name": "Jita", "sec_status": "high"}]]}"#,
        )
        .expect("decoded");
        assert_eq!(result.routes[0][0].name, "Jita");
    }

    #[test]
    fn error_status_uses_error_field() {
        let err = decode_response::<RouteResult>(
            404,
            br#"{"Error": "could not find a viable route: x"}"#,
        )
        .expect_err("rejected");
        assert_eq!(
            err,
            ApiError::Rejected {
                status: 404,
                message: "could not find a viable route: x".to_string()
            }
        );
    }

    #[test]
    fn error_status_without_json_keeps_raw_text() {
        let err = decode_response::<RouteResult>(502, b"Bad Gateway\n").expect_err("rejected");
        assert_eq!(
            err,
            ApiError::Rejected {
                status: 502,
                message: "Bad Gateway".to_string()
            }
        );
    }

    #[test]
    fn malformed_success_body_is_a_decode_error() {
        let err = decode_response::<RouteResult>(200, b"<html>").expect_err("decode");
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[actix_web::test]
    async fn local_api_maps_catalog_results() {
        let api = local_api();
        let tags = api.list_tags().await.expect("tags");
        assert!(tags.contains(&"high".to_string()));

        let systems = api.list_systems().await.expect("systems");
        assert_eq!(systems.first().map(String::as_str), Some("Amamake"));

        let request = RouteRequest {
            from_systems: vec!["Jita".to_string()],
            to_tag: "Kurala".to_string(),
            ..RouteRequest::default()
        };
        let result = api.get_routes(&request).await.expect("routes");
        let names: Vec<&str> = result.routes[0].iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Jita", "Maurasi", "Tama"]);
        assert_eq!(result.routes[0][0].sec_status, "high");
    }

    #[actix_web::test]
    async fn local_api_reports_route_errors_with_status() {
        let request = RouteRequest {
            from_systems: vec!["Jita".to_string()],
            to_system: "Amamake".to_string(),
            ..RouteRequest::default()
        };
        match local_api().get_routes(&request).await {
            Err(ApiError::Rejected { status, message }) => {
                assert_eq!(status, 404);
                assert!(message.starts_with("could not find a viable route"));
            }
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[actix_web::test]
    async fn base_url_drops_trailing_slash() {
        let api = HttpRoutesApi::new("http://localhost:8080/eve-routes/", Duration::from_secs(1));
        assert_eq!(api.endpoint("list_tags"), "http://localhost:8080/eve-routes/api/list_tags");
    }
}
