// This file is part of the product EVE Routes.
// SPDX-FileCopyrightText: 2026 EVE Routes contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

mod common;

use actix_web::http::StatusCode;
use actix_web::http::header::CONTENT_TYPE;
use actix_web::test;
use serde_json::{Value, json};

async fn post_routes(harness: &common::TestHarness, body: Value) -> (StatusCode, Value) {
    let app = test::init_service(common::build_test_app(harness.app_bundle())).await;
    let req = test::TestRequest::post()
        .uri("/eve-routes/api/get_routes")
        .set_json(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    let status = resp.status();
    let body: Value = serde_json::from_slice(&test::read_body(resp).await).expect("json body");
    (status, body)
}

fn route_names(body: &Value) -> Vec<Vec<String>> {
    body["Routes"]
        .as_array()
        .expect("routes")
        .iter()
        .map(|route| {
            route
                .as_array()
                .expect("route")
                .iter()
                .map(|step| step["name"].as_str().expect("name").to_string())
                .collect()
        })
        .collect()
}

#[actix_web::test]
async fn list_tags_returns_items() {
    let harness = common::TestHarness::new();
    let app = test::init_service(common::build_test_app(harness.app_bundle())).await;

    let req = test::TestRequest::get()
        .uri("/eve-routes/api/list_tags")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let content_type = resp
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");
    assert!(content_type.contains("application/json"));

    let body: Value = serde_json::from_slice(&test::read_body(resp).await).expect("json");
    let items: Vec<&str> = body["Items"]
        .as_array()
        .expect("items")
        .iter()
        .filter_map(Value::as_str)
        .collect();
    for tag in ["high", "low", "The Forge", "Kurala", "eden-minor", "trig-minor"] {
        assert!(items.contains(&tag), "missing tag {}", tag);
    }
    assert!(body.get("Error").is_none());
}

#[actix_web::test]
async fn list_systems_is_sorted() {
    let harness = common::TestHarness::new();
    let app = test::init_service(common::build_test_app(harness.app_bundle())).await;

    let req = test::TestRequest::get()
        .uri("/eve-routes/api/list_systems")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let items: Vec<String> = serde_json::from_value(body["Items"].clone()).expect("items");
    assert_eq!(items.len(), 8);
    let mut sorted = items.clone();
    sorted.sort();
    assert_eq!(items, sorted);
}

#[actix_web::test]
async fn get_routes_returns_all_shortest_routes() {
    let harness = common::TestHarness::new();
    let (status, body) = post_routes(
        &harness,
        json!({"from_systems": ["Jita"], "to_system": "Urlen"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        route_names(&body),
        vec![
            vec!["Jita", "Perimeter", "Urlen"],
            vec!["Jita", "Niyabainen", "Urlen"],
        ]
    );
    let first_step = &body["Routes"][0][0];
    assert_eq!(first_step["sec_status"], "high");
    assert_eq!(first_step["region"], "The Forge");
}

#[actix_web::test]
async fn get_routes_honours_avoidance() {
    let harness = common::TestHarness::new();
    let (status, body) = post_routes(
        &harness,
        json!({
            "from_systems": ["Jita"],
            "to_system": "Urlen",
            "avoid_systems": ["Perimeter"],
            "avoid_tags": null,
            "prefer_not_tags": []
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(route_names(&body), vec![vec!["Jita", "Niyabainen", "Urlen"]]);
}

#[actix_web::test]
async fn get_routes_relaxes_prefer_not_tags() {
    let harness = common::TestHarness::new();
    let (status, body) = post_routes(
        &harness,
        json!({
            "from_systems": ["Jita"],
            "to_system": "Tama",
            "avoid_systems": ["Perimeter"],
            "prefer_not_tags": ["trig-minor", "eden-minor"]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(route_names(&body), vec![vec!["Jita", "Maurasi", "Tama"]]);
}

#[actix_web::test]
async fn validation_errors_are_bad_requests() {
    let harness = common::TestHarness::new();
    let cases = [
        (json!({"to_system": "Urlen"}), "must specify at least one source system"),
        (
            json!({"from_systems": ["Jita"], "to_system": "Urlen", "to_tag": "low"}),
            "cannot provide both target system and tag",
        ),
        (
            json!({"from_systems": ["Jita"]}),
            "must provide either target system or tag",
        ),
        (
            json!({"from_systems": ["Nowhere"], "to_system": "Urlen"}),
            "unknown system: Nowhere",
        ),
        (
            json!({"from_systems": ["Jita"], "to_tag": "made-up"}),
            "unknown tag: made-up",
        ),
    ];

    for (request, message) in cases {
        let (status, body) = post_routes(&harness, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", message);
        assert_eq!(body["Error"], message);
    }
}

#[actix_web::test]
async fn unreachable_destination_is_not_found() {
    let harness = common::TestHarness::new();
    let (status, body) = post_routes(
        &harness,
        json!({"from_systems": ["Jita"], "to_system": "Amamake"}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(
        body["Error"]
            .as_str()
            .expect("error")
            .starts_with("could not find a viable route")
    );
}

#[actix_web::test]
async fn malformed_json_is_a_bad_request() {
    let harness = common::TestHarness::new();
    let app = test::init_service(common::build_test_app(harness.app_bundle())).await;

    let req = test::TestRequest::post()
        .uri("/eve-routes/api/get_routes")
        .insert_header((CONTENT_TYPE, "application/json"))
        .set_payload("{\"from_systems\": [")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_slice(&test::read_body(resp).await).expect("json");
    assert!(body["Error"].as_str().is_some_and(|e| !e.is_empty()));
}

#[actix_web::test]
async fn api_is_mounted_at_root_base_path() {
    let harness = common::TestHarness::with_base_path("/");
    let app = test::init_service(common::build_test_app(harness.app_bundle())).await;

    let req = test::TestRequest::get().uri("/api/list_tags").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}
