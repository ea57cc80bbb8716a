// This file is part of the product EVE Routes.
// SPDX-FileCopyrightText: 2026 EVE Routes contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};

use crate::system::SystemData;

/// Body of `POST {base}/api/get_routes`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RouteRequest {
    #[serde(default, deserialize_with = "deserialize_string_list")]
    pub from_systems: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub to_system: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub to_tag: String,
    #[serde(default, deserialize_with = "deserialize_string_list")]
    pub avoid_systems: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_string_list")]
    pub avoid_tags: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_string_list")]
    pub prefer_not_tags: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ListResponse {
    #[serde(rename = "Error", default, skip_serializing_if = "String::is_empty")]
    pub error: String,
    #[serde(rename = "Items", default)]
    pub items: Vec<String>,
}

impl ListResponse {
    pub fn items(items: Vec<String>) -> Self {
        Self {
            error: String::new(),
            items,
        }
    }
}

/// Successful `get_routes` reply as written by the server.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RouteResponse {
    #[serde(rename = "Routes")]
    pub routes: Vec<Vec<SystemData>>,
}

/// `get_routes` reply as read by clients; steps keep only what is displayed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RouteResult {
    #[serde(rename = "Routes", default, deserialize_with = "deserialize_nullable")]
    pub routes: Vec<Vec<RouteStep>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RouteStep {
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub sec_status: String,
}

impl From<&SystemData> for RouteStep {
    fn from(system: &SystemData) -> Self {
        Self {
            name: system.name.clone(),
            sec_status: system.sec_status.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ErrorBody {
    #[serde(rename = "Error", default)]
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

fn deserialize_nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn deserialize_nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_nullable(deserializer)
}

/// Accepts a list of strings, a single string, or null.
fn deserialize_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct StringListVisitor;

    impl<'de> Visitor<'de> for StringListVisitor {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            formatter.write_str("a string, a list of strings or null")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value])
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: SeqAccess<'de>,
        {
            let mut values = Vec::new();
            while let Some(value) = seq.next_element::<String>()? {
                values.push(value);
            }
            Ok(values)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringListVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_request_tolerates_nulls_and_missing_fields() {
        let request: RouteRequest = serde_json::from_str(
            r#"{"from_systems": ["Jita"], "to_tag": null, "avoid_tags": null}"#,
        )
        .expect("request");
        assert_eq!(request.from_systems, vec!["Jita"]);
        assert_eq!(request.to_tag, "");
        assert!(request.avoid_tags.is_empty());
        assert!(request.prefer_not_tags.is_empty());
        assert_eq!(request.to_system, "");
    }

    #[test]
    fn route_request_accepts_single_string_lists() {
        let request: RouteRequest =
            serde_json::from_str(r#"{"from_systems": "Jita", "to_system": "Amarr"}"#)
                .expect("request");
        assert_eq!(request.from_systems, vec!["Jita"]);
    }

    #[test]
    fn route_result_reads_extra_step_fields() {
        let result: RouteResult = serde_json::from_str(
            r#"{"Routes": [[{"id": 3, "name": "Jita", "sec_status": "highsec", "tags": []}]]}"#,
        )
        .expect("result");
        assert_eq!(
            result.routes,
            vec![vec![RouteStep {
                name: "Jita".to_string(),
                sec_status: "highsec".to_string(),
            }]]
        );
    }

    #[test]
    fn route_result_treats_null_routes_as_empty() {
        let result: RouteResult =
            serde_json::from_str(r#"{"Error": "", "Routes": null}"#).expect("result");
        assert!(result.routes.is_empty());
    }

    #[test]
    fn list_response_omits_empty_error() {
        let json = serde_json::to_value(ListResponse::items(vec!["a".to_string()])).expect("json");
        assert!(json.get("Error").is_none());
        assert_eq!(json["Items"][0], "a");
    }
}
