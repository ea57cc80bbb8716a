// This file is part of the product EVE Routes.
// SPDX-FileCopyrightText: 2026 EVE Routes contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One solar system as stored in the system data file and returned by the API.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SystemData {
    #[serde(default)]
    pub id: usize,
    pub name: String,
    #[serde(default)]
    pub constellation: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub destinations: Vec<String>,
    #[serde(default, alias = "secstatus")]
    pub sec_status: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Top-level document of the system data file.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DataContents {
    #[serde(rename = "systemdata", alias = "SystemData", default)]
    pub system_data: Vec<SystemData>,
}

#[derive(Debug)]
pub enum DataError {
    Io(String),
    Parse(String),
    DuplicateSystem(String),
}

impl std::fmt::Display for DataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataError::Io(msg) => write!(f, "System data read error: {}", msg),
            DataError::Parse(msg) => write!(f, "System data parse error: {}", msg),
            DataError::DuplicateSystem(name) => {
                write!(f, "System data lists '{}' more than once", name)
            }
        }
    }
}

impl std::error::Error for DataError {}

impl DataContents {
    pub fn load(path: &Path) -> Result<Self, DataError> {
        let content = fs::read_to_string(path).map_err(|e| {
            DataError::Io(format!(
                "Failed to read system data '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_yaml(&content).map_err(|e| match e {
            DataError::Parse(msg) => DataError::Parse(format!("'{}': {}", path.display(), msg)),
            other => other,
        })
    }

    pub fn from_yaml(content: &str) -> Result<Self, DataError> {
        serde_yaml::from_str(content).map_err(|e| DataError::Parse(e.to_string()))
    }

    pub fn to_yaml(&self) -> Result<String, DataError> {
        serde_yaml::to_string(self).map_err(|e| DataError::Parse(e.to_string()))
    }
}

/// Security band of a system, derived from its true security value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecurityClass {
    High,
    Low,
    Null,
}

impl SecurityClass {
    pub fn classify(security: f64) -> Self {
        if security >= 0.5 {
            SecurityClass::High
        } else if security > 0.0 {
            SecurityClass::Low
        } else {
            SecurityClass::Null
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SecurityClass::High => "high",
            SecurityClass::Low => "low",
            SecurityClass::Null => "null",
        }
    }
}

/// Sec status given to systems lost to the Triglavian invasion.
pub const TRIG_SEC_STATUS: &str = "trig";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_uses_half_open_bands() {
        assert_eq!(SecurityClass::classify(1.0), SecurityClass::High);
        assert_eq!(SecurityClass::classify(0.5), SecurityClass::High);
        assert_eq!(SecurityClass::classify(0.49), SecurityClass::Low);
        assert_eq!(SecurityClass::classify(0.01), SecurityClass::Low);
        assert_eq!(SecurityClass::classify(0.0), SecurityClass::Null);
        assert_eq!(SecurityClass::classify(-0.3), SecurityClass::Null);
    }

    #[test]
    fn data_contents_accepts_legacy_keys() {
        let yaml = r#"
systemdata:
  - id: 0
    name: Jita
    constellation: Kimotoro
    region: The Forge
    destinations: [Perimeter]
    secstatus: high
    tags: [The Forge, Kimotoro, high]
"#;
        let contents = DataContents::from_yaml(yaml).expect("parse");
        assert_eq!(contents.system_data.len(), 1);
        assert_eq!(contents.system_data[0].sec_status, "high");
        assert_eq!(contents.system_data[0].destinations, vec!["Perimeter"]);
    }

    #[test]
    fn serializes_sec_status_with_underscore() {
        let system = SystemData {
            name: "Jita".to_string(),
            sec_status: "high".to_string(),
            ..SystemData::default()
        };
        let json = serde_json::to_value(&system).expect("json");
        assert_eq!(json["sec_status"], "high");
        assert_eq!(json["name"], "Jita");
    }

    #[test]
    fn from_yaml_reports_parse_errors() {
        let err = DataContents::from_yaml("systemdata: [").expect_err("invalid yaml");
        assert!(matches!(err, DataError::Parse(_)));
    }
}
