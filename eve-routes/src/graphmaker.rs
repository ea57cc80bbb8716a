// This file is part of the product EVE Routes.
// SPDX-FileCopyrightText: 2026 EVE Routes contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

//! Builds the system data file from an unpacked static data export.
//!
//! The export holds one `solarsystem.staticdata` YAML file per system at
//! `<region>/<constellation>/<system>/solarsystem.staticdata`. Gates refer to
//! their destination by gate id, so destinations are resolved to system
//! names once every system has been read.

use log::{debug, info};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::system::{DataContents, SecurityClass, SystemData, TRIG_SEC_STATUS};

pub const SYSTEM_FILE_NAME: &str = "solarsystem.staticdata";

const TRIG_FINAL_FILE: &str = "trig-final-lim.txt";
const TRIG_MINOR_FILE: &str = "trig-minor-victory.txt";
const EDEN_MINOR_FILE: &str = "edencom-minor-victory.txt";
const EDEN_FORTRESS_FILE: &str = "edencom-fortress.txt";

#[derive(Debug)]
pub enum GraphBuildError {
    Io(String),
    Parse(String),
    Layout(String),
}

impl fmt::Display for GraphBuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphBuildError::Io(msg) => write!(f, "Graph build I/O error: {}", msg),
            GraphBuildError::Parse(msg) => write!(f, "Graph build parse error: {}", msg),
            GraphBuildError::Layout(msg) => write!(f, "Unexpected source layout: {}", msg),
        }
    }
}

impl std::error::Error for GraphBuildError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphBuildOptions {
    pub source_dir: PathBuf,
    pub data_dir: PathBuf,
    pub out_file: PathBuf,
}

#[derive(Debug, Deserialize)]
struct RawSystem {
    #[serde(default)]
    security: f64,
    #[serde(default)]
    stargates: serde_yaml::Mapping,
}

/// Systems with a special faction-warfare outcome, one name per line.
#[derive(Debug, Clone, Default)]
pub struct SpecialSystems {
    pub trig_final: HashSet<String>,
    pub trig_minor: HashSet<String>,
    pub eden_minor: HashSet<String>,
    pub eden_fortress: HashSet<String>,
}

impl SpecialSystems {
    pub fn load(data_dir: &Path) -> Result<Self, GraphBuildError> {
        Ok(Self {
            trig_final: load_name_list(&data_dir.join(TRIG_FINAL_FILE))?,
            trig_minor: load_name_list(&data_dir.join(TRIG_MINOR_FILE))?,
            eden_minor: load_name_list(&data_dir.join(EDEN_MINOR_FILE))?,
            eden_fortress: load_name_list(&data_dir.join(EDEN_FORTRESS_FILE))?,
        })
    }

    /// Extra tag for `system`; at most one applies, checked in this order.
    fn special_tag(&self, system: &str) -> Option<&'static str> {
        if self.trig_final.contains(system) {
            Some("trig-final")
        } else if self.trig_minor.contains(system) {
            Some("trig-minor")
        } else if self.eden_minor.contains(system) {
            Some("eden-minor")
        } else if self.eden_fortress.contains(system) {
            Some("eden-fortress")
        } else {
            None
        }
    }
}

fn load_name_list(path: &Path) -> Result<HashSet<String>, GraphBuildError> {
    let content = fs::read_to_string(path)
        .map_err(|e| GraphBuildError::Io(format!("Failed to read '{}': {}", path.display(), e)))?;
    Ok(parse_name_list(&content))
}

pub fn parse_name_list(content: &str) -> HashSet<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Reads the export and the special system lists, then writes the YAML file.
pub fn build_graph(options: &GraphBuildOptions) -> Result<DataContents, GraphBuildError> {
    let special = SpecialSystems::load(&options.data_dir)?;
    let contents = build_contents(&options.source_dir, &special)?;

    let yaml = serde_yaml::to_string(&contents)
        .map_err(|e| GraphBuildError::Parse(format!("Failed to encode system data: {}", e)))?;
    fs::write(&options.out_file, yaml).map_err(|e| {
        GraphBuildError::Io(format!(
            "Failed to write '{}': {}",
            options.out_file.display(),
            e
        ))
    })?;

    info!(
        "Wrote {} systems to {}",
        contents.system_data.len(),
        options.out_file.display()
    );
    Ok(contents)
}

struct ParsedSystem {
    data: SystemData,
    gate_ids: Vec<String>,
    destination_gates: Vec<String>,
}

pub fn build_contents(
    source_dir: &Path,
    special: &SpecialSystems,
) -> Result<DataContents, GraphBuildError> {
    let mut parsed = Vec::new();

    for entry in WalkDir::new(source_dir).sort_by_file_name() {
        let entry = entry.map_err(|e| GraphBuildError::Io(e.to_string()))?;
        if !entry.file_type().is_file() || entry.file_name() != SYSTEM_FILE_NAME {
            continue;
        }
        parsed.push(parse_system_file(source_dir, entry.path(), special)?);
    }

    parsed.sort_by(|a, b| {
        (&a.data.region, &a.data.constellation, &a.data.name).cmp(&(
            &b.data.region,
            &b.data.constellation,
            &b.data.name,
        ))
    });

    let gate_owner: HashMap<&str, &str> = parsed
        .iter()
        .flat_map(|system| {
            system
                .gate_ids
                .iter()
                .map(move |gate| (gate.as_str(), system.data.name.as_str()))
        })
        .collect();

    let resolved: Vec<Vec<String>> = parsed
        .iter()
        .map(|system| {
            system
                .destination_gates
                .iter()
                .filter_map(|gate| gate_owner.get(gate.as_str()).map(|name| name.to_string()))
                .collect()
        })
        .collect();

    let system_data = parsed
        .into_iter()
        .zip(resolved)
        .enumerate()
        .map(|(id, (system, destinations))| SystemData {
            id,
            destinations,
            ..system.data
        })
        .collect();

    Ok(DataContents { system_data })
}

fn parse_system_file(
    source_dir: &Path,
    path: &Path,
    special: &SpecialSystems,
) -> Result<ParsedSystem, GraphBuildError> {
    let relative = path.strip_prefix(source_dir).map_err(|_| {
        GraphBuildError::Layout(format!(
            "'{}' is outside the source directory",
            path.display()
        ))
    })?;
    let parts: Vec<String> = relative
        .iter()
        .map(|part| part.to_string_lossy().into_owned())
        .collect();
    let [region, constellation, name, _file] = parts.as_slice() else {
        return Err(GraphBuildError::Layout(format!(
            "expected <region>/<constellation>/<system>/{}, got '{}'",
            SYSTEM_FILE_NAME,
            relative.display()
        )));
    };

    let content = fs::read_to_string(path)
        .map_err(|e| GraphBuildError::Io(format!("Failed to read '{}': {}", path.display(), e)))?;
    let raw: RawSystem = serde_yaml::from_str(&content)
        .map_err(|e| GraphBuildError::Parse(format!("'{}': {}", path.display(), e)))?;

    let security = SecurityClass::classify(raw.security).as_str();
    let mut sec_status = security.to_string();
    let mut tags = vec![region.clone(), constellation.clone(), security.to_string()];
    let special_tag = special.special_tag(name);
    if let Some(tag) = special_tag {
        tags.push(tag.to_string());
    }

    let mut gate_ids = Vec::new();
    let mut destination_gates = Vec::new();
    if special_tag == Some("trig-final") {
        // Final liminality systems have no usable gates.
        sec_status = TRIG_SEC_STATUS.to_string();
    } else {
        for (gate, stargate) in &raw.stargates {
            let Some(gate) = yaml_scalar(gate) else {
                continue;
            };
            if let Some(destination) = stargate.get("destination").and_then(yaml_scalar) {
                destination_gates.push(destination);
            }
            gate_ids.push(gate);
        }
    }

    debug!("Parsed {}/{}/{}: {} gates", region, constellation, name, gate_ids.len());

    Ok(ParsedSystem {
        data: SystemData {
            id: 0,
            name: name.clone(),
            constellation: constellation.clone(),
            region: region.clone(),
            destinations: Vec::new(),
            sec_status,
            tags,
        },
        gate_ids,
        destination_gates,
    })
}

/// Gate ids appear as integers or strings depending on the export.
fn yaml_scalar(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
