// This file is part of the product EVE Routes.
// SPDX-FileCopyrightText: 2026 EVE Routes contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::config::{Config, ConfigError, ValidatedConfig};
use crate::system::DataContents;

pub const SAMPLE_CONFIG_YAML: &str = r#"app:
  name: "EVE Routes"
  description: "Route planner"
server:
  host: "127.0.0.1"
  port: 5466
  workers: 1
logging:
  level: "info"
"#;

/// Small gate graph used across tests.
///
/// ```text
/// Jita - Perimeter  - Urlen - Sirppala - Tama
///    \ - Niyabainen -/                  /
///     \- Maurasi ----------------------/
/// Amamake (isolated)
/// ```
pub const SAMPLE_SYSTEM_DATA_YAML: &str = r#"systemdata:
  - id: 0
    name: Jita
    constellation: Kimotoro
    region: The Forge
    destinations: [Perimeter, Niyabainen, Maurasi]
    sec_status: high
    tags: [The Forge, Kimotoro, high]
  - id: 1
    name: Perimeter
    constellation: Kimotoro
    region: The Forge
    destinations: [Jita, Urlen]
    sec_status: high
    tags: [The Forge, Kimotoro, high]
  - id: 2
    name: Niyabainen
    constellation: Kimotoro
    region: The Forge
    destinations: [Jita, Urlen]
    sec_status: high
    tags: [The Forge, Kimotoro, high, eden-minor]
  - id: 3
    name: Urlen
    constellation: Kimotoro
    region: The Forge
    destinations: [Perimeter, Niyabainen, Sirppala]
    sec_status: high
    tags: [The Forge, Kimotoro, high]
  - id: 4
    name: Sirppala
    constellation: Otanuomi
    region: The Forge
    destinations: [Urlen, Tama]
    sec_status: low
    tags: [The Forge, Otanuomi, low]
  - id: 5
    name: Maurasi
    constellation: Kimotoro
    region: The Forge
    destinations: [Jita, Tama]
    sec_status: low
    tags: [The Forge, Kimotoro, low, trig-minor]
  - id: 6
    name: Tama
    constellation: Kurala
    region: The Citadel
    destinations: [Sirppala, Maurasi]
    sec_status: low
    tags: [The Citadel, Kurala, low]
  - id: 7
    name: Amamake
    constellation: Hed
    region: Heimatar
    destinations: []
    sec_status: low
    tags: [Heimatar, Hed, low]
"#;

pub fn sample_contents() -> DataContents {
    match DataContents::from_yaml(SAMPLE_SYSTEM_DATA_YAML) {
        Ok(contents) => contents,
        Err(error) => panic!("sample system data must parse: {}", error),
    }
}

/// Throwaway runtime root under `target/test-fixtures`, removed on drop.
#[derive(Debug)]
pub struct TestFixtureRoot {
    path: PathBuf,
}

impl TestFixtureRoot {
    pub fn new_fixed(name: &str) -> std::io::Result<Self> {
        let root = fixtures_root().join(name);
        if root.exists() {
            fs::remove_dir_all(&root)?;
        }
        fs::create_dir_all(&root)?;
        Ok(Self { path: root })
    }

    pub fn new_unique(prefix: &str) -> std::io::Result<Self> {
        let name = format!("{}-{}", prefix, Uuid::new_v4());
        Self::new_fixed(&name)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the sample `config.yaml` and `systems.yaml`.
    pub fn seed_runtime(&self) -> std::io::Result<()> {
        fs::write(self.path.join("config.yaml"), SAMPLE_CONFIG_YAML)?;
        fs::write(self.path.join("systems.yaml"), SAMPLE_SYSTEM_DATA_YAML)?;
        Ok(())
    }

    pub fn validated_config(&self) -> Result<ValidatedConfig, ConfigError> {
        Config::load_and_validate(&self.path)
    }
}

impl Drop for TestFixtureRoot {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

fn fixtures_root() -> PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let repo_root = manifest_dir.parent().unwrap_or(&manifest_dir);
    repo_root.join("target").join("test-fixtures")
}
