// This file is part of the product EVE Routes.
// SPDX-FileCopyrightText: 2026 EVE Routes contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::config::{ConfigError, ValidatedConfig};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct RuntimePaths {
    pub root: PathBuf,
    pub config_file: PathBuf,
    pub system_data_file: PathBuf,
}

impl RuntimePaths {
    pub fn from_root(root: &Path, config: &ValidatedConfig) -> Result<Self, ConfigError> {
        let root_path = if root.as_os_str().is_empty() {
            PathBuf::from(".")
        } else {
            root.to_path_buf()
        };

        let root_canonical = root_path.canonicalize().map_err(|e| {
            ConfigError::ValidationError(format!(
                "Failed to canonicalize runtime root '{}': {}",
                root_path.display(),
                e
            ))
        })?;

        let config_file = root_canonical.join("config.yaml");
        let system_data_file = resolve_under(&root_canonical, &config.routes.system_data_file);

        if !system_data_file.is_file() {
            return Err(ConfigError::ValidationError(format!(
                "System data file '{}' does not exist",
                system_data_file.display()
            )));
        }

        Ok(Self {
            root: root_canonical,
            config_file,
            system_data_file,
        })
    }
}

fn resolve_under(root: &Path, value: &str) -> PathBuf {
    let candidate = PathBuf::from(value);
    if candidate.is_absolute() {
        candidate
    } else {
        root.join(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::test_fixtures::TestFixtureRoot;

    #[test]
    fn resolves_data_file_relative_to_root() {
        let fixture = TestFixtureRoot::new_unique("paths-relative").expect("fixture");
        fixture.seed_runtime().expect("seed");
        let config = fixture.validated_config().expect("config");

        let paths = RuntimePaths::from_root(fixture.path(), &config).expect("paths");
        assert!(paths.system_data_file.ends_with("systems.yaml"));
        assert!(paths.system_data_file.starts_with(&paths.root));
        assert!(paths.config_file.ends_with("config.yaml"));
    }

    #[test]
    fn missing_data_file_is_rejected() {
        let fixture = TestFixtureRoot::new_unique("paths-missing").expect("fixture");
        fixture.seed_runtime().expect("seed");
        let mut config = fixture.validated_config().expect("config");
        config.routes.system_data_file = "absent.yaml".to_string();

        let err = RuntimePaths::from_root(fixture.path(), &config).expect_err("missing");
        assert!(err.to_string().contains("absent.yaml"));
    }

    #[test]
    fn absolute_data_file_is_kept() {
        assert_eq!(
            resolve_under(Path::new("/srv/routes"), "/data/systems.yaml"),
            PathBuf::from("/data/systems.yaml")
        );
        assert_eq!(
            resolve_under(Path::new("/srv/routes"), "systems.yaml"),
            PathBuf::from("/srv/routes/systems.yaml")
        );
    }
}
