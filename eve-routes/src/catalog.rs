// This file is part of the product EVE Routes.
// SPDX-FileCopyrightText: 2026 EVE Routes contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use log::{debug, warn};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use crate::api::RouteRequest;
use crate::pathfinder::{
    Finder, Goal, MAX_PREFER_NOT_TAGS, NoRoute, SystemId, TagId, distinct_prefer_not,
};
use crate::system::{DataContents, DataError, SystemData};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    InvalidRequest(String),
    UnknownSystem(String),
    UnknownTag(String),
    NoRoute(NoRoute),
}

impl RouteError {
    /// Status code the HTTP API answers with for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            RouteError::NoRoute(_) => 404,
            _ => 400,
        }
    }
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteError::InvalidRequest(msg) => write!(f, "{}", msg),
            RouteError::UnknownSystem(name) => write!(f, "unknown system: {}", name),
            RouteError::UnknownTag(name) => write!(f, "unknown tag: {}", name),
            RouteError::NoRoute(inner) => {
                write!(f, "could not find a viable route: {}", inner.reason())
            }
        }
    }
}

impl std::error::Error for RouteError {}

impl From<NoRoute> for RouteError {
    fn from(error: NoRoute) -> Self {
        RouteError::NoRoute(error)
    }
}

/// Systems, tags and the gate graph, indexed for route lookups.
pub struct RouteCatalog {
    systems: Vec<SystemData>,
    system_ids: HashMap<String, SystemId>,
    tag_names: Vec<String>,
    tag_ids: HashMap<String, TagId>,
    finder: Finder,
}

impl RouteCatalog {
    pub fn load(path: &Path, max_routes: usize) -> Result<Self, DataError> {
        let contents = DataContents::load(path)?;
        Self::from_contents(contents, max_routes)
    }

    pub fn from_contents(contents: DataContents, max_routes: usize) -> Result<Self, DataError> {
        let mut systems = contents.system_data;
        let mut system_ids = HashMap::with_capacity(systems.len());
        let mut tag_names = Vec::new();
        let mut tag_ids: HashMap<String, TagId> = HashMap::new();

        // Names and tags first so destinations can be resolved afterwards.
        for (index, system) in systems.iter_mut().enumerate() {
            if system.id != index {
                debug!(
                    "Renumbering system {} from id {} to {}",
                    system.name, system.id, index
                );
                system.id = index;
            }

            if system_ids.insert(system.name.clone(), index).is_some() {
                return Err(DataError::DuplicateSystem(system.name.clone()));
            }

            for tag in &system.tags {
                if !tag_ids.contains_key(tag) {
                    tag_ids.insert(tag.clone(), tag_names.len());
                    tag_names.push(tag.clone());
                }
            }
        }

        let mut graph = Vec::with_capacity(systems.len());
        let mut graph_tags = Vec::with_capacity(systems.len());

        for system in &systems {
            let mut destinations = Vec::with_capacity(system.destinations.len());
            for destination in &system.destinations {
                match system_ids.get(destination) {
                    Some(&id) => destinations.push(id),
                    None => warn!(
                        "System {} has a gate to unknown system {}; ignoring it",
                        system.name, destination
                    ),
                }
            }
            graph.push(destinations);

            let mut tags: Vec<TagId> = system
                .tags
                .iter()
                .filter_map(|tag| tag_ids.get(tag).copied())
                .collect();
            tags.sort_unstable();
            tags.dedup();
            graph_tags.push(tags);
        }

        let finder = Finder::new(graph, graph_tags).with_max_routes(max_routes);

        Ok(Self {
            systems,
            system_ids,
            tag_names,
            tag_ids,
            finder,
        })
    }

    pub fn system_count(&self) -> usize {
        self.systems.len()
    }

    pub fn tag_count(&self) -> usize {
        self.tag_names.len()
    }

    /// Tag names in the order they were first seen in the data file.
    pub fn tag_names(&self) -> &[String] {
        &self.tag_names
    }

    pub fn system_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.systems.iter().map(|s| s.name.clone()).collect();
        names.sort();
        names
    }

    pub fn system(&self, name: &str) -> Option<&SystemData> {
        self.system_ids.get(name).map(|&id| &self.systems[id])
    }

    pub fn find_routes(&self, request: &RouteRequest) -> Result<Vec<Vec<SystemData>>, RouteError> {
        if request.from_systems.is_empty() {
            return Err(RouteError::InvalidRequest(
                "must specify at least one source system".to_string(),
            ));
        }

        if !request.to_system.is_empty() && !request.to_tag.is_empty() {
            return Err(RouteError::InvalidRequest(
                "cannot provide both target system and tag".to_string(),
            ));
        }

        if request.to_system.is_empty() && request.to_tag.is_empty() {
            return Err(RouteError::InvalidRequest(
                "must provide either target system or tag".to_string(),
            ));
        }

        let starts = self.resolve_systems(&request.from_systems)?;
        let avoid_systems = self.resolve_systems(&request.avoid_systems)?;
        let avoid_tags = self.resolve_tags(&request.avoid_tags)?;
        let prefer_not_tags = distinct_prefer_not(
            &avoid_tags,
            &self.resolve_tags(&request.prefer_not_tags)?,
        );
        if prefer_not_tags.len() > MAX_PREFER_NOT_TAGS {
            return Err(RouteError::InvalidRequest(format!(
                "at most {} distinct prefer-not tags are allowed",
                MAX_PREFER_NOT_TAGS
            )));
        }

        let goal = if request.to_system.is_empty() {
            Goal::Tag(self.resolve_tag(&request.to_tag)?)
        } else {
            Goal::System(self.resolve_system(&request.to_system)?)
        };

        let routes = self.finder.find_routes(
            &starts,
            goal,
            &avoid_systems,
            &avoid_tags,
            &prefer_not_tags,
        )?;

        Ok(routes
            .into_iter()
            .map(|route| route.into_iter().map(|id| self.systems[id].clone()).collect())
            .collect())
    }

    fn resolve_system(&self, name: &str) -> Result<SystemId, RouteError> {
        self.system_ids
            .get(name)
            .copied()
            .ok_or_else(|| RouteError::UnknownSystem(name.to_string()))
    }

    fn resolve_systems(&self, names: &[String]) -> Result<Vec<SystemId>, RouteError> {
        names.iter().map(|name| self.resolve_system(name)).collect()
    }

    fn resolve_tag(&self, name: &str) -> Result<TagId, RouteError> {
        self.tag_ids
            .get(name)
            .copied()
            .ok_or_else(|| RouteError::UnknownTag(name.to_string()))
    }

    fn resolve_tags(&self, names: &[String]) -> Result<Vec<TagId>, RouteError> {
        names.iter().map(|name| self.resolve_tag(name)).collect()
    }
}
