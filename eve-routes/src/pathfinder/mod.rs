// This file is part of the product EVE Routes.
// SPDX-FileCopyrightText: 2026 EVE Routes contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

//! Shortest-route search over the gate graph.
//!
//! Routes are found breadth-first and every route of minimal length is
//! returned, not just one. Prefer-not tags act like avoided tags until no
//! route exists; then they are dropped as few at a time as possible.

use log::debug;
use std::collections::HashSet;
use std::fmt;

mod combinations;

pub use combinations::combinations;

pub type SystemId = usize;
pub type TagId = usize;
pub type Route = Vec<SystemId>;

pub const DEFAULT_MAX_ROUTES: usize = 50;

/// Upper bound on distinct prefer-not tags; relaxation tries every subset.
pub const MAX_PREFER_NOT_TAGS: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Goal {
    System(SystemId),
    Tag(TagId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoRoute {
    reason: &'static str,
}

impl NoRoute {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }

    pub fn reason(&self) -> &'static str {
        self.reason
    }
}

impl fmt::Display for NoRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no route: {}", self.reason)
    }
}

impl std::error::Error for NoRoute {}

pub struct Finder {
    graph: Vec<Vec<SystemId>>,
    tags: Vec<Vec<TagId>>,
    max_routes: usize,
}

impl Finder {
    /// `graph[i]` lists the systems reachable from system `i` in one jump and
    /// `tags[i]` the tags carried by system `i`.
    pub fn new(graph: Vec<Vec<SystemId>>, tags: Vec<Vec<TagId>>) -> Self {
        Self {
            graph,
            tags,
            max_routes: DEFAULT_MAX_ROUTES,
        }
    }

    pub fn with_max_routes(mut self, max_routes: usize) -> Self {
        self.max_routes = max_routes.max(1);
        self
    }

    pub fn len(&self) -> usize {
        self.graph.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }

    fn has_tag(&self, system: SystemId, tag: TagId) -> bool {
        self.tags
            .get(system)
            .is_some_and(|tags| tags.contains(&tag))
    }

    fn has_any_tag(&self, system: SystemId, tags: &[TagId]) -> bool {
        tags.iter().any(|&tag| self.has_tag(system, tag))
    }

    pub fn find_routes(
        &self,
        starts: &[SystemId],
        goal: Goal,
        avoid_systems: &[SystemId],
        avoid_tags: &[TagId],
        prefer_not_tags: &[TagId],
    ) -> Result<Vec<Route>, NoRoute> {
        let avoid: HashSet<SystemId> = avoid_systems.iter().copied().collect();
        let prefer_not_tags = distinct_prefer_not(avoid_tags, prefer_not_tags);
        let prefer_not_tags = prefer_not_tags.as_slice();

        let strict_tags: Vec<TagId> = avoid_tags
            .iter()
            .chain(prefer_not_tags.iter())
            .copied()
            .collect();
        let strict_error = match self.shortest_from_any(starts, goal, &avoid, &strict_tags) {
            Ok(routes) => return Ok(routes),
            Err(error) => error,
        };

        let prefer_count = prefer_not_tags.len();
        if prefer_count == 0 {
            return Err(strict_error);
        }

        // Avoiding more tags never opens a route, so if dropping every
        // prefer-not tag fails, no combination will succeed.
        let fully_relaxed = self.shortest_from_any(starts, goal, &avoid, avoid_tags);
        if fully_relaxed.is_err() {
            return Err(NoRoute::new("could not find route"));
        }
        if prefer_count > MAX_PREFER_NOT_TAGS {
            return Err(NoRoute::new("too many prefer-not tags"));
        }

        for dropped in 1..=prefer_count {
            let mut level = RouteSet::default();

            for kept in combinations(prefer_count, prefer_count - dropped) {
                let mut tags = Vec::with_capacity(avoid_tags.len() + kept.len());
                tags.extend_from_slice(avoid_tags);
                tags.extend(kept.iter().map(|&index| prefer_not_tags[index]));

                if let Ok(routes) = self.shortest_from_any(starts, goal, &avoid, &tags) {
                    level.offer(routes);
                }
            }

            if !level.is_empty() {
                debug!(
                    "Relaxed {} of {} prefer-not tags to find a route",
                    dropped, prefer_count
                );
                return Ok(level.into_routes(self.max_routes));
            }
        }

        Err(NoRoute::new("could not find route"))
    }

    /// Shortest routes from whichever start gets to the goal in the fewest jumps.
    fn shortest_from_any(
        &self,
        starts: &[SystemId],
        goal: Goal,
        avoid: &HashSet<SystemId>,
        avoid_tags: &[TagId],
    ) -> Result<Vec<Route>, NoRoute> {
        let mut found = RouteSet::default();
        let mut last_error = NoRoute::new("no source systems");

        for &start in starts {
            match self.shortest_routes(start, goal, avoid, avoid_tags) {
                Ok(routes) => found.offer(routes),
                Err(error) => last_error = error,
            }
        }

        if found.is_empty() {
            Err(last_error)
        } else {
            Ok(found.into_routes(self.max_routes))
        }
    }

    fn shortest_routes(
        &self,
        start: SystemId,
        goal: Goal,
        avoid: &HashSet<SystemId>,
        avoid_tags: &[TagId],
    ) -> Result<Vec<Route>, NoRoute> {
        let count = self.graph.len();
        if start >= count {
            return Err(NoRoute::new("unknown start system"));
        }

        match goal {
            Goal::System(end) if end == start => {
                return Err(NoRoute::new("start and end are identical"));
            }
            Goal::Tag(tag) if self.has_tag(start, tag) => {
                return Err(NoRoute::new("start has the tag"));
            }
            Goal::Tag(tag) if avoid_tags.contains(&tag) => {
                return Err(NoRoute::new("end tag is avoided"));
            }
            _ => {}
        }

        let blocked =
            |system: SystemId| avoid.contains(&system) || self.has_any_tag(system, avoid_tags);

        let mut depth: Vec<Option<usize>> = vec![None; count];
        let mut parents: Vec<Vec<SystemId>> = vec![Vec::new(); count];
        depth[start] = Some(0);

        let mut frontier = vec![start];
        let mut level = 0;

        while !frontier.is_empty() {
            let mut next = Vec::new();
            let mut reached = Vec::new();

            for &current in &frontier {
                for &neighbor in &self.graph[current] {
                    if neighbor == start || neighbor >= count {
                        continue;
                    }

                    // An explicit destination is always enterable.
                    let is_goal = match goal {
                        Goal::System(end) => neighbor == end,
                        Goal::Tag(tag) => self.has_tag(neighbor, tag) && !blocked(neighbor),
                    };
                    if !is_goal && blocked(neighbor) {
                        continue;
                    }

                    match depth[neighbor] {
                        None => {
                            depth[neighbor] = Some(level + 1);
                            parents[neighbor].push(current);
                            if is_goal {
                                reached.push(neighbor);
                            } else {
                                next.push(neighbor);
                            }
                        }
                        Some(found) if found == level + 1 => {
                            if !parents[neighbor].contains(&current) {
                                parents[neighbor].push(current);
                            }
                        }
                        Some(_) => {}
                    }
                }
            }

            if !reached.is_empty() {
                return Ok(self.collect_routes(start, &reached, &parents));
            }

            frontier = next;
            level += 1;
        }

        Err(NoRoute::new("route impossible"))
    }

    fn collect_routes(
        &self,
        start: SystemId,
        reached: &[SystemId],
        parents: &[Vec<SystemId>],
    ) -> Vec<Route> {
        let mut routes = Vec::new();

        for &goal in reached {
            // Partial routes are built backwards from the goal.
            let mut stack: Vec<Route> = vec![vec![goal]];
            while let Some(partial) = stack.pop() {
                if routes.len() >= self.max_routes {
                    return routes;
                }

                let Some(&last) = partial.last() else {
                    continue;
                };

                if last == start {
                    let mut route = partial;
                    route.reverse();
                    routes.push(route);
                    continue;
                }

                for &parent in parents[last].iter().rev() {
                    let mut extended = partial.clone();
                    extended.push(parent);
                    stack.push(extended);
                }
            }
        }

        routes
    }
}

/// Routes of the shortest length seen so far.
#[derive(Default)]
struct RouteSet {
    length: Option<usize>,
    routes: Vec<Route>,
}

impl RouteSet {
    fn offer(&mut self, routes: Vec<Route>) {
        let Some(length) = routes.first().map(Vec::len) else {
            return;
        };

        match self.length {
            Some(current) if current < length => {}
            Some(current) if current == length => self.routes.extend(routes),
            _ => {
                self.length = Some(length);
                self.routes = routes;
            }
        }
    }

    fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    fn into_routes(self, max_routes: usize) -> Vec<Route> {
        let mut seen = HashSet::new();
        self.routes
            .into_iter()
            .filter(|route| seen.insert(route.clone()))
            .take(max_routes)
            .collect()
    }
}

/// Prefer-not tags in request order without repeats or hard-avoided tags.
pub fn distinct_prefer_not(avoid_tags: &[TagId], prefer_not_tags: &[TagId]) -> Vec<TagId> {
    let mut seen: HashSet<TagId> = avoid_tags.iter().copied().collect();
    prefer_not_tags
        .iter()
        .copied()
        .filter(|tag| seen.insert(*tag))
        .collect()
}
