// This file is part of the product EVE Routes.
// SPDX-FileCopyrightText: 2026 EVE Routes contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use serde::Serialize;

use super::query::QueryState;
use crate::api::RouteRequest;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagOption {
    pub value: String,
    pub selected: bool,
}

/// An HTML `<select>`: options in display order plus their selection flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagSelect {
    pub multiple: bool,
    pub options: Vec<TagOption>,
}

impl TagSelect {
    /// Single select with a leading empty option meaning "no tag". The empty
    /// option is selected when `selected` matches none of `tags`.
    pub fn single(tags: &[String], selected: Option<&str>) -> Self {
        let mut options = Vec::with_capacity(tags.len() + 1);
        options.push(TagOption {
            value: String::new(),
            selected: false,
        });
        let mut any_selected = false;
        for tag in tags {
            let is_selected = !any_selected && selected == Some(tag.as_str());
            any_selected |= is_selected;
            options.push(TagOption {
                value: tag.clone(),
                selected: is_selected,
            });
        }
        options[0].selected = !any_selected;
        Self {
            multiple: false,
            options,
        }
    }

    pub fn multiple(tags: &[String], selected: &[String]) -> Self {
        let options = tags
            .iter()
            .map(|tag| TagOption {
                value: tag.clone(),
                selected: selected.contains(tag),
            })
            .collect();
        Self {
            multiple: true,
            options,
        }
    }

    /// Selected non-empty values in option order.
    pub fn selected_values(&self) -> Vec<String> {
        self.options
            .iter()
            .filter(|option| option.selected && !option.value.is_empty())
            .map(|option| option.value.clone())
            .collect()
    }

    /// First selected value, or empty when nothing (or the empty option) is selected.
    pub fn selected_value(&self) -> String {
        self.options
            .iter()
            .find(|option| option.selected)
            .map(|option| option.value.clone())
            .unwrap_or_default()
    }

    /// Marks `value` selected. A single select drops its previous selection.
    /// Returns false when no option carries `value`.
    pub fn select(&mut self, value: &str) -> bool {
        if !self.options.iter().any(|option| option.value == value) {
            return false;
        }
        for option in &mut self.options {
            if option.value == value {
                option.selected = true;
            } else if !self.multiple {
                option.selected = false;
            }
        }
        true
    }

    pub fn deselect(&mut self, value: &str) {
        for option in self.options.iter_mut().filter(|o| o.value == value) {
            option.selected = false;
        }
        if !self.multiple
            && !self.options.iter().any(|o| o.selected)
            && let Some(none) = self.options.iter_mut().find(|o| o.value.is_empty())
        {
            none.selected = true;
        }
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

/// Current values of the route form controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormState {
    pub from_systems: String,
    pub to_system: String,
    pub avoid_systems: String,
    pub to_tag: TagSelect,
    pub avoid_tags: TagSelect,
    pub prefer_not_tags: TagSelect,
}

impl FormState {
    /// Populates the controls from the query string. `sorted_tags` must
    /// already be in display order; it is walked once per select.
    pub fn hydrate(sorted_tags: &[String], query: &QueryState) -> Self {
        Self {
            from_systems: query.from_systems.clone().unwrap_or_default(),
            to_system: query.to_system.clone().unwrap_or_default(),
            avoid_systems: query.avoid_systems.clone().unwrap_or_default(),
            to_tag: TagSelect::single(sorted_tags, query.to_tag.as_deref()),
            avoid_tags: TagSelect::multiple(sorted_tags, &query.avoid_tags),
            prefer_not_tags: TagSelect::multiple(sorted_tags, &query.prefer_not_tags),
        }
    }

    /// Builds the request body from the values as they are right now.
    /// No validation happens here; the server rejects incomplete requests.
    pub fn route_request(&self) -> RouteRequest {
        RouteRequest {
            from_systems: split_system_list(&self.from_systems),
            to_system: self.to_system.trim().to_string(),
            to_tag: self.to_tag.selected_value(),
            avoid_systems: split_system_list(&self.avoid_systems),
            avoid_tags: self.avoid_tags.selected_values(),
            prefer_not_tags: self.prefer_not_tags.selected_values(),
        }
    }
}

/// Splits a comma-separated system list, trimming names and dropping blanks.
pub fn split_system_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
