// This file is part of the product EVE Routes.
// SPDX-FileCopyrightText: 2026 EVE Routes contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use url::form_urlencoded;

/// Page query string, decoded into the form's parameter names.
///
/// Single-valued parameters keep their first occurrence; the tag lists keep
/// every occurrence in order. Unknown parameters are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryState {
    raw: String,
    pub from_systems: Option<String>,
    pub to_system: Option<String>,
    pub to_tag: Option<String>,
    pub avoid_systems: Option<String>,
    pub avoid_tags: Vec<String>,
    pub prefer_not_tags: Vec<String>,
}

impl QueryState {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.strip_prefix('?').unwrap_or(raw);
        let mut state = QueryState {
            raw: raw.to_string(),
            ..QueryState::default()
        };

        for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
            let value = value.into_owned();
            match key.as_ref() {
                "from_systems" => keep_first(&mut state.from_systems, value),
                "to_system" => keep_first(&mut state.to_system, value),
                "to_tag" => keep_first(&mut state.to_tag, value),
                "avoid_systems" => keep_first(&mut state.avoid_systems, value),
                "avoid_tags" => state.avoid_tags.push(value),
                "prefer_not_tags" => state.prefer_not_tags.push(value),
                _ => {}
            }
        }

        state
    }

    /// True when the page was loaded without any query string at all.
    /// A query made only of unknown parameters still counts as present.
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }
}

fn keep_first(slot: &mut Option<String>, value: String) {
    if slot.is_none() {
        *slot = Some(value);
    }
}
