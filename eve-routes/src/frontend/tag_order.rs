// This file is part of the product EVE Routes.
// SPDX-FileCopyrightText: 2026 EVE Routes contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

//! Display order for tag selectors.
//!
//! Tags starting with a lowercase letter (`high`, `trig-minor`, ...) come
//! first, followed by everything else (region and constellation names, tags
//! starting with digits or symbols). Each group is sorted alphabetically:
//! base letters first, then accents, then case.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// The tag catalog as served by `list_tags`: a set, in no particular order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagCatalog {
    tags: BTreeSet<String>,
}

impl TagCatalog {
    pub fn new<I>(tags: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self {
            tags: tags.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn sorted(&self) -> Vec<String> {
        sort_tags(&self.tags)
    }
}

/// True when the first character is a lowercase letter. Digits, symbols and
/// the empty string are not lowercase.
pub fn is_lowercase_initial(tag: &str) -> bool {
    let Some(first) = tag.chars().next() else {
        return false;
    };
    let first = first.to_string();
    first.to_lowercase() == first && first.to_uppercase() != first
}

/// Alphabetical comparison. Letters compare by their base form first, so
/// `Éden` sorts next to `Eden`; accents break ties before case does, then
/// lowercase wins at the first case difference, then code points.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(&base_letters(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| case_order(a, b))
        .then_with(|| a.cmp(b))
}

/// Lowercased canonical decomposition with combining marks removed.
fn base_letters(tag: &str) -> String {
    tag.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

fn case_order(a: &str, b: &str) -> Ordering {
    for (x, y) in a.chars().zip(b.chars()) {
        if x == y {
            continue;
        }
        match (x.is_lowercase(), y.is_lowercase()) {
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            _ => {}
        }
    }
    Ordering::Equal
}

pub fn compare_tags(a: &str, b: &str) -> Ordering {
    match (is_lowercase_initial(a), is_lowercase_initial(b)) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => locale_compare(a, b),
    }
}

pub fn sort_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut sorted: Vec<String> = tags
        .into_iter()
        .map(|tag| tag.as_ref().to_string())
        .collect();
    sorted.sort_by(|a, b| compare_tags(a, b));
    sorted
}
