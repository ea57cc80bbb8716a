// This file is part of the product EVE Routes.
// SPDX-FileCopyrightText: 2026 EVE Routes contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

pub mod api;
pub mod app_state;
pub mod catalog;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod frontend;
pub mod graphmaker;
pub mod pathfinder;
pub mod runtime_paths;
pub mod system;
pub mod templates;
pub mod util;
