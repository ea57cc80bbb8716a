// This file is part of the product EVE Routes.
// SPDX-FileCopyrightText: 2026 EVE Routes contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

//! `find` and `build-graph` subcommands.

use log::{LevelFilter, debug};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::api::{RouteRequest, RouteStep};
use crate::catalog::RouteCatalog;
use crate::client::{ApiError, HttpRoutesApi, LocalRoutesApi, RoutesApi};
use crate::config::{ClientConfig, Config};
use crate::frontend::split_system_list;
use crate::graphmaker::{self, GraphBuildOptions};
use crate::runtime_paths::RuntimePaths;
use crate::util;

#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    Find(FindArgs),
    BuildGraph(GraphBuildOptions),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FindArgs {
    pub request: RouteRequest,
    /// Base URL of a running server; the local data file is used when unset.
    pub server: Option<String>,
}

pub fn parse_command(tokens: &[String]) -> Result<CliCommand, String> {
    let Some((command, rest)) = tokens.split_first() else {
        return Err("Missing command".to_string());
    };
    match command.as_str() {
        "find" => parse_find(rest).map(CliCommand::Find),
        "build-graph" => parse_build_graph(rest).map(CliCommand::BuildGraph),
        other => Err(format!("Unknown command '{}'", other)),
    }
}

fn parse_find(tokens: &[String]) -> Result<FindArgs, String> {
    let mut args = FindArgs::default();
    let mut tokens = tokens.iter();

    while let Some(flag) = tokens.next() {
        let mut value = || {
            tokens
                .next()
                .cloned()
                .ok_or_else(|| format!("Missing value for {}", flag))
        };
        match flag.as_str() {
            "--from" => args.request.from_systems.extend(split_system_list(&value()?)),
            "--to" => args.request.to_system = value()?,
            "--to-tag" => args.request.to_tag = value()?,
            "--avoid" => args.request.avoid_systems.extend(split_system_list(&value()?)),
            "--avoid-tag" => args.request.avoid_tags.push(value()?),
            "--prefer-not-tag" => args.request.prefer_not_tags.push(value()?),
            "--server" => args.server = Some(value()?),
            other => return Err(format!("Unknown option '{}' for find", other)),
        }
    }

    if args.request.from_systems.is_empty() {
        return Err("find requires --from".to_string());
    }
    Ok(args)
}

fn parse_build_graph(tokens: &[String]) -> Result<GraphBuildOptions, String> {
    let mut source_dir = None;
    let mut data_dir = None;
    let mut out_file = None;
    let mut tokens = tokens.iter();

    while let Some(flag) = tokens.next() {
        let value = tokens
            .next()
            .map(PathBuf::from)
            .ok_or_else(|| format!("Missing value for {}", flag))?;
        match flag.as_str() {
            "--source-dir" => source_dir = Some(value),
            "--data-dir" => data_dir = Some(value),
            "--out-file" => out_file = Some(value),
            other => return Err(format!("Unknown option '{}' for build-graph", other)),
        }
    }

    Ok(GraphBuildOptions {
        source_dir: source_dir.ok_or("build-graph requires --source-dir")?,
        data_dir: data_dir.ok_or("build-graph requires --data-dir")?,
        out_file: out_file.ok_or("build-graph requires --out-file")?,
    })
}

pub fn help_text() -> String {
    [
        "Usage:",
        "  eve-routes [-C <root>] [serve]",
        "  eve-routes [-C <root>] find --from A,B (--to X | --to-tag T) [--avoid S,T]",
        "             [--avoid-tag T]... [--prefer-not-tag T]... [--server URL]",
        "  eve-routes build-graph --source-dir D --data-dir D --out-file F",
        "  eve-routes help",
        "",
        "Options:",
        "  -C <root>   Set the runtime root holding config.yaml (default: .).",
        "  -h, --help  Show this help.",
        "",
    ]
    .join("\n")
}

/// `Jita [h], Perimeter [h]`: each system with the first letter of its sec status.
pub fn format_route(route: &[RouteStep]) -> String {
    route
        .iter()
        .map(|step| {
            let band: String = step.sec_status.chars().take(1).collect();
            format!("{} [{}]", step.name, band)
        })
        .collect::<Vec<_>>()
        .join(", ")
}

pub async fn find_route_lines<A: RoutesApi>(
    api: &A,
    request: &RouteRequest,
) -> Result<Vec<String>, ApiError> {
    let result = api.get_routes(request).await?;
    Ok(result.routes.iter().map(|route| format_route(route)).collect())
}

/// Runs a subcommand and returns the process exit code.
pub async fn run_cli(runtime_root: &Path, command: CliCommand) -> i32 {
    let logger = util::log_level_changer::build_logger(LevelFilter::Warn);
    if let Err(error) = util::init_logger(util::log_level_changer::default_rules(), logger) {
        eprintln!("❌ Failed to initialize logger: {}", error);
        return 1;
    }

    let result = match command {
        CliCommand::Find(args) => run_find(runtime_root, args).await,
        CliCommand::BuildGraph(options) => graphmaker::build_graph(&options)
            .map(|contents| {
                println!(
                    "Wrote {} systems to {}",
                    contents.system_data.len(),
                    options.out_file.display()
                );
            })
            .map_err(|e| e.to_string()),
    };

    match result {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("❌ {}", error);
            1
        }
    }
}

async fn run_find(runtime_root: &Path, args: FindArgs) -> Result<(), String> {
    let lines = match &args.server {
        Some(server) => {
            let client = match Config::load_and_validate(runtime_root) {
                Ok(config) => config.client,
                Err(e) => {
                    debug!("Using default client settings: {}", e);
                    ClientConfig::default()
                }
            };
            let api = HttpRoutesApi::new(server, Duration::from_secs(client.timeout_seconds));
            find_route_lines(&api, &args.request).await
        }
        None => {
            let config = Config::load_and_validate(runtime_root).map_err(|e| e.to_string())?;
            let paths = RuntimePaths::from_root(runtime_root, &config).map_err(|e| e.to_string())?;
            let catalog = RouteCatalog::load(&paths.system_data_file, config.routes.max_routes)
                .map_err(|e| e.to_string())?;
            let api = LocalRoutesApi::new(Arc::new(catalog));
            find_route_lines(&api, &args.request).await
        }
    }
    .map_err(|e| e.to_string())?;

    for line in lines {
        println!("{}", line);
    }
    Ok(())
}
