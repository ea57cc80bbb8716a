// This file is part of the product EVE Routes.
// SPDX-FileCopyrightText: 2026 EVE Routes contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::rt::System;
use actix_web::{App, HttpServer, middleware::Logger, web};
use log::info;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use eve_routes::app_state::AppState;
use eve_routes::catalog::RouteCatalog;
use eve_routes::cli::{self, CliCommand};
use eve_routes::config::{Config, ValidatedConfig};
use eve_routes::runtime_paths::RuntimePaths;
use eve_routes::{api, error, frontend, util};

fn main() {
    let exit_code = run();
    std::process::exit(exit_code);
}

fn run() -> i32 {
    let parsed_args = match parse_args() {
        Ok(args) => args,
        Err(error) => {
            eprintln!("❌ Invalid command line arguments: {}", error);
            eprintln!("❌ Use `eve-routes help` for usage.");
            return 1;
        }
    };

    match parsed_args.mode {
        RunMode::Help => {
            print!("{}", cli::help_text());
            0
        }
        RunMode::Cli(command) => {
            System::new().block_on(async { cli::run_cli(&parsed_args.runtime_root, command).await })
        }
        RunMode::Serve => {
            let validated_config = match Config::load_and_validate(&parsed_args.runtime_root) {
                Ok(config) => config,
                Err(error) => {
                    eprintln!("❌ {}", error);
                    eprintln!("❌ Application cannot start with invalid configuration.");
                    return 1;
                }
            };
            let runtime_paths =
                match RuntimePaths::from_root(&parsed_args.runtime_root, &validated_config) {
                    Ok(paths) => paths,
                    Err(error) => {
                        eprintln!("❌ {}", error);
                        return 1;
                    }
                };

            match System::new().block_on(run_server(validated_config, runtime_paths)) {
                Ok(()) => 0,
                Err(error) => {
                    eprintln!("❌ Server failed to start: {}", error);
                    1
                }
            }
        }
    }
}

async fn run_server(
    validated_config: ValidatedConfig,
    runtime_paths: RuntimePaths,
) -> std::io::Result<()> {
    let logger = util::log_level_changer::build_logger(validated_config.log_level);
    util::init_logger(util::log_level_changer::default_rules(), logger).map_err(|error| {
        eprintln!("❌ Failed to initialize logger: {}", error);
        std::io::Error::other(error.to_string())
    })?;

    log_startup_info(&validated_config, &runtime_paths);

    let catalog = match RouteCatalog::load(
        &runtime_paths.system_data_file,
        validated_config.routes.max_routes,
    ) {
        Ok(catalog) => Arc::new(catalog),
        Err(error) => {
            eprintln!("❌ Failed to load system data: {}", error);
            return Err(std::io::Error::other(error.to_string()));
        }
    };
    info!(
        "✅ Loaded {} systems and {} tags",
        catalog.system_count(),
        catalog.tag_count()
    );

    let app_state = Arc::new(AppState::new(&validated_config.app.name, catalog));
    let workers = validated_config.server.workers;
    let address = (
        validated_config.server.host.clone(),
        validated_config.server.port,
    );
    let validated_config = Arc::new(validated_config);

    HttpServer::new(move || {
        let prefix = validated_config.route_prefix().to_string();
        let api_prefix = prefix.clone();
        App::new()
            .app_data(web::Data::from(validated_config.clone()))
            .app_data(web::Data::from(app_state.clone()))
            .wrap(Logger::default())
            .configure(move |cfg| api::configure(cfg, &api_prefix))
            .configure(move |cfg| frontend::configure(cfg, &prefix))
            .default_service(web::route().to(error::not_found))
    })
    .workers(workers)
    .bind(address)?
    .run()
    .await
}

fn log_startup_info(config: &ValidatedConfig, runtime_paths: &RuntimePaths) {
    info!("Starting {} - {}", config.app.name, config.app.description);
    info!("Workers: {}", config.server.workers);
    info!(
        "Listening on http://{}:{}{}/",
        config.server.host,
        config.server.port,
        config.route_prefix()
    );
    info!(
        "System data file: {}",
        runtime_paths.system_data_file.display()
    );
    info!("Config file: {}", runtime_paths.config_file.display());
    info!("Runtime root: {}", runtime_paths.root.display());
}

enum RunMode {
    Serve,
    Cli(CliCommand),
    Help,
}

struct ParsedArgs {
    runtime_root: PathBuf,
    mode: RunMode,
}

fn parse_args() -> Result<ParsedArgs, String> {
    parse_args_from(std::env::args().skip(1))
}

fn parse_args_from<I>(args: I) -> Result<ParsedArgs, String>
where
    I: IntoIterator<Item = String>,
{
    let args: Vec<String> = args.into_iter().collect();
    if args.iter().any(|arg| is_help_flag(arg)) {
        return Ok(ParsedArgs {
            runtime_root: PathBuf::from("."),
            mode: RunMode::Help,
        });
    }

    let mut args = args.into_iter();
    let mut runtime_root = PathBuf::from(".");
    let mut cli_tokens = Vec::new();

    while let Some(arg) = args.next() {
        if arg == "--" {
            continue;
        } else if arg == "-C" && cli_tokens.is_empty() {
            let value = args
                .next()
                .ok_or_else(|| "Missing value for -C".to_string())?;
            runtime_root = PathBuf::from(value);
        } else {
            cli_tokens.push(arg);
        }
    }

    let runtime_root = make_runtime_root_absolute(&runtime_root)?;

    let mode = match cli_tokens.first().map(String::as_str) {
        None | Some("serve") if cli_tokens.len() <= 1 => RunMode::Serve,
        Some("serve") => return Err("serve takes no arguments".to_string()),
        Some(command) if command.eq_ignore_ascii_case("help") => RunMode::Help,
        _ => RunMode::Cli(cli::parse_command(&cli_tokens)?),
    };

    Ok(ParsedArgs { runtime_root, mode })
}

fn is_help_flag(arg: &str) -> bool {
    arg == "-h" || arg == "--help"
}

fn make_runtime_root_absolute(runtime_root: &Path) -> Result<PathBuf, String> {
    if runtime_root.is_absolute() {
        return Ok(runtime_root.to_path_buf());
    }

    let current_dir = std::env::current_dir()
        .map_err(|error| format!("Failed to resolve current directory: {}", error))?;
    Ok(current_dir.join(runtime_root))
}
