// This file is part of the product Atelier.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::rt::System;
use actix_web::{App, HttpServer, middleware::Logger, web};
use log::{LevelFilter, info};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

mod api;
mod bootstrap;
mod config;
mod iam;
mod profile;

use iam::jwt::JwtService;
use profile::{ProfileService, SqliteProfileStore};

fn main() {
    let exit_code = run();
    std::process::exit(exit_code);
}

enum RunMode {
    Serve,
    Help,
}

struct ParsedArgs {
    runtime_root: PathBuf,
    mode: RunMode,
}

fn parse_args() -> Result<ParsedArgs, String> {
    let mut runtime_root = PathBuf::from(".");
    let mut mode = RunMode::Serve;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-C" => {
                let value = args
                    .next()
                    .ok_or_else(|| "-C requires a directory argument".to_string())?;
                runtime_root = PathBuf::from(value);
            }
            "-h" | "--help" => {
                mode = RunMode::Help;
            }
            other => {
                return Err(format!("Unknown argument: {}", other));
            }
        }
    }

    Ok(ParsedArgs { runtime_root, mode })
}

fn help_text() -> String {
    format!(
        "atelier {version}\n\
         Authenticated user profile API service.\n\n\
         USAGE:\n\
         \x20   atelier [-C <root>]\n\n\
         OPTIONS:\n\
         \x20   -C <root>    Runtime directory holding config.yaml and the profile database (default: .)\n\
         \x20   -h, --help   Print this help text\n",
        version = env!("CARGO_PKG_VERSION"),
    )
}

fn run() -> i32 {
    let parsed_args = match parse_args() {
        Ok(args) => args,
        Err(error) => {
            eprintln!("❌ Invalid command line arguments: {}", error);
            eprintln!("❌ Use -C <root> to set the runtime directory.");
            return 1;
        }
    };

    if matches!(parsed_args.mode, RunMode::Help) {
        print!("{}", help_text());
        return 0;
    }

    let bootstrap = match bootstrap::bootstrap_runtime(&parsed_args.runtime_root) {
        Ok(result) => result,
        Err(error) => {
            eprintln!("❌ Bootstrap error: {}", error);
            eprintln!("❌ Application cannot start with invalid configuration.");
            return 1;
        }
    };

    if bootstrap.created_config {
        eprintln!("[bootstrap] created config.yaml; review the generated settings before exposing the service");
    }

    let result = System::new().block_on(run_server(bootstrap));
    match result {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("❌ Server failed to start: {}", error);
            1
        }
    }
}

async fn run_server(bootstrap: bootstrap::BootstrapResult) -> std::io::Result<()> {
    let validated_config = Arc::new(bootstrap.validated_config);

    // Parse log level from config
    let log_level = match validated_config.logging.level.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Info,
    };

    // Configure logging with a stable format
    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {}: {}",
                chrono::Utc::now().format("%Y-%m-%d %H:%M:%S%.3f UTC"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .try_init()
        .map_err(|error| {
            eprintln!("❌ Failed to initialize logger: {}", error);
            std::io::Error::other(error.to_string())
        })?;

    info!(
        "Starting {} v{} from {}",
        validated_config.app.name,
        env!("CARGO_PKG_VERSION"),
        bootstrap.runtime_root.display()
    );

    let database_path = bootstrap.runtime_root.join(&validated_config.database.file);
    let connect_options = SqliteConnectOptions::new()
        .filename(&database_path)
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .connect_with(connect_options)
        .await
        .map_err(|error| {
            eprintln!("❌ Failed to open profile database: {}", error);
            std::io::Error::other(error.to_string())
        })?;
    info!(
        "✅ Profile database opened at {}",
        database_path.display()
    );

    if let Err(error) = profile::ensure_schema(&pool).await {
        eprintln!("❌ Failed to initialize database schema: {}", error);
        return Err(std::io::Error::other(error.to_string()));
    }
    info!("✅ Database schema ensured");

    let jwt_service = Arc::new(JwtService::new(&validated_config));
    let profile_service = Arc::new(ProfileService::new(Arc::new(SqliteProfileStore::new(pool))));
    info!("✅ Profile lookup service initialized");

    let host = validated_config.server.host.clone();
    let port = validated_config.server.port;
    let workers = validated_config.server.workers;

    let factory = {
        let config = validated_config.clone();
        let jwt_service = jwt_service.clone();
        let profile_service = profile_service.clone();
        move || {
            App::new()
                .app_data(web::Data::from(config.clone()))
                .app_data(web::Data::from(jwt_service.clone()))
                .app_data(web::Data::from(profile_service.clone()))
                .wrap(Logger::default())
                .configure(api::configure)
        }
    };

    info!("Listening on http://{}:{}", host, port);
    HttpServer::new(factory)
        .workers(workers)
        .bind((host.as_str(), port))?
        .run()
        .await
}
