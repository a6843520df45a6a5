//! Academia CLI - a command line front end for the Academia 360 learning platform.
//!
//! Log in as a student or administrator, then browse courses, announcements
//! and the admin catalogs. The session is kept between runs.

mod commands;
mod prompt;

use std::io;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::Context;

/// Environment variable naming a directory for daily log files
const LOG_DIR_ENV: &str = "ACADEMIA_LOG_DIR";

/// Exit code when the backend ended the session during the command
const EXIT_SESSION_EXPIRED: u8 = 2;

#[derive(Parser)]
#[command(name = "academia", version, about = "Academia 360 learning platform client")]
struct Cli {
    /// Backend address, overriding the config file
    #[arg(long, global = true, env = "ACADEMIA_BASE_URL")]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Log in as a student, or as an administrator with --admin
    Login {
        #[arg(long)]
        admin: bool,
        #[arg(long, short)]
        username: Option<String>,
    },
    /// End the current session
    Logout,
    /// Show who is logged in
    Whoami,
    /// Show the dashboard: recent courses and announcements
    Dashboard,
    /// List courses
    Courses {
        #[arg(long, default_value_t = 0)]
        page: u32,
    },
    /// List announcements
    Announcements,
    /// List course categories
    Categories,
    /// List learning pathways
    Pathways {
        #[arg(long, default_value_t = 0)]
        page: u32,
    },
    /// List users (administrators only)
    Users {
        #[arg(long, default_value_t = 0)]
        page: u32,
    },
    /// List administrators (administrators only)
    Admins,
    /// List administrator roles (administrators only)
    Roles {
        #[arg(long, default_value_t = 0)]
        page: u32,
    },
}

/// Initialize the tracing subscriber for logging.
/// The returned guard must live until exit so buffered file logs are flushed.
fn init_tracing() -> Option<WorkerGuard> {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let (file_layer, guard) = match std::env::var(LOG_DIR_ENV) {
        Ok(dir) if !dir.is_empty() => {
            let appender = tracing_appender::rolling::daily(dir, "academia.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().with_writer(writer).with_ansi(false)),
                Some(guard),
            )
        }
        _ => (None, None),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(file_layer)
        .with(filter)
        .init();

    guard
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let _log_guard = init_tracing();
    info!("Academia CLI starting");

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let ctx = Context::new(cli.base_url)?;

    let outcome = match cli.command {
        Command::Login { admin, username } => commands::login(&ctx, admin, username).await,
        Command::Logout => commands::logout(&ctx).await,
        Command::Whoami => commands::whoami(&ctx),
        Command::Dashboard => commands::dashboard(&ctx).await,
        Command::Courses { page } => commands::courses(&ctx, page).await,
        Command::Announcements => commands::announcements(&ctx).await,
        Command::Categories => commands::categories(&ctx).await,
        Command::Pathways { page } => commands::pathways(&ctx, page).await,
        Command::Users { page } => commands::users(&ctx, page).await,
        Command::Admins => commands::admins(&ctx).await,
        Command::Roles { page } => commands::roles(&ctx, page).await,
    };

    // A 401 anywhere ends the session; drop everything and send the user
    // back to the login entry point.
    if ctx.take_redirect().is_some() {
        eprintln!("Session expired. Please log in again with `academia login`.");
        return Ok(ExitCode::from(EXIT_SESSION_EXPIRED));
    }

    outcome
}
