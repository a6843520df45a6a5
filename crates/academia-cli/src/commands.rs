//! Subcommand handlers.
//!
//! Each handler returns the process exit code. Errors from the backend are
//! printed and turned into a failure code; a 401 is handled by `main` after
//! the handler returns.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use tracing::{debug, warn};

use academia_core::api::{ApiClient, Gateway};
use academia_core::auth::{self, AccountKind, SessionStore};
use academia_core::config::Config;
use academia_core::dashboard::load_dashboard;
use academia_core::navigation::RedirectLatch;
use academia_core::utils::truncate_string;
use academia_core::ApiError;

use crate::prompt;

/// Width descriptions are cut to in listings
const DESCRIPTION_WIDTH: usize = 60;

/// Environment variables consulted before prompting
const USERNAME_ENV: &str = "ACADEMIA_USERNAME";
const PASSWORD_ENV: &str = "ACADEMIA_PASSWORD";

/// Everything a command needs: config, session, and the API client
pub struct Context {
    pub config: Config,
    pub sessions: SessionStore,
    pub api: ApiClient,
    latch: Arc<RedirectLatch>,
}

impl Context {
    pub fn new(base_url: Option<String>) -> Result<Self> {
        let config = match Config::load() {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "Failed to load config, using defaults");
                Config::default()
            }
        };
        // The override applies to this run only and never reaches the file
        let gateway_config = config.gateway_config(base_url.as_deref());
        debug!(base_url = %gateway_config.base_url, storage = ?config.storage, "Config loaded");

        let storage = config.open_storage()?;
        let sessions = SessionStore::new(storage);
        sessions.hydrate().context("Failed to read saved session")?;

        let latch = Arc::new(RedirectLatch::new());
        let gateway = Gateway::new(&gateway_config, sessions.clone(), latch.clone())
            .context("Failed to build HTTP client")?;

        Ok(Self {
            config,
            sessions,
            api: ApiClient::new(gateway),
            latch,
        })
    }

    /// Pending login redirect requested by the gateway
    pub fn take_redirect(&self) -> Option<String> {
        self.latch.take()
    }
}

fn report(e: &ApiError) -> ExitCode {
    // The session-expired notice is printed by main
    if !e.is_unauthorized() {
        let message = e.server_message().unwrap_or_else(|| e.to_string());
        eprintln!("Request failed: {}", message);
    }
    ExitCode::FAILURE
}

fn require_login(ctx: &Context) -> Option<ExitCode> {
    if ctx.sessions.is_authenticated() {
        None
    } else {
        eprintln!("Not logged in. Run `academia login` first.");
        Some(ExitCode::FAILURE)
    }
}

fn require_admin(ctx: &Context) -> Option<ExitCode> {
    if let Some(code) = require_login(ctx) {
        return Some(code);
    }
    if ctx.sessions.is_admin() {
        None
    } else {
        eprintln!("Administrator access required.");
        Some(ExitCode::FAILURE)
    }
}

// ===== Session =====

pub async fn login(ctx: &Context, admin: bool, username: Option<String>) -> Result<ExitCode> {
    let kind = if admin {
        AccountKind::Admin
    } else {
        AccountKind::Student
    };

    let username = match username.or_else(|| std::env::var(USERNAME_ENV).ok()) {
        Some(u) => u,
        None => prompt::username(ctx.config.last_username.as_deref())?,
    };
    let password = match std::env::var(PASSWORD_ENV) {
        Ok(p) if !p.is_empty() => p,
        _ => prompt::password()?,
    };

    match auth::sign_in(&ctx.api, kind, &username, &password).await {
        Ok(session) => {
            if let Err(e) = Config::remember_username(username.trim()) {
                warn!(error = %e, "Failed to save config");
            }
            println!(
                "Logged in as {} ({}).",
                session.display_name(),
                session.kind
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            // A 401 here means bad credentials, not an expired session
            ctx.take_redirect();
            eprintln!("{}", e.user_message());
            Ok(ExitCode::FAILURE)
        }
    }
}

pub async fn logout(ctx: &Context) -> Result<ExitCode> {
    auth::sign_out(&ctx.api).await?;
    // Logging out is never "session expired", whatever the server said
    ctx.take_redirect();
    println!("Logged out.");
    Ok(ExitCode::SUCCESS)
}

pub fn whoami(ctx: &Context) -> Result<ExitCode> {
    match ctx.sessions.current() {
        Some(session) => {
            println!("{} ({})", session.display_name(), session.kind);
            if let Some(ref email) = session.identity.email {
                println!("Email: {}", email);
            }
        }
        None => println!("Not logged in."),
    }
    Ok(ExitCode::SUCCESS)
}

// ===== Dashboard =====

pub async fn dashboard(ctx: &Context) -> Result<ExitCode> {
    if let Some(code) = require_login(ctx) {
        return Ok(code);
    }

    let dashboard = match load_dashboard(&ctx.api).await {
        Ok(d) => d,
        Err(e) => return Ok(report(&e)),
    };

    println!("{}", dashboard.greeting());
    println!("{}\n", dashboard.intro());

    println!("{} - {}", dashboard.courses_heading(), dashboard.courses_subtitle());
    if dashboard.courses.is_empty() {
        println!("  No courses available yet.");
    }
    for (i, course) in dashboard.courses.iter().enumerate() {
        println!(
            "  [{}] {} ({}, {})",
            dashboard.course_action(),
            course.display_title(i),
            course.display_level(),
            course.display_duration()
        );
        println!(
            "      {}",
            truncate_string(course.display_description(), DESCRIPTION_WIDTH)
        );
    }

    println!("\nAnnouncements - Latest updates and news");
    if dashboard.announcements.is_empty() {
        println!("  No announcements yet.");
    }
    for (i, announcement) in dashboard.announcements.iter().enumerate() {
        println!(
            "  {} ({})",
            announcement.display_title(i),
            announcement.display_date()
        );
        println!(
            "      {}",
            truncate_string(announcement.display_body(), DESCRIPTION_WIDTH)
        );
    }

    Ok(ExitCode::SUCCESS)
}

// ===== Catalog =====

fn page_footer(page: u32, total: Option<u32>) -> Option<String> {
    total.map(|total| format!("Page {} of {}", page.saturating_add(1), total.max(1)))
}

fn print_page_footer(page: u32, total: Option<u32>) {
    if let Some(footer) = page_footer(page, total) {
        println!("\n{}", footer);
    }
}

pub async fn courses(ctx: &Context, page: u32) -> Result<ExitCode> {
    if let Some(code) = require_login(ctx) {
        return Ok(code);
    }
    let result = match ctx.api.courses(page).await {
        Ok(r) => r,
        Err(e) => return Ok(report(&e)),
    };
    for (i, course) in result.items().iter().enumerate() {
        let id = course.id.as_ref().map(|id| id.to_string()).unwrap_or_default();
        println!(
            "{:>6}  {}  [{}]",
            id,
            course.display_title(i),
            course.display_level()
        );
    }
    if result.items().is_empty() {
        println!("No courses available yet.");
    }
    print_page_footer(page, result.total_pages());
    Ok(ExitCode::SUCCESS)
}

pub async fn announcements(ctx: &Context) -> Result<ExitCode> {
    if let Some(code) = require_login(ctx) {
        return Ok(code);
    }
    let items = match ctx.api.announcements().await {
        Ok(r) => r,
        Err(e) => return Ok(report(&e)),
    };
    if items.is_empty() {
        println!("No announcements yet.");
    }
    for (i, a) in items.iter().enumerate() {
        println!("{} ({})", a.display_title(i), a.display_date());
        println!("    {}", a.display_body());
    }
    Ok(ExitCode::SUCCESS)
}

pub async fn categories(ctx: &Context) -> Result<ExitCode> {
    if let Some(code) = require_login(ctx) {
        return Ok(code);
    }
    let items = match ctx.api.categories().await {
        Ok(r) => r,
        Err(e) => return Ok(report(&e)),
    };
    for category in &items {
        let id = category.id.as_ref().map(|id| id.to_string()).unwrap_or_default();
        println!("{:>6}  {}", id, category.display_name());
    }
    Ok(ExitCode::SUCCESS)
}

pub async fn pathways(ctx: &Context, page: u32) -> Result<ExitCode> {
    if let Some(code) = require_login(ctx) {
        return Ok(code);
    }
    let result = match ctx.api.pathways(page).await {
        Ok(r) => r,
        Err(e) => return Ok(report(&e)),
    };
    for pathway in result.items() {
        let id = pathway.id.as_ref().map(|id| id.to_string()).unwrap_or_default();
        println!("{:>6}  {}", id, pathway.display_title());
    }
    print_page_footer(page, result.total_pages());
    Ok(ExitCode::SUCCESS)
}

// ===== Administration =====

pub async fn users(ctx: &Context, page: u32) -> Result<ExitCode> {
    if let Some(code) = require_admin(ctx) {
        return Ok(code);
    }
    let result = match ctx.api.users(page).await {
        Ok(r) => r,
        Err(e) => return Ok(report(&e)),
    };
    for user in result.items() {
        let id = user.id.as_ref().map(|id| id.to_string()).unwrap_or_default();
        println!(
            "{:>6}  {:<24} {}",
            id,
            user.display_name(),
            user.email.as_deref().unwrap_or("")
        );
    }
    print_page_footer(page, result.total_pages());
    Ok(ExitCode::SUCCESS)
}

pub async fn admins(ctx: &Context) -> Result<ExitCode> {
    if let Some(code) = require_admin(ctx) {
        return Ok(code);
    }
    let items = match ctx.api.admins().await {
        Ok(r) => r,
        Err(e) => return Ok(report(&e)),
    };
    for admin in &items {
        let id = admin.id.as_ref().map(|id| id.to_string()).unwrap_or_default();
        println!("{:>6}  {}", id, admin.display_name());
    }
    Ok(ExitCode::SUCCESS)
}

pub async fn roles(ctx: &Context, page: u32) -> Result<ExitCode> {
    if let Some(code) = require_admin(ctx) {
        return Ok(code);
    }
    let result = match ctx.api.admin_roles(page).await {
        Ok(r) => r,
        Err(e) => return Ok(report(&e)),
    };
    for role in result.items() {
        let id = role.id.as_ref().map(|id| id.to_string()).unwrap_or_default();
        println!("{:>6}  {}", id, role.display_name());
    }
    print_page_footer(page, result.total_pages());
    Ok(ExitCode::SUCCESS)
}
