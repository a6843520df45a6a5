//! Core library for the Academia 360 learning platform client.
//!
//! Dependency order, leaves first:
//! `storage` → `auth::SessionStore` → `api::Gateway` → `api::ApiClient` → front ends.
//!
//! The session store is the single source of truth for who is logged in.
//! The gateway attaches its credential to every request and ends the
//! session when the backend answers 401.

pub mod api;
pub mod auth;
pub mod config;
pub mod dashboard;
pub mod models;
pub mod navigation;
pub mod storage;
pub mod utils;

pub use api::{ApiClient, ApiError, Gateway, GatewayConfig};
pub use auth::{AccountKind, Identity, LoginError, Session, SessionStore};
pub use config::Config;
pub use dashboard::{load_dashboard, Dashboard};
pub use navigation::{Navigator, RedirectLatch, LOGIN_PATH};
pub use storage::{FileStorage, KeyringStorage, MemoryStorage, Storage};
