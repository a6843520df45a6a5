//! Authentication module for managing the user session.
//!
//! This module provides:
//! - `SessionStore`: who is logged in and as what, persisted through `Storage`
//! - `sign_in` / `sign_out`: the login flow against the backend
//!
//! Sessions have no client-side expiry. They end on logout or when any
//! backend call answers 401.

pub mod flow;
pub mod session;

pub use flow::{sign_in, sign_out, LoginError};
pub use session::{AccountKind, Identity, Session, SessionStore};
