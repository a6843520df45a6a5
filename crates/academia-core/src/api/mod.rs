//! REST API layer for the Academia 360 backend.
//!
//! This module provides the `Gateway`, the single HTTP client every call
//! goes through, and the `ApiClient` with typed wrappers for each route.
//!
//! The backend authenticates with a bearer token obtained from the user or
//! admin login endpoint. A 401 from any route ends the session.

pub mod client;
pub mod endpoints;
pub mod error;
pub mod gateway;

pub use client::{AdminLoginResponse, ApiClient, LoginRequest, UserLoginResponse};
pub use error::ApiError;
pub use gateway::{decorate_request, observe_response, Gateway, GatewayConfig};
