//! Durable key-value storage for session state.
//!
//! This module provides the `Storage` trait the session store persists
//! through, and three backends:
//! - `FileStorage`: a JSON document in the application data directory
//! - `KeyringStorage`: one OS keychain entry per key
//! - `MemoryStorage`: an in-process map, useful for tests
//!
//! Values are plain strings. Callers serialize structured values themselves.

pub mod file;
pub mod keychain;
pub mod memory;

use anyhow::Result;

pub use self::file::FileStorage;
pub use self::keychain::KeyringStorage;
pub use self::memory::MemoryStorage;

/// Key holding the opaque bearer credential.
pub const TOKEN_KEY: &str = "token";

/// Key holding the account-kind tag (`user` or `admin`).
pub const USER_TYPE_KEY: &str = "userType";

/// Key holding the JSON-serialized identity record.
pub const USER_DATA_KEY: &str = "userData";

/// A string-keyed persistent store that survives process restarts.
pub trait Storage: Send + Sync {
    /// Read a value, `None` when the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a value. Removing an absent key succeeds.
    fn remove(&self, key: &str) -> Result<()>;
}
