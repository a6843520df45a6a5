use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::storage::{Storage, TOKEN_KEY, USER_DATA_KEY, USER_TYPE_KEY};

/// Classification of the logged-in principal.
///
/// Persisted as the tag `user` (students) or `admin`. `student` is accepted
/// when reading for leniency but never written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountKind {
    #[serde(rename = "user", alias = "student")]
    Student,
    #[serde(rename = "admin")]
    Admin,
}

impl AccountKind {
    /// Tag stored under the `userType` key
    pub fn tag(&self) -> &'static str {
        match self {
            AccountKind::Student => "user",
            AccountKind::Admin => "admin",
        }
    }

    /// Parse a persisted tag. Unknown tags yield `None`.
    pub fn parse_tag(tag: &str) -> Option<Self> {
        match tag {
            "user" | "student" => Some(AccountKind::Student),
            "admin" => Some(AccountKind::Admin),
            _ => None,
        }
    }

    /// Human-readable label, also the fallback display name
    pub fn label(&self) -> &'static str {
        match self {
            AccountKind::Student => "Student",
            AccountKind::Admin => "Administrator",
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Identity record returned by the backend on login.
///
/// The backend sends different shapes for users and admins, so only the
/// fields the front end reads are named. Everything else is kept in
/// `extra` and written back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Identity {
    pub fn with_username(username: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            ..Self::default()
        }
    }

    /// Display name: `name`, else `username`, else the account kind's label.
    /// Blank strings count as missing.
    pub fn display_name(&self, kind: AccountKind) -> &str {
        non_blank(self.name.as_deref())
            .or_else(|| non_blank(self.username.as_deref()))
            .unwrap_or_else(|| kind.label())
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.trim().is_empty())
}

/// The authenticated identity, account kind and bearer credential.
///
/// Only ever exists as a whole; the store holds `Option<Session>`.
#[derive(Clone, PartialEq)]
pub struct Session {
    pub identity: Identity,
    pub kind: AccountKind,
    credential: String,
}

impl Session {
    pub fn new(identity: Identity, kind: AccountKind, credential: impl Into<String>) -> Self {
        Self {
            identity,
            kind,
            credential: credential.into(),
        }
    }

    pub fn credential(&self) -> &str {
        &self.credential
    }

    pub fn is_admin(&self) -> bool {
        self.kind == AccountKind::Admin
    }

    pub fn display_name(&self) -> &str {
        self.identity.display_name(self.kind)
    }
}

// Keep the credential out of logs
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("identity", &self.identity)
            .field("kind", &self.kind)
            .field("credential", &"<redacted>")
            .finish()
    }
}

/// Single source of truth for who is logged in and as what.
///
/// Clone is cheap and every clone shares the same state, so the gateway
/// and the front end can each hold one.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn Storage>,
    current: Arc<RwLock<Option<Session>>>,
}

impl SessionStore {
    /// Create an empty store. Call `hydrate` to restore a persisted session.
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            current: Arc::new(RwLock::new(None)),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Option<Session>> {
        self.current.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<Session>> {
        self.current.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Restore the session from storage. No network I/O.
    ///
    /// All three entries must be present and readable; anything less leaves
    /// the store unauthenticated. Returns whether a session was restored.
    pub fn hydrate(&self) -> Result<bool> {
        let restored = self.read_persisted()?;
        let found = restored.is_some();
        if let Some(ref session) = restored {
            debug!(kind = ?session.kind, "Session restored from storage");
        } else {
            debug!("No complete session in storage");
        }
        *self.write() = restored;
        Ok(found)
    }

    fn read_persisted(&self) -> Result<Option<Session>> {
        let token = self.storage.get(TOKEN_KEY)?;
        let tag = self.storage.get(USER_TYPE_KEY)?;
        let data = self.storage.get(USER_DATA_KEY)?;

        let (Some(token), Some(tag), Some(data)) = (token, tag, data) else {
            return Ok(None);
        };
        if token.is_empty() {
            return Ok(None);
        }

        let Some(kind) = AccountKind::parse_tag(&tag) else {
            warn!(tag = %tag, "Unknown account kind in storage, ignoring session");
            return Ok(None);
        };

        match serde_json::from_str::<Identity>(&data) {
            Ok(identity) => Ok(Some(Session::new(identity, kind, token))),
            Err(e) => {
                warn!(error = %e, "Stored identity is not valid JSON, ignoring session");
                Ok(None)
            }
        }
    }

    /// Persist and activate a new session.
    ///
    /// Storage is written first and memory flipped last. An existing session
    /// is cleared before the new one is written, so a session never changes
    /// kind without passing through the unauthenticated state.
    pub fn login(
        &self,
        identity: Identity,
        kind: AccountKind,
        credential: impl Into<String>,
    ) -> Result<Session> {
        if self.is_authenticated() {
            info!("Replacing existing session");
            self.logout()?;
        }

        let session = Session::new(identity, kind, credential);
        let data = serde_json::to_string(&session.identity)
            .context("Failed to serialize identity")?;

        if let Err(e) = self.persist(&session, &data) {
            // Do not leave a partial record behind
            if let Err(cleanup) = self.remove_persisted() {
                warn!(error = %cleanup, "Failed to roll back partial session write");
            }
            return Err(e);
        }

        *self.write() = Some(session.clone());
        info!(kind = ?kind, "Logged in");
        Ok(session)
    }

    fn persist(&self, session: &Session, data: &str) -> Result<()> {
        self.storage
            .set(TOKEN_KEY, session.credential())
            .context("Failed to persist credential")?;
        self.storage
            .set(USER_TYPE_KEY, session.kind.tag())
            .context("Failed to persist account kind")?;
        self.storage
            .set(USER_DATA_KEY, data)
            .context("Failed to persist identity")?;
        Ok(())
    }

    /// Attempt every removal even when an earlier one fails; the first
    /// error is returned.
    fn remove_persisted(&self) -> Result<()> {
        let mut first_err = None;
        for key in [TOKEN_KEY, USER_TYPE_KEY, USER_DATA_KEY] {
            if let Err(e) = self.storage.remove(key) {
                warn!(key, error = %e, "Failed to remove session entry");
                if first_err.is_none() {
                    first_err = Some(e);
                }
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Clear memory, then remove the persisted entries. Memory is cleared
    /// even when storage fails, so a dead credential is never sent again.
    /// Calling it while logged out is a no-op.
    pub fn logout(&self) -> Result<()> {
        let previous = self.write().take();
        if previous.is_some() {
            info!("Logged out");
        }
        self.remove_persisted()
            .context("Failed to remove session from storage")
    }

    /// Clear the session after the backend rejected the credential.
    /// Returns whether a session was active. On a storage error the
    /// in-memory session is already gone.
    pub fn invalidate(&self) -> Result<bool> {
        let was_active = self.is_authenticated();
        if was_active {
            warn!("Session invalidated by the server");
        }
        self.logout()?;
        Ok(was_active)
    }

    /// True when an identity and account kind are held in memory.
    pub fn is_authenticated(&self) -> bool {
        self.read().is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.read().as_ref().map(Session::is_admin).unwrap_or(false)
    }

    /// Snapshot of the current session
    pub fn current(&self) -> Option<Session> {
        self.read().clone()
    }

    /// Bearer credential of the current session
    pub fn credential(&self) -> Option<String> {
        self.read().as_ref().map(|s| s.credential().to_string())
    }

    pub fn account_kind(&self) -> Option<AccountKind> {
        self.read().as_ref().map(|s| s.kind)
    }

    pub fn display_name(&self) -> Option<String> {
        self.read().as_ref().map(|s| s.display_name().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn store() -> (Arc<MemoryStorage>, SessionStore) {
        let storage = Arc::new(MemoryStorage::new());
        let sessions = SessionStore::new(storage.clone());
        (storage, sessions)
    }

    #[test]
    fn test_account_kind_tags() {
        assert_eq!(AccountKind::Student.tag(), "user");
        assert_eq!(AccountKind::Admin.tag(), "admin");
        assert_eq!(AccountKind::parse_tag("user"), Some(AccountKind::Student));
        assert_eq!(AccountKind::parse_tag("student"), Some(AccountKind::Student));
        assert_eq!(AccountKind::parse_tag("admin"), Some(AccountKind::Admin));
        assert_eq!(AccountKind::parse_tag("superuser"), None);
        assert_eq!(AccountKind::parse_tag(""), None);
    }

    #[test]
    fn test_display_name_precedence() {
        let mut identity = Identity::default();
        assert_eq!(identity.display_name(AccountKind::Student), "Student");
        assert_eq!(identity.display_name(AccountKind::Admin), "Administrator");

        identity.username = Some("jdoe".to_string());
        assert_eq!(identity.display_name(AccountKind::Student), "jdoe");

        identity.name = Some("   ".to_string());
        assert_eq!(identity.display_name(AccountKind::Student), "jdoe");

        identity.name = Some("Jane Doe".to_string());
        assert_eq!(identity.display_name(AccountKind::Student), "Jane Doe");
    }

    #[test]
    fn test_identity_keeps_unknown_fields() {
        let json = r#"{"id":7,"username":"jdoe","role":"SUPER","active":true}"#;
        let identity: Identity = serde_json::from_str(json).unwrap();
        assert_eq!(identity.username.as_deref(), Some("jdoe"));
        assert_eq!(identity.extra.get("role"), Some(&Value::from("SUPER")));

        let back: Value = serde_json::to_value(&identity).unwrap();
        let original: Value = serde_json::from_str(json).unwrap();
        assert_eq!(back, original);
    }

    #[test]
    fn test_login_then_queries() {
        let (_, sessions) = store();
        assert!(!sessions.is_authenticated());
        assert!(!sessions.is_admin());

        sessions
            .login(Identity::with_username("jdoe"), AccountKind::Student, "tok")
            .unwrap();
        assert!(sessions.is_authenticated());
        assert!(!sessions.is_admin());
        assert_eq!(sessions.account_kind(), Some(AccountKind::Student));
        assert_eq!(sessions.credential().as_deref(), Some("tok"));

        sessions
            .login(Identity::with_username("root"), AccountKind::Admin, "tok2")
            .unwrap();
        assert!(sessions.is_admin());
        assert_eq!(sessions.display_name().as_deref(), Some("root"));
    }

    #[test]
    fn test_login_writes_all_three_entries() {
        let (storage, sessions) = store();
        sessions
            .login(Identity::with_username("jdoe"), AccountKind::Admin, "tok123")
            .unwrap();

        assert_eq!(storage.get(TOKEN_KEY).unwrap().as_deref(), Some("tok123"));
        assert_eq!(storage.get(USER_TYPE_KEY).unwrap().as_deref(), Some("admin"));
        assert_eq!(
            storage.get(USER_DATA_KEY).unwrap().as_deref(),
            Some(r#"{"username":"jdoe"}"#)
        );
    }

    #[test]
    fn test_logout_is_idempotent() {
        let (storage, sessions) = store();
        sessions
            .login(Identity::with_username("jdoe"), AccountKind::Student, "tok")
            .unwrap();

        sessions.logout().unwrap();
        assert!(!sessions.is_authenticated());
        assert!(storage.is_empty());

        sessions.logout().unwrap();
        assert!(!sessions.is_authenticated());
        assert!(storage.is_empty());
    }

    #[test]
    fn test_hydrate_complete_record() {
        let (storage, sessions) = store();
        storage.set(TOKEN_KEY, "tok").unwrap();
        storage.set(USER_TYPE_KEY, "admin").unwrap();
        storage.set(USER_DATA_KEY, r#"{"name":"Ada"}"#).unwrap();

        assert!(sessions.hydrate().unwrap());
        assert!(sessions.is_authenticated());
        assert!(sessions.is_admin());
        assert_eq!(sessions.display_name().as_deref(), Some("Ada"));

        // Idempotent
        assert!(sessions.hydrate().unwrap());
        assert!(sessions.is_admin());
    }

    #[test]
    fn test_hydrate_any_missing_entry_is_unauthenticated() {
        let entries = [
            (TOKEN_KEY, "tok"),
            (USER_TYPE_KEY, "user"),
            (USER_DATA_KEY, r#"{"username":"jdoe"}"#),
        ];

        for skip in 0..entries.len() {
            let (storage, sessions) = store();
            for (i, (key, value)) in entries.iter().enumerate() {
                if i != skip {
                    storage.set(key, value).unwrap();
                }
            }
            assert!(!sessions.hydrate().unwrap(), "missing {}", entries[skip].0);
            assert!(!sessions.is_authenticated());
        }
    }

    #[test]
    fn test_hydrate_rejects_garbage() {
        let (storage, sessions) = store();
        storage.set(TOKEN_KEY, "tok").unwrap();
        storage.set(USER_TYPE_KEY, "guest").unwrap();
        storage.set(USER_DATA_KEY, "{}").unwrap();
        assert!(!sessions.hydrate().unwrap());

        storage.set(USER_TYPE_KEY, "user").unwrap();
        storage.set(USER_DATA_KEY, "not json").unwrap();
        assert!(!sessions.hydrate().unwrap());
    }

    #[test]
    fn test_invalidate_reports_prior_state() {
        let (storage, sessions) = store();
        assert!(!sessions.invalidate().unwrap());

        sessions
            .login(Identity::default(), AccountKind::Student, "tok")
            .unwrap();
        assert!(sessions.invalidate().unwrap());
        assert!(!sessions.is_authenticated());
        assert!(storage.is_empty());
    }

    /// Storage whose removals can be switched to fail
    #[derive(Default)]
    struct StuckStorage {
        inner: MemoryStorage,
        fail_remove: std::sync::atomic::AtomicBool,
    }

    impl Storage for StuckStorage {
        fn get(&self, key: &str) -> Result<Option<String>> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<()> {
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<()> {
            if self.fail_remove.load(std::sync::atomic::Ordering::SeqCst) {
                anyhow::bail!("storage is read-only");
            }
            self.inner.remove(key)
        }
    }

    #[test]
    fn test_invalidate_clears_memory_when_storage_fails() {
        let storage = Arc::new(StuckStorage::default());
        let sessions = SessionStore::new(storage.clone());
        sessions
            .login(Identity::default(), AccountKind::Student, "tok")
            .unwrap();

        storage
            .fail_remove
            .store(true, std::sync::atomic::Ordering::SeqCst);
        assert!(sessions.invalidate().is_err());
        assert!(!sessions.is_authenticated());
        assert_eq!(sessions.credential(), None);
    }

    #[test]
    fn test_logout_clears_memory_when_storage_fails() {
        let storage = Arc::new(StuckStorage::default());
        let sessions = SessionStore::new(storage.clone());
        sessions
            .login(Identity::default(), AccountKind::Admin, "tok")
            .unwrap();

        storage
            .fail_remove
            .store(true, std::sync::atomic::Ordering::SeqCst);
        assert!(sessions.logout().is_err());
        assert!(!sessions.is_admin());
    }

    #[test]
    fn test_clones_share_state() {
        let (_, sessions) = store();
        let other = sessions.clone();
        sessions
            .login(Identity::default(), AccountKind::Admin, "tok")
            .unwrap();
        assert!(other.is_admin());
        other.logout().unwrap();
        assert!(!sessions.is_authenticated());
    }

    #[test]
    fn test_debug_redacts_credential() {
        let session = Session::new(Identity::default(), AccountKind::Student, "secret-token");
        let debug = format!("{:?}", session);
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("<redacted>"));
    }
}
