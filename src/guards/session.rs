//! Client-side session snapshot.
//!
//! The login flow stores a JSON user object under [`USER_STORAGE_KEY`]. It is read once
//! into a [`SessionContext`] which is then handed to whatever needs it, and cleared on
//! logout. Nothing reads the store ad hoc.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::RwLock;

pub const USER_STORAGE_KEY: &str = "user";

/// Durable key-value storage owned by the client (browser storage, a file, ...).
pub trait SnapshotStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: String);
    fn remove(&self, key: &str);
}

/// In-process store, for embedding and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: String) {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(key.to_string(), value);
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.write() {
            entries.remove(key);
        }
    }
}

/// The stored user object. Only `role` and `isSujhavStudent` drive decisions; the rest
/// is kept for display.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<Value>,
    #[serde(
        rename = "isSujhavStudent",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    is_sujhav_student: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserSnapshot {
    pub fn new(role: &str, is_sujhav_student: bool) -> Self {
        Self {
            role: Some(Value::from(role)),
            is_sujhav_student: Some(Value::Bool(is_sujhav_student)),
            extra: Map::new(),
        }
    }

    pub fn role(&self) -> Option<&str> {
        self.role.as_ref().and_then(Value::as_str)
    }

    /// Only a literal JSON `true` counts as membership.
    pub fn is_sujhav_student(&self) -> bool {
        matches!(self.is_sujhav_student, Some(Value::Bool(true)))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionContext {
    snapshot: Option<UserSnapshot>,
}

impl SessionContext {
    pub fn new(snapshot: Option<UserSnapshot>) -> Self {
        Self { snapshot }
    }

    /// Reads the stored snapshot once. Unparseable data counts as no snapshot.
    pub fn load(store: &dyn SnapshotStore) -> Self {
        let snapshot = store.get(USER_STORAGE_KEY).and_then(|raw| {
            serde_json::from_str::<UserSnapshot>(&raw)
                .map_err(|e| tracing::warn!(error = %e, "stored user snapshot is not valid JSON"))
                .ok()
        });

        Self { snapshot }
    }

    /// Persists a snapshot after login and adopts it.
    pub fn login(&mut self, store: &dyn SnapshotStore, snapshot: UserSnapshot) {
        match serde_json::to_string(&snapshot) {
            Ok(raw) => store.set(USER_STORAGE_KEY, raw),
            Err(e) => tracing::warn!(error = %e, "failed to persist user snapshot"),
        }
        self.snapshot = Some(snapshot);
    }

    pub fn snapshot(&self) -> Option<&UserSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn logout(&mut self, store: &dyn SnapshotStore) {
        store.remove(USER_STORAGE_KEY);
        self.snapshot = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_reads_role_and_membership() {
        let store = MemoryStore::new();
        store.set(
            USER_STORAGE_KEY,
            r#"{"name":"Ravi","role":"student","isSujhavStudent":true}"#.to_string(),
        );

        let ctx = SessionContext::load(&store);
        let snap = ctx.snapshot().unwrap();
        assert_eq!(snap.role(), Some("student"));
        assert!(snap.is_sujhav_student());
        assert_eq!(snap.extra.get("name"), Some(&Value::from("Ravi")));
    }

    #[test]
    fn missing_key_means_no_snapshot() {
        assert!(SessionContext::load(&MemoryStore::new()).snapshot().is_none());
    }

    #[test]
    fn invalid_json_means_no_snapshot() {
        let store = MemoryStore::new();
        store.set(USER_STORAGE_KEY, "{not json".to_string());
        assert!(SessionContext::load(&store).snapshot().is_none());

        store.set(USER_STORAGE_KEY, "null".to_string());
        assert!(SessionContext::load(&store).snapshot().is_none());
    }

    #[test]
    fn non_boolean_membership_is_not_membership() {
        let snap: UserSnapshot =
            serde_json::from_str(r#"{"role":"student","isSujhavStudent":"true"}"#).unwrap();
        assert!(!snap.is_sujhav_student());

        let snap: UserSnapshot = serde_json::from_str(r#"{"role":"student"}"#).unwrap();
        assert!(!snap.is_sujhav_student());
    }

    #[test]
    fn login_then_logout_round_trips_through_store() {
        let store = MemoryStore::new();
        let mut ctx = SessionContext::default();

        ctx.login(&store, UserSnapshot::new("teacher", false));
        assert_eq!(
            SessionContext::load(&store).snapshot().and_then(UserSnapshot::role),
            Some("teacher")
        );

        ctx.logout(&store);
        assert!(ctx.snapshot().is_none());
        assert!(store.get(USER_STORAGE_KEY).is_none());
    }
}
