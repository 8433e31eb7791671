use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Claim carrying the user identifier inside a signed token.
pub const USER_ID_CLAIM: &str = "userId";

/// Canonical identifier field exposed on a [`Principal`].
pub const PRINCIPAL_ID_FIELD: &str = "id";

/// Normalized identity derived from verified token claims.
///
/// Serializes flat: `{ "id": ..., <every other claim> }`. The `userId` claim never
/// appears; its value lives under `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Principal {
    pub id: Value,
    #[serde(flatten)]
    pub claims: Map<String, Value>,
}

impl Principal {
    /// Builds a principal from decoded claims.
    ///
    /// Returns `None` when `userId` is absent, `null` or an empty string. A claim already
    /// named `id` is replaced by the canonical value.
    pub fn from_claims(mut claims: Map<String, Value>) -> Option<Self> {
        let id = claims.remove(USER_ID_CLAIM)?;
        if !is_present(&id) {
            return None;
        }
        claims.remove(PRINCIPAL_ID_FIELD);

        Some(Self { id, claims })
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        if key == PRINCIPAL_ID_FIELD {
            return Some(&self.id);
        }
        self.claims.get(key)
    }

    pub fn role(&self) -> Option<&str> {
        self.claims.get("role").and_then(Value::as_str)
    }

    /// `id` rendered for logs: strings without quotes, everything else as JSON.
    pub fn id_display(&self) -> String {
        match &self.id {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    pub fn into_map(self) -> Map<String, Value> {
        let mut map = self.claims;
        map.insert(PRINCIPAL_ID_FIELD.to_string(), self.id);
        map
    }
}

fn is_present(id: &Value) -> bool {
    match id {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}
