//! Session Entities
//!
//! The authenticated identity and the session wrapping it. `UserId` is
//! opaque: it is whatever the session service issued and is only ever used
//! as the ownership key for records.

use serde::{Deserialize, Serialize};

/// Opaque user reference issued by the session store
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An authenticated session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: UserId,
    pub email: String,
    /// Bearer token presented to the record store
    pub access_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_is_opaque_round_trip() {
        let id = UserId::new("a7bb9c2e-3f10-4a31-9d44-0e8f1b2c3d4e");
        assert_eq!(id.as_str(), "a7bb9c2e-3f10-4a31-9d44-0e8f1b2c3d4e");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"a7bb9c2e-3f10-4a31-9d44-0e8f1b2c3d4e\"");
        let back: UserId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
