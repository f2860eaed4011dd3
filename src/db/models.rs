use serde::{Deserialize, Serialize};

/// A user record as exchanged on the wire and kept in the store.
///
/// Every field is optional. Nothing is validated: `email` is any string,
/// `password` is kept and returned in plaintext, and `user_status` accepts
/// any integer (1 = active, 2 = pending, 3 = inactive by convention).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_status: Option<i32>,
}

impl User {
    /// Key this record is stored under. A missing username maps to `""`.
    pub fn store_key(&self) -> &str {
        self.username.as_deref().unwrap_or_default()
    }
}
