//! Typed wire records for the column/post/user API.
//!
//! DESIGN
//! ======
//! Every response is wrapped in an [`Envelope`]; list endpoints additionally
//! wrap their items in [`ListData`]. Field names follow the server's wire
//! format (`_id`, `nickName`, `column`, `createdAt`) through serde renames so
//! the Rust side can use plain snake-case names.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Standard response wrapper: `{ "code": 0, "msg": "...", "data": T }`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Application status code; `0` on success for servers that send it.
    #[serde(default)]
    pub code: i64,
    /// Human-readable status message, if any.
    #[serde(default)]
    pub msg: Option<String>,
    pub data: T,
}

/// Paged list payload. Only the items are kept; paging counters are ignored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ListData<T> {
    pub list: Vec<T>,
}

/// An uploaded image reference (column avatar, post header image).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// A column: a named collection of posts owned by one user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Avatar image, if the column has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<ImageRecord>,
}

/// A post inside a column.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageRecord>,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    /// Owning column id.
    #[serde(rename = "column")]
    pub column_id: String,
}

/// The authenticated user as returned by `GET /user/current`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "nickName", default)]
    pub nickname: String,
    #[serde(default)]
    pub email: String,
    /// The user's own column, if one has been created.
    #[serde(rename = "column", default, skip_serializing_if = "Option::is_none")]
    pub column_id: Option<String>,
}

/// Body of `POST /user/login`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// `data` payload of a successful login.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}
