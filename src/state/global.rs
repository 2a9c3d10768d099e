//! The global client state and the named mutations that change it.
//!
//! DESIGN
//! ======
//! `GlobalState` is plain data. The only way to change it is
//! [`GlobalState::apply`] with a [`Mutation`]; every mutation is a synchronous
//! last-write-wins replacement (or, for `CreatePost`, an append). Getters are
//! recomputed on every read.

#[cfg(test)]
#[path = "global_test.rs"]
mod global_test;

use crate::net::types::{ColumnRecord, PostRecord, UserRecord};

/// The single global error slot. Last write wins.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ErrorState {
    pub present: bool,
    pub message: Option<String>,
}

impl ErrorState {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self { present: true, message: Some(message.into()) }
    }

    #[must_use]
    pub fn cleared() -> Self {
        Self::default()
    }
}

/// Identity of the current session. `is_logged_in` implies `record.is_some()`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserState {
    pub is_logged_in: bool,
    pub record: Option<UserRecord>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GlobalState {
    pub error: ErrorState,
    /// Bearer token; empty when signed out.
    pub token: String,
    pub loading: bool,
    pub columns: Vec<ColumnRecord>,
    pub posts: Vec<PostRecord>,
    pub user: UserState,
}

/// Every synchronous state transition the store knows about.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mutation {
    /// Append one post to the local collection.
    CreatePost(PostRecord),
    /// Replace the column collection.
    SetColumns(Vec<ColumnRecord>),
    /// Replace the column collection with a single column.
    SetColumn(ColumnRecord),
    /// Replace the post collection.
    SetPosts(Vec<PostRecord>),
    SetLoading(bool),
    SetError(ErrorState),
    /// Store the token returned by login.
    SetToken(String),
    /// Mark the session logged in with the fetched identity.
    SetCurrentUser(UserRecord),
    /// Forget token and identity.
    SignOut,
}

impl Mutation {
    /// Stable name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::CreatePost(_) => "createPost",
            Self::SetColumns(_) => "fetchColumns",
            Self::SetColumn(_) => "fetchColumn",
            Self::SetPosts(_) => "fetchPosts",
            Self::SetLoading(_) => "setLoading",
            Self::SetError(_) => "setError",
            Self::SetToken(_) => "login",
            Self::SetCurrentUser(_) => "fetchCurrentUser",
            Self::SignOut => "signOut",
        }
    }
}

impl GlobalState {
    /// State at process start, hydrated with a persisted token if any.
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self { token: token.into(), ..Self::default() }
    }

    pub fn apply(&mut self, mutation: Mutation) {
        match mutation {
            Mutation::CreatePost(post) => self.posts.push(post),
            Mutation::SetColumns(columns) => self.columns = columns,
            Mutation::SetColumn(column) => self.columns = vec![column],
            Mutation::SetPosts(posts) => self.posts = posts,
            Mutation::SetLoading(loading) => self.loading = loading,
            Mutation::SetError(error) => self.error = error,
            Mutation::SetToken(token) => {
                self.token = token;
                if self.token.is_empty() {
                    self.user = UserState::default();
                }
            }
            // A logged-in session always holds a token.
            Mutation::SetCurrentUser(record) if self.token.is_empty() => {
                tracing::warn!(user_id = %record.id, "identity without a token ignored");
            }
            Mutation::SetCurrentUser(record) => {
                self.user = UserState { is_logged_in: true, record: Some(record) };
            }
            Mutation::SignOut => {
                self.token.clear();
                self.user = UserState::default();
            }
        }
    }

    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.user.is_logged_in
    }

    #[must_use]
    pub fn has_token(&self) -> bool {
        !self.token.is_empty()
    }

    /// First column whose id equals `id`.
    #[must_use]
    pub fn column_by_id(&self, id: &str) -> Option<&ColumnRecord> {
        self.columns.iter().find(|c| c.id == id)
    }

    /// All posts belonging to `column_id`, in collection order.
    #[must_use]
    pub fn posts_by_column(&self, column_id: &str) -> Vec<&PostRecord> {
        self.posts.iter().filter(|p| p.column_id == column_id).collect()
    }
}
