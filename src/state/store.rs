//! Shared store handle: global state plus the actions that feed it.
//!
//! SYSTEM CONTEXT
//! ==============
//! Front-ends and the router hold clones of [`Store`]. Actions perform exactly
//! one API call each and commit the matching [`Mutation`] on success only.
//! Failures are returned to the caller; the store never sets the global error
//! slot on its own and never retries.
//!
//! The state lock is held for a single mutation and never across an await, so
//! concurrent actions interleave as last-write-wins replacements.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::sync::{Arc, Mutex, PoisonError};

use super::global::{ErrorState, GlobalState, Mutation};
use crate::net::api::{ApiError, ColumnApi};
use crate::net::types::{ColumnRecord, LoginRequest, PostRecord, UserRecord};
use crate::storage::{KeyValueStorage, StorageError, TOKEN_KEY};

/// Errors returned by store actions.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("no session token; log in first")]
    NoToken,
}

#[derive(Clone)]
pub struct Store {
    state: Arc<Mutex<GlobalState>>,
    api: Arc<dyn ColumnApi>,
    storage: Arc<dyn KeyValueStorage>,
}

impl Store {
    /// Create the store, hydrating the token from `storage`.
    ///
    /// An unreadable storage backend is logged and treated as "no token".
    #[must_use]
    pub fn new(api: Arc<dyn ColumnApi>, storage: Arc<dyn KeyValueStorage>) -> Self {
        let token = match storage.get_item(TOKEN_KEY) {
            Ok(token) => token.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(error = %e, "persisted token unreadable; starting signed out");
                String::new()
            }
        };
        Self { state: Arc::new(Mutex::new(GlobalState::with_token(token))), api, storage }
    }

    /// Apply one mutation. This is the only write path into the state.
    pub fn commit(&self, mutation: Mutation) {
        tracing::debug!(mutation = mutation.name(), "commit");
        self.state.lock().unwrap_or_else(PoisonError::into_inner).apply(mutation);
    }

    /// Snapshot of the whole state.
    #[must_use]
    pub fn snapshot(&self) -> GlobalState {
        self.read(GlobalState::clone)
    }

    fn read<R>(&self, f: impl FnOnce(&GlobalState) -> R) -> R {
        let guard = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&*guard)
    }

    #[must_use]
    pub fn api(&self) -> &Arc<dyn ColumnApi> {
        &self.api
    }

    #[must_use]
    pub fn token(&self) -> String {
        self.read(|s| s.token.clone())
    }

    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.read(GlobalState::is_logged_in)
    }

    #[must_use]
    pub fn current_user(&self) -> Option<UserRecord> {
        self.read(|s| s.user.record.clone())
    }

    // =========================================================================
    // GETTERS
    // =========================================================================

    #[must_use]
    pub fn column_by_id(&self, id: &str) -> Option<ColumnRecord> {
        self.read(|s| s.column_by_id(id).cloned())
    }

    #[must_use]
    pub fn posts_by_column(&self, column_id: &str) -> Vec<PostRecord> {
        self.read(|s| s.posts_by_column(column_id).into_iter().cloned().collect())
    }

    // =========================================================================
    // ACTIONS
    // =========================================================================

    /// Load all columns, replacing the local collection.
    ///
    /// # Errors
    ///
    /// Returns the API error; state is left untouched.
    pub async fn fetch_columns(&self) -> Result<Vec<ColumnRecord>, StoreError> {
        let columns = self.api.fetch_columns().await?;
        self.commit(Mutation::SetColumns(columns.clone()));
        Ok(columns)
    }

    /// Load one column; the local collection becomes just that column.
    ///
    /// # Errors
    ///
    /// Returns the API error; state is left untouched.
    pub async fn fetch_column(&self, id: &str) -> Result<ColumnRecord, StoreError> {
        let column = self.api.fetch_column(id).await?;
        self.commit(Mutation::SetColumn(column.clone()));
        Ok(column)
    }

    /// Load the posts of one column, replacing the local collection.
    ///
    /// # Errors
    ///
    /// Returns the API error; state is left untouched.
    pub async fn fetch_posts(&self, column_id: &str) -> Result<Vec<PostRecord>, StoreError> {
        let posts = self.api.fetch_posts(column_id).await?;
        self.commit(Mutation::SetPosts(posts.clone()));
        Ok(posts)
    }

    /// Fetch the identity behind the current bearer token and mark the
    /// session logged in.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NoToken`] without calling the API when no token
    /// is held, otherwise the API error (typically 401 for an expired token).
    pub async fn fetch_current_user(&self) -> Result<UserRecord, StoreError> {
        if self.token().is_empty() {
            return Err(StoreError::NoToken);
        }
        let user = self.api.fetch_current_user().await?;
        self.commit(Mutation::SetCurrentUser(user.clone()));
        Ok(user)
    }

    /// Exchange credentials for a token: persist it, store it, and install it
    /// as the bearer credential. Does not mark the session logged in.
    ///
    /// # Errors
    ///
    /// Returns the API error for rejected credentials, or the storage error
    /// if the token cannot be persisted. An empty token in the response is
    /// an [`ApiError::Parse`]. In all cases state is untouched.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<String, StoreError> {
        let response = self.api.login(credentials).await?;
        let token = response.token;
        if token.is_empty() {
            return Err(ApiError::Parse("login response carried an empty token".to_owned()).into());
        }
        self.storage.set_item(TOKEN_KEY, &token)?;
        self.commit(Mutation::SetToken(token.clone()));
        self.api.set_bearer_token(Some(&token));
        tracing::info!(email = %credentials.email, "logged in");
        Ok(token)
    }

    /// `login` followed by `fetch_current_user`, strictly in sequence.
    ///
    /// A failed identity fetch does not roll back the stored token.
    ///
    /// # Errors
    ///
    /// Returns the first failing step's error.
    pub async fn login_and_fetch(&self, credentials: &LoginRequest) -> Result<UserRecord, StoreError> {
        self.login(credentials).await?;
        self.fetch_current_user().await
    }

    /// Append a post created elsewhere to the local collection. No network
    /// call is made here.
    pub fn create_post(&self, post: PostRecord) {
        self.commit(Mutation::CreatePost(post));
    }

    pub fn set_loading(&self, loading: bool) {
        self.commit(Mutation::SetLoading(loading));
    }

    pub fn set_error(&self, error: ErrorState) {
        self.commit(Mutation::SetError(error));
    }

    /// Forget the session: clear state, drop the persisted token and the
    /// bearer credential.
    ///
    /// # Errors
    ///
    /// Returns the storage error if the persisted token cannot be removed.
    /// In-memory state and the bearer credential are cleared regardless.
    pub fn sign_out(&self) -> Result<(), StoreError> {
        self.commit(Mutation::SignOut);
        self.api.set_bearer_token(None);
        self.storage.remove_item(TOKEN_KEY)?;
        tracing::info!("signed out");
        Ok(())
    }
}
