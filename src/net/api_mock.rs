//! Recording `ColumnApi` double shared by store and router tests.

use std::sync::Mutex;

use super::{ApiError, ColumnApi};
use crate::net::types::{ColumnRecord, LoginRequest, LoginResponse, PostRecord, UserRecord};

/// Scripted responses plus a log of every call made.
#[derive(Default)]
pub struct MockApi {
    pub columns: Mutex<Vec<ColumnRecord>>,
    pub posts: Mutex<Vec<PostRecord>>,
    /// `None` makes `fetch_current_user` answer 401.
    pub user: Mutex<Option<UserRecord>>,
    /// Password accepted by `login`; anything else answers 400.
    pub password: Mutex<Option<String>>,
    pub token: Mutex<String>,
    /// Fails every non-login call with a transport error when set.
    pub offline: Mutex<bool>,
    pub calls: Mutex<Vec<String>>,
    pub bearer: Mutex<Option<String>>,
}

impl MockApi {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_user(self, user: UserRecord) -> Self {
        *self.user.lock().unwrap() = Some(user);
        self
    }

    #[must_use]
    pub fn with_login(self, password: &str, token: &str) -> Self {
        *self.password.lock().unwrap() = Some(password.to_owned());
        *self.token.lock().unwrap() = token.to_owned();
        self
    }

    #[must_use]
    pub fn with_columns(self, columns: Vec<ColumnRecord>) -> Self {
        *self.columns.lock().unwrap() = columns;
        self
    }

    #[must_use]
    pub fn with_posts(self, posts: Vec<PostRecord>) -> Self {
        *self.posts.lock().unwrap() = posts;
        self
    }

    pub fn set_offline(&self, offline: bool) {
        *self.offline.lock().unwrap() = offline;
    }

    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    #[must_use]
    pub fn call_count(&self, name: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| c.as_str() == name).count()
    }

    #[must_use]
    pub fn bearer(&self) -> Option<String> {
        self.bearer.lock().unwrap().clone()
    }

    fn record(&self, call: &str) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(call.to_owned());
        if *self.offline.lock().unwrap() {
            return Err(ApiError::Request("connection refused".to_owned()));
        }
        Ok(())
    }
}

#[must_use]
pub fn user(id: &str) -> UserRecord {
    UserRecord {
        id: id.to_owned(),
        nickname: format!("nick-{id}"),
        email: format!("{id}@example.com"),
        column_id: Some(format!("col-{id}")),
    }
}

#[must_use]
pub fn column(id: &str, title: &str) -> ColumnRecord {
    ColumnRecord { id: id.to_owned(), title: title.to_owned(), description: String::new(), avatar: None }
}

#[must_use]
pub fn post(id: &str, column_id: &str) -> PostRecord {
    PostRecord {
        id: id.to_owned(),
        title: format!("post {id}"),
        excerpt: None,
        content: None,
        image: None,
        created_at: "2020-06-11 10:34:22".to_owned(),
        column_id: column_id.to_owned(),
    }
}

#[async_trait::async_trait]
impl ColumnApi for MockApi {
    fn set_bearer_token(&self, token: Option<&str>) {
        *self.bearer.lock().unwrap() = token.map(str::to_owned);
    }

    async fn fetch_columns(&self) -> Result<Vec<ColumnRecord>, ApiError> {
        self.record("fetch_columns")?;
        Ok(self.columns.lock().unwrap().clone())
    }

    async fn fetch_column(&self, id: &str) -> Result<ColumnRecord, ApiError> {
        self.record("fetch_column")?;
        self.columns
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| ApiError::Status { status: 404, body: "column not found".to_owned() })
    }

    async fn fetch_posts(&self, column_id: &str) -> Result<Vec<PostRecord>, ApiError> {
        self.record("fetch_posts")?;
        // Real servers filter by column; keep foreign rows to prove the getter filters too.
        let _ = column_id;
        Ok(self.posts.lock().unwrap().clone())
    }

    async fn fetch_current_user(&self) -> Result<UserRecord, ApiError> {
        self.record("fetch_current_user")?;
        self.user
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| ApiError::Status { status: 401, body: "token expired".to_owned() })
    }

    async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.record("login")?;
        let accepted = self.password.lock().unwrap().as_deref() == Some(credentials.password.as_str());
        if !accepted {
            return Err(ApiError::Status { status: 400, body: "wrong password".to_owned() });
        }
        Ok(LoginResponse { token: self.token.lock().unwrap().clone() })
    }
}
