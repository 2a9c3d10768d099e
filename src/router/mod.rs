//! Client-side navigation: route table, guard, and the router that runs them.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every navigation goes through [`Router::push`]. The guard decides from the
//! store's session whether to proceed, redirect, or first restore the
//! identity behind a persisted token. Redirects are navigations too and are
//! guarded again, up to [`MAX_REDIRECTS`] hops.
//!
//! There is no cancellation: a second `push` while an identity fetch is in
//! flight runs independently, and whichever fetch settles last wins.

pub mod guard;
pub mod routes;


use std::sync::{Mutex, PoisonError};

use guard::{GuardPhase, Outcome, PendingNavigation, SessionView};
use routes::{RouteMatch, RouteTable};

use crate::state::Store;

pub const MAX_REDIRECTS: usize = 8;

#[derive(Debug, thiserror::Error)]
pub enum NavigationError {
    #[error("too many redirects navigating to {requested}: {chain:?}")]
    RedirectLoop { requested: String, chain: Vec<String> },
}

/// Where a navigation landed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Navigation {
    /// Path as passed to `push`.
    pub requested: String,
    /// Normalized path finally reached.
    pub path: String,
    /// Matched route, or `None` for a path outside the table.
    pub route: Option<RouteMatch>,
    /// Redirect targets followed, in order.
    pub redirects: Vec<String>,
}

impl Navigation {
    #[must_use]
    pub fn was_redirected(&self) -> bool {
        !self.redirects.is_empty()
    }
}

pub struct Router {
    store: Store,
    routes: RouteTable,
    phase: Mutex<GuardPhase>,
    current: Mutex<Option<Navigation>>,
}

impl Router {
    #[must_use]
    pub fn new(store: Store, routes: RouteTable) -> Self {
        Self { store, routes, phase: Mutex::new(GuardPhase::Idle), current: Mutex::new(None) }
    }

    #[must_use]
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Guard phase of the most recent navigation step.
    #[must_use]
    pub fn phase(&self) -> GuardPhase {
        self.phase.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// The last navigation that landed.
    #[must_use]
    pub fn current(&self) -> Option<Navigation> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Navigate to `path`, following guard redirects.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::RedirectLoop`] if the guard keeps
    /// redirecting past [`MAX_REDIRECTS`].
    pub async fn push(&self, path: &str) -> Result<Navigation, NavigationError> {
        let mut target = self.routes.normalize(path);
        let mut redirects = Vec::new();

        loop {
            let outcome = self.before_each(&target).await;
            let Outcome::Redirect(next) = outcome else { break };
            if redirects.len() >= MAX_REDIRECTS {
                return Err(NavigationError::RedirectLoop { requested: path.to_owned(), chain: redirects });
            }
            tracing::debug!(from = %target, to = %next, "guard redirect");
            target = self.routes.normalize(&next);
            redirects.push(next);
        }

        let navigation =
            Navigation { requested: path.to_owned(), route: self.routes.resolve(&target), path: target, redirects };
        tracing::info!(requested = %navigation.requested, path = %navigation.path, "navigated");
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = Some(navigation.clone());
        Ok(navigation)
    }

    /// Run the guard once for `target`.
    async fn before_each(&self, target: &str) -> Outcome {
        let meta = self.routes.meta_for(target);
        let session = SessionView {
            is_logged_in: self.store.is_logged_in(),
            has_token: !self.store.token().is_empty(),
        };

        let mut phase = GuardPhase::begin(target, meta, session);
        if let GuardPhase::AwaitingIdentity(pending) = &phase {
            self.set_phase(phase.clone());
            let identity_ok = self.restore_identity(pending).await;
            phase = phase.resume(identity_ok);
        }
        self.set_phase(phase.clone());
        phase.outcome().cloned().unwrap_or(Outcome::Proceed)
    }

    /// Install the persisted token and fetch the identity behind it. On
    /// failure the session is cleared; the error is only logged.
    async fn restore_identity(&self, pending: &PendingNavigation) -> bool {
        let token = self.store.token();
        self.store.api().set_bearer_token(Some(&token));
        match self.store.fetch_current_user().await {
            Ok(user) => {
                tracing::info!(user_id = %user.id, "session restored from persisted token");
                true
            }
            Err(e) => {
                tracing::error!(error = %e, target = %pending.target, "identity refresh failed; signing out");
                if let Err(e) = self.store.sign_out() {
                    tracing::warn!(error = %e, "sign-out could not clear persisted token");
                }
                false
            }
        }
    }

    fn set_phase(&self, phase: GuardPhase) {
        *self.phase.lock().unwrap_or_else(PoisonError::into_inner) = phase;
    }
}
