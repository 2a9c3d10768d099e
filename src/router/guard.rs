//! Pre-navigation guard as an explicit state machine.
//!
//! SYSTEM CONTEXT
//! ==============
//! The router calls [`GuardPhase::begin`] for every navigation. When the
//! session has a persisted token but no identity yet, the guard suspends in
//! [`GuardPhase::AwaitingIdentity`]; the router performs the identity fetch
//! and feeds the result to [`PendingNavigation::resume`].
//!
//! Decision order:
//! 1. logged in: redirect home from `redirect_if_logged_in` routes, else proceed
//! 2. token but no identity: suspend until the identity fetch settles
//! 3. anonymous: redirect to login from `requires_login` routes, else proceed

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use super::routes::{HOME_PATH, LOGIN_PATH, RouteMeta};

/// Final verdict for one navigation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Proceed,
    Redirect(String),
}

impl Outcome {
    fn home() -> Self {
        Self::Redirect(HOME_PATH.to_owned())
    }

    fn login() -> Self {
        Self::Redirect(LOGIN_PATH.to_owned())
    }
}

/// The parts of the session the guard reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionView {
    pub is_logged_in: bool,
    pub has_token: bool,
}

/// A navigation parked until the identity fetch settles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingNavigation {
    /// Path originally requested.
    pub target: String,
    pub meta: RouteMeta,
}

impl PendingNavigation {
    /// Decide the parked navigation once the identity fetch has settled.
    #[must_use]
    pub fn resume(&self, identity_ok: bool) -> Outcome {
        if !identity_ok {
            Outcome::login()
        } else if self.meta.redirect_if_logged_in {
            Outcome::home()
        } else {
            Outcome::Proceed
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum GuardPhase {
    #[default]
    Idle,
    AwaitingIdentity(PendingNavigation),
    Resolved(Outcome),
}

impl GuardPhase {
    /// Start a navigation to `target`. Never returns `Idle`.
    #[must_use]
    pub fn begin(target: &str, meta: RouteMeta, session: SessionView) -> Self {
        if session.is_logged_in {
            let outcome = if meta.redirect_if_logged_in { Outcome::home() } else { Outcome::Proceed };
            return Self::Resolved(outcome);
        }
        if session.has_token {
            return Self::AwaitingIdentity(PendingNavigation { target: target.to_owned(), meta });
        }
        let outcome = if meta.requires_login { Outcome::login() } else { Outcome::Proceed };
        Self::Resolved(outcome)
    }

    /// Settle an `AwaitingIdentity` phase. Other phases are returned as is.
    #[must_use]
    pub fn resume(self, identity_ok: bool) -> Self {
        match self {
            Self::AwaitingIdentity(pending) => Self::Resolved(pending.resume(identity_ok)),
            other => other,
        }
    }

    #[must_use]
    pub fn outcome(&self) -> Option<&Outcome> {
        match self {
            Self::Resolved(outcome) => Some(outcome),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_awaiting_identity(&self) -> bool {
        matches!(self, Self::AwaitingIdentity(_))
    }
}
