//! Client-side global state.
//!
//! DESIGN
//! ======
//! `global` holds the plain state and its named mutations; `store` wraps it
//! in a shared handle with the async actions that talk to the API.

pub mod global;
pub mod store;

pub use global::{ErrorState, GlobalState, Mutation, UserState};
pub use store::{Store, StoreError};
