//! Networking modules for the REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` owns the HTTP client and the bearer credential, `types` defines the
//! wire records shared by every endpoint.

pub mod api;
pub mod types;
