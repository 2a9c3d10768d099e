//! # zheye
//!
//! Client core for the column/post publishing app: an auth-aware navigation
//! guard and a global store that mediates between front-ends and the REST API.
//!
//! `state` holds the store and its actions, `router` the route table and the
//! guard, `net` the typed API client, and `storage` the durable token slot.

pub mod config;
pub mod net;
pub mod router;
pub mod state;
pub mod storage;
