//! Taskdeck API server library.
//!
//! Exposes the task store and HTTP routes for use in tests and embedding.
//! The server is a four-route JSON CRUD API over a single task collection,
//! persisted as a JSON snapshot file.

pub mod config;
pub mod routes;
pub mod store;
