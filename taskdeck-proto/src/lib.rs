//! Shared data model and JSON wire types for the taskdeck HTTP API.

pub mod api;
pub mod patch;
pub mod task;
