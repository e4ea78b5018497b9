//! Taskdeck terminal client library.
//!
//! The client mirrors the server's task list in memory: a reducer-style
//! [`state`] module owns the list, [`api`] talks HTTP, [`net`] bridges the
//! poll-based TUI loop to spawned request tasks, and [`ui`] renders.

pub mod api;
pub mod app;
pub mod config;
pub mod net;
pub mod state;
pub mod ui;
