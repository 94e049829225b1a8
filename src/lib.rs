//! Football training planner: drill catalog, daily plan derivation and a
//! day-by-day completion history with streak tracking.
//!
//! The binary in `main.rs` is a ratatui front end over these modules.

pub mod app;
pub mod config;
pub mod engine;
pub mod event;
pub mod logging;
pub mod session;
pub mod store;
pub mod ui;
