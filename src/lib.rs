//! # User List TUI
//!
//! A terminal manager for a remote users collection.
//!
//! ## Features
//! - Load the collection from `GET /users`
//! - Add a user with `POST /users`
//! - Delete a user with `DELETE /users/{id}`
//! - Explicit errors for every request, with retries on transient failures
//! - Confirmed or optimistic delete policy, optional re-fetch after changes
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine)
//! - Network Layer (Tokio runtime)

pub mod app;
pub mod config;
pub mod constants;
pub mod error;
pub mod messages;
pub mod models;
pub mod network;
pub mod ui;

// Re-export commonly used types
pub use app::{AppActor, AppState};
pub use config::Config;
pub use error::ApiError;
pub use messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
pub use models::{NewUser, SyncPolicy, User, UserId};
pub use network::{NetworkActor, UsersClient};
