//! Command handlers - state transitions for UI events and network responses
//!
//! Every handler is a plain state mutation, optionally returning the
//! network command to issue. Nothing here performs I/O.

use crate::app::state::{AppState, PendingOp};
use crate::error::ApiError;
use crate::messages::ui_events::InputMode;
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::{ActivityKind, NewUser, SyncPolicy, User, UserId};

impl AppState {
    // ========================
    // List navigation
    // ========================

    pub fn next_user(&mut self) {
        if !self.users.is_empty() {
            self.selected = (self.selected + 1) % self.users.len();
        }
    }

    pub fn prev_user(&mut self) {
        if !self.users.is_empty() {
            self.selected = self.selected.checked_sub(1).unwrap_or(self.users.len() - 1);
        }
    }

    // ========================
    // Draft editing
    // ========================

    pub fn start_editing(&mut self) {
        self.input_mode = InputMode::Editing;
        self.cursor_position = self.draft.len();
    }

    pub fn stop_editing(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn enter_char(&mut self, c: char) {
        self.draft.insert(self.cursor_position, c);
        self.cursor_position += c.len_utf8();
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position == 0 {
            return;
        }
        if let Some((idx, _)) = self.draft[..self.cursor_position].char_indices().last() {
            self.draft.remove(idx);
            self.cursor_position = idx;
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor_position = self.draft[..self.cursor_position]
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0);
    }

    pub fn move_cursor_right(&mut self) {
        if let Some(c) = self.draft[self.cursor_position..].chars().next() {
            self.cursor_position += c.len_utf8();
        }
    }

    // ========================
    // Collection operations
    // ========================

    /// Fetch the whole collection; supersedes any load still in flight
    pub fn load(&mut self) -> NetworkCommand {
        let id = self.next_id();
        self.pending.insert(id, PendingOp::Load);
        self.latest_load_id = Some(id);
        self.log(ActivityKind::Info, "GET /users");
        NetworkCommand::ListUsers { id }
    }

    /// Send the draft as a new user. The draft is sent as-is, empty included.
    pub fn add_user(&mut self) -> NetworkCommand {
        self.stop_editing();
        let name = self.draft.clone();
        let id = self.next_id();
        self.pending.insert(id, PendingOp::Create { name: name.clone() });
        self.log(ActivityKind::Info, format!("POST /users {{name: {:?}}}", name));
        NetworkCommand::CreateUser {
            id,
            user: NewUser::new(name),
        }
    }

    /// Delete the selected user, if any
    pub fn delete_selected(&mut self) -> Option<NetworkCommand> {
        let user_id = self.selected_user()?.id.clone();
        Some(self.delete_user(user_id))
    }

    pub fn delete_user(&mut self, user_id: UserId) -> NetworkCommand {
        let id = self.next_id();
        self.pending.insert(id, PendingOp::Delete { user_id: user_id.clone() });
        self.log(ActivityKind::Info, format!("DELETE /users/{}", user_id));
        NetworkCommand::DeleteUser { id, user_id }
    }

    // ========================
    // Response handling
    // ========================

    /// Apply a network response. Returns a follow-up command when the
    /// list should be re-fetched.
    pub fn handle_response(&mut self, response: NetworkResponse) -> Option<NetworkCommand> {
        let op = self.pending.remove(&response.id());

        let follow_up = match response {
            NetworkResponse::UsersListed { id, result, time_ms } => {
                self.apply_load(id, result, time_ms);
                None
            }
            NetworkResponse::UserCreated { result, time_ms, .. } => {
                let submitted = match op {
                    Some(PendingOp::Create { name }) => Some(name),
                    _ => None,
                };
                self.apply_create(submitted, result, time_ms)
            }
            NetworkResponse::UserDeleted { user_id, result, time_ms, .. } => {
                self.apply_delete(user_id, result, time_ms)
            }
        };

        self.clamp_selection();
        follow_up
    }

    fn apply_load(&mut self, id: u64, result: Result<Vec<User>, ApiError>, time_ms: u64) {
        if self.latest_load_id != Some(id) {
            tracing::debug!(id, "Dropping superseded load");
            return;
        }
        self.latest_load_id = None;

        match result {
            Ok(users) => {
                self.log(
                    ActivityKind::Success,
                    format!("Loaded {} users ({}ms)", users.len(), time_ms),
                );
                self.users = users;
                self.loaded = true;
                self.load_error = None;
            }
            Err(e) => {
                self.log(ActivityKind::Error, format!("Load failed: {}", e));
                self.load_error = Some(e.to_string());
            }
        }
    }

    fn apply_create(
        &mut self,
        submitted: Option<String>,
        result: Result<User, ApiError>,
        time_ms: u64,
    ) -> Option<NetworkCommand> {
        match result {
            Ok(user) => {
                self.log(
                    ActivityKind::Success,
                    format!("Added {} (id {}) ({}ms)", user.name, user.id, time_ms),
                );
                self.users.push(user);
                // A draft edited since submission belongs to the next add
                if submitted.as_deref() == Some(self.draft.as_str()) {
                    self.draft.clear();
                    self.cursor_position = 0;
                }
                self.reconcile()
            }
            Err(e) => {
                self.log(ActivityKind::Error, format!("Add failed: {}", e));
                None
            }
        }
    }

    fn apply_delete(
        &mut self,
        user_id: UserId,
        result: Result<(), ApiError>,
        time_ms: u64,
    ) -> Option<NetworkCommand> {
        let confirmed = match &result {
            Ok(()) => true,
            Err(e) => e.status() == Some(404),
        };

        if let Err(e) = &result {
            self.log(ActivityKind::Error, format!("Delete {} failed: {}", user_id, e));
        }

        if confirmed || self.sync_policy == SyncPolicy::Optimistic {
            self.users.retain(|u| u.id != user_id);
            if result.is_ok() {
                self.log(
                    ActivityKind::Success,
                    format!("Deleted {} ({}ms)", user_id, time_ms),
                );
            }
        }

        if result.is_ok() {
            self.reconcile()
        } else {
            None
        }
    }

    fn reconcile(&mut self) -> Option<NetworkCommand> {
        if self.reconcile_after_mutation {
            Some(self.load())
        } else {
            None
        }
    }

    // ========================
    // Popups
    // ========================

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }
}
