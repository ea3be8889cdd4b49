//! App state - pure data structure with no I/O logic

use std::collections::{HashMap, VecDeque};

use crate::config::Config;
use crate::constants::MAX_ACTIVITY;
use crate::messages::ui_events::InputMode;
use crate::messages::RenderState;
use crate::models::{ActivityEntry, ActivityKind, SyncPolicy, User, UserId};

/// A request that has been issued and not yet answered
#[derive(Clone, Debug, PartialEq)]
pub enum PendingOp {
    Load,
    Create { name: String },
    Delete { user_id: UserId },
}

/// Main application state - pure data, no I/O
pub struct AppState {
    // Settings
    pub base_url: String,
    pub sync_policy: SyncPolicy,
    pub reconcile_after_mutation: bool,

    // Local copy of the collection
    pub users: Vec<User>,
    pub selected: usize,
    pub loaded: bool,
    /// Error of the most recent failed load, cleared by the next success
    pub load_error: Option<String>,

    // Draft input
    pub draft: String,
    pub cursor_position: usize,
    pub input_mode: InputMode,

    // Requests
    pub next_request_id: u64,
    pub pending: HashMap<u64, PendingOp>,
    pub latest_load_id: Option<u64>,

    // Activity log, newest last
    pub activity: VecDeque<ActivityEntry>,

    // Popups
    pub show_help: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        AppState {
            base_url: config.base_url.clone(),
            sync_policy: config.sync_policy,
            reconcile_after_mutation: config.reconcile_after_mutation,
            users: Vec::new(),
            selected: 0,
            loaded: false,
            load_error: None,
            draft: String::new(),
            cursor_position: 0,
            input_mode: InputMode::Normal,
            next_request_id: 1,
            pending: HashMap::new(),
            latest_load_id: None,
            activity: VecDeque::with_capacity(MAX_ACTIVITY),
            show_help: false,
        }
    }

    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    /// Number of requests awaiting an answer
    pub fn in_flight(&self) -> usize {
        self.pending.len()
    }

    pub fn selected_user(&self) -> Option<&User> {
        self.users.get(self.selected)
    }

    /// Append a line to the activity log, dropping the oldest when full
    pub fn log(&mut self, kind: ActivityKind, message: impl Into<String>) {
        if self.activity.len() >= MAX_ACTIVITY {
            self.activity.pop_front();
        }
        self.activity.push_back(ActivityEntry::new(kind, message));
    }

    /// Keep the selection inside the list
    pub fn clamp_selection(&mut self) {
        if self.users.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.users.len() {
            self.selected = self.users.len() - 1;
        }
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            base_url: self.base_url.clone(),
            sync_policy: self.sync_policy,
            users: self.users.clone(),
            selected: self.selected,
            loaded: self.loaded,
            load_error: self.load_error.clone(),
            draft: self.draft.clone(),
            cursor_position: self.cursor_position,
            input_mode: self.input_mode,
            in_flight: self.in_flight(),
            activity: self.activity.iter().cloned().collect(),
            show_help: self.show_help,
        }
    }
}
