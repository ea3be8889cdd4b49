//! Render state - data structure sent from App layer to UI for rendering

use crate::constants::DEFAULT_BASE_URL;
use crate::messages::ui_events::InputMode;
use crate::models::{ActivityEntry, SyncPolicy, User};

/// Complete state needed by the UI to render
#[derive(Debug, Clone)]
pub struct RenderState {
    pub base_url: String,
    pub sync_policy: SyncPolicy,

    // User list
    pub users: Vec<User>,
    pub selected: usize,
    pub loaded: bool,
    pub load_error: Option<String>,

    // Draft input
    pub draft: String,
    pub cursor_position: usize,
    pub input_mode: InputMode,

    // Requests
    pub in_flight: usize,
    pub activity: Vec<ActivityEntry>,

    // Popups
    pub show_help: bool,
}

impl Default for RenderState {
    fn default() -> Self {
        RenderState {
            base_url: String::from(DEFAULT_BASE_URL),
            sync_policy: SyncPolicy::default(),
            users: Vec::new(),
            selected: 0,
            loaded: false,
            load_error: None,
            draft: String::new(),
            cursor_position: 0,
            input_mode: InputMode::Normal,
            in_flight: 0,
            activity: Vec::new(),
            show_help: false,
        }
    }
}
