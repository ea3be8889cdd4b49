//! App actor - message loop processing UI events and network responses

use tokio::sync::mpsc;

use crate::app::state::AppState;
use crate::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};

/// App actor that processes UI events and network responses
pub struct AppActor {
    state: AppState,
    network_tx: mpsc::UnboundedSender<NetworkCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        state: AppState,
        network_tx: mpsc::UnboundedSender<NetworkCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        AppActor {
            state,
            network_tx,
            render_tx,
        }
    }

    /// Run the actor message loop.
    ///
    /// The collection is loaded once on start, mirroring the initial mount
    /// of the view.
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut net_rx: mpsc::UnboundedReceiver<NetworkResponse>,
    ) {
        let load = self.state.load();
        self.send(load);
        let _ = self.render_tx.send(self.state.to_render_state());

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.handle_ui_event(event) {
                        break;
                    }
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                Some(response) = net_rx.recv() => {
                    if let Some(cmd) = self.state.handle_response(response) {
                        self.send(cmd);
                    }
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                else => break,
            }
        }

        // Teardown cancels whatever is still in flight
        let _ = self.network_tx.send(NetworkCommand::Shutdown);
    }

    fn send(&self, cmd: NetworkCommand) {
        if self.network_tx.send(cmd).is_err() {
            tracing::error!("Network actor is gone, dropping command");
        }
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        match event {
            // List navigation
            UiEvent::NextUser => self.state.next_user(),
            UiEvent::PrevUser => self.state.prev_user(),

            // Draft editing
            UiEvent::StartEditing => self.state.start_editing(),
            UiEvent::StopEditing => self.state.stop_editing(),
            UiEvent::CharInput(c) => self.state.enter_char(c),
            UiEvent::Backspace => self.state.delete_char(),
            UiEvent::CursorLeft => self.state.move_cursor_left(),
            UiEvent::CursorRight => self.state.move_cursor_right(),

            // Collection actions
            UiEvent::AddUser => {
                let cmd = self.state.add_user();
                self.send(cmd);
            }
            UiEvent::DeleteSelected => {
                if let Some(cmd) = self.state.delete_selected() {
                    self.send(cmd);
                }
            }
            UiEvent::Reload => {
                let cmd = self.state.load();
                self.send(cmd);
            }

            // Popups
            UiEvent::ToggleHelp => self.state.toggle_help(),
            UiEvent::CloseHelp => self.state.close_help(),

            // System
            UiEvent::Quit => return true,
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::config::Config;
    use crate::models::{User, UserId};
    use crate::network::test_server::{self, MockCollection};
    use crate::network::{NetworkActor, UsersClient};

    struct Harness {
        ui_tx: mpsc::UnboundedSender<UiEvent>,
        render_rx: mpsc::UnboundedReceiver<RenderState>,
    }

    impl Harness {
        async fn start(mock: &MockCollection) -> Harness {
            Self::start_with(mock, 0).await
        }

        async fn start_with(mock: &MockCollection, max_retries: u32) -> Harness {
            let base_url = test_server::spawn(mock.router()).await;
            let config = Config {
                base_url,
                max_retries,
                retry_backoff_ms: 1,
                ..Config::default()
            };
            let client = UsersClient::new(&config).unwrap();

            let (ui_tx, ui_rx) = mpsc::unbounded_channel();
            let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel();
            let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel();
            let (render_tx, render_rx) = mpsc::unbounded_channel();

            tokio::spawn(NetworkActor::new(client, net_resp_tx).run(net_cmd_rx));
            let app = AppActor::new(AppState::new(&config), net_cmd_tx, render_tx);
            tokio::spawn(app.run(ui_rx, net_resp_rx));

            Harness { ui_tx, render_rx }
        }

        /// Wait for a render state matching `pred`
        async fn until(&mut self, pred: impl Fn(&RenderState) -> bool) -> RenderState {
            tokio::time::timeout(Duration::from_secs(5), async {
                loop {
                    let state = self.render_rx.recv().await.expect("app actor stopped");
                    if pred(&state) {
                        return state;
                    }
                }
            })
            .await
            .expect("timed out waiting for render state")
        }
    }

    #[tokio::test]
    async fn test_initial_load_add_and_delete() {
        let mock = MockCollection::with_users(vec![User::new(1, "Alice")]);
        let mut harness = Harness::start(&mock).await;

        let state = harness.until(|s| s.loaded).await;
        assert_eq!(state.users, vec![User::new(1, "Alice")]);

        for c in "Bob".chars() {
            harness.ui_tx.send(UiEvent::CharInput(c)).unwrap();
        }
        harness.ui_tx.send(UiEvent::AddUser).unwrap();
        let state = harness.until(|s| s.users.len() == 2).await;
        assert_eq!(state.users[1], User::new(2, "Bob"));
        assert_eq!(state.draft, "");

        harness.ui_tx.send(UiEvent::DeleteSelected).unwrap();
        let state = harness.until(|s| s.users.len() == 1).await;
        assert_eq!(state.users, vec![User::new(2, "Bob")]);
        assert_eq!(mock.users(), vec![User::new(2, "Bob")]);
    }

    #[tokio::test]
    async fn test_delete_retried_into_not_found_clears_item() {
        let mock = MockCollection::with_users(vec![User::new(1, "Alice")]);
        let mut harness = Harness::start_with(&mock, 2).await;
        harness.until(|s| s.loaded && s.users.len() == 1).await;

        mock.remove_user(&UserId::from(1));
        mock.fail_next(1, 503);
        let hits_before = mock.hits();
        harness.ui_tx.send(UiEvent::DeleteSelected).unwrap();

        let state = harness.until(|s| s.users.is_empty() && s.in_flight == 0).await;
        assert!(state.users.is_empty());
        assert_eq!(mock.hits() - hits_before, 2);
    }

    #[tokio::test]
    async fn test_quit_stops_the_actor() {
        let mock = MockCollection::default();
        let mut harness = Harness::start(&mock).await;
        harness.until(|s| s.loaded).await;

        harness.ui_tx.send(UiEvent::Quit).unwrap();
        let closed = tokio::time::timeout(Duration::from_secs(5), async {
            while harness.render_rx.recv().await.is_some() {}
        })
        .await;
        assert!(closed.is_ok());
    }
}
