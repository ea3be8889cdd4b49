//! Network actor - runs collection requests in the Tokio async runtime

use std::time::Instant;

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::messages::{NetworkCommand, NetworkResponse};
use crate::network::client::UsersClient;

/// Network actor that executes collection requests concurrently.
///
/// Every command runs in its own task, so responses come back in the order
/// the server answers them, not the order they were issued.
pub struct NetworkActor {
    client: UsersClient,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_requests: JoinSet<()>,
}

impl NetworkActor {
    pub fn new(client: UsersClient, response_tx: mpsc::UnboundedSender<NetworkResponse>) -> Self {
        NetworkActor {
            client,
            response_tx,
            active_requests: JoinSet::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::Shutdown) | None => break,
                        Some(cmd) => self.spawn(cmd),
                    }
                }

                Some(result) = self.active_requests.join_next() => {
                    if let Err(e) = result {
                        if e.is_panic() {
                            tracing::error!(error = %e, "Request task panicked");
                        }
                    }
                }
            }
        }

        let pending = self.active_requests.len();
        if pending > 0 {
            tracing::info!(pending, "Aborting in-flight requests");
        }
        self.active_requests.shutdown().await;
    }

    fn spawn(&mut self, cmd: NetworkCommand) {
        let client = self.client.clone();
        let response_tx = self.response_tx.clone();

        self.active_requests.spawn(async move {
            if let Some(response) = execute(&client, cmd).await {
                let _ = response_tx.send(response);
            }
        });
    }
}

/// Execute a single command, returning the response to report
pub async fn execute(client: &UsersClient, cmd: NetworkCommand) -> Option<NetworkResponse> {
    let start = Instant::now();

    let response = match cmd {
        NetworkCommand::ListUsers { id } => {
            tracing::info!(id, url = %client.collection_url(), "Listing users");
            let result = client.list_users().await;
            NetworkResponse::UsersListed {
                id,
                result,
                time_ms: start.elapsed().as_millis() as u64,
            }
        }
        NetworkCommand::CreateUser { id, user } => {
            tracing::info!(id, name = %user.name, "Creating user");
            let result = client.create_user(&user).await;
            NetworkResponse::UserCreated {
                id,
                result,
                time_ms: start.elapsed().as_millis() as u64,
            }
        }
        NetworkCommand::DeleteUser { id, user_id } => {
            tracing::info!(id, user_id = %user_id, "Deleting user");
            let result = client.delete_user(&user_id).await;
            NetworkResponse::UserDeleted {
                id,
                user_id,
                result,
                time_ms: start.elapsed().as_millis() as u64,
            }
        }
        NetworkCommand::Shutdown => return None,
    };

    if response.is_ok() {
        tracing::info!(id = response.id(), "Request completed");
    } else {
        tracing::error!(id = response.id(), ?response, "Request failed");
    }
    Some(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::config::Config;
    use crate::models::{NewUser, User, UserId};
    use crate::network::test_server::{self, MockCollection};

    async fn start(mock: &MockCollection) -> (
        mpsc::UnboundedSender<NetworkCommand>,
        mpsc::UnboundedReceiver<NetworkResponse>,
        tokio::task::JoinHandle<()>,
    ) {
        let base_url = test_server::spawn(mock.router()).await;
        let config = Config { base_url, max_retries: 0, ..Config::default() };
        let client = UsersClient::new(&config).unwrap();

        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (resp_tx, resp_rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(NetworkActor::new(client, resp_tx).run(cmd_rx));
        (cmd_tx, resp_rx, handle)
    }

    #[tokio::test]
    async fn test_list_command_reports_users() {
        let mock = MockCollection::with_users(vec![User::new(1, "Alice")]);
        let (cmd_tx, mut resp_rx, _handle) = start(&mock).await;

        cmd_tx.send(NetworkCommand::ListUsers { id: 7 }).unwrap();
        match resp_rx.recv().await.unwrap() {
            NetworkResponse::UsersListed { id, result, .. } => {
                assert_eq!(id, 7);
                assert_eq!(result.unwrap(), vec![User::new(1, "Alice")]);
            }
            other => panic!("unexpected response: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_responses_follow_arrival_order() {
        let mock = MockCollection::default();
        mock.delay_create("Slow", 300);
        let (cmd_tx, mut resp_rx, _handle) = start(&mock).await;

        cmd_tx.send(NetworkCommand::CreateUser { id: 1, user: NewUser::new("Slow") }).unwrap();
        cmd_tx.send(NetworkCommand::CreateUser { id: 2, user: NewUser::new("Fast") }).unwrap();

        let first = resp_rx.recv().await.unwrap();
        let second = resp_rx.recv().await.unwrap();
        assert_eq!(first.id(), 2);
        assert_eq!(second.id(), 1);
    }

    #[tokio::test]
    async fn test_delete_error_is_reported() {
        let mock = MockCollection::default();
        let (cmd_tx, mut resp_rx, _handle) = start(&mock).await;

        cmd_tx
            .send(NetworkCommand::DeleteUser { id: 3, user_id: UserId::from(9) })
            .unwrap();
        match resp_rx.recv().await.unwrap() {
            NetworkResponse::UserDeleted { user_id, result, .. } => {
                assert_eq!(user_id, UserId::from(9));
                assert_eq!(result.unwrap_err().status(), Some(404));
            }
            other => panic!("unexpected response: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_shutdown_aborts_in_flight_requests() {
        let mock = MockCollection::default();
        mock.delay_create("Never", 5_000);
        let (cmd_tx, mut resp_rx, handle) = start(&mock).await;

        cmd_tx.send(NetworkCommand::CreateUser { id: 1, user: NewUser::new("Never") }).unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;
        cmd_tx.send(NetworkCommand::Shutdown).unwrap();

        tokio::time::timeout(Duration::from_secs(2), handle).await.unwrap().unwrap();
        assert!(resp_rx.recv().await.is_none());
    }
}
