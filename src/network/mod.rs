//! Network layer - HTTP calls against the users collection
//!
//! The Network actor receives collection commands and sends back responses.

pub mod actor;
pub mod client;

#[cfg(test)]
pub(crate) mod test_server;

pub use actor::NetworkActor;
pub use client::UsersClient;
