//! Network messages - communication between App and Network layers

use crate::error::ApiError;
use crate::models::{NewUser, User, UserId};

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// GET the whole collection
    ListUsers { id: u64 },
    /// POST a new user
    CreateUser { id: u64, user: NewUser },
    /// DELETE one user
    DeleteUser { id: u64, user_id: UserId },
    /// Abort in-flight requests and stop the network actor
    Shutdown,
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone)]
pub enum NetworkResponse {
    UsersListed {
        id: u64,
        result: Result<Vec<User>, ApiError>,
        time_ms: u64,
    },
    UserCreated {
        id: u64,
        result: Result<User, ApiError>,
        time_ms: u64,
    },
    UserDeleted {
        id: u64,
        user_id: UserId,
        result: Result<(), ApiError>,
        time_ms: u64,
    },
}

impl NetworkResponse {
    /// Get the request ID from the response
    pub fn id(&self) -> u64 {
        match self {
            NetworkResponse::UsersListed { id, .. } => *id,
            NetworkResponse::UserCreated { id, .. } => *id,
            NetworkResponse::UserDeleted { id, .. } => *id,
        }
    }

    /// Whether the underlying request succeeded
    pub fn is_ok(&self) -> bool {
        match self {
            NetworkResponse::UsersListed { result, .. } => result.is_ok(),
            NetworkResponse::UserCreated { result, .. } => result.is_ok(),
            NetworkResponse::UserDeleted { result, .. } => result.is_ok(),
        }
    }
}
