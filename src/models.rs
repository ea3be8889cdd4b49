use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-assigned user identifier.
///
/// Collection servers hand out either numeric or string ids, so both JSON
/// shapes are accepted and written back unchanged. Any JSON number is kept,
/// negative and fractional ones included.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserId::Number(n) => write!(f, "{}", n),
            UserId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for UserId {
    fn from(id: u64) -> Self {
        UserId::Number(id.into())
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        UserId::Text(id.to_string())
    }
}

/// A user as held by the collection server
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
}

impl User {
    pub fn new(id: impl Into<UserId>, name: impl Into<String>) -> Self {
        User {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Body of a create request
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
}

impl NewUser {
    pub fn new(name: impl Into<String>) -> Self {
        NewUser { name: name.into() }
    }
}

/// How local deletes relate to the server's answer
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncPolicy {
    /// Remove locally only once the server confirmed the delete
    #[default]
    Confirmed,
    /// Remove locally as soon as the call completes, whatever the outcome
    Optimistic,
}

impl SyncPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncPolicy::Confirmed => "confirmed",
            SyncPolicy::Optimistic => "optimistic",
        }
    }

    pub fn parse(value: &str) -> Option<SyncPolicy> {
        match value.trim().to_ascii_lowercase().as_str() {
            "confirmed" => Some(SyncPolicy::Confirmed),
            "optimistic" => Some(SyncPolicy::Optimistic),
            _ => None,
        }
    }
}

/// Kind of an activity log line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActivityKind {
    Info,
    Success,
    Error,
}

/// A line in the on-screen activity log
#[derive(Clone, Debug)]
pub struct ActivityEntry {
    pub kind: ActivityKind,
    pub message: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl ActivityEntry {
    pub fn new(kind: ActivityKind, message: impl Into<String>) -> Self {
        ActivityEntry {
            kind,
            message: message.into(),
            timestamp: chrono::Utc::now(),
        }
    }
}
