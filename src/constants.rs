//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Default base URL of the users collection server
pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";

/// Path of the users collection, relative to the base URL
pub const USERS_PATH: &str = "users";

/// Default per-request timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default retry budget for idempotent requests
pub const DEFAULT_MAX_RETRIES: u32 = 2;

/// First retry delay, doubled on every further attempt
pub const DEFAULT_RETRY_BACKOFF_MS: u64 = 200;

/// Default log file, relative to the working directory
pub const DEFAULT_LOG_FILE: &str = "userlist.log";

/// Number of activity log lines kept in memory
pub const MAX_ACTIVITY: usize = 100;

/// Application name
pub const APP_NAME: &str = "User List";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
