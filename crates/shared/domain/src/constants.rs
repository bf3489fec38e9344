//! Domain-level constants.

/// Default token time-to-live in seconds
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 3600;

/// Default server-side deadline for a single RPC in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
