//! Expiration checks for invitation payloads.
//!
//! Timestamps are milliseconds since the Unix epoch, matching the `iat` and
//! `exp` fields carried in invitation tokens.

use chrono::Utc;

/// Current wall-clock instant in milliseconds since the Unix epoch.
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Returns `true` once the current instant is strictly past `exp_ms`.
pub fn is_expired(exp_ms: i64) -> bool {
    is_expired_at(exp_ms, now_ms())
}

/// Returns `true` iff `now_ms` is strictly greater than `exp_ms`.
pub fn is_expired_at(exp_ms: i64, now_ms: i64) -> bool {
    now_ms > exp_ms
}
