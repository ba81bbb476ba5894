/// Utility modules
pub mod entity_id;
pub mod retry;

pub use entity_id::{EntityId, EntityIdError, ENTITY_ID_LENGTH};
pub use retry::RetryPolicy;

use chrono::{SecondsFormat, Utc};

/// Current UTC time as a fixed-width RFC 3339 string
///
/// Microsecond precision and a `Z` suffix keep the strings the same length,
/// so they order lexicographically the same way they order in time.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}
