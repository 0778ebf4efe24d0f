//! Backend resource models.
//!
//! Field names follow the backend's camelCase JSON. Timestamps arrive as
//! zone-less local date-times and are read as UTC.

pub mod profile;
pub mod publication;
pub mod session;
pub mod subscription;

pub use profile::{PasswordChange, ProfileUpdate, UserProfile};
pub use publication::Publication;
pub use session::Session;
pub use subscription::{ActiveSubscriptionCheck, Subscription};

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Parse a backend timestamp: RFC 3339, a zone-less date-time, or a bare date.
#[must_use]
pub fn parse_backend_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = raw.parse::<NaiveDateTime>() {
        return Some(naive.and_utc());
    }
    raw.parse::<NaiveDate>()
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Serde adapter for optional backend timestamps; unreadable values become `None`.
pub(crate) fn deserialize_optional_datetime<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_backend_datetime))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_backend_datetime_forms() {
        let naive = parse_backend_datetime("2024-03-01T10:15:30").unwrap();
        assert_eq!(naive.to_rfc3339(), "2024-03-01T10:15:30+00:00");

        let fractional = parse_backend_datetime("2024-03-01T10:15:30.123456").unwrap();
        assert_eq!(fractional.timestamp(), naive.timestamp());

        let zoned = parse_backend_datetime("2024-03-01T13:15:30+03:00").unwrap();
        assert_eq!(zoned, naive);

        let date = parse_backend_datetime("2024-03-01").unwrap();
        assert_eq!(date.to_rfc3339(), "2024-03-01T00:00:00+00:00");

        assert!(parse_backend_datetime("yesterday").is_none());
    }
}
