//! Upstream platform clients. Each one maps its API's payload onto
//! [`SocialPostEntity`](entity::prelude::SocialPostEntity).

use chrono::{DateTime, Utc};

mod facebook;
mod instagram;
mod linkedin;
mod twitter;

pub use facebook::Facebook;
pub use instagram::Instagram;
pub use linkedin::LinkedIn;
pub use twitter::Twitter;

/// Accepts RFC 3339 as well as the `+0000` offsets the Graph API emits.
pub(crate) fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .or_else(|_| DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%z"))
        .map(|t| t.with_timezone(&Utc))
        .ok()
}
