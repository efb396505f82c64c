//! User account records.

use adlens_api::UserPayload;
use chrono::{DateTime, Utc};

use super::metrics::parse_timestamp;

pub const ROLE_ADMIN: &str = "Admin";
pub const ROLE_USER: &str = "User";

/// A user account as held in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub last_login: Option<DateTime<Utc>>,
}

impl UserRecord {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }

    /// Created within the trailing seven days of `now`.
    pub fn is_recent(&self, now: DateTime<Utc>) -> bool {
        self.created_at
            .is_some_and(|created| now - created <= chrono::Duration::days(7))
    }
}

impl From<UserPayload> for UserRecord {
    fn from(raw: UserPayload) -> Self {
        Self {
            id: raw.id,
            username: raw.username,
            email: raw.email,
            role: raw.role,
            is_active: raw.is_active,
            created_at: raw.created_at.as_deref().and_then(parse_timestamp),
            last_login: raw.last_login.as_deref().and_then(parse_timestamp),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(created_at: Option<DateTime<Utc>>) -> UserRecord {
        UserRecord {
            id: "u1".to_owned(),
            username: "ana".to_owned(),
            email: "ana@example.com".to_owned(),
            role: ROLE_USER.to_owned(),
            is_active: true,
            created_at,
            last_login: None,
        }
    }

    #[test]
    fn recent_window_is_seven_days() {
        let now = Utc.with_ymd_and_hms(2026, 3, 20, 12, 0, 0).unwrap();
        let six_days_ago = now - chrono::Duration::days(6);
        let eight_days_ago = now - chrono::Duration::days(8);

        assert!(record(Some(six_days_ago)).is_recent(now));
        assert!(!record(Some(eight_days_ago)).is_recent(now));
        assert!(!record(None).is_recent(now));
    }
}
