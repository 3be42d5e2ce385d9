//! Platform connections and their derived health label.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::posts::Platform;

/// Connections expiring within this many days are flagged as `warning`.
pub const EXPIRY_WARNING_DAYS: i64 = 7;

/// A linked external social account owned by exactly one workspace.
///
/// Token material is deliberately absent; it stays in the backing store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformConnection {
    pub id: Uuid,
    pub workspace_id: Uuid,
    pub platform: String,
    pub platform_user_id: String,
    pub platform_username: Option<String>,
    pub status: String,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PlatformConnection {
    #[must_use]
    pub fn health(&self, now: DateTime<Utc>) -> ConnectionHealth {
        ConnectionHealth::derive(ConnectionStatus::parse(&self.status), self.expires_at, now)
    }

    /// Typed platform, `None` for names outside the known set.
    #[must_use]
    pub fn platform_kind(&self) -> Option<Platform> {
        Platform::parse(&self.platform)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    Active,
    Expired,
    Revoked,
    Error,
}

impl ConnectionStatus {
    /// Parses a stored status. Unknown values are `None`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "active" => Some(Self::Active),
            "expired" => Some(Self::Expired),
            "revoked" => Some(Self::Revoked),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Expired => "expired",
            Self::Revoked => "revoked",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionHealth {
    Healthy,
    Warning,
    Error,
}

impl ConnectionHealth {
    /// Presentation label for a connection.
    ///
    /// Anything but an active status is an error, as is an active token that
    /// has already expired. Active tokens expiring within
    /// [`EXPIRY_WARNING_DAYS`] are a warning.
    #[must_use]
    pub fn derive(
        status: Option<ConnectionStatus>,
        expires_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Self {
        if status != Some(ConnectionStatus::Active) {
            return Self::Error;
        }
        match expires_at {
            Some(at) if at <= now => Self::Error,
            Some(at) if at - now <= Duration::days(EXPIRY_WARNING_DAYS) => Self::Warning,
            _ => Self::Healthy,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for ConnectionHealth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active() -> Option<ConnectionStatus> {
        Some(ConnectionStatus::Active)
    }

    #[test]
    fn active_without_expiry_is_healthy() {
        assert_eq!(
            ConnectionHealth::derive(active(), None, Utc::now()),
            ConnectionHealth::Healthy
        );
    }

    #[test]
    fn active_expiring_in_five_days_is_warning() {
        let now = Utc::now();
        let expires = now + Duration::days(5);
        assert_eq!(
            ConnectionHealth::derive(active(), Some(expires), now),
            ConnectionHealth::Warning
        );
    }

    #[test]
    fn exactly_seven_days_is_still_warning() {
        let now = Utc::now();
        let expires = now + Duration::days(EXPIRY_WARNING_DAYS);
        assert_eq!(
            ConnectionHealth::derive(active(), Some(expires), now),
            ConnectionHealth::Warning
        );
    }

    #[test]
    fn active_expiring_in_thirty_days_is_healthy() {
        let now = Utc::now();
        let expires = now + Duration::days(30);
        assert_eq!(
            ConnectionHealth::derive(active(), Some(expires), now),
            ConnectionHealth::Healthy
        );
    }

    #[test]
    fn active_past_expiry_is_error() {
        let now = Utc::now();
        let expires = now - Duration::hours(1);
        assert_eq!(
            ConnectionHealth::derive(active(), Some(expires), now),
            ConnectionHealth::Error
        );
    }

    #[test]
    fn non_active_statuses_are_errors() {
        let now = Utc::now();
        for status in [
            Some(ConnectionStatus::Expired),
            Some(ConnectionStatus::Revoked),
            Some(ConnectionStatus::Error),
            None,
        ] {
            assert_eq!(
                ConnectionHealth::derive(status, None, now),
                ConnectionHealth::Error,
                "status {status:?}"
            );
        }
    }

    #[test]
    fn connection_health_reads_stored_status() {
        let now = Utc::now();
        let conn = PlatformConnection {
            id: Uuid::new_v4(),
            workspace_id: Uuid::new_v4(),
            platform: "twitter".to_string(),
            platform_user_id: "t1".to_string(),
            platform_username: Some("@techcorp".to_string()),
            status: "revoked".to_string(),
            expires_at: None,
            created_at: now,
            updated_at: now,
        };
        assert_eq!(conn.health(now), ConnectionHealth::Error);
    }

    #[test]
    fn status_round_trips_through_str() {
        for status in [
            ConnectionStatus::Active,
            ConnectionStatus::Expired,
            ConnectionStatus::Revoked,
            ConnectionStatus::Error,
        ] {
            assert_eq!(ConnectionStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(ConnectionStatus::parse("pending"), None);
    }
}
