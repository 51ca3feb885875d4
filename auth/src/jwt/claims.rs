use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Identity claims carried by an access token.
///
/// This is the sole unit of identity propagated to downstream services.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    pub username: String,

    pub email: String,

    /// Display name ("first last")
    pub full_name: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for a user, valid for `lifetime` starting at `issued_at`.
    ///
    /// # Arguments
    /// * `username` - Username (forwarded as the user identifier)
    /// * `email` - Email address
    /// * `full_name` - Display name
    /// * `issued_at` - Issuance instant
    /// * `lifetime` - Validity window
    pub fn for_user(
        username: impl Into<String>,
        email: impl Into<String>,
        full_name: impl Into<String>,
        issued_at: DateTime<Utc>,
        lifetime: Duration,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            full_name: full_name.into(),
            iat: issued_at.timestamp(),
            exp: (issued_at + lifetime).timestamp(),
        }
    }

    /// Validity window in seconds.
    pub fn lifetime_seconds(&self) -> i64 {
        self.exp - self.iat
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_for_user() {
        let issued_at = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
        let claims = Claims::for_user(
            "alice",
            "alice@x.com",
            "Alice A",
            issued_at,
            Duration::minutes(15),
        );

        assert_eq!(claims.username, "alice");
        assert_eq!(claims.email, "alice@x.com");
        assert_eq!(claims.full_name, "Alice A");
        assert_eq!(claims.iat, issued_at.timestamp());
        assert_eq!(claims.lifetime_seconds(), 900);
    }

    #[test]
    fn test_serialized_field_names() {
        let claims = Claims::for_user("bob", "bob@x.com", "Bob B", Utc::now(), Duration::minutes(1));
        let value = serde_json::to_value(&claims).unwrap();

        for field in ["username", "email", "full_name", "iat", "exp"] {
            assert!(value.get(field).is_some(), "missing {}", field);
        }
    }
}
