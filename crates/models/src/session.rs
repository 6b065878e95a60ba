use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Row in `admin_sessions`, keyed by the opaque token.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AdminSession {
    pub session_token: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,

    // When present, the session only validates from this address
    pub ip_address: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewAdminSession {
    pub session_token: String,
    pub expires_at: DateTime<Utc>,
    pub ip_address: Option<String>,
}

impl AdminSession {
    /// A session is expired once `now` reaches `expires_at`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// IP binding check: unbound sessions match any requester; bound
    /// sessions require a matching address, and a requester with no
    /// detectable address never matches a bound session.
    pub fn matches_ip(&self, requester: Option<&str>) -> bool {
        match (&self.ip_address, requester) {
            (None, _) => true,
            (Some(bound), Some(addr)) => bound == addr,
            (Some(_), None) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn session(expires_in: Duration, ip: Option<&str>) -> AdminSession {
        let now = Utc::now();
        AdminSession {
            session_token: "deadbeef".to_string(),
            created_at: now,
            expires_at: now + expires_in,
            ip_address: ip.map(str::to_string),
        }
    }

    #[test]
    fn test_expiry_boundary() {
        let s = session(Duration::hours(1), None);
        assert!(!s.is_expired(Utc::now()));
        assert!(s.is_expired(s.expires_at));
        assert!(s.is_expired(s.expires_at + Duration::seconds(1)));
    }

    #[test]
    fn test_ip_binding() {
        let unbound = session(Duration::hours(1), None);
        assert!(unbound.matches_ip(Some("10.0.0.1")));
        assert!(unbound.matches_ip(None));

        let bound = session(Duration::hours(1), Some("10.0.0.1"));
        assert!(bound.matches_ip(Some("10.0.0.1")));
        assert!(!bound.matches_ip(Some("10.0.0.2")));
        assert!(!bound.matches_ip(None));
    }
}
