//! Claims carried by a session token.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// JWT claims for access tokens.
///
/// - `sub`: account id
/// - `username`: account username at signin time
/// - `iat` / `exp`: Unix timestamps in seconds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// Account ID (subject claim)
    pub sub: String,
    pub username: String,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: i64,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Parses the subject as an account UUID.
    pub fn account_uuid(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.sub).ok()
    }

    /// A token stops being valid at the instant `exp` is reached.
    pub fn is_expired_at(&self, now: i64) -> bool {
        now >= self.exp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(sub: &str) -> Claims {
        Claims {
            sub: sub.to_string(),
            username: "reader".to_string(),
            iat: 1_000,
            exp: 4_600,
        }
    }

    #[test]
    fn test_account_uuid() {
        let id = Uuid::new_v4();
        assert_eq!(claims(&id.to_string()).account_uuid(), Some(id));
        assert_eq!(claims("not-a-uuid").account_uuid(), None);
    }

    #[test]
    fn test_expiry_boundary() {
        let c = claims(&Uuid::new_v4().to_string());
        assert!(!c.is_expired_at(4_599));
        assert!(c.is_expired_at(4_600));
    }

    #[test]
    fn test_claims_json_shape() {
        let json = serde_json::to_value(claims("abc")).unwrap();
        assert_eq!(json["sub"], "abc");
        assert_eq!(json["username"], "reader");
        assert_eq!(json["exp"], 4_600);
    }
}
