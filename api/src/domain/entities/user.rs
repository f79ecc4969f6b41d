//! User domain entity
//!
//! Represents an account that posts tweets, likes them and follows others.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i32);

impl From<i32> for UserId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Longest accepted user name, in characters
pub const MAX_NAME_LEN: usize = 50;

/// A registered user
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    /// SHA-256 of the API key, the key itself is never stored
    #[serde(skip_serializing)]
    pub api_key_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            name: self.name.clone(),
        }
    }
}

/// Data needed to create a new user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub api_key_hash: String,
}

/// Public view of a user, as embedded in profiles and tweets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: UserId,
    pub name: String,
}

/// A user together with their follow graph
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub id: UserId,
    pub name: String,
    pub followers: Vec<UserSummary>,
    pub following: Vec<UserSummary>,
}

/// Trim and validate a user name
pub fn validate_name(name: &str) -> Result<&str, String> {
    let name = name.trim();
    let len = name.chars().count();
    if len == 0 || len > MAX_NAME_LEN {
        return Err(format!(
            "Name must be between 1 and {} characters",
            MAX_NAME_LEN
        ));
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_serializes_as_number() {
        let json = serde_json::to_string(&UserId(7)).unwrap();
        assert_eq!(json, "7");
    }

    #[test]
    fn user_hides_api_key_hash() {
        let user = User {
            id: UserId(1),
            name: "alice".to_string(),
            api_key_hash: "secret-hash".to_string(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret-hash"));
        assert!(json.contains("alice"));
    }

    #[test]
    fn summary_copies_id_and_name() {
        let user = User {
            id: UserId(3),
            name: "bob".to_string(),
            api_key_hash: "h".to_string(),
            created_at: Utc::now(),
        };

        assert_eq!(
            user.summary(),
            UserSummary {
                id: UserId(3),
                name: "bob".to_string()
            }
        );
    }

    #[test]
    fn validate_name_trims() {
        assert_eq!(validate_name("  carol ").unwrap(), "carol");
    }

    #[test]
    fn validate_name_bounds() {
        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"a".repeat(50)).is_ok());
        assert!(validate_name(&"a".repeat(51)).is_err());
    }

    #[test]
    fn validate_name_counts_chars_not_bytes() {
        // 50 two-byte characters
        assert!(validate_name(&"é".repeat(50)).is_ok());
    }
}
