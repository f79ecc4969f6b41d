//! Like and follow edges

use serde::Serialize;

use super::tweet::TweetId;
use super::user::UserId;

/// A user liking a tweet. At most one per (user, tweet).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Like {
    pub user_id: UserId,
    pub tweet_id: TweetId,
}

/// `follower_id` follows `following_id`. At most one per pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Follow {
    pub follower_id: UserId,
    pub following_id: UserId,
}

impl Follow {
    pub fn new(follower_id: UserId, following_id: UserId) -> Self {
        Self {
            follower_id,
            following_id,
        }
    }

    pub fn is_self_follow(&self) -> bool {
        self.follower_id == self.following_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn self_follow_detected() {
        assert!(Follow::new(UserId(1), UserId(1)).is_self_follow());
        assert!(!Follow::new(UserId(1), UserId(2)).is_self_follow());
    }
}
