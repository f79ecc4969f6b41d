//! Domain entities
//!
//! Pure domain models representing core business concepts.
//! These are separate from the SeaORM entities in the `entity` module.

pub mod media;
pub mod social;
pub mod tweet;
pub mod user;

pub use media::{stored_file_name, Media, MediaId, MediaKind, NewMedia};
pub use social::{Follow, Like};
#[cfg(test)]
pub use tweet::timeline_order;
pub use tweet::{validate_content, LikeSummary, NewTweet, Page, Tweet, TweetId, TweetView};
pub use user::{validate_name, NewUser, User, UserId, UserProfile, UserSummary};
