//! User service
//!
//! Handles registration, API key authentication, profiles and the follow graph.

use std::sync::Arc;

use rand::Rng;
use sha2::{Digest, Sha256};

use crate::domain::entities::{validate_name, Follow, NewUser, User, UserId, UserProfile};
use crate::domain::ports::{FollowRepository, UserRepository};
use crate::error::{AppError, DomainError};

/// Service for managing users and who follows whom
pub struct UserService<UR, FR>
where
    UR: UserRepository,
    FR: FollowRepository,
{
    users: Arc<UR>,
    follows: Arc<FR>,
}

impl<UR, FR> UserService<UR, FR>
where
    UR: UserRepository,
    FR: FollowRepository,
{
    pub fn new(users: Arc<UR>, follows: Arc<FR>) -> Self {
        Self { users, follows }
    }

    /// Register a new user
    ///
    /// Returns (user, api_key). The key is only shown once.
    pub async fn register(&self, name: &str) -> Result<(User, String), AppError> {
        let name = validate_name(name).map_err(DomainError::Validation)?;

        if self.users.find_by_name(name).await?.is_some() {
            return Err(AppError::Domain(DomainError::AlreadyExists(format!(
                "User with name '{}' already exists",
                name
            ))));
        }

        let api_key = generate_api_key();
        let user = self
            .users
            .create(&NewUser {
                name: name.to_string(),
                api_key_hash: hash_api_key(&api_key),
            })
            .await?;

        tracing::info!(user_id = %user.id, name = %user.name, "User registered");
        Ok((user, api_key))
    }

    /// Create a user with a known API key unless it already exists
    ///
    /// Used to seed accounts at startup. Returns whether a user was created.
    pub async fn ensure_user(&self, name: &str, api_key: &str) -> Result<bool, AppError> {
        let name = validate_name(name).map_err(DomainError::Validation)?;
        let api_key_hash = hash_api_key(api_key);

        if self
            .users
            .find_by_api_key_hash(&api_key_hash)
            .await?
            .is_some()
        {
            return Ok(false);
        }

        if self.users.find_by_name(name).await?.is_some() {
            tracing::warn!(
                name = %name,
                "Bootstrap user name is taken by a different key, skipping"
            );
            return Ok(false);
        }

        let user = self
            .users
            .create(&NewUser {
                name: name.to_string(),
                api_key_hash,
            })
            .await?;

        tracing::info!(user_id = %user.id, name = %user.name, "Bootstrap user created");
        Ok(true)
    }

    /// Resolve the user behind a raw API key
    pub async fn authenticate(&self, api_key: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .find_by_api_key_hash(&hash_api_key(api_key))
            .await?)
    }

    /// A user with their followers and the users they follow
    pub async fn profile(&self, id: &UserId) -> Result<UserProfile, AppError> {
        let user = self.require_user(id).await?;

        let followers = self.follows.followers_of(&user.id).await?;
        let following = self.follows.following_of(&user.id).await?;

        Ok(UserProfile {
            id: user.id,
            name: user.name,
            followers,
            following,
        })
    }

    /// Make `current` follow `target_id`
    pub async fn follow(&self, current: &User, target_id: &UserId) -> Result<(), AppError> {
        self.require_user(target_id).await?;

        let edge = Follow::new(current.id, *target_id);
        if edge.is_self_follow() {
            return Err(DomainError::Validation("You cannot follow yourself".to_string()).into());
        }

        if self.follows.exists(&edge).await? {
            return Err(
                DomainError::Conflict("Already following this user".to_string()).into(),
            );
        }

        self.follows.create(&edge).await?;
        tracing::info!(follower = %current.id, following = %target_id, "User followed");
        Ok(())
    }

    /// Remove the edge `current` -> `target_id`
    pub async fn unfollow(&self, current: &User, target_id: &UserId) -> Result<(), AppError> {
        let edge = Follow::new(current.id, *target_id);

        if !self.follows.delete(&edge).await? {
            return Err(DomainError::NotFound("Follower not found".to_string()).into());
        }

        tracing::info!(follower = %current.id, following = %target_id, "User unfollowed");
        Ok(())
    }

    async fn require_user(&self, id: &UserId) -> Result<User, AppError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound("User not found".to_string()).into())
    }
}

/// Generate a random API key
fn generate_api_key() -> String {
    let mut rng = rand::thread_rng();
    let bytes: Vec<u8> = (0..32).map(|_| rng.gen()).collect();
    format!("mb-{}", hex::encode(bytes))
}

/// Hash an API key for storage
pub fn hash_api_key(api_key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(api_key.as_bytes());
    hex::encode(hasher.finalize())
}
