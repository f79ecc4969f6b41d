pub use super::followers::Entity as Followers;
pub use super::likes::Entity as Likes;
pub use super::medias::Entity as Medias;
pub use super::tweets::Entity as Tweets;
pub use super::users::Entity as Users;
