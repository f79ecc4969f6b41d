//! SeaORM entity models
//!
//! One module per table. Domain conversions live next to the repositories in
//! `adapters::postgres`.

pub mod prelude;

pub mod followers;
pub mod likes;
pub mod medias;
pub mod tweets;
pub mod users;
