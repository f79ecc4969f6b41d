//! Test utilities
//!
//! Manual mock implementations and test fixtures for unit testing.
//!
//! Why manual mocks instead of mockall?
//! - mockall has lifetime issues with traits containing `&str` parameters
//! - The tweet store needs to see the same media and likes as the other mocks

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
