//! Request authentication

mod api_key;

pub use api_key::auth_middleware;
