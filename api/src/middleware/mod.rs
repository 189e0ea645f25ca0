//! Request middleware and guards

pub mod admin_key;
pub mod cors;

pub use admin_key::{require_admin_key, ADMIN_KEY_HEADER};
pub use cors::create_cors;
