//! Route handlers grouped by feature

pub mod health;
pub mod verification;
