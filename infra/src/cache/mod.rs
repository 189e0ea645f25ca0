//! Cache module for Redis-based state
//!
//! Provides the Redis client with retry logic and the server-side resend
//! cooldown store built on it.

pub mod redis_client;
pub mod resend_cooldown;


pub use redis_client::RedisClient;
pub use resend_cooldown::RedisResendCooldownStore;

// Re-export commonly used types
pub use edu_shared::config::CacheConfig;
