//! Cache module for Redis-based passcode storage

pub mod passcode_store;
pub mod redis_client;

#[cfg(test)]
mod tests;

pub use passcode_store::RedisPasscodeStore;
pub use redis_client::RedisClient;

// Re-export commonly used types
pub use cc_shared::config::CacheConfig;
