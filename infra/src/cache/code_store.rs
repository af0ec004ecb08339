//! Redis-backed expiring code store
//!
//! Implements the `CodeStore` contract from `vc_core` on top of
//! [`RedisClient`]. Keys arrive already normalized (case-folded email);
//! this adapter only adds the Redis key namespace. Any Redis failure maps
//! to `StoreError::Unavailable` so the core never mistakes an outage for
//! a missing or mismatched code.

use async_trait::async_trait;
use tracing::debug;

use vc_core::errors::StoreError;
use vc_core::services::verification::CodeStore;
use vc_shared::utils::email;

use crate::cache::RedisClient;
use crate::InfrastructureError;

/// Redis key prefix for verification codes
const CODE_KEY_PREFIX: &str = "verification:code";

/// Expiring code store backed by Redis
#[derive(Clone)]
pub struct RedisCodeStore {
    /// Redis client for cache operations
    redis_client: RedisClient,
}

impl RedisCodeStore {
    /// Create a new Redis-backed code store
    pub fn new(redis_client: RedisClient) -> Self {
        Self { redis_client }
    }

    /// Format the Redis key for a normalized email address
    fn format_code_key(key: &str) -> String {
        format!("{}:{}", CODE_KEY_PREFIX, key)
    }

    fn unavailable(e: InfrastructureError) -> StoreError {
        StoreError::Unavailable {
            message: e.to_string(),
        }
    }
}

#[async_trait]
impl CodeStore for RedisCodeStore {
    async fn set_with_ttl(
        &self,
        key: &str,
        value: &str,
        ttl_seconds: u64,
    ) -> Result<(), StoreError> {
        let code_key = Self::format_code_key(key);

        debug!(
            email = %email::mask(key),
            ttl_seconds = ttl_seconds,
            "Storing verification code"
        );

        self.redis_client
            .set_with_expiry(&code_key, value, ttl_seconds)
            .await
            .map_err(Self::unavailable)
    }

    async fn compare_and_delete(&self, key: &str, expected: &str) -> Result<bool, StoreError> {
        let code_key = Self::format_code_key(key);

        debug!(
            email = %email::mask(key),
            "Consuming verification code"
        );

        self.redis_client
            .compare_and_delete(&code_key, expected)
            .await
            .map_err(Self::unavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_key_namespacing() {
        assert_eq!(
            RedisCodeStore::format_code_key("user@example.com"),
            "verification:code:user@example.com"
        );
    }
}
