//! Expiring store contract for verification codes

use async_trait::async_trait;

use crate::errors::StoreError;

/// Contract for the shared expiring key-value store holding issued codes.
///
/// This is the only mutable shared state in the lifecycle; the service
/// holds no cross-call state and delegates correctness entirely to the
/// atomicity guarantees specified here. Keys are always the normalized
/// (case-folded) email address. Implementations must serialize concurrent
/// operations on one key: last writer wins for `set_with_ttl`, and exactly
/// one winner among concurrent `compare_and_delete` calls with the
/// matching value.
#[async_trait]
pub trait CodeStore: Send + Sync {
    /// Unconditionally write `value` under `key`, replacing any existing
    /// value, and schedule automatic removal after `ttl_seconds`.
    async fn set_with_ttl(
        &self,
        key: &str,
        value: &str,
        ttl_seconds: u64,
    ) -> Result<(), StoreError>;

    /// Atomically read the value under `key` and, if it equals `expected`,
    /// delete the key. Returns `Ok(true)` when the code was consumed and
    /// `Ok(false)` when the key was absent, expired, or held a different
    /// value; the store is left unchanged in the `Ok(false)` case.
    ///
    /// The read-compare-delete must be one indivisible step. A separate
    /// read followed by a separate delete admits a race where two
    /// concurrent callers both observe a match before either deletes,
    /// double-spending a single-use code.
    async fn compare_and_delete(&self, key: &str, expected: &str) -> Result<bool, StoreError>;
}
