/*!
 * Key-value storage for on-device persistence.
 *
 * This module provides:
 * - The `KeyValueStore` trait the settings store is written against
 * - A SQLite-backed implementation living in the user's data directory
 */

use async_trait::async_trait;

use crate::errors::SettingsError;

pub mod kv;
pub mod schema;

// Re-export main types
pub use kv::SqliteStore;

/// String key-value storage, one value per key
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any
    async fn get_item(&self, key: &str) -> Result<Option<String>, SettingsError>;

    /// Store `value` under `key`, replacing any previous value
    async fn set_item(&self, key: &str, value: &str) -> Result<(), SettingsError>;

    /// Delete the value stored under `key`; missing keys are not an error
    async fn remove_item(&self, key: &str) -> Result<(), SettingsError>;
}
