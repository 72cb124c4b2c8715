//! Raw key-value store trait and implementations.
//!
//! All operations are scoped to a namespace. Apps receive a
//! [`ScopedKvStore`] bound to `app:{name}` and never handle namespaces
//! directly; device-wide values live under [`SYSTEM_NAMESPACE`](crate::keys::SYSTEM_NAMESPACE).

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::trace;

use crate::error::{StorageError, StorageResult};

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_namespace(namespace: &str) -> StorageResult<()> {
    if namespace.is_empty() {
        return Err(StorageError::InvalidKey(
            "namespace must not be empty".into(),
        ));
    }
    if namespace.contains('\0') {
        return Err(StorageError::InvalidKey(
            "namespace must not contain null bytes".into(),
        ));
    }
    Ok(())
}

fn validate_key(key: &str) -> StorageResult<()> {
    if key.is_empty() {
        return Err(StorageError::InvalidKey("key must not be empty".into()));
    }
    if key.contains('\0') {
        return Err(StorageError::InvalidKey(
            "key must not contain null bytes".into(),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A key-value entry with its namespace and key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KvEntry {
    /// The namespace this entry belongs to.
    pub namespace: String,
    /// The key within the namespace.
    pub key: String,
    /// The raw value bytes.
    pub value: Vec<u8>,
}

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Raw key-value store.
///
/// Calls are synchronous and expected to be short: they run inside ability
/// hooks on the host loop.
pub trait KvStore: Send + Sync {
    /// Get a value by namespace and key. `None` if the key does not exist.
    fn get(&self, namespace: &str, key: &str) -> StorageResult<Option<Vec<u8>>>;

    /// Set a value, overwriting any existing one.
    fn set(&self, namespace: &str, key: &str, value: Vec<u8>) -> StorageResult<()>;

    /// Delete a key. Returns `true` if the key existed.
    fn delete(&self, namespace: &str, key: &str) -> StorageResult<bool>;

    /// Check if a key exists.
    fn exists(&self, namespace: &str, key: &str) -> StorageResult<bool> {
        Ok(self.get(namespace, key)?.is_some())
    }

    /// List all keys in a namespace, sorted.
    fn list_keys(&self, namespace: &str) -> StorageResult<Vec<String>>;

    /// Delete all keys in a namespace. Returns how many were removed.
    fn clear_namespace(&self, namespace: &str) -> StorageResult<u64>;
}

// ---------------------------------------------------------------------------
// In-memory implementation
// ---------------------------------------------------------------------------

/// In-memory key-value store.
///
/// Entries are kept per namespace so listing and clearing never scan other
/// apps' data.
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    data: RwLock<HashMap<String, HashMap<String, Vec<u8>>>>,
}

impl MemoryKvStore {
    /// Create a new empty in-memory KV store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot every entry, ordered by namespace then key.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Internal`] if the lock is poisoned.
    pub fn entries(&self) -> StorageResult<Vec<KvEntry>> {
        let data = self
            .data
            .read()
            .map_err(|e| StorageError::Internal(e.to_string()))?;
        let mut entries: Vec<KvEntry> = data
            .iter()
            .flat_map(|(namespace, keys)| {
                keys.iter().map(move |(key, value)| KvEntry {
                    namespace: namespace.clone(),
                    key: key.clone(),
                    value: value.clone(),
                })
            })
            .collect();
        entries.sort_by(|a, b| (&a.namespace, &a.key).cmp(&(&b.namespace, &b.key)));
        Ok(entries)
    }
}

impl KvStore for MemoryKvStore {
    fn get(&self, namespace: &str, key: &str) -> StorageResult<Option<Vec<u8>>> {
        validate_namespace(namespace)?;
        validate_key(key)?;
        let data = self
            .data
            .read()
            .map_err(|e| StorageError::Internal(e.to_string()))?;
        Ok(data.get(namespace).and_then(|ns| ns.get(key)).cloned())
    }

    fn set(&self, namespace: &str, key: &str, value: Vec<u8>) -> StorageResult<()> {
        validate_namespace(namespace)?;
        validate_key(key)?;
        let mut data = self
            .data
            .write()
            .map_err(|e| StorageError::Internal(e.to_string()))?;
        trace!(namespace, key, len = value.len(), "kv set");
        data.entry(namespace.to_owned())
            .or_default()
            .insert(key.to_owned(), value);
        Ok(())
    }

    fn delete(&self, namespace: &str, key: &str) -> StorageResult<bool> {
        validate_namespace(namespace)?;
        validate_key(key)?;
        let mut data = self
            .data
            .write()
            .map_err(|e| StorageError::Internal(e.to_string()))?;
        let Some(ns) = data.get_mut(namespace) else {
            return Ok(false);
        };
        let removed = ns.remove(key).is_some();
        if ns.is_empty() {
            data.remove(namespace);
        }
        Ok(removed)
    }

    fn list_keys(&self, namespace: &str) -> StorageResult<Vec<String>> {
        validate_namespace(namespace)?;
        let data = self
            .data
            .read()
            .map_err(|e| StorageError::Internal(e.to_string()))?;
        let mut keys: Vec<String> = data
            .get(namespace)
            .map(|ns| ns.keys().cloned().collect())
            .unwrap_or_default();
        keys.sort();
        Ok(keys)
    }

    fn clear_namespace(&self, namespace: &str) -> StorageResult<u64> {
        validate_namespace(namespace)?;
        let mut data = self
            .data
            .write()
            .map_err(|e| StorageError::Internal(e.to_string()))?;
        let removed = data.remove(namespace).map_or(0, |ns| ns.len());
        Ok(u64::try_from(removed).unwrap_or(u64::MAX))
    }
}

// ---------------------------------------------------------------------------
// Scoped store
// ---------------------------------------------------------------------------

/// A [`KvStore`] handle pre-bound to one namespace.
///
/// Cheap to clone; clones share the underlying store.
#[derive(Clone)]
pub struct ScopedKvStore {
    store: Arc<dyn KvStore>,
    namespace: String,
}

impl ScopedKvStore {
    /// Bind `store` to `namespace`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidKey`] if the namespace is empty or
    /// contains a null byte.
    pub fn new(store: Arc<dyn KvStore>, namespace: impl Into<String>) -> StorageResult<Self> {
        let namespace = namespace.into();
        validate_namespace(&namespace)?;
        Ok(Self { store, namespace })
    }

    /// The namespace this handle is bound to.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// A handle to the same store bound to a different namespace.
    ///
    /// # Errors
    ///
    /// See [`ScopedKvStore::new`].
    pub fn rebind(&self, namespace: impl Into<String>) -> StorageResult<Self> {
        Self::new(Arc::clone(&self.store), namespace)
    }

    /// Get raw bytes.
    ///
    /// # Errors
    ///
    /// Propagates backend and key validation errors.
    pub fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        self.store.get(&self.namespace, key)
    }

    /// Set raw bytes.
    ///
    /// # Errors
    ///
    /// Propagates backend and key validation errors.
    pub fn set(&self, key: &str, value: Vec<u8>) -> StorageResult<()> {
        self.store.set(&self.namespace, key, value)
    }

    /// Delete a key. Returns `true` if it existed.
    ///
    /// # Errors
    ///
    /// Propagates backend and key validation errors.
    pub fn delete(&self, key: &str) -> StorageResult<bool> {
        self.store.delete(&self.namespace, key)
    }

    /// Whether a key exists.
    ///
    /// # Errors
    ///
    /// Propagates backend and key validation errors.
    pub fn exists(&self, key: &str) -> StorageResult<bool> {
        self.store.exists(&self.namespace, key)
    }

    /// List keys in this namespace.
    ///
    /// # Errors
    ///
    /// Propagates backend errors.
    pub fn list_keys(&self) -> StorageResult<Vec<String>> {
        self.store.list_keys(&self.namespace)
    }

    /// Remove everything in this namespace.
    ///
    /// # Errors
    ///
    /// Propagates backend errors.
    pub fn clear(&self) -> StorageResult<u64> {
        self.store.clear_namespace(&self.namespace)
    }

    /// Get and decode a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Serialization`] if the stored bytes are not
    /// valid JSON for `T`.
    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> StorageResult<Option<T>> {
        self.get(key)?
            .map(|bytes| serde_json::from_slice(&bytes).map_err(StorageError::from))
            .transpose()
    }

    /// Encode and set a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Serialization`] if `value` cannot be encoded.
    pub fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> StorageResult<()> {
        let bytes = serde_json::to_vec(value)?;
        self.set(key, bytes)
    }
}

impl fmt::Debug for ScopedKvStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopedKvStore")
            .field("namespace", &self.namespace)
            .finish_non_exhaustive()
    }
}
