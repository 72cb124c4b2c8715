//! Well-known device keys.
//!
//! Each [`SystemKey`] ties a key name to its value type, so every reader and
//! writer agrees on the encoding. Values are stored as JSON in
//! [`SYSTEM_NAMESPACE`].

use std::marker::PhantomData;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StorageResult;
use crate::kv::ScopedKvStore;

/// Namespace holding device-wide values.
pub const SYSTEM_NAMESPACE: &str = "system";

/// A typed key in [`SYSTEM_NAMESPACE`].
#[derive(Debug)]
pub struct SystemKey<T> {
    name: &'static str,
    _value: PhantomData<fn() -> T>,
}

impl<T> SystemKey<T> {
    /// Declare a key.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _value: PhantomData,
        }
    }

    /// The raw key name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl<T> Clone for SystemKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for SystemKey<T> {}

impl<T: Serialize + DeserializeOwned> SystemKey<T> {
    /// Read this key from `store`, which must be bound to
    /// [`SYSTEM_NAMESPACE`].
    ///
    /// # Errors
    ///
    /// Propagates backend errors and decoding failures.
    pub fn read(&self, store: &ScopedKvStore) -> StorageResult<Option<T>> {
        store.get_json(self.name)
    }

    /// Write this key to `store`.
    ///
    /// # Errors
    ///
    /// Propagates backend errors and encoding failures.
    pub fn write(&self, store: &ScopedKvStore, value: &T) -> StorageResult<()> {
        store.set_json(self.name, value)
    }
}

/// Horizontal display resolution in pixels.
pub const DISPLAY_WIDTH: SystemKey<i16> = SystemKey::new("display.width");
/// Vertical display resolution in pixels.
pub const DISPLAY_HEIGHT: SystemKey<i16> = SystemKey::new("display.height");
/// Backlight brightness, 0-255.
pub const DISPLAY_BRIGHTNESS: SystemKey<u8> = SystemKey::new("display.brightness");
/// Battery charge, 0-100.
pub const BATTERY_LEVEL: SystemKey<u8> = SystemKey::new("battery.level");
/// Whether the device is on external power.
pub const BATTERY_CHARGING: SystemKey<bool> = SystemKey::new("battery.charging");

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::kv::{KvStore, MemoryKvStore};

    fn system_store() -> (Arc<MemoryKvStore>, ScopedKvStore) {
        let store = Arc::new(MemoryKvStore::new());
        let scoped = ScopedKvStore::new(store.clone(), SYSTEM_NAMESPACE).unwrap();
        (store, scoped)
    }

    #[test]
    fn test_typed_round_trip() {
        let (_store, db) = system_store();
        DISPLAY_WIDTH.write(&db, &320).unwrap();
        BATTERY_CHARGING.write(&db, &true).unwrap();

        assert_eq!(DISPLAY_WIDTH.read(&db).unwrap(), Some(320));
        assert_eq!(BATTERY_CHARGING.read(&db).unwrap(), Some(true));
        assert_eq!(BATTERY_LEVEL.read(&db).unwrap(), None);
    }

    #[test]
    fn test_values_land_in_system_namespace() {
        let (store, db) = system_store();
        DISPLAY_BRIGHTNESS.write(&db, &128).unwrap();
        assert!(store.exists(SYSTEM_NAMESPACE, "display.brightness").unwrap());
    }

    #[test]
    fn test_out_of_range_value_fails_to_decode() {
        let (_store, db) = system_store();
        db.set_json(BATTERY_LEVEL.name(), &1000_u32).unwrap();
        assert!(BATTERY_LEVEL.read(&db).is_err());
    }
}
