//! Hearth Storage - the key-value database handed to app abilities.
//!
//! # Raw key-value ([`KvStore`])
//!
//! Byte-level `get`/`set`/`delete` scoped by namespace. [`MemoryKvStore`] is
//! the in-process implementation; hosts with flash-backed storage implement
//! [`KvStore`] themselves.
//!
//! # Scoped access ([`ScopedKvStore`])
//!
//! A store pre-bound to one namespace, with typed JSON helpers. The ability
//! manager hands each app a scoped store named after the app.
//!
//! # Well-known keys ([`keys`])
//!
//! Typed keys for device-wide values (display geometry, battery) shared
//! through the `system` namespace.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod error;
pub mod keys;
pub mod kv;

pub use error::{StorageError, StorageResult};
pub use keys::SystemKey;
pub use kv::{KvEntry, KvStore, MemoryKvStore, ScopedKvStore};
