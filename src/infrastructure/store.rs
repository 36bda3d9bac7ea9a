//! Client-local persisted state
//!
//! A small key/value store (one JSON document per key) plus [`ClientState`],
//! the typed accessors the rest of the client uses. Every access through
//! `ClientState` is best-effort: an unreadable, unwritable or corrupted
//! value is logged and treated as absent, so a broken store degrades to
//! "no manual order, no pins, default theme".

use crate::domain::Theme;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

pub const ORDER_KEY: &str = "noteOrder";
pub const PINNED_KEY: &str = "pinnedNotes";
pub const THEME_KEY: &str = "theme";

/// Raw string storage keyed by name
pub trait KeyValueStore {
    fn get(&self, key: &str) -> io::Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> io::Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        (**self).set(key, value)
    }
}

/// Stores each key as `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: PathBuf) -> Self {
        FileStore { dir }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)?;
        }
        fs::write(self.path_for(key), value)
    }
}

/// In-process store, used where nothing should touch the disk
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        let values = self
            .values
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "store lock poisoned"))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "store lock poisoned"))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Typed, best-effort view over a [`KeyValueStore`]
#[derive(Debug)]
pub struct ClientState<S> {
    store: S,
}

impl<S: KeyValueStore> ClientState<S> {
    pub fn new(store: S) -> Self {
        ClientState { store }
    }

    /// Persisted manual order; empty when unset or unreadable
    pub fn order(&self) -> Vec<i64> {
        self.read(ORDER_KEY).unwrap_or_default()
    }

    pub fn set_order(&self, ids: &[i64]) {
        self.write(ORDER_KEY, &ids);
    }

    /// Pinned note ids; empty when unset or unreadable.
    ///
    /// The stored array is a set: its order carries no meaning, and it is
    /// written back sorted. Pinned notes are ranked by the manual order.
    pub fn pinned(&self) -> BTreeSet<i64> {
        self.read::<Vec<i64>>(PINNED_KEY)
            .map(|ids| ids.into_iter().collect())
            .unwrap_or_default()
    }

    pub fn set_pinned(&self, pinned: &BTreeSet<i64>) {
        let ids: Vec<i64> = pinned.iter().copied().collect();
        self.write(PINNED_KEY, &ids);
    }

    /// Stored theme, dark when unset or unreadable
    pub fn theme(&self) -> Theme {
        self.read(THEME_KEY).unwrap_or_default()
    }

    pub fn set_theme(&self, theme: Theme) {
        self.write(THEME_KEY, &theme);
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(key, error = %e, "client state unavailable, using default");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "ignoring corrupted client state");
                None
            }
        }
    }

    fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let encoded = match serde_json::to_string(value) {
            Ok(encoded) => encoded,
            Err(e) => {
                tracing::warn!(key, error = %e, "could not encode client state");
                return;
            }
        };

        if let Err(e) = self.store.set(key, &encoded) {
            tracing::warn!(key, error = %e, "could not persist client state");
        } else {
            tracing::debug!(key, value = %encoded, "client state saved");
        }
    }
}
