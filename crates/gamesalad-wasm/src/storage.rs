//! Browser implementations of the host capabilities.

use gamesalad_core::{
    HapticPattern, Haptics, KeyValueStore, MemoryStore, NotificationSender, StoreError,
};
use tracing::warn;
use wasm_bindgen::JsValue;

fn backend_error(err: JsValue) -> StoreError {
    StoreError::Backend(format!("{err:?}"))
}

/// `window.localStorage`
pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    /// `None` when storage is unavailable, e.g. disabled by privacy settings
    pub fn open() -> Option<Self> {
        let storage = web_sys::window()?.local_storage().ok()??;
        Some(Self { storage })
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage.get_item(key).map_err(backend_error)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage.set_item(key, value).map_err(backend_error)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.storage.remove_item(key).map_err(backend_error)
    }
}

/// `navigator.vibrate`; silently does nothing where unsupported
#[derive(Debug, Default)]
pub struct VibrateHaptics;

impl Haptics for VibrateHaptics {
    fn vibrate(&mut self, pattern: HapticPattern) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let pulses: js_sys::Array = pattern
            .pulses_ms()
            .iter()
            .map(|ms| JsValue::from(*ms))
            .collect();
        window.navigator().vibrate_with_pattern(&pulses);
    }
}

/// Writes notifications to the browser console
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl NotificationSender for ConsoleNotifier {
    fn notify(&mut self, title: &str, body: &str) {
        web_sys::console::log_1(&format!("{title} {body}").into());
    }
}

/// Local storage when the browser allows it, otherwise an in-memory map
/// that forgets everything on reload
pub enum BrowserStore {
    Local(LocalStorage),
    Memory(MemoryStore),
}

impl BrowserStore {
    pub fn open() -> Self {
        match LocalStorage::open() {
            Some(local) => Self::Local(local),
            None => {
                warn!("localStorage unavailable, preferences will not persist");
                Self::Memory(MemoryStore::new())
            }
        }
    }
}

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match self {
            Self::Local(s) => s.get(key),
            Self::Memory(s) => s.get(key),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        match self {
            Self::Local(s) => s.set(key, value),
            Self::Memory(s) => s.set(key, value),
        }
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        match self {
            Self::Local(s) => s.remove(key),
            Self::Memory(s) => s.remove(key),
        }
    }
}
