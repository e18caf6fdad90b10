//! Persistent player preferences over a pluggable key/value store.

use crate::config::GameConfig;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::warn;

/// Storage keys shared by every host
pub mod keys {
    pub const CURRENT_LEVEL: &str = "currentLevel";
    pub const CURRENT_THEME: &str = "currentTheme";
    pub const VIBRATION_ENABLED: &str = "vibrationEnabled";
    pub const GAME_CONFIG: &str = "gameConfig";
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend failed: {0}")]
    Backend(String),
    #[error("invalid value for {key}: {source}")]
    Json {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// String key/value persistence supplied by the host
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// Volatile store, used in tests and when nothing better is available
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.values.remove(key);
        Ok(())
    }
}

/// Colour scheme choice
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeKind {
    #[default]
    Dark,
    Light,
    HighContrast,
}

impl ThemeKind {
    pub const ALL: [ThemeKind; 3] = [ThemeKind::Dark, ThemeKind::Light, ThemeKind::HighContrast];

    /// Cycle to the next theme
    pub fn next(self) -> Self {
        match self {
            ThemeKind::Dark => ThemeKind::Light,
            ThemeKind::Light => ThemeKind::HighContrast,
            ThemeKind::HighContrast => ThemeKind::Dark,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ThemeKind::Dark => "dark",
            ThemeKind::Light => "light",
            ThemeKind::HighContrast => "high-contrast",
        }
    }
}

impl fmt::Display for ThemeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ThemeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ThemeKind::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown theme '{s}'"))
    }
}

/// Typed view of the preferences held in a [`KeyValueStore`].
///
/// Values are stored JSON encoded. Reads never fail: a missing value gives
/// the default and an unreadable one is logged and replaced by the default.
#[derive(Debug)]
pub struct Preferences<S> {
    store: S,
}

impl<S: KeyValueStore> Preferences<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                warn!(key, %err, "failed to read preference");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(source) => {
                let err = StoreError::Json {
                    key: key.to_string(),
                    source,
                };
                warn!(%err, "ignoring unreadable preference");
                None
            }
        }
    }

    fn write<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), StoreError> {
        let json = serde_json::to_string(value).map_err(|source| StoreError::Json {
            key: key.to_string(),
            source,
        })?;
        self.store.set(key, &json)
    }

    pub fn current_level(&self) -> Option<String> {
        self.read(keys::CURRENT_LEVEL)
    }

    pub fn set_current_level(&mut self, id: &str) -> Result<(), StoreError> {
        self.write(keys::CURRENT_LEVEL, &id)
    }

    pub fn theme(&self) -> ThemeKind {
        self.read(keys::CURRENT_THEME).unwrap_or_default()
    }

    pub fn set_theme(&mut self, theme: ThemeKind) -> Result<(), StoreError> {
        self.write(keys::CURRENT_THEME, &theme)
    }

    pub fn vibration_enabled(&self) -> bool {
        self.read(keys::VIBRATION_ENABLED).unwrap_or(true)
    }

    pub fn set_vibration_enabled(&mut self, enabled: bool) -> Result<(), StoreError> {
        self.write(keys::VIBRATION_ENABLED, &enabled)
    }

    pub fn config(&self) -> GameConfig {
        self.read(keys::GAME_CONFIG).unwrap_or_default()
    }

    pub fn set_config(&mut self, config: &GameConfig) -> Result<(), StoreError> {
        self.write(keys::GAME_CONFIG, config)
    }

    /// Forget every stored preference
    pub fn reset(&mut self) -> Result<(), StoreError> {
        for key in [
            keys::CURRENT_LEVEL,
            keys::CURRENT_THEME,
            keys::VIBRATION_ENABLED,
            keys::GAME_CONFIG,
        ] {
            self.store.remove(key)?;
        }
        Ok(())
    }
}
