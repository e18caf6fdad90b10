//! Terminal implementations of the host capabilities.

use gamesalad_core::{HapticPattern, Haptics, KeyValueStore, NotificationSender, StoreError};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::rc::Rc;
use tracing::warn;

pub const PREFS_FILE: &str = "gamesalad_prefs.json";
pub const LOG_FILE: &str = "gamesalad.log";

/// Directory holding preferences and the log file
pub fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("gamesalad")
}

/// Key/value store persisted as one JSON object on disk.
///
/// Every write rewrites the whole file; the data is a handful of keys.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store, starting empty if the file is missing or corrupt
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_else(|err| {
                warn!(path = %path.display(), %err, "discarding unreadable preferences");
                BTreeMap::new()
            }),
            Err(_) => BTreeMap::new(),
        };
        Self { path, values }
    }

    fn save(&self) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(&self.values).map_err(|source| StoreError::Json {
            key: self.path.display().to_string(),
            source,
        })?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        self.save()
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        if self.values.remove(key).is_some() {
            self.save()?;
        }
        Ok(())
    }
}

/// Terminals cannot vibrate; ring the bell instead
#[derive(Debug, Default)]
pub struct BellHaptics;

impl Haptics for BellHaptics {
    fn vibrate(&mut self, pattern: HapticPattern) {
        // Only the big moments are worth a bell
        if pattern == HapticPattern::Success {
            let mut stdout = io::stdout();
            let _ = stdout.write_all(b"\x07");
            let _ = stdout.flush();
        }
    }
}

/// Queues notifications for the message line
#[derive(Debug, Clone, Default)]
pub struct MessageNotifier {
    queue: Rc<RefCell<Vec<String>>>,
}

impl MessageNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every queued notification
    pub fn drain(&self) -> Vec<String> {
        self.queue.borrow_mut().drain(..).collect()
    }
}

impl NotificationSender for MessageNotifier {
    fn notify(&mut self, title: &str, body: &str) {
        self.queue.borrow_mut().push(format!("{title} {body}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("gamesalad-test-{}-{name}", std::process::id()))
            .join(PREFS_FILE)
    }

    #[test]
    fn test_file_store_persists() {
        let path = temp_path("persist");
        let _ = fs::remove_file(&path);

        let mut store = FileStore::open(&path);
        store.set("currentLevel", "\"chess\"").unwrap();
        drop(store);

        let store = FileStore::open(&path);
        assert_eq!(store.get("currentLevel").unwrap().as_deref(), Some("\"chess\""));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let path = temp_path("corrupt");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ nope").unwrap();
        let store = FileStore::open(&path);
        assert_eq!(store.get("currentLevel").unwrap(), None);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_notifier_queue() {
        let notifier = MessageNotifier::new();
        let mut sender = notifier.clone();
        sender.notify("Level complete!", "Chess Pieces solved in 01:02");
        assert_eq!(notifier.drain(), vec!["Level complete! Chess Pieces solved in 01:02"]);
        assert!(notifier.drain().is_empty());
    }
}
