// Progress persistence - the last viewed slide, kept across sessions
use crate::error::SlidesError;
use log::{debug, warn};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Key the slide index is stored under
pub const PROGRESS_KEY: &str = "javaOOPProgress";

/// Durable key/value storage behind the progress store
pub trait ProgressBackend {
    fn read(&self, key: &str) -> Result<Option<String>, SlidesError>;
    fn write(&mut self, key: &str, value: &str) -> Result<(), SlidesError>;
    fn remove(&mut self, key: &str) -> Result<(), SlidesError>;
}

/// TOML key/value file in the platform data directory
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// `<data_dir>/progress.toml`
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "oop-slides")
            .map(|dirs| dirs.data_dir().join("progress.toml"))
    }

    fn read_table(&self) -> Result<toml::Table, SlidesError> {
        if !self.path.exists() {
            return Ok(toml::Table::new());
        }
        let contents = fs::read_to_string(&self.path)?;
        Ok(toml::from_str(&contents)?)
    }

    fn write_table(&self, table: &toml::Table) -> Result<(), SlidesError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, toml::to_string(table)?)?;
        Ok(())
    }
}

impl ProgressBackend for FileBackend {
    fn read(&self, key: &str) -> Result<Option<String>, SlidesError> {
        let table = self.read_table()?;
        Ok(table.get(key).and_then(|value| match value {
            toml::Value::String(s) => Some(s.clone()),
            toml::Value::Integer(i) => Some(i.to_string()),
            _ => None,
        }))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), SlidesError> {
        // A corrupted file is replaced rather than blocking every later save
        let mut table = self.read_table().unwrap_or_default();
        table.insert(key.to_string(), toml::Value::String(value.to_string()));
        self.write_table(&table)
    }

    fn remove(&mut self, key: &str) -> Result<(), SlidesError> {
        let mut table = self.read_table()?;
        if table.remove(key).is_some() {
            self.write_table(&table)?;
        }
        Ok(())
    }
}

/// In-process storage, used when no data directory exists and in tests
#[derive(Default)]
pub struct MemoryBackend {
    values: HashMap<String, String>,
    unavailable: bool,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend whose every access fails, like a browser with storage disabled
    #[cfg(test)]
    pub fn unavailable() -> Self {
        Self {
            values: HashMap::new(),
            unavailable: true,
        }
    }

    #[cfg(test)]
    pub fn with_value(key: &str, value: &str) -> Self {
        let mut backend = Self::new();
        backend.values.insert(key.to_string(), value.to_string());
        backend
    }
}

impl ProgressBackend for MemoryBackend {
    fn read(&self, key: &str) -> Result<Option<String>, SlidesError> {
        if self.unavailable {
            return Err(SlidesError::StorageUnavailable);
        }
        Ok(self.values.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), SlidesError> {
        if self.unavailable {
            return Err(SlidesError::StorageUnavailable);
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), SlidesError> {
        if self.unavailable {
            return Err(SlidesError::StorageUnavailable);
        }
        self.values.remove(key);
        Ok(())
    }
}

/// Single persisted slide index. Failures are logged and swallowed.
pub struct ProgressStore {
    backend: Box<dyn ProgressBackend>,
}

impl ProgressStore {
    pub fn new(backend: Box<dyn ProgressBackend>) -> Self {
        Self { backend }
    }

    /// File-backed store, or an in-memory one when there is no data directory
    pub fn open_default() -> Self {
        match FileBackend::default_path() {
            Some(path) => {
                debug!("Progress file: {}", path.display());
                Self::new(Box::new(FileBackend::new(path)))
            }
            None => {
                warn!("{}; progress will not survive restarts", SlidesError::NoDirectory("data"));
                Self::new(Box::new(MemoryBackend::new()))
            }
        }
    }

    /// Stored value if present and an integer. Range is the caller's concern.
    pub fn load(&self) -> Option<i64> {
        match self.backend.read(PROGRESS_KEY) {
            Ok(Some(raw)) => match raw.trim().parse::<i64>() {
                Ok(index) => Some(index),
                Err(_) => {
                    warn!("Ignoring non-numeric stored progress {:?}", raw);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!("Failed to read progress: {}", e);
                None
            }
        }
    }

    pub fn save(&mut self, index: usize) {
        if let Err(e) = self.backend.write(PROGRESS_KEY, &index.to_string()) {
            warn!("Failed to save progress: {}", e);
        }
    }

    pub fn clear(&mut self) {
        if let Err(e) = self.backend.remove(PROGRESS_KEY) {
            warn!("Failed to clear progress: {}", e);
        }
    }
}
