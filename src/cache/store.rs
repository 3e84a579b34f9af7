// Cache storage backends.
// Serializes the whole forecast mapping to JSON and writes it back as one snapshot.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};

use crate::error::{ForecastAppError, Result};

use super::key::ForecastKey;

/// One cached forecast: key and precipitation in mm (`None` = unknown).
pub type CacheEntry = (ForecastKey, Option<f64>);

/// Durable home of the forecast mapping.
///
/// Implementations always store and return the complete mapping; there are no
/// partial or incremental writes.
pub trait CacheStorage {
    /// Read the stored snapshot. `Ok(None)` means nothing has been stored yet.
    fn load(&self) -> Result<Option<Vec<CacheEntry>>>;

    /// Replace the stored snapshot with `entries`.
    fn save(&mut self, entries: &[CacheEntry]) -> Result<()>;
}

/// JSON object file, pretty-printed with 4-space indentation.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CacheStorage for JsonFileStorage {
    fn load(&self) -> Result<Option<Vec<CacheEntry>>> {
        match read_text(&self.path)? {
            Some(contents) => decode_entries(&contents).map(Some),
            None => Ok(None),
        }
    }

    fn save(&mut self, entries: &[CacheEntry]) -> Result<()> {
        let json = encode_entries(entries)?;
        write_text(&self.path, &json)?;
        tracing::debug!(path = %self.path.display(), entries = entries.len(), "Saved forecast cache");
        Ok(())
    }
}

/// In-process storage, mainly for tests. Counts how many snapshots were saved.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    snapshot: Option<Vec<CacheEntry>>,
    saves: usize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that already holds `entries`, as if saved by an earlier run.
    pub fn with_entries(entries: Vec<CacheEntry>) -> Self {
        Self {
            snapshot: Some(entries),
            saves: 0,
        }
    }

    pub fn snapshot(&self) -> Option<&[CacheEntry]> {
        self.snapshot.as_deref()
    }

    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl CacheStorage for MemoryStorage {
    fn load(&self) -> Result<Option<Vec<CacheEntry>>> {
        Ok(self.snapshot.clone())
    }

    fn save(&mut self, entries: &[CacheEntry]) -> Result<()> {
        self.snapshot = Some(entries.to_vec());
        self.saves += 1;
        Ok(())
    }
}

/// Render entries as a JSON object, keys in entry order.
pub fn encode_entries(entries: &[CacheEntry]) -> Result<String> {
    let object: Map<String, Value> = entries
        .iter()
        .map(|(key, value)| {
            let value = match value {
                Some(mm) => Value::from(*mm),
                None => Value::Null,
            };
            (key.to_string(), value)
        })
        .collect();

    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    Value::Object(object).serialize(&mut serializer)?;

    String::from_utf8(buf).map_err(|e| ForecastAppError::MalformedCache(e.to_string()))
}

/// Parse a JSON object of `"date_lat_lon": number | null` pairs.
pub fn decode_entries(contents: &str) -> Result<Vec<CacheEntry>> {
    let object = match serde_json::from_str::<Value>(contents)? {
        Value::Object(object) => object,
        other => {
            return Err(ForecastAppError::MalformedCache(format!(
                "expected a JSON object, found {}",
                json_type(&other)
            )));
        }
    };

    object
        .into_iter()
        .map(|(raw_key, value)| -> Result<CacheEntry> {
            let key: ForecastKey = raw_key.parse()?;
            let value = match value {
                Value::Null => None,
                Value::Number(n) => n.as_f64(),
                other => {
                    return Err(ForecastAppError::MalformedCache(format!(
                        "value for {raw_key:?} must be a number or null, found {}",
                        json_type(&other)
                    )));
                }
            };
            Ok((key, value))
        })
        .collect()
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Write text to a file, replacing previous contents atomically.
pub fn write_text(path: &Path, text: &str) -> Result<()> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    // Write atomically via temp file
    let temp_path = path.with_extension("tmp");
    let mut file = fs::File::create(&temp_path)?;
    file.write_all(text.as_bytes())?;
    file.sync_all()?;
    fs::rename(&temp_path, path)?;

    Ok(())
}

/// Read a whole file, or `None` if it does not exist.
pub fn read_text(path: &Path) -> Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(path)?;
    Ok(Some(contents))
}
