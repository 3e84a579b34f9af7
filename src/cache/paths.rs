// Cache path utilities.
// Resolves where the forecast cache file lives on disk.

use std::path::PathBuf;

use directories::ProjectDirs;

/// File name of the forecast cache.
pub const CACHE_FILE_NAME: &str = "weather_cache.json";

/// Get the base cache directory (~/.cache/rain-forecast on Linux).
pub fn cache_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "rain-forecast").map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Path to the forecast cache file.
/// Falls back to the working directory when no home directory can be resolved.
pub fn default_cache_path() -> PathBuf {
    cache_dir()
        .map(|dir| dir.join(CACHE_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(CACHE_FILE_NAME))
}
