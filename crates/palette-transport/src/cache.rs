//! 24-hour local catalog cache: a single JSON
//! document `{ tools, fetched_at }` under the user's config directory,
//! keyed by installation so a future multi-profile setup (several
//! config directories on the same machine) can't collide on one file.

use palette_core::error::CoreError;
use palette_core::schema::ToolDef;
use palette_core::ports::PersistCache;
use sha2::{Digest, Sha256};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

const CACHE_TTL_MS: i64 = 24 * 60 * 60 * 1000;

#[derive(Debug, Serialize, Deserialize)]
struct CacheDocument {
    tools: Vec<ToolDef>,
    fetched_at: i64,
}

pub struct FileCatalogCache {
    path: PathBuf,
}

impl FileCatalogCache {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// `~/.config/palette/catalog_cache-<installation id>.json`, falling
    /// back to the current directory when no config directory can be
    /// resolved. The installation id is the SHA-256 of the resolved
    /// config directory, truncated to 16 hex characters — stable across
    /// runs on the same machine, distinct across profiles that point
    /// `$XDG_CONFIG_HOME` elsewhere.
    pub fn default_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        let id = installation_id(&config_dir);
        config_dir
            .join("palette")
            .join(format!("catalog_cache-{id}.json"))
    }
}

fn installation_id(config_dir: &Path) -> String {
    let digest = Sha256::digest(config_dir.to_string_lossy().as_bytes());
    digest.iter().take(8).map(|b| format!("{b:02x}")).collect()
}

impl Default for FileCatalogCache {
    fn default() -> Self {
        Self::new(Self::default_path())
    }
}

impl PersistCache for FileCatalogCache {
    fn load_cached_catalog(&self) -> Result<Option<Vec<ToolDef>>, CoreError> {
        load_valid(&self.path, now_ms())
    }

    fn store_cached_catalog(&self, tools: &[ToolDef]) -> Result<(), CoreError> {
        store(&self.path, tools, now_ms())
    }
}

fn load_valid(path: &Path, now: i64) -> Result<Option<Vec<ToolDef>>, CoreError> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = std::fs::read_to_string(path)
        .map_err(|e| CoreError::Adapter(format!("cache read error: {e}")))?;
    let doc: CacheDocument = match serde_json::from_str(&raw) {
        Ok(doc) => doc,
        // A corrupt or stale-shaped cache file degrades to a cold
        // catalog fetch rather than a hard error.
        Err(_) => return Ok(None),
    };
    if now - doc.fetched_at > CACHE_TTL_MS {
        return Ok(None);
    }
    Ok(Some(doc.tools))
}

fn store(path: &Path, tools: &[ToolDef], now: i64) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| CoreError::Adapter(format!("cache dir error: {e}")))?;
    }
    let doc = CacheDocument {
        tools: tools.to_vec(),
        fetched_at: now,
    };
    let raw = serde_json::to_string_pretty(&doc)
        .map_err(|e| CoreError::Adapter(format!("cache encode error: {e}")))?;
    std::fs::write(path, raw).map_err(|e| CoreError::Adapter(format!("cache write error: {e}")))
}

fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::{IndexMap, IndexSet};
    use tempfile::NamedTempFile;

    fn tool(name: &str) -> ToolDef {
        ToolDef {
            name: name.to_string(),
            description: None,
            properties: IndexMap::new(),
            required: IndexSet::new(),
            defs: IndexMap::new(),
        }
    }

    #[test]
    fn missing_file_is_a_clean_miss() {
        let result = load_valid(Path::new("/nonexistent/palette/cache.json"), 0).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn fresh_cache_round_trips() {
        let file = NamedTempFile::new().unwrap();
        store(file.path(), &[tool("t")], 1_000).unwrap();
        let loaded = load_valid(file.path(), 1_000 + 60_000).unwrap();
        assert_eq!(loaded.unwrap().len(), 1);
    }

    #[test]
    fn cache_older_than_24h_is_a_miss() {
        let file = NamedTempFile::new().unwrap();
        store(file.path(), &[tool("t")], 0).unwrap();
        let loaded = load_valid(file.path(), CACHE_TTL_MS + 1).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn corrupt_cache_file_is_a_clean_miss_not_an_error() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "not json").unwrap();
        let loaded = load_valid(file.path(), 0).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn installation_id_is_stable_and_distinguishes_config_dirs() {
        let a = installation_id(Path::new("/home/alice/.config"));
        let b = installation_id(Path::new("/home/alice/.config"));
        let c = installation_id(Path::new("/home/bob/.config"));
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 16);
    }
}
