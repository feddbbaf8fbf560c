//! Credential loading. The OAuth browser/PKCE flow
//! that produces the persisted credential is out of scope for this
//! crate — this adapter only reads whatever that flow (or a
//! plain API token) already left on disk or in the environment.

use palette_core::error::CoreError;
use palette_core::ports::{AuthKind, LoadToken};
use serde::Deserialize;
use std::path::PathBuf;

const TOKEN_ENV_VAR: &str = "PALETTE_API_TOKEN";

#[derive(Debug, Deserialize)]
struct StoredCredential {
    token: String,
    #[serde(default)]
    auth_type: StoredAuthType,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
enum StoredAuthType {
    Oauth,
    #[default]
    Token,
}

pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// `~/.config/palette/credentials.json`, matching the config
    /// directory the catalog cache uses.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("palette")
            .join("credentials.json")
    }
}

impl Default for FileTokenStore {
    fn default() -> Self {
        Self::new(Self::default_path())
    }
}

impl LoadToken for FileTokenStore {
    /// Checked once immediately before every invocation (never cached
    /// by this adapter) so a token revoked mid-session is caught at
    /// the next call rather than surfacing deep inside a retry path.
    /// Prefers the on-disk OAuth credential; falls back to a plain
    /// API token from the environment.
    fn load_token(&self) -> Result<(String, AuthKind), CoreError> {
        if let Some(credential) = read_stored_credential(&self.path) {
            let kind = match credential.auth_type {
                StoredAuthType::Oauth => AuthKind::Oauth,
                StoredAuthType::Token => AuthKind::Token,
            };
            return Ok((credential.token, kind));
        }
        std::env::var(TOKEN_ENV_VAR)
            .map(|token| (token, AuthKind::Token))
            .map_err(|_| {
                CoreError::Adapter(format!(
                    "no credential found at {} and {TOKEN_ENV_VAR} is unset",
                    self.path.display()
                ))
            })
    }
}

fn read_stored_credential(path: &std::path::Path) -> Option<StoredCredential> {
    let raw = std::fs::read_to_string(path).ok()?;
    serde_json::from_str(&raw).ok()
}
