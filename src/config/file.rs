//! Credential file discovery and environment overrides.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::auth::Credentials;
use crate::error::SberChatError;

pub const CONFIG_FILE_NAME: &str = "sberchat.json";
pub const CLIENT_ID_ENV: &str = "SBERCHAT_CLIENT_ID";
pub const CLIENT_SECRET_ENV: &str = "SBERCHAT_CLIENT_SECRET";

/// Client id/secret pair as stored on disk.
///
/// ```json
/// {"clientID": "...", "clientSecret": "..."}
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(rename = "clientID")]
    pub client_id: String,
    #[serde(rename = "clientSecret")]
    pub client_secret: String,
}

impl fmt::Debug for FileConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

impl FileConfig {
    /// Locations probed for the credential file, in order.
    ///
    /// An explicit path comes first, then `./sberchat.json`,
    /// `./config/sberchat.json` and `$HOME/sberchat.json`.
    pub fn candidate_paths(explicit: Option<&Path>) -> Vec<PathBuf> {
        let mut paths = Vec::with_capacity(4);
        if let Some(path) = explicit {
            paths.push(path.to_path_buf());
        }
        paths.push(Path::new(".").join(CONFIG_FILE_NAME));
        paths.push(Path::new("config").join(CONFIG_FILE_NAME));
        if let Some(dirs) = directories::UserDirs::new() {
            paths.push(dirs.home_dir().join(CONFIG_FILE_NAME));
        }
        paths
    }

    /// First candidate path that exists on disk.
    pub fn locate(explicit: Option<&Path>) -> Option<PathBuf> {
        Self::candidate_paths(explicit)
            .into_iter()
            .find(|path| path.is_file())
    }

    /// Load from the first existing candidate path.
    pub fn load(explicit: Option<&Path>) -> Result<Self, SberChatError> {
        let path = Self::locate(explicit).ok_or_else(|| {
            SberChatError::Configuration(format!("no {CONFIG_FILE_NAME} found"))
        })?;
        Self::load_from_path(path)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, SberChatError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading credentials file");
        let raw = fs::read_to_string(path)?;
        let config: FileConfig = serde_json::from_str(&raw)?;
        Ok(config)
    }

    /// Credentials from `SBERCHAT_CLIENT_ID` / `SBERCHAT_CLIENT_SECRET`,
    /// after loading a `.env` file if one is present.
    pub fn from_env() -> Option<Self> {
        let _ = dotenvy::dotenv();
        let client_id = std::env::var(CLIENT_ID_ENV).ok()?;
        let client_secret = std::env::var(CLIENT_SECRET_ENV).ok()?;
        Some(Self {
            client_id,
            client_secret,
        })
    }

    /// Environment first, then the credential file search.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, SberChatError> {
        if let Some(config) = Self::from_env() {
            return Ok(config);
        }
        Self::load(explicit)
    }

    pub fn into_credentials(self) -> Credentials {
        Credentials::new(self.client_id, self.client_secret)
    }
}
