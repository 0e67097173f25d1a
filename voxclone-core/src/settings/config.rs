use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::voice::client::{PlayHtConfig, DEFAULT_BASE_URL};
use crate::voice::credentials::{mask_secret, Credentials};
use crate::voice::error::VoiceError;

pub const ENV_USER_ID: &str = "PLAYHT_USER_ID";
pub const ENV_API_KEY: &str = "PLAYHT_API_KEY";
pub const ENV_BASE_URL: &str = "PLAYHT_BASE_URL";
pub const ENV_OUTPUT_DIR: &str = "VOXCLONE_OUTPUT_DIR";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiSettings {
    #[serde(default)]
    pub user_id: String,

    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            user_id: String::new(),
            api_key: String::new(),
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("audio_files")
}

/// Settings file contents. Environment variables take precedence over the
/// file, see [`Settings::with_env_overrides`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    #[serde(default)]
    pub api: ApiSettings,

    /// Directory that generated audio is written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api: ApiSettings::default(),
            output_dir: default_output_dir(),
        }
    }
}

impl Settings {
    /// Returns a copy with any non-empty overrides from `lookup` applied.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(user_id) = get(ENV_USER_ID) {
            self.api.user_id = user_id;
        }
        if let Some(api_key) = get(ENV_API_KEY) {
            self.api.api_key = api_key;
        }
        if let Some(base_url) = get(ENV_BASE_URL) {
            self.api.base_url = base_url;
        }
        if let Some(output_dir) = get(ENV_OUTPUT_DIR) {
            self.output_dir = PathBuf::from(output_dir);
        }
        self
    }

    pub fn credentials(&self) -> Result<Credentials, VoiceError> {
        Credentials::new(&self.api.user_id, &self.api.api_key)
    }

    pub fn playht_config(&self) -> Result<PlayHtConfig, VoiceError> {
        Ok(PlayHtConfig::new(self.credentials()?).with_base_url(&self.api.base_url))
    }

    /// Human readable summary that never exposes the full API key.
    pub fn describe(&self) -> String {
        let user_id = if self.api.user_id.is_empty() {
            "<not set>".to_string()
        } else {
            self.api.user_id.clone()
        };
        let api_key = if self.api.api_key.is_empty() {
            "<not set>".to_string()
        } else {
            mask_secret(&self.api.api_key)
        };

        format!(
            "Base URL:   {}\nUser ID:    {}\nAPI key:    {}\nOutput dir: {}",
            self.api.base_url,
            user_id,
            api_key,
            self.output_dir.display()
        )
    }
}
