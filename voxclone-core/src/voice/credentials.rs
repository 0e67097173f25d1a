use std::fmt;

use super::error::VoiceError;

/// Play.ht account credentials. Built once at startup and shared by reference.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    user_id: String,
    api_key: String,
}

impl Credentials {
    pub fn new(user_id: impl Into<String>, api_key: impl Into<String>) -> Result<Self, VoiceError> {
        let user_id = user_id.into().trim().to_string();
        let api_key = api_key.into().trim().to_string();

        if user_id.is_empty() {
            return Err(VoiceError::Validation(
                "No Play.ht user id configured. Set PLAYHT_USER_ID or api.user_id in settings"
                    .to_string(),
            ));
        }
        if api_key.is_empty() {
            return Err(VoiceError::Validation(
                "No Play.ht API key configured. Set PLAYHT_API_KEY or api.api_key in settings"
                    .to_string(),
            ));
        }

        Ok(Self { user_id, api_key })
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub(crate) fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn masked_key(&self) -> String {
        mask_secret(&self.api_key)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user_id", &self.user_id)
            .field("api_key", &self.masked_key())
            .finish()
    }
}

/// Shows at most the first and last four characters of a secret.
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}
