use reqwest::Method;
use serde::Deserialize;
use tracing::{error, info};

use super::client::PlayHtClient;
use super::error::VoiceError;
use super::types::{ClonedVoice, VoiceId};

const LIST_PATH: &str = "/cloned-voices";

#[derive(Debug, Deserialize)]
struct VoiceData {
    id: String,
    #[serde(default)]
    name: Option<String>,
}

pub struct VoiceLister<'a> {
    client: &'a PlayHtClient,
}

impl<'a> VoiceLister<'a> {
    pub fn new(client: &'a PlayHtClient) -> Self {
        Self { client }
    }

    pub async fn list_voices(&self) -> Result<Vec<ClonedVoice>, VoiceError> {
        let builder = self
            .client
            .request(Method::GET, LIST_PATH)
            .header("accept", "application/json");
        let response = self.client.send("list", builder).await?;

        if !response.status().is_success() {
            return Err(PlayHtClient::error_from_response("list", response).await);
        }

        let body = response.text().await?;
        let voices: Vec<VoiceData> = serde_json::from_str(&body).map_err(|e| {
            error!(error = %e, body = %body, "Voice list was not a JSON array of voices");
            VoiceError::Content(format!("Failed to parse voice list: {e}"))
        })?;

        info!(count = voices.len(), "Fetched cloned voices");

        Ok(voices
            .into_iter()
            .map(|v| ClonedVoice {
                name: v.name.unwrap_or_else(|| v.id.clone()),
                id: VoiceId::new(v.id),
            })
            .collect())
    }
}
