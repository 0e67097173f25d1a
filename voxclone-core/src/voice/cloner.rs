use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde::Deserialize;
use tracing::{debug, error, info};

use super::client::PlayHtClient;
use super::error::VoiceError;
use super::types::{ClonedVoice, VoiceId, VoiceSample};

const CLONE_PATH: &str = "/cloned-voices/instant";

#[derive(Debug, Deserialize)]
struct CloneResponse {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    voice_id: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

impl CloneResponse {
    fn identifier(self) -> Option<(String, Option<String>)> {
        let id = self.id.or(self.voice_id).filter(|id| !id.is_empty())?;
        Some((id, self.name))
    }
}

/// Uploads samples to the instant-cloning endpoint.
pub struct VoiceCloner<'a> {
    client: &'a PlayHtClient,
}

impl<'a> VoiceCloner<'a> {
    pub fn new(client: &'a PlayHtClient) -> Self {
        Self { client }
    }

    pub async fn clone_voice(
        &self,
        sample: VoiceSample,
        name: &str,
    ) -> Result<ClonedVoice, VoiceError> {
        debug!(
            filename = %sample.filename,
            mime = %sample.mime_type,
            bytes = sample.content.len(),
            name,
            "Uploading voice sample"
        );

        let part = Part::bytes(sample.content)
            .file_name(sample.filename)
            .mime_str(&sample.mime_type)?;
        let form = Form::new()
            .part("sample_file", part)
            .text("voice_name", name.to_string());

        let builder = self
            .client
            .request(Method::POST, CLONE_PATH)
            .header("accept", "application/json")
            .multipart(form);
        let response = self.client.send("clone", builder).await?;

        if !response.status().is_success() {
            return Err(PlayHtClient::error_from_response("clone", response).await);
        }

        let body = response.text().await?;
        let parsed: CloneResponse = serde_json::from_str(&body).map_err(|e| {
            error!(error = %e, body = %body, "Clone response was not valid JSON");
            VoiceError::Content(format!("Failed to parse clone response: {e}"))
        })?;

        let Some((id, returned_name)) = parsed.identifier() else {
            error!(body = %body, "Clone response is missing a voice identifier");
            return Err(VoiceError::Content(
                "Clone response did not include a voice id".to_string(),
            ));
        };

        info!(voice_id = %id, "Voice cloned");
        Ok(ClonedVoice {
            id: VoiceId::new(id),
            name: returned_name.unwrap_or_else(|| name.to_string()),
        })
    }
}
