use std::sync::Arc;

use reqwest::{Method, Response, StatusCode};
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, error, info, warn};

use super::client::PlayHtClient;
use super::error::VoiceError;
use super::types::{AudioArtifact, SynthesisRequest};
use crate::artifacts::{ArtifactStore, Clock};

const TTS_STREAM_PATH: &str = "/tts/stream";

/// Size of the buffered writes used while streaming audio to disk.
pub const STREAM_CHUNK_SIZE: usize = 8192;

/// Turns synthesis requests into audio files in the artifact store.
pub struct SpeechGenerator<'a> {
    client: &'a PlayHtClient,
    store: &'a ArtifactStore,
    clock: Arc<dyn Clock>,
}

impl<'a> SpeechGenerator<'a> {
    pub fn new(client: &'a PlayHtClient, store: &'a ArtifactStore, clock: Arc<dyn Clock>) -> Self {
        Self {
            client,
            store,
            clock,
        }
    }

    pub async fn generate(&self, request: &SynthesisRequest) -> Result<AudioArtifact, VoiceError> {
        let payload = request.payload();
        debug!(voice = %request.voice(), chars = request.text().chars().count(), "Requesting speech");

        let builder = self
            .client
            .request(Method::POST, TTS_STREAM_PATH)
            .header("accept", "audio/mpeg")
            .header("content-type", "application/json")
            .json(&payload);
        let response = self.client.send("generate", builder).await?;

        // Only a plain 200 carries audio; every other status, 2xx included,
        // goes through the error classification.
        if response.status() != StatusCode::OK {
            return Err(PlayHtClient::error_from_response("generate", response).await);
        }

        self.persist(response).await
    }

    async fn persist(&self, response: Response) -> Result<AudioArtifact, VoiceError> {
        let (path, file) = self.store.create(&self.clock.now()).await?;

        match write_stream(response, file).await {
            Ok(bytes_written) => {
                info!(?path, bytes_written, "Audio generated");
                Ok(AudioArtifact {
                    path,
                    bytes_written,
                })
            }
            Err(e) => {
                error!(?path, error = %e, "Audio stream failed, removing partial file");
                if let Err(remove_err) = self.store.remove(&path).await {
                    warn!(?path, error = %remove_err, "Failed to remove partial artifact");
                }
                Err(e)
            }
        }
    }
}

async fn write_stream(mut response: Response, file: tokio::fs::File) -> Result<u64, VoiceError> {
    let mut writer = BufWriter::with_capacity(STREAM_CHUNK_SIZE, file);
    let mut bytes_written = 0u64;

    while let Some(chunk) = response.chunk().await? {
        writer.write_all(&chunk).await?;
        bytes_written += chunk.len() as u64;
    }

    writer.flush().await?;
    writer.into_inner().sync_all().await?;
    Ok(bytes_written)
}
