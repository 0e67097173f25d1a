use std::sync::Arc;

use async_trait::async_trait;

use super::client::{PlayHtClient, PlayHtConfig};
use super::cloner::VoiceCloner;
use super::error::VoiceError;
use super::generator::SpeechGenerator;
use super::lister::VoiceLister;
use super::types::{AudioArtifact, ClonedVoice, SynthesisRequest, VoiceSample};
use crate::artifacts::{ArtifactStore, Clock, SystemClock};

/// Trait for voice cloning and synthesis backends
#[async_trait]
pub trait VoiceProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Create a cloned voice from an audio sample
    async fn clone_voice(&self, sample: VoiceSample, name: &str)
        -> Result<ClonedVoice, VoiceError>;

    /// List voices previously cloned on this account
    async fn list_voices(&self) -> Result<Vec<ClonedVoice>, VoiceError>;

    /// Synthesize speech and persist it as a new artifact
    async fn generate(&self, request: &SynthesisRequest) -> Result<AudioArtifact, VoiceError>;
}

pub struct PlayHtProvider {
    client: PlayHtClient,
    store: ArtifactStore,
    clock: Arc<dyn Clock>,
}

impl PlayHtProvider {
    pub fn new(config: PlayHtConfig, store: ArtifactStore) -> Self {
        Self::with_clock(config, store, Arc::new(SystemClock))
    }

    pub fn with_clock(config: PlayHtConfig, store: ArtifactStore, clock: Arc<dyn Clock>) -> Self {
        Self {
            client: PlayHtClient::new(config),
            store,
            clock,
        }
    }

    pub fn store(&self) -> &ArtifactStore {
        &self.store
    }
}

#[async_trait]
impl VoiceProvider for PlayHtProvider {
    fn name(&self) -> &'static str {
        "Play.ht"
    }

    async fn clone_voice(
        &self,
        sample: VoiceSample,
        name: &str,
    ) -> Result<ClonedVoice, VoiceError> {
        VoiceCloner::new(&self.client)
            .clone_voice(sample, name)
            .await
    }

    async fn list_voices(&self) -> Result<Vec<ClonedVoice>, VoiceError> {
        VoiceLister::new(&self.client).list_voices().await
    }

    async fn generate(&self, request: &SynthesisRequest) -> Result<AudioArtifact, VoiceError> {
        SpeechGenerator::new(&self.client, &self.store, self.clock.clone())
            .generate(request)
            .await
    }
}
