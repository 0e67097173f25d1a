use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use super::error::VoiceError;
use super::provider::VoiceProvider;
use super::types::{AudioArtifact, ClonedVoice, SynthesisRequest, VoiceId, VoiceSample};
use crate::artifacts::{ArtifactStore, Clock};

/// Mock behavior for the mock provider
#[derive(Debug, Clone, Default)]
pub enum MockBehavior {
    /// Return successful responses
    #[default]
    Success,
    /// Fail every call as if the key were rejected
    AlwaysUnauthorized,
    /// Fail every call as if the key lacked the required scope
    AlwaysForbidden,
}

/// A call the mock provider received, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    Clone { filename: String, name: String },
    List,
    Generate { text: String, voice: VoiceId },
}

/// In-memory provider that writes fixed audio bytes into a real artifact
/// store.
#[derive(Clone)]
pub struct MockProvider {
    behavior: Arc<Mutex<MockBehavior>>,
    voices: Arc<Mutex<Vec<ClonedVoice>>>,
    calls: Arc<Mutex<Vec<MockCall>>>,
    store: ArtifactStore,
    clock: Arc<dyn Clock>,
    audio: Vec<u8>,
}

impl MockProvider {
    pub fn new(store: ArtifactStore, clock: Arc<dyn Clock>) -> Self {
        Self {
            behavior: Arc::new(Mutex::new(MockBehavior::Success)),
            voices: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            store,
            clock,
            audio: b"ID3mock-audio".to_vec(),
        }
    }

    pub fn set_behavior(&self, behavior: MockBehavior) {
        *self.behavior.lock().unwrap() = behavior;
    }

    pub fn add_voice(&self, id: &str, name: &str) {
        self.voices.lock().unwrap().push(ClonedVoice {
            id: VoiceId::new(id),
            name: name.to_string(),
        });
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: MockCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn check_behavior(&self) -> Result<(), VoiceError> {
        match &*self.behavior.lock().unwrap() {
            MockBehavior::Success => Ok(()),
            MockBehavior::AlwaysUnauthorized => Err(VoiceError::Auth {
                body: r#"{"error_message":"invalid api key"}"#.to_string(),
            }),
            MockBehavior::AlwaysForbidden => Err(VoiceError::Permission {
                body: r#"{"error_message":"forbidden"}"#.to_string(),
            }),
        }
    }
}

#[async_trait]
impl VoiceProvider for MockProvider {
    fn name(&self) -> &'static str {
        "Mock"
    }

    async fn clone_voice(
        &self,
        sample: VoiceSample,
        name: &str,
    ) -> Result<ClonedVoice, VoiceError> {
        self.record(MockCall::Clone {
            filename: sample.filename.clone(),
            name: name.to_string(),
        });
        self.check_behavior()?;

        let mut voices = self.voices.lock().unwrap();
        let voice = ClonedVoice {
            id: VoiceId::new(format!("mock-voice-{}", voices.len() + 1)),
            name: name.to_string(),
        };
        voices.push(voice.clone());
        Ok(voice)
    }

    async fn list_voices(&self) -> Result<Vec<ClonedVoice>, VoiceError> {
        self.record(MockCall::List);
        self.check_behavior()?;
        Ok(self.voices.lock().unwrap().clone())
    }

    async fn generate(&self, request: &SynthesisRequest) -> Result<AudioArtifact, VoiceError> {
        self.record(MockCall::Generate {
            text: request.text().to_string(),
            voice: request.voice().clone(),
        });
        self.check_behavior()?;

        let (path, mut file) = self.store.create(&self.clock.now()).await?;
        file.write_all(&self.audio).await?;
        file.flush().await?;
        Ok(AudioArtifact {
            path,
            bytes_written: self.audio.len() as u64,
        })
    }
}
