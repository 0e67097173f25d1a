use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};
use voxclone_core::artifacts::playback::{play_file, PlaybackBrowser};
use voxclone_core::voice::{SynthesisRequest, VoiceError, VoiceSample};
use voxclone_core::{ArtifactStore, PlayHtProvider, Settings, VoiceProvider};

use crate::state::State;

/// What a command produced, for the caller to print.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Info(String),
    Success(String),
    Error(String),
}

/// Drives the clone / list / select / generate / play workflow. Owns the
/// selected-voice state and hands it to the provider explicitly.
pub struct Session {
    provider: Option<Arc<dyn VoiceProvider>>,
    store: ArtifactStore,
    settings: Settings,
    pub state: State,
}

impl Session {
    /// Builds a session against Play.ht. Missing credentials do not stop the
    /// session from starting; only provider-backed commands fail.
    pub fn from_settings(settings: Settings) -> Result<Self> {
        let store = ArtifactStore::open(&settings.output_dir).with_context(|| {
            format!("Failed to create output directory {:?}", settings.output_dir)
        })?;

        let provider: Option<Arc<dyn VoiceProvider>> = match settings.playht_config() {
            Ok(config) => Some(Arc::new(PlayHtProvider::new(config, store.clone()))),
            Err(e) => {
                warn!(error = %e, "Play.ht credentials unavailable");
                None
            }
        };

        Ok(Self::new(settings, provider, store))
    }

    pub fn new(
        settings: Settings,
        provider: Option<Arc<dyn VoiceProvider>>,
        store: ArtifactStore,
    ) -> Self {
        Self {
            provider,
            store,
            settings,
            state: State::default(),
        }
    }

    fn provider(&self) -> Result<&Arc<dyn VoiceProvider>, Reply> {
        self.provider.as_ref().ok_or_else(|| {
            Reply::Error(
                "No Play.ht credentials configured. Set PLAYHT_USER_ID and PLAYHT_API_KEY or edit the settings file.".to_string(),
            )
        })
    }

    pub async fn clone_voice(&mut self, sample_path: &Path, name: &str) -> Reply {
        let provider = match self.provider() {
            Ok(provider) => provider.clone(),
            Err(reply) => return reply,
        };

        let sample = match VoiceSample::from_path(sample_path).await {
            Ok(sample) => sample,
            Err(e) => return Reply::Error(user_message(&e)),
        };

        match provider.clone_voice(sample, name).await {
            Ok(voice) => {
                info!(voice_id = %voice.id, "Selected newly cloned voice");
                let message = format!("✅ Voice cloned: {} ({})", voice.name, voice.id);
                if !self.state.voices.iter().any(|v| v.id == voice.id) {
                    self.state.voices.push(voice.clone());
                }
                self.state.selected_voice = Some(voice);
                Reply::Success(message)
            }
            Err(e) => Reply::Error(user_message(&e)),
        }
    }

    /// Refreshes the voice list. A failed fetch is reported and leaves the
    /// list empty.
    pub async fn refresh_voices(&mut self) -> Reply {
        let provider = match self.provider() {
            Ok(provider) => provider.clone(),
            Err(reply) => return reply,
        };

        match provider.list_voices().await {
            Ok(voices) => {
                self.state.voices = voices;
                if self.state.voices.is_empty() {
                    return Reply::Info("No cloned voices yet. Use /clone to create one.".into());
                }
                Reply::Info(self.format_voices())
            }
            Err(e) => {
                self.state.voices.clear();
                Reply::Error(format!("Failed to fetch voices: {}", user_message(&e)))
            }
        }
    }

    fn format_voices(&self) -> String {
        let selected = self.state.selected_voice.as_ref().map(|v| &v.id);
        self.state
            .voices
            .iter()
            .enumerate()
            .map(|(i, voice)| {
                let marker = if Some(&voice.id) == selected { "*" } else { " " };
                format!("{marker} {:>2}. {} ({})", i + 1, voice.name, voice.id)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn select(&mut self, selector: &str) -> Reply {
        let selected = self
            .state
            .select(selector)
            .map(|voice| format!("Selected voice: {} ({})", voice.name, voice.id));
        match selected {
            Some(message) => Reply::Success(message),
            None if self.state.voices.is_empty() => {
                Reply::Error("No voices loaded. Run /voices first.".to_string())
            }
            None => Reply::Error(format!("No voice matches '{selector}'")),
        }
    }

    pub async fn say(&mut self, text: &str) -> Reply {
        let Some(voice) = self.state.selected_voice.as_ref() else {
            return Reply::Error(
                "No voice selected. Use /voices and /select, or pass --voice.".to_string(),
            );
        };

        let request = match SynthesisRequest::new(text, &voice.id) {
            Ok(request) => request,
            Err(e) => return Reply::Error(user_message(&e)),
        };

        let provider = match self.provider() {
            Ok(provider) => provider.clone(),
            Err(reply) => return reply,
        };

        match provider.generate(&request).await {
            Ok(artifact) => Reply::Success(format!(
                "✅ Audio generated successfully: {}",
                artifact.path.display()
            )),
            Err(e) => Reply::Error(user_message(&e)),
        }
    }

    pub async fn artifacts(&self) -> Reply {
        match PlaybackBrowser::new(&self.store).list().await {
            Ok(artifacts) if artifacts.is_empty() => {
                Reply::Info(format!("No audio files in {}", self.store.dir().display()))
            }
            Ok(artifacts) => Reply::Info(
                artifacts
                    .iter()
                    .enumerate()
                    .map(|(i, path)| {
                        let name = path
                            .file_name()
                            .map(|n| n.to_string_lossy().into_owned())
                            .unwrap_or_default();
                        format!("{:>3}. {name}", i + 1)
                    })
                    .collect::<Vec<_>>()
                    .join("\n"),
            ),
            Err(e) => Reply::Error(format!("{e:#}")),
        }
    }

    pub async fn play(&self, selector: Option<&str>) -> Reply {
        let path = match PlaybackBrowser::new(&self.store).select(selector).await {
            Ok(Some(path)) => path,
            Ok(None) => return Reply::Error("No matching audio file".to_string()),
            Err(e) => return Reply::Error(format!("{e:#}")),
        };

        let display = path.display().to_string();
        match tokio::task::spawn_blocking(move || play_file(&path)).await {
            Ok(Ok(())) => Reply::Success(format!("Played {display}")),
            Ok(Err(e)) => Reply::Error(format!("{e:#}")),
            Err(e) => Reply::Error(format!("Playback task failed: {e}")),
        }
    }

    pub fn config(&self) -> Reply {
        let provider = self
            .provider
            .as_ref()
            .map(|p| p.name())
            .unwrap_or("<unconfigured>");
        Reply::Info(format!(
            "Provider:   {provider}\n{}",
            self.settings.describe()
        ))
    }
}

/// Human readable message for each error kind. Full diagnostics go to the
/// trace log where the error is detected.
pub fn user_message(err: &VoiceError) -> String {
    match err {
        VoiceError::Validation(msg) => msg.clone(),
        VoiceError::Auth { .. } => {
            "❌ Unauthorized: Your API key might be incorrect or expired.".to_string()
        }
        VoiceError::Permission { .. } => {
            "❌ Access Denied: Your API key may not have permission for this operation. Check Play.ht API settings.".to_string()
        }
        VoiceError::UnexpectedStatus { status, .. } => format!("⚠️ Unexpected Error: {status}"),
        VoiceError::Transport(e) => format!("⚠️ API Request Failed: {e}"),
        VoiceError::Content(msg) => format!("⚠️ Unexpected response from Play.ht: {msg}"),
        VoiceError::Io(e) => format!("⚠️ File error: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};
    use tempfile::TempDir;
    use voxclone_core::artifacts::FixedClock;
    use voxclone_core::voice::mock::{MockBehavior, MockCall, MockProvider};
    use voxclone_core::voice::VoiceId;

    struct Harness {
        session: Session,
        mock: MockProvider,
        dir: TempDir,
    }

    fn harness() -> Harness {
        let dir = TempDir::new().unwrap();
        let store = ArtifactStore::open(dir.path().join("audio_files")).unwrap();
        let now = Local.with_ymd_and_hms(2024, 2, 29, 23, 59, 58).unwrap();
        let mock = MockProvider::new(store.clone(), Arc::new(FixedClock(now)));
        let provider: Arc<dyn VoiceProvider> = Arc::new(mock.clone());
        let session = Session::new(Settings::default(), Some(provider), store);
        Harness { session, mock, dir }
    }

    #[tokio::test]
    async fn test_say_requires_selected_voice() {
        let mut h = harness();

        let reply = h.session.say("Hello").await;

        assert!(matches!(reply, Reply::Error(_)));
        assert!(h.mock.calls().is_empty());
    }

    #[tokio::test]
    async fn test_clone_then_say_writes_artifact() {
        let mut h = harness();
        let sample = h.dir.path().join("me.wav");
        std::fs::write(&sample, b"RIFFdata").unwrap();

        let reply = h.session.clone_voice(&sample, "Me").await;
        assert!(matches!(reply, Reply::Success(_)), "{reply:?}");

        let reply = h.session.say("Hello there").await;
        match reply {
            Reply::Success(msg) => assert!(msg.contains("audio_20240229_235958.mp3"), "{msg}"),
            other => panic!("unexpected reply {other:?}"),
        }

        assert_eq!(
            h.mock.calls(),
            vec![
                MockCall::Clone {
                    filename: "me.wav".to_string(),
                    name: "Me".to_string()
                },
                MockCall::Generate {
                    text: "Hello there".to_string(),
                    voice: VoiceId::new("mock-voice-1")
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_long_text_is_rejected_before_provider() {
        let mut h = harness();
        h.mock.add_voice("v-1", "Narrator");
        h.session.refresh_voices().await;
        h.session.select("1");

        let reply = h.session.say(&"a".repeat(2001)).await;

        match reply {
            Reply::Error(msg) => assert!(msg.contains("2000"), "{msg}"),
            other => panic!("unexpected reply {other:?}"),
        }
        assert!(!h
            .mock
            .calls()
            .iter()
            .any(|c| matches!(c, MockCall::Generate { .. })));
    }

    #[tokio::test]
    async fn test_failed_listing_clears_voices() {
        let mut h = harness();
        h.mock.add_voice("v-1", "Narrator");
        h.session.refresh_voices().await;
        assert_eq!(h.session.state.voices.len(), 1);

        h.mock.set_behavior(MockBehavior::AlwaysUnauthorized);
        let reply = h.session.refresh_voices().await;

        match reply {
            Reply::Error(msg) => assert!(msg.contains("Unauthorized"), "{msg}"),
            other => panic!("unexpected reply {other:?}"),
        }
        assert!(h.session.state.voices.is_empty());
    }

    #[tokio::test]
    async fn test_forbidden_generation_is_reported() {
        let mut h = harness();
        h.mock.add_voice("v-1", "Narrator");
        h.session.refresh_voices().await;
        h.session.select("Narrator");
        h.mock.set_behavior(MockBehavior::AlwaysForbidden);

        let reply = h.session.say("Hi").await;

        match reply {
            Reply::Error(msg) => assert!(msg.contains("Access Denied"), "{msg}"),
            other => panic!("unexpected reply {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_credentials_only_block_provider_commands() {
        let dir = TempDir::new().unwrap();
        let mut settings = Settings::default();
        settings.output_dir = dir.path().join("out");

        let mut session = Session::from_settings(settings).unwrap();

        assert!(matches!(session.refresh_voices().await, Reply::Error(_)));
        assert!(matches!(session.artifacts().await, Reply::Info(_)));
        match session.config() {
            Reply::Info(msg) => assert!(msg.contains("<unconfigured>"), "{msg}"),
            other => panic!("unexpected reply {other:?}"),
        }
    }

    #[test]
    fn test_user_messages() {
        assert!(user_message(&VoiceError::UnexpectedStatus {
            status: 502,
            body: "bad gateway".into()
        })
        .contains("502"));
        assert!(user_message(&VoiceError::Auth { body: String::new() }).contains("expired"));
    }
}
