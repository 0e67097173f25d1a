use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::error::VoiceError;
use super::mime::sample_mime_type;

/// Maximum number of characters accepted for a single synthesis request.
pub const MAX_TEXT_CHARS: usize = 2000;
pub const OUTPUT_FORMAT: &str = "mp3";
pub const VOICE_ENGINE: &str = "PlayHT2.0";

/// An audio sample to upload for cloning. Only lives for one upload.
#[derive(Debug, Clone)]
pub struct VoiceSample {
    pub content: Vec<u8>,
    pub filename: String,
    pub mime_type: String,
}

impl VoiceSample {
    pub fn new(filename: impl Into<String>, content: Vec<u8>) -> Result<Self, VoiceError> {
        let filename = filename.into();
        if content.is_empty() {
            return Err(VoiceError::Validation(format!(
                "Voice sample {filename} is empty"
            )));
        }
        let mime_type = sample_mime_type(&filename);
        Ok(Self {
            content,
            filename,
            mime_type,
        })
    }

    pub async fn from_path(path: &Path) -> Result<Self, VoiceError> {
        let content = tokio::fs::read(path).await?;
        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("sample.wav")
            .to_string();
        Self::new(filename, content)
    }
}

/// Provider-assigned identifier of a cloned voice.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VoiceId(String);

impl VoiceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VoiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClonedVoice {
    pub id: VoiceId,
    pub name: String,
}

/// A validated request to synthesize `text` with an already selected voice.
#[derive(Debug, Clone)]
pub struct SynthesisRequest {
    text: String,
    voice: VoiceId,
}

impl SynthesisRequest {
    pub fn new(text: impl Into<String>, voice: &VoiceId) -> Result<Self, VoiceError> {
        let text = text.into();
        let chars = text.chars().count();
        if chars > MAX_TEXT_CHARS {
            return Err(VoiceError::Validation(format!(
                "Text exceeds {MAX_TEXT_CHARS} character limit ({chars} characters). Please shorten your input."
            )));
        }
        Ok(Self {
            text,
            voice: voice.clone(),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn voice(&self) -> &VoiceId {
        &self.voice
    }

    pub(crate) fn payload(&self) -> SynthesisPayload<'_> {
        SynthesisPayload {
            text: &self.text,
            voice: self.voice.as_str(),
            output_format: OUTPUT_FORMAT,
            voice_engine: VOICE_ENGINE,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct SynthesisPayload<'a> {
    pub text: &'a str,
    pub voice: &'a str,
    pub output_format: &'static str,
    pub voice_engine: &'static str,
}

/// An audio file written by a successful synthesis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioArtifact {
    pub path: PathBuf,
    pub bytes_written: u64,
}

impl AudioArtifact {
    pub fn file_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_sample_rejected() {
        let err = VoiceSample::new("take.wav", Vec::new()).unwrap_err();
        assert!(matches!(err, VoiceError::Validation(_)));
    }

    #[test]
    fn test_sample_mime_from_filename() {
        let sample = VoiceSample::new("take.flac", vec![1, 2, 3]).unwrap();
        assert_eq!(sample.mime_type, "audio/flac");
    }

    #[test]
    fn test_text_limit_counts_characters() {
        let voice = VoiceId::new("s3://voice/abc");
        let at_limit = "é".repeat(MAX_TEXT_CHARS);
        assert!(SynthesisRequest::new(at_limit, &voice).is_ok());

        let over = "a".repeat(MAX_TEXT_CHARS + 1);
        let err = SynthesisRequest::new(over, &voice).unwrap_err();
        assert!(matches!(err, VoiceError::Validation(_)));
    }

    #[test]
    fn test_payload_shape() {
        let voice = VoiceId::new("voice-1");
        let request = SynthesisRequest::new("Hello", &voice).unwrap();
        let json = serde_json::to_value(request.payload()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "text": "Hello",
                "voice": "voice-1",
                "output_format": "mp3",
                "voice_engine": "PlayHT2.0",
            })
        );
    }
}
