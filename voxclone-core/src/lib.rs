pub mod artifacts;
pub mod settings;
pub mod voice;

// Public library API - the CLI only goes through these.
pub use artifacts::{ArtifactStore, Clock, SystemClock};
pub use settings::{Settings, SettingsManager};
pub use voice::{PlayHtProvider, VoiceError, VoiceProvider};
