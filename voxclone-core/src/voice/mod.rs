//! Play.ht voice cloning and speech synthesis

pub mod client;
pub mod cloner;
pub mod credentials;
pub mod error;
pub mod generator;
pub mod lister;
pub mod mime;
pub mod mock;
pub mod provider;
pub mod types;

pub use client::{PlayHtClient, PlayHtConfig};
pub use credentials::Credentials;
pub use error::VoiceError;
pub use provider::{PlayHtProvider, VoiceProvider};
pub use types::*;
