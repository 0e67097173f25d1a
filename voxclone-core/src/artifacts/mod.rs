//! Local storage for synthesized audio.
//!
//! Artifacts are plain files in a single output directory, named after the
//! local time they were generated at (`audio_YYYYMMDD_HHMMSS.mp3`). The
//! directory listing is the only persisted state.

pub mod playback;

use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tokio::fs::{self, File, OpenOptions};
use tracing::{debug, info};

pub const ARTIFACT_PREFIX: &str = "audio_";
pub const ARTIFACT_EXTENSION: &str = "mp3";

const MAX_SUFFIX: u32 = 10_000;

/// Source of the timestamp embedded in artifact names.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Always reports the same instant.
pub struct FixedClock(pub DateTime<Local>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}

pub fn artifact_stem(at: &DateTime<Local>) -> String {
    format!("{ARTIFACT_PREFIX}{}", at.format("%Y%m%d_%H%M%S"))
}

#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    /// Opens the output directory, creating it if needed.
    pub fn open(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        debug!(?dir, "Artifact directory ready");
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Creates a new, empty artifact file for `at`. The first artifact of a
    /// given second gets the bare timestamp name; later ones in the same
    /// second get `_1`, `_2`, ... appended. Existing files are never opened.
    pub async fn create(&self, at: &DateTime<Local>) -> io::Result<(PathBuf, File)> {
        let stem = artifact_stem(at);

        for n in 0..MAX_SUFFIX {
            let file_name = if n == 0 {
                format!("{stem}.{ARTIFACT_EXTENSION}")
            } else {
                format!("{stem}_{n}.{ARTIFACT_EXTENSION}")
            };
            let path = self.dir.join(file_name);

            match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => {
                    if n > 0 {
                        info!(?path, "Artifact name collided, using suffixed name");
                    }
                    return Ok((path, file));
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e),
            }
        }

        Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("No free artifact name for {stem} in {:?}", self.dir),
        ))
    }

    /// Lists artifacts, newest first.
    pub async fn list(&self) -> io::Result<Vec<PathBuf>> {
        let mut entries = fs::read_dir(&self.dir).await?;
        let mut artifacts = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let is_artifact = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case(ARTIFACT_EXTENSION));
            if is_artifact && entry.file_type().await?.is_file() {
                artifacts.push(path);
            }
        }

        artifacts.sort_by(|a, b| b.file_name().cmp(&a.file_name()));
        Ok(artifacts)
    }

    pub async fn remove(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path).await
    }
}
