//! Browsing and playing previously generated artifacts

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::ArtifactStore;

pub struct PlaybackBrowser<'a> {
    store: &'a ArtifactStore,
}

impl<'a> PlaybackBrowser<'a> {
    pub fn new(store: &'a ArtifactStore) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<PathBuf>> {
        self.store
            .list()
            .await
            .with_context(|| format!("Failed to list artifacts in {:?}", self.store.dir()))
    }

    /// Picks an artifact. `None` means the newest; a number is a 1-based
    /// position in [`Self::list`]; anything else is matched against file names.
    pub async fn select(&self, selector: Option<&str>) -> Result<Option<PathBuf>> {
        let artifacts = self.list().await?;

        let Some(selector) = selector.map(str::trim).filter(|s| !s.is_empty()) else {
            return Ok(artifacts.into_iter().next());
        };

        if let Ok(index) = selector.parse::<usize>() {
            return Ok(index
                .checked_sub(1)
                .and_then(|i| artifacts.get(i))
                .cloned());
        }

        Ok(artifacts.into_iter().find(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name == selector || name.trim_end_matches(".mp3") == selector)
        }))
    }
}

/// Plays an audio file to completion on the default output device. Blocks.
#[cfg(feature = "playback")]
pub fn play_file(path: &Path) -> Result<()> {
    use std::fs::File;
    use std::io::BufReader;

    let file = File::open(path).with_context(|| format!("Failed to open {path:?}"))?;
    let stream_handle = rodio::OutputStreamBuilder::open_default_stream()
        .context("No audio output device available")?;
    let sink = rodio::Sink::connect_new(stream_handle.mixer());
    let source = rodio::Decoder::new(BufReader::new(file))
        .with_context(|| format!("Failed to decode {path:?}"))?;
    sink.append(source);
    sink.sleep_until_end();
    Ok(())
}

#[cfg(not(feature = "playback"))]
pub fn play_file(path: &Path) -> Result<()> {
    anyhow::bail!(
        "Audio output is not compiled in (enable the `playback` feature). File: {}",
        path.display()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};
    use tempfile::TempDir;

    async fn store_with_three() -> (TempDir, ArtifactStore) {
        let temp_dir = TempDir::new().unwrap();
        let store = ArtifactStore::open(temp_dir.path()).unwrap();
        for hour in [8, 9, 10] {
            let at = Local.with_ymd_and_hms(2024, 1, 2, hour, 0, 0).unwrap();
            store.create(&at).await.unwrap();
        }
        (temp_dir, store)
    }

    fn name(path: Option<PathBuf>) -> Option<String> {
        path.map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
    }

    #[tokio::test]
    async fn test_select_defaults_to_newest() {
        let (_dir, store) = store_with_three().await;
        let browser = PlaybackBrowser::new(&store);
        assert_eq!(
            name(browser.select(None).await.unwrap()).as_deref(),
            Some("audio_20240102_100000.mp3")
        );
    }

    #[tokio::test]
    async fn test_select_by_index_and_name() {
        let (_dir, store) = store_with_three().await;
        let browser = PlaybackBrowser::new(&store);

        assert_eq!(
            name(browser.select(Some("3")).await.unwrap()).as_deref(),
            Some("audio_20240102_080000.mp3")
        );
        assert_eq!(browser.select(Some("0")).await.unwrap(), None);
        assert_eq!(browser.select(Some("4")).await.unwrap(), None);
        assert_eq!(
            name(browser.select(Some("audio_20240102_090000")).await.unwrap()).as_deref(),
            Some("audio_20240102_090000.mp3")
        );
        assert_eq!(browser.select(Some("missing.mp3")).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_select_in_empty_store() {
        let temp_dir = TempDir::new().unwrap();
        let store = ArtifactStore::open(temp_dir.path()).unwrap();
        let browser = PlaybackBrowser::new(&store);
        assert_eq!(browser.select(None).await.unwrap(), None);
    }
}
