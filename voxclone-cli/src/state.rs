use voxclone_core::voice::ClonedVoice;

/// Workflow state carried between commands of one CLI session.
#[derive(Debug, Default)]
pub struct State {
    /// Last fetched voice list, in display order
    pub voices: Vec<ClonedVoice>,
    pub selected_voice: Option<ClonedVoice>,
}

impl State {
    /// Selects by 1-based position in the last listing, then by exact id,
    /// then by case-insensitive name. A miss leaves the current choice alone.
    pub fn select(&mut self, selector: &str) -> Option<&ClonedVoice> {
        let selector = selector.trim();

        let found = match selector.parse::<usize>() {
            Ok(index) => index.checked_sub(1).and_then(|i| self.voices.get(i)),
            Err(_) => self
                .voices
                .iter()
                .find(|v| v.id.as_str() == selector)
                .or_else(|| {
                    self.voices
                        .iter()
                        .find(|v| v.name.eq_ignore_ascii_case(selector))
                }),
        }
        .cloned()?;

        self.selected_voice = Some(found);
        self.selected_voice.as_ref()
    }
}
