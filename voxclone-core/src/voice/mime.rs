use std::path::Path;

/// Content type used for samples whose extension is not recognised.
pub const DEFAULT_SAMPLE_MIME: &str = "audio/wav";

const SUPPORTED_EXTENSIONS: &[&str] = &["mp3", "wav", "ogg", "m4a", "flac"];

/// Infers the multipart content type of a voice sample from its filename.
pub fn sample_mime_type(filename: &str) -> String {
    let extension = Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension {
        Some(ext) if SUPPORTED_EXTENSIONS.contains(&ext.as_str()) => format!("audio/{ext}"),
        _ => DEFAULT_SAMPLE_MIME.to_string(),
    }
}
