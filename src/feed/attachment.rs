/// How an attachment should be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentKind {
    Image,
    Video,
    Audio,
    /// Inline-embeddable documents (pdf).
    Document,
    /// Anything else, offered as a plain download.
    Generic,
}

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "heif", "heic"];
// "ogg" is claimed by the video table; the audio table is only
// consulted afterwards.
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "ogg", "mov"];
const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "ogg", "m4a", "aac"];

/// Maps a file path to its rendering kind by extension,
/// case-insensitive. Total over any input: missing or
/// unrecognized extensions yield [`AttachmentKind::Generic`].
pub fn classify(path: &str) -> AttachmentKind {
    let extension = match std::path::Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
    {
        Some(ext) => ext.to_ascii_lowercase(),
        None => return AttachmentKind::Generic,
    };

    if IMAGE_EXTENSIONS.contains(&extension.as_str()) {
        AttachmentKind::Image
    } else if VIDEO_EXTENSIONS.contains(&extension.as_str()) {
        AttachmentKind::Video
    } else if AUDIO_EXTENSIONS.contains(&extension.as_str()) {
        AttachmentKind::Audio
    } else if extension == "pdf" {
        AttachmentKind::Document
    } else {
        AttachmentKind::Generic
    }
}
