//! Coarse file category derived from the MIME type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The top-level MIME type of a file (`image` for `image/png`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    /// `image/*`
    Image,
    /// `video/*`
    Video,
    /// `audio/*`
    Audio,
    /// `text/*`
    Text,
    /// `application/*`
    Application,
    /// Anything else, including an empty MIME type.
    #[serde(other)]
    Other,
}

impl FileKind {
    /// Classify a MIME type by the part before the `/`.
    pub fn from_mime(mime_type: &str) -> Self {
        let top = mime_type.split('/').next().unwrap_or_default();
        match top.trim().to_ascii_lowercase().as_str() {
            "image" => Self::Image,
            "video" => Self::Video,
            "audio" => Self::Audio,
            "text" => Self::Text,
            "application" => Self::Application,
            _ => Self::Other,
        }
    }

    /// Return the lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Text => "text",
            Self::Application => "application",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
