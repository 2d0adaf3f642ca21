// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Video source resolution.
//!
//! This module decides which playback backend a source reference maps
//! to: a recognized hosted-video identifier selects the embedded
//! widget backend, anything else is treated as a direct media URL.

use once_cell::sync::Lazy;
use regex::Regex;

/// Matches a hosted-video id embedded in a URL (watch, short-link,
/// embed, and shorts forms).
static HOSTED_ID_IN_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:v=|youtu\.be/|/embed/|/shorts/)([A-Za-z0-9_-]{11})")
        .expect("hosted id pattern is valid")
});

/// Matches a bare 11-character hosted-video id.
static BARE_HOSTED_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]{11}$").expect("bare id pattern is valid"));

/// A resolved playback source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoSource {
    /// A hosted video, played through the embed widget backend.
    Hosted { video_id: String },
    /// A direct media URL, played through the native backend.
    Native { url: String },
}

impl VideoSource {
    /// Resolve a user-entered source reference.
    ///
    /// Returns `None` for blank input. A reference containing a hosted
    /// video-id marker, or consisting of a bare 11-character id,
    /// resolves to the hosted backend; everything else is native.
    pub fn resolve(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }
        if let Some(captures) = HOSTED_ID_IN_URL.captures(input) {
            return Some(Self::Hosted {
                video_id: captures[1].to_string(),
            });
        }
        if BARE_HOSTED_ID.is_match(input) {
            return Some(Self::Hosted {
                video_id: input.to_string(),
            });
        }
        Some(Self::Native {
            url: input.to_string(),
        })
    }

    /// Canonical reference string, used in the export document.
    pub fn reference(&self) -> String {
        match self {
            Self::Hosted { video_id } => {
                format!("https://www.youtube.com/watch?v={}", video_id)
            }
            Self::Native { url } => url.clone(),
        }
    }

    /// URL the user can open outside the application when the engine
    /// fails to play the source.
    pub fn external_url(&self) -> String {
        self.reference()
    }

    /// Short label for the UI header.
    pub fn label(&self) -> String {
        match self {
            Self::Hosted { video_id } => format!("hosted video {}", video_id),
            Self::Native { url } => url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watch_url_resolves_to_hosted() {
        let source = VideoSource::resolve("https://host/watch?v=abcdefghijk").unwrap();
        assert_eq!(
            source,
            VideoSource::Hosted {
                video_id: "abcdefghijk".to_string()
            }
        );
    }

    #[test]
    fn test_short_link_and_embed_urls_resolve_to_hosted() {
        for input in [
            "https://youtu.be/abcdefghijk",
            "https://www.youtube.com/embed/abcdefghijk?rel=0",
            "https://www.youtube.com/shorts/abcdefghijk",
        ] {
            match VideoSource::resolve(input).unwrap() {
                VideoSource::Hosted { video_id } => assert_eq!(video_id, "abcdefghijk"),
                other => panic!("expected hosted source for {input}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_bare_id_resolves_to_hosted() {
        let source = VideoSource::resolve("abcdefghijk").unwrap();
        assert_eq!(
            source,
            VideoSource::Hosted {
                video_id: "abcdefghijk".to_string()
            }
        );
    }

    #[test]
    fn test_media_url_resolves_to_native() {
        let source = VideoSource::resolve("https://cdn.example.com/clip.mp4").unwrap();
        assert_eq!(
            source,
            VideoSource::Native {
                url: "https://cdn.example.com/clip.mp4".to_string()
            }
        );
    }

    #[test]
    fn test_blank_input_does_not_resolve() {
        assert_eq!(VideoSource::resolve(""), None);
        assert_eq!(VideoSource::resolve("   "), None);
    }

    #[test]
    fn test_hosted_reference_is_watch_url() {
        let source = VideoSource::resolve("abcdefghijk").unwrap();
        assert_eq!(
            source.reference(),
            "https://www.youtube.com/watch?v=abcdefghijk"
        );
    }
}
