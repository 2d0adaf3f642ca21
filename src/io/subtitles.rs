// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Subtitle track loading and normalization.
//!
//! Tracks arrive as SRT or WebVTT text. WebVTT passes through
//! unchanged; SRT gets its timestamp delimiter rewritten and the
//! WebVTT header prefixed. Nothing else is validated: garbage in,
//! garbage out.

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

/// SRT cue timestamps use a comma before the milliseconds.
static SRT_TIMESTAMP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{2}:\d{2}:\d{2}),(\d{3})").expect("srt timestamp pattern is valid")
});

/// Failure while loading a subtitle file.
#[derive(Debug, thiserror::Error)]
pub enum SubtitleError {
    #[error("unsupported subtitle format: .{0} (expected .srt or .vtt)")]
    UnsupportedExtension(String),
    #[error("failed to read subtitle file: {0}")]
    Io(#[from] std::io::Error),
}

/// A loaded, normalized subtitle track.
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleTrack {
    pub file_name: String,
    pub payload: String,
}

impl SubtitleTrack {
    /// Number of cues, counted as timing lines. Display-only.
    pub fn cue_count(&self) -> usize {
        self.payload.lines().filter(|l| l.contains("-->")).count()
    }
}

/// Normalize a subtitle payload to WebVTT.
pub fn normalize_track(payload: &str) -> String {
    if payload.trim_start().starts_with("WEBVTT") {
        return payload.to_string();
    }
    let rewritten = SRT_TIMESTAMP.replace_all(payload, "$1.$2");
    format!("WEBVTT\n\n{}", rewritten)
}

/// Load and normalize a subtitle file, gated by extension.
pub fn load_track(path: &Path) -> Result<SubtitleTrack, SubtitleError> {
    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match extension.as_str() {
        "srt" | "vtt" => {}
        other => return Err(SubtitleError::UnsupportedExtension(other.to_string())),
    }

    let payload = std::fs::read_to_string(path)?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    log::info!("Loaded subtitle track {}", file_name);
    Ok(SubtitleTrack {
        file_name,
        payload: normalize_track(&payload),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_srt_converts_to_webvtt() {
        let input = "1\n00:00:01,000 --> 00:00:02,500\nHello\n";
        let output = normalize_track(input);
        assert!(output.starts_with("WEBVTT\n\n1\n00:00:01.000 --> 00:00:02.500\nHello\n"));
    }

    #[test]
    fn test_webvtt_passes_through_unchanged() {
        let input = "WEBVTT\n\n1\n00:00:01.000 --> 00:00:02.500\nHello\n";
        assert_eq!(normalize_track(input), input);
    }

    #[test]
    fn test_commas_in_cue_text_are_untouched() {
        let input = "1\n00:01:02,345 --> 00:01:04,000\nWell, hello there\n";
        let output = normalize_track(input);
        assert!(output.contains("00:01:02.345 --> 00:01:04.000"));
        assert!(output.contains("Well, hello there"));
    }

    #[test]
    fn test_malformed_input_is_not_validated() {
        // Garbage in, garbage out: still gets the header.
        let output = normalize_track("not a subtitle file");
        assert_eq!(output, "WEBVTT\n\nnot a subtitle file");
    }

    #[test]
    fn test_load_rejects_unknown_extension() {
        let result = load_track(Path::new("notes.txt"));
        assert!(matches!(
            result,
            Err(SubtitleError::UnsupportedExtension(ext)) if ext == "txt"
        ));
    }

    #[test]
    fn test_cue_count_counts_timing_lines() {
        let track = SubtitleTrack {
            file_name: "t.srt".to_string(),
            payload: normalize_track(
                "1\n00:00:01,000 --> 00:00:02,000\nA\n\n2\n00:00:03,000 --> 00:00:04,000\nB\n",
            ),
        };
        assert_eq!(track.cue_count(), 2);
    }
}
