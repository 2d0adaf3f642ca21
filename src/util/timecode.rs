// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Timecode formatting utilities.
//!
//! This module formats playback positions in seconds as display
//! timecodes for the player and the annotation list.

/// Format a position in seconds as `M:SS` (or `H:MM:SS` past an hour).
pub fn format_timecode(seconds: f64) -> String {
    let total = seconds.max(0.0).floor() as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}
