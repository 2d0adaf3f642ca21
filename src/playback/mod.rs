// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Playback: source resolution, the consumed engine boundary, and the
//! coordinator that mirrors engine state for the annotation workflow.

pub mod coordinator;
pub mod engine;
pub mod source;
