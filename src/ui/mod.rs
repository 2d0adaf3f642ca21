// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! UI components for the VQAT application.

pub mod annotation_list;
pub mod composer;
pub mod player;
