// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! I/O operations: export document emission and subtitle loading.

pub mod export;
pub mod subtitles;
