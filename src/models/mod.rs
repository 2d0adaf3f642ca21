// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data model: annotation records, the live collection, and the
//! composing-session state machine.

pub mod annotation;
pub mod collection;
pub mod session;
