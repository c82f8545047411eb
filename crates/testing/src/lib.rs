// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Test fixtures for exercising storage code against a real filesystem.
//!
//! Every test gets its own scratch directory which is removed again when the
//! test ends, whether it passed, failed or panicked.

pub mod error;
pub mod tempdir;

pub use error::{Error, FixtureSetupError, FixtureTeardownError, Result};
pub use tempdir::{ScratchConfig, ScratchDir, temp_dir, temp_dir_with};
