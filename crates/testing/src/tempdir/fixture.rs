// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Per-test scratch directory.
//!
//! A [`ScratchDir`] owns at most one directory at a time. The directory is
//! created by [`ScratchDir::prepare`] and removed by [`ScratchDir::cleanup`],
//! which also runs from `Drop` so a panicking test still leaves nothing behind.
//! A removal failure in `Drop` panics, failing the owning test, unless the
//! thread is already unwinding.

use std::{
	fs, io,
	path::{self, Path, PathBuf},
	thread,
};

use tracing::{debug, instrument, trace, warn};

use super::ScratchConfig;
use crate::error::{FixtureSetupError, FixtureTeardownError};

/// A private directory for a single test.
///
/// ```
/// use scratch_testing::tempdir::ScratchDir;
///
/// let mut dir = ScratchDir::create().unwrap();
/// let root = dir.root().unwrap().to_path_buf();
/// std::fs::write(root.join("hello.txt"), "hello").unwrap();
///
/// dir.cleanup().unwrap();
/// assert!(!root.exists());
/// ```
#[derive(Debug)]
pub struct ScratchDir {
	config: ScratchConfig,
	root: Option<PathBuf>,
}

impl ScratchDir {
	/// An inactive fixture using the default configuration.
	pub fn new() -> Self {
		Self::with_config(ScratchConfig::default())
	}

	pub fn with_config(config: ScratchConfig) -> Self {
		Self {
			config,
			root: None,
		}
	}

	/// Construct and prepare in one step.
	pub fn create() -> Result<Self, FixtureSetupError> {
		Self::create_with(ScratchConfig::default())
	}

	pub fn create_with(config: ScratchConfig) -> Result<Self, FixtureSetupError> {
		let mut result = Self::with_config(config);
		result.prepare()?;
		Ok(result)
	}

	/// Creates a fresh, empty root directory and returns its path.
	///
	/// An active fixture keeps its root while it is still an empty directory.
	/// A root the test removed or wrote into is cleaned up and replaced.
	#[instrument(name = "testing::scratch::prepare", level = "debug", skip(self), fields(
		base = %self.config.base.display()
	))]
	pub fn prepare(&mut self) -> Result<&Path, FixtureSetupError> {
		if self.root.as_deref().is_some_and(|root| !is_empty_dir(root)) {
			debug!(root = ?self.root, "replacing used scratch directory");
			self.cleanup().map_err(|FixtureTeardownError {
				path,
				source,
			}| FixtureSetupError {
				path,
				source,
			})?;
		}

		let root = match self.root.take() {
			Some(root) => root,
			None => self.create_root()?,
		};
		Ok(self.root.insert(root).as_path())
	}

	fn create_root(&self) -> Result<PathBuf, FixtureSetupError> {
		let name = self.config.next_name().map_err(|source| FixtureSetupError {
			path: self.config.base.join(&self.config.prefix),
			source,
		})?;

		let base = path::absolute(&self.config.base).map_err(|source| FixtureSetupError {
			path: self.config.base.clone(),
			source,
		})?;
		fs::create_dir_all(&base).map_err(|source| FixtureSetupError {
			path: base.clone(),
			source,
		})?;

		// create_dir fails on an existing path, so a token collision can never
		// hand the same directory to two fixtures
		let root = base.join(name);
		fs::create_dir(&root).map_err(|source| FixtureSetupError {
			path: root.clone(),
			source,
		})?;

		debug!(root = %root.display(), "created scratch directory");
		Ok(root)
	}

	/// Recursively removes the root and clears it.
	///
	/// An inactive fixture, or a root that is already gone, is a no-op. The
	/// root is cleared even when removal fails.
	#[instrument(name = "testing::scratch::cleanup", level = "debug", skip(self), fields(
		root = ?self.root
	))]
	pub fn cleanup(&mut self) -> Result<(), FixtureTeardownError> {
		let Some(root) = self.root.take() else {
			trace!("no scratch directory to remove");
			return Ok(());
		};

		match fs::remove_dir_all(&root) {
			Ok(()) => {
				debug!(root = %root.display(), "removed scratch directory");
				Ok(())
			}
			Err(err) if err.kind() == io::ErrorKind::NotFound => {
				trace!(root = %root.display(), "scratch directory already removed");
				Ok(())
			}
			Err(source) => Err(FixtureTeardownError {
				path: root,
				source,
			}),
		}
	}

	/// The active root, `None` before `prepare` and after `cleanup`.
	pub fn root(&self) -> Option<&Path> {
		self.root.as_deref()
	}

	pub fn is_active(&self) -> bool {
		self.root.is_some()
	}

	pub fn join(&self, path: impl AsRef<Path>) -> Option<PathBuf> {
		self.root().map(|root| root.join(path))
	}

	/// Location for a persistence test's store file inside the root.
	pub fn store_path(&self) -> Option<PathBuf> {
		self.join(&self.config.store_file)
	}

	pub fn config(&self) -> &ScratchConfig {
		&self.config
	}
}

impl Default for ScratchDir {
	fn default() -> Self {
		Self::new()
	}
}

impl Drop for ScratchDir {
	fn drop(&mut self) {
		if let Err(err) = self.cleanup() {
			warn!(error = %err, "scratch directory left behind");
			// a second panic while unwinding would abort the whole test binary
			if !thread::panicking() {
				panic!("{err}");
			}
		}
	}
}

fn is_empty_dir(path: &Path) -> bool {
	fs::read_dir(path).map(|mut entries| entries.next().is_none()).unwrap_or(false)
}
