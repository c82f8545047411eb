// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	env, io,
	path::{Component, Path, PathBuf},
};

use uuid::Uuid;

/// Configuration for scratch directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScratchConfig {
	/// Parent directory under which scratch roots are created.
	pub base: PathBuf,
	/// Leading component of every root directory name.
	pub prefix: String,
	/// File name handed out by `ScratchDir::store_path`.
	pub store_file: String,
}

impl Default for ScratchConfig {
	fn default() -> Self {
		Self {
			base: env::temp_dir(),
			prefix: "scratch".to_string(),
			store_file: "store.sqlite".to_string(),
		}
	}
}

impl ScratchConfig {
	/// Roots are created below `base` instead of the system temp directory.
	pub fn in_dir(base: impl Into<PathBuf>) -> Self {
		Self {
			base: base.into(),
			..Self::default()
		}
	}

	pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.prefix = prefix.into();
		self
	}

	pub fn with_store_file(mut self, store_file: impl Into<String>) -> Self {
		self.store_file = store_file.into();
		self
	}

	pub fn base(&self) -> &Path {
		&self.base
	}

	/// A fresh `<prefix>-<uuid>` directory name.
	///
	/// The name must be a single path component so the root stays directly
	/// below `base`.
	pub(crate) fn next_name(&self) -> io::Result<String> {
		let name = format!("{}-{}", self.prefix, Uuid::new_v4());
		let mut components = Path::new(&name).components();
		match (components.next(), components.next()) {
			(Some(Component::Normal(_)), None) => Ok(name),
			_ => Err(io::Error::new(
				io::ErrorKind::InvalidInput,
				format!("scratch prefix {:?} is not a single path component", self.prefix),
			)),
		}
	}
}
