// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{io, path::PathBuf};

/// The scratch directory could not be created. The test body must not run.
#[derive(Debug, thiserror::Error)]
#[error("failed to create scratch directory {}: {source}", .path.display())]
pub struct FixtureSetupError {
	pub path: PathBuf,
	#[source]
	pub source: io::Error,
}

/// The scratch directory existed but could not be fully removed.
#[derive(Debug, thiserror::Error)]
#[error("failed to remove scratch directory {}: {source}", .path.display())]
pub struct FixtureTeardownError {
	pub path: PathBuf,
	#[source]
	pub source: io::Error,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Setup(#[from] FixtureSetupError),

	#[error(transparent)]
	Teardown(#[from] FixtureTeardownError),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<Error> for io::Error {
	fn from(err: Error) -> Self {
		let kind = match &err {
			Error::Setup(e) => e.source.kind(),
			Error::Teardown(e) => e.source.kind(),
		};
		io::Error::new(kind, err)
	}
}
