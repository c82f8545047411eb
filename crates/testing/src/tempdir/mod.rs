// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

mod config;
mod fixture;

use std::path::Path;

pub use config::ScratchConfig;
pub use fixture::ScratchDir;
use tracing::warn;

use crate::error::Error;

/// Runs `f` inside a fresh scratch directory and removes it afterwards.
///
/// The directory is removed on every exit path, including a panic in `f`.
/// A teardown failure after a successful body is returned as the error; after
/// a failed body it is only logged and the body's error wins.
pub fn temp_dir<F, T, E>(f: F) -> Result<T, E>
where
	F: FnOnce(&Path) -> Result<T, E>,
	E: From<Error>,
{
	temp_dir_with(ScratchConfig::default(), f)
}

pub fn temp_dir_with<F, T, E>(config: ScratchConfig, f: F) -> Result<T, E>
where
	F: FnOnce(&Path) -> Result<T, E>,
	E: From<Error>,
{
	let mut dir = ScratchDir::with_config(config);
	let result = f(dir.prepare().map_err(Error::from)?);

	match (result, dir.cleanup()) {
		(Ok(value), Ok(())) => Ok(value),
		(Ok(_), Err(err)) => Err(Error::from(err).into()),
		(Err(err), Ok(())) => Err(err),
		(Err(err), Err(teardown)) => {
			warn!(error = %teardown, "scratch directory left behind after failed test body");
			Err(err)
		}
	}
}

#[cfg(test)]
pub mod tests {
	use std::{fs, io, panic};

	use super::*;

	#[test]
	fn test_temp_dir_removes_directory() {
		let mut seen = None;
		temp_dir(|path| -> io::Result<()> {
			fs::write(path.join("hello.txt"), "hello")?;
			seen = Some(path.to_path_buf());
			Ok(())
		})
		.unwrap();

		let seen = seen.unwrap();
		assert!(!seen.exists());
	}

	#[test]
	fn test_temp_dir_returns_body_value() {
		let len = temp_dir(|path| -> io::Result<usize> {
			fs::write(path.join("data"), [0u8; 16])?;
			Ok(fs::metadata(path.join("data"))?.len() as usize)
		})
		.unwrap();
		assert_eq!(len, 16);
	}

	#[test]
	fn test_temp_dir_body_error_still_cleans_up() {
		let mut seen = None;
		let err = temp_dir(|path| -> io::Result<()> {
			seen = Some(path.to_path_buf());
			Err(io::Error::other("body failed"))
		})
		.unwrap_err();

		assert_eq!(err.to_string(), "body failed");
		assert!(!seen.unwrap().exists());
	}

	#[test]
	fn test_temp_dir_cleans_up_after_panic() {
		let mut seen = None;
		let outcome = panic::catch_unwind(panic::AssertUnwindSafe(|| {
			temp_dir(|path| -> io::Result<()> {
				seen = Some(path.to_path_buf());
				fs::create_dir_all(path.join("a/b"))?;
				panic!("test body aborted");
			})
		}));

		assert!(outcome.is_err());
		assert!(!seen.unwrap().exists());
	}

	#[test]
	fn test_temp_dir_setup_failure_skips_body() {
		let blocker = ScratchDir::create().unwrap();
		let file = blocker.join("not-a-dir").unwrap();
		fs::write(&file, "x").unwrap();

		let mut ran = false;
		let err = temp_dir_with(ScratchConfig::in_dir(&file), |_| -> Result<(), Error> {
			ran = true;
			Ok(())
		})
		.unwrap_err();

		assert!(!ran);
		assert!(matches!(err, Error::Setup(_)));
	}

	#[test]
	#[cfg(unix)]
	fn test_temp_dir_reports_teardown_failure() {
		let mut seen = None;
		let err = temp_dir(|path| -> Result<(), Error> {
			// a regular file where the root directory was makes recursive removal fail
			fs::remove_dir(path).unwrap();
			fs::write(path, "x").unwrap();
			seen = Some(path.to_path_buf());
			Ok(())
		})
		.unwrap_err();

		assert!(matches!(err, Error::Teardown(_)));
		fs::remove_file(seen.unwrap()).unwrap();
	}
}
