//! Merging an env file into the process environment.
//!
//! Runs once at startup, before credentials are resolved. Variables that are
//! already set in the process win over values from the file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, info};

/// Load `explicit` if given, otherwise the nearest `.env` from the current
/// directory upwards. Returns the file that was merged, if any.
///
/// A missing default `.env` is fine; a missing explicit file is an error.
pub fn load_env_file(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
    match explicit {
        Some(path) => {
            dotenvy::from_path(path)
                .with_context(|| format!("Failed to load env file {}", path.display()))?;
            info!("Loaded environment from {}", path.display());
            Ok(Some(path.to_path_buf()))
        }
        None => match dotenvy::dotenv() {
            Ok(path) => {
                info!("Loaded environment from {}", path.display());
                Ok(Some(path))
            }
            Err(e) if e.not_found() => {
                debug!("No .env file found");
                Ok(None)
            }
            Err(e) => Err(e).context("Failed to parse .env file"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_explicit_file_is_merged() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "CFKIT_ENV_FILE_TEST_MERGED=from-file").unwrap();

        let loaded = load_env_file(Some(file.path())).unwrap();

        assert_eq!(loaded.as_deref(), Some(file.path()));
        assert_eq!(
            std::env::var("CFKIT_ENV_FILE_TEST_MERGED").unwrap(),
            "from-file"
        );
    }

    #[test]
    fn test_existing_variables_win() {
        // SAFETY: the variable name is unique to this test.
        unsafe { std::env::set_var("CFKIT_ENV_FILE_TEST_EXISTING", "from-process") };
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "CFKIT_ENV_FILE_TEST_EXISTING=from-file").unwrap();

        load_env_file(Some(file.path())).unwrap();

        assert_eq!(
            std::env::var("CFKIT_ENV_FILE_TEST_EXISTING").unwrap(),
            "from-process"
        );
    }

    #[test]
    fn test_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_env_file(Some(&dir.path().join("absent.env"))).unwrap_err();
        assert!(err.to_string().contains("absent.env"));
    }
}
