mod source;

pub use source::InputSource;

use std::fs;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Rejected command-line configuration; nothing has been written yet.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("input '{}' does not exist or is not a regular file", path.display())]
    InputMissing { path: PathBuf },

    #[error("output path '{}' exists but is not a directory", path.display())]
    NotADirectory { path: PathBuf },

    #[error("cannot create output directory '{}'", path.display())]
    CreateDir { path: PathBuf, source: io::Error },
}

impl ConfigError {
    pub fn exit_code(&self) -> u8 {
        match self {
            ConfigError::InputMissing { .. } => 1,
            ConfigError::NotADirectory { .. } => 2,
            ConfigError::CreateDir { .. } => 3,
        }
    }
}

/// Returns `true` if stderr is a terminal (interactive).
pub fn stderr_is_tty() -> bool {
    io::stderr().is_terminal()
}

/// Checks that `path` names a regular file (following symlinks) and returns its size.
pub fn check_input(path: &Path) -> Result<u64, ConfigError> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_file() => Ok(meta.len()),
        _ => Err(ConfigError::InputMissing {
            path: path.to_path_buf(),
        }),
    }
}

/// Ensures `path` is a directory, creating it and any parents when absent.
pub fn prepare_output_dir(path: &Path) -> Result<(), ConfigError> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(ConfigError::NotADirectory {
            path: path.to_path_buf(),
        }),
        Err(_) => {
            fs::create_dir_all(path).map_err(|source| ConfigError::CreateDir {
                path: path.to_path_buf(),
                source,
            })?;
            tracing::debug!(path = %path.display(), "created output directory");
            Ok(())
        }
    }
}
