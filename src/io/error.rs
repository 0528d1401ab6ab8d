use std::path::PathBuf;

use thiserror::Error;

use super::Format;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to open input file '{}': {source}", path.display())]
    InputOpen {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read input near line {line}: {source}")]
    InputUnreadable {
        line: usize,
        source: std::io::Error,
    },

    #[error("failed to write output file '{}': {source}", path.display())]
    OutputWriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("no output file is open")]
    NoOpenTarget,

    #[error("record name '{name}' at line {line} cannot be used as a file name")]
    InvalidRecordName { line: usize, name: String },

    #[error("lines from line {line} on precede any named record")]
    MissingRecordName { line: usize },

    #[error("output sink writes {sink} files but the run splits {config} records")]
    FormatMismatch { sink: Format, config: Format },
}

impl Error {
    pub fn output(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::OutputWriteFailed {
            path: path.into(),
            source,
        }
    }

    /// Input line the error refers to, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::InputUnreadable { line, .. }
            | Error::InvalidRecordName { line, .. }
            | Error::MissingRecordName { line } => Some(*line),
            Error::InputOpen { .. }
            | Error::OutputWriteFailed { .. }
            | Error::NoOpenTarget
            | Error::FormatMismatch { .. } => None,
        }
    }
}
