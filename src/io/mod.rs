use std::fmt;
use std::path::Path;
use std::str::FromStr;

use thiserror::Error as ThisError;

pub mod error;
pub mod reader;
pub mod sink;

pub use error::Error;
pub use reader::LineReader;
pub use sink::{OutputSink, OutputTarget};

#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
#[error("invalid archive format: '{0}' (expected mol2, sdf, or mae)")]
pub struct ParseFormatError(String);

/// Archive record formats understood by the segmentation engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Format {
    /// Tripos MOL2, records opened by a `@<TRIPOS>MOLECULE` line.
    #[default]
    Mol2,
    /// MDL structure-data file, records closed by a `$$$$` line.
    Sdf,
    /// Schrödinger Maestro structured table, records opened by an `f_m_ct` block.
    Maestro,
}

impl Format {
    /// Infers the format from the file extension of `path`.
    ///
    /// Matching is case-insensitive; anything other than `.sdf` or `.mae`
    /// (including a missing extension) falls back to [`Format::Mol2`].
    pub fn from_path(path: &Path) -> Self {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return Self::default();
        };
        match ext.to_lowercase().as_str() {
            "sdf" => Format::Sdf,
            "mae" => Format::Maestro,
            _ => Format::Mol2,
        }
    }

    /// Extension used for every output file written in this format.
    pub fn extension(self) -> &'static str {
        match self {
            Format::Mol2 => "mol2",
            Format::Sdf => "sdf",
            Format::Maestro => "mae",
        }
    }

    /// Whether a records-per-partition of 1 switches to files named after each record.
    pub fn names_single_records(self) -> bool {
        matches!(self, Format::Mol2)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Mol2 => write!(f, "MOL2"),
            Format::Sdf => write!(f, "SDF"),
            Format::Maestro => write!(f, "Maestro"),
        }
    }
}

impl FromStr for Format {
    type Err = ParseFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mol2" => Ok(Format::Mol2),
            "sdf" | "sd" => Ok(Format::Sdf),
            "mae" | "maestro" => Ok(Format::Maestro),
            _ => Err(ParseFormatError(s.to_string())),
        }
    }
}
