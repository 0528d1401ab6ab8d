use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::Format;
use super::error::Error;

/// Destination of the records currently being written.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OutputTarget {
    /// Numbered partition, written as `part<N>.<ext>`.
    Partition(usize),
    /// Single named record, written as `<name>.<ext>`.
    Record(String),
}

impl OutputTarget {
    pub fn file_name(&self, extension: &str) -> String {
        match self {
            OutputTarget::Partition(n) => format!("part{n}.{extension}"),
            OutputTarget::Record(name) => format!("{name}.{extension}"),
        }
    }
}

impl fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputTarget::Partition(n) => write!(f, "partition {n}"),
            OutputTarget::Record(name) => write!(f, "record '{name}'"),
        }
    }
}

struct OpenFile {
    path: PathBuf,
    writer: BufWriter<File>,
}

/// Owner of the single output file open at any point of a run.
///
/// All output files are created directly inside `dir`, which must already
/// exist. Opening a new target always closes the previous one first, so at
/// most one handle is held. Any handle still open when the sink is dropped is
/// flushed and released.
pub struct OutputSink {
    dir: PathBuf,
    format: Format,
    current: Option<OpenFile>,
    files_opened: usize,
}

impl OutputSink {
    pub fn new(dir: impl Into<PathBuf>, format: Format) -> Self {
        Self {
            dir: dir.into(),
            format,
            current: None,
            files_opened: 0,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Format whose extension every output file carries.
    pub fn format(&self) -> Format {
        self.format
    }

    pub fn path_for(&self, target: &OutputTarget) -> PathBuf {
        self.dir.join(target.file_name(self.format.extension()))
    }

    /// Creates (or truncates) the file for `target` and makes it current.
    pub fn open(&mut self, target: &OutputTarget) -> Result<&Path, Error> {
        self.close()?;

        let path = self.path_for(target);
        let file = File::create(&path).map_err(|e| Error::output(&path, e))?;
        tracing::debug!(path = %path.display(), %target, "opened output file");

        self.files_opened += 1;
        let open = self.current.insert(OpenFile {
            path,
            writer: BufWriter::new(file),
        });
        Ok(&open.path)
    }

    /// Closes the current file and opens `target` in its place.
    pub fn rotate(&mut self, target: &OutputTarget) -> Result<&Path, Error> {
        self.close()?;
        self.open(target)
    }

    /// Writes `line` followed by `\n` to the current file.
    pub fn write_line(&mut self, line: &[u8]) -> Result<(), Error> {
        let open = self.current.as_mut().ok_or(Error::NoOpenTarget)?;
        open.writer
            .write_all(line)
            .and_then(|()| open.writer.write_all(b"\n"))
            .map_err(|e| Error::output(&open.path, e))
    }

    /// Flushes and releases the current file. Does nothing if none is open.
    pub fn close(&mut self) -> Result<(), Error> {
        let Some(mut open) = self.current.take() else {
            return Ok(());
        };
        open.writer
            .flush()
            .map_err(|e| Error::output(&open.path, e))?;
        tracing::debug!(path = %open.path.display(), "closed output file");
        Ok(())
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    pub fn current_path(&self) -> Option<&Path> {
        self.current.as_ref().map(|open| open.path.as_path())
    }

    /// Number of files created over the lifetime of the sink, reopened names included.
    pub fn files_opened(&self) -> usize {
        self.files_opened
    }
}

impl Drop for OutputSink {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            tracing::warn!(error = %e, "failed to flush output file on release");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn target_file_names() {
        assert_eq!(OutputTarget::Partition(3).file_name("sdf"), "part3.sdf");
        assert_eq!(
            OutputTarget::Record("ZINC000001".into()).file_name("mol2"),
            "ZINC000001.mol2"
        );
    }

    #[test]
    fn writes_lines_with_newline() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = OutputSink::new(dir.path(), Format::Sdf);
        sink.open(&OutputTarget::Partition(1)).unwrap();
        sink.write_line(b"first").unwrap();
        sink.write_line(b"").unwrap();
        sink.close().unwrap();

        let text = fs::read_to_string(dir.path().join("part1.sdf")).unwrap();
        assert_eq!(text, "first\n\n");
    }

    #[test]
    fn rotate_keeps_one_file_open() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = OutputSink::new(dir.path(), Format::Mol2);
        sink.open(&OutputTarget::Partition(1)).unwrap();
        sink.write_line(b"a").unwrap();
        let path = sink.rotate(&OutputTarget::Partition(2)).unwrap().to_path_buf();
        assert_eq!(path, dir.path().join("part2.mol2"));
        sink.write_line(b"b").unwrap();
        drop(sink);

        assert_eq!(fs::read_to_string(dir.path().join("part1.mol2")).unwrap(), "a\n");
        assert_eq!(fs::read_to_string(dir.path().join("part2.mol2")).unwrap(), "b\n");
    }

    #[test]
    fn format_sets_extension() {
        let sink = OutputSink::new("out", Format::Maestro);
        assert_eq!(sink.format(), Format::Maestro);
        assert_eq!(
            sink.path_for(&OutputTarget::Partition(2)),
            Path::new("out").join("part2.mae")
        );
    }

    #[test]
    fn close_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = OutputSink::new(dir.path(), Format::Mol2);
        sink.open(&OutputTarget::Record("x".into())).unwrap();
        sink.close().unwrap();
        sink.close().unwrap();
        assert!(!sink.is_open());
        assert_eq!(sink.files_opened(), 1);
    }

    #[test]
    fn write_without_target_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = OutputSink::new(dir.path(), Format::Mol2);
        assert!(matches!(sink.write_line(b"x"), Err(Error::NoOpenTarget)));
    }

    #[test]
    fn open_in_missing_directory_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent");
        let mut sink = OutputSink::new(&missing, Format::Mol2);
        let err = sink.open(&OutputTarget::Partition(1)).unwrap_err();
        match err {
            Error::OutputWriteFailed { path, .. } => {
                assert_eq!(path, missing.join("part1.mol2"))
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
