use std::io::{self, Write};

use anyhow::Error;

use crate::io::ConfigError;
use crate::util::text::wrap;

#[rustfmt::skip]
pub fn print_error(err: &Error) {
    let mut stderr = io::stderr().lock();

    let _ = writeln!(stderr);
    let _ = writeln!(stderr, "   ╔══════════════════════════════════════════════════════════════╗");
    let _ = writeln!(stderr, "   ║  ✗ Error                                                     ║");
    let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");

    for line in wrap(&err.to_string(), 59) {
        let _ = writeln!(stderr, "   ║  {:<59} ║", line);
    }

    let mut source = err.source();
    while let Some(cause) = source {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Caused by:                                                  ║");
        for line in wrap(&cause.to_string(), 57) {
            let _ = writeln!(stderr, "   ║    {:<57} ║", line);
        }
        source = cause.source();
    }

    let hints = hints_for(err);
    if !hints.is_empty() {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Hints:                                                      ║");
        for hint in hints {
            let wrapped = wrap(&hint, 55);
            if let Some((first, rest)) = wrapped.split_first() {
                let _ = writeln!(stderr, "   ║    • {:<55} ║", first);
                for line in rest {
                    let _ = writeln!(stderr, "   ║      {:<55} ║", line);
                }
            }
        }
    }

    let _ = writeln!(stderr, "   ╚══════════════════════════════════════════════════════════════╝");
    let _ = writeln!(stderr);
}

fn hints_for(err: &Error) -> Vec<String> {
    let mut hints = Vec::new();

    if let Some(config) = err.downcast_ref::<ConfigError>() {
        config_hints(config, &mut hints);
    } else if let Some(split) = err.downcast_ref::<mol2split::Error>() {
        split_hints(split, &mut hints);
    }

    hints
}

fn config_hints(err: &ConfigError, hints: &mut Vec<String>) {
    match err {
        ConfigError::InputMissing { .. } => {
            hints.push("Check the path spelling and ensure the file exists".into());
            hints.push("Directories and special files cannot be split".into());
        }
        ConfigError::NotADirectory { .. } => {
            hints.push("Choose a different OUTPUT_DIR or remove the existing file".into());
        }
        ConfigError::CreateDir { source, .. } => {
            hints.push("Output files are written directly into OUTPUT_DIR".into());
            std_io_hints(source, hints);
        }
    }
}

fn split_hints(err: &mol2split::Error, hints: &mut Vec<String>) {
    use mol2split::Error as SplitError;

    match err {
        SplitError::InputOpen { source, .. } | SplitError::InputUnreadable { source, .. } => {
            std_io_hints(source, hints);
        }
        SplitError::OutputWriteFailed { source, .. } => {
            hints.push("Files completed before the failure were left in place".into());
            std_io_hints(source, hints);
        }
        SplitError::NoOpenTarget => {
            hints.push("This indicates a bug in the splitter; please report it".into());
        }
        SplitError::InvalidRecordName { line, .. } => {
            hints.push(format!(
                "Line {line} names a record and is used as its file name"
            ));
            hints.push("Names may not contain path separators or NUL, or be '.' or '..'".into());
            hints.push("Use RECORDS greater than 1 to write numbered partitions instead".into());
        }
        SplitError::MissingRecordName { line } => {
            hints.push(format!(
                "No MOLECULE marker with a name line follows the content at line {line}"
            ));
            hints.push("Check the file extension or pass --format".into());
            hints.push("Use RECORDS greater than 1 to write numbered partitions instead".into());
        }
        SplitError::FormatMismatch { .. } => {
            hints.push("This indicates a bug in the splitter; please report it".into());
        }
    }
}

fn std_io_hints(source: &std::io::Error, hints: &mut Vec<String>) {
    use std::io::ErrorKind;

    match source.kind() {
        ErrorKind::NotFound => {
            hints.push("File or directory not found".into());
        }
        ErrorKind::PermissionDenied => {
            hints.push("Permission denied; check access with `ls -la`".into());
        }
        ErrorKind::StorageFull | ErrorKind::WriteZero => {
            hints.push("Check available disk space".into());
        }
        ErrorKind::UnexpectedEof => {
            hints.push("The input may be truncated or still being written".into());
        }
        _ => {
            hints.push("Check file paths, permissions, and disk space".into());
        }
    }
}
