use std::io::BufRead;

use super::error::Error;

/// Forward-only reader yielding raw lines without their `\n` terminator.
///
/// Lines are kept as bytes so that payload in any encoding is passed through
/// untouched. A `\r` preceding the newline stays part of the line.
pub struct LineReader<R> {
    inner: R,
    buf: Vec<u8>,
    line_no: usize,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buf: Vec::new(),
            line_no: 0,
        }
    }

    /// Returns the next line with its 1-based line number, or `None` at end of input.
    pub fn next_line(&mut self) -> Result<Option<(usize, &[u8])>, Error> {
        self.buf.clear();
        let read = self
            .inner
            .read_until(b'\n', &mut self.buf)
            .map_err(|source| Error::InputUnreadable {
                line: self.line_no + 1,
                source,
            })?;
        if read == 0 {
            return Ok(None);
        }

        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
        }
        self.line_no += 1;
        Ok(Some((self.line_no, &self.buf)))
    }

    /// Number of lines returned so far.
    pub fn lines_read(&self) -> usize {
        self.line_no
    }
}
