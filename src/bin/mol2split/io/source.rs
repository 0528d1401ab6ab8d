use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

use indicatif::{ProgressBar, ProgressBarIter};

/// Input file, optionally reporting consumed bytes to a progress bar.
pub enum InputSource {
    Plain(BufReader<File>),
    Tracked(BufReader<ProgressBarIter<File>>),
}

impl InputSource {
    pub fn open(path: &Path, bar: Option<&ProgressBar>) -> io::Result<Self> {
        let file = File::open(path)?;
        Ok(match bar {
            Some(bar) => InputSource::Tracked(BufReader::new(bar.wrap_read(file))),
            None => InputSource::Plain(BufReader::new(file)),
        })
    }
}

impl Read for InputSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            InputSource::Plain(r) => r.read(buf),
            InputSource::Tracked(r) => r.read(buf),
        }
    }
}

impl BufRead for InputSource {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        match self {
            InputSource::Plain(r) => r.fill_buf(),
            InputSource::Tracked(r) => r.fill_buf(),
        }
    }

    fn consume(&mut self, amt: usize) {
        match self {
            InputSource::Plain(r) => r.consume(amt),
            InputSource::Tracked(r) => r.consume(amt),
        }
    }
}
