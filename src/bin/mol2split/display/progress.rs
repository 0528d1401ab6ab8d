use std::io::{self, Write};
use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};

pub struct ByteProgress {
    bar: ProgressBar,
    start: Instant,
}

impl ByteProgress {
    pub fn new(total_bytes: u64, description: &str) -> Self {
        let bar = ProgressBar::new(total_bytes);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("  {spinner:.cyan} {msg} [{bar:32.cyan/blue}] {bytes}/{total_bytes} ({eta})")
                .expect("invalid template")
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
                .progress_chars("█▓░"),
        );
        bar.enable_steady_tick(Duration::from_millis(80));
        bar.set_message(description.to_string());

        Self {
            bar,
            start: Instant::now(),
        }
    }

    pub fn finish(self, description: &str) {
        self.bar.finish_and_clear();

        let mut stderr = io::stderr().lock();
        let _ = writeln!(
            stderr,
            "  \x1b[32m✓\x1b[0m {:<44} {:>5.1}s",
            description,
            self.start.elapsed().as_secs_f64()
        );
        let _ = writeln!(stderr);
    }

    pub fn abandon(self) {
        self.bar.abandon();
    }
}

/// Byte-level progress over the input file, or nothing when not interactive.
pub enum Progress {
    Interactive(ByteProgress),
    Silent,
}

impl Progress {
    pub fn new(interactive: bool, total_bytes: u64, description: &str) -> Self {
        if interactive {
            Self::Interactive(ByteProgress::new(total_bytes, description))
        } else {
            Self::Silent
        }
    }

    pub fn bar(&self) -> Option<&ProgressBar> {
        match self {
            Self::Interactive(p) => Some(&p.bar),
            Self::Silent => None,
        }
    }

    pub fn finish(self, description: &str) {
        match self {
            Self::Interactive(p) => p.finish(description),
            Self::Silent => {}
        }
    }

    pub fn abandon(self) {
        match self {
            Self::Interactive(p) => p.abandon(),
            Self::Silent => {}
        }
    }
}
