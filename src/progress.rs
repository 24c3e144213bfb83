use std::io::{self, Write};

use crossterm::cursor::MoveToColumn;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};
use crossterm::{QueueableCommand, tty::IsTty};
use tracing_subscriber::fmt::MakeWriter;

use crate::app::{ProgressEvent, ProgressSink};

const BAR_WIDTH: usize = 30;

/// Single redrawn status line on stderr.
pub struct TerminalProgress {
    enabled: bool,
}

impl TerminalProgress {
    pub fn new() -> Self {
        Self {
            enabled: io::stderr().is_tty(),
        }
    }

    pub fn finish(&self) {
        if self.enabled {
            let _ = redraw(None);
        }
    }
}

impl Default for TerminalProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for TerminalProgress {
    fn event(&self, event: ProgressEvent) {
        if !self.enabled {
            return;
        }
        let line = match event {
            ProgressEvent::ListingStarted { url } => Some(format!("Fetching organism list from {url}")),
            ProgressEvent::OrganismsListed { count } => Some(format!("Found {count} organisms")),
            ProgressEvent::OrganismStarted { index, total, code } => {
                Some(format!("Processing organisms {} {index}/{total} {code}", bar(index, total)))
            }
            ProgressEvent::Retrying {
                code,
                attempt,
                attempts,
            } => Some(format!("Retrying {code} (attempt {attempt}/{attempts})")),
            ProgressEvent::OrganismFinished { .. } => return,
            ProgressEvent::WritingOutput { .. } => None,
        };
        let _ = redraw(line.as_deref());
    }
}

/// Sink for non-interactive runs.
pub struct QuietProgress;

impl ProgressSink for QuietProgress {
    fn event(&self, _event: ProgressEvent) {}
}

/// Log writer for stderr that wipes a half-drawn progress line before each
/// event, so log output and the status line do not interleave.
pub struct LogWriter {
    clear_line: bool,
}

impl LogWriter {
    pub fn stderr() -> Self {
        Self {
            clear_line: io::stderr().is_tty(),
        }
    }
}

impl<'a> MakeWriter<'a> for LogWriter {
    type Writer = io::Stderr;

    fn make_writer(&'a self) -> Self::Writer {
        let mut stderr = io::stderr();
        if self.clear_line {
            let _ = clear_line(&mut stderr);
        }
        stderr
    }
}

fn clear_line<W: Write>(out: &mut W) -> io::Result<()> {
    out.queue(MoveToColumn(0))?;
    out.queue(Clear(ClearType::CurrentLine))?;
    Ok(())
}

fn redraw(line: Option<&str>) -> io::Result<()> {
    let mut stderr = io::stderr();
    clear_line(&mut stderr)?;
    if let Some(line) = line {
        stderr.queue(Print(line))?;
    }
    stderr.flush()
}

fn bar(done: usize, total: usize) -> String {
    if total == 0 {
        return format!("[{}]", " ".repeat(BAR_WIDTH));
    }
    let filled = (done.min(total) * BAR_WIDTH) / total;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}
