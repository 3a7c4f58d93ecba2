//! Rolling Logger
//!
//! A `tracing-subscriber` fmt layer that writes into a bounded in-memory
//! ring buffer instead of files. Browsers have no writable log directory,
//! so the most recent lines are kept in memory and can optionally be echoed
//! to a sink such as the developer console.

use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex, OnceLock};

use tracing::level_filters::LevelFilter;
use tracing::Subscriber;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::fmt::MakeWriter;

/// Default number of lines kept by [`init_logger`]
pub const DEFAULT_CAPACITY: usize = 500;

static GLOBAL_BUFFER: OnceLock<RollingBuffer> = OnceLock::new();

type Echo = Arc<dyn Fn(&str) + Send + Sync>;

/// Logger setup errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoggerError {
    AlreadyInitialized,
}

impl std::fmt::Display for LoggerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoggerError::AlreadyInitialized => write!(f, "logger already initialized"),
        }
    }
}

impl std::error::Error for LoggerError {}

/// Circular line buffer shared between the subscriber and readers
#[derive(Clone)]
pub struct RollingBuffer {
    lines: Arc<Mutex<VecDeque<String>>>,
    capacity: usize,
    echo: Option<Echo>,
}

impl RollingBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity: capacity.max(1),
            echo: None,
        }
    }

    /// Forward every completed line to `echo` as well
    pub fn with_echo<F>(mut self, echo: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.echo = Some(Arc::new(echo));
        self
    }

    /// Append a line, evicting the oldest one when full
    pub fn push(&self, line: &str) {
        if let Some(echo) = &self.echo {
            echo(line);
        }
        let Ok(mut lines) = self.lines.lock() else {
            return;
        };
        if lines.len() == self.capacity {
            lines.pop_front();
        }
        lines.push_back(line.to_string());
    }

    /// Snapshot of buffered lines, oldest first
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|lines| lines.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().map(|lines| lines.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

}

impl std::fmt::Debug for RollingBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RollingBuffer")
            .field("capacity", &self.capacity)
            .field("len", &self.len())
            .finish()
    }
}

/// Per-event writer; completed lines are pushed on newline and on drop
pub struct LineWriter {
    buffer: RollingBuffer,
    pending: Vec<u8>,
}

impl LineWriter {
    fn drain_complete_lines(&mut self) {
        while let Some(pos) = self.pending.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=pos).collect();
            let text = String::from_utf8_lossy(&line[..line.len() - 1]);
            self.buffer.push(text.trim_end_matches('\r'));
        }
    }
}

impl io::Write for LineWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.pending.extend_from_slice(buf);
        self.drain_complete_lines();
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.drain_complete_lines();
        Ok(())
    }
}

impl Drop for LineWriter {
    fn drop(&mut self) {
        self.drain_complete_lines();
        if !self.pending.is_empty() {
            let rest = String::from_utf8_lossy(&self.pending).into_owned();
            self.buffer.push(&rest);
            self.pending.clear();
        }
    }
}

impl<'a> MakeWriter<'a> for RollingBuffer {
    type Writer = LineWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LineWriter {
            buffer: self.clone(),
            pending: Vec::new(),
        }
    }
}

/// Local wall-clock timestamps, `HH:MM:SS.mmm`
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalTime;

impl FormatTime for LocalTime {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%H:%M:%S%.3f"))
    }
}

/// Build a subscriber writing into `buffer`.
///
/// Useful on its own with `tracing::subscriber::with_default` in tests.
pub fn subscriber(buffer: RollingBuffer, level: LevelFilter) -> impl Subscriber + Send + Sync {
    tracing_subscriber::fmt()
        .with_writer(buffer)
        .with_ansi(false)
        .with_timer(LocalTime)
        .with_target(true)
        .with_max_level(level)
        .finish()
}

/// Install the global subscriber and return its buffer
pub fn init_logger(app_name: &str, buffer: RollingBuffer) -> Result<RollingBuffer, LoggerError> {
    if GLOBAL_BUFFER.get().is_some() {
        return Err(LoggerError::AlreadyInitialized);
    }
    tracing::subscriber::set_global_default(subscriber(buffer.clone(), LevelFilter::DEBUG))
        .map_err(|_| LoggerError::AlreadyInitialized)?;
    GLOBAL_BUFFER
        .set(buffer.clone())
        .map_err(|_| LoggerError::AlreadyInitialized)?;
    tracing::info!(app = app_name, "logger initialized");
    Ok(buffer)
}

/// Most recent lines of the global buffer, empty before [`init_logger`]
pub fn recent_lines() -> Vec<String> {
    GLOBAL_BUFFER
        .get()
        .map(RollingBuffer::lines)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_buffer_evicts_oldest() {
        let buffer = RollingBuffer::new(2);
        buffer.push("one");
        buffer.push("two");
        buffer.push("three");
        assert_eq!(buffer.lines(), vec!["two".to_string(), "three".to_string()]);
    }

    #[test]
    fn test_subscriber_writes_lines() {
        let buffer = RollingBuffer::new(10);
        let sub = subscriber(buffer.clone(), LevelFilter::INFO);
        tracing::subscriber::with_default(sub, || {
            tracing::info!("page changed");
            tracing::debug!("filtered out");
        });
        let lines = buffer.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("page changed"));
        assert!(lines[0].contains("INFO"));
    }

    #[test]
    fn test_echo_receives_lines() {
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = seen.clone();
        let buffer = RollingBuffer::new(4).with_echo(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        buffer.push("a");
        buffer.push("b");
        assert_eq!(seen.load(Ordering::SeqCst), 2);
        assert_eq!(buffer.len(), 2);
    }

    #[test]
    fn test_partial_line_flushed_on_drop() {
        use std::io::Write;
        let buffer = RollingBuffer::new(4);
        {
            let mut writer = buffer.make_writer();
            writer.write_all(b"first\nsecond").unwrap();
        }
        assert_eq!(buffer.lines(), vec!["first".to_string(), "second".to_string()]);
    }

    #[test]
    fn test_recent_lines_empty_before_init() {
        // no global subscriber is installed in unit tests
        if GLOBAL_BUFFER.get().is_none() {
            assert!(recent_lines().is_empty());
        }
    }
}
