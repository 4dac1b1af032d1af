//! Plan message sinks for the host harness.

use std::io::Write;

use adaptive_long_core::telemetry::{PlanMessage, PlanSink};

/// Writes one JSON object per line.
///
/// Write errors are logged once and further messages are dropped.
pub struct JsonLinesSink<W: Write> {
    writer: W,
    written: usize,
    failed: bool,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            written: 0,
            failed: false,
        }
    }

    /// Messages written so far
    pub fn written(&self) -> usize {
        self.written
    }

    /// Flush and return the writer.
    pub fn into_inner(mut self) -> std::io::Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }

    fn write_line(&mut self, message: &PlanMessage) -> std::io::Result<()> {
        serde_json::to_writer(&mut self.writer, message)?;
        self.writer.write_all(b"\n")
    }
}

impl<W: Write> PlanSink for JsonLinesSink<W> {
    fn publish(&mut self, message: &PlanMessage) {
        if self.failed {
            return;
        }
        match self.write_line(message) {
            Ok(()) => self.written += 1,
            Err(e) => {
                tracing::warn!(error = %e, "plan sink failed, dropping further messages");
                self.failed = true;
            }
        }
    }
}

/// Keeps every message in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    messages: Vec<PlanMessage>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[PlanMessage] {
        &self.messages
    }
}

impl PlanSink for MemorySink {
    fn publish(&mut self, message: &PlanMessage) {
        self.messages.push(*message);
    }
}

/// Discards every message.
#[derive(Debug, Default)]
pub struct NullSink;

impl PlanSink for NullSink {
    fn publish(&mut self, _message: &PlanMessage) {}
}
