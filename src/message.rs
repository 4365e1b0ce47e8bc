//! Message sinks: where user-facing reports go.
//!
//! Rendering can fail; a failure is a [`TransmissionError`], the one error
//! the session does not recover from.
use crate::error::TransmissionError;
use log::info;
use std::io::Write;

pub trait MessageSink {
    fn render_message(&mut self, message: &str) -> Result<(), TransmissionError>;
}

impl<S: MessageSink + ?Sized> MessageSink for &mut S {
    fn render_message(&mut self, message: &str) -> Result<(), TransmissionError> {
        (**self).render_message(message)
    }
}

/// Writes each message as one line to an `io::Write`.
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    out: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> MessageSink for WriterSink<W> {
    fn render_message(&mut self, message: &str) -> Result<(), TransmissionError> {
        writeln!(self.out, "{message}")
            .and_then(|()| self.out.flush())
            .map_err(|e| TransmissionError {
                message: message.to_string(),
                cause: e.to_string(),
            })
    }
}

/// Keeps every message in memory.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    pub messages: Vec<String>,
}

impl MessageSink for RecordingSink {
    fn render_message(&mut self, message: &str) -> Result<(), TransmissionError> {
        self.messages.push(message.to_string());
        Ok(())
    }
}

/// Forwards messages to the `log` facade at info level. Never fails.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl MessageSink for LogSink {
    fn render_message(&mut self, message: &str) -> Result<(), TransmissionError> {
        info!("{message}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn writer_sink_writes_lines() {
        let mut sink = WriterSink::new(Vec::new());
        sink.render_message("one").unwrap();
        sink.render_message("two").unwrap();
        assert_eq!(sink.into_inner(), b"one\ntwo\n");
    }

    #[test]
    fn writer_failure_is_a_transmission_error() {
        let mut sink = WriterSink::new(BrokenPipe);
        let err = sink.render_message("lost").unwrap_err();
        assert_eq!(err.message, "lost");
    }

    #[test]
    fn log_sink_never_fails() {
        let mut sink = LogSink;
        for message in ["", "one", "File x.ppm not found!"] {
            assert!(sink.render_message(message).is_ok());
        }
    }
}
