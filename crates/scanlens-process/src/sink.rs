use std::sync::{Mutex, PoisonError};

/// Line-oriented sink for scanner output.
///
/// Everything the scanner prints, on either stream, plus the supervisor's
/// own notices flow through one of these. Implementations must tolerate
/// calls from two reader threads at once.
pub trait LogSink: Send + Sync {
    fn line(&self, text: &str);
}

impl<F> LogSink for F
where
    F: Fn(&str) + Send + Sync,
{
    fn line(&self, text: &str) {
        self(text)
    }
}

/// Append-only in-memory sink.
///
/// The stand-in for a log window: accumulates lines across a scan and can be
/// cleared by whoever owns the surface showing them.
#[derive(Debug, Default)]
pub struct BufferSink {
    lines: Mutex<Vec<String>>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn clear(&self) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl LogSink for BufferSink {
    fn line(&self, text: &str) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(text.to_string());
    }
}
