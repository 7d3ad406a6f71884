//! Log sink port — the operator-facing log line stream.

use std::sync::Arc;

use minaret_domain::log::LogEntry;

/// Append-only sink for operator-facing log lines.
///
/// Implementations must accept concurrent emitters and keep the order of
/// lines coming from a single emitter.
pub trait LogSink: Send + Sync {
    fn emit(&self, entry: LogEntry);

    fn info(&self, message: impl Into<String>) {
        self.emit(LogEntry::info(message));
    }

    fn warn(&self, message: impl Into<String>) {
        self.emit(LogEntry::warn(message));
    }

    fn error(&self, message: impl Into<String>) {
        self.emit(LogEntry::error(message));
    }
}

impl<T: LogSink> LogSink for Arc<T> {
    fn emit(&self, entry: LogEntry) {
        (**self).emit(entry);
    }
}
