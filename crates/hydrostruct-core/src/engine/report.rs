use std::fmt;
use std::sync::Mutex;
use tracing::{debug, error, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Debug,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Debug => "debug",
            Self::Warning => "warning",
            Self::Error => "error",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportMessage {
    pub severity: Severity,
    pub text: String,
}

pub type MessageCallback<'a> = Box<dyn Fn(&ImportMessage) + Send + Sync + 'a>;

/// Sink for the recoverable anomalies of an import pass.
///
/// Every message is emitted through `tracing` and, when a callback is installed, forwarded to
/// it so callers can collect or display them.
#[derive(Default)]
pub struct ImportReporter<'a> {
    callback: Option<MessageCallback<'a>>,
}

impl<'a> ImportReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: MessageCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    pub fn debug(&self, text: impl Into<String>) {
        self.report(Severity::Debug, text.into());
    }

    pub fn warn(&self, text: impl Into<String>) {
        self.report(Severity::Warning, text.into());
    }

    pub fn error(&self, text: impl Into<String>) {
        self.report(Severity::Error, text.into());
    }

    #[inline]
    pub fn report(&self, severity: Severity, text: String) {
        match severity {
            Severity::Debug => debug!("{}", text),
            Severity::Warning => warn!("{}", text),
            Severity::Error => error!("{}", text),
        }
        if let Some(cb) = &self.callback {
            cb(&ImportMessage { severity, text });
        }
    }
}

impl fmt::Debug for ImportReporter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImportReporter")
            .field("has_callback", &self.callback.is_some())
            .finish()
    }
}

/// Collects every message of a pass in order.
#[derive(Debug, Default)]
pub struct MessageLog {
    messages: Mutex<Vec<ImportMessage>>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A reporter that records into this log.
    pub fn reporter(&self) -> ImportReporter<'_> {
        ImportReporter::with_callback(Box::new(move |message: &ImportMessage| {
            self.record(message)
        }))
    }

    pub fn record(&self, message: &ImportMessage) {
        self.lock().push(message.clone());
    }

    pub fn messages(&self) -> Vec<ImportMessage> {
        self.lock().clone()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.lock()
            .iter()
            .filter(|message| message.severity == severity)
            .count()
    }

    /// Messages of the given severity whose text contains `needle`.
    pub fn matching(&self, severity: Severity, needle: &str) -> Vec<String> {
        self.lock()
            .iter()
            .filter(|message| message.severity == severity && message.text.contains(needle))
            .map(|message| message.text.clone())
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<ImportMessage>> {
        self.messages
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Counters of one import pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub locations_processed: usize,
    pub locations_skipped: usize,
    pub composites_created: usize,
    pub composites_removed: usize,
    pub structures_inserted: usize,
    pub structures_updated: usize,
    pub structures_moved: usize,
}

impl ImportSummary {
    pub fn structures_touched(&self) -> usize {
        self.structures_inserted + self.structures_updated
    }
}

impl fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} location(s) processed, {} skipped; {} composite(s) created, {} removed; {} structure(s) inserted, {} updated ({} moved)",
            self.locations_processed,
            self.locations_skipped,
            self.composites_created,
            self.composites_removed,
            self.structures_inserted,
            self.structures_updated,
            self.structures_moved
        )
    }
}
