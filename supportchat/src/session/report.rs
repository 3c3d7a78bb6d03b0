//! Report hook for the moderation collaborator.
//!
//! Filing a report only hands a [`ReportRequest`] to a [`ModerationSink`];
//! nothing here enforces anything.

use supportchat_proto::report::ReportRequest;

/// Receives content reports.
pub trait ModerationSink: Send + Sync {
    /// Called once per filed report.
    fn report(&self, request: &ReportRequest);
}

/// Default sink: records the report in the log and does nothing else.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingModerationSink;

impl ModerationSink for LoggingModerationSink {
    fn report(&self, request: &ReportRequest) {
        tracing::info!(
            message_id = %request.message_id,
            reported_sender = %request.reported_sender,
            reporter = %request.reporter,
            topic = ?request.topic_id,
            "content reported"
        );
    }
}

/// Collects reports in memory.
#[derive(Debug, Default)]
pub struct RecordingModerationSink {
    reports: parking_lot::Mutex<Vec<ReportRequest>>,
}

impl RecordingModerationSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports received so far, oldest first.
    #[must_use]
    pub fn reports(&self) -> Vec<ReportRequest> {
        self.reports.lock().clone()
    }
}

impl ModerationSink for RecordingModerationSink {
    fn report(&self, request: &ReportRequest) {
        self.reports.lock().push(request.clone());
    }
}
