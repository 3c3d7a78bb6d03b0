//! Content report requests.

use serde::{Deserialize, Serialize};

use crate::message::{MessageId, Timestamp};

/// A request to review a message, handed to a moderation collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRequest {
    /// The reported message.
    pub message_id: MessageId,
    /// Author handle of the reported message.
    pub reported_sender: String,
    /// Handle of the participant filing the report.
    pub reporter: String,
    /// Topic the conversation belongs to, if any.
    pub topic_id: Option<String>,
    /// When the report was filed.
    pub timestamp: Timestamp,
}
