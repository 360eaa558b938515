use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a message in the server-side store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(String);

impl MessageId {
    /// Create an identifier from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MessageId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for MessageId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for MessageId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A participant of a message (sender or recipient).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Address in the protocol's own format (e.g. an email address).
    pub address: String,

    /// Human-readable label, when known.
    #[serde(default)]
    pub label: Option<String>,

    /// Transport protocol (e.g. `email`).
    #[serde(default)]
    pub protocol: Option<String>,

    /// Role of the participant: `From`, `To`, `Cc`, `Bcc`, ...
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

/// Metadata of an attachment already persisted on a message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageAttachment {
    /// Server-assigned identifier of a draft attachment.
    #[serde(default)]
    pub temp_id: Option<String>,

    /// Original file name.
    #[serde(default)]
    pub file_name: String,

    /// MIME content type.
    #[serde(default)]
    pub content_type: String,

    /// Size in bytes.
    #[serde(default)]
    pub file_size: u64,

    /// Download location, when the server exposes one.
    #[serde(default)]
    pub url: Option<String>,

    /// Whether the attachment is rendered inline in the body.
    #[serde(default)]
    pub is_inline: bool,
}

/// Canonical server-side representation of a message.
///
/// Only `message_id` is required; every other field defaults when the server
/// omits it, and unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Message identifier.
    pub message_id: MessageId,

    /// Discussion (thread) the message belongs to.
    #[serde(default)]
    pub discussion_id: Option<String>,

    #[serde(default)]
    pub subject: Option<String>,

    #[serde(default)]
    pub body: Option<String>,

    /// Whether the message is still an in-progress draft.
    #[serde(default)]
    pub is_draft: bool,

    #[serde(default)]
    pub date: Option<DateTime<Utc>>,

    /// When the server first stored the message.
    #[serde(default)]
    pub date_insert: Option<DateTime<Utc>>,

    #[serde(default)]
    pub participants: Vec<Participant>,

    /// Attachments persisted on the message.
    #[serde(default)]
    pub attachments: Vec<MessageAttachment>,
}

impl Message {
    /// Build a minimal reference to an existing draft.
    ///
    /// Only the identifier is populated. This is enough to upload attachments
    /// against the draft; refresh it to obtain the full representation.
    pub fn draft(message_id: impl Into<MessageId>) -> Self {
        Self {
            message_id: message_id.into(),
            discussion_id: None,
            subject: None,
            body: None,
            is_draft: true,
            date: None,
            date_insert: None,
            participants: Vec::new(),
            attachments: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_id_is_transparent_in_json() {
        let id = MessageId::new("msg-42");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"msg-42\"");
        assert_eq!(id.to_string(), "msg-42");
    }

    #[test]
    fn draft_reference_has_only_identifier() {
        let message = Message::draft("abc");
        assert_eq!(message.message_id.as_str(), "abc");
        assert!(message.is_draft);
        assert!(message.attachments.is_empty());
        assert!(message.subject.is_none());
    }

    #[test]
    fn deserializes_minimal_message() {
        let message: Message = serde_json::from_str(r#"{"message_id":"m1"}"#).unwrap();
        assert_eq!(message.message_id, MessageId::from("m1"));
        assert!(!message.is_draft);
        assert!(message.participants.is_empty());
    }

    #[test]
    fn deserializes_full_message_and_ignores_unknown_fields() {
        let json = serde_json::json!({
            "message_id": "m2",
            "discussion_id": "d9",
            "subject": "Quarterly report",
            "body": "See attached.",
            "is_draft": true,
            "date_insert": "2024-03-01T10:00:00Z",
            "importance_level": 70,
            "participants": [
                {"address": "alice@example.com", "type": "From", "protocol": "email"}
            ],
            "attachments": [
                {
                    "temp_id": "t-1",
                    "file_name": "report.pdf",
                    "content_type": "application/pdf",
                    "file_size": 2048
                }
            ]
        });

        let message: Message = serde_json::from_value(json).unwrap();
        assert_eq!(message.discussion_id.as_deref(), Some("d9"));
        assert!(message.is_draft);
        assert!(message.date_insert.is_some());
        assert_eq!(message.participants[0].kind.as_deref(), Some("From"));

        let attachment = &message.attachments[0];
        assert_eq!(attachment.temp_id.as_deref(), Some("t-1"));
        assert_eq!(attachment.file_name, "report.pdf");
        assert_eq!(attachment.file_size, 2048);
        assert!(!attachment.is_inline);
    }

    #[test]
    fn missing_message_id_is_rejected() {
        let result: Result<Message, _> = serde_json::from_str(r#"{"subject":"hi"}"#);
        assert!(result.is_err());
    }
}
