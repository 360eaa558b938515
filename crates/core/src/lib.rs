//! Core types for the Mailroom messaging client.
//!
//! These types describe the server-side message model and the draft
//! attachments a caller queues for upload. They carry no I/O of their own;
//! the `mailroom-client` crate moves them over the wire.

pub mod attachment;
pub mod message;

pub use attachment::{ATTACHMENT_FIELD, DEFAULT_CONTENT_TYPE, DraftAttachment, UploadPayload};
pub use message::{Message, MessageAttachment, MessageId, Participant};
