use std::future::Future;

use mailroom_core::{Message, MessageId, UploadPayload};

use crate::Error;

/// Backend that persists draft attachments and serves messages.
///
/// The draft attachment workflow is written against this trait so it can run
/// over HTTP ([`MailroomClient`](crate::MailroomClient)) or any other
/// transport. Like other native `async fn` traits, it is not object-safe; use
/// it through generics.
pub trait MessageStore: Send + Sync {
    /// Whether this store can send multipart form payloads.
    ///
    /// Defaults to `false`. Stores that can upload files must override this to
    /// return `true`; attachment uploads are refused otherwise.
    fn supports_multipart(&self) -> bool {
        false
    }

    /// Upload a single attachment payload against `message`.
    fn upload_attachment(
        &self,
        message: &Message,
        payload: UploadPayload,
    ) -> impl Future<Output = Result<(), Error>> + Send;

    /// Fetch the canonical representation of a message.
    fn request_message(
        &self,
        message_id: &MessageId,
    ) -> impl Future<Output = Result<Message, Error>> + Send;
}
