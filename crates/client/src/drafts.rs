use futures::future::try_join_all;
use mailroom_core::{DraftAttachment, Message, UploadPayload};
use tracing::{debug, info, instrument, warn};

use crate::{Error, MessageStore};

/// Request to attach files to a draft and refresh it.
#[derive(Debug, Clone)]
pub struct UploadDraftAttachments {
    /// Draft the files belong to. Only its identifier is used.
    pub message: Message,
    /// Files to upload, in caller order.
    pub attachments: Vec<DraftAttachment>,
}

impl UploadDraftAttachments {
    /// Create a new request.
    pub fn new(message: Message, attachments: Vec<DraftAttachment>) -> Self {
        Self {
            message,
            attachments,
        }
    }

    /// Run the request against `store`, returning the refreshed message.
    pub async fn run<S: MessageStore>(self, store: &S) -> Result<Message, Error> {
        upload_draft_attachments(store, &self.message, self.attachments).await
    }
}

/// Upload every attachment of a draft concurrently, then refresh the draft.
///
/// Each file is wrapped in its own [`UploadPayload`] and all uploads are in
/// flight at the same time. Once every upload has succeeded the message is
/// fetched exactly once and the refreshed representation is returned.
///
/// The first failing upload aborts the whole call: the remaining uploads are
/// dropped, the refresh is skipped, and that upload's error is returned
/// unchanged. Nothing is retried.
///
/// Returns [`Error::Unsupported`] without touching the store when the store
/// cannot send multipart payloads.
#[instrument(
    skip(store, message, attachments),
    fields(message_id = %message.message_id, attachment_count = attachments.len())
)]
pub async fn upload_draft_attachments<S: MessageStore>(
    store: &S,
    message: &Message,
    attachments: Vec<DraftAttachment>,
) -> Result<Message, Error> {
    if !store.supports_multipart() {
        return Err(Error::Unsupported(
            "message store cannot send multipart form payloads".into(),
        ));
    }

    let uploads = attachments.into_iter().map(|file| {
        debug!(file_name = %file.file_name, size = file.len(), "dispatching attachment upload");
        store.upload_attachment(message, UploadPayload::new(file))
    });

    if let Err(err) = try_join_all(uploads).await {
        warn!(error = %err, "attachment upload failed, skipping refresh");
        return Err(err);
    }

    let refreshed = store.request_message(&message.message_id).await?;
    info!(
        persisted = refreshed.attachments.len(),
        "draft attachments uploaded"
    );

    Ok(refreshed)
}
