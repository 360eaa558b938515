use std::path::Path;

use mailroom_core::{DraftAttachment, Message, MessageId, UploadPayload};
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::{Error, MailroomClient, MessageStore, error_from_response};

/// Server acknowledgement of an uploaded draft attachment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct UploadedAttachment {
    /// Identifier of the attachment while the message is a draft.
    #[serde(default)]
    pub temp_id: Option<String>,
    /// File name as stored by the server.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Read a file from disk into a [`DraftAttachment`].
///
/// The attachment is named after the file's final path component and uses the
/// default content type.
pub async fn read_attachment(path: impl AsRef<Path>) -> Result<DraftAttachment, Error> {
    let path = path.as_ref();
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("{} does not name a file", path.display()),
            )
        })?;
    let data = tokio::fs::read(path).await?;

    Ok(DraftAttachment::new(file_name, data))
}

/// Build the multipart body for a single upload payload.
fn multipart_form(payload: UploadPayload) -> Form {
    let field = payload.field_name();
    let file = payload.into_file();

    let part = Part::stream(file.data.clone())
        .file_name(file.file_name.clone())
        .mime_str(&file.content_type)
        .unwrap_or_else(|_| Part::stream(file.data).file_name(file.file_name));

    Form::new().part(field, part)
}

impl MailroomClient {
    /// Upload a single attachment to a draft.
    ///
    /// The file is sent as `multipart/form-data` under the payload's field
    /// name. Use [`upload_draft_attachments`](crate::upload_draft_attachments)
    /// to upload several files and refresh the draft in one call.
    #[instrument(
        skip(self, message, payload),
        fields(message_id = %message.message_id, file_name = %payload.file().file_name)
    )]
    pub async fn upload_attachment(
        &self,
        message: &Message,
        payload: UploadPayload,
    ) -> Result<UploadedAttachment, Error> {
        let url = format!("{}/attachments", self.message_url(&message.message_id));
        debug!(size = payload.file().len(), "uploading draft attachment");

        let response = self
            .add_auth(self.client.post(&url))
            .multipart(multipart_form(payload))
            .send()
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;

        if !response.status().is_success() {
            return Err(
                error_from_response(response, &format!("message {}", message.message_id)).await,
            );
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;
        if body.is_empty() {
            return Ok(UploadedAttachment::default());
        }

        // The server already accepted the file; an unreadable acknowledgement
        // must not turn the upload into a failure.
        match serde_json::from_slice(&body) {
            Ok(uploaded) => Ok(uploaded),
            Err(e) => {
                debug!(error = %e, "upload acknowledgement is not JSON, ignoring body");
                Ok(UploadedAttachment::default())
            }
        }
    }

    /// Remove an attachment from a draft.
    #[instrument(skip(self), fields(message_id = %message_id))]
    pub async fn delete_attachment(
        &self,
        message_id: &MessageId,
        temp_id: &str,
    ) -> Result<(), Error> {
        let url = format!(
            "{}/attachments/{}",
            self.message_url(message_id),
            utf8_percent_encode(temp_id, NON_ALPHANUMERIC)
        );

        let response = self
            .add_auth(self.client.delete(&url))
            .send()
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;

        if response.status().is_success() {
            debug!(temp_id, "draft attachment removed");
            Ok(())
        } else {
            let resource = format!("attachment {temp_id} on message {message_id}");
            Err(error_from_response(response, &resource).await)
        }
    }
}

impl MessageStore for MailroomClient {
    fn supports_multipart(&self) -> bool {
        true
    }

    async fn upload_attachment(
        &self,
        message: &Message,
        payload: UploadPayload,
    ) -> Result<(), Error> {
        MailroomClient::upload_attachment(self, message, payload)
            .await
            .map(|_| ())
    }

    async fn request_message(&self, message_id: &MessageId) -> Result<Message, Error> {
        self.get_message(message_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uploaded_attachment_tolerates_missing_fields() {
        let uploaded: UploadedAttachment = serde_json::from_str(r#"{"temp_id":"t-9"}"#).unwrap();
        assert_eq!(uploaded.temp_id.as_deref(), Some("t-9"));
        assert!(uploaded.name.is_none());
    }

    #[tokio::test]
    async fn read_attachment_uses_file_name_and_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("minutes.txt");
        tokio::fs::write(&path, b"meeting minutes").await.unwrap();

        let attachment = read_attachment(&path).await.unwrap();

        assert_eq!(attachment.file_name, "minutes.txt");
        assert_eq!(&attachment.data[..], b"meeting minutes");
        assert_eq!(attachment.content_type, mailroom_core::DEFAULT_CONTENT_TYPE);
    }

    #[tokio::test]
    async fn read_attachment_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.bin");
        let err = read_attachment(&path).await.unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
