use bytes::Bytes;

/// Multipart field name every draft attachment is uploaded under.
pub const ATTACHMENT_FIELD: &str = "attachment";

/// Content type used when the caller does not know the file's MIME type.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// A file queued for upload against an in-progress message.
///
/// The payload is held as [`Bytes`], so cloning an attachment does not copy
/// the file contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftAttachment {
    /// File name reported to the server.
    pub file_name: String,
    /// MIME content type (e.g. `"application/pdf"`).
    pub content_type: String,
    /// Raw file contents.
    pub data: Bytes,
}

impl DraftAttachment {
    /// Create an attachment with the default content type.
    pub fn new(file_name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: DEFAULT_CONTENT_TYPE.to_owned(),
            data: data.into(),
        }
    }

    /// Override the MIME content type.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    /// Size of the file contents in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the file is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Multipart container for a single draft attachment upload.
///
/// Built once per attachment and consumed by the upload request. The file is
/// always carried under [`ATTACHMENT_FIELD`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPayload {
    file: DraftAttachment,
}

impl UploadPayload {
    /// Wrap a draft attachment in an upload payload.
    pub fn new(file: DraftAttachment) -> Self {
        Self { file }
    }

    /// Name of the multipart field holding the file.
    #[allow(clippy::unused_self)]
    pub fn field_name(&self) -> &'static str {
        ATTACHMENT_FIELD
    }

    /// The wrapped file.
    pub fn file(&self) -> &DraftAttachment {
        &self.file
    }

    /// Consume the payload, returning the wrapped file.
    pub fn into_file(self) -> DraftAttachment {
        self.file
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_attachment_uses_default_content_type() {
        let attachment = DraftAttachment::new("notes.bin", vec![1u8, 2, 3]);
        assert_eq!(attachment.content_type, DEFAULT_CONTENT_TYPE);
        assert_eq!(attachment.len(), 3);
        assert!(!attachment.is_empty());
    }

    #[test]
    fn content_type_override() {
        let attachment = DraftAttachment::new("report.pdf", Bytes::from_static(b"%PDF"))
            .with_content_type("application/pdf");
        assert_eq!(attachment.content_type, "application/pdf");
    }

    #[test]
    fn payload_wraps_file_under_attachment_field() {
        let file = DraftAttachment::new("a.txt", Bytes::from_static(b"hello"));
        let payload = UploadPayload::new(file.clone());
        assert_eq!(payload.field_name(), "attachment");
        assert_eq!(payload.file(), &file);
        assert_eq!(payload.into_file(), file);
    }
}
