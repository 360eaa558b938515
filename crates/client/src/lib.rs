//! Mailroom HTTP Client
//!
//! A native Rust client for the Mailroom messaging REST API, focused on
//! attaching files to draft messages.
//!
//! # Quick Start
//!
//! ```no_run
//! use mailroom_client::{DraftAttachment, MailroomClient, Message};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mailroom_client::Error> {
//!     let client = MailroomClient::builder("http://localhost:31415/api")
//!         .credentials("user-id", "access-token")
//!         .build()?;
//!
//!     let draft = Message::draft("c0ffee00-0000-4000-8000-000000000001");
//!     let attachments = vec![
//!         DraftAttachment::new("notes.txt", "hello".as_bytes().to_vec())
//!             .with_content_type("text/plain"),
//!     ];
//!
//!     let refreshed = client.upload_draft_attachments(&draft, attachments).await?;
//!     println!("{} attachment(s) on draft", refreshed.attachments.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - Concurrent draft attachment uploads followed by a single refresh
//! - Message fetch and draft attachment removal
//! - A [`MessageStore`] trait so the draft workflow can run over any backend
//! - Builder pattern for timeouts, credentials and custom HTTP clients

mod attachments;
mod drafts;
mod error;
mod messages;
mod store;

pub use attachments::{UploadedAttachment, read_attachment};
pub use drafts::{UploadDraftAttachments, upload_draft_attachments};
pub use error::Error;
pub use store::MessageStore;

// Re-export core types so callers don't need a direct `mailroom_core` dependency.
pub use mailroom_core::{
    ATTACHMENT_FIELD, DraftAttachment, Message, MessageAttachment, MessageId, Participant,
    UploadPayload,
};

use std::time::Duration;

use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::Client;
use serde::Deserialize;

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Basic-auth credentials for the messaging API.
#[derive(Clone)]
struct Credentials {
    user_id: String,
    access_token: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("user_id", &self.user_id)
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

/// HTTP client for the Mailroom messaging API.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct MailroomClient {
    client: Client,
    base_url: String,
    credentials: Option<Credentials>,
}

/// Builder for configuring a [`MailroomClient`].
#[derive(Debug)]
pub struct MailroomClientBuilder {
    base_url: String,
    timeout: Duration,
    credentials: Option<Credentials>,
    client: Option<Client>,
}

impl MailroomClientBuilder {
    /// Create a new builder with the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
            credentials: None,
            client: None,
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Authenticate every request with the given user id and access token.
    #[must_use]
    pub fn credentials(
        mut self,
        user_id: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Self {
        self.credentials = Some(Credentials {
            user_id: user_id.into(),
            access_token: access_token.into(),
        });
        self
    }

    /// Use a custom reqwest Client.
    ///
    /// Useful for configuring TLS, proxies, or other advanced settings. The
    /// builder's timeout is ignored in that case.
    #[must_use]
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<MailroomClient, Error> {
        if self.base_url.is_empty() {
            return Err(Error::Configuration("base URL must not be empty".into()));
        }

        let url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| Error::Configuration(format!("invalid base URL {}: {e}", self.base_url)))?;
        if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
            return Err(Error::Configuration(format!(
                "base URL {} must be an absolute http(s) URL",
                self.base_url
            )));
        }

        let client = match self.client {
            Some(c) => c,
            None => Client::builder()
                .timeout(self.timeout)
                .build()
                .map_err(|e| Error::Configuration(e.to_string()))?,
        };

        Ok(MailroomClient {
            client,
            base_url: self.base_url,
            credentials: self.credentials,
        })
    }
}

impl MailroomClient {
    /// Create a new client with default configuration.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use mailroom_client::MailroomClient;
    ///
    /// let client = MailroomClient::new("http://localhost:31415/api");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        MailroomClientBuilder::new(base_url)
            .build()
            .expect("default client configuration should not fail")
    }

    /// Create a builder for advanced configuration.
    pub fn builder(base_url: impl Into<String>) -> MailroomClientBuilder {
        MailroomClientBuilder::new(base_url)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Add basic-auth credentials if configured.
    fn add_auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.credentials {
            Some(creds) => req.basic_auth(&creds.user_id, Some(&creds.access_token)),
            None => req,
        }
    }

    /// Build the URL of a message resource.
    fn message_url(&self, message_id: &MessageId) -> String {
        format!(
            "{}/v2/messages/{}",
            self.base_url,
            utf8_percent_encode(message_id.as_str(), NON_ALPHANUMERIC)
        )
    }

    // =========================================================================
    // Health
    // =========================================================================

    /// Check if the server is healthy.
    pub async fn health(&self) -> Result<bool, Error> {
        let url = format!("{}/health", self.base_url);
        let response = self
            .add_auth(self.client.get(&url))
            .send()
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;

        Ok(response.status().is_success())
    }

    // =========================================================================
    // Draft attachments
    // =========================================================================

    /// Upload `attachments` to a draft concurrently, then return the refreshed
    /// draft.
    ///
    /// See [`upload_draft_attachments`] for the failure semantics.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # async fn example() -> Result<(), mailroom_client::Error> {
    /// use mailroom_client::{DraftAttachment, MailroomClient, Message};
    ///
    /// let client = MailroomClient::new("http://localhost:31415/api");
    /// let draft = Message::draft("draft-id");
    /// let files = vec![DraftAttachment::new("a.txt", b"a".to_vec())];
    ///
    /// let draft = client.upload_draft_attachments(&draft, files).await?;
    /// for attachment in &draft.attachments {
    ///     println!("{} ({} bytes)", attachment.file_name, attachment.file_size);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn upload_draft_attachments(
        &self,
        message: &Message,
        attachments: Vec<DraftAttachment>,
    ) -> Result<Message, Error> {
        upload_draft_attachments(self, message, attachments).await
    }
}

/// Error body returned by the messaging API.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: Vec<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Turn a non-success response into an [`Error`].
async fn error_from_response(response: reqwest::Response, resource: &str) -> Error {
    let status = response.status();
    if status == reqwest::StatusCode::NOT_FOUND {
        return Error::NotFound(resource.to_owned());
    }

    let text = response.text().await.unwrap_or_default();
    let parsed = serde_json::from_str::<ErrorResponse>(&text);
    let message = match parsed {
        Ok(ErrorResponse {
            message: Some(message),
            ..
        }) => message,
        Ok(ErrorResponse { errors, .. }) if !errors.is_empty() => errors
            .into_iter()
            .map(|e| e.message)
            .collect::<Vec<_>>()
            .join("; "),
        _ if text.is_empty() => status.canonical_reason().unwrap_or("error").to_owned(),
        _ => text,
    };

    Error::Http {
        status: status.as_u16(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_trims_trailing_slash() {
        let client = MailroomClient::new("http://localhost:31415/api/");
        assert_eq!(client.base_url(), "http://localhost:31415/api");
    }

    #[test]
    fn client_preserves_url_without_slash() {
        let client = MailroomClient::new("http://localhost:31415");
        assert_eq!(client.base_url(), "http://localhost:31415");
    }

    #[test]
    fn builder_rejects_empty_base_url() {
        let err = MailroomClientBuilder::new("/").build().unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn builder_rejects_url_without_scheme() {
        let err = MailroomClientBuilder::new("localhost:31415/api")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
        assert!(!err.is_retryable());
    }

    #[test]
    fn builder_rejects_unparseable_url() {
        let err = MailroomClientBuilder::new("http://").build().unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn builder_rejects_non_http_scheme() {
        let err = MailroomClientBuilder::new("ftp://mail.example.com")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn builder_sets_credentials() {
        let client = MailroomClientBuilder::new("http://localhost:31415")
            .credentials("user-1", "secret-token")
            .build()
            .unwrap();
        let creds = client.credentials.as_ref().unwrap();
        assert_eq!(creds.user_id, "user-1");
        assert_eq!(creds.access_token, "secret-token");
    }

    #[test]
    fn debug_redacts_access_token() {
        let client = MailroomClientBuilder::new("http://localhost:31415")
            .credentials("user-1", "secret-token")
            .build()
            .unwrap();
        let debug = format!("{client:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("secret-token"));
    }

    #[test]
    fn message_url_encodes_identifier() {
        let client = MailroomClient::new("http://localhost:31415");
        assert_eq!(
            client.message_url(&MessageId::new("a/b c")),
            "http://localhost:31415/v2/messages/a%2Fb%20c"
        );
    }

    #[test]
    fn http_client_supports_multipart() {
        let client = MailroomClient::new("http://localhost:31415");
        assert!(client.supports_multipart());
    }
}
