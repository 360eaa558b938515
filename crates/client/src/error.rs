use thiserror::Error;

/// Errors returned by the Mailroom client and the draft attachment workflow.
#[derive(Debug, Error)]
pub enum Error {
    /// The message store cannot perform the requested operation, e.g. it has
    /// no way to send multipart form payloads.
    #[error("unsupported environment: {0}")]
    Unsupported(String),

    /// A network or transport-level error occurred.
    #[error("connection error: {0}")]
    Connection(String),

    /// The requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The API answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Error message reported by the server.
        message: String,
    },

    /// The response body could not be decoded.
    #[error("deserialization error: {0}")]
    Deserialization(String),

    /// The client was given an invalid configuration.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// Reading an attachment from disk failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns `true` if the error is transient and the request may succeed
    /// on retry.
    ///
    /// The draft attachment workflow never retries on its own; this is a hint
    /// for callers that want to.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Connection(_) => true,
            Self::Http { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_errors() {
        assert!(Error::Connection("reset".into()).is_retryable());
        assert!(
            Error::Http {
                status: 503,
                message: "unavailable".into()
            }
            .is_retryable()
        );
        assert!(
            Error::Http {
                status: 429,
                message: "slow down".into()
            }
            .is_retryable()
        );
    }

    #[test]
    fn non_retryable_errors() {
        assert!(!Error::Unsupported("no multipart".into()).is_retryable());
        assert!(!Error::NotFound("m1".into()).is_retryable());
        assert!(
            !Error::Http {
                status: 400,
                message: "bad".into()
            }
            .is_retryable()
        );
        assert!(!Error::Deserialization("eof".into()).is_retryable());
        assert!(!Error::Configuration("tls".into()).is_retryable());
    }

    #[test]
    fn error_display() {
        let err = Error::Http {
            status: 413,
            message: "attachment too large".into(),
        };
        assert_eq!(err.to_string(), "HTTP 413: attachment too large");

        let err = Error::Unsupported("store cannot send multipart payloads".into());
        assert_eq!(
            err.to_string(),
            "unsupported environment: store cannot send multipart payloads"
        );
    }
}
