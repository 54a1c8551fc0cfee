use thiserror::Error;

/// Type alias for Result with GmailError
pub type Result<T> = std::result::Result<T, GmailError>;

/// Error types for the Gmail cleaner
#[derive(Error, Debug)]
pub enum GmailError {
    /// Gmail API returned an error
    #[error("Gmail API error: {0}")]
    ApiError(String),

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    AuthError(String),

    /// Gmail rejected the request because of quota or rate limits (429)
    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),

    /// Network-related error (connection issues, timeouts, etc.)
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Server returned 5xx error
    #[error("Server error (HTTP {status}): {message}")]
    ServerError { status: u16, message: String },

    /// Resource not found (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request (400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Forbidden (403), usually a missing scope
    #[error("Access forbidden: {0}")]
    Forbidden(String),

    /// IO error (file operations, etc.)
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl GmailError {
    /// Map a non-success HTTP status from Gmail to an error variant
    pub fn from_status(status: hyper::StatusCode) -> Self {
        let status_code = status.as_u16();
        let message = format!(
            "HTTP {}: {}",
            status_code,
            status.canonical_reason().unwrap_or("Unknown")
        );

        match status_code {
            400 => GmailError::BadRequest(message),
            403 => GmailError::Forbidden(message),
            404 => GmailError::NotFound(message),
            429 => GmailError::RateLimited(message),
            500..=599 => GmailError::ServerError {
                status: status_code,
                message,
            },
            _ => GmailError::ApiError(message),
        }
    }
}

impl From<google_gmail1::Error> for GmailError {
    fn from(error: google_gmail1::Error) -> Self {
        match error {
            // HTTP response with status code (non-success responses)
            google_gmail1::Error::Failure(ref response) => GmailError::from_status(response.status()),
            // Gmail understood the request but rejected it, body carries the reason
            google_gmail1::Error::BadRequest(ref err) => GmailError::BadRequest(format!("{}", err)),
            google_gmail1::Error::HttpError(ref err) => {
                GmailError::NetworkError(format!("Connection error: {}", err))
            }
            google_gmail1::Error::Io(err) => GmailError::NetworkError(err.to_string()),
            _ => GmailError::ApiError(error.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = GmailError::ServerError {
            status: 503,
            message: "Service unavailable".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("HTTP 503"));
        assert!(display.contains("Service unavailable"));

        let auth_error = GmailError::AuthError("Invalid token".to_string());
        let display = format!("{}", auth_error);
        assert!(display.contains("Authentication failed"));
    }

    #[test]
    fn test_status_mapping() {
        use hyper::StatusCode;

        let error = GmailError::from_status(StatusCode::FORBIDDEN);
        assert!(matches!(error, GmailError::Forbidden(_)));
        assert!(error.to_string().contains("HTTP 403: Forbidden"));

        let error = GmailError::from_status(StatusCode::TOO_MANY_REQUESTS);
        assert!(matches!(error, GmailError::RateLimited(_)));

        let error = GmailError::from_status(StatusCode::SERVICE_UNAVAILABLE);
        assert!(matches!(error, GmailError::ServerError { status: 503, .. }));

        assert!(matches!(
            GmailError::from_status(StatusCode::BAD_REQUEST),
            GmailError::BadRequest(_)
        ));
        assert!(matches!(
            GmailError::from_status(StatusCode::NOT_FOUND),
            GmailError::NotFound(_)
        ));
        assert!(matches!(
            GmailError::from_status(StatusCode::UNAUTHORIZED),
            GmailError::ApiError(_)
        ));
    }

    #[test]
    fn test_io_error_converts() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "token.json");
        let error: GmailError = io_error.into();
        assert!(matches!(error, GmailError::IoError(_)));
        assert!(error.to_string().contains("token.json"));
    }

    #[test]
    fn test_gmail_io_error_is_network_error() {
        let io_error = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset by peer");
        let error = GmailError::from(google_gmail1::Error::Io(io_error));
        assert!(matches!(error, GmailError::NetworkError(_)));
        assert!(error.to_string().contains("reset by peer"));
    }

    #[test]
    fn test_json_error_converts() {
        let parse_error = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let error: GmailError = parse_error.into();
        assert!(matches!(error, GmailError::SerializationError(_)));
    }
}
