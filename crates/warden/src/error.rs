//! Transport outcomes, their classification into domain error kinds, and
//! the errors surfaced per mutation.

use serde::Deserialize;
use thiserror::Error;

use crate::model::ValidationError;

/// Body of an API error response, when it decodes.
///
/// GitHub error bodies carry a `message` field; anything else is ignored.
/// Classification is by status code only, the body is kept for log detail.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiErrorBody {
    pub message: Option<String>,
}

/// Outcome of a single transport round-trip that did not succeed.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The server answered with a non-2xx status.
    #[error("HTTP {status}")]
    Status {
        status: u16,
        body: Option<ApiErrorBody>,
    },

    /// No response was received (connectivity, DNS, timeout).
    #[error("network error: {0}")]
    Network(String),

    /// The server answered 2xx but the body did not decode.
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Domain error kinds rendered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("unauthorized")]
    Unauthorized,

    #[error("forbidden")]
    Forbidden,

    #[error("not found")]
    NotFound,

    #[error("server error {0}")]
    ServerError(u16),

    #[error("network failure")]
    NetworkFailure,
}

/// Classify a transport outcome into a domain error kind.
///
/// Total over all outcomes: every `TransportError` maps to exactly one
/// kind, there is no unknown fallthrough.
#[must_use]
pub fn classify(outcome: &TransportError) -> ErrorKind {
    match outcome {
        TransportError::Status { status: 401, .. } => ErrorKind::Unauthorized,
        TransportError::Status { status: 403, .. } => ErrorKind::Forbidden,
        TransportError::Status { status: 404, .. } => ErrorKind::NotFound,
        TransportError::Status { status, .. } => ErrorKind::ServerError(*status),
        TransportError::Network(_) => ErrorKind::NetworkFailure,
        // A 2xx whose body does not decode yields no usable response either.
        TransportError::Decode(_) => ErrorKind::NetworkFailure,
    }
}

impl From<TransportError> for ErrorKind {
    fn from(outcome: TransportError) -> Self {
        classify(&outcome)
    }
}

impl ErrorKind {
    /// The one fixed user-facing message for this kind.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Unauthorized => "No autorizado".to_string(),
            Self::Forbidden => "Prohibido".to_string(),
            Self::NotFound => "No encontrado".to_string(),
            Self::ServerError(code) => format!("Error {}", code),
            Self::NetworkFailure => "No se pudo conectar con el servidor".to_string(),
        }
    }
}

/// Error surfaced for a single mutation submission.
///
/// Every variant is terminal for the operation that raised it; retrying is
/// the caller's decision.
#[derive(Debug, Error)]
pub enum MutationError {
    /// Rejected client-side before any network call was issued.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Another mutation for the same repository is still in flight.
    #[error("a mutation for this repository is already in progress")]
    AlreadyInProgress,

    /// The call was issued and failed; classified outcome.
    #[error("{0}")]
    Remote(ErrorKind),
}

impl MutationError {
    /// The fixed user-facing message for this error.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(err) => err.user_message().to_string(),
            Self::AlreadyInProgress => {
                "Ya hay una operación en curso para este repositorio".to_string()
            }
            Self::Remote(kind) => kind.user_message(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(code: u16) -> TransportError {
        TransportError::Status {
            status: code,
            body: None,
        }
    }

    #[test]
    fn classification_is_total_over_status_buckets() {
        assert_eq!(classify(&status(401)), ErrorKind::Unauthorized);
        assert_eq!(classify(&status(403)), ErrorKind::Forbidden);
        assert_eq!(classify(&status(404)), ErrorKind::NotFound);
        assert_eq!(classify(&status(422)), ErrorKind::ServerError(422));
        assert_eq!(classify(&status(500)), ErrorKind::ServerError(500));
        assert_eq!(classify(&status(301)), ErrorKind::ServerError(301));
    }

    #[test]
    fn connectivity_failures_classify_as_network() {
        let err = TransportError::Network("connection refused".to_string());
        assert_eq!(classify(&err), ErrorKind::NetworkFailure);
    }

    #[test]
    fn decode_failures_classify_as_network() {
        let bad = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        assert_eq!(
            classify(&TransportError::Decode(bad)),
            ErrorKind::NetworkFailure
        );
    }

    #[test]
    fn from_transport_error_matches_classify() {
        let kind: ErrorKind = status(404).into();
        assert_eq!(kind, ErrorKind::NotFound);
    }

    #[test]
    fn user_messages_are_fixed() {
        assert_eq!(ErrorKind::Unauthorized.user_message(), "No autorizado");
        assert_eq!(ErrorKind::Forbidden.user_message(), "Prohibido");
        assert_eq!(ErrorKind::NotFound.user_message(), "No encontrado");
        assert_eq!(ErrorKind::ServerError(503).user_message(), "Error 503");
        assert_eq!(
            ErrorKind::NetworkFailure.user_message(),
            "No se pudo conectar con el servidor"
        );
    }

    #[test]
    fn mutation_error_user_messages() {
        let validation: MutationError = ValidationError::EmptyName.into();
        assert_eq!(
            validation.user_message(),
            "El nombre del repositorio es requerido"
        );
        assert_eq!(
            MutationError::AlreadyInProgress.user_message(),
            "Ya hay una operación en curso para este repositorio"
        );
        assert_eq!(
            MutationError::Remote(ErrorKind::Forbidden).user_message(),
            "Prohibido"
        );
    }

    #[test]
    fn api_error_body_decodes_message_field() {
        let body: ApiErrorBody =
            serde_json::from_str(r#"{"message": "Bad credentials", "documentation_url": "x"}"#)
                .expect("decode");
        assert_eq!(body.message.as_deref(), Some("Bad credentials"));

        let empty: ApiErrorBody = serde_json::from_str("{}").expect("decode");
        assert_eq!(empty.message, None);
    }
}
