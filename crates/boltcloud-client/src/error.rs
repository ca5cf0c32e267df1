use std::borrow::Cow;
use std::fmt::Write;

use boltcloud::response::Response;

/// The message reported for any invalid pin or value.
pub const INVALID_INPUT: &str = "Input value is not valid or not allowed";

/// The prefix of the message of any error caught while building or sending
/// a request.
pub const ERROR_PREFIX: &str = "Some error occurred - ";

/// The message reported when the cloud answers with a non-successful
/// status code.
pub const REQUEST_NOT_OK: &str = "Request not successful. Network response was not ok.";

/// All possible error kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A pin or value does not belong to the set accepted by an operation.
    InvalidInput,
    /// An operation is not handled by the request builder it was given to.
    UnsupportedOperation,
    /// A request could not be sent, or its response could not be received.
    Request,
    /// The cloud answered with a non-successful status code.
    Status,
    /// A response body is not valid JSON.
    JsonResponse,
}

impl ErrorKind {
    pub(crate) const fn description(self) -> &'static str {
        match self {
            Self::InvalidInput => "Invalid Input",
            Self::UnsupportedOperation => "Unsupported Operation",
            Self::Request => "Request",
            Self::Status => "Status",
            Self::JsonResponse => "Json Response",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.description().fmt(f)
    }
}

/// A library error.
///
/// Its message is the text reported to callers inside a failed
/// [`Response`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,
    message: Cow<'static, str>,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for Error {}

impl Error {
    /// Creates an [`Error`] from an [`ErrorKind`] and a message.
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Returns the [`ErrorKind`].
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Converts an [`Error`] into a failed [`Response`].
    #[must_use]
    pub fn into_response(self) -> Response {
        Response::failure(self.message)
    }

    pub(crate) fn invalid_input() -> Self {
        Self::new(
            ErrorKind::InvalidInput,
            format!("{ERROR_PREFIX}{INVALID_INPUT}"),
        )
    }

    pub(crate) fn unsupported() -> Self {
        Self::new(ErrorKind::UnsupportedOperation, INVALID_INPUT)
    }

    pub(crate) fn status() -> Self {
        Self::new(ErrorKind::Status, REQUEST_NOT_OK)
    }

    pub(crate) fn request(error: reqwest::Error) -> Self {
        Self::new(ErrorKind::Request, caught_message(&error.without_url()))
    }

    pub(crate) fn json_response(error: reqwest::Error) -> Self {
        Self::new(ErrorKind::JsonResponse, caught_message(&error.without_url()))
    }
}

// Renders an error along with all its sources.
fn caught_message(error: &dyn std::error::Error) -> String {
    let mut message = format!("{ERROR_PREFIX}{error}");
    let mut source = error.source();
    while let Some(cause) = source {
        let _ = write!(message, ": {cause}");
        source = cause.source();
    }
    message
}

/// A specialized [`std::result::Result`] type.
pub type Result<T> = std::result::Result<T, Error>;
