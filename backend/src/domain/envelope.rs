//! Uniform success/failure wrapper returned by every service operation.
//!
//! Serialises as `{success, message, responseObject, statusCode}`. The status
//! classification is a closed set so adapters never invent codes.

use serde::{Deserialize, Serialize};

use super::{Error, ErrorCode};

/// Outcome classification carried by a [`ServiceResponse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
pub enum ResponseStatus {
    /// Read succeeded.
    Ok,
    /// Records were created.
    Created,
    /// Caller-fixable input problem.
    BadRequest,
    /// Lookup miss.
    NotFound,
    /// Unclassified failure.
    InternalError,
}

impl ResponseStatus {
    /// Numeric HTTP-compatible status code.
    #[must_use]
    pub const fn code(self) -> u16 {
        match self {
            Self::Ok => 200,
            Self::Created => 201,
            Self::BadRequest => 400,
            Self::NotFound => 404,
            Self::InternalError => 500,
        }
    }
}

impl From<ResponseStatus> for u16 {
    fn from(status: ResponseStatus) -> Self {
        status.code()
    }
}

/// Raised when deserialising a status code outside the closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unsupported status code: {0}")]
pub struct UnsupportedStatusCode(pub u16);

impl TryFrom<u16> for ResponseStatus {
    type Error = UnsupportedStatusCode;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        match code {
            200 => Ok(Self::Ok),
            201 => Ok(Self::Created),
            400 => Ok(Self::BadRequest),
            404 => Ok(Self::NotFound),
            500 => Ok(Self::InternalError),
            other => Err(UnsupportedStatusCode(other)),
        }
    }
}

impl From<ErrorCode> for ResponseStatus {
    fn from(code: ErrorCode) -> Self {
        match code {
            // Uniqueness collisions come from the uploaded data, so the
            // caller can fix them.
            ErrorCode::InvalidRequest | ErrorCode::Conflict => Self::BadRequest,
            ErrorCode::NotFound => Self::NotFound,
            ErrorCode::InternalError => Self::InternalError,
        }
    }
}

/// Response envelope.
///
/// # Examples
/// ```
/// use backoffice::domain::{ResponseStatus, ServiceResponse};
///
/// let response = ServiceResponse::success("done", 3_u32, ResponseStatus::Created);
/// assert!(response.is_success());
/// assert_eq!(response.status().code(), 201);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceResponse<T> {
    success: bool,
    message: String,
    response_object: Option<T>,
    #[serde(rename = "statusCode")]
    status: ResponseStatus,
}

impl<T> ServiceResponse<T> {
    /// Successful outcome with a payload.
    pub fn success(message: impl Into<String>, payload: T, status: ResponseStatus) -> Self {
        Self {
            success: true,
            message: message.into(),
            response_object: Some(payload),
            status,
        }
    }

    /// Failed outcome with an optional payload.
    pub fn failure(message: impl Into<String>, payload: Option<T>, status: ResponseStatus) -> Self {
        Self {
            success: false,
            message: message.into(),
            response_object: payload,
            status,
        }
    }

    /// Failed outcome derived from a domain error.
    pub fn from_error(error: &Error, payload: Option<T>) -> Self {
        Self::failure(error.message(), payload, error.code().into())
    }

    /// Whether the operation succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Caller-facing message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Payload, when present.
    #[must_use]
    pub fn response_object(&self) -> Option<&T> {
        self.response_object.as_ref()
    }

    /// Consume the envelope and return its payload.
    #[must_use]
    pub fn into_response_object(self) -> Option<T> {
        self.response_object
    }

    /// Status classification.
    #[must_use]
    pub fn status(&self) -> ResponseStatus {
        self.status
    }
}
