//! The uniform response envelope returned by every HTTP endpoint.
//!
//! Every body has the shape `{"code": i32, "message": String, "data": T}`.
//! The code-to-message table is static and shared by the whole process.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, ErrorKind};

/// Business status code carried in the response envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseCode(pub i32);

impl ResponseCode {
    /// The request succeeded.
    pub const SUCCESS: Self = Self(200);
    /// A request parameter was missing or invalid.
    pub const PARAM_ERROR: Self = Self(400);
    /// The caller is not authenticated.
    pub const UNAUTHORIZED: Self = Self(401);
    /// The caller lacks permission.
    pub const FORBIDDEN: Self = Self(403);
    /// The requested record does not exist.
    pub const NOT_FOUND: Self = Self(404);
    /// Unclassified server-side failure.
    pub const SYSTEM_ERROR: Self = Self(500);
    /// Inserting a row failed.
    pub const DB_INSERT_ERROR: Self = Self(5001);
    /// Updating a row failed.
    pub const DB_UPDATE_ERROR: Self = Self(5002);
    /// A cache read or write failed.
    pub const CACHE_ERROR: Self = Self(5003);

    /// The static message associated with this code.
    pub fn message(self) -> &'static str {
        match self {
            Self::SUCCESS => "Success",
            Self::PARAM_ERROR => "Invalid parameter",
            Self::UNAUTHORIZED => "Unauthorized",
            Self::FORBIDDEN => "Forbidden",
            Self::NOT_FOUND => "Record not found",
            Self::SYSTEM_ERROR => "System error",
            Self::DB_INSERT_ERROR => "Database insert failed",
            Self::DB_UPDATE_ERROR => "Database update failed",
            Self::CACHE_ERROR => "Cache error",
            _ => "",
        }
    }

    /// The code used to report an error of the given kind.
    pub fn for_kind(kind: ErrorKind) -> Option<Self> {
        match kind {
            ErrorKind::Validation => Some(Self::PARAM_ERROR),
            ErrorKind::Unauthorized => Some(Self::UNAUTHORIZED),
            ErrorKind::Forbidden => Some(Self::FORBIDDEN),
            ErrorKind::NotFound => Some(Self::NOT_FOUND),
            ErrorKind::Cache => Some(Self::CACHE_ERROR),
            ErrorKind::Database
            | ErrorKind::Serialization
            | ErrorKind::Configuration
            | ErrorKind::Internal => None,
        }
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Response envelope: status code, human-readable message, payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataResponse<T> {
    /// Business status code.
    pub code: ResponseCode,
    /// Message derived from `code`, optionally followed by a detail.
    pub message: String,
    /// Opaque payload; `null` on errors.
    pub data: Option<T>,
}

impl<T> DataResponse<T> {
    /// A successful response carrying `data`.
    pub fn ok(data: T) -> Self {
        Self::with_code(ResponseCode::SUCCESS, Some(data), None)
    }

    /// A response with an explicit code. A non-empty `detail` is appended to
    /// the code's message.
    pub fn with_code(code: ResponseCode, data: Option<T>, detail: Option<&str>) -> Self {
        let message = match detail.filter(|d| !d.is_empty()) {
            Some(detail) => format!("{}: {detail}", code.message()),
            None => code.message().to_string(),
        };
        Self {
            code,
            message,
            data,
        }
    }

    /// An error response carrying only the code and its message.
    pub fn error_code(code: ResponseCode) -> Self {
        Self::with_code(code, None, None)
    }

    /// An error response derived from an [`AppError`].
    ///
    /// Kinds with a dedicated code report the error's own message; everything
    /// else becomes [`ResponseCode::SYSTEM_ERROR`] with the error text appended.
    pub fn from_error(err: &AppError) -> Self {
        match ResponseCode::for_kind(err.kind) {
            Some(code) => Self {
                code,
                message: err.message.clone(),
                data: None,
            },
            None => Self::with_code(ResponseCode::SYSTEM_ERROR, None, Some(&err.message)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_envelope_json() {
        let resp = DataResponse::ok(vec![1, 2]);
        let json = serde_json::to_value(&resp).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({"code": 200, "message": "Success", "data": [1, 2]})
        );
    }

    #[test]
    fn test_detail_appended_to_message() {
        let resp: DataResponse<()> =
            DataResponse::with_code(ResponseCode::PARAM_ERROR, None, Some("page"));
        assert_eq!(resp.message, "Invalid parameter: page");
        assert_eq!(resp.data, None);
    }

    #[test]
    fn test_from_known_error_kind() {
        let err = AppError::validation("name is required");
        let resp: DataResponse<()> = DataResponse::from_error(&err);
        assert_eq!(resp.code, ResponseCode::PARAM_ERROR);
        assert_eq!(resp.message, "name is required");
    }

    #[test]
    fn test_from_unclassified_error() {
        let err = AppError::internal("boom");
        let resp: DataResponse<()> = DataResponse::from_error(&err);
        assert_eq!(resp.code, ResponseCode::SYSTEM_ERROR);
        assert_eq!(resp.message, "System error: boom");
    }

    #[test]
    fn test_unknown_code_has_empty_message() {
        assert_eq!(ResponseCode(7777).message(), "");
    }
}
