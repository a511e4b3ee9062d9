//! Error types of the query layer.
//!
//! Two families, deliberately kept apart:
//! - configuration errors ([`CriteriaError`]): a criteria referenced a
//!   field or relation the entity does not have, or paired a filter with
//!   the wrong scalar kind. These fail at predicate-compile time with a
//!   field-identifying message and are never converted into an empty
//!   result, since that would mask the mistake as "no matches".
//! - storage errors (`DbErr`): propagated unchanged inside
//!   [`QueryError`]; this layer performs no retries and no recovery.
//!
//! [`ApiError`] is the HTTP boundary representation: sanitized messages go
//! to the client, internal details are logged through `tracing`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::DbErr;
use serde::Serialize;
use std::fmt;

use crate::criteria::schema::FieldKind;

/// A criteria that cannot be compiled against an entity's field table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CriteriaError {
    /// The criteria named a field the entity does not expose.
    UnknownField {
        entity: &'static str,
        field: String,
    },
    /// The filter's scalar kind does not match the field's descriptor.
    KindMismatch {
        entity: &'static str,
        field: String,
        expected: FieldKind,
        actual: FieldKind,
    },
    /// Sorting was requested on a field that is not a plain column.
    UnsortableField {
        entity: &'static str,
        field: String,
    },
}

impl fmt::Display for CriteriaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownField { entity, field } => {
                write!(f, "{entity} has no filterable field '{field}'")
            }
            Self::KindMismatch {
                entity,
                field,
                expected,
                actual,
            } => write!(
                f,
                "field '{field}' of {entity} is {expected}, got a {actual} filter"
            ),
            Self::UnsortableField { entity, field } => {
                write!(f, "field '{field}' of {entity} cannot be used for sorting")
            }
        }
    }
}

impl std::error::Error for CriteriaError {}

/// Failure of a criteria query operation.
#[derive(Debug)]
pub enum QueryError {
    /// The criteria itself was invalid; nothing was sent to the database.
    Criteria(CriteriaError),
    /// The storage layer failed; passed through unchanged.
    Database(DbErr),
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Criteria(err) => write!(f, "{err}"),
            Self::Database(err) => write!(f, "database error: {err}"),
        }
    }
}

impl std::error::Error for QueryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Criteria(err) => Some(err),
            Self::Database(err) => Some(err),
        }
    }
}

impl From<CriteriaError> for QueryError {
    fn from(err: CriteriaError) -> Self {
        Self::Criteria(err)
    }
}

impl From<DbErr> for QueryError {
    fn from(err: DbErr) -> Self {
        Self::Database(err)
    }
}

/// HTTP-facing error with sanitized responses.
///
/// Database details are logged server-side and never sent to clients.
#[derive(Debug)]
pub enum ApiError {
    /// 404 Not Found.
    NotFound {
        resource: String,
        id: Option<String>,
    },
    /// 400 Bad Request, e.g. a malformed criteria.
    BadRequest { message: String },
    /// 500 Internal Server Error from the storage layer (details logged).
    Database { message: String, internal: DbErr },
    /// 500 Internal Server Error, generic (details logged).
    Internal {
        message: String,
        internal: Option<String>,
    },
}

impl ApiError {
    pub fn not_found(resource: impl Into<String>, id: Option<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
            id,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    pub fn database(err: DbErr) -> Self {
        Self::Database {
            message: "A database error occurred".to_string(),
            internal: err,
        }
    }

    pub fn internal(message: impl Into<String>, internal: Option<String>) -> Self {
        Self::Internal {
            message: message.into(),
            internal,
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Database { .. } | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn user_message(&self) -> String {
        match self {
            Self::NotFound { resource, id } => match id {
                Some(id) => format!("{resource} with ID '{id}' not found"),
                None => format!("{resource} not found"),
            },
            Self::BadRequest { message }
            | Self::Database { message, .. }
            | Self::Internal { message, .. } => message.clone(),
        }
    }

    fn log_internal(&self) {
        match self {
            Self::Database { internal, .. } => {
                tracing::error!(error = ?internal, "database error");
            }
            Self::Internal {
                internal: Some(details),
                ..
            } => {
                tracing::error!(details = %details, "internal error");
            }
            _ => {
                tracing::debug!(
                    error = %self.user_message(),
                    status = %self.status_code(),
                    "API error"
                );
            }
        }
    }
}

/// Sanitized response body.
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log_internal();
        let status = self.status_code();
        let body = ErrorResponse {
            error: self.user_message(),
        };
        (status, Json(body)).into_response()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

impl std::error::Error for ApiError {}

impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        match &err {
            DbErr::RecordNotFound(msg) => {
                let resource = msg.split_whitespace().next().unwrap_or("Resource");
                Self::NotFound {
                    resource: resource.to_string(),
                    id: None,
                }
            }
            _ => Self::database(err),
        }
    }
}

impl From<QueryError> for ApiError {
    fn from(err: QueryError) -> Self {
        match err {
            // Criteria come from client query parameters, so a bad
            // criteria is the caller's mistake.
            QueryError::Criteria(err) => Self::bad_request(err.to_string()),
            QueryError::Database(err) => Self::database(err),
        }
    }
}
