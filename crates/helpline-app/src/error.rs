use salvo::http::StatusCode;
use salvo::prelude::Json;
use serde::Serialize;
use thiserror::Error;

use helpline_core::error::CoreError;
use helpline_db::error::DbError;
use helpline_service::error::ServiceError;

/// Application-level errors (HTTP layer)
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    ServiceError(#[from] ServiceError),

    #[error(transparent)]
    DatabaseError(#[from] DbError),

    #[error(transparent)]
    CoreError(#[from] CoreError),

    #[error("Bad request on `{field}`: {message}")]
    BadRequest {
        field: &'static str,
        message: String,
    },
}

pub type AppResult<T> = std::result::Result<T, AppError>;

/// JSON error body. `field` is present for validation failures only.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<&'static str>,
}

const fn db_status(err: &DbError) -> StatusCode {
    match err {
        DbError::PoolError(_) => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl AppError {
    /// Returns the HTTP status code for this error.
    ///
    /// - Validation: 400 Bad Request
    /// - Not authenticated: 401 Unauthorized
    /// - Authorization: 403 Forbidden
    /// - Not found: 404 Not Found
    /// - Conflict: 409 Conflict
    /// - Pool exhaustion: 503 Service Unavailable
    /// - Everything else: 500 Internal Server Error
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. }
            | Self::CoreError(CoreError::ValidationError { .. })
            | Self::ServiceError(
                ServiceError::ValidationError { .. }
                | ServiceError::CoreError(CoreError::ValidationError { .. }),
            ) => StatusCode::BAD_REQUEST,
            Self::ServiceError(ServiceError::NotAuthenticated) => StatusCode::UNAUTHORIZED,
            Self::ServiceError(ServiceError::AuthorizationError(_)) => StatusCode::FORBIDDEN,
            Self::ServiceError(ServiceError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::ServiceError(ServiceError::Conflict(_)) => StatusCode::CONFLICT,
            Self::ServiceError(ServiceError::DatabaseError(err)) | Self::DatabaseError(err) => {
                db_status(err)
            }
            Self::ServiceError(_) | Self::CoreError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Builds the response body. Server-side failures get a generic message
    /// so storage details never leak.
    #[must_use]
    pub fn body(&self) -> ErrorBody {
        let status = self.status_code();
        if status.is_server_error() {
            return ErrorBody {
                error: status
                    .canonical_reason()
                    .unwrap_or("Internal Server Error")
                    .to_string(),
                field: None,
            };
        }

        let (error, field) = match self {
            Self::BadRequest { field, message } => (message.clone(), Some(*field)),
            Self::ServiceError(ServiceError::ValidationError { field, message })
            | Self::ServiceError(ServiceError::CoreError(CoreError::ValidationError {
                field,
                message,
            }))
            | Self::CoreError(CoreError::ValidationError { field, message }) => {
                (message.clone(), Some(*field))
            }
            Self::ServiceError(ServiceError::NotAuthenticated) => {
                ("Not authenticated".to_string(), None)
            }
            Self::ServiceError(ServiceError::AuthorizationError(_)) => {
                ("Access denied".to_string(), None)
            }
            Self::ServiceError(ServiceError::NotFound(what)) => (format!("{what} not found"), None),
            Self::ServiceError(ServiceError::Conflict(reason)) => (reason.clone(), None),
            other => (other.to_string(), None),
        };

        ErrorBody { error, field }
    }

    /// ## Summary
    /// Writes status and JSON body into `res`.
    pub fn render_into(&self, res: &mut salvo::Response) {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = ?self, %status, "Request failed");
        } else {
            tracing::debug!(error = %self, %status, "Request rejected");
        }

        res.status_code(status);
        res.render(Json(self.body()));
    }
}

#[salvo::async_trait]
impl salvo::Writer for AppError {
    async fn write(
        self,
        _req: &mut salvo::Request,
        _depot: &mut salvo::Depot,
        res: &mut salvo::Response,
    ) {
        self.render_into(res);
    }
}
