use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::{Display, From};

use crate::contract::{MessageBody, ValidationErrorBody};
use crate::storage::StorageError;
use crate::validation::ValidationErrors;

/// Failures a handler can return. Only validation and not-found get a
/// dedicated body; everything else is a generic 500.
#[derive(Debug, Display, From)]
pub enum ApiError {
    #[display(fmt = "validation failed: {}", _0)]
    Validation(ValidationErrors),
    #[display(fmt = "{} not found", _0)]
    #[from(ignore)]
    NotFound(&'static str),
    #[display(fmt = "{}", _0)]
    Storage(StorageError),
}

impl std::error::Error for ApiError {}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut response = HttpResponse::build(self.status_code());
        match self {
            ApiError::Validation(errors) => response.json(ValidationErrorBody::from(errors)),
            ApiError::NotFound(_) => response.json(MessageBody {
                message: self.to_string(),
            }),
            ApiError::Storage(_) => response.json(MessageBody {
                message: "Internal Server Error".to_string(),
            }),
        }
    }
}
