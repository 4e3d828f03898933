use crate::catalog::LookupError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;

#[derive(Serialize, Debug)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl ToString) -> Self {
        Self {
            error: error.to_string(),
        }
    }
}

/// Everything `advise` can fail with. The display text is what clients see.
#[derive(Debug, thiserror::Error)]
pub enum AdvisoryError {
    #[error("Plastic data not loaded")]
    CatalogUnavailable,

    #[error("AI model not loaded")]
    ModelUnavailable,

    #[error("invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error("Product not found in database")]
    ProductNotFound,

    #[error("{0}")]
    Internal(String),
}

impl From<LookupError> for AdvisoryError {
    fn from(err: LookupError) -> Self {
        match err {
            LookupError::Unavailable(_) => AdvisoryError::CatalogUnavailable,
            LookupError::NotFound(_) => AdvisoryError::ProductNotFound,
        }
    }
}

impl ResponseError for AdvisoryError {
    fn status_code(&self) -> StatusCode {
        match self {
            AdvisoryError::InvalidQuantity(_) | AdvisoryError::ProductNotFound => {
                StatusCode::BAD_REQUEST
            }
            AdvisoryError::CatalogUnavailable
            | AdvisoryError::ModelUnavailable
            | AdvisoryError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("advisory failed: {self}");
        }
        HttpResponse::build(status).json(ErrorBody::new(self))
    }
}
