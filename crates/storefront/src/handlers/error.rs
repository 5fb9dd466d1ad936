use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use storefront_core::catalog::ProductError;
use storefront_core::orders::OrderError;
use storefront_core::storage::{
    order_error_to_status_code, product_error_to_status_code, repository_error_to_status_code,
    RepositoryError,
};

/// Handler error. Domain errors pick the status code, everything else is 500.
pub struct AppError(pub anyhow::Error);

impl AppError {
    fn status_code(&self) -> StatusCode {
        let code = if let Some(e) = self.0.downcast_ref::<RepositoryError>() {
            repository_error_to_status_code(e)
        } else if let Some(e) = self.0.downcast_ref::<ProductError>() {
            product_error_to_status_code(e)
        } else if let Some(e) = self.0.downcast_ref::<OrderError>() {
            order_error_to_status_code(e)
        } else {
            500
        };
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        if status_code.is_server_error() {
            tracing::error!(status = %status_code, error = %self.0, "Request failed");
        } else {
            tracing::warn!(status = %status_code, error = %self.0, "Request rejected");
        }

        (
            status_code,
            Json(serde_json::json!({ "detail": self.0.to_string() })),
        )
            .into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(err: impl Into<anyhow::Error>) -> StatusCode {
        AppError::from(err).status_code()
    }

    #[test]
    fn test_status_from_domain_errors() {
        assert_eq!(
            status(RepositoryError::not_found("Product", 1)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status(ProductError::NegativePrice(-1)),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status(OrderError::InvalidQuantity(0)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status(anyhow::anyhow!("boom")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
