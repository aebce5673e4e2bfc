use derive_more::{Display, Error};
use ntex::{http, web};

/// Errors returned by the JSON endpoints.
///
/// The LINE webhook never returns one of these: it always acknowledges.
#[derive(Debug, Display, Error)]
pub enum ApiError {
    UrlNotFound,
    Unauthorized,
    InvalidInput(#[error(not(source))] String),
    ExternalServiceError(#[error(not(source))] String),
}

impl ApiError {
    fn get_error_message(&self) -> String {
        match self {
            ApiError::UrlNotFound => "resource not found".to_string(),
            ApiError::Unauthorized => "missing or invalid internal secret".to_string(),
            ApiError::InvalidInput(msg) => format!("invalid input: {msg}"),
            ApiError::ExternalServiceError(msg) => format!("external service error: {msg}"),
        }
    }
}

impl web::error::WebResponseError for ApiError {
    fn error_response(&self, _: &web::HttpRequest) -> web::HttpResponse {
        let detail = self.get_error_message();
        logfire::warn!("[ApiError] {detail}", detail = detail.clone());

        web::HttpResponse::build(self.status_code()).json(&serde_json::json!({
            "status": "error",
            "detail": detail,
        }))
    }

    fn status_code(&self) -> http::StatusCode {
        match *self {
            ApiError::UrlNotFound => http::StatusCode::NOT_FOUND,
            ApiError::Unauthorized => http::StatusCode::UNAUTHORIZED,
            ApiError::InvalidInput(_) => http::StatusCode::BAD_REQUEST,
            ApiError::ExternalServiceError(_) => http::StatusCode::BAD_GATEWAY,
        }
    }
}
