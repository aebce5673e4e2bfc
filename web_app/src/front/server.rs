//! Handlers not linked to a specific url

use crate::front::errors;
use ntex::web;

/// Return a [UrlNotFound](errors::ApiError::UrlNotFound) error for urls not defined
pub async fn serve_not_found() -> Result<web::HttpResponse, web::Error> {
    Err(errors::ApiError::UrlNotFound.into())
}
