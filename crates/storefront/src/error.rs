//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type for handlers. Failed catalog fetches
//! are logged once where they happen, so responding with
//! `CatalogUnavailable` only logs at debug level and never reports to Sentry.

use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Seconds a client should wait before asking again while the catalog loads.
const RETRY_AFTER_SECS: &str = "2";

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The product catalog has not finished loading.
    #[error("Catalog unavailable")]
    CatalogUnavailable {
        /// Message of the failed fetch, if loading is stuck.
        last_error: Option<String>,
    },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Self::CatalogUnavailable {
            last_error: Some(cause),
        } = &self
        {
            tracing::debug!(error = %cause, "Catalog still unavailable");
        }

        let message = self.to_string();
        match self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, message).into_response(),
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, message).into_response(),
            // Don't expose upstream error details to clients
            Self::CatalogUnavailable { last_error } => {
                let message = if last_error.is_some() {
                    "Products could not be loaded"
                } else {
                    "Products are still loading"
                };
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    [(header::RETRY_AFTER, RETRY_AFTER_SECS)],
                    message,
                )
                    .into_response()
            }
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added to cart", Some(&[("product_id", "3")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("product abc".to_string());
        assert_eq!(err.to_string(), "Not found: product abc");

        let err = AppError::BadRequest("unknown category: shoes".to_string());
        assert_eq!(err.to_string(), "Bad request: unknown category: shoes");
    }

    #[test]
    fn test_app_error_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            let response = err.into_response();
            response.status()
        }

        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::CatalogUnavailable { last_error: None }),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_catalog_unavailable_sets_retry_after() {
        let response = AppError::CatalogUnavailable {
            last_error: Some("connection refused".to_string()),
        }
        .into_response();
        assert_eq!(
            response.headers().get(header::RETRY_AFTER).map(|v| v.as_bytes()),
            Some(RETRY_AFTER_SECS.as_bytes())
        );
    }

    #[test]
    fn test_catalog_unavailable_is_not_reported_to_sentry() {
        let events = sentry::test::with_captured_events(|| {
            for _ in 0..3 {
                let response = AppError::CatalogUnavailable {
                    last_error: Some("connection refused".to_string()),
                }
                .into_response();
                assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
            }
        });
        assert!(events.is_empty());
    }
}
