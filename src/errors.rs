use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn internal<E: std::fmt::Display>(err: E) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(json!({ "error": message }));
        (status, body).into_response()
    }
}

/// Failure classes the pipeline surfaces to the customer with distinct
/// messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    QuotaExceeded,
    ResourceNotFound,
    Unclassified,
}

/// Best-effort classification by substring inspection of the provider's
/// error text. Neither provider exposes structured codes over this surface,
/// so texts overlapping more than one category may misclassify.
pub fn classify_failure(message: &str) -> FailureKind {
    let lower = message.to_lowercase();

    if lower.contains("429")
        || lower.contains("quota")
        || lower.contains("rate limit")
        || lower.contains("resource_exhausted")
    {
        return FailureKind::QuotaExceeded;
    }

    if lower.contains("404") || lower.contains("not found") || lower.contains("does not exist") {
        return FailureKind::ResourceNotFound;
    }

    FailureKind::Unclassified
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_quota_failures() {
        assert_eq!(
            classify_failure("Gemini generate error (429): quota exceeded for project"),
            FailureKind::QuotaExceeded
        );
        assert_eq!(
            classify_failure("RESOURCE_EXHAUSTED: out of tokens"),
            FailureKind::QuotaExceeded
        );
        assert_eq!(
            classify_failure("upstream rate limit hit"),
            FailureKind::QuotaExceeded
        );
    }

    #[test]
    fn classifies_missing_resources() {
        assert_eq!(
            classify_failure("Gemini generate error (404): models/gemini-x was not found"),
            FailureKind::ResourceNotFound
        );
        assert_eq!(
            classify_failure("function match_products does not exist"),
            FailureKind::ResourceNotFound
        );
    }

    #[test]
    fn everything_else_is_unclassified() {
        assert_eq!(
            classify_failure("connection reset by peer"),
            FailureKind::Unclassified
        );
        assert_eq!(classify_failure(""), FailureKind::Unclassified);
    }

    #[test]
    fn quota_wins_over_not_found_on_overlap() {
        // "quota for model not found" mentions both; the quota check runs first.
        assert_eq!(
            classify_failure("quota for model not found"),
            FailureKind::QuotaExceeded
        );
    }
}
