use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Recipe not found")]
    NotFound,

    #[error("Internal Server Error")]
    Internal(#[source] anyhow::Error),

    /// Like `Internal`, but the failure text is echoed back as `details`.
    #[error("Internal Server Error")]
    Detailed(#[source] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        match self {
            ApiError::NotFound => (StatusCode::NOT_FOUND, Json(json!({ "error": message }))),
            ApiError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": message })),
            ),
            ApiError::Detailed(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": message, "details": format!("{e:#}") })),
            ),
        }
        .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(err: ApiError) -> (StatusCode, serde_json::Value) {
        let res = err.into_response();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn internal_error_hides_cause() {
        let (status, body) = body_json(ApiError::Internal(anyhow::anyhow!("pool timed out"))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Internal Server Error" }));
    }

    #[tokio::test]
    async fn detailed_error_carries_cause_chain() {
        let err = anyhow::anyhow!("relation \"recipes\" does not exist").context("search recipes");
        let (status, body) = body_json(ApiError::Detailed(err)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal Server Error");
        assert_eq!(
            body["details"],
            "search recipes: relation \"recipes\" does not exist"
        );
    }

    #[tokio::test]
    async fn not_found_is_404() {
        let (status, body) = body_json(ApiError::NotFound).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Recipe not found");
    }
}
