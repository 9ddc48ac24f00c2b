use std::{fmt::Display, sync::Arc};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shared handler result type.
pub type ApiResult<T> = Result<T, ApiError>;

/// Ad-hoc response shape with `data`, `message` and `status` keys.
///
/// `data` and `status` are omitted from the JSON when unset.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Envelope<T = ()> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl Envelope<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            data: None,
            message: message.into(),
            status: None,
        }
    }
}

impl<T> Envelope<T> {
    pub fn with_data(data: T, message: impl Into<String>) -> Self {
        Self {
            data: Some(data),
            message: message.into(),
            status: None,
        }
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = Some(status.as_u16());
        self
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

#[derive(Debug, Error, Clone)]
pub enum ApiError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("bad request: {0}")]
    InvalidInput(String),
    #[error("Error processing request: {0}")]
    Processing(String),
    #[error("internal server error")]
    Internal(Arc<anyhow::Error>),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::Processing(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Unauthorized => "UNAUTHORIZED",
            ApiError::InvalidInput(_) => "INVALID_INPUT",
            ApiError::Processing(_) => "PROCESSING",
            ApiError::Internal(_) => "INTERNAL",
        }
    }

    pub fn internal(err: anyhow::Error) -> Self {
        Self::Internal(Arc::new(err))
    }

    /// Wrap a failure raised while handling a request body; the detail is
    /// surfaced to the caller.
    pub fn processing(err: impl Display) -> Self {
        Self::Processing(err.to_string())
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(value: anyhow::Error) -> Self {
        Self::internal(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::Unauthorized => {
                let body = Envelope::message(self.to_string()).with_status(status);
                (status, body).into_response()
            }
            ApiError::Internal(err) => {
                tracing::error!(error = %err, code = self.code(), "request failed");
                (status, self.to_string()).into_response()
            }
            ApiError::InvalidInput(_) => {
                tracing::warn!(error = %self, code = self.code(), "request rejected");
                (status, self.to_string()).into_response()
            }
            ApiError::Processing(_) => {
                tracing::error!(error = %self, code = self.code(), "request failed");
                (status, self.to_string()).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use serde_json::{Value, json};

    async fn body_text(response: Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn envelope_omits_unset_keys() {
        let value = serde_json::to_value(Envelope::message("hi")).unwrap();
        assert_eq!(value, json!({"message": "hi"}));

        let value =
            serde_json::to_value(Envelope::with_data(vec![1, 2], "ok").with_status(StatusCode::OK))
                .unwrap();
        assert_eq!(value, json!({"data": [1, 2], "message": "ok", "status": 200}));
    }

    #[tokio::test]
    async fn internal_errors_are_masked() {
        let response = ApiError::internal(anyhow::anyhow!("boom")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(response).await, "internal server error");
    }

    #[tokio::test]
    async fn processing_errors_carry_detail() {
        let response = ApiError::processing("bad bytes").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_text(response).await,
            "Error processing request: bad bytes"
        );
    }

    #[tokio::test]
    async fn invalid_input_is_a_client_error() {
        let response = ApiError::InvalidInput("required request body is missing".into())
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_text(response).await,
            "bad request: required request body is missing"
        );
    }

    #[tokio::test]
    async fn unauthorized_renders_envelope() {
        let response = ApiError::Unauthorized.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body, json!({"message": "Unauthorized", "status": 401}));
    }
}
