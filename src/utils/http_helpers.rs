use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::error::RelayError;

/// A plain-text HTTP error that can be converted into a response.
pub struct HTTPError {
    status: StatusCode,
    message: String,
}

impl HTTPError {
    /// Creates a new HTTP error with the given status code and message.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        HTTPError {
            status,
            message: message.into(),
        }
    }
}

/// Handler failures surface as a 500 carrying `"<kind>: <message>"`.
impl From<RelayError> for HTTPError {
    fn from(err: RelayError) -> Self {
        HTTPError::new(StatusCode::INTERNAL_SERVER_ERROR, err.client_message())
    }
}

/// Converts our `HTTPError` into an HTTP response.
impl IntoResponse for HTTPError {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "text/plain")],
            self.message,
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn relay_errors_become_plain_text_500s() {
        let response =
            HTTPError::from(RelayError::InvalidMetricType("smudge".to_string())).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/plain"
        );
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"InvalidMetricType: Invalid metric type: smudge");
    }
}
