use std::{any::Any, error::Error as StdError, path::PathBuf};

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tower_http::catch_panic::ResponseForPanic;

use crate::config::DevMode;

const GENERIC_MESSAGE: &str = "internal server error";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("failed to read template {}", path.display())]
    Template {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AppError {
    /// Message including the source chain, shown only with verbose errors.
    fn detail(&self) -> String {
        let mut detail = self.to_string();
        let mut source = StdError::source(self);
        while let Some(err) = source {
            detail.push_str(": ");
            detail.push_str(&err.to_string());
            source = err.source();
        }
        detail
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Full error message carried on a failed response for [`expose_error_detail`].
#[derive(Clone, Debug)]
pub struct ErrorDetail(pub String);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let detail = self.detail();
        tracing::error!(error = %detail, "request failed");

        let body = Json(ErrorBody {
            error: GENERIC_MESSAGE.to_string(),
        });
        let mut response = (StatusCode::INTERNAL_SERVER_ERROR, body).into_response();
        response.extensions_mut().insert(ErrorDetail(detail));
        response
    }
}

/// Swaps the generic error body for the detailed one when verbose errors are on.
pub async fn expose_error_detail(
    State(dev_mode): State<DevMode>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;
    if !dev_mode.verbose_errors {
        return response;
    }

    match response.extensions_mut().remove::<ErrorDetail>() {
        Some(ErrorDetail(detail)) => {
            (response.status(), Json(ErrorBody { error: detail })).into_response()
        }
        None => response,
    }
}

/// Builds the 500 response for a handler panic.
#[derive(Clone, Copy, Debug)]
pub struct PanicResponder {
    pub verbose: bool,
}

impl ResponseForPanic for PanicResponder {
    type ResponseBody = axum::body::Body;

    fn response_for_panic(
        &mut self,
        err: Box<dyn Any + Send + 'static>,
    ) -> axum::http::Response<Self::ResponseBody> {
        let message = if let Some(s) = err.downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = err.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic payload".to_string()
        };
        tracing::error!(panic = %message, "handler panicked");

        let error = if self.verbose {
            format!("handler panicked: {message}")
        } else {
            GENERIC_MESSAGE.to_string()
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorBody { error })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    fn missing_template() -> AppError {
        AppError::Template {
            path: PathBuf::from("templates/index.html"),
            source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        }
    }

    #[test]
    fn detail_includes_source_chain() {
        assert_eq!(
            missing_template().detail(),
            "failed to read template templates/index.html: No such file or directory"
        );
    }

    #[tokio::test]
    async fn response_is_generic_and_carries_detail() {
        let response = missing_template().into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let detail = response.extensions().get::<ErrorDetail>().unwrap();
        assert!(detail.0.contains("templates/index.html"));

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], GENERIC_MESSAGE);
    }

    #[tokio::test]
    async fn panic_responder_respects_verbosity() {
        let mut verbose = PanicResponder { verbose: true };
        let response = verbose.response_for_panic(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "handler panicked: boom");

        let mut quiet = PanicResponder { verbose: false };
        let response = quiet.response_for_panic(Box::new(String::from("boom")));
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], GENERIC_MESSAGE);
    }
}
