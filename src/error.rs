use crate::http;
use axum::{
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Error fetching repos")]
    Upstream { status: StatusCode },

    #[error("Invalid value `{value}` for parameter `{name}`, expected `true` or `false`")]
    InvalidParameter { name: &'static str, value: String },

    #[error("Invalid value `{0}` for parameter `user`")]
    InvalidHandle(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Upstream { status } => *status,
            AppError::InvalidParameter { .. }
            | AppError::InvalidHandle(_)
            | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<http::Error> for AppError {
    fn from(err: http::Error) -> Self {
        match err.status() {
            Some(status) => AppError::Upstream { status },
            None => AppError::Internal(err.into()),
        }
    }
}

impl From<handlebars::RenderError> for AppError {
    fn from(err: handlebars::RenderError) -> Self {
        AppError::Internal(err.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            AppError::Internal(cause) => log::error!("{}: {:#}", self, cause),
            _ => log::warn!("{}", self),
        }

        (status, [(CONTENT_TYPE, "text/plain")], self.to_string()).into_response()
    }
}
