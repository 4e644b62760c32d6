use reqwest::{
    header::{ACCEPT, USER_AGENT},
    Client, RequestBuilder, Response, StatusCode,
};
use serde::de::DeserializeOwned;
use std::ops::Deref;
use thiserror::Error;

pub const GITHUB_V3_JSON: &str = "application/vnd.github.v3+json";

#[derive(Clone, Debug, Default)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new() -> Self {
        HttpClient {
            client: Client::new(),
        }
    }
}

impl Deref for HttpClient {
    type Target = Client;

    fn deref(&self) -> &Self::Target {
        &self.client
    }
}

pub trait Headers {
    fn default_headers(self, user_agent: &str, token: Option<&str>) -> RequestBuilder;
}

impl Headers for RequestBuilder {
    fn default_headers(self, user_agent: &str, token: Option<&str>) -> RequestBuilder {
        let builder = self
            .header(ACCEPT, GITHUB_V3_JSON)
            .header(USER_AGENT, user_agent);

        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid path segment `{segment}`")]
    InvalidPathSegment { segment: String },
    #[error("Failed to send request")]
    SendRequestError {
        #[source]
        cause: reqwest::Error,
    },
    #[error("Upstream responded with {status}: {message}")]
    StatusError { status: StatusCode, message: String },
    #[error("Failed to read response text")]
    ReadResponseTextError {
        #[source]
        cause: reqwest::Error,
    },
    #[error("Failed to parse response")]
    ParseResponseError {
        #[source]
        cause: serde_json::Error,
    },
}

impl Error {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::StatusError { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub trait ResponseHandler {
    async fn handle<T: DeserializeOwned>(self) -> Result<T, Error>;
}

impl ResponseHandler for Result<Response, reqwest::Error> {
    async fn handle<T: DeserializeOwned>(self) -> Result<T, Error> {
        let response = self.map_err(|cause| Error::SendRequestError { cause })?;
        let status = response.status();

        let text = response
            .text()
            .await
            .map_err(|cause| Error::ReadResponseTextError { cause })?;

        if !status.is_success() {
            return Err(Error::StatusError {
                status,
                message: text,
            });
        }

        serde_json::from_str::<T>(&text).map_err(|cause| Error::ParseResponseError { cause })
    }
}
