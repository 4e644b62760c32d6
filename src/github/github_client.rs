use crate::{
    config::GithubConfig,
    http::{Error, Headers, HttpClient, ResponseHandler},
};
use anyhow::{bail, Context, Result};
use reqwest::Url;
use serde::de::DeserializeOwned;

#[derive(Clone, Debug)]
pub struct GithubClient {
    http: HttpClient,
    api_url: Url,
    token: Option<String>,
    user_agent: String,
}

impl GithubClient {
    pub fn new(config: &GithubConfig) -> Result<GithubClient> {
        let api_url = Url::parse(&config.api_url)
            .with_context(|| format!("Invalid github api url: {}", config.api_url))?;

        if api_url.cannot_be_a_base() {
            bail!("github api url cannot be used as a base: {}", api_url);
        }

        Ok(GithubClient {
            http: HttpClient::new(),
            api_url,
            token: config.token.clone(),
            user_agent: config.user_agent.clone(),
        })
    }

    pub(super) fn endpoint(&self, segments: &[&str]) -> Result<Url, Error> {
        // `.` and `..` would be dropped by the url parser, even percent-encoded
        if let Some(segment) = segments.iter().find(|s| matches!(**s, "." | "..")) {
            return Err(Error::InvalidPathSegment {
                segment: segment.to_string(),
            });
        }

        let mut url = self.api_url.clone();

        // never fails, checked in `new`
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }

        Ok(url)
    }

    pub(super) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        log::debug!("GET {}", url);

        let result = self
            .http
            .get(url.clone())
            .default_headers(&self.user_agent, self.token.as_deref())
            .send()
            .await
            .handle()
            .await;

        if let Err(err) = &result {
            log::warn!("GET {} failed: {}", url, err);
        }

        result
    }
}
