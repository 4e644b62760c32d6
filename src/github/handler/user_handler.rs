use crate::{
    github::{dto::Repository, github_client::GithubClient},
    http::Error,
};

pub struct UserHandler<'a> {
    client: &'a GithubClient,
    handle: String,
}

impl<'a> UserHandler<'a> {
    pub fn new(client: &'a GithubClient, handle: impl Into<String>) -> Self {
        UserHandler {
            client,
            handle: handle.into(),
        }
    }

    // first page only
    pub async fn repos(&self) -> Result<Vec<Repository>, Error> {
        let url = self.client.endpoint(&["users", &self.handle, "repos"])?;

        let repos: Vec<Repository> = self.client.get(url).await?;
        log::debug!("fetched {} repositories for {}", repos.len(), self.handle);

        Ok(repos)
    }
}
