pub mod user_handler;

use super::github_client::GithubClient;
use user_handler::UserHandler;

/// Github user handler access implementation
impl GithubClient {
    pub fn user(&self, handle: impl Into<String>) -> UserHandler<'_> {
        UserHandler::new(self, handle)
    }
}
