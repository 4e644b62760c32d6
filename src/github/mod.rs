pub mod dto;
pub mod github_client;
mod handler;

pub use github_client::GithubClient;
