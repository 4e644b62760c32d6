use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    #[serde(rename(deserialize = "html_url", serialize = "url"))]
    pub url: String,
    pub language: Option<String>,
    pub description: Option<String>,
}
