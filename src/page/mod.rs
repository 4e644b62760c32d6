mod template;

use crate::github::dto::Repository;
use handlebars::{Handlebars, RenderError, TemplateError};
use serde::Serialize;
use template::{handlebars, REPOS_PAGE_TEMPLATE};

const MISSING_LANGUAGE: &str = "–";

#[derive(Serialize)]
struct ReposPage<'a> {
    user: &'a str,
    repos: Vec<RepoRow<'a>>,
}

#[derive(Serialize)]
struct RepoRow<'a> {
    name: &'a str,
    url: &'a str,
    language: &'a str,
}

impl<'a> From<&'a Repository> for RepoRow<'a> {
    fn from(repo: &'a Repository) -> Self {
        RepoRow {
            name: &repo.name,
            url: &repo.url,
            language: repo
                .language
                .as_deref()
                .filter(|l| !l.is_empty())
                .unwrap_or(MISSING_LANGUAGE),
        }
    }
}

pub struct PageRenderer {
    hb: Handlebars<'static>,
}

impl PageRenderer {
    pub fn new() -> Result<PageRenderer, TemplateError> {
        Ok(PageRenderer { hb: handlebars()? })
    }

    pub fn repos(&self, user: &str, repos: &[Repository]) -> Result<String, RenderError> {
        let page = ReposPage {
            user,
            repos: repos.iter().map(RepoRow::from).collect(),
        };

        self.hb.render(REPOS_PAGE_TEMPLATE, &page)
    }
}
