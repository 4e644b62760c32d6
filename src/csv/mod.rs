use crate::github::dto::Repository;
use itertools::Itertools;
use std::{borrow::Cow, iter};

const NEEDS_QUOTING: &[char] = &['"', ',', '\n', '\r'];
const MISSING_VALUE: &str = "-";

/// Only the raw content is inspected, so escaping an escaped field wraps it
/// again.
pub fn escape(field: &str) -> Cow<'_, str> {
    if field.contains(NEEDS_QUOTING) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Name,
    Language,
    Username,
    Description,
    Link,
}

impl Column {
    pub fn label(self) -> &'static str {
        match self {
            Column::Name => "Name",
            Column::Language => "Language",
            Column::Username => "Username",
            Column::Description => "Description",
            Column::Link => "Link",
        }
    }

    fn value<'a>(self, repo: &'a Repository, handle: &'a str) -> &'a str {
        match self {
            Column::Name => &repo.name,
            Column::Language => or_missing(repo.language.as_deref()),
            Column::Username => handle,
            Column::Description => or_missing(repo.description.as_deref()),
            Column::Link => &repo.url,
        }
    }
}

fn or_missing(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or(MISSING_VALUE)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfiguration {
    pub subject_handle: String,
    pub include_language: bool,
    pub include_description: bool,
    pub include_user: bool,
    pub include_link: bool,
    pub wants_raw_csv: bool,
}

impl ExportConfiguration {
    pub fn new(subject_handle: impl Into<String>) -> Self {
        ExportConfiguration {
            subject_handle: subject_handle.into(),
            include_language: true,
            include_description: true,
            include_user: false,
            include_link: false,
            wants_raw_csv: true,
        }
    }

    pub fn columns(&self) -> Vec<Column> {
        let optional = [
            (self.include_language, Column::Language),
            (self.include_user, Column::Username),
            (self.include_description, Column::Description),
            (self.include_link, Column::Link),
        ];

        iter::once(Column::Name)
            .chain(
                optional
                    .into_iter()
                    .filter_map(|(enabled, column)| enabled.then_some(column)),
            )
            .collect()
    }
}

// no trailing newline
pub fn render(repos: &[Repository], config: &ExportConfiguration) -> String {
    let columns = config.columns();

    let header = columns.iter().map(|column| escape(column.label())).join(",");

    let rows = repos.iter().map(|repo| {
        columns
            .iter()
            .map(|column| escape(column.value(repo, &config.subject_handle)))
            .join(",")
    });

    iter::once(header).chain(rows).join("\n")
}
