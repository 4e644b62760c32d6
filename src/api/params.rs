use crate::{csv::ExportConfiguration, error::AppError};

/// Only the exact strings `true` and `false` are accepted, absent or empty
/// values fall back to the parameter's default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    True,
    False,
}

impl Flag {
    pub fn parse(
        name: &'static str,
        value: Option<&str>,
        default: Flag,
    ) -> Result<Flag, AppError> {
        match value {
            None | Some("") => Ok(default),
            Some("true") => Ok(Flag::True),
            Some("false") => Ok(Flag::False),
            Some(other) => Err(AppError::InvalidParameter {
                name,
                value: other.to_owned(),
            }),
        }
    }
}

impl From<bool> for Flag {
    fn from(value: bool) -> Self {
        if value {
            Flag::True
        } else {
            Flag::False
        }
    }
}

impl From<Flag> for bool {
    fn from(flag: Flag) -> Self {
        flag == Flag::True
    }
}

#[derive(Debug, Default)]
pub struct ExportQuery {
    pub user: Option<String>,
    pub raw: Option<String>,
    pub description: Option<String>,
    pub language: Option<String>,
    pub show_user: Option<String>,
    pub link: Option<String>,
}

impl ExportQuery {
    /// Repeated keys keep their first value.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut query = ExportQuery::default();

        for (key, value) in pairs {
            let slot = match key.as_str() {
                "user" => &mut query.user,
                "raw" => &mut query.raw,
                "description" => &mut query.description,
                "language" => &mut query.language,
                "show_user" => &mut query.show_user,
                "link" => &mut query.link,
                _ => continue,
            };

            slot.get_or_insert(value);
        }

        query
    }

    pub fn resolve(&self, default_user: &str) -> Result<ExportConfiguration, AppError> {
        let subject_handle = self
            .user
            .as_deref()
            .filter(|user| !user.is_empty())
            .unwrap_or(default_user);

        // `.` and `..` cannot be placed in the upstream path as a handle
        if matches!(subject_handle, "." | "..") {
            return Err(AppError::InvalidHandle(subject_handle.to_owned()));
        }

        let defaults = ExportConfiguration::new(subject_handle);

        Ok(ExportConfiguration {
            include_language: flag("language", &self.language, defaults.include_language)?,
            include_description: flag(
                "description",
                &self.description,
                defaults.include_description,
            )?,
            include_user: flag("show_user", &self.show_user, defaults.include_user)?,
            include_link: flag("link", &self.link, defaults.include_link)?,
            wants_raw_csv: flag("raw", &self.raw, defaults.wants_raw_csv)?,
            ..defaults
        })
    }
}

fn flag(name: &'static str, value: &Option<String>, default: bool) -> Result<bool, AppError> {
    Flag::parse(name, value.as_deref(), Flag::from(default)).map(bool::from)
}
