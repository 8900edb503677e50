use derive_more::{AsRef, Display};

#[derive(AsRef, Debug, Display, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Name(String);

impl Name {
    pub fn new(name: &str) -> Result<Self, NameError> {
        let trimmed_name = name.trim();

        if trimmed_name.is_empty() {
            return Err(NameError::Empty);
        }

        let len = trimmed_name.len();

        if len > 64 {
            return Err(NameError::TooLong(len));
        }

        Ok(Name(trimmed_name.to_string()))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum NameError {
    #[error("Name must not be empty")]
    Empty,
    #[error("Name must be 64 characters or fewer ({0} > 64)")]
    TooLong(usize),
}

/// Canonical key derived from free text.
///
/// Construction is total and idempotent: the text is lowercased, any
/// run of non-alphanumeric characters is collapsed to a single `_` and
/// leading and trailing `_` are stripped. An input without
/// alphanumeric characters yields an empty slug.
#[derive(AsRef, Debug, Default, Display, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Slug(String);

impl Slug {
    #[must_use]
    pub fn new(text: &str) -> Self {
        let mut slug = String::with_capacity(text.len());
        for c in text.chars() {
            if c.is_ascii_alphanumeric() {
                slug.push(c.to_ascii_lowercase());
            } else if !slug.is_empty() && !slug.ends_with('_') {
                slug.push('_');
            }
        }
        if slug.ends_with('_') {
            slug.pop();
        }
        Self(slug)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
