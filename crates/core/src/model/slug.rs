use std::fmt;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SlugError {
    #[error("slug must not be empty")]
    Empty,

    #[error("slug must be kebab-case [a-z0-9-], got: {0}")]
    NotKebabCase(String),
}

/// URL-stable lesson identifier in kebab-case (`web3-foundations`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Slug(String);

impl Slug {
    /// Validate an existing slug.
    ///
    /// Accepts `^[a-z0-9]+(-[a-z0-9]+)*$`; lookup is case-sensitive so no
    /// normalisation happens here.
    ///
    /// # Errors
    ///
    /// Returns `SlugError::Empty` or `SlugError::NotKebabCase`.
    pub fn parse(raw: impl Into<String>) -> Result<Self, SlugError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(SlugError::Empty);
        }
        let well_formed = raw.split('-').all(|part| {
            !part.is_empty()
                && part
                    .bytes()
                    .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
        });
        if !well_formed {
            return Err(SlugError::NotKebabCase(raw));
        }
        Ok(Self(raw))
    }

    /// Derive a slug from a lesson title.
    ///
    /// Lowercases, collapses every run of characters outside `[a-z0-9]` into a
    /// single `-` and trims dashes at both ends.
    ///
    /// # Errors
    ///
    /// Returns `SlugError::Empty` when the title has no usable characters.
    pub fn from_title(title: &str) -> Result<Self, SlugError> {
        let mut slug = String::with_capacity(title.len());
        let mut pending_dash = false;
        for ch in title.chars().flat_map(char::to_lowercase) {
            if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
                if pending_dash && !slug.is_empty() {
                    slug.push('-');
                }
                pending_dash = false;
                slug.push(ch);
            } else {
                pending_dash = true;
            }
        }
        Self::parse(slug)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
