use std::marker::PhantomData;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TextError {
    #[error("text must not be empty")]
    Empty,
}

/// Non-blank display text, tagged with the field it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text<T>(String, PhantomData<T>);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Title;
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary;
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prompt;

pub type TitleText = Text<Title>;
pub type SummaryText = Text<Summary>;
pub type PromptText = Text<Prompt>;

impl<T> Text<T> {
    /// # Errors
    ///
    /// Returns `TextError::Empty` when the input is blank.
    pub fn parse(s: impl Into<String>) -> Result<Self, TextError> {
        let s = s.into();
        if s.trim().is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(s, PhantomData))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
