//! Accessors the aggregator needs from a clinical document.
//!
//! The document object model is owned by the host. Anything that can report a
//! section code and, optionally, the serialized narrative table can be fed to
//! the aggregator.

use std::borrow::Cow;

/// One structured-body section of a clinical document.
pub trait SectionSource {
    /// Value of `section/code/@code`, if present.
    fn code(&self) -> Option<&str>;

    /// Serialized `section/text/table` fragment, if present.
    fn table_markup(&self) -> Option<Cow<'_, str>>;
}

/// A clinical document exposing its top-level sections in document order.
pub trait DocumentSource {
    type Section: SectionSource;

    fn sections(&self) -> &[Self::Section];
}

impl<S: SectionSource> DocumentSource for [S] {
    type Section = S;

    fn sections(&self) -> &[S] {
        self
    }
}

impl<S: SectionSource> DocumentSource for Vec<S> {
    type Section = S;

    fn sections(&self) -> &[S] {
        self.as_slice()
    }
}

/// Owned section with already-serialized table markup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    pub code: Option<String>,
    pub title: Option<String>,
    pub table_markup: Option<String>,
}

impl Section {
    pub fn new(code: impl Into<String>, table_markup: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            title: None,
            table_markup: Some(table_markup.into()),
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

impl SectionSource for Section {
    fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    fn table_markup(&self) -> Option<Cow<'_, str>> {
        self.table_markup.as_deref().map(Cow::Borrowed)
    }
}
