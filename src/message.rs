//! The extracted message record.
//!
//! One `Message` describes a single translatable text: its singular form (the
//! extraction key), an optional plural form, an optional disambiguating
//! context, translator comments, and every `file:line` location it was seen
//! at. Records are produced by the extractors and merged by the
//! [`Collector`](crate::collector::Collector).

use serde::{Deserialize, Serialize};

/// A single translatable message.
///
/// The optional fields use `None` for "not supplied"; constructors normalize
/// empty strings to `None` so call sites that pass through empty defaults
/// behave identically to call sites that omit the field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// The singular text. Required, non-empty; part of the dedup key.
    pub singular: String,

    /// Plural form, when the call site supplies one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plural: Option<String>,

    /// Disambiguating context. When present, the dedup key becomes
    /// `context:singular`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    /// Translator-facing notes. Repeated occurrences contribute
    /// newline-separated, de-duplicated lines.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    /// Newline-joined `file:line` occurrences.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// The eventual translated value. Always empty at extraction time; kept
    /// so serialized records already have the catalog entry shape.
    #[serde(default)]
    pub message: String,
}

impl Message {
    pub fn new(singular: impl Into<String>) -> Self {
        Self {
            singular: singular.into(),
            plural: None,
            context: None,
            comment: None,
            location: None,
            message: String::new(),
        }
    }

    /// The key under which this message is deduplicated:
    /// `context:singular` when a context is present, bare `singular` otherwise.
    pub fn key(&self) -> String {
        match &self.context {
            Some(context) => format!("{}:{}", context, self.singular),
            None => self.singular.clone(),
        }
    }

    pub fn with_plural(mut self, plural: impl Into<String>) -> Self {
        self.plural = non_empty(plural.into());
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = non_empty(context.into());
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = non_empty(comment.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = non_empty(location.into());
        self
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}
