//! Merge store for extracted messages.
//!
//! Every extractor feeds candidate [`Message`] records into a `Collector`,
//! which keeps at most one record per dedup key and folds repeated
//! occurrences together: comments accumulate as de-duplicated lines,
//! locations accumulate as newline-joined `file:line` entries, and plural
//! forms are adopted when missing. Two *different* plural forms under one key
//! cannot both be kept; the first one wins and a
//! [`Diagnostic::PluralConflict`] is reported.

use std::collections::HashMap;

use crate::diagnostics::{Diagnostic, Reporter};
use crate::message::Message;

/// Collects extracted messages, merging duplicates by dedup key.
#[derive(Debug, Default)]
pub struct Collector {
    messages: HashMap<String, Message>,
}

impl Collector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a message into the store.
    ///
    /// Inserts verbatim when the key is new; otherwise applies the merge
    /// policy (comment, then location, then plural). Never replaces an
    /// existing record and never fails; plural conflicts are reported through
    /// `reporter` and resolved in favor of the existing record.
    pub fn add_message(&mut self, message: Message, reporter: &mut dyn Reporter) {
        let key = message.key();
        let Some(existing) = self.messages.get_mut(&key) else {
            self.messages.insert(key, message);
            return;
        };

        existing.comment = match (existing.comment.take(), &message.comment) {
            (Some(current), Some(incoming)) => Some(merge_comment_lines(&current, incoming)),
            (Some(current), None) => Some(current),
            (None, incoming) => incoming.clone(),
        };

        existing.location = match (existing.location.take(), &message.location) {
            (Some(current), Some(incoming)) => Some(format!("{}\n{}", current, incoming)),
            (Some(current), None) => Some(current),
            (None, incoming) => incoming.clone(),
        };

        if let Some(incoming) = &message.plural {
            match &existing.plural {
                Some(current) if current != incoming => {
                    reporter.report(Diagnostic::PluralConflict {
                        singular: message.singular.clone(),
                        existing: current.clone(),
                        incoming: incoming.clone(),
                    });
                }
                Some(_) => {}
                None => existing.plural = Some(incoming.clone()),
            }
        }
    }

    /// Replay every record of `other` through [`Collector::add_message`].
    ///
    /// Records are merged in sorted key order so diagnostics come out in the
    /// same order on every run.
    pub fn absorb(&mut self, other: Collector, reporter: &mut dyn Reporter) {
        let mut records: Vec<(String, Message)> = other.messages.into_iter().collect();
        records.sort_by(|(a, _), (b, _)| a.cmp(b));
        for (_, message) in records {
            self.add_message(message, reporter);
        }
    }

    pub fn messages(&self) -> &HashMap<String, Message> {
        &self.messages
    }

    pub fn into_messages(self) -> HashMap<String, Message> {
        self.messages
    }

    pub fn get(&self, key: &str) -> Option<&Message> {
        self.messages.get(key)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Concatenate two newline-separated comment blocks, dropping duplicate lines
/// while preserving first-seen order.
fn merge_comment_lines(existing: &str, incoming: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();
    for line in existing.split('\n').chain(incoming.split('\n')) {
        if !lines.contains(&line) {
            lines.push(line);
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::diagnostics::DiagnosticBuffer;

    #[test]
    fn test_insert_new_message_verbatim() {
        let mut collector = Collector::new();
        let mut reporter = DiagnosticBuffer::new();
        let message = Message::new("Hello")
            .with_comment("greeting")
            .with_location("a.hbs:1");
        collector.add_message(message.clone(), &mut reporter);

        assert_eq!(collector.len(), 1);
        assert_eq!(collector.get("Hello"), Some(&message));
        assert!(reporter.diagnostics().is_empty());
    }

    #[test]
    fn test_duplicate_locations_are_joined_in_order() {
        let mut collector = Collector::new();
        let mut reporter = DiagnosticBuffer::new();
        collector.add_message(Message::new("Hello").with_location("a.hbs:1"), &mut reporter);
        collector.add_message(Message::new("Hello").with_location("b.js:7"), &mut reporter);

        assert_eq!(collector.len(), 1);
        let merged = collector.get("Hello").unwrap();
        assert_eq!(merged.location.as_deref(), Some("a.hbs:1\nb.js:7"));
    }

    #[test]
    fn test_same_singular_different_context_stays_separate() {
        let mut collector = Collector::new();
        let mut reporter = DiagnosticBuffer::new();
        collector.add_message(Message::new("Open"), &mut reporter);
        collector.add_message(Message::new("Open").with_context("menu"), &mut reporter);

        assert_eq!(collector.len(), 2);
        assert!(collector.get("Open").is_some());
        assert!(collector.get("menu:Open").is_some());
    }

    #[test]
    fn test_comments_deduplicate_preserving_first_seen_order() {
        let mut collector = Collector::new();
        let mut reporter = DiagnosticBuffer::new();
        collector.add_message(Message::new("x").with_comment("one\ntwo"), &mut reporter);
        collector.add_message(Message::new("x").with_comment("two\nthree"), &mut reporter);

        let merged = collector.get("x").unwrap();
        assert_eq!(merged.comment.as_deref(), Some("one\ntwo\nthree"));
    }

    #[test]
    fn test_missing_comment_adopts_incoming() {
        let mut collector = Collector::new();
        let mut reporter = DiagnosticBuffer::new();
        collector.add_message(Message::new("x"), &mut reporter);
        collector.add_message(Message::new("x").with_comment("late note"), &mut reporter);

        assert_eq!(
            collector.get("x").unwrap().comment.as_deref(),
            Some("late note")
        );
    }

    #[test]
    fn test_missing_plural_adopts_incoming() {
        let mut collector = Collector::new();
        let mut reporter = DiagnosticBuffer::new();
        collector.add_message(Message::new("item"), &mut reporter);
        collector.add_message(Message::new("item").with_plural("items"), &mut reporter);

        assert_eq!(
            collector.get("item").unwrap().plural.as_deref(),
            Some("items")
        );
        assert!(reporter.diagnostics().is_empty());
    }

    #[test]
    fn test_conflicting_plural_keeps_existing_and_reports() {
        let mut collector = Collector::new();
        let mut reporter = DiagnosticBuffer::new();
        collector.add_message(Message::new("item").with_plural("ys"), &mut reporter);
        collector.add_message(Message::new("item").with_plural("xs"), &mut reporter);

        assert_eq!(collector.get("item").unwrap().plural.as_deref(), Some("ys"));
        assert_eq!(reporter.diagnostics().len(), 1);
        assert!(matches!(
            &reporter.diagnostics()[0],
            Diagnostic::PluralConflict { existing, incoming, .. }
                if existing == "ys" && incoming == "xs"
        ));
    }

    #[test]
    fn test_identical_plural_is_not_a_conflict() {
        let mut collector = Collector::new();
        let mut reporter = DiagnosticBuffer::new();
        collector.add_message(Message::new("item").with_plural("items"), &mut reporter);
        collector.add_message(Message::new("item").with_plural("items"), &mut reporter);

        assert!(reporter.diagnostics().is_empty());
    }

    #[test]
    fn test_absorb_merges_other_collector() {
        let mut reporter = DiagnosticBuffer::new();

        let mut first = Collector::new();
        first.add_message(Message::new("a").with_location("x.js:1"), &mut reporter);

        let mut second = Collector::new();
        second.add_message(Message::new("a").with_location("y.js:2"), &mut reporter);
        second.add_message(Message::new("b"), &mut reporter);

        first.absorb(second, &mut reporter);
        assert_eq!(first.len(), 2);
        assert_eq!(
            first.get("a").unwrap().location.as_deref(),
            Some("x.js:1\ny.js:2")
        );
    }
}
