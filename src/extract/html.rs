//! HTML extractor.
//!
//! Regex-based scanner for call-like patterns whose arguments are one or more
//! adjacent quoted literals, e.g. `tr("Hello " "world")` inside inline
//! scripts or attributes. This is a lightweight recognizer, not an HTML
//! parser: anything that does not look like `name("literal" ...)` is ignored.
//!
//! The file is scanned line by line in two passes per function name, first
//! for single-quoted literals and then for double-quoted ones. The line
//! counter starts at 1 and is incremented before each line is scanned, so the
//! first reported line is 2; together with the collapsed leading newline this
//! is a fixed output convention shared with the other extractors' catalogs.

use anyhow::Result;
use regex::Regex;

use crate::collector::Collector;
use crate::config::ExtractOptions;
use crate::diagnostics::{Diagnostic, Reporter};
use crate::message::Message;

/// Caller-supplied transform applied to every unescaped literal before it is
/// stored. An extension point for normalization (entity decoding, whitespace
/// folding, ...).
pub type ProcessMessage<'a> = &'a (dyn Fn(&str) -> String + Sync);

/// Extract messages from HTML source.
///
/// Within one call the first literal becomes the singular text and every
/// later literal overwrites the plural (last one wins). Across calls and
/// quote passes, records merge through the shared collector like every other
/// extractor, so repeated singulars accumulate locations and conflicting
/// plurals surface as diagnostics.
pub fn extract(
    file: &str,
    contents: &str,
    options: &ExtractOptions,
    process_message: Option<ProcessMessage<'_>>,
    collector: &mut Collector,
    reporter: &mut dyn Reporter,
) -> Result<()> {
    // Collapse the first newline so a call broken right after the opening
    // line still matches.
    let contents = contents.replacen('\n', " ", 1);

    for name in options.function_names() {
        for quote in ['\'', '"'] {
            extract_quoted(
                file,
                &contents,
                name,
                quote,
                process_message,
                collector,
                reporter,
            )?;
        }
    }

    Ok(())
}

/// One pass over the content for a single function name and quote style.
fn extract_quoted(
    file: &str,
    contents: &str,
    name: &str,
    quote: char,
    process_message: Option<ProcessMessage<'_>>,
    collector: &mut Collector,
    reporter: &mut dyn Reporter,
) -> Result<()> {
    // `name( "lit" "lit" ... )`: adjacent quoted literals with escape-aware
    // bodies and nothing but whitespace between them.
    let call = Regex::new(&format!(
        r"{name}\(((?:{quote}(?:[^{quote}\\]|\\.)+{quote}\s*)+)\)"
    ))?;
    let literal = Regex::new(&format!(r"{quote}((?:[^{quote}\\]|\\.)+){quote}"))?;
    let escaped_quote = format!("\\{}", quote);

    let mut line_number = 1;
    for line in contents.split('\n') {
        line_number += 1;

        for caps in call.captures_iter(line) {
            let mut message: Option<Message> = None;

            for lit in literal.captures_iter(&caps[1]) {
                let raw = lit[1].replace(&escaped_quote, &quote.to_string());
                let text = match process_message {
                    Some(process) => process(&raw),
                    None => raw,
                };

                match &mut message {
                    None => {
                        message = Some(
                            Message::new(text).with_location(format!("{}:{}", file, line_number)),
                        );
                    }
                    Some(message) => {
                        message.plural = (!text.is_empty()).then_some(text);
                    }
                }
            }

            if let Some(message) = message {
                if message.singular.is_empty() {
                    reporter.report(Diagnostic::EmptySingular {
                        location: format!("{}:{}", file, line_number),
                    });
                } else {
                    collector.add_message(message, reporter);
                }
            }
        }
    }

    Ok(())
}
