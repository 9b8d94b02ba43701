//! Handlebars template extractor.
//!
//! Finds `{{tr ...}}` helper invocations for every configured helper name,
//! tokenizes the argument text with a character-level state machine, and
//! feeds the resulting messages into the collector.
//!
//! The tokenizer is deliberately lenient: it is a recognizer for helper
//! argument lists, not a Handlebars parser. Unterminated tokens at the end of
//! the input are pushed as-is.

use anyhow::Result;
use regex::Regex;

use crate::collector::Collector;
use crate::config::ExtractOptions;
use crate::diagnostics::{Diagnostic, Reporter};
use crate::message::Message;

/// A token in a helper invocation's argument text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Identifier(String),
    Number(String),
    Str { value: String, quote: char },
    /// A `key=value` argument. The value is a nested bare token.
    Hash { key: String, value: HashValue },
}

/// The nested value of a hash token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HashValue {
    Identifier(String),
    Number(String),
    Str { value: String, quote: char },
}

impl HashValue {
    fn text(&self) -> &str {
        match self {
            HashValue::Identifier(value)
            | HashValue::Number(value)
            | HashValue::Str { value, .. } => value,
        }
    }
}

/// Token under construction.
enum State {
    Identifier(String),
    Number(String),
    Str { value: String, quote: char },
    Hash { key: String, value: Option<HashValue> },
}

impl State {
    /// Close the token at end of input, whether or not it was properly
    /// terminated. A hash whose value never started closes with an empty
    /// identifier value.
    fn finish(self) -> Token {
        match self {
            State::Identifier(value) => Token::Identifier(value),
            State::Number(value) => Token::Number(value),
            State::Str { value, quote } => Token::Str { value, quote },
            State::Hash { key, value } => Token::Hash {
                key,
                value: value.unwrap_or(HashValue::Identifier(String::new())),
            },
        }
    }
}

/// Tokenize the raw argument text of a helper invocation.
///
/// Single pass, no backtracking. Inside quoted values a backslash always
/// yields the next character literally (`\x` becomes `x`), and a quote closes
/// only on the exact character that opened it.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut state: Option<State> = None;
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        state = match state.take() {
            None => match c {
                '"' | '\'' => Some(State::Str {
                    value: String::new(),
                    quote: c,
                }),
                _ if c.is_ascii_digit() => Some(State::Number(c.to_string())),
                _ if c.is_whitespace() => None,
                _ => Some(State::Identifier(c.to_string())),
            },
            Some(State::Identifier(mut value)) => {
                if c == '=' {
                    // Reclassify: the accumulated text becomes a hash key.
                    Some(State::Hash {
                        key: value,
                        value: None,
                    })
                } else if c.is_whitespace() {
                    tokens.push(Token::Identifier(value));
                    None
                } else {
                    value.push(c);
                    Some(State::Identifier(value))
                }
            }
            Some(State::Number(mut value)) => {
                if c.is_whitespace() {
                    tokens.push(Token::Number(value));
                    None
                } else {
                    value.push(c);
                    Some(State::Number(value))
                }
            }
            Some(State::Str { mut value, quote }) => {
                if c == quote {
                    tokens.push(Token::Str { value, quote });
                    None
                } else {
                    push_string_char(&mut value, c, &mut chars);
                    Some(State::Str { value, quote })
                }
            }
            Some(State::Hash { key, value: None }) => {
                // The first non-space character only selects the sub-value
                // type; it is not part of the value.
                let value = match c {
                    '"' | '\'' => Some(HashValue::Str {
                        value: String::new(),
                        quote: c,
                    }),
                    _ if c.is_ascii_digit() => Some(HashValue::Number(String::new())),
                    _ if c.is_whitespace() => None,
                    _ => Some(HashValue::Identifier(String::new())),
                };
                Some(State::Hash { key, value })
            }
            Some(State::Hash {
                key,
                value: Some(HashValue::Str { mut value, quote }),
            }) => {
                if c == quote {
                    tokens.push(Token::Hash {
                        key,
                        value: HashValue::Str { value, quote },
                    });
                    None
                } else {
                    push_string_char(&mut value, c, &mut chars);
                    Some(State::Hash {
                        key,
                        value: Some(HashValue::Str { value, quote }),
                    })
                }
            }
            Some(State::Hash {
                key,
                value: Some(mut sub),
            }) => {
                if c.is_whitespace() {
                    tokens.push(Token::Hash { key, value: sub });
                    None
                } else {
                    match &mut sub {
                        HashValue::Identifier(value) | HashValue::Number(value) => value.push(c),
                        HashValue::Str { .. } => unreachable!("handled above"),
                    }
                    Some(State::Hash {
                        key,
                        value: Some(sub),
                    })
                }
            }
        };
    }

    if let Some(state) = state {
        tokens.push(state.finish());
    }

    tokens
}

/// Append one character of a quoted value. A backslash escapes the next
/// character, which is taken literally; a trailing backslash at end of input
/// consumes nothing.
fn push_string_char(value: &mut String, c: char, chars: &mut std::str::Chars<'_>) {
    if c == '\\' {
        if let Some(escaped) = chars.next() {
            value.push(escaped);
        }
    } else {
        value.push(c);
    }
}

/// Extract messages from Handlebars template source.
///
/// Matches are numbered sequentially from 1 per helper name; the ordinal is
/// used as the `location` suffix. This is an occurrence ordinal, not a source
/// line number, and is a fixed output convention.
pub fn extract(
    file: &str,
    contents: &str,
    options: &ExtractOptions,
    collector: &mut Collector,
    reporter: &mut dyn Reporter,
) -> Result<()> {
    // Collapse the first newline so a helper broken right after the opening
    // line still matches.
    let contents = contents.replacen('\n', " ", 1);

    for name in options.function_names() {
        let pattern = Regex::new(&format!(r"\{{\{{\s*{}\s+(.*?)\}}\}}", name))?;

        let mut ordinal = 0;
        for caps in pattern.captures_iter(&contents) {
            ordinal += 1;
            let location = format!("{}:{}", file, ordinal);

            let tokens = tokenize(&caps[1]);
            // The first positional argument must be a literal singular text.
            let Some(Token::Str { value: singular, .. }) = tokens.first() else {
                continue;
            };
            if singular.is_empty() {
                reporter.report(Diagnostic::EmptySingular { location });
                continue;
            }

            let mut message = Message::new(singular.clone()).with_location(location);

            if let Some(Token::Str { value: plural, .. }) = tokens.get(1) {
                message = message.with_plural(plural.clone());
            }

            for token in &tokens {
                if let Token::Hash { key, value } = token {
                    match key.as_str() {
                        "comment" => message = message.with_comment(value.text()),
                        "context" => {
                            if let HashValue::Str { value, .. } = value {
                                message = message.with_context(value.clone());
                            }
                        }
                        _ => {}
                    }
                }
            }

            collector.add_message(message, reporter);
        }
    }

    Ok(())
}
