//! JavaScript extractor.
//!
//! Parses the whole file with swc and walks the AST looking for calls to the
//! configured translation functions. Callee names are resolved through
//! non-computed member chains (`i18n.tr`), singular/plural arguments are
//! flattened through `+` concatenations, an optional options object supplies
//! `comment` and `context`, and a block of `///` lines directly above the
//! call is attached as a translator comment.
//!
//! A recognized call is consumed as a leaf: its own arguments are not
//! searched for further translation calls. Everything else is traversed
//! generically, so calls nested in arrays, conditionals, handlers or any
//! other construct are still found.

use std::collections::HashMap;

use anyhow::Result;
use swc_common::SourceMap;
use swc_ecma_ast::{BinaryOp, CallExpr, Callee, Expr, Lit, MemberProp, Prop, PropName, PropOrSpread};
use swc_ecma_visit::{Visit, VisitWith};

use crate::collector::Collector;
use crate::config::ExtractOptions;
use crate::diagnostics::{Diagnostic, Reporter};
use crate::message::Message;
use crate::parsers::js::parse_js_source;

/// Extract messages from JavaScript source.
///
/// A parse failure is fatal and propagates; everything else degrades to
/// diagnostics.
pub fn extract(
    file: &str,
    contents: &str,
    options: &ExtractOptions,
    collector: &mut Collector,
    reporter: &mut dyn Reporter,
) -> Result<()> {
    let parsed = parse_js_source(contents, file)?;

    // Trimmed line table for the `///` comment lookback.
    let lines: Vec<&str> = contents.split('\n').map(str::trim).collect();

    let mut visitor = CallSiteCollector {
        file,
        source_map: &parsed.source_map,
        function_names: options.function_names(),
        lines: &lines,
        collector,
        reporter,
    };
    parsed.program.visit_with(&mut visitor);

    Ok(())
}

/// Visitor that matches call expressions against the configured function
/// names and feeds extracted messages into the collector.
struct CallSiteCollector<'a> {
    file: &'a str,
    source_map: &'a SourceMap,
    function_names: &'a [String],
    /// Trimmed source lines, 0-indexed.
    lines: &'a [&'a str],
    collector: &'a mut Collector,
    reporter: &'a mut dyn Reporter,
}

impl Visit for CallSiteCollector<'_> {
    fn visit_call_expr(&mut self, node: &CallExpr) {
        if let Callee::Expr(callee) = &node.callee
            && let Some(name) = self.flatten_identifier(callee)
            && self.function_names.iter().any(|f| f == &name)
        {
            // The call site is consumed as a leaf match.
            self.parse_invocation(node);
            return;
        }
        node.visit_children_with(self);
    }
}

impl CallSiteCollector<'_> {
    /// Resolve a callee expression to a dotted name.
    ///
    /// Identifiers resolve to their name; non-computed member chains whose
    /// innermost object is an identifier resolve to `object.property`
    /// recursively. Anything else is unresolved (with a diagnostic) and the
    /// call is not treated as a match.
    fn flatten_identifier(&mut self, expr: &Expr) -> Option<String> {
        match unwrap_paren(expr) {
            Expr::Ident(ident) => Some(ident.sym.to_string()),
            Expr::Member(member) => {
                if let MemberProp::Ident(prop) = &member.prop {
                    match unwrap_paren(&member.obj) {
                        Expr::Ident(object) => {
                            return Some(format!("{}.{}", object.sym, prop.sym));
                        }
                        object @ Expr::Member(_) => {
                            return self
                                .flatten_identifier(object)
                                .map(|flattened| format!("{}.{}", flattened, prop.sym));
                        }
                        _ => {}
                    }
                }
                self.report_unhandled("identifier");
                None
            }
            _ => {
                self.report_unhandled("identifier");
                None
            }
        }
    }

    /// Flatten an expression to literal text: a string literal yields its
    /// value, a `+` concatenation flattens both operands. Any other shape
    /// degrades to empty text with a diagnostic.
    fn flatten_string(&mut self, expr: &Expr) -> String {
        match unwrap_paren(expr) {
            Expr::Lit(Lit::Str(s)) => match s.value.as_str() {
                Some(value) => value.to_string(),
                None => {
                    self.report_unhandled("string");
                    String::new()
                }
            },
            Expr::Bin(bin) if bin.op == BinaryOp::Add => {
                let left = self.flatten_string(&bin.left);
                let right = self.flatten_string(&bin.right);
                format!("{}{}", left, right)
            }
            _ => {
                self.report_unhandled("string");
                String::new()
            }
        }
    }

    /// Parse an options object literal into a key/value map.
    ///
    /// Keys come from identifier names or string literals; values must
    /// flatten to non-empty text. Unrecognized keys are kept in the map but
    /// only `comment` and `context` are read back.
    fn parse_options(&mut self, expr: &Expr) -> HashMap<String, String> {
        let mut options = HashMap::new();
        if let Expr::Object(object) = unwrap_paren(expr) {
            for prop in &object.props {
                let PropOrSpread::Prop(prop) = prop else {
                    continue;
                };
                let Prop::KeyValue(kv) = &**prop else {
                    continue;
                };
                let key = match &kv.key {
                    PropName::Ident(ident) => ident.sym.to_string(),
                    PropName::Str(s) => s.value.as_str().unwrap_or_default().to_string(),
                    _ => String::new(),
                };
                let value = self.flatten_string(&kv.value);
                if !key.is_empty() && !value.is_empty() {
                    options.insert(key, value);
                }
            }
        }
        options
    }

    fn parse_invocation(&mut self, call: &CallExpr) {
        let line = self.source_map.lookup_char_pos(call.span.lo).line;
        let location = format!("{}:{}", self.file, line);

        if call.args.is_empty() {
            self.reporter.report(Diagnostic::MissingArguments { location });
            return;
        }

        let singular = self.flatten_string(&call.args[0].expr);

        let mut plural = String::new();
        let mut options = HashMap::new();
        if let Some(second) = call.args.get(1) {
            if matches!(unwrap_paren(&second.expr), Expr::Object(_)) {
                options = self.parse_options(&second.expr);
            } else {
                plural = self.flatten_string(&second.expr);
                if let Some(third) = call.args.get(2) {
                    options = self.parse_options(&third.expr);
                }
            }
        }

        if singular.is_empty() {
            self.reporter.report(Diagnostic::EmptySingular { location });
            return;
        }

        let mut comment = options.get("comment").cloned().unwrap_or_default();

        // Walk upward from the line above the call while lines start with
        // `///`, prepending each so the final comment keeps original order.
        // Lines are 0-indexed; the call line is 1-based.
        let mut line_index = line as isize - 2;
        while line_index > 0 {
            let Some(stripped) = self.lines[line_index as usize].strip_prefix("///") else {
                break;
            };
            comment = if comment.is_empty() {
                stripped.trim().to_string()
            } else {
                format!("{}\n{}", stripped.trim(), comment)
            };
            line_index -= 1;
        }

        let message = Message::new(singular)
            .with_plural(plural)
            .with_context(options.get("context").cloned().unwrap_or_default())
            .with_comment(comment)
            .with_location(location);

        self.collector.add_message(message, self.reporter);
    }

    fn report_unhandled(&mut self, kind: &'static str) {
        self.reporter.report(Diagnostic::UnhandledExpression {
            file: self.file.to_string(),
            kind,
        });
    }
}

/// Parentheses are grouping only; resolution and flattening match through
/// them.
fn unwrap_paren(expr: &Expr) -> &Expr {
    match expr {
        Expr::Paren(paren) => unwrap_paren(&paren.expr),
        _ => expr,
    }
}
