//! Per-file dispatch and the multi-file extraction driver.
//!
//! The harness resolves file lists and reads file contents; this module takes
//! the resulting `(path, contents, format)` triples, runs the matching
//! extractor for each, and merges everything into one collector.
//!
//! Files are independent, so the driver extracts them in parallel with rayon.
//! Each worker fills a private collector and diagnostic buffer; the results
//! are then merged sequentially in input order, which keeps the merged
//! catalog and the diagnostic stream identical from run to run.

use anyhow::Result;
use rayon::prelude::*;

use crate::collector::Collector;
use crate::config::ExtractOptions;
use crate::diagnostics::{Diagnostic, DiagnosticBuffer, Reporter};
use crate::extract::html::ProcessMessage;
use crate::extract::{handlebars, html, javascript};

/// Source format of an input file, deciding which extractor runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Handlebars,
    Html,
    JavaScript,
}

/// One input file: its path (used in `location` entries) and its contents.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: String,
    pub contents: String,
    pub format: SourceFormat,
}

impl SourceFile {
    pub fn new(path: impl Into<String>, contents: impl Into<String>, format: SourceFormat) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
            format,
        }
    }
}

/// Run the extractor matching the file's format.
pub fn extract_file(
    file: &SourceFile,
    options: &ExtractOptions,
    process_message: Option<ProcessMessage<'_>>,
    collector: &mut Collector,
    reporter: &mut dyn Reporter,
) -> Result<()> {
    match file.format {
        SourceFormat::Handlebars => {
            handlebars::extract(&file.path, &file.contents, options, collector, reporter)
        }
        SourceFormat::Html => html::extract(
            &file.path,
            &file.contents,
            options,
            process_message,
            collector,
            reporter,
        ),
        SourceFormat::JavaScript => {
            javascript::extract(&file.path, &file.contents, options, collector, reporter)
        }
    }
}

/// Extract all files into a single merged collector.
///
/// Files are processed in parallel; merges are serialized in input order. A
/// parse failure in any file aborts the run.
pub fn extract_files(
    files: &[SourceFile],
    options: &ExtractOptions,
    process_message: Option<ProcessMessage<'_>>,
    reporter: &mut dyn Reporter,
) -> Result<Collector> {
    let results: Vec<Result<(Collector, Vec<Diagnostic>)>> = files
        .par_iter()
        .map(|file| {
            let mut collector = Collector::new();
            let mut buffer = DiagnosticBuffer::new();
            extract_file(file, options, process_message, &mut collector, &mut buffer)?;
            Ok((collector, buffer.into_inner()))
        })
        .collect();

    let mut merged = Collector::new();
    for result in results {
        let (collector, diagnostics) = result?;
        for diagnostic in diagnostics {
            reporter.report(diagnostic);
        }
        merged.absorb(collector, reporter);
    }
    Ok(merged)
}
