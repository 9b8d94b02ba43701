//! End-to-end extraction tests driving the pipeline over all three formats.

use pretty_assertions::assert_eq;
use xpot::{
    Collector, Diagnostic, DiagnosticBuffer, ExtractOptions, Message, SourceFile, SourceFormat,
    extract_files,
};

fn run(files: Vec<SourceFile>) -> (Collector, Vec<Diagnostic>) {
    let options = ExtractOptions::new(["tr"]);
    let mut reporter = DiagnosticBuffer::new();
    let collector = extract_files(&files, &options, None, &mut reporter).unwrap();
    (collector, reporter.into_inner())
}

#[test]
fn test_merges_identical_singulars_across_formats() {
    let files = vec![
        SourceFile::new(
            "views/home.hbs",
            r#"<h1>{{tr "Welcome"}}</h1><p>{{tr "Welcome"}}</p>"#,
            SourceFormat::Handlebars,
        ),
        SourceFile::new("app/home.js", r#"alert(tr("Welcome"));"#, SourceFormat::JavaScript),
    ];
    let (collector, diagnostics) = run(files);

    assert_eq!(collector.len(), 1);
    let message = collector.get("Welcome").unwrap();
    assert_eq!(
        message.location.as_deref(),
        Some("views/home.hbs:1\nviews/home.hbs:2\napp/home.js:1")
    );
    assert!(diagnostics.is_empty());
}

#[test]
fn test_contexts_keep_identical_singulars_apart() {
    let files = vec![SourceFile::new(
        "app.js",
        r#"tr("Open"); tr("Open", { context: "menu" });"#,
        SourceFormat::JavaScript,
    )];
    let (collector, _) = run(files);

    assert_eq!(collector.len(), 2);
    assert!(collector.get("Open").is_some());
    assert!(collector.get("menu:Open").is_some());
}

#[test]
fn test_plural_conflicts_keep_first_seen_form() {
    let files = vec![
        SourceFile::new("a.js", r#"tr("result", "ys");"#, SourceFormat::JavaScript),
        SourceFile::new("b.js", r#"tr("result", "xs");"#, SourceFormat::JavaScript),
    ];
    let (collector, diagnostics) = run(files);

    assert_eq!(collector.get("result").unwrap().plural.as_deref(), Some("ys"));
    assert_eq!(
        diagnostics,
        vec![Diagnostic::PluralConflict {
            singular: "result".to_string(),
            existing: "ys".to_string(),
            incoming: "xs".to_string(),
        }]
    );
}

#[test]
fn test_comments_accumulate_without_duplicates() {
    let files = vec![
        SourceFile::new(
            "a.js",
            "var a;\n/// visible in the header\ntr(\"Files\");",
            SourceFormat::JavaScript,
        ),
        SourceFile::new(
            "b.hbs",
            r#"{{tr "Files" comment="visible in the header"}} {{tr "Files" comment="also on mobile"}}"#,
            SourceFormat::Handlebars,
        ),
    ];
    let (collector, _) = run(files);

    assert_eq!(
        collector.get("Files").unwrap().comment.as_deref(),
        Some("visible in the header\nalso on mobile")
    );
}

#[test]
fn test_extraction_is_idempotent_over_unchanged_input() {
    let files = vec![
        SourceFile::new(
            "views/list.hbs",
            r#"{{tr "One file" "%1 files" count}} {{tr "Save" comment="button"}}"#,
            SourceFormat::Handlebars,
        ),
        SourceFile::new(
            "static/index.html",
            "<html>\n<script>tr(\"One file\" \"%1 files\");</script>",
            SourceFormat::Html,
        ),
        SourceFile::new(
            "app/main.js",
            "var b;\n/// keep short\ntr(\"Save\", { context: \"toolbar\" });",
            SourceFormat::JavaScript,
        ),
    ];

    let options = ExtractOptions::new(["tr"]);
    let mut reporter = DiagnosticBuffer::new();
    let first = extract_files(&files, &options, None, &mut reporter).unwrap();
    let second = extract_files(&files, &options, None, &mut reporter).unwrap();

    let first: std::collections::HashMap<String, Message> = first.into_messages();
    assert_eq!(first, second.into_messages());
    assert_eq!(first.len(), 3);
    assert_eq!(
        first["One file"].location.as_deref(),
        Some("views/list.hbs:1\nstatic/index.html:2")
    );
    assert_eq!(first["toolbar:Save"].comment.as_deref(), Some("keep short"));
}

#[test]
fn test_html_and_template_records_merge_through_one_policy() {
    let files = vec![
        SourceFile::new(
            "page.hbs",
            r#"{{tr "One file" "%1 files"}}"#,
            SourceFormat::Handlebars,
        ),
        SourceFile::new(
            "page.html",
            "<html>\ntr('One file' '%1 items');",
            SourceFormat::Html,
        ),
    ];
    let (collector, diagnostics) = run(files);

    // The template's plural was seen first and wins; the HTML variant is
    // reported as a conflict instead of silently overwriting.
    assert_eq!(
        collector.get("One file").unwrap().plural.as_deref(),
        Some("%1 files")
    );
    assert_eq!(diagnostics.len(), 1);
}
