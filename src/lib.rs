//! xpot - translatable message extraction for mixed-format codebases
//!
//! xpot scans Handlebars templates, HTML and JavaScript sources for
//! translation calls and collects the messages they reference into a single
//! deduplicated catalog, ready to be serialized into a message-catalog file
//! by the caller.
//!
//! ## Module Structure
//!
//! - `collector`: Merge store reconciling duplicate messages across files
//! - `config`: Extraction options (translation function names)
//! - `diagnostics`: Non-fatal diagnostics and the `Reporter` interface
//! - `extract`: Format-specific extractors (Handlebars, HTML, JavaScript)
//! - `message`: The extracted message record
//! - `parsers`: Source parsing (swc-based JavaScript parser wrapper)
//! - `pipeline`: Per-file dispatch and the parallel multi-file driver

pub mod collector;
pub mod config;
pub mod diagnostics;
pub mod extract;
pub mod message;
pub mod parsers;
pub mod pipeline;

pub use collector::Collector;
pub use config::ExtractOptions;
pub use diagnostics::{ConsoleReporter, Diagnostic, DiagnosticBuffer, Reporter, Severity};
pub use message::Message;
pub use pipeline::{SourceFile, SourceFormat, extract_file, extract_files};
