//! Format-specific message extractors.
//!
//! Each extractor is invoked per file and feeds candidate records into a
//! [`Collector`](crate::collector::Collector); the extractors do not depend
//! on each other.

pub mod handlebars;
pub mod html;
pub mod javascript;
