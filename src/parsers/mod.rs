pub mod js;

pub use js::{ParsedJs, parse_js_source};
