use anyhow::{Result, anyhow};
use swc_common::{FileName, SourceMap};
use swc_ecma_ast::Program;
use swc_ecma_parser::{EsSyntax, Parser, StringInput, Syntax};

pub struct ParsedJs {
    pub program: Program,
    pub source_map: SourceMap,
}

/// Parse JavaScript source code into an AST.
///
/// Accepts both scripts and modules. A parse failure is fatal for the file:
/// the extractor has no partial-file recovery, so the error propagates and
/// aborts the run.
pub fn parse_js_source(code: &str, file_path: &str) -> Result<ParsedJs> {
    let source_map = SourceMap::default();
    let source_file =
        source_map.new_source_file(FileName::Real(file_path.into()).into(), code.to_string());

    let syntax = Syntax::Es(EsSyntax::default());
    let mut parser = Parser::new(syntax, StringInput::from(&*source_file), None);
    let program = parser
        .parse_program()
        .map_err(|e| anyhow!("Failed to parse {}: {:?}", file_path, e))?;
    Ok(ParsedJs {
        program,
        source_map,
    })
}
