//! Parser collaborator: source text in, arena-owned `Program` out.

use oxc_allocator::Allocator;
use oxc_ast::ast::Program;
use oxc_parser::Parser;
use oxc_span::SourceType;

use crate::error::{ConvertError, Result};

/// Module source with JSX and TypeScript syntax enabled.
pub fn source_type() -> SourceType {
    SourceType::default()
        .with_module(true)
        .with_typescript(true)
        .with_jsx(true)
}

/// Parse `source`. Any diagnostic aborts the run before a pass touches the tree.
pub fn parse_module<'a>(
    allocator: &'a Allocator,
    source: &'a str,
    file_name: &str,
) -> Result<Program<'a>> {
    let ret = Parser::new(allocator, source, source_type()).parse();

    if ret.panicked || !ret.errors.is_empty() {
        let mut message = ret
            .errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        if message.is_empty() {
            message = "parser aborted".to_string();
        }
        return Err(ConvertError::Parse {
            file: file_name.to_string(),
            message,
        });
    }

    Ok(ret.program)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_jsx_with_types() {
        let allocator = Allocator::default();
        let source = "const n: number = 1; export default function App() { return <div className=\"a\">{n}</div>; }";
        let program = parse_module(&allocator, source, "App.tsx").unwrap();
        assert_eq!(program.body.len(), 2);
    }

    #[test]
    fn test_invalid_syntax_is_parse_error() {
        let allocator = Allocator::default();
        let err = parse_module(&allocator, "const = ;", "Broken.jsx").unwrap_err();
        match err {
            ConvertError::Parse { file, message } => {
                assert_eq!(file, "Broken.jsx");
                assert!(!message.is_empty());
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }
}
