//! Fixed boilerplate is written as source text and parsed into the target arena.
//!
//! Spans of template nodes are reset to `SPAN` so the printer never confuses them
//! with positions (and attached comments) of the converted file.

use oxc_allocator::{Allocator, Vec as ArenaVec};
use oxc_ast::ast::Statement;
use oxc_ast_visit::VisitMut;
use oxc_parser::Parser;
use oxc_span::{Span, SPAN};

use crate::error::{ConvertError, Result};
use crate::parse::source_type;

struct SpanEraser;

impl<'a> VisitMut<'a> for SpanEraser {
    fn visit_span(&mut self, span: &mut Span) {
        *span = SPAN;
    }
}

pub fn parse_statements<'a>(allocator: &'a Allocator, text: &str) -> Result<ArenaVec<'a, Statement<'a>>> {
    let text: &'a str = allocator.alloc_str(text);
    let ret = Parser::new(allocator, text, source_type()).parse();
    if ret.panicked || !ret.errors.is_empty() {
        let message = ret
            .errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        return Err(ConvertError::Config(format!(
            "boilerplate `{}` does not parse: {}",
            text.lines().next().unwrap_or_default(),
            message
        )));
    }

    let mut program = ret.program;
    SpanEraser.visit_program(&mut program);
    Ok(program.body)
}

/// Parse a template that must hold exactly one statement.
pub fn parse_statement<'a>(allocator: &'a Allocator, text: &str) -> Result<Statement<'a>> {
    let mut body = parse_statements(allocator, text)?;
    if body.len() != 1 {
        return Err(ConvertError::Config(format!(
            "boilerplate `{}` must be a single statement, found {}",
            text, body.len()
        )));
    }
    body.pop()
        .ok_or_else(|| ConvertError::Config(format!("boilerplate `{}` is empty", text)))
}

/// `import { a, b } from "module";`
pub fn named_import_text(names: &[String], module: &str) -> String {
    format!("import {{ {} }} from {};", names.join(", "), quote(module))
}

/// `import * as ns from "module";`
pub fn namespace_import_text(namespace: &str, module: &str) -> String {
    format!("import * as {} from {};", namespace, quote(module))
}

/// JS string literal for `value`; JSON string syntax is a subset of it.
pub fn quote(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| format!("\"{}\"", value))
}
