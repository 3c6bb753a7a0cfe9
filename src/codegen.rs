//! Printer collaborator.

use oxc_ast::ast::Program;
use oxc_codegen::Codegen;

/// Print the (mutated) program. Comments collected by the parser are kept.
pub fn print_module(program: &Program<'_>) -> String {
    Codegen::new().build(program).code
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_module;
    use oxc_allocator::Allocator;

    #[test]
    fn test_print_round_trips_statements() {
        let allocator = Allocator::default();
        let program = parse_module(&allocator, "import React from 'react';\nconst a = 1;", "a.js").unwrap();
        let code = print_module(&program);
        assert!(code.contains("import React from"));
        assert!(code.contains("const a = 1;"));
    }
}
