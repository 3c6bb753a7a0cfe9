//! Component-Usage Reconciler
//!
//! Runs last so it sees the renamed tags and every identifier the injectors
//! introduced. Collection order is first appearance in the tree; appended
//! bindings follow it.

use oxc_ast::ast::*;
use oxc_ast::AstBuilder;
use oxc_ast_visit::{walk, Visit};

use crate::config::ConverterConfig;
use crate::error::Result;
use crate::markup::element_name_text;
use crate::nodes::{has_namespace_binding, named_imports, named_specifier};
use crate::template::{named_import_text, parse_statement};

struct UsageCollector<'c> {
    config: &'c ConverterConfig,
    used: Vec<String>,
}

impl<'c> UsageCollector<'c> {
    fn record(&mut self, name: &str) {
        if !self.used.iter().any(|u| u == name) {
            self.used.push(name.to_string());
        }
    }
}

impl<'a, 'c> Visit<'a> for UsageCollector<'c> {
    fn visit_jsx_opening_element(&mut self, element: &JSXOpeningElement<'a>) {
        let config = self.config;
        let tag = element_name_text(&element.name);
        if config.tables.is_recognized_component(&tag) {
            self.record(&tag);
            self.record(&config.names.stylesheet_api);
        }
        walk::walk_jsx_opening_element(self, element);
    }

    fn visit_identifier_reference(&mut self, ident: &IdentifierReference<'a>) {
        let name = ident.name.as_str();
        if self
            .config
            .tables
            .referenced_identifiers
            .iter()
            .any(|r| r == name)
        {
            self.record(name);
        }
    }
}

/// Platform names the program needs imported, in first-use order.
pub fn collect_used_components(program: &Program<'_>, config: &ConverterConfig) -> Vec<String> {
    let mut collector = UsageCollector {
        config,
        used: Vec::new(),
    };
    collector.visit_program(program);
    collector.used
}

/// Make sure every name in `used` is imported from the platform UI module.
pub fn ensure_platform_imports<'a>(
    ast: AstBuilder<'a>,
    config: &ConverterConfig,
    program: &mut Program<'a>,
    used: &[String],
) -> Result<usize> {
    let module = config.names.platform_ui_module.as_str();

    let existing = program.body.iter_mut().find_map(|stmt| match stmt {
        Statement::ImportDeclaration(decl)
            if decl.source.value.as_str() == module && !has_namespace_binding(decl) =>
        {
            Some(decl)
        }
        _ => None,
    });

    let Some(decl) = existing else {
        if used.is_empty() {
            return Ok(0);
        }
        let text = named_import_text(used, module);
        program.body.insert(0, parse_statement(ast.allocator, &text)?);
        tracing::debug!(count = used.len(), "created platform import");
        return Ok(used.len());
    };

    let present: Vec<String> = named_imports(decl).iter().map(|s| s.to_string()).collect();
    let missing: Vec<&String> = used.iter().filter(|name| !present.contains(name)).collect();
    if missing.is_empty() {
        return Ok(0);
    }

    let specifiers = decl.specifiers.get_or_insert_with(|| ast.vec());
    for name in &missing {
        specifiers.push(named_specifier(ast, name));
    }
    tracing::debug!(count = missing.len(), "extended platform import");
    Ok(missing.len())
}
