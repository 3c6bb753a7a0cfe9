//! Auxiliary Injectors
//!
//! Fixed boilerplate added after the structural passes. Each injector checks
//! for its own prior output first, so running it twice changes nothing.

use std::collections::HashSet;

use oxc_allocator::CloneIn;
use oxc_ast::ast::*;
use oxc_ast::AstBuilder;
use oxc_ast_visit::{walk_mut, VisitMut};
use oxc_syntax::scope::ScopeFlags;

use crate::config::ConverterConfig;
use crate::error::Result;
use crate::nodes::{
    declared_name, has_namespace_binding, identifier, named_imports, named_specifier,
    pattern_binds, specifier_local_name,
};
use crate::template::{
    named_import_text, namespace_import_text, parse_statement, parse_statements, quote,
};

// ═══════════════════════════════════════════════════════════════════════════════
// LEADING IMPORTS
// ═══════════════════════════════════════════════════════════════════════════════

fn imports_from<'b, 'a>(
    program: &'b mut Program<'a>,
    module: &'b str,
) -> impl Iterator<Item = &'b mut ImportDeclaration<'a>> + 'b {
    program.body.iter_mut().filter_map(move |stmt| match stmt {
        Statement::ImportDeclaration(decl) if decl.source.value.as_str() == module => {
            Some(&mut **decl)
        }
        _ => None,
    })
}

/// Secure-store namespace import and font hook import, ahead of every other import.
pub fn ensure_leading_imports<'a>(
    ast: AstBuilder<'a>,
    config: &ConverterConfig,
    program: &mut Program<'a>,
) -> Result<()> {
    let names = &config.names;

    let has_storage = imports_from(program, &names.secure_store_module).any(|decl| {
        decl.specifiers.iter().flatten().any(|spec| {
            matches!(spec, ImportDeclarationSpecifier::ImportNamespaceSpecifier(_))
                && specifier_local_name(spec) == names.secure_store_namespace
        })
    });

    let mut has_font_hook = false;
    if let Some(decl) =
        imports_from(program, &names.font_module).find(|decl| !has_namespace_binding(decl))
    {
        if !named_imports(decl).contains(&names.font_hook.as_str()) {
            let spec = named_specifier(ast, &names.font_hook);
            match decl.specifiers.as_mut() {
                Some(specifiers) => specifiers.push(spec),
                None => decl.specifiers = Some(ast.vec1(spec)),
            }
        }
        has_font_hook = true;
    }

    if !has_font_hook {
        let text = named_import_text(std::slice::from_ref(&names.font_hook), &names.font_module);
        program.body.insert(0, parse_statement(ast.allocator, &text)?);
        tracing::debug!(module = %names.font_module, "added font hook import");
    }
    if !has_storage {
        let text = namespace_import_text(&names.secure_store_namespace, &names.secure_store_module);
        program.body.insert(0, parse_statement(ast.allocator, &text)?);
        tracing::debug!(module = %names.secure_store_module, "added secure store import");
    }
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════════
// TYPE DECLARATION
// ═══════════════════════════════════════════════════════════════════════════════

/// Insert the configured declarations right after the last import, skipping
/// any whose name is already declared at the top level.
pub fn insert_type_declaration<'a>(
    ast: AstBuilder<'a>,
    config: &ConverterConfig,
    program: &mut Program<'a>,
) -> Result<usize> {
    let text = config.tables.type_declaration.trim();
    if text.is_empty() {
        return Ok(0);
    }

    let declared: HashSet<String> = program
        .body
        .iter()
        .filter_map(declared_name)
        .map(str::to_string)
        .collect();

    let mut position = program
        .body
        .iter()
        .rposition(|stmt| matches!(stmt, Statement::ImportDeclaration(_)))
        .map_or(0, |index| index + 1);

    let mut inserted = 0;
    for stmt in parse_statements(ast.allocator, text)? {
        if declared_name(&stmt).is_some_and(|name| declared.contains(name)) {
            continue;
        }
        program.body.insert(position, stmt);
        position += 1;
        inserted += 1;
    }
    Ok(inserted)
}

// ═══════════════════════════════════════════════════════════════════════════════
// FONT LOADING
// ═══════════════════════════════════════════════════════════════════════════════

/// `const [fontsLoaded] = useFonts({ "Family": require("path"), ... });`
pub fn font_loading_text(config: &ConverterConfig) -> String {
    let faces: Vec<String> = config
        .tables
        .font_faces
        .iter()
        .map(|face| format!("{}: require({})", quote(&face.family), quote(&face.path)))
        .collect();
    format!(
        "const [{}] = {}({{ {} }});",
        config.names.fonts_loaded_binding,
        config.names.font_hook,
        faces.join(", ")
    )
}

fn binds_in_body(body: &FunctionBody<'_>, name: &str) -> bool {
    body.statements.iter().any(|stmt| match stmt {
        Statement::VariableDeclaration(decl) => decl
            .declarations
            .iter()
            .any(|declarator| pattern_binds(&declarator.id, name)),
        _ => false,
    })
}

struct FontLoader<'c, 'a> {
    ast: AstBuilder<'a>,
    config: &'c ConverterConfig,
    hook_call: Statement<'a>,
    inserted: usize,
}

impl<'c, 'a> VisitMut<'a> for FontLoader<'c, 'a> {
    fn visit_function(&mut self, func: &mut Function<'a>, flags: ScopeFlags) {
        let targeted = matches!(func.r#type, FunctionType::FunctionDeclaration)
            && func.id.as_ref().is_some_and(|id| {
                self.config
                    .tables
                    .font_targets
                    .iter()
                    .any(|target| target == id.name.as_str())
            });

        if targeted {
            if let Some(body) = func.body.as_mut() {
                if !binds_in_body(body, &self.config.names.fonts_loaded_binding) {
                    body.statements
                        .insert(0, self.hook_call.clone_in(self.ast.allocator));
                    self.inserted += 1;
                }
            }
        }

        walk_mut::walk_function(self, func, flags);
    }
}

/// Prepend the font hook call to every targeted function declaration.
pub fn insert_font_loading<'a>(
    ast: AstBuilder<'a>,
    config: &ConverterConfig,
    program: &mut Program<'a>,
) -> Result<usize> {
    if config.tables.font_targets.is_empty() {
        return Ok(0);
    }
    let hook_call = parse_statement(ast.allocator, &font_loading_text(config))?;
    let mut loader = FontLoader {
        ast,
        config,
        hook_call,
        inserted: 0,
    };
    loader.visit_program(program);
    Ok(loader.inserted)
}

// ═══════════════════════════════════════════════════════════════════════════════
// STORAGE SUBSTITUTION
// ═══════════════════════════════════════════════════════════════════════════════

/// `localStorage.getItem(k)` → `SecureStore.getItem(k)`. Returns whether `call` matched.
pub fn substitute_storage_call<'a>(
    ast: AstBuilder<'a>,
    config: &ConverterConfig,
    call: &mut CallExpression<'a>,
) -> bool {
    let Expression::StaticMemberExpression(callee) = &mut call.callee else {
        return false;
    };
    let on_storage = matches!(
        &callee.object,
        Expression::Identifier(id) if id.name.as_str() == config.names.web_storage
    );
    let method = callee.property.name.as_str();
    if !on_storage || !config.tables.storage_methods.iter().any(|m| m == method) {
        return false;
    }
    callee.object = identifier(ast, &config.names.secure_store_namespace);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{squash, transform};

    fn run<F>(source: &str, pass: F) -> String
    where
        F: for<'a> Fn(AstBuilder<'a>, &mut Program<'a>) -> Result<()>,
    {
        transform(source, pass).unwrap()
    }

    #[test]
    fn test_leading_imports_added_in_order() {
        let config = ConverterConfig::default();
        let out = run("import React from 'react';", |ast, program| {
            ensure_leading_imports(ast, &config, program)
        });
        assert_eq!(
            out,
            squash(
                "import * as SecureStore from 'expo-secure-store';
                 import { useFonts } from 'expo-font';
                 import React from 'react';"
            )
        );
    }

    #[test]
    fn test_leading_imports_idempotent() {
        let config = ConverterConfig::default();
        let out = run("import React from 'react';", |ast, program| {
            ensure_leading_imports(ast, &config, program)?;
            ensure_leading_imports(ast, &config, program)
        });
        assert_eq!(out.matches("expo-secure-store").count(), 1);
        assert_eq!(out.matches("expo-font").count(), 1);
    }

    #[test]
    fn test_existing_font_import_extended() {
        let config = ConverterConfig::default();
        let out = run(
            "import * as SecureStore from 'expo-secure-store'; import { loadAsync } from 'expo-font';",
            |ast, program| ensure_leading_imports(ast, &config, program),
        );
        assert_eq!(
            out,
            squash(
                "import * as SecureStore from 'expo-secure-store';
                 import { loadAsync, useFonts } from 'expo-font';"
            )
        );
    }

    #[test]
    fn test_type_declaration_after_last_import_once() {
        let config = ConverterConfig::default();
        let out = run(
            "import a from 'a'; import b from 'b'; const x = 1;",
            |ast, program| {
                insert_type_declaration(ast, &config, program)?;
                insert_type_declaration(ast, &config, program).map(|_| ())
            },
        );
        assert_eq!(out.matches("interfaceTransaction").count(), 1);
        let import_end = out.find("from\"b\";").unwrap();
        let interface = out.find("interfaceTransaction").unwrap();
        let constant = out.find("constx").unwrap();
        assert!(import_end < interface && interface < constant);
    }

    #[test]
    fn test_font_loading_only_in_targets() {
        let config = ConverterConfig::default();
        let out = run(
            "function WalletScreen() { return null; } function Other() { return null; }",
            |ast, program| insert_font_loading(ast, &config, program).map(|_| ()),
        );
        assert!(out.starts_with(&squash(
            "function WalletScreen() { const [fontsLoaded] = useFonts({"
        )));
        assert!(out.contains("\"Poppins-Bold\":require(\"../assets/fonts/Poppins-Bold.ttf\")"));
        assert!(out.contains(&squash("function Other() { return null; }")));
        assert_eq!(out.matches("useFonts").count(), 1);
    }

    #[test]
    fn test_font_loading_skipped_when_bound() {
        let config = ConverterConfig::default();
        let source = "export default function Balance() { const [fontsLoaded, error] = useFonts({}); return null; }";
        let out = run(source, |ast, program| {
            insert_font_loading(ast, &config, program).map(|_| ())
        });
        assert_eq!(out, squash(source));
    }

    #[test]
    fn test_storage_substitution() {
        let config = ConverterConfig::default();
        let out = run(
            "const t = localStorage.getItem('token'); localStorage.setItem('a', 'b');",
            |ast, program| {
                struct Calls<'c, 'a> {
                    ast: AstBuilder<'a>,
                    config: &'c ConverterConfig,
                }
                impl<'c, 'a> VisitMut<'a> for Calls<'c, 'a> {
                    fn visit_call_expression(&mut self, call: &mut CallExpression<'a>) {
                        substitute_storage_call(self.ast, self.config, call);
                        walk_mut::walk_call_expression(self, call);
                    }
                }
                Calls {
                    ast,
                    config: &config,
                }
                .visit_program(program);
                Ok(())
            },
        );
        assert_eq!(
            out,
            squash("const t = SecureStore.getItem('token'); localStorage.setItem('a', 'b');")
        );
    }
}
