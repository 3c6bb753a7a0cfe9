//! Import Rewriter
//!
//! One import statement at a time, first matching rule wins:
//! base module → untouched, web router → platform router, stylesheet file →
//! removed, platform UI module → gains the stylesheet API binding, image
//! asset → single default binding from the asset directory.

use oxc_ast::ast::*;
use oxc_ast::AstBuilder;
use oxc_span::SPAN;

use crate::config::ConverterConfig;
use crate::error::{ConvertError, Result, ERR_ASSET_WITHOUT_BINDING};
use crate::nodes::{
    alloc_name, has_namespace_binding, imported_name, named_imports, named_specifier,
    specifier_local_name, string_literal,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportAction {
    Keep,
    Remove,
}

/// `foo/bar/baz.svg` → `bar/baz.svg`
fn last_two_segments(specifier: &str) -> String {
    let segments: Vec<&str> = specifier.split('/').collect();
    let start = segments.len().saturating_sub(2);
    segments[start..].join("/")
}

pub fn rewrite_import<'a>(
    ast: AstBuilder<'a>,
    config: &ConverterConfig,
    decl: &mut ImportDeclaration<'a>,
) -> Result<ImportAction> {
    let names = &config.names;
    let tables = &config.tables;
    let specifier = decl.source.value.to_string();

    if specifier == names.base_module {
        return Ok(ImportAction::Keep);
    }

    if specifier == names.web_router_module {
        decl.source = string_literal(ast, &names.platform_router_module);
        if let Some(specifiers) = decl.specifiers.as_mut() {
            for spec in specifiers.iter_mut() {
                let is_hook = matches!(
                    spec,
                    ImportDeclarationSpecifier::ImportSpecifier(s)
                        if imported_name(&s.imported) == names.navigation_hook
                );
                if is_hook {
                    *spec = named_specifier(ast, &names.router_hook);
                }
            }
        }
        tracing::debug!(from = %specifier, to = %names.platform_router_module, "rewrote router import");
        return Ok(ImportAction::Keep);
    }

    if tables.is_stylesheet_specifier(&specifier) {
        tracing::debug!(specifier = %specifier, "removed stylesheet import");
        return Ok(ImportAction::Remove);
    }

    if specifier == names.platform_ui_module {
        if has_namespace_binding(decl) {
            return Ok(ImportAction::Keep);
        }
        let present = named_imports(decl)
            .iter()
            .any(|name| *name == names.stylesheet_api);
        if !present {
            let spec = named_specifier(ast, &names.stylesheet_api);
            match decl.specifiers.as_mut() {
                Some(specifiers) => specifiers.push(spec),
                None => decl.specifiers = Some(ast.vec1(spec)),
            }
        }
        return Ok(ImportAction::Keep);
    }

    if tables.is_image_specifier(&specifier) {
        let local = decl
            .specifiers
            .as_ref()
            .and_then(|specifiers| specifiers.first())
            .map(|spec| specifier_local_name(spec).to_string())
            .ok_or_else(|| {
                ConvertError::structural(
                    ERR_ASSET_WITHOUT_BINDING,
                    format!("import of '{}' has no binding to keep", specifier),
                )
            })?;

        let binding = ast.binding_identifier(SPAN, alloc_name(ast, &local));
        let default_spec = ast.import_declaration_specifier_import_default_specifier(SPAN, binding);
        decl.specifiers = Some(ast.vec1(default_spec));

        let target = format!(
            "{}/{}",
            tables.asset_directory,
            last_two_segments(&specifier)
        );
        tracing::debug!(from = %specifier, to = %target, "rewrote asset import");
        decl.source = string_literal(ast, &target);
        return Ok(ImportAction::Keep);
    }

    Ok(ImportAction::Keep)
}

/// Apply [`rewrite_import`] to every top-level import, dropping removed statements.
pub fn rewrite_program_imports<'a>(
    ast: AstBuilder<'a>,
    config: &ConverterConfig,
    program: &mut Program<'a>,
) -> Result<usize> {
    let mut removed = Vec::new();
    for (index, stmt) in program.body.iter_mut().enumerate() {
        if let Statement::ImportDeclaration(decl) = stmt {
            if rewrite_import(ast, config, decl)? == ImportAction::Remove {
                removed.push(index);
            }
        }
    }

    for index in removed.iter().rev() {
        program.body.remove(*index);
    }
    Ok(removed.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{squash, transform};

    fn imports(source: &str) -> String {
        let config = ConverterConfig::default();
        transform(source, |ast, program| {
            rewrite_program_imports(ast, &config, program).map(|_| ())
        })
        .unwrap()
    }

    #[test]
    fn test_base_module_untouched() {
        let out = imports("import React, { useState } from 'react';");
        assert_eq!(out, squash("import React, { useState } from 'react';"));
    }

    #[test]
    fn test_router_module_and_hook_renamed() {
        let out = imports("import { Link, useNavigate } from 'react-router-dom';");
        assert_eq!(out, squash("import { Link, useRouter } from 'expo-router';"));
    }

    #[test]
    fn test_stylesheet_import_removed() {
        let out = imports("import './App.css';\nimport x from './x';");
        assert_eq!(out, squash("import x from './x';"));
    }

    #[test]
    fn test_platform_import_gains_stylesheet_once() {
        let out = imports("import { View } from 'react-native';");
        assert_eq!(out, squash("import { View, StyleSheet } from 'react-native';"));

        let again = imports("import { StyleSheet, View } from 'react-native';");
        assert_eq!(again, squash("import { StyleSheet, View } from 'react-native';"));
    }

    #[test]
    fn test_platform_namespace_import_left_alone() {
        let out = imports("import * as RN from 'react-native';");
        assert_eq!(out, squash("import * as RN from 'react-native';"));
    }

    #[test]
    fn test_asset_import_rewritten_to_default_binding() {
        let out = imports("import Logo from 'foo/bar.svg';");
        assert_eq!(out, squash("import Logo from '../assets/images/foo/bar.svg';"));

        let nested = imports("import { ReactComponent as Icon } from '../../icons/ui/close.svg';");
        assert_eq!(nested, squash("import Icon from '../assets/images/ui/close.svg';"));
    }

    #[test]
    fn test_asset_import_without_binding_is_structural_error() {
        let config = ConverterConfig::default();
        let err = transform("import 'foo/bar.svg';", |ast, program| {
            rewrite_program_imports(ast, &config, program).map(|_| ())
        })
        .unwrap_err();
        assert_eq!(err.code(), Some(ERR_ASSET_WITHOUT_BINDING));
    }

    #[test]
    fn test_unknown_module_untouched() {
        let out = imports("import { format } from 'date-fns';");
        assert_eq!(out, squash("import { format } from 'date-fns';"));
    }

    #[test]
    fn test_last_two_segments() {
        assert_eq!(last_two_segments("a/b/c.svg"), "b/c.svg");
        assert_eq!(last_two_segments("c.svg"), "c.svg");
    }
}
