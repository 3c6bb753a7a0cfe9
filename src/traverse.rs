//! The combined first traversal.
//!
//! Import rewriting, markup rewriting, hook rebinding and storage substitution
//! touch disjoint node kinds, so one walk dispatches to all of them. The first
//! structural error stops further rewriting and is returned from [`RewritePass::finish`].

use std::collections::HashSet;

use oxc_ast::ast::*;
use oxc_ast::AstBuilder;
use oxc_ast_visit::{walk_mut, VisitMut};
use oxc_syntax::scope::ScopeFlags;

use crate::config::ConverterConfig;
use crate::error::{ConvertError, Result};
use crate::hooks::{calls_identifier, transform_declarator};
use crate::imports::rewrite_program_imports;
use crate::inject::substitute_storage_call;
use crate::markup::{rewrite_navigation_call, transform_element};
use crate::nodes::pattern_binds;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RewriteStats {
    pub imports_removed: usize,
    pub elements: usize,
    pub hooks: usize,
    pub navigation_calls: usize,
    pub storage_calls: usize,
}

pub struct RewritePass<'c, 'a> {
    ast: AstBuilder<'a>,
    config: &'c ConverterConfig,
    aliases: HashSet<String>,
    jsx_depth: usize,
    error: Option<ConvertError>,
    stats: RewriteStats,
}

impl<'c, 'a> RewritePass<'c, 'a> {
    pub fn new(ast: AstBuilder<'a>, config: &'c ConverterConfig, aliases: HashSet<String>) -> Self {
        RewritePass {
            ast,
            config,
            aliases,
            jsx_depth: 0,
            error: None,
            stats: RewriteStats::default(),
        }
    }

    fn record<T>(&mut self, result: Result<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                if self.error.is_none() {
                    self.error = Some(err);
                }
                None
            }
        }
    }

    /// Bare `navigate` inside markup, or any collected hook alias.
    fn is_navigation_call(&self, call: &CallExpression<'a>) -> bool {
        match &call.callee {
            Expression::Identifier(id) => {
                let name = id.name.as_str();
                self.aliases.contains(name)
                    || (self.jsx_depth > 0 && name == self.config.names.navigate_member)
            }
            _ => false,
        }
    }

    /// Aliases re-declared by a function's parameters or its own top-level
    /// declarations. Blocks and catch clauses nested further down are not checked.
    fn shadowed_aliases(
        &self,
        params: &FormalParameters<'a>,
        body: Option<&FunctionBody<'a>>,
    ) -> Vec<String> {
        let hook = self.config.names.navigation_hook.as_str();
        let declares = |alias: &str| {
            body.into_iter()
                .flat_map(|body| body.statements.iter())
                .filter_map(|stmt| match stmt {
                    Statement::VariableDeclaration(decl) => Some(decl),
                    _ => None,
                })
                .flat_map(|decl| decl.declarations.iter())
                .any(|d| pattern_binds(&d.id, alias) && !calls_identifier(d.init.as_ref(), hook))
        };
        self.aliases
            .iter()
            .filter(|alias| {
                params.items.iter().any(|p| pattern_binds(&p.pattern, alias)) || declares(alias)
            })
            .cloned()
            .collect()
    }

    /// Walk a function body with its shadowed aliases suspended.
    fn with_shadowing(&mut self, shadowed: Vec<String>, walk: impl FnOnce(&mut Self)) {
        for alias in &shadowed {
            self.aliases.remove(alias);
        }
        walk(self);
        self.aliases.extend(shadowed);
    }

    pub fn finish(self) -> Result<RewriteStats> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.stats),
        }
    }
}

impl<'c, 'a> VisitMut<'a> for RewritePass<'c, 'a> {
    fn visit_program(&mut self, program: &mut Program<'a>) {
        let result = rewrite_program_imports(self.ast, self.config, program);
        if let Some(removed) = self.record(result) {
            self.stats.imports_removed = removed;
            walk_mut::walk_program(self, program);
        }
    }

    fn visit_function(&mut self, func: &mut Function<'a>, flags: ScopeFlags) {
        let shadowed = self.shadowed_aliases(&func.params, func.body.as_deref());
        self.with_shadowing(shadowed, |pass| walk_mut::walk_function(pass, func, flags));
    }

    fn visit_arrow_function_expression(&mut self, arrow: &mut ArrowFunctionExpression<'a>) {
        let shadowed = self.shadowed_aliases(&arrow.params, Some(&*arrow.body));
        self.with_shadowing(shadowed, |pass| {
            walk_mut::walk_arrow_function_expression(pass, arrow)
        });
    }

    fn visit_jsx_element(&mut self, element: &mut JSXElement<'a>) {
        if self.error.is_some() {
            return;
        }
        let result = transform_element(self.ast, self.config, element);
        if self.record(result).is_none() {
            return;
        }
        self.stats.elements += 1;

        self.jsx_depth += 1;
        walk_mut::walk_jsx_element(self, element);
        self.jsx_depth -= 1;
    }

    fn visit_variable_declarator(&mut self, decl: &mut VariableDeclarator<'a>) {
        if self.error.is_some() {
            return;
        }
        let result = transform_declarator(self.ast, &self.config.names, decl);
        if let Some(matched) = self.record(result) {
            if matched {
                self.stats.hooks += 1;
            }
            walk_mut::walk_variable_declarator(self, decl);
        }
    }

    fn visit_call_expression(&mut self, call: &mut CallExpression<'a>) {
        if self.error.is_some() {
            return;
        }
        if substitute_storage_call(self.ast, self.config, call) {
            self.stats.storage_calls += 1;
        } else if self.is_navigation_call(call) {
            rewrite_navigation_call(self.ast, &self.config.names, call);
            self.stats.navigation_calls += 1;
        }
        walk_mut::walk_call_expression(self, call);
    }
}
