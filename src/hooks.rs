//! Hook Transformer
//!
//! `const nav = useNavigate()` becomes `const router = useRouter()`. The bound
//! name is the router binding the markup pass calls into, so every local name
//! the navigation hook was bound to is collected first.

use std::collections::HashSet;

use oxc_ast::ast::*;
use oxc_ast::AstBuilder;
use oxc_ast_visit::{walk, Visit};

use crate::config::WellKnownNames;
use crate::error::{ConvertError, Result, ERR_HOOK_PATTERN};
use crate::nodes::{alloc_name, identifier};

pub(crate) fn calls_identifier(init: Option<&Expression<'_>>, name: &str) -> bool {
    match init {
        Some(Expression::CallExpression(call)) => {
            matches!(&call.callee, Expression::Identifier(id) if id.name.as_str() == name)
        }
        _ => false,
    }
}

struct AliasCollector<'n> {
    hook: &'n str,
    aliases: HashSet<String>,
}

impl<'a, 'n> Visit<'a> for AliasCollector<'n> {
    fn visit_variable_declarator(&mut self, decl: &VariableDeclarator<'a>) {
        if calls_identifier(decl.init.as_ref(), self.hook) {
            if let BindingPattern::BindingIdentifier(id) = &decl.id {
                self.aliases.insert(id.name.to_string());
            }
        }
        walk::walk_variable_declarator(self, decl);
    }
}

/// Local names bound to a navigation hook call anywhere in the program.
pub fn collect_navigation_aliases(
    program: &Program<'_>,
    names: &WellKnownNames,
) -> HashSet<String> {
    let mut collector = AliasCollector {
        hook: &names.navigation_hook,
        aliases: HashSet::new(),
    };
    collector.visit_program(program);
    collector.aliases
}

/// Rewrite a navigation hook binding. Returns whether `decl` matched.
pub fn transform_declarator<'a>(
    ast: AstBuilder<'a>,
    names: &WellKnownNames,
    decl: &mut VariableDeclarator<'a>,
) -> Result<bool> {
    if !calls_identifier(decl.init.as_ref(), &names.navigation_hook) {
        return Ok(false);
    }

    let BindingPattern::BindingIdentifier(id) = &mut decl.id else {
        return Err(ConvertError::structural(
            ERR_HOOK_PATTERN,
            format!(
                "result of {}() is destructured instead of bound to a name",
                names.navigation_hook
            ),
        ));
    };
    tracing::debug!(from = %id.name, to = %names.router_binding, "rebound navigation hook");
    id.name = alloc_name(ast, &names.router_binding).into();

    if let Some(Expression::CallExpression(call)) = decl.init.as_mut() {
        call.callee = identifier(ast, &names.router_hook);
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_module;
    use crate::test_support::{squash, transform};
    use oxc_allocator::Allocator;
    use oxc_ast_visit::{walk_mut, VisitMut};

    struct Declarators<'n, 'a> {
        ast: AstBuilder<'a>,
        names: &'n WellKnownNames,
        result: Result<usize>,
    }

    impl<'n, 'a> VisitMut<'a> for Declarators<'n, 'a> {
        fn visit_variable_declarator(&mut self, decl: &mut VariableDeclarator<'a>) {
            if self.result.is_ok() {
                match transform_declarator(self.ast, self.names, decl) {
                    Ok(true) => {
                        if let Ok(count) = self.result.as_mut() {
                            *count += 1;
                        }
                    }
                    Ok(false) => {}
                    Err(e) => self.result = Err(e),
                }
            }
            walk_mut::walk_variable_declarator(self, decl);
        }
    }

    fn hooks(source: &str) -> Result<String> {
        let names = WellKnownNames::default();
        transform(source, |ast, program| {
            let mut pass = Declarators {
                ast,
                names: &names,
                result: Ok(0),
            };
            pass.visit_program(program);
            pass.result.map(|_| ())
        })
    }

    #[test]
    fn test_aliases_collected_from_any_scope() {
        let allocator = Allocator::default();
        let source = "const a = useNavigate(); function App() { const go = useNavigate(); const x = other(); }";
        let program = parse_module(&allocator, source, "a.jsx").unwrap();
        let aliases = collect_navigation_aliases(&program, &WellKnownNames::default());
        assert_eq!(aliases.len(), 2);
        assert!(aliases.contains("a"));
        assert!(aliases.contains("go"));
    }

    #[test]
    fn test_binding_renamed_to_router() {
        let out = hooks("function App() { const nav = useNavigate(); }").unwrap();
        assert_eq!(out, squash("function App() { const router = useRouter(); }"));
    }

    #[test]
    fn test_other_declarators_untouched() {
        let out = hooks("const nav = useNavigation(); let n = 1;").unwrap();
        assert_eq!(out, squash("const nav = useNavigation(); let n = 1;"));
    }

    #[test]
    fn test_destructured_hook_is_structural_error() {
        let err = hooks("const { push } = useNavigate();").unwrap_err();
        assert_eq!(err.code(), Some(ERR_HOOK_PATTERN));
    }
}
