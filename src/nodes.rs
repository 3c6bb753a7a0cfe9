//! Small node accessors and builders shared by the passes.

use lazy_static::lazy_static;
use oxc_ast::ast::*;
use oxc_ast::AstBuilder;
use oxc_span::SPAN;
use regex::Regex;

lazy_static! {
    static ref IDENTIFIER_RE: Regex = Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap();
}

pub fn is_identifier_name(name: &str) -> bool {
    IDENTIFIER_RE.is_match(name)
}

/// Copy `value` into the arena so it can back an `Atom<'a>`.
pub fn alloc_name<'a>(ast: AstBuilder<'a>, value: &str) -> &'a str {
    ast.allocator.alloc_str(value)
}

pub fn imported_name<'b>(name: &'b ModuleExportName<'_>) -> &'b str {
    match name {
        ModuleExportName::IdentifierName(id) => id.name.as_str(),
        ModuleExportName::IdentifierReference(id) => id.name.as_str(),
        ModuleExportName::StringLiteral(s) => s.value.as_str(),
    }
}

pub fn specifier_local_name<'b>(specifier: &'b ImportDeclarationSpecifier<'_>) -> &'b str {
    match specifier {
        ImportDeclarationSpecifier::ImportSpecifier(s) => s.local.name.as_str(),
        ImportDeclarationSpecifier::ImportDefaultSpecifier(s) => s.local.name.as_str(),
        ImportDeclarationSpecifier::ImportNamespaceSpecifier(s) => s.local.name.as_str(),
    }
}

/// Names imported through `{ ... }` bindings of one statement, in order.
pub fn named_imports<'b>(decl: &'b ImportDeclaration<'_>) -> Vec<&'b str> {
    decl.specifiers
        .iter()
        .flatten()
        .filter_map(|spec| match spec {
            ImportDeclarationSpecifier::ImportSpecifier(s) => Some(imported_name(&s.imported)),
            _ => None,
        })
        .collect()
}

pub fn has_namespace_binding(decl: &ImportDeclaration<'_>) -> bool {
    decl.specifiers.iter().flatten().any(|spec| {
        matches!(
            spec,
            ImportDeclarationSpecifier::ImportNamespaceSpecifier(_)
        )
    })
}

/// `{ name }` binding with identical imported and local identifiers.
pub fn named_specifier<'a>(ast: AstBuilder<'a>, name: &str) -> ImportDeclarationSpecifier<'a> {
    let name = alloc_name(ast, name);
    ast.import_declaration_specifier_import_specifier(
        SPAN,
        ast.module_export_name_identifier_name(SPAN, name),
        ast.binding_identifier(SPAN, name),
        ImportOrExportKind::Value,
    )
}

pub fn string_literal<'a>(ast: AstBuilder<'a>, value: &str) -> StringLiteral<'a> {
    ast.string_literal(SPAN, alloc_name(ast, value), None)
}

pub fn identifier<'a>(ast: AstBuilder<'a>, name: &str) -> Expression<'a> {
    ast.expression_identifier(SPAN, alloc_name(ast, name))
}

/// `object.property`, falling back to `object["property"]` for non-identifier names.
pub fn member<'a>(ast: AstBuilder<'a>, object: &str, property: &str) -> Expression<'a> {
    let object = identifier(ast, object);
    if is_identifier_name(property) {
        Expression::from(ast.member_expression_static(
            SPAN,
            object,
            ast.identifier_name(SPAN, alloc_name(ast, property)),
            false,
        ))
    } else {
        Expression::from(ast.member_expression_computed(
            SPAN,
            object,
            ast.expression_string_literal(SPAN, alloc_name(ast, property), None),
            false,
        ))
    }
}

/// Static name of a non-computed object key.
pub fn property_key_name<'b>(prop: &'b ObjectProperty<'_>) -> Option<&'b str> {
    if prop.computed {
        return None;
    }
    match &prop.key {
        PropertyKey::StaticIdentifier(id) => Some(id.name.as_str()),
        PropertyKey::StringLiteral(s) => Some(s.value.as_str()),
        _ => None,
    }
}

pub fn property_key<'a>(ast: AstBuilder<'a>, name: &str) -> PropertyKey<'a> {
    if is_identifier_name(name) {
        ast.property_key_static_identifier(SPAN, alloc_name(ast, name))
    } else {
        PropertyKey::from(ast.expression_string_literal(SPAN, alloc_name(ast, name), None))
    }
}

pub fn object_property<'a>(
    ast: AstBuilder<'a>,
    name: &str,
    value: Expression<'a>,
) -> ObjectPropertyKind<'a> {
    ast.object_property_kind_object_property(
        SPAN,
        PropertyKind::Init,
        property_key(ast, name),
        value,
        false,
        false,
        false,
    )
}

/// Whether `pattern` introduces a binding called `name`, at any destructuring depth.
pub fn pattern_binds(pattern: &BindingPattern<'_>, name: &str) -> bool {
    match pattern {
        BindingPattern::BindingIdentifier(id) => id.name.as_str() == name,
        BindingPattern::ObjectPattern(obj) => {
            obj.properties.iter().any(|p| pattern_binds(&p.value, name))
                || obj
                    .rest
                    .as_ref()
                    .is_some_and(|rest| pattern_binds(&rest.argument, name))
        }
        BindingPattern::ArrayPattern(arr) => {
            arr.elements
                .iter()
                .flatten()
                .any(|p| pattern_binds(p, name))
                || arr
                    .rest
                    .as_ref()
                    .is_some_and(|rest| pattern_binds(&rest.argument, name))
        }
        BindingPattern::AssignmentPattern(assign) => pattern_binds(&assign.left, name),
    }
}

/// Name declared by a top-level statement that introduces a type or value.
pub fn declared_name<'b>(stmt: &'b Statement<'_>) -> Option<&'b str> {
    match stmt {
        Statement::TSInterfaceDeclaration(decl) => Some(decl.id.name.as_str()),
        Statement::TSTypeAliasDeclaration(decl) => Some(decl.id.name.as_str()),
        Statement::ExportNamedDeclaration(export) => match &export.declaration {
            Some(Declaration::TSInterfaceDeclaration(decl)) => Some(decl.id.name.as_str()),
            Some(Declaration::TSTypeAliasDeclaration(decl)) => Some(decl.id.name.as_str()),
            _ => None,
        },
        _ => None,
    }
}
