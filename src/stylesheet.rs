//! StyleSheet Generator
//!
//! Finds the top-level `styles` object literal, converts each rule with the
//! Style Rule Transformer and re-emits the table as a `StyleSheet.create(...)`
//! binding at the end of the program.

use oxc_ast::ast::*;
use oxc_ast::AstBuilder;
use oxc_span::SPAN;

use crate::config::ConverterConfig;
use crate::error::{ConvertError, Result};
use crate::nodes::{object_property, property_key_name};
use crate::style::{transform_rule_ast, transform_rule_values, StyleMap, StyleValue};
use crate::template::parse_statement;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StylesheetOutcome {
    /// The object literal was consumed; `rules` survived conversion
    Converted { rules: usize },
    /// No style table existed; an empty stylesheet was appended
    Empty,
    /// `styles` is already a stylesheet-creation call; nothing changed
    AlreadyConverted,
}

fn binds_styles(declarator: &VariableDeclarator<'_>, binding: &str) -> bool {
    matches!(&declarator.id, BindingPattern::BindingIdentifier(id) if id.name.as_str() == binding)
}

/// Variable declaration held by a top-level statement, bare or exported.
fn top_level_declaration<'b, 'a>(stmt: &'b Statement<'a>) -> Option<&'b VariableDeclaration<'a>> {
    match stmt {
        Statement::VariableDeclaration(decl) => Some(&**decl),
        Statement::ExportNamedDeclaration(export) => match &export.declaration {
            Some(Declaration::VariableDeclaration(decl)) => Some(&**decl),
            _ => None,
        },
        _ => None,
    }
}

fn top_level_declaration_mut<'b, 'a>(
    stmt: &'b mut Statement<'a>,
) -> Option<&'b mut VariableDeclaration<'a>> {
    match stmt {
        Statement::VariableDeclaration(decl) => Some(&mut **decl),
        Statement::ExportNamedDeclaration(export) => match &mut export.declaration {
            Some(Declaration::VariableDeclaration(decl)) => Some(&mut **decl),
            _ => None,
        },
        _ => None,
    }
}

/// Where the top-level `styles = { ... }` declarator sits.
#[derive(Debug, Clone, Copy)]
struct TableLocation {
    statement: usize,
    declarator: usize,
    exported: bool,
}

fn find_style_table(program: &Program<'_>, binding: &str) -> Option<TableLocation> {
    program.body.iter().enumerate().find_map(|(i, stmt)| {
        let decl = top_level_declaration(stmt)?;
        let j = decl.declarations.iter().position(|d| {
            binds_styles(d, binding) && matches!(d.init, Some(Expression::ObjectExpression(_)))
        })?;
        Some(TableLocation {
            statement: i,
            declarator: j,
            exported: matches!(stmt, Statement::ExportNamedDeclaration(_)),
        })
    })
}

/// Detach the style table declarator, dropping its statement once empty.
fn take_style_table<'a>(
    program: &mut Program<'a>,
    binding: &str,
) -> Option<(VariableDeclarator<'a>, bool)> {
    let location = find_style_table(program, binding)?;
    let decl = top_level_declaration_mut(&mut program.body[location.statement])?;
    let declarator = decl.declarations.remove(location.declarator);
    if decl.declarations.is_empty() {
        program.body.remove(location.statement);
    }
    Some((declarator, location.exported))
}

fn is_stylesheet_call(init: Option<&Expression<'_>>, config: &ConverterConfig) -> bool {
    let Some(Expression::CallExpression(call)) = init else {
        return false;
    };
    match &call.callee {
        Expression::StaticMemberExpression(callee) => {
            matches!(&callee.object, Expression::Identifier(id) if id.name.as_str() == config.names.stylesheet_api)
                && callee.property.name.as_str() == config.names.stylesheet_create
        }
        _ => false,
    }
}

fn has_stylesheet_binding(program: &Program<'_>, config: &ConverterConfig) -> bool {
    program
        .body
        .iter()
        .filter_map(top_level_declaration)
        .flat_map(|decl| decl.declarations.iter())
        .any(|d| {
            binds_styles(d, &config.names.styles_binding) && is_stylesheet_call(d.init.as_ref(), config)
        })
}

/// Named, non-computed `key: value` entries of an object literal, in source order.
fn named_entries<'b, 'a>(
    object: &'b ObjectExpression<'a>,
) -> impl Iterator<Item = (&'b str, &'b Expression<'a>)> + 'b {
    object.properties.iter().filter_map(|kind| match kind {
        ObjectPropertyKind::ObjectProperty(prop) => {
            property_key_name(prop).map(|name| (name, &prop.value))
        }
        ObjectPropertyKind::SpreadProperty(_) => None,
    })
}

/// `[export] const styles = StyleSheet.create(<table>);`
fn stylesheet_statement<'a>(
    ast: AstBuilder<'a>,
    config: &ConverterConfig,
    table: Expression<'a>,
    exported: bool,
) -> Result<Statement<'a>> {
    let names = &config.names;
    let text = format!(
        "{}const {} = {}.{}({{}});",
        if exported { "export " } else { "" },
        names.styles_binding,
        names.stylesheet_api,
        names.stylesheet_create
    );
    let mut stmt = parse_statement(ast.allocator, &text)?;

    let call = top_level_declaration_mut(&mut stmt)
        .and_then(|decl| decl.declarations.first_mut())
        .and_then(|d| d.init.as_mut())
        .and_then(|init| match init {
            Expression::CallExpression(call) => Some(call),
            _ => None,
        });
    let Some(call) = call else {
        return Err(ConvertError::Config(format!(
            "stylesheet template `{}` is not a call binding",
            text
        )));
    };
    call.arguments.clear();
    call.arguments.push(Argument::from(table));
    Ok(stmt)
}

pub fn generate_stylesheet<'a>(
    ast: AstBuilder<'a>,
    config: &ConverterConfig,
    program: &mut Program<'a>,
) -> Result<StylesheetOutcome> {
    let binding = &config.names.styles_binding;

    let Some((declarator, exported)) = take_style_table(program, binding) else {
        if has_stylesheet_binding(program, config) {
            tracing::debug!("styles already built with the stylesheet api");
            return Ok(StylesheetOutcome::AlreadyConverted);
        }
        let table = ast.expression_object(SPAN, ast.vec());
        program.body.push(stylesheet_statement(ast, config, table, false)?);
        return Ok(StylesheetOutcome::Empty);
    };

    let mut rules = ast.vec();
    if let Some(Expression::ObjectExpression(table)) = &declarator.init {
        for (rule_name, value) in named_entries(table) {
            let Expression::ObjectExpression(rule) = value else {
                tracing::debug!(rule = rule_name, "skipping non-object style rule");
                continue;
            };
            let source: StyleMap<&Expression<'a>> = named_entries(rule).collect();
            let converted = transform_rule_ast(ast, &config.tables, &source);
            if converted.is_empty() {
                tracing::debug!(rule = rule_name, "dropping empty style rule");
                continue;
            }

            let mut props = ast.vec();
            for (name, expr) in converted {
                props.push(object_property(ast, &name, expr));
            }
            rules.push(object_property(ast, rule_name, ast.expression_object(SPAN, props)));
        }
    }

    let count = rules.len();
    let table = ast.expression_object(SPAN, rules);
    program.body.push(stylesheet_statement(ast, config, table, exported)?);
    tracing::info!(rules = count, "generated stylesheet");
    Ok(StylesheetOutcome::Converted { rules: count })
}

// ═══════════════════════════════════════════════════════════════════════════════
// EVALUATED TABLE
// ═══════════════════════════════════════════════════════════════════════════════

fn literal_value(expr: &Expression<'_>) -> Option<StyleValue> {
    match expr {
        Expression::StringLiteral(s) => Some(StyleValue::Text(s.value.to_string())),
        Expression::NumericLiteral(n) => Some(StyleValue::Number(n.value)),
        Expression::UnaryExpression(u) if u.operator == UnaryOperator::UnaryNegation => {
            match &u.argument {
                Expression::NumericLiteral(n) => Some(StyleValue::Number(-n.value)),
                _ => None,
            }
        }
        _ => None,
    }
}

/// Evaluated form of the `styles` table. Rules holding any non-literal value are
/// skipped; the tree is not modified.
pub fn extract_style_table(
    config: &ConverterConfig,
    program: &Program<'_>,
) -> StyleMap<StyleMap<StyleValue>> {
    let mut table = StyleMap::new();
    let Some(location) = find_style_table(program, &config.names.styles_binding) else {
        return table;
    };
    let Some(decl) = top_level_declaration(&program.body[location.statement]) else {
        return table;
    };
    let Some(Expression::ObjectExpression(object)) = &decl.declarations[location.declarator].init
    else {
        return table;
    };

    for (rule_name, value) in named_entries(object) {
        let Expression::ObjectExpression(rule) = value else {
            continue;
        };
        let values: Option<StyleMap<StyleValue>> = named_entries(rule)
            .map(|(k, v)| literal_value(v).map(|lit| (k, lit)))
            .collect();
        let Some(values) = values else {
            tracing::warn!(rule = rule_name, "style rule has non-literal values, skipped");
            continue;
        };
        let converted = transform_rule_values(&config.tables, &values);
        if !converted.is_empty() {
            table.insert(rule_name, converted);
        }
    }
    table
}
