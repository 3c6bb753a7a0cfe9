//! Markup Transformer
//!
//! Rewrites one JSX element: tag names (opening and closing together), the
//! class-list attribute into a stylesheet reference, and event attributes whose
//! platform name depends on the mapped component.

use oxc_ast::ast::*;
use oxc_ast::AstBuilder;
use oxc_span::SPAN;

use crate::config::{ConverterConfig, WellKnownNames};
use crate::error::{ConvertError, Result, ERR_DYNAMIC_CLASS_LIST, ERR_TAG_MISMATCH};
use crate::nodes::{alloc_name, member};

/// Printable name of a JSX tag, for every accepted variant.
pub fn element_name_text(name: &JSXElementName<'_>) -> String {
    match name {
        JSXElementName::Identifier(id) => id.name.to_string(),
        JSXElementName::IdentifierReference(id) => id.name.to_string(),
        JSXElementName::NamespacedName(ns) => format!("{}:{}", ns.namespace.name, ns.name.name),
        JSXElementName::MemberExpression(me) => member_name_text(me),
        JSXElementName::ThisExpression(_) => "this".to_string(),
    }
}

fn member_name_text(expr: &JSXMemberExpression<'_>) -> String {
    let object = match &expr.object {
        JSXMemberExpressionObject::IdentifierReference(id) => id.name.to_string(),
        JSXMemberExpressionObject::MemberExpression(inner) => member_name_text(inner),
        JSXMemberExpressionObject::ThisExpression(_) => "this".to_string(),
    };
    format!("{}.{}", object, expr.property.name)
}

/// Lowercase web tags parse as plain JSX identifiers; only those are renamed.
fn rename_tag<'a>(ast: AstBuilder<'a>, name: &mut JSXElementName<'a>, target: &str) {
    if let JSXElementName::Identifier(id) = name {
        id.name = alloc_name(ast, target).into();
    }
}

/// `"main  dark"` → `["Main", "Dark"]`
pub fn class_members(class_list: &str) -> Vec<String> {
    class_list.split_whitespace().map(capitalize_first).collect()
}

fn capitalize_first(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Static text of a class-list value. Anything computed at runtime is rejected.
fn class_list_text(value: Option<&JSXAttributeValue<'_>>, tag: &str) -> Result<String> {
    let dynamic = || {
        ConvertError::structural(
            ERR_DYNAMIC_CLASS_LIST,
            format!("class list on <{}> is not a static string", tag),
        )
    };

    match value {
        None => Ok(String::new()),
        Some(JSXAttributeValue::StringLiteral(s)) => Ok(s.value.to_string()),
        Some(JSXAttributeValue::ExpressionContainer(container)) => match &container.expression {
            JSXExpression::StringLiteral(s) => Ok(s.value.to_string()),
            JSXExpression::TemplateLiteral(t) if t.expressions.is_empty() => Ok(t
                .quasis
                .iter()
                .map(|q| q.value.cooked.unwrap_or(q.value.raw).to_string())
                .collect()),
            _ => Err(dynamic()),
        },
        Some(_) => Err(dynamic()),
    }
}

fn style_reference<'a>(
    ast: AstBuilder<'a>,
    names: &WellKnownNames,
    members: &[String],
) -> Expression<'a> {
    if let [single] = members {
        return member(ast, &names.styles_binding, single);
    }
    let mut elements = ast.vec();
    for name in members {
        elements.push(ArrayExpressionElement::from(member(
            ast,
            &names.styles_binding,
            name,
        )));
    }
    ast.expression_array(SPAN, elements)
}

fn attribute_name<'b>(attr: &'b JSXAttribute<'_>) -> Option<&'b str> {
    match &attr.name {
        JSXAttributeName::Identifier(id) => Some(id.name.as_str()),
        JSXAttributeName::NamespacedName(_) => None,
    }
}

fn rename_attribute<'a>(ast: AstBuilder<'a>, attr: &mut JSXAttribute<'a>, target: &str) {
    if let JSXAttributeName::Identifier(id) = &mut attr.name {
        id.name = alloc_name(ast, target).into();
    }
}

/// Rewrite one element in place. Children are left to the caller's traversal.
pub fn transform_element<'a>(
    ast: AstBuilder<'a>,
    config: &ConverterConfig,
    element: &mut JSXElement<'a>,
) -> Result<()> {
    let names = &config.names;
    let opening_name = element_name_text(&element.opening_element.name);

    if let Some(closing) = &element.closing_element {
        let closing_name = element_name_text(&closing.name);
        if closing_name != opening_name {
            return Err(ConvertError::structural(
                ERR_TAG_MISMATCH,
                format!("<{}> is closed by </{}>", opening_name, closing_name),
            ));
        }
    }

    let mapped = config.tables.tag_map.get(&opening_name).cloned();
    if let Some(target) = &mapped {
        rename_tag(ast, &mut element.opening_element.name, target);
        if let Some(closing) = element.closing_element.as_mut() {
            rename_tag(ast, &mut closing.name, target);
        }
        tracing::debug!(from = %opening_name, to = %target, "renamed element");
    }
    let component = mapped.as_deref().unwrap_or(opening_name.as_str());
    // Event names follow the mapping, not whatever the tag already was.
    let mapped_to = |target: &str| mapped.as_deref() == Some(target);

    let mut index = 0;
    while index < element.opening_element.attributes.len() {
        let JSXAttributeItem::Attribute(attr) = &mut element.opening_element.attributes[index]
        else {
            index += 1;
            continue;
        };
        let Some(name) = attribute_name(attr).map(str::to_string) else {
            index += 1;
            continue;
        };

        if name == names.class_attribute {
            let members = class_members(&class_list_text(attr.value.as_ref(), component)?);
            if members.is_empty() {
                element.opening_element.attributes.remove(index);
                continue;
            }
            rename_attribute(ast, attr, &names.style_attribute);
            let reference = style_reference(ast, names, &members);
            attr.value = Some(
                ast.jsx_attribute_value_expression_container(SPAN, JSXExpression::from(reference)),
            );
        } else if name == names.click_attribute && mapped_to(&names.pressable_component) {
            rename_attribute(ast, attr, &names.press_attribute);
        } else if name == names.change_attribute && mapped_to(&names.text_input_component) {
            rename_attribute(ast, attr, &names.change_text_attribute);
        }
        index += 1;
    }

    Ok(())
}

/// `navigate(...)` → `router.navigate(...)`, arguments preserved.
pub fn rewrite_navigation_call<'a>(
    ast: AstBuilder<'a>,
    names: &WellKnownNames,
    call: &mut CallExpression<'a>,
) {
    call.callee = member(ast, &names.router_binding, &names.navigate_member);
}
