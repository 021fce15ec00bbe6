use tree_sitter::Node;

use super::line_index::LineIndex;
use super::{first_line, node_text};
use crate::engine::span::{ClassSpan, Span, SpanCategory};

/// Collect class and function spans from a TypeScript / TSX / JavaScript
/// tree.
///
/// The walk never descends into function bodies: inner function scopes
/// are outside the resolution contract, and keeping them out of the pool
/// is what makes the flat last-declared-wins rule behave.
pub fn collect(
    root: Node,
    source: &str,
    lines: &LineIndex,
    spans: &mut Vec<Span>,
    classes: &mut Vec<ClassSpan>,
) {
    walk(root, source, lines, spans, classes);
}

fn walk(
    node: Node,
    source: &str,
    lines: &LineIndex,
    spans: &mut Vec<Span>,
    classes: &mut Vec<ClassSpan>,
) {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "class_declaration" | "abstract_class_declaration" => {
                if let Some(name) = child.child_by_field_name("name") {
                    classes.push(ClassSpan {
                        start: name.start_byte(),
                        start_row: lines.row_of(name.start_byte()),
                        text: node_text(&name, source.as_bytes()).to_string(),
                    });
                }
                if let Some(body) = child.child_by_field_name("body") {
                    collect_class_members(body, source, lines, spans);
                }
            }
            "function_declaration" | "generator_function_declaration" => {
                spans.push(signature_span(
                    child,
                    source,
                    lines,
                    SpanCategory::StandaloneFunction,
                ));
            }
            "lexical_declaration" | "variable_declaration" => {
                collect_function_bindings(child, source, lines, spans);
            }
            // Function bodies and class expressions are deliberately
            // opaque; inner scopes stay out of the pool.
            kind if is_function_value(&child) || kind == "class" => {}
            // export/ambient wrappers and plain statement containers
            _ => walk(child, source, lines, spans, classes),
        }
    }
}

/// Direct members of a class body.
fn collect_class_members(body: Node, source: &str, lines: &LineIndex, spans: &mut Vec<Span>) {
    let mut cursor = body.walk();
    for member in body.children(&mut cursor) {
        match member.kind() {
            "method_definition" => {
                spans.push(signature_span(
                    member,
                    source,
                    lines,
                    SpanCategory::DeclaredMethod,
                ));
            }
            // "public_field_definition" in the TypeScript grammar,
            // "field_definition" in the JavaScript grammar.
            "public_field_definition" | "field_definition" => {
                collect_field_member(member, source, lines, spans);
            }
            _ => {}
        }
    }
}

/// A class field whose value is function-shaped: a direct arrow/function
/// (bound method), a call wrapping one (wrapped bound method), or an
/// object literal with function members.
fn collect_field_member(member: Node, source: &str, lines: &LineIndex, spans: &mut Vec<Span>) {
    let Some(value) = member.child_by_field_name("value") else {
        return;
    };
    let name = member
        .child_by_field_name("name")
        .or_else(|| member.child_by_field_name("property"));

    if is_function_value(&value) {
        // The whole first line (`handler = (e) => {`) so a truncated
        // parameter cut leaves the `name =` artifact the formatter trims.
        let start = member.start_byte();
        spans.push(Span {
            start,
            end: member.end_byte(),
            start_row: lines.row_of(start),
            category: SpanCategory::BoundMethod,
            text: first_line(&source[start..member.end_byte()]).to_string(),
        });
        return;
    }

    if value.kind() == "call_expression" && call_wraps_function(&value) {
        if let Some(name) = name {
            spans.push(Span {
                start: member.start_byte(),
                end: member.end_byte(),
                start_row: lines.row_of(member.start_byte()),
                category: SpanCategory::WrappedBoundMethod,
                text: node_text(&name, source.as_bytes()).to_string(),
            });
        }
        return;
    }

    if value.kind() == "object" {
        collect_object_members(value, source, lines, spans);
    }
}

/// Function-valued members of an object literal inside a class field.
fn collect_object_members(object: Node, source: &str, lines: &LineIndex, spans: &mut Vec<Span>) {
    let mut cursor = object.walk();
    for member in object.children(&mut cursor) {
        match member.kind() {
            "pair" => {
                let Some(value) = member.child_by_field_name("value") else {
                    continue;
                };
                if is_function_value(&value) {
                    if let Some(key) = member.child_by_field_name("key") {
                        spans.push(Span {
                            start: member.start_byte(),
                            end: member.end_byte(),
                            start_row: lines.row_of(member.start_byte()),
                            category: SpanCategory::ObjectLiteralMethod,
                            text: node_text(&key, source.as_bytes()).to_string(),
                        });
                    }
                } else if value.kind() == "object" {
                    collect_object_members(value, source, lines, spans);
                }
            }
            "method_definition" => {
                if let Some(name) = member.child_by_field_name("name") {
                    spans.push(Span {
                        start: member.start_byte(),
                        end: member.end_byte(),
                        start_row: lines.row_of(member.start_byte()),
                        category: SpanCategory::ObjectLiteralMethod,
                        text: node_text(&name, source.as_bytes()).to_string(),
                    });
                }
            }
            _ => {}
        }
    }
}

/// `const f = () => ..` and friends: declarators with function values.
fn collect_function_bindings(
    declaration: Node,
    source: &str,
    lines: &LineIndex,
    spans: &mut Vec<Span>,
) {
    let mut cursor = declaration.walk();
    for declarator in declaration.children(&mut cursor) {
        if declarator.kind() != "variable_declarator" {
            continue;
        }
        let Some(value) = declarator.child_by_field_name("value") else {
            continue;
        };
        if !is_function_value(&value) {
            continue;
        }
        if let Some(name) = declarator.child_by_field_name("name") {
            spans.push(Span {
                start: declarator.start_byte(),
                end: declarator.end_byte(),
                start_row: lines.row_of(declarator.start_byte()),
                category: SpanCategory::StandaloneFunction,
                text: node_text(&name, source.as_bytes()).to_string(),
            });
        }
    }
}

/// Span whose text covers the declaration head through its parameter
/// list (`public static doWork(x, y)`), first line only.
fn signature_span(node: Node, source: &str, lines: &LineIndex, category: SpanCategory) -> Span {
    let start = node.start_byte();
    let head_end = node
        .child_by_field_name("parameters")
        .map(|p| p.end_byte())
        .or_else(|| node.child_by_field_name("name").map(|n| n.end_byte()))
        .unwrap_or_else(|| node.end_byte());

    Span {
        start,
        end: node.end_byte(),
        start_row: lines.row_of(start),
        category,
        text: first_line(&source[start..head_end]).to_string(),
    }
}

fn is_function_value(value: &Node) -> bool {
    matches!(
        value.kind(),
        "arrow_function" | "function_expression" | "function" | "generator_function"
    )
}

/// A call like `debounce(() => { .. }, 100)` with a function argument.
fn call_wraps_function(call: &Node) -> bool {
    let Some(arguments) = call.child_by_field_name("arguments") else {
        return false;
    };
    let mut cursor = arguments.walk();
    let result = arguments
        .children(&mut cursor)
        .any(|arg| is_function_value(&arg));
    result
}
