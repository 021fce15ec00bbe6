use tree_sitter::Node;

use super::line_index::LineIndex;
use super::{first_line, node_text};
use crate::engine::span::{ClassSpan, Span, SpanCategory};

/// Collect class and function spans from a C++ tree.
///
/// Span text is the function declarator (`Klass::method(int x)`), not the
/// whole definition head, so the return type never leaks into the label
/// and out-of-class definitions keep their qualifier for the normalizer.
pub fn collect(
    root: Node,
    source: &str,
    lines: &LineIndex,
    spans: &mut Vec<Span>,
    classes: &mut Vec<ClassSpan>,
) {
    walk(root, source, lines, false, spans, classes);
}

fn walk(
    node: Node,
    source: &str,
    lines: &LineIndex,
    in_class: bool,
    spans: &mut Vec<Span>,
    classes: &mut Vec<ClassSpan>,
) {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "function_definition" => {
                collect_function(child, source, lines, in_class, spans);
            }
            "class_specifier" | "struct_specifier" => {
                // Forward declarations have no body and produce nothing.
                let Some(body) = child.child_by_field_name("body") else {
                    continue;
                };
                if let Some(name) = child.child_by_field_name("name") {
                    classes.push(ClassSpan {
                        start: name.start_byte(),
                        start_row: lines.row_of(name.start_byte()),
                        text: node_text(&name, source.as_bytes()).to_string(),
                    });
                }
                walk(body, source, lines, true, spans, classes);
            }
            "namespace_definition" => {
                if let Some(body) = child.child_by_field_name("body") {
                    walk(body, source, lines, false, spans, classes);
                }
            }
            // `class X { .. };` can sit inside a declaration node, and
            // nested classes inside a field declaration.
            "template_declaration" | "linkage_specification" | "declaration_list"
            | "declaration" | "field_declaration" | "preproc_if" | "preproc_ifdef" => {
                walk(child, source, lines, in_class, spans, classes);
            }
            _ => {}
        }
    }
}

fn collect_function(
    definition: Node,
    source: &str,
    lines: &LineIndex,
    in_class: bool,
    spans: &mut Vec<Span>,
) {
    let Some(declarator) = find_function_declarator(definition) else {
        return;
    };

    let category = if in_class {
        SpanCategory::DeclaredMethod
    } else {
        SpanCategory::StandaloneFunction
    };

    // Anchor on the declarator, not the definition: a return type on its
    // own line must not shift the resolution row above the name.
    let start = declarator.start_byte();
    spans.push(Span {
        start,
        end: definition.end_byte(),
        start_row: lines.row_of(start),
        category,
        text: first_line(&source[start..declarator.end_byte()]).to_string(),
    });
}

/// Descend through pointer/reference wrappers to the function declarator.
fn find_function_declarator(definition: Node) -> Option<Node> {
    let mut current = definition.child_by_field_name("declarator")?;
    loop {
        match current.kind() {
            "function_declarator" => return Some(current),
            "pointer_declarator" | "reference_declarator" | "parenthesized_declarator" => {
                current = current.child_by_field_name("declarator")?;
            }
            _ => return None,
        }
    }
}
