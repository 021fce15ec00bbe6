use scope_status_mcp::classify::ClassifiedDocument;
use scope_status_mcp::config::DisplayConfig;
use scope_status_mcp::engine::{self, SpanCategory, SpanOracle};

const FIXTURE: &str = "\
// helpers

function topLevel(a, b) {
  return a + b;
}

const picker = (x) => x * 2;

class Widget {
  render() {
    return null;
  }

  handler = (event) => {
    return event;
  }

  debounced = throttle(() => {
    tick();
  }, 100);
}
";

fn classify() -> ClassifiedDocument {
    ClassifiedDocument::parse(FIXTURE, "TypeScript", None)
        .expect("fixture should classify as TypeScript")
}

#[test]
fn test_categories_and_rows() {
    let doc = classify();

    let standalone = doc.find_spans(SpanCategory::StandaloneFunction);
    assert_eq!(standalone.len(), 2, "function declaration + arrow binding");
    assert_eq!(standalone[0].text, "function topLevel(a, b)");
    assert_eq!(standalone[0].start_row, 2);
    assert_eq!(standalone[1].text, "picker");
    assert_eq!(standalone[1].start_row, 6);

    let methods = doc.find_spans(SpanCategory::DeclaredMethod);
    assert_eq!(methods.len(), 1);
    assert_eq!(methods[0].text, "render()");
    assert_eq!(methods[0].start_row, 9);

    let bound = doc.find_spans(SpanCategory::BoundMethod);
    assert_eq!(bound.len(), 1);
    assert_eq!(bound[0].text, "handler = (event) => {");
    assert_eq!(bound[0].start_row, 13);

    let wrapped = doc.find_spans(SpanCategory::WrappedBoundMethod);
    assert_eq!(wrapped.len(), 1);
    assert_eq!(wrapped[0].text, "debounced");
    assert_eq!(wrapped[0].start_row, 17);

    let classes = doc.class_spans();
    assert_eq!(classes.len(), 1);
    assert_eq!(classes[0].text, "Widget");
    assert_eq!(classes[0].start_row, 8);
}

#[test]
fn test_row_before_any_declaration_is_unresolved() {
    let doc = classify();
    let label = engine::resolve_scope(&doc, 0, &DisplayConfig::default());
    assert!(!label.resolved);
    assert_eq!(label.text, "");
}

#[test]
fn test_function_only_labels() {
    let doc = classify();
    let config = DisplayConfig::default();

    assert_eq!(engine::resolve_scope(&doc, 3, &config).text, "topLevel");
    assert_eq!(engine::resolve_scope(&doc, 6, &config).text, "picker");
    assert_eq!(engine::resolve_scope(&doc, 10, &config).text, "render");
    assert_eq!(engine::resolve_scope(&doc, 18, &config).text, "debounced");
}

#[test]
fn test_bound_method_assignment_artifact_is_trimmed() {
    let doc = classify();
    let label = engine::resolve_scope(&doc, 14, &DisplayConfig::default());
    assert_eq!(label.text, "handler");
}

#[test]
fn test_class_and_divider() {
    let doc = classify();
    let config = DisplayConfig {
        display_class: true,
        ..DisplayConfig::default()
    };

    assert_eq!(
        engine::resolve_scope(&doc, 10, &config).text,
        "Widget # render"
    );

    // Before the class: function resolves, no class, no divider.
    assert_eq!(engine::resolve_scope(&doc, 3, &config).text, "topLevel");
}

#[test]
fn test_show_arguments_keeps_signature() {
    let doc = classify();
    let config = DisplayConfig {
        display_arguments: true,
        ..DisplayConfig::default()
    };

    assert_eq!(
        engine::resolve_scope(&doc, 3, &config).text,
        "topLevel(a, b)"
    );
}

#[test]
fn test_tight_divider_configuration() {
    let doc = classify();
    let config = DisplayConfig {
        display_class: true,
        space_around_class_and_func_divider: false,
        ..DisplayConfig::default()
    };

    assert_eq!(engine::resolve_scope(&doc, 10, &config).text, "Widget#render");
}

#[test]
fn test_log_statement_from_resolved_label() {
    let doc = classify();
    let config = DisplayConfig {
        display_class: true,
        ..DisplayConfig::default()
    };

    let label = engine::resolve_scope(&doc, 10, &config);
    let statement = engine::build_log_statement("console.log", &label, " :: ");
    assert_eq!(statement, "console.log(`Widget # render :: `);");
}

#[test]
fn test_javascript_grammar_accepts_fixture() {
    // The fixture is also valid JavaScript; the JS grammar names class
    // fields differently and must still produce the same shape.
    let doc = ClassifiedDocument::parse(FIXTURE, "JavaScript", None)
        .expect("fixture should classify as JavaScript");

    assert_eq!(doc.class_spans().len(), 1);
    assert_eq!(doc.find_spans(SpanCategory::DeclaredMethod).len(), 1);
    assert_eq!(doc.find_spans(SpanCategory::BoundMethod).len(), 1);
}

#[test]
fn test_object_literal_members_inside_class_field() {
    let source = "\
class Menu {
  events = {
    onOpen: () => {
      this.show();
    },
    close() {
      this.hide();
    },
  };
}
";
    let doc = ClassifiedDocument::parse(source, "TypeScript", None)
        .expect("object-literal fixture should classify");

    let members = doc.find_spans(SpanCategory::ObjectLiteralMethod);
    assert_eq!(members.len(), 2, "pair member and shorthand method");
    assert_eq!(members[0].text, "onOpen");
    assert_eq!(members[0].start_row, 2);
    assert_eq!(members[1].text, "close");
    assert_eq!(members[1].start_row, 5);

    let config = DisplayConfig::default();
    assert_eq!(engine::resolve_scope(&doc, 3, &config).text, "onOpen");
    assert_eq!(engine::resolve_scope(&doc, 6, &config).text, "close");
}
