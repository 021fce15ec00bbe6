use scope_status_mcp::classify::ClassifiedDocument;
use scope_status_mcp::config::DisplayConfig;
use scope_status_mcp::engine::{self, SpanCategory, SpanOracle};

const FIXTURE: &str = "\
#include <vector>

class Engine {
 public:
  int tick(int delta) {
    return delta;
  }
};

void Engine::reset(int hard) {
  hard = 0;
}

static int helper() {
  return 1;
}
";

fn classify() -> ClassifiedDocument {
    ClassifiedDocument::parse(FIXTURE, "C++", None).expect("fixture should classify as C++")
}

#[test]
fn test_declarator_texts_and_rows() {
    let doc = classify();

    let classes = doc.class_spans();
    assert_eq!(classes.len(), 1);
    assert_eq!(classes[0].text, "Engine");
    assert_eq!(classes[0].start_row, 2);

    let methods = doc.find_spans(SpanCategory::DeclaredMethod);
    assert_eq!(methods.len(), 1);
    assert_eq!(methods[0].text, "tick(int delta)");
    assert_eq!(methods[0].start_row, 4);

    let functions = doc.find_spans(SpanCategory::StandaloneFunction);
    assert_eq!(functions.len(), 2, "out-of-class definition + static helper");
    assert_eq!(functions[0].text, "Engine::reset(int hard)");
    assert_eq!(functions[0].start_row, 9);
    assert_eq!(functions[1].text, "helper()");
    assert_eq!(functions[1].start_row, 13);
}

#[test]
fn test_qualified_name_reduced_when_class_hidden() {
    let doc = classify();
    let config = DisplayConfig::default();

    assert_eq!(engine::resolve_scope(&doc, 10, &config).text, "reset");
    assert_eq!(engine::resolve_scope(&doc, 5, &config).text, "tick");
    assert_eq!(engine::resolve_scope(&doc, 14, &config).text, "helper");
}

#[test]
fn test_qualified_name_kept_when_class_shown() {
    let doc = classify();
    let config = DisplayConfig {
        display_class: true,
        ..DisplayConfig::default()
    };

    // The qualifier stays because the class column is on; the label
    // repeats it by design of the original formatting rules.
    assert_eq!(
        engine::resolve_scope(&doc, 10, &config).text,
        "Engine # Engine::reset"
    );
}

#[test]
fn test_row_before_everything_is_unresolved() {
    let doc = classify();
    let label = engine::resolve_scope(&doc, 0, &DisplayConfig::default());
    assert!(!label.resolved);
    assert_eq!(label.text, "");
}

#[test]
fn test_namespace_wrapped_definitions() {
    let source = "\
namespace app {

int run(int code) {
  return code;
}

}  // namespace app
";
    let doc =
        ClassifiedDocument::parse(source, "C++", None).expect("namespace fixture should classify");

    let functions = doc.find_spans(SpanCategory::StandaloneFunction);
    assert_eq!(functions.len(), 1);
    assert_eq!(functions[0].text, "run(int code)");
    assert_eq!(functions[0].start_row, 2);
}
