pub mod cpp;
pub mod line_index;
pub mod ts;

use std::path::{Path, PathBuf};

use tracing::debug;
use tree_sitter::Node;

use crate::engine::oracle::SpanOracle;
use crate::engine::span::{ClassSpan, Span, SpanCategory};
use crate::error::ScopeStatusError;
use line_index::LineIndex;

/// Which walker a syntax name maps to.
enum Family {
    TsLike,
    Cpp,
}

/// Resolve a human-readable syntax name ("TypeScript", "C++", ...) to a
/// grammar. Matching is substring-based because hosts report decorated
/// names like "TypeScriptReact" or "C++ 11".
fn language_for(syntax: &str) -> Option<(tree_sitter::Language, Family)> {
    if syntax.contains("C++") {
        return Some((tree_sitter_cpp::LANGUAGE.into(), Family::Cpp));
    }
    if syntax.contains("TSX") || syntax.contains("TypeScriptReact") {
        return Some((
            tree_sitter_typescript::LANGUAGE_TSX.into(),
            Family::TsLike,
        ));
    }
    if syntax.contains("TypeScript") {
        return Some((
            tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Family::TsLike,
        ));
    }
    if syntax.contains("JavaScript") || syntax.contains("JSX") {
        return Some((tree_sitter_javascript::LANGUAGE.into(), Family::TsLike));
    }
    None
}

/// A source document classified into spans: the production [`SpanOracle`].
///
/// The tree is walked once at construction; afterwards this is plain
/// data, cheap to query on every cursor event.
pub struct ClassifiedDocument {
    syntax: String,
    path: Option<PathBuf>,
    line_index: LineIndex,
    spans: Vec<Span>,
    classes: Vec<ClassSpan>,
}

impl ClassifiedDocument {
    /// Parse and classify a document.
    pub fn parse(
        source: &str,
        syntax: &str,
        path: Option<PathBuf>,
    ) -> Result<Self, ScopeStatusError> {
        let (language, family) = language_for(syntax)
            .ok_or_else(|| ScopeStatusError::UnknownSyntax(syntax.to_string()))?;

        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&language)
            .map_err(|e| ScopeStatusError::ParseFailed(e.to_string()))?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| ScopeStatusError::ParseFailed("tree-sitter returned no tree".to_string()))?;

        let line_index = LineIndex::new(source);
        let mut spans = Vec::new();
        let mut classes = Vec::new();

        match family {
            Family::TsLike => {
                ts::collect(tree.root_node(), source, &line_index, &mut spans, &mut classes)
            }
            Family::Cpp => {
                cpp::collect(tree.root_node(), source, &line_index, &mut spans, &mut classes)
            }
        }

        debug!(
            "Classified {} spans, {} classes for syntax {}",
            spans.len(),
            classes.len(),
            syntax
        );

        Ok(Self {
            syntax: syntax.to_string(),
            path,
            line_index,
            spans,
            classes,
        })
    }
}

impl SpanOracle for ClassifiedDocument {
    fn find_spans(&self, category: SpanCategory) -> Vec<Span> {
        self.spans
            .iter()
            .filter(|s| s.category == category)
            .cloned()
            .collect()
    }

    fn class_spans(&self) -> Vec<ClassSpan> {
        self.classes.clone()
    }

    fn row_of(&self, offset: usize) -> usize {
        self.line_index.row_of(offset)
    }

    fn syntax_name(&self) -> &str {
        &self.syntax
    }

    fn file_path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

pub(crate) fn node_text<'a>(node: &Node, src: &'a [u8]) -> &'a str {
    node.utf8_text(src).unwrap_or_default()
}

/// First line of a slice, without a trailing `\r`.
pub(crate) fn first_line(text: &str) -> &str {
    text.split('\n').next().unwrap_or(text).trim_end()
}
