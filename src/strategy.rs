// Strategy dispatch framework for native context extraction
//
// Each construct category the classifier recognizes may carry a strategy: a
// per-language routine that digs language-specific structure (signature,
// parameters, modifiers) out of a node. For a given (language, category)
// pair exactly one routine is resolved when the language registers, into a
// plain function-pointer slot; per node the engine does a tag comparison and
// a direct call, never a hash lookup or dynamic dispatch.
//
// Strategies are fallible but contained: a routine reports failure through
// its Result and the caller degrades to an empty context. A strategy must
// never index source text without a bounds check.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tree_sitter::Node;

/// Construct categories that can carry a strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    #[default]
    None,
    Function,
    Class,
    Variable,
    Call,
    Import,
}

/// Contained per-node extraction failure. Never escapes the dispatch site.
#[derive(Debug, Error)]
pub enum StrategyError {
    #[error("byte range {start}..{end} out of bounds for source of {len} bytes")]
    OutOfBounds { start: usize, end: usize, len: usize },
    #[error("no {expected} child under {node_kind} node")]
    MissingChild {
        node_kind: &'static str,
        expected: &'static str,
    },
    #[error("unexpected shape under {node_kind} node: {detail}")]
    UnexpectedShape {
        node_kind: &'static str,
        detail: String,
    },
}

pub type StrategyResult = Result<NativeContext, StrategyError>;

/// One extraction routine. Resolved per (language, category) at
/// registration time.
pub type StrategyFn = fn(Node, &str) -> StrategyResult;

/// The per-language strategy table: one optional routine per category.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrategySet {
    pub function: Option<StrategyFn>,
    pub class: Option<StrategyFn>,
    pub variable: Option<StrategyFn>,
    pub call: Option<StrategyFn>,
    pub import: Option<StrategyFn>,
}

impl StrategySet {
    pub fn resolve(&self, category: Category) -> Option<StrategyFn> {
        match category {
            Category::None => None,
            Category::Function => self.function,
            Category::Class => self.class,
            Category::Variable => self.variable,
            Category::Call => self.call,
            Category::Import => self.import,
        }
    }
}

/// One formal parameter in a signature.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub default_value: String,
    pub is_optional: bool,
    pub is_variadic: bool,
    /// JSON payload for language-specific metadata.
    pub annotations: String,
}

impl ParameterInfo {
    pub fn named(name: impl Into<String>) -> ParameterInfo {
        ParameterInfo {
            name: name.into(),
            ..ParameterInfo::default()
        }
    }
}

/// Language-specific structured context attached to a node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeContext {
    /// Return type for functions, declared type for variables, base kind
    /// for type definitions.
    pub signature_type: String,
    pub parameters: Vec<ParameterInfo>,
    /// Ordered, language-defined vocabulary: visibility, async, static, ...
    pub modifiers: Vec<String>,
    /// Best-effort qualified name, e.g. "MyType::my_method".
    pub qualified_name: String,
    /// JSON payload for decorators and other language-specific metadata.
    pub annotations: String,
}

// ---------------------------------------------------------------------------
// Shared helpers for strategy implementations. All source slicing here is
// bounds-checked; out-of-range offsets yield empty text.
// ---------------------------------------------------------------------------

/// Text of a node, or empty if its byte range does not fit the source.
pub fn node_text(node: Node, source: &str) -> String {
    match source.as_bytes().get(node.start_byte()..node.end_byte()) {
        Some(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        None => String::new(),
    }
}

/// Like `node_text`, but reports the bad range instead of swallowing it.
/// For strategies that cannot produce anything meaningful without the slice.
pub fn try_node_text(node: Node, source: &str) -> Result<String, StrategyError> {
    let (start, end) = (node.start_byte(), node.end_byte());
    source
        .as_bytes()
        .get(start..end)
        .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
        .ok_or(StrategyError::OutOfBounds {
            start,
            end,
            len: source.len(),
        })
}

/// First direct child with the given kind.
pub fn find_child<'a>(node: Node<'a>, kind: &str) -> Option<Node<'a>> {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).find(|c| c.kind() == kind);
    found
}

/// All direct children with the given kind, in order.
pub fn find_children<'a>(node: Node<'a>, kind: &str) -> Vec<Node<'a>> {
    let mut cursor = node.walk();
    node.children(&mut cursor)
        .filter(|c| c.kind() == kind)
        .collect()
}

/// Text of the child bound to a grammar field, if present.
pub fn field_text(node: Node, field: &str, source: &str) -> Option<String> {
    node.child_by_field_name(field)
        .map(|child| node_text(child, source))
}

/// True if the node has a direct child token of the given kind, e.g. an
/// "async" or "unsafe" keyword token.
pub fn has_child_token(node: Node, kind: &str) -> bool {
    find_child(node, kind).is_some()
}
