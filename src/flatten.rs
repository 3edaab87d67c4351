// Flattening engine
//
// Walks a parse tree once, explicit-stack and iterative, emitting one
// record per node in preorder. Each stack entry is visited twice: the first
// visit emits the record and pushes children in reverse (so siblings come
// off the stack left to right); the second visit, after the whole subtree
// has been emitted, computes the descendant count in O(1) from the output
// length. Preorder guarantees a node's descendants occupy exactly the
// output indices between its own index and the current end, so the whole
// traversal is O(n) in node count rather than O(n * depth).
//
// Policy gating here is a performance contract, not a filter: a field group
// the policy does not request is never computed - no strategy call, no
// point lookup, no preview slice.

use chrono::Utc;
use tracing::debug;
use tree_sitter::Node;

use crate::policy::{ContextLevel, ExtractionPolicy, PreviewLevel, SourceLevel, StructureLevel};
use crate::preview;
use crate::record::{NodeRecord, ParseResult, Semantics, SourceSpan, TreeStructure};
use crate::registry::{self, LanguageSupport};
use crate::semantics::{bin_arity, flags};
use crate::strategy::{node_text, Category, NativeContext};
use crate::tree::{ParseError, ParseTree};

/// Parse `source` as `language` and flatten the tree in one call. This is
/// the main entry point.
pub fn parse_to_records(
    language: &str,
    source: &str,
    policy: &ExtractionPolicy,
) -> Result<ParseResult, ParseError> {
    // wall-clock start of the whole parse, not of the flattening pass
    let parsed_at = Utc::now();
    let support =
        registry::lookup(language).ok_or_else(|| ParseError::UnknownLanguage(language.into()))?;
    let tree = ParseTree::parse(support, source)?;
    let mut result = flatten(&tree, source, support, policy);
    result.parsed_at = parsed_at;
    Ok(result)
}

#[derive(Clone, Copy)]
struct StackEntry<'t> {
    node: Node<'t>,
    parent_id: Option<u32>,
    depth: u32,
    sibling_index: u32,
    visited: bool,
    record_index: usize,
}

/// Flatten an already-parsed tree. The tree handle is exclusively owned by
/// this invocation; records are immutable once pushed.
pub fn flatten(
    tree: &ParseTree,
    source: &str,
    support: &LanguageSupport,
    policy: &ExtractionPolicy,
) -> ParseResult {
    let parsed_at = Utc::now();
    let mut nodes: Vec<NodeRecord> = Vec::new();
    let mut max_depth: u32 = 0;

    let mut stack = vec![StackEntry {
        node: tree.root(),
        parent_id: None,
        depth: 0,
        sibling_index: 0,
        visited: false,
        record_index: 0,
    }];

    loop {
        let entry = match stack.last_mut() {
            Some(top) if !top.visited => {
                top.visited = true;
                top.record_index = nodes.len();
                *top
            }
            Some(top) => {
                // Second visit: the subtree is fully emitted, so every
                // record past this one is a descendant.
                if policy.structure >= StructureLevel::Full {
                    let count = nodes.len() - top.record_index - 1;
                    nodes[top.record_index].structure.descendant_count = count as u32;
                }
                stack.pop();
                continue;
            }
            None => break,
        };

        max_depth = max_depth.max(entry.depth);
        let id = entry.record_index as u32;
        let child_count = entry.node.child_count() as u32;

        let mut record = NodeRecord {
            id,
            raw_type: entry.node.kind().to_string(),
            ..NodeRecord::default()
        };
        record.span = build_span(entry.node, support, policy);
        record.structure = build_structure(&entry, child_count, policy);
        populate_context(&mut record, entry.node, source, support, policy, child_count);
        record.preview = build_preview(entry.node, source, policy);
        nodes.push(record);

        // Children pushed in reverse so the stack pops them left to right.
        for i in (0..entry.node.child_count()).rev() {
            if let Some(child) = entry.node.child(i) {
                stack.push(StackEntry {
                    node: child,
                    parent_id: Some(id),
                    depth: entry.depth + 1,
                    sibling_index: i as u32,
                    visited: false,
                    record_index: 0,
                });
            }
        }
    }

    debug!(
        language = support.name,
        node_count = nodes.len(),
        max_depth,
        "flattened parse tree"
    );

    ParseResult {
        node_count: nodes.len(),
        max_depth,
        parsed_at,
        nodes,
    }
}

fn build_span(node: Node, support: &LanguageSupport, policy: &ExtractionPolicy) -> SourceSpan {
    let mut span = SourceSpan::default();
    if policy.source >= SourceLevel::Path {
        span.language = support.name.to_string();
    }
    if policy.source >= SourceLevel::LinesOnly {
        let start = node.start_position();
        let end = node.end_position();
        span.start_line = start.row as u32 + 1;
        span.end_line = end.row as u32 + 1;
        if policy.source >= SourceLevel::Lines {
            span.start_byte = node.start_byte() as u32;
            span.end_byte = node.end_byte() as u32;
        }
        if policy.source >= SourceLevel::Full {
            span.start_column = start.column as u32 + 1;
            span.end_column = end.column as u32 + 1;
        }
    }
    span
}

fn build_structure(
    entry: &StackEntry,
    child_count: u32,
    policy: &ExtractionPolicy,
) -> TreeStructure {
    let mut structure = TreeStructure::default();
    if policy.structure >= StructureLevel::Minimal {
        structure.parent_id = entry.parent_id;
        structure.depth = entry.depth;
        structure.sibling_index = entry.sibling_index;
        if policy.structure >= StructureLevel::Full {
            structure.children_count = child_count;
            // descendant_count is filled in on the second visit
        }
    }
    structure
}

fn populate_context(
    record: &mut NodeRecord,
    node: Node,
    source: &str,
    support: &LanguageSupport,
    policy: &ExtractionPolicy,
    child_count: u32,
) {
    if policy.context < ContextLevel::NodeTypesOnly {
        return;
    }
    let config = support.classifier.classify(&record.raw_type);

    let mut node_flags = config.flags;
    // A token marked keyword-if-leaf is only a keyword when it actually has
    // no children here; the conditional marker itself never reaches output.
    if node_flags & flags::KEYWORD_IF_LEAF != 0 {
        node_flags &= !flags::KEYWORD_IF_LEAF;
        if child_count == 0 {
            node_flags |= flags::IS_KEYWORD;
        }
    }

    record.semantics = Semantics {
        code: config.semantics,
        flags: node_flags & flags::OUTPUT_MASK,
        arity_bin: bin_arity(child_count),
    };
    record.normalized_type = config.semantics.name().to_string();

    if policy.context >= ContextLevel::Normalized {
        record.name = extract_name(node, source);
    }

    if policy.context >= ContextLevel::Native && config.strategy != Category::None {
        if let Some(strategy) = support.strategies.resolve(config.strategy) {
            record.extraction_attempted = true;
            record.native = Some(match strategy(node, source) {
                Ok(context) => context,
                Err(err) => {
                    debug!(
                        node_type = %record.raw_type,
                        error = %err,
                        "native context extraction failed, emitting empty context"
                    );
                    NativeContext::default()
                }
            });
        }
    }
}

/// Best-effort node name: the grammar's "name" field if bound, else the
/// first identifier-ish child, else a leading identifier token of the
/// node's own text.
fn extract_name(node: Node, source: &str) -> String {
    if let Some(name_node) = node.child_by_field_name("name") {
        return node_text(name_node, source);
    }
    for i in 0..node.child_count() {
        if let Some(child) = node.child(i) {
            let kind = child.kind();
            if kind == "identifier" || kind.ends_with("_identifier") {
                return node_text(child, source);
            }
        }
    }
    let kind = node.kind();
    if kind == "identifier" || kind.ends_with("_identifier") {
        return node_text(node, source);
    }
    leading_identifier(node_text(node, source).trim())
}

fn leading_identifier(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' || first == '$' => {}
        _ => return String::new(),
    }
    text.chars()
        .take_while(|c| c.is_alphanumeric() || *c == '_' || *c == '$')
        .collect()
}

fn build_preview(node: Node, source: &str, policy: &ExtractionPolicy) -> String {
    if policy.preview == PreviewLevel::None {
        return String::new();
    }
    match source.as_bytes().get(node.start_byte()..node.end_byte()) {
        Some(slice) => preview::generate(slice, policy.preview, policy.preview_budget),
        None => String::new(),
    }
}
