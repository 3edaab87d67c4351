// Output data model: one record per tree node, in preorder, plus the
// per-invocation summary. Records are immutable once emitted. Each fact is
// stored exactly once; the packed taxonomy byte is a computed view
// (`Semantics::packed`), never independent state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::semantics::SemanticType;
use crate::strategy::NativeContext;

/// Where a node sits in the source text. Field population follows the
/// policy's source axis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSpan {
    /// Language id, populated at `SourceLevel::Path` and above.
    pub language: String,
    /// Byte offsets, populated at `SourceLevel::Lines` and above.
    pub start_byte: u32,
    pub end_byte: u32,
    /// 1-based lines, populated at `SourceLevel::LinesOnly` and above.
    pub start_line: u32,
    pub end_line: u32,
    /// 1-based columns, populated at `SourceLevel::Full` only.
    pub start_column: u32,
    pub end_column: u32,
}

/// A node's place in the tree. parent/depth/sibling are O(1) fields
/// (`StructureLevel::Minimal`); the counts require `StructureLevel::Full`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeStructure {
    /// None for the root.
    pub parent_id: Option<u32>,
    pub depth: u32,
    pub sibling_index: u32,
    pub children_count: u32,
    pub descendant_count: u32,
}

/// The three-field semantic classification value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Semantics {
    pub code: SemanticType,
    pub flags: u8,
    pub arity_bin: u8,
}

impl Semantics {
    /// The compact byte form consumed by columnar tooling. Derived, never
    /// stored.
    pub fn packed(&self) -> u8 {
        self.code.encode()
    }
}

impl Default for Semantics {
    fn default() -> Self {
        Semantics {
            code: SemanticType::decode(0),
            flags: 0,
            arity_bin: 0,
        }
    }
}

/// One flattened tree node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Position in the output sequence; stable index.
    pub id: u32,
    /// The grammar's own node-type string.
    pub raw_type: String,
    /// Taxonomy name derived from the classification, e.g.
    /// "DEFINITION_FUNCTION". Empty below `ContextLevel::NodeTypesOnly`.
    pub normalized_type: String,
    /// Extracted node name, `ContextLevel::Normalized` and above.
    pub name: String,
    pub span: SourceSpan,
    pub structure: TreeStructure,
    #[serde(default)]
    pub semantics: Semantics,
    /// Strategy-driven structured context. Populated only at
    /// `ContextLevel::Native` and only for nodes whose category carries a
    /// strategy.
    pub native: Option<NativeContext>,
    /// True when a strategy ran for this node, even if it found nothing.
    /// False when no strategy was attached to the node's category.
    pub extraction_attempted: bool,
    pub preview: String,
}

/// The full result of flattening one tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseResult {
    pub nodes: Vec<NodeRecord>,
    pub node_count: usize,
    pub max_depth: u32,
    /// Wall-clock time the parse started.
    pub parsed_at: DateTime<Utc>,
}

impl ParseResult {
    /// Direct children of the node at `parent`, in sibling order.
    pub fn children(&self, parent: u32) -> impl Iterator<Item = &NodeRecord> {
        self.nodes
            .iter()
            .filter(move |n| n.structure.parent_id == Some(parent))
    }

    pub fn root(&self) -> Option<&NodeRecord> {
        self.nodes.first()
    }
}
