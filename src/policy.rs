// Extraction level policy
//
// Four independent ordered axes controlling how much detail the flattening
// engine computes per node. Each axis is monotone: a level populates every
// field group the levels below it populate, plus its own. The engine treats
// an unrequested group as a hard skip, not a post-filter.

use serde::{Deserialize, Serialize};

/// Source-location detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceLevel {
    None,
    /// Language id only.
    Path,
    /// Adds start/end lines, without byte offsets.
    LinesOnly,
    /// Adds start/end byte offsets.
    Lines,
    /// Everything, including columns.
    Full,
}

/// Tree-structure detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureLevel {
    None,
    /// parent_id, depth, sibling_index - all O(1).
    Minimal,
    /// Adds children_count and descendant_count.
    Full,
}

/// Semantic-context detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextLevel {
    None,
    /// Taxonomy code, universal flags, arity bin.
    NodeTypesOnly,
    /// Adds the extracted node name.
    Normalized,
    /// Adds strategy-driven native context.
    Native,
}

/// Preview detail. Levels only add content; `None` is the sole level that
/// leaves the preview empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreviewLevel {
    None,
    /// First line only.
    Line,
    /// Adaptive: whole text when short, truncated first line otherwise.
    Smart,
    /// Fixed 60-character budget with a whitespace-aware cut.
    Compact,
    /// The entire node text, unmodified.
    Full,
    /// Hard cut at a caller-supplied character budget.
    Custom,
}

/// The four-axis policy value handed to the flattening engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionPolicy {
    pub source: SourceLevel,
    pub structure: StructureLevel,
    pub context: ContextLevel,
    pub preview: PreviewLevel,
    /// Character budget for `PreviewLevel::Custom`.
    pub preview_budget: usize,
}

pub const DEFAULT_PREVIEW_BUDGET: usize = 120;

impl Default for ExtractionPolicy {
    fn default() -> Self {
        ExtractionPolicy {
            source: SourceLevel::Lines,
            structure: StructureLevel::Full,
            context: ContextLevel::Normalized,
            preview: PreviewLevel::Smart,
            preview_budget: DEFAULT_PREVIEW_BUDGET,
        }
    }
}

impl ExtractionPolicy {
    /// Bare preorder skeleton: ids only, no per-node computation.
    pub fn fastest() -> Self {
        ExtractionPolicy {
            source: SourceLevel::None,
            structure: StructureLevel::None,
            context: ContextLevel::None,
            preview: PreviewLevel::None,
            preview_budget: DEFAULT_PREVIEW_BUDGET,
        }
    }

    /// The default tier: lines, full structure, normalized context, smart
    /// previews.
    pub fn standard() -> Self {
        ExtractionPolicy::default()
    }

    /// Every axis at its highest level, including native context extraction.
    pub fn everything() -> Self {
        ExtractionPolicy {
            source: SourceLevel::Full,
            structure: StructureLevel::Full,
            context: ContextLevel::Native,
            preview: PreviewLevel::Full,
            preview_budget: DEFAULT_PREVIEW_BUDGET,
        }
    }

    pub fn with_preview(mut self, preview: PreviewLevel) -> Self {
        self.preview = preview;
        self
    }

    pub fn with_preview_budget(mut self, budget: usize) -> Self {
        self.preview = PreviewLevel::Custom;
        self.preview_budget = budget;
        self
    }
}
