//! Canopy - flattened syntax tree records.
//!
//! Canopy parses source code with tree-sitter and flattens the concrete
//! syntax tree into a preorder sequence of annotated node records suitable
//! for tabular analysis: structural metrics (depth, parent linkage,
//! descendant counts) computed in amortized O(1) per node, a compact
//! cross-language semantic taxonomy, and optional language-specific native
//! context (signatures, parameters, modifiers) behind a four-axis
//! extraction policy.

pub mod classifier;
pub mod flatten;
pub mod languages;
pub mod policy;
pub mod preview;
pub mod record;
pub mod registry;
pub mod semantics;
pub mod strategy;
pub mod tree;

#[cfg(test)]
mod tests;

// Re-export common types
pub use flatten::{flatten, parse_to_records};
pub use policy::{ContextLevel, ExtractionPolicy, PreviewLevel, SourceLevel, StructureLevel};
pub use record::{NodeRecord, ParseResult, Semantics, SourceSpan, TreeStructure};
pub use registry::{language_for_extension, lookup, supported_languages, LanguageSupport};
pub use semantics::{bin_arity, Band, Kind, SemanticType};
pub use strategy::{Category, NativeContext, ParameterInfo, StrategyError, StrategySet};
pub use tree::{ParseError, ParseTree};
