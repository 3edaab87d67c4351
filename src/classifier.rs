// Per-language semantic classification
//
// Maps a grammar's raw node-type string to a taxonomy code, universal
// flags, and a strategy tag. Tables are built once when a language
// registers and never mutated; the registry hands out shared references,
// so concurrent lookups need no synchronization.
//
// Classification is total: an exact table hit wins, otherwise an ordered
// suffix-based fallback chain assigns a deterministic code, bottoming out
// at the reserved parser-specific construct with no strategy.

use std::collections::HashMap;

use crate::semantics::SemanticType;
use crate::strategy::Category;

/// Classification outcome for one node type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeConfig {
    pub semantics: SemanticType,
    /// Universal flags, possibly including the table-only
    /// `flags::KEYWORD_IF_LEAF` marker the engine resolves at emission.
    pub flags: u8,
    pub strategy: Category,
}

impl NodeConfig {
    pub const fn new(semantics: SemanticType) -> NodeConfig {
        NodeConfig {
            semantics,
            flags: 0,
            strategy: Category::None,
        }
    }

    pub const fn with_flags(semantics: SemanticType, flags: u8) -> NodeConfig {
        NodeConfig {
            semantics,
            flags,
            strategy: Category::None,
        }
    }

    pub const fn with_strategy(semantics: SemanticType, strategy: Category) -> NodeConfig {
        NodeConfig {
            semantics,
            flags: 0,
            strategy,
        }
    }

    pub const fn full(semantics: SemanticType, flags: u8, strategy: Category) -> NodeConfig {
        NodeConfig {
            semantics,
            flags,
            strategy,
        }
    }
}

const FALLBACK_DEFINITION: NodeConfig = NodeConfig::new(SemanticType::DEFINITION_FUNCTION);
const FALLBACK_EXPRESSION: NodeConfig = NodeConfig::new(SemanticType::COMPUTATION_EXPRESSION);
const FALLBACK_STATEMENT: NodeConfig = NodeConfig::new(SemanticType::EXECUTION_STATEMENT);
const FALLBACK_IDENTIFIER: NodeConfig = NodeConfig::new(SemanticType::NAME_IDENTIFIER);
/// Reserved code for node types nothing else matches.
const FALLBACK_UNKNOWN: NodeConfig = NodeConfig::new(SemanticType::PARSER_CONSTRUCT);

/// Immutable node-type lookup table for one language.
#[derive(Debug)]
pub struct Classifier {
    table: HashMap<&'static str, NodeConfig>,
}

impl Classifier {
    pub fn from_table(entries: &[(&'static str, NodeConfig)]) -> Classifier {
        Classifier {
            table: entries.iter().copied().collect(),
        }
    }

    /// Classify a raw node-type string. Total and deterministic: every
    /// input yields a config.
    pub fn classify(&self, raw_type: &str) -> NodeConfig {
        if let Some(config) = self.table.get(raw_type) {
            return *config;
        }
        if raw_type.ends_with("_declaration") || raw_type.ends_with("_definition") {
            return FALLBACK_DEFINITION;
        }
        if raw_type.ends_with("_expression") {
            return FALLBACK_EXPRESSION;
        }
        if raw_type.ends_with("_statement") {
            return FALLBACK_STATEMENT;
        }
        if raw_type == "identifier" || raw_type.ends_with("_identifier") {
            return FALLBACK_IDENTIFIER;
        }
        FALLBACK_UNKNOWN
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
