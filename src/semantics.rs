// Semantic taxonomy for cross-language node classification
//
// Every grammar node type collapses into one of 16 KINDs, arranged in four
// conceptual bands (data/structure, computation, control/effects,
// meta/external), each refined by a 2-bit subtype. The canonical
// representation is the typed `SemanticType` struct; the packed byte used by
// columnar consumers is produced on demand by `encode()` and is never stored
// independently.
//
// Packed byte layout (matches the encoding downstream tooling groups by):
//   bits 6-7: band, bits 4-5: kind within band, bits 2-3: subtype,
//   bits 0-1: reserved refinement (always zero here).

use serde::{Deserialize, Serialize};

/// Top-level conceptual band, two bits of the packed byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Band {
    DataStructure,
    Computation,
    ControlEffects,
    MetaExternal,
}

/// The 16 semantic KINDs, four per band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Kind {
    // Data & structure
    Literal = 0,
    Name = 1,
    Pattern = 2,
    Type = 3,
    // Computation
    Operator = 4,
    Computation = 5,
    Transform = 6,
    Definition = 7,
    // Control & effects
    Execution = 8,
    FlowControl = 9,
    ErrorHandling = 10,
    Organization = 11,
    // Meta & external
    Metadata = 12,
    External = 13,
    ParserSpecific = 14,
    Reserved = 15,
}

impl Kind {
    pub fn band(self) -> Band {
        match (self as u8) >> 2 {
            0 => Band::DataStructure,
            1 => Band::Computation,
            2 => Band::ControlEffects,
            _ => Band::MetaExternal,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Kind::Literal => "LITERAL",
            Kind::Name => "NAME",
            Kind::Pattern => "PATTERN",
            Kind::Type => "TYPE",
            Kind::Operator => "OPERATOR",
            Kind::Computation => "COMPUTATION",
            Kind::Transform => "TRANSFORM",
            Kind::Definition => "DEFINITION",
            Kind::Execution => "EXECUTION",
            Kind::FlowControl => "FLOW_CONTROL",
            Kind::ErrorHandling => "ERROR_HANDLING",
            Kind::Organization => "ORGANIZATION",
            Kind::Metadata => "METADATA",
            Kind::External => "EXTERNAL",
            Kind::ParserSpecific => "PARSER_SPECIFIC",
            Kind::Reserved => "RESERVED",
        }
    }

    fn from_bits(bits: u8) -> Kind {
        match bits & 0x0F {
            0 => Kind::Literal,
            1 => Kind::Name,
            2 => Kind::Pattern,
            3 => Kind::Type,
            4 => Kind::Operator,
            5 => Kind::Computation,
            6 => Kind::Transform,
            7 => Kind::Definition,
            8 => Kind::Execution,
            9 => Kind::FlowControl,
            10 => Kind::ErrorHandling,
            11 => Kind::Organization,
            12 => Kind::Metadata,
            13 => Kind::External,
            14 => Kind::ParserSpecific,
            _ => Kind::Reserved,
        }
    }
}

/// One taxonomy code: a KIND plus its 2-bit subtype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SemanticType {
    pub kind: Kind,
    pub subtype: u8,
}

impl SemanticType {
    pub const fn new(kind: Kind, subtype: u8) -> SemanticType {
        SemanticType { kind, subtype }
    }

    // LITERAL
    pub const LITERAL_NUMBER: SemanticType = SemanticType::new(Kind::Literal, 0);
    pub const LITERAL_STRING: SemanticType = SemanticType::new(Kind::Literal, 1);
    pub const LITERAL_ATOMIC: SemanticType = SemanticType::new(Kind::Literal, 2);
    pub const LITERAL_STRUCTURED: SemanticType = SemanticType::new(Kind::Literal, 3);
    // NAME
    pub const NAME_KEYWORD: SemanticType = SemanticType::new(Kind::Name, 0);
    pub const NAME_IDENTIFIER: SemanticType = SemanticType::new(Kind::Name, 1);
    pub const NAME_QUALIFIED: SemanticType = SemanticType::new(Kind::Name, 2);
    pub const NAME_SCOPED: SemanticType = SemanticType::new(Kind::Name, 3);
    // PATTERN
    pub const PATTERN_DESTRUCTURE: SemanticType = SemanticType::new(Kind::Pattern, 0);
    pub const PATTERN_MATCH: SemanticType = SemanticType::new(Kind::Pattern, 1);
    pub const PATTERN_TEMPLATE: SemanticType = SemanticType::new(Kind::Pattern, 2);
    pub const PATTERN_GUARD: SemanticType = SemanticType::new(Kind::Pattern, 3);
    // TYPE
    pub const TYPE_PRIMITIVE: SemanticType = SemanticType::new(Kind::Type, 0);
    pub const TYPE_COMPOSITE: SemanticType = SemanticType::new(Kind::Type, 1);
    pub const TYPE_REFERENCE: SemanticType = SemanticType::new(Kind::Type, 2);
    pub const TYPE_GENERIC: SemanticType = SemanticType::new(Kind::Type, 3);
    // OPERATOR
    pub const OPERATOR_ARITHMETIC: SemanticType = SemanticType::new(Kind::Operator, 0);
    pub const OPERATOR_LOGICAL: SemanticType = SemanticType::new(Kind::Operator, 1);
    pub const OPERATOR_COMPARISON: SemanticType = SemanticType::new(Kind::Operator, 2);
    pub const OPERATOR_ASSIGNMENT: SemanticType = SemanticType::new(Kind::Operator, 3);
    // COMPUTATION
    pub const COMPUTATION_CALL: SemanticType = SemanticType::new(Kind::Computation, 0);
    pub const COMPUTATION_ACCESS: SemanticType = SemanticType::new(Kind::Computation, 1);
    pub const COMPUTATION_EXPRESSION: SemanticType = SemanticType::new(Kind::Computation, 2);
    pub const COMPUTATION_LAMBDA: SemanticType = SemanticType::new(Kind::Computation, 3);
    // TRANSFORM
    pub const TRANSFORM_QUERY: SemanticType = SemanticType::new(Kind::Transform, 0);
    pub const TRANSFORM_ITERATION: SemanticType = SemanticType::new(Kind::Transform, 1);
    pub const TRANSFORM_PROJECTION: SemanticType = SemanticType::new(Kind::Transform, 2);
    pub const TRANSFORM_AGGREGATION: SemanticType = SemanticType::new(Kind::Transform, 3);
    // DEFINITION
    pub const DEFINITION_FUNCTION: SemanticType = SemanticType::new(Kind::Definition, 0);
    pub const DEFINITION_VARIABLE: SemanticType = SemanticType::new(Kind::Definition, 1);
    pub const DEFINITION_CLASS: SemanticType = SemanticType::new(Kind::Definition, 2);
    pub const DEFINITION_MODULE: SemanticType = SemanticType::new(Kind::Definition, 3);
    // EXECUTION
    pub const EXECUTION_STATEMENT: SemanticType = SemanticType::new(Kind::Execution, 0);
    pub const EXECUTION_DECLARATION: SemanticType = SemanticType::new(Kind::Execution, 1);
    pub const EXECUTION_INVOCATION: SemanticType = SemanticType::new(Kind::Execution, 2);
    pub const EXECUTION_MUTATION: SemanticType = SemanticType::new(Kind::Execution, 3);
    // FLOW_CONTROL
    pub const FLOW_CONDITIONAL: SemanticType = SemanticType::new(Kind::FlowControl, 0);
    pub const FLOW_LOOP: SemanticType = SemanticType::new(Kind::FlowControl, 1);
    pub const FLOW_JUMP: SemanticType = SemanticType::new(Kind::FlowControl, 2);
    pub const FLOW_SYNC: SemanticType = SemanticType::new(Kind::FlowControl, 3);
    // ERROR_HANDLING
    pub const ERROR_TRY: SemanticType = SemanticType::new(Kind::ErrorHandling, 0);
    pub const ERROR_CATCH: SemanticType = SemanticType::new(Kind::ErrorHandling, 1);
    pub const ERROR_THROW: SemanticType = SemanticType::new(Kind::ErrorHandling, 2);
    pub const ERROR_FINALLY: SemanticType = SemanticType::new(Kind::ErrorHandling, 3);
    // ORGANIZATION
    pub const ORGANIZATION_BLOCK: SemanticType = SemanticType::new(Kind::Organization, 0);
    pub const ORGANIZATION_LIST: SemanticType = SemanticType::new(Kind::Organization, 1);
    pub const ORGANIZATION_SECTION: SemanticType = SemanticType::new(Kind::Organization, 2);
    pub const ORGANIZATION_CONTAINER: SemanticType = SemanticType::new(Kind::Organization, 3);
    // METADATA
    pub const METADATA_COMMENT: SemanticType = SemanticType::new(Kind::Metadata, 0);
    pub const METADATA_ANNOTATION: SemanticType = SemanticType::new(Kind::Metadata, 1);
    pub const METADATA_DIRECTIVE: SemanticType = SemanticType::new(Kind::Metadata, 2);
    pub const METADATA_DEBUG: SemanticType = SemanticType::new(Kind::Metadata, 3);
    // EXTERNAL
    pub const EXTERNAL_IMPORT: SemanticType = SemanticType::new(Kind::External, 0);
    pub const EXTERNAL_EXPORT: SemanticType = SemanticType::new(Kind::External, 1);
    pub const EXTERNAL_FOREIGN: SemanticType = SemanticType::new(Kind::External, 2);
    pub const EXTERNAL_EMBED: SemanticType = SemanticType::new(Kind::External, 3);
    // PARSER_SPECIFIC
    pub const PARSER_PUNCTUATION: SemanticType = SemanticType::new(Kind::ParserSpecific, 0);
    pub const PARSER_DELIMITER: SemanticType = SemanticType::new(Kind::ParserSpecific, 1);
    pub const PARSER_SYNTAX: SemanticType = SemanticType::new(Kind::ParserSpecific, 2);
    /// Reserved code for unrecognized grammar node types.
    pub const PARSER_CONSTRUCT: SemanticType = SemanticType::new(Kind::ParserSpecific, 3);

    /// Packed byte view of this code. Pure function of the struct; the low
    /// two refinement bits are reserved and always zero.
    pub const fn encode(self) -> u8 {
        ((self.kind as u8) << 4) | ((self.subtype & 0x03) << 2)
    }

    /// Inverse of `encode`. Refinement bits are ignored.
    pub fn decode(byte: u8) -> SemanticType {
        SemanticType {
            kind: Kind::from_bits(byte >> 4),
            subtype: (byte >> 2) & 0x03,
        }
    }

    /// Human-readable name, e.g. "DEFINITION_FUNCTION".
    pub fn name(self) -> &'static str {
        const NAMES: [[&str; 4]; 16] = [
            ["LITERAL_NUMBER", "LITERAL_STRING", "LITERAL_ATOMIC", "LITERAL_STRUCTURED"],
            ["NAME_KEYWORD", "NAME_IDENTIFIER", "NAME_QUALIFIED", "NAME_SCOPED"],
            ["PATTERN_DESTRUCTURE", "PATTERN_MATCH", "PATTERN_TEMPLATE", "PATTERN_GUARD"],
            ["TYPE_PRIMITIVE", "TYPE_COMPOSITE", "TYPE_REFERENCE", "TYPE_GENERIC"],
            ["OPERATOR_ARITHMETIC", "OPERATOR_LOGICAL", "OPERATOR_COMPARISON", "OPERATOR_ASSIGNMENT"],
            ["COMPUTATION_CALL", "COMPUTATION_ACCESS", "COMPUTATION_EXPRESSION", "COMPUTATION_LAMBDA"],
            ["TRANSFORM_QUERY", "TRANSFORM_ITERATION", "TRANSFORM_PROJECTION", "TRANSFORM_AGGREGATION"],
            ["DEFINITION_FUNCTION", "DEFINITION_VARIABLE", "DEFINITION_CLASS", "DEFINITION_MODULE"],
            ["EXECUTION_STATEMENT", "EXECUTION_DECLARATION", "EXECUTION_INVOCATION", "EXECUTION_MUTATION"],
            ["FLOW_CONDITIONAL", "FLOW_LOOP", "FLOW_JUMP", "FLOW_SYNC"],
            ["ERROR_TRY", "ERROR_CATCH", "ERROR_THROW", "ERROR_FINALLY"],
            ["ORGANIZATION_BLOCK", "ORGANIZATION_LIST", "ORGANIZATION_SECTION", "ORGANIZATION_CONTAINER"],
            ["METADATA_COMMENT", "METADATA_ANNOTATION", "METADATA_DIRECTIVE", "METADATA_DEBUG"],
            ["EXTERNAL_IMPORT", "EXTERNAL_EXPORT", "EXTERNAL_FOREIGN", "EXTERNAL_EMBED"],
            ["PARSER_PUNCTUATION", "PARSER_DELIMITER", "PARSER_SYNTAX", "PARSER_CONSTRUCT"],
            ["RESERVED_FUTURE1", "RESERVED_FUTURE2", "RESERVED_FUTURE3", "RESERVED_FUTURE4"],
        ];
        NAMES[self.kind as usize][(self.subtype & 0x03) as usize]
    }

    pub fn is_definition(self) -> bool {
        self.kind == Kind::Definition
    }

    pub fn is_call(self) -> bool {
        self == SemanticType::COMPUTATION_CALL || self == SemanticType::EXECUTION_INVOCATION
    }

    pub fn is_control_flow(self) -> bool {
        matches!(self.kind, Kind::FlowControl | Kind::ErrorHandling)
    }

    pub fn is_identifier(self) -> bool {
        self.kind == Kind::Name
    }

    pub fn is_literal(self) -> bool {
        self.kind == Kind::Literal
    }

    pub fn is_operator(self) -> bool {
        self.kind == Kind::Operator
    }

    pub fn is_external(self) -> bool {
        self.kind == Kind::External
    }

    pub fn is_metadata(self) -> bool {
        self.kind == Kind::Metadata
    }
}

/// Orthogonal boolean node properties, independent of KIND.
pub mod flags {
    /// Reserved language keyword (def, class, if, unsafe, ...).
    pub const IS_KEYWORD: u8 = 0x01;
    /// Externally visible/exported (pub, export, capitalized Go names, ...).
    pub const IS_PUBLIC: u8 = 0x02;
    /// Unsafe operation (Rust unsafe blocks, raw pointer ops, ...).
    pub const IS_UNSAFE: u8 = 0x04;
    /// Reserved for a future orthogonal property.
    pub const RESERVED: u8 = 0x08;
    /// Table-only marker: becomes IS_KEYWORD when the node turns out to be a
    /// leaf. Covers tokens that are keywords when standalone but containers
    /// in other grammar positions. Resolved at emission; never appears in
    /// output flags.
    pub const KEYWORD_IF_LEAF: u8 = 0x10;

    /// Mask of flags that may appear in emitted records.
    pub const OUTPUT_MASK: u8 = IS_KEYWORD | IS_PUBLIC | IS_UNSAFE | RESERVED;
}

/// Fibonacci-style binning of a node's child count into 3 bits.
///
/// Small counts get their own bin, larger counts compress logarithmically:
/// 0, 1, 2, 3, 4-5, 6-8, 9-13, 14+.
pub fn bin_arity(count: u32) -> u8 {
    match count {
        0 => 0,
        1 => 1,
        2 => 2,
        3 => 3,
        4..=5 => 4,
        6..=8 => 5,
        9..=13 => 6,
        _ => 7,
    }
}
