// Canopy's test infrastructure
//
// Unit and end-to-end tests for the flattening engine, the taxonomy, the
// classification fallback chain, previews, policies, and the per-language
// native context strategies.

use crate::policy::ExtractionPolicy;
use crate::record::ParseResult;

// Core engine and data model
pub mod classifier_tests;
pub mod flatten_tests;
pub mod semantics_tests;

pub mod rust_tests;

/// Parse a fixture or fail the test with the engine's own error message.
pub fn parse_fixture(language: &str, source: &str, policy: &ExtractionPolicy) -> ParseResult {
    crate::flatten::parse_to_records(language, source, policy)
        .unwrap_or_else(|e| panic!("failed to parse {} fixture: {}", language, e))
}

/// First record with the given raw node type, or fail the test.
pub fn find_node<'a>(
    result: &'a ParseResult,
    raw_type: &str,
) -> &'a crate::record::NodeRecord {
    result
        .nodes
        .iter()
        .find(|n| n.raw_type == raw_type)
        .unwrap_or_else(|| panic!("no {} node in parse output", raw_type))
}
