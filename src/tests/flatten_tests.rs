// Flattening engine tests: preorder shape, structural invariants, policy
// gating, and determinism.

use std::collections::HashMap;

use crate::flatten::parse_to_records;
use crate::policy::{
    ContextLevel, ExtractionPolicy, PreviewLevel, SourceLevel, StructureLevel,
};
use crate::record::ParseResult;
use crate::semantics::{bin_arity, flags};
use crate::tests::parse_fixture;
use crate::tree::ParseError;

const RUST_FIXTURE: &str = r#"
pub fn add(a: i32, b: i32) -> i32 {
    let total = a + b;
    total
}
"#;

fn full_parse(source: &str) -> ParseResult {
    parse_fixture("rust", source, &ExtractionPolicy::everything())
}

/// id -> id of every ancestor, from the emitted parent links.
fn ancestors(result: &ParseResult) -> HashMap<u32, Vec<u32>> {
    let parent: HashMap<u32, Option<u32>> = result
        .nodes
        .iter()
        .map(|n| (n.id, n.structure.parent_id))
        .collect();
    result
        .nodes
        .iter()
        .map(|n| {
            let mut chain = Vec::new();
            let mut current = parent[&n.id];
            while let Some(p) = current {
                chain.push(p);
                current = parent[&p];
            }
            (n.id, chain)
        })
        .collect()
}

mod preorder_shape {
    use super::*;

    #[test]
    fn ids_are_sequential_output_positions() {
        let result = full_parse(RUST_FIXTURE);
        for (i, node) in result.nodes.iter().enumerate() {
            assert_eq!(node.id as usize, i);
        }
        assert_eq!(result.node_count, result.nodes.len());
    }

    #[test]
    fn every_parent_precedes_its_children() {
        let result = full_parse(RUST_FIXTURE);
        for node in &result.nodes {
            if let Some(parent) = node.structure.parent_id {
                assert!(parent < node.id);
            }
        }
    }

    #[test]
    fn root_is_first_with_no_parent_and_full_coverage() {
        let result = full_parse(RUST_FIXTURE);
        let root = result.root().unwrap();
        assert_eq!(root.id, 0);
        assert_eq!(root.structure.parent_id, None);
        assert_eq!(root.structure.depth, 0);
        assert_eq!(root.structure.sibling_index, 0);
        assert_eq!(root.structure.descendant_count as usize, result.node_count - 1);
        assert_eq!(root.raw_type, "source_file");
    }

    #[test]
    fn siblings_appear_in_source_order() {
        let result = full_parse(RUST_FIXTURE);
        let root_children: Vec<_> = result.children(0).collect();
        for (i, child) in root_children.iter().enumerate() {
            assert_eq!(child.structure.sibling_index as usize, i);
        }
        for pair in root_children.windows(2) {
            assert!(pair[0].id < pair[1].id);
        }
    }

    #[test]
    fn max_depth_matches_the_deepest_record() {
        let result = full_parse(RUST_FIXTURE);
        let deepest = result.nodes.iter().map(|n| n.structure.depth).max().unwrap();
        assert_eq!(result.max_depth, deepest);
        assert!(deepest > 2, "fixture should nest a few levels");
    }
}

mod structural_invariants {
    use super::*;

    #[test]
    fn descendant_count_equals_subtree_size() {
        let result = full_parse(RUST_FIXTURE);
        let chains = ancestors(&result);
        for node in &result.nodes {
            let subtree = chains.values().filter(|c| c.contains(&node.id)).count();
            assert_eq!(
                node.structure.descendant_count as usize, subtree,
                "node {} ({})",
                node.id, node.raw_type
            );
        }
    }

    #[test]
    fn subtrees_are_contiguous_id_ranges() {
        let result = full_parse(RUST_FIXTURE);
        let chains = ancestors(&result);
        for node in &result.nodes {
            let last = node.id + node.structure.descendant_count;
            for other in &result.nodes {
                let inside = other.id > node.id && other.id <= last;
                let descends = chains[&other.id].contains(&node.id);
                assert_eq!(inside, descends, "node {} vs subtree of {}", other.id, node.id);
            }
        }
    }

    #[test]
    fn children_count_matches_parent_links_and_bounds_descendants() {
        let result = full_parse(RUST_FIXTURE);
        for node in &result.nodes {
            let children = result.children(node.id).count();
            assert_eq!(node.structure.children_count as usize, children);
            assert!(node.structure.children_count <= node.structure.descendant_count);
        }
    }

    #[test]
    fn leaves_have_zero_counts() {
        let result = full_parse(RUST_FIXTURE);
        let leaf = result
            .nodes
            .iter()
            .find(|n| n.raw_type == "integer_literal" || n.raw_type == "identifier");
        let leaf = leaf.expect("fixture has leaf tokens");
        assert_eq!(leaf.structure.children_count, 0);
        assert_eq!(leaf.structure.descendant_count, 0);
    }

    #[test]
    fn arity_bin_reflects_the_child_count() {
        let result = full_parse(RUST_FIXTURE);
        for node in &result.nodes {
            assert_eq!(node.semantics.arity_bin, bin_arity(node.structure.children_count));
        }
    }

    #[test]
    fn three_node_chain_end_to_end() {
        // module -> expression_statement -> identifier
        let result = parse_fixture("python", "x", &ExtractionPolicy::everything());
        assert_eq!(result.node_count, 3);
        let [a, b, c] = [&result.nodes[0], &result.nodes[1], &result.nodes[2]];
        assert_eq!((a.structure.parent_id, a.structure.depth), (None, 0));
        assert_eq!((b.structure.parent_id, b.structure.depth), (Some(0), 1));
        assert_eq!((c.structure.parent_id, c.structure.depth), (Some(1), 2));
        assert_eq!(a.structure.descendant_count, 2);
        assert_eq!(b.structure.descendant_count, 1);
        assert_eq!(c.structure.descendant_count, 0);
        assert_eq!(result.max_depth, 2);
    }
}

mod policy_gating {
    use super::*;

    fn with_source(level: SourceLevel) -> ExtractionPolicy {
        ExtractionPolicy {
            source: level,
            ..ExtractionPolicy::everything()
        }
    }

    #[test]
    fn source_axis_populates_incrementally() {
        let none = parse_fixture("rust", RUST_FIXTURE, &with_source(SourceLevel::None));
        let span = &none.nodes[1].span;
        assert!(span.language.is_empty());
        assert_eq!((span.start_line, span.end_line), (0, 0));

        let path = parse_fixture("rust", RUST_FIXTURE, &with_source(SourceLevel::Path));
        let span = &path.nodes[1].span;
        assert_eq!(span.language, "rust");
        assert_eq!((span.start_line, span.end_line), (0, 0));

        let lines_only = parse_fixture("rust", RUST_FIXTURE, &with_source(SourceLevel::LinesOnly));
        let span = &lines_only.nodes[1].span;
        assert_eq!(span.language, "rust");
        assert!(span.start_line >= 1 && span.end_line >= span.start_line);
        assert_eq!((span.start_byte, span.end_byte), (0, 0));

        let lines = parse_fixture("rust", RUST_FIXTURE, &with_source(SourceLevel::Lines));
        let span = &lines.nodes[1].span;
        assert!(span.start_line >= 1 && span.end_line >= span.start_line);
        assert!(span.end_byte > span.start_byte);
        assert_eq!((span.start_column, span.end_column), (0, 0));

        let full = parse_fixture("rust", RUST_FIXTURE, &with_source(SourceLevel::Full));
        let span = &full.nodes[1].span;
        assert!(span.start_column >= 1 && span.end_column >= 1);
    }

    #[test]
    fn lines_are_one_based() {
        let result = parse_fixture("rust", "fn a() {}", &ExtractionPolicy::everything());
        let root = result.root().unwrap();
        assert_eq!(root.span.start_line, 1);
        assert_eq!(root.span.start_column, 1);
    }

    #[test]
    fn structure_axis_populates_incrementally() {
        let policy = ExtractionPolicy {
            structure: StructureLevel::None,
            ..ExtractionPolicy::everything()
        };
        let none = parse_fixture("rust", RUST_FIXTURE, &policy);
        assert!(none.nodes[2].structure.parent_id.is_none());
        assert_eq!(none.nodes[2].structure.depth, 0);

        let policy = ExtractionPolicy {
            structure: StructureLevel::Minimal,
            ..ExtractionPolicy::everything()
        };
        let minimal = parse_fixture("rust", RUST_FIXTURE, &policy);
        assert!(minimal.nodes[2].structure.parent_id.is_some());
        assert_eq!(minimal.nodes[2].structure.descendant_count, 0);
        assert_eq!(minimal.root().unwrap().structure.descendant_count, 0);

        let full = full_parse(RUST_FIXTURE);
        assert!(full.root().unwrap().structure.descendant_count > 0);
    }

    #[test]
    fn context_axis_populates_incrementally() {
        let policy = ExtractionPolicy {
            context: ContextLevel::None,
            ..ExtractionPolicy::everything()
        };
        let none = parse_fixture("rust", RUST_FIXTURE, &policy);
        let function = none.nodes.iter().find(|n| n.raw_type == "function_item").unwrap();
        assert!(function.normalized_type.is_empty());
        assert!(function.name.is_empty());
        assert!(function.native.is_none());
        assert!(!function.extraction_attempted);
        assert_eq!(function.semantics.flags, 0);

        let policy = ExtractionPolicy {
            context: ContextLevel::NodeTypesOnly,
            ..ExtractionPolicy::everything()
        };
        let types_only = parse_fixture("rust", RUST_FIXTURE, &policy);
        let function = types_only.nodes.iter().find(|n| n.raw_type == "function_item").unwrap();
        assert_eq!(function.normalized_type, "DEFINITION_FUNCTION");
        assert!(function.name.is_empty());
        assert!(function.native.is_none());

        let policy = ExtractionPolicy {
            context: ContextLevel::Normalized,
            ..ExtractionPolicy::everything()
        };
        let normalized = parse_fixture("rust", RUST_FIXTURE, &policy);
        let function = normalized.nodes.iter().find(|n| n.raw_type == "function_item").unwrap();
        assert_eq!(function.name, "add");
        assert!(function.native.is_none());
        assert!(!function.extraction_attempted);

        let native = full_parse(RUST_FIXTURE);
        let function = native.nodes.iter().find(|n| n.raw_type == "function_item").unwrap();
        assert!(function.native.is_some());
        assert!(function.extraction_attempted);
    }

    #[test]
    fn nodes_without_a_strategy_never_attempt_extraction() {
        let result = full_parse(RUST_FIXTURE);
        let literal = result.nodes.iter().find(|n| n.raw_type == "binary_expression").unwrap();
        assert!(literal.native.is_none());
        assert!(!literal.extraction_attempted);
    }

    #[test]
    fn preview_axis_is_gated() {
        let policy = ExtractionPolicy::everything().with_preview(PreviewLevel::None);
        let none = parse_fixture("rust", RUST_FIXTURE, &policy);
        assert!(none.nodes.iter().all(|n| n.preview.is_empty()));

        let smart = parse_fixture(
            "rust",
            RUST_FIXTURE,
            &ExtractionPolicy::everything().with_preview(PreviewLevel::Smart),
        );
        assert!(!smart.root().unwrap().preview.is_empty());
    }
}

mod flag_resolution {
    use super::*;

    #[test]
    fn leaf_conditional_keyword_depends_on_child_count() {
        // "lambda" names both the expression node and its keyword token
        let result = parse_fixture("python", "f = lambda x: x\n", &ExtractionPolicy::everything());
        let lambdas: Vec<_> = result.nodes.iter().filter(|n| n.raw_type == "lambda").collect();
        assert!(lambdas.len() >= 2, "expression and token should both appear");
        for node in lambdas {
            let is_leaf = node.structure.children_count == 0;
            let flagged = node.semantics.flags & flags::IS_KEYWORD != 0;
            assert_eq!(is_leaf, flagged, "node {}", node.id);
        }
    }

    #[test]
    fn the_conditional_marker_never_reaches_output() {
        let result = parse_fixture("python", "f = lambda x: x\n", &ExtractionPolicy::everything());
        for node in &result.nodes {
            assert_eq!(node.semantics.flags & flags::KEYWORD_IF_LEAF, 0);
            assert_eq!(node.semantics.flags & !flags::OUTPUT_MASK, 0);
        }
    }

    #[test]
    fn unsafe_blocks_carry_the_unsafe_flag() {
        let source = "fn f() { unsafe { danger(); } }";
        let result = parse_fixture("rust", source, &ExtractionPolicy::everything());
        let block = result.nodes.iter().find(|n| n.raw_type == "unsafe_block").unwrap();
        assert_ne!(block.semantics.flags & flags::IS_UNSAFE, 0);
    }

    #[test]
    fn keyword_tokens_are_flagged() {
        let result = full_parse(RUST_FIXTURE);
        let keyword = result.nodes.iter().find(|n| n.raw_type == "fn").unwrap();
        assert_ne!(keyword.semantics.flags & flags::IS_KEYWORD, 0);
        assert_eq!(keyword.normalized_type, "NAME_KEYWORD");
    }
}

mod strategy_containment {
    use super::*;
    use crate::classifier::{Classifier, NodeConfig};
    use crate::flatten::flatten;
    use crate::registry::LanguageSupport;
    use crate::semantics::SemanticType;
    use crate::strategy::{Category, NativeContext, StrategyError, StrategyResult, StrategySet};
    use crate::tree::ParseTree;

    fn always_fails(_node: tree_sitter::Node, _source: &str) -> StrategyResult {
        Err(StrategyError::UnexpectedShape {
            node_kind: "function_item",
            detail: "forced failure".to_string(),
        })
    }

    fn support_with_failing_strategy() -> LanguageSupport {
        LanguageSupport {
            name: "rust",
            aliases: &[],
            extensions: &[],
            grammar: || tree_sitter_rust::LANGUAGE.into(),
            classifier: Classifier::from_table(&[(
                "function_item",
                NodeConfig::with_strategy(SemanticType::DEFINITION_FUNCTION, Category::Function),
            )]),
            strategies: StrategySet {
                function: Some(always_fails),
                ..StrategySet::default()
            },
        }
    }

    #[test]
    fn erroring_strategy_degrades_to_an_empty_context() {
        let support = support_with_failing_strategy();
        let source = "fn a() {}\nfn b() {}";
        let tree = ParseTree::parse(&support, source).unwrap();
        let result = flatten(&tree, source, &support, &ExtractionPolicy::everything());

        let functions: Vec<_> = result
            .nodes
            .iter()
            .filter(|n| n.raw_type == "function_item")
            .collect();
        assert_eq!(functions.len(), 2);
        for function in functions {
            assert!(function.extraction_attempted);
            assert_eq!(function.native.as_ref(), Some(&NativeContext::default()));
        }
        // the failure stays inside the node: the traversal and every other
        // record are intact
        let root = result.root().unwrap();
        assert_eq!(root.structure.descendant_count as usize, result.node_count - 1);
        assert!(result.nodes.iter().all(|n| (n.id as usize) < result.node_count));
    }
}

mod serialization {
    use super::*;

    #[test]
    fn packed_byte_is_a_view_of_the_taxonomy_code() {
        let result = full_parse(RUST_FIXTURE);
        for node in &result.nodes {
            assert_eq!(node.semantics.packed(), node.semantics.code.encode());
        }
    }

    #[test]
    fn records_round_trip_through_json() {
        let result = full_parse(RUST_FIXTURE);
        let json = serde_json::to_string(&result.nodes).unwrap();
        let back: Vec<crate::record::NodeRecord> = serde_json::from_str(&json).unwrap();
        assert_eq!(result.nodes, back);
    }

    #[test]
    fn parameter_type_serializes_under_the_type_key() {
        let param = crate::strategy::ParameterInfo {
            name: "count".into(),
            type_name: "u32".into(),
            ..Default::default()
        };
        let json = serde_json::to_value(&param).unwrap();
        assert_eq!(json["type"], "u32");
        assert!(json.get("type_name").is_none());
    }
}

mod determinism_and_errors {
    use super::*;

    #[test]
    fn identical_input_yields_identical_records() {
        let first = full_parse(RUST_FIXTURE);
        let second = full_parse(RUST_FIXTURE);
        assert_eq!(first.nodes, second.nodes);
        assert_eq!(first.max_depth, second.max_depth);
    }

    #[test]
    fn unknown_language_is_an_explicit_error() {
        let err = parse_to_records("cobol", "x", &ExtractionPolicy::standard()).unwrap_err();
        assert!(matches!(err, ParseError::UnknownLanguage(_)));
        assert!(err.to_string().contains("cobol"));
    }

    #[test]
    fn parse_timestamp_brackets_the_invocation() {
        let before = chrono::Utc::now();
        let result = parse_fixture("rust", RUST_FIXTURE, &ExtractionPolicy::standard());
        let after = chrono::Utc::now();
        assert!(result.parsed_at >= before);
        assert!(result.parsed_at <= after);
    }

    #[test]
    fn empty_source_still_produces_a_root() {
        let result = parse_fixture("rust", "", &ExtractionPolicy::everything());
        assert_eq!(result.node_count, 1);
        assert_eq!(result.root().unwrap().structure.descendant_count, 0);
    }
}
