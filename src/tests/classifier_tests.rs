// Classification tests: table hits, the suffix fallback chain, totality.

use crate::classifier::{Classifier, NodeConfig};
use crate::semantics::{flags, SemanticType};
use crate::strategy::Category;

fn classifier_with(entries: &[(&'static str, NodeConfig)]) -> Classifier {
    Classifier::from_table(entries)
}

mod table_lookup {
    use super::*;

    #[test]
    fn exact_match_wins_over_fallbacks() {
        let classifier = classifier_with(&[(
            "call_expression",
            NodeConfig::with_strategy(SemanticType::COMPUTATION_CALL, Category::Call),
        )]);
        let config = classifier.classify("call_expression");
        assert_eq!(config.semantics, SemanticType::COMPUTATION_CALL);
        assert_eq!(config.strategy, Category::Call);
    }

    #[test]
    fn table_entries_carry_flags_through() {
        let classifier = classifier_with(&[(
            "unsafe_block",
            NodeConfig::with_flags(SemanticType::ORGANIZATION_BLOCK, flags::IS_UNSAFE),
        )]);
        assert_eq!(classifier.classify("unsafe_block").flags, flags::IS_UNSAFE);
    }
}

mod fallback_chain {
    use super::*;

    #[test]
    fn declaration_and_definition_suffixes_fall_back_to_function() {
        let classifier = classifier_with(&[]);
        assert_eq!(
            classifier.classify("widget_declaration").semantics,
            SemanticType::DEFINITION_FUNCTION
        );
        assert_eq!(
            classifier.classify("widget_definition").semantics,
            SemanticType::DEFINITION_FUNCTION
        );
    }

    #[test]
    fn expression_suffix_falls_back_to_computation() {
        let classifier = classifier_with(&[]);
        assert_eq!(
            classifier.classify("widget_expression").semantics,
            SemanticType::COMPUTATION_EXPRESSION
        );
    }

    #[test]
    fn statement_suffix_falls_back_to_execution() {
        let classifier = classifier_with(&[]);
        assert_eq!(
            classifier.classify("widget_statement").semantics,
            SemanticType::EXECUTION_STATEMENT
        );
    }

    #[test]
    fn identifier_shapes_fall_back_to_name() {
        let classifier = classifier_with(&[]);
        assert_eq!(
            classifier.classify("identifier").semantics,
            SemanticType::NAME_IDENTIFIER
        );
        assert_eq!(
            classifier.classify("property_identifier").semantics,
            SemanticType::NAME_IDENTIFIER
        );
    }

    #[test]
    fn unknown_types_land_on_the_reserved_parser_construct() {
        let classifier = classifier_with(&[]);
        let config = classifier.classify("weird_node_123");
        assert_eq!(config.semantics, SemanticType::PARSER_CONSTRUCT);
        assert_eq!(config.strategy, Category::None);
        assert_eq!(config.flags, 0);
    }

    #[test]
    fn fallbacks_never_attach_a_strategy() {
        let classifier = classifier_with(&[]);
        for raw in [
            "widget_declaration",
            "widget_expression",
            "widget_statement",
            "odd_identifier",
            "completely_unknown",
        ] {
            assert_eq!(classifier.classify(raw).strategy, Category::None);
        }
    }

    #[test]
    fn classification_is_deterministic() {
        let classifier = classifier_with(&[]);
        for raw in ["alpha_expression", "beta", "{", ""] {
            assert_eq!(classifier.classify(raw), classifier.classify(raw));
        }
    }
}

mod registered_tables {
    use crate::registry;

    // Every registered language must classify nonsense node types without
    // panicking; totality is the whole point of the fallback chain.
    #[test]
    fn every_language_table_is_total() {
        for name in registry::supported_languages() {
            let support = registry::lookup(name).unwrap();
            assert!(!support.classifier.is_empty(), "{} table is empty", name);
            support.classifier.classify("definitely_not_a_grammar_node");
        }
    }
}
