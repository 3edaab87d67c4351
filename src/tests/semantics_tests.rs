// Taxonomy tests: packed byte layout, names, bands, arity binning.

use crate::semantics::{bin_arity, flags, Band, Kind, SemanticType};

mod packed_byte {
    use super::*;

    #[test]
    fn encode_places_kind_and_subtype_in_the_documented_bits() {
        assert_eq!(SemanticType::LITERAL_NUMBER.encode(), 0x00);
        assert_eq!(SemanticType::LITERAL_STRING.encode(), 0x04);
        assert_eq!(SemanticType::DEFINITION_FUNCTION.encode(), 0x70);
        assert_eq!(SemanticType::DEFINITION_CLASS.encode(), 0x78);
        assert_eq!(SemanticType::PARSER_CONSTRUCT.encode(), 0xEC);
    }

    #[test]
    fn refinement_bits_are_always_zero() {
        for kind_bits in 0u8..16 {
            for subtype in 0u8..4 {
                let code = SemanticType::decode((kind_bits << 4) | (subtype << 2));
                assert_eq!(code.encode() & 0x03, 0);
            }
        }
    }

    #[test]
    fn decode_inverts_encode_for_every_code() {
        for kind_bits in 0u8..16 {
            for subtype in 0u8..4 {
                let byte = (kind_bits << 4) | (subtype << 2);
                assert_eq!(SemanticType::decode(byte).encode(), byte);
            }
        }
    }

    #[test]
    fn decode_ignores_refinement_bits() {
        let a = SemanticType::decode(0x70);
        let b = SemanticType::decode(0x73);
        assert_eq!(a, b);
    }
}

mod bands {
    use super::*;

    #[test]
    fn each_band_holds_four_kinds() {
        assert_eq!(Kind::Literal.band(), Band::DataStructure);
        assert_eq!(Kind::Type.band(), Band::DataStructure);
        assert_eq!(Kind::Operator.band(), Band::Computation);
        assert_eq!(Kind::Definition.band(), Band::Computation);
        assert_eq!(Kind::Execution.band(), Band::ControlEffects);
        assert_eq!(Kind::Organization.band(), Band::ControlEffects);
        assert_eq!(Kind::Metadata.band(), Band::MetaExternal);
        assert_eq!(Kind::Reserved.band(), Band::MetaExternal);
    }
}

mod names {
    use super::*;

    #[test]
    fn names_combine_kind_and_subtype() {
        assert_eq!(SemanticType::DEFINITION_FUNCTION.name(), "DEFINITION_FUNCTION");
        assert_eq!(SemanticType::COMPUTATION_CALL.name(), "COMPUTATION_CALL");
        assert_eq!(SemanticType::FLOW_LOOP.name(), "FLOW_LOOP");
        assert_eq!(SemanticType::PARSER_CONSTRUCT.name(), "PARSER_CONSTRUCT");
    }

    #[test]
    fn every_code_has_a_nonempty_unique_name() {
        let mut seen = std::collections::HashSet::new();
        for kind_bits in 0u8..16 {
            for subtype in 0u8..4 {
                let name = SemanticType::decode((kind_bits << 4) | (subtype << 2)).name();
                assert!(!name.is_empty());
                assert!(seen.insert(name), "duplicate taxonomy name {}", name);
            }
        }
        assert_eq!(seen.len(), 64);
    }
}

mod predicates {
    use super::*;

    #[test]
    fn predicates_follow_the_kind() {
        assert!(SemanticType::DEFINITION_VARIABLE.is_definition());
        assert!(SemanticType::COMPUTATION_CALL.is_call());
        assert!(SemanticType::EXECUTION_INVOCATION.is_call());
        assert!(!SemanticType::COMPUTATION_ACCESS.is_call());
        assert!(SemanticType::FLOW_JUMP.is_control_flow());
        assert!(SemanticType::ERROR_CATCH.is_control_flow());
        assert!(SemanticType::NAME_IDENTIFIER.is_identifier());
        assert!(SemanticType::LITERAL_ATOMIC.is_literal());
        assert!(SemanticType::EXTERNAL_IMPORT.is_external());
    }
}

mod universal_flags {
    use super::*;

    #[test]
    fn output_mask_excludes_the_table_only_marker() {
        assert_eq!(flags::KEYWORD_IF_LEAF & flags::OUTPUT_MASK, 0);
        assert_eq!(
            flags::OUTPUT_MASK,
            flags::IS_KEYWORD | flags::IS_PUBLIC | flags::IS_UNSAFE | flags::RESERVED
        );
    }

    #[test]
    fn flags_are_disjoint_bits() {
        let all = [flags::IS_KEYWORD, flags::IS_PUBLIC, flags::IS_UNSAFE, flags::RESERVED];
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_eq!(a & b, 0);
            }
        }
    }
}

mod arity_binning {
    use super::*;

    #[test]
    fn bins_match_the_fibonacci_style_table() {
        let cases = [
            (0, 0),
            (1, 1),
            (2, 2),
            (3, 3),
            (4, 4),
            (5, 4),
            (6, 5),
            (7, 5),
            (8, 5),
            (9, 6),
            (13, 6),
            (14, 7),
            (20, 7),
            (1000, 7),
        ];
        for (count, bin) in cases {
            assert_eq!(bin_arity(count), bin, "child count {}", count);
        }
    }

    #[test]
    fn bins_are_monotone_in_child_count() {
        let mut last = 0;
        for count in 0..100 {
            let bin = bin_arity(count);
            assert!(bin >= last);
            assert!(bin <= 7);
            last = bin;
        }
    }
}
