// Rust classification and native context extraction tests.

use crate::policy::ExtractionPolicy;
use crate::tests::{find_node, parse_fixture};

fn extract(source: &str) -> crate::record::ParseResult {
    parse_fixture("rust", source, &ExtractionPolicy::everything())
}

mod functions {
    use super::*;

    #[test]
    fn free_function_signature() {
        let result = extract(
            r#"
pub async fn fetch(url: &str, retries: u32) -> Result<String, Error> {
    todo!()
}
"#,
        );
        let function = find_node(&result, "function_item");
        assert_eq!(function.normalized_type, "DEFINITION_FUNCTION");
        assert_eq!(function.name, "fetch");

        let native = function.native.as_ref().unwrap();
        assert_eq!(native.qualified_name, "fetch");
        assert_eq!(native.signature_type, "Result<String, Error>");
        assert_eq!(native.parameters.len(), 2);
        assert_eq!(native.parameters[0].name, "url");
        assert_eq!(native.parameters[0].type_name, "&str");
        assert_eq!(native.parameters[1].name, "retries");
        assert_eq!(native.parameters[1].type_name, "u32");
        assert!(native.modifiers.iter().any(|m| m == "pub"));
        assert!(native.modifiers.iter().any(|m| m == "async"));
    }

    #[test]
    fn method_qualifies_under_its_impl_type() {
        let result = extract(
            r#"
struct Config;

impl Config {
    fn load(&self, path: &str) -> Config {
        todo!()
    }
}
"#,
        );
        let method = find_node(&result, "function_item");
        let native = method.native.as_ref().unwrap();
        assert_eq!(native.qualified_name, "Config::load");
        assert_eq!(native.parameters[0].name, "self");
    }

    #[test]
    fn closures_classify_as_lambdas() {
        let result = extract("fn f() { let g = |x: i32| x + 1; }");
        let closure = find_node(&result, "closure_expression");
        assert_eq!(closure.normalized_type, "COMPUTATION_LAMBDA");
        assert!(closure.extraction_attempted);
    }
}

mod type_definitions {
    use super::*;

    #[test]
    fn struct_with_derive_attributes() {
        let result = extract(
            r#"
#[derive(Debug, Clone)]
pub struct User {
    pub id: u64,
}
"#,
        );
        let item = find_node(&result, "struct_item");
        assert_eq!(item.normalized_type, "DEFINITION_CLASS");
        let native = item.native.as_ref().unwrap();
        assert_eq!(native.qualified_name, "User");
        assert_eq!(native.signature_type, "struct");
        assert!(native.modifiers.iter().any(|m| m == "pub"));
        assert!(native.annotations.contains("derive(Debug, Clone)"));
    }

    #[test]
    fn trait_impl_records_the_implemented_trait() {
        let result = extract("trait Run {}\nstruct S;\nimpl Run for S {}");
        let imp = find_node(&result, "impl_item");
        let native = imp.native.as_ref().unwrap();
        assert_eq!(native.qualified_name, "S");
        assert!(native.annotations.contains("Run"));
    }

    #[test]
    fn attributed_trait_impl_keeps_both_annotation_facts() {
        let result = extract(
            "#[automatically_derived]\nimpl Display for Widget {}",
        );
        let native = find_node(&result, "impl_item").native.as_ref().unwrap();
        assert!(native.annotations.contains("implements"));
        assert!(native.annotations.contains("Display"));
        assert!(native.annotations.contains("automatically_derived"));
    }

    #[test]
    fn enums_and_traits_are_class_definitions() {
        let result = extract("pub enum State { On, Off }\npub trait Render {}");
        assert_eq!(find_node(&result, "enum_item").normalized_type, "DEFINITION_CLASS");
        assert_eq!(find_node(&result, "trait_item").normalized_type, "DEFINITION_CLASS");
    }
}

mod variables {
    use super::*;

    #[test]
    fn let_binding_with_type_and_value() {
        let result = extract("fn f() { let mut count: u32 = 0; }");
        let binding = find_node(&result, "let_declaration");
        let native = binding.native.as_ref().unwrap();
        assert_eq!(native.signature_type, "u32");
        assert!(native.modifiers.iter().any(|m| m == "mut"));
        assert!(native.annotations.contains('0'));
    }

    #[test]
    fn const_item_captures_its_name() {
        let result = extract("pub const LIMIT: usize = 128;");
        let item = find_node(&result, "const_item");
        let native = item.native.as_ref().unwrap();
        assert_eq!(native.qualified_name, "LIMIT");
        assert_eq!(native.signature_type, "usize");
    }
}

mod calls {
    use super::*;

    #[test]
    fn plain_call_records_callee_and_arguments() {
        let result = extract("fn f() { process(input, 42); }");
        let call = find_node(&result, "call_expression");
        assert_eq!(call.normalized_type, "COMPUTATION_CALL");
        let native = call.native.as_ref().unwrap();
        assert_eq!(native.qualified_name, "process");
        assert_eq!(native.parameters.len(), 2);
        assert_eq!(native.parameters[1].name, "42");
    }

    #[test]
    fn method_calls_are_marked() {
        let result = extract("fn f() { conn.send(msg); }");
        let call = find_node(&result, "call_expression");
        let native = call.native.as_ref().unwrap();
        assert_eq!(native.qualified_name, "conn.send");
        assert!(native.modifiers.iter().any(|m| m == "method"));
    }

    #[test]
    fn macro_invocations_are_calls_too() {
        let result = extract(r#"fn f() { println!("hi"); }"#);
        let mac = find_node(&result, "macro_invocation");
        assert_eq!(mac.normalized_type, "COMPUTATION_CALL");
        assert_eq!(mac.native.as_ref().unwrap().qualified_name, "println!");
    }
}

mod imports {
    use super::*;

    #[test]
    fn use_declaration_captures_the_full_path() {
        let result = extract("use std::collections::HashMap;");
        let import = find_node(&result, "use_declaration");
        assert_eq!(import.normalized_type, "EXTERNAL_IMPORT");
        let native = import.native.as_ref().unwrap();
        assert_eq!(native.qualified_name, "std::collections::HashMap");
        assert_eq!(native.signature_type, "HashMap");
    }

    #[test]
    fn pub_use_is_a_public_import() {
        let result = extract("pub use crate::record::NodeRecord;");
        let import = find_node(&result, "use_declaration");
        let native = import.native.as_ref().unwrap();
        assert!(native.modifiers.iter().any(|m| m == "pub"));
    }
}
