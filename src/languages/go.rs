// Go language registration for the tree-sitter-go grammar.

use serde_json::json;
use tree_sitter::Node;

use crate::classifier::{Classifier, NodeConfig};
use crate::registry::LanguageSupport;
use crate::semantics::{flags, SemanticType};
use crate::strategy::{
    field_text, find_children, node_text, try_node_text, Category, NativeContext, ParameterInfo,
    StrategyResult, StrategySet,
};

pub fn support() -> LanguageSupport {
    LanguageSupport {
        name: "go",
        aliases: &["golang"],
        extensions: &["go"],
        grammar: || tree_sitter_go::LANGUAGE.into(),
        classifier: Classifier::from_table(NODE_TYPES),
        strategies: StrategySet {
            function: Some(extract_function),
            class: Some(extract_type_definition),
            variable: Some(extract_variable),
            call: Some(extract_call),
            import: Some(extract_import),
        },
    }
}

const NODE_TYPES: &[(&str, NodeConfig)] = &[
    // Definitions
    ("function_declaration", NodeConfig::with_strategy(SemanticType::DEFINITION_FUNCTION, Category::Function)),
    ("method_declaration", NodeConfig::with_strategy(SemanticType::DEFINITION_FUNCTION, Category::Function)),
    ("func_literal", NodeConfig::with_strategy(SemanticType::COMPUTATION_LAMBDA, Category::Function)),
    ("type_declaration", NodeConfig::new(SemanticType::DEFINITION_CLASS)),
    ("type_spec", NodeConfig::with_strategy(SemanticType::DEFINITION_CLASS, Category::Class)),
    ("type_alias", NodeConfig::with_strategy(SemanticType::DEFINITION_CLASS, Category::Class)),
    ("var_declaration", NodeConfig::new(SemanticType::DEFINITION_VARIABLE)),
    ("var_spec", NodeConfig::with_strategy(SemanticType::DEFINITION_VARIABLE, Category::Variable)),
    ("const_declaration", NodeConfig::new(SemanticType::DEFINITION_VARIABLE)),
    ("const_spec", NodeConfig::with_strategy(SemanticType::DEFINITION_VARIABLE, Category::Variable)),
    ("short_var_declaration", NodeConfig::with_strategy(SemanticType::DEFINITION_VARIABLE, Category::Variable)),
    ("field_declaration", NodeConfig::new(SemanticType::DEFINITION_VARIABLE)),
    ("method_elem", NodeConfig::new(SemanticType::DEFINITION_FUNCTION)),
    // External interfaces
    ("import_declaration", NodeConfig::new(SemanticType::EXTERNAL_IMPORT)),
    ("import_spec", NodeConfig::with_strategy(SemanticType::EXTERNAL_IMPORT, Category::Import)),
    ("package_clause", NodeConfig::new(SemanticType::ORGANIZATION_SECTION)),
    // Calls and access
    ("call_expression", NodeConfig::with_strategy(SemanticType::COMPUTATION_CALL, Category::Call)),
    ("selector_expression", NodeConfig::new(SemanticType::COMPUTATION_ACCESS)),
    ("index_expression", NodeConfig::new(SemanticType::COMPUTATION_ACCESS)),
    ("slice_expression", NodeConfig::new(SemanticType::COMPUTATION_ACCESS)),
    ("type_assertion_expression", NodeConfig::new(SemanticType::COMPUTATION_EXPRESSION)),
    ("type_conversion_expression", NodeConfig::new(SemanticType::COMPUTATION_EXPRESSION)),
    // Operators
    ("binary_expression", NodeConfig::new(SemanticType::OPERATOR_ARITHMETIC)),
    ("unary_expression", NodeConfig::new(SemanticType::OPERATOR_ARITHMETIC)),
    ("assignment_statement", NodeConfig::new(SemanticType::OPERATOR_ASSIGNMENT)),
    ("inc_statement", NodeConfig::new(SemanticType::OPERATOR_ASSIGNMENT)),
    ("dec_statement", NodeConfig::new(SemanticType::OPERATOR_ASSIGNMENT)),
    // Flow control
    ("if_statement", NodeConfig::new(SemanticType::FLOW_CONDITIONAL)),
    ("expression_switch_statement", NodeConfig::new(SemanticType::FLOW_CONDITIONAL)),
    ("type_switch_statement", NodeConfig::new(SemanticType::FLOW_CONDITIONAL)),
    ("select_statement", NodeConfig::new(SemanticType::FLOW_CONDITIONAL)),
    ("expression_case", NodeConfig::new(SemanticType::PATTERN_MATCH)),
    ("type_case", NodeConfig::new(SemanticType::PATTERN_MATCH)),
    ("default_case", NodeConfig::new(SemanticType::PATTERN_MATCH)),
    ("communication_case", NodeConfig::new(SemanticType::PATTERN_MATCH)),
    ("for_statement", NodeConfig::new(SemanticType::FLOW_LOOP)),
    ("range_clause", NodeConfig::new(SemanticType::TRANSFORM_ITERATION)),
    ("return_statement", NodeConfig::new(SemanticType::FLOW_JUMP)),
    ("break_statement", NodeConfig::new(SemanticType::FLOW_JUMP)),
    ("continue_statement", NodeConfig::new(SemanticType::FLOW_JUMP)),
    ("goto_statement", NodeConfig::new(SemanticType::FLOW_JUMP)),
    ("fallthrough_statement", NodeConfig::new(SemanticType::FLOW_JUMP)),
    ("go_statement", NodeConfig::new(SemanticType::FLOW_SYNC)),
    ("defer_statement", NodeConfig::new(SemanticType::FLOW_SYNC)),
    ("send_statement", NodeConfig::new(SemanticType::FLOW_SYNC)),
    ("labeled_statement", NodeConfig::new(SemanticType::EXECUTION_STATEMENT)),
    // Names
    ("identifier", NodeConfig::new(SemanticType::NAME_IDENTIFIER)),
    ("field_identifier", NodeConfig::new(SemanticType::NAME_IDENTIFIER)),
    ("type_identifier", NodeConfig::new(SemanticType::NAME_IDENTIFIER)),
    ("package_identifier", NodeConfig::new(SemanticType::NAME_SCOPED)),
    ("label_name", NodeConfig::new(SemanticType::NAME_IDENTIFIER)),
    ("qualified_type", NodeConfig::new(SemanticType::NAME_QUALIFIED)),
    ("blank_identifier", NodeConfig::new(SemanticType::NAME_IDENTIFIER)),
    // Literals
    ("int_literal", NodeConfig::new(SemanticType::LITERAL_NUMBER)),
    ("float_literal", NodeConfig::new(SemanticType::LITERAL_NUMBER)),
    ("imaginary_literal", NodeConfig::new(SemanticType::LITERAL_NUMBER)),
    ("interpreted_string_literal", NodeConfig::new(SemanticType::LITERAL_STRING)),
    ("raw_string_literal", NodeConfig::new(SemanticType::LITERAL_STRING)),
    ("rune_literal", NodeConfig::new(SemanticType::LITERAL_STRING)),
    ("true", NodeConfig::with_flags(SemanticType::LITERAL_ATOMIC, flags::IS_KEYWORD)),
    ("false", NodeConfig::with_flags(SemanticType::LITERAL_ATOMIC, flags::IS_KEYWORD)),
    ("nil", NodeConfig::with_flags(SemanticType::LITERAL_ATOMIC, flags::IS_KEYWORD)),
    ("iota", NodeConfig::with_flags(SemanticType::LITERAL_ATOMIC, flags::IS_KEYWORD)),
    ("composite_literal", NodeConfig::new(SemanticType::LITERAL_STRUCTURED)),
    ("literal_value", NodeConfig::new(SemanticType::LITERAL_STRUCTURED)),
    // Types
    ("struct_type", NodeConfig::new(SemanticType::TYPE_COMPOSITE)),
    ("interface_type", NodeConfig::new(SemanticType::TYPE_COMPOSITE)),
    ("map_type", NodeConfig::new(SemanticType::TYPE_COMPOSITE)),
    ("slice_type", NodeConfig::new(SemanticType::TYPE_COMPOSITE)),
    ("array_type", NodeConfig::new(SemanticType::TYPE_COMPOSITE)),
    ("channel_type", NodeConfig::new(SemanticType::TYPE_COMPOSITE)),
    ("function_type", NodeConfig::new(SemanticType::TYPE_COMPOSITE)),
    ("pointer_type", NodeConfig::new(SemanticType::TYPE_REFERENCE)),
    ("generic_type", NodeConfig::new(SemanticType::TYPE_GENERIC)),
    ("type_parameter_list", NodeConfig::new(SemanticType::TYPE_GENERIC)),
    // Organization
    ("source_file", NodeConfig::new(SemanticType::ORGANIZATION_CONTAINER)),
    ("block", NodeConfig::new(SemanticType::ORGANIZATION_BLOCK)),
    ("parameter_list", NodeConfig::new(SemanticType::ORGANIZATION_LIST)),
    ("argument_list", NodeConfig::new(SemanticType::ORGANIZATION_LIST)),
    ("field_declaration_list", NodeConfig::new(SemanticType::ORGANIZATION_LIST)),
    ("expression_list", NodeConfig::new(SemanticType::ORGANIZATION_LIST)),
    ("import_spec_list", NodeConfig::new(SemanticType::ORGANIZATION_LIST)),
    ("expression_statement", NodeConfig::new(SemanticType::EXECUTION_STATEMENT)),
    // Metadata
    ("comment", NodeConfig::new(SemanticType::METADATA_COMMENT)),
    // Keyword tokens
    ("func", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("package", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("import", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("type", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("struct", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("interface", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("var", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("const", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("if", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("else", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("for", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("range", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("return", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("go", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("defer", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("chan", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("map", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("select", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("switch", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("case", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("default", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("break", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("continue", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("goto", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("fallthrough", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
];

/// function_declaration, method_declaration, and func_literal.
fn extract_function(node: Node, source: &str) -> StrategyResult {
    let mut context = NativeContext::default();

    if let Some(result) = field_text(node, "result", source) {
        context.signature_type = result;
    }
    if let Some(params) = node.child_by_field_name("parameters") {
        context.parameters = parameter_list(params, source)?;
    }

    let name = field_text(node, "name", source).unwrap_or_default();
    // Methods qualify under the receiver's base type: "(*Server) Run" -> "Server.Run"
    if let Some(receiver) = node.child_by_field_name("receiver") {
        let receiver_type = receiver_base_type(receiver, source);
        if !receiver_type.is_empty() && !name.is_empty() {
            context.qualified_name = format!("{}.{}", receiver_type, name);
        } else {
            context.qualified_name = name.clone();
        }
    } else {
        context.qualified_name = name.clone();
    }

    // Go visibility is spelled with capitalization
    if name.chars().next().is_some_and(char::is_uppercase) {
        context.modifiers.push("exported".to_string());
    }
    Ok(context)
}

fn parameter_list(
    params: Node,
    source: &str,
) -> Result<Vec<ParameterInfo>, crate::strategy::StrategyError> {
    let mut out = Vec::new();
    for i in 0..params.named_child_count() {
        let Some(child) = params.named_child(i) else { continue };
        match child.kind() {
            "parameter_declaration" => {
                let ty = field_text(child, "type", source).unwrap_or_default();
                // one declaration may name several parameters of the same type
                let names = find_children(child, "identifier");
                if names.is_empty() {
                    let mut param = ParameterInfo::default();
                    param.type_name = ty;
                    out.push(param);
                } else {
                    for name in names {
                        let mut param = ParameterInfo::named(try_node_text(name, source)?);
                        param.type_name = ty.clone();
                        out.push(param);
                    }
                }
            }
            "variadic_parameter_declaration" => {
                let mut param = ParameterInfo::default();
                if let Some(name) = field_text(child, "name", source) {
                    param.name = name;
                }
                if let Some(ty) = field_text(child, "type", source) {
                    param.type_name = format!("...{}", ty);
                }
                param.is_variadic = true;
                out.push(param);
            }
            _ => {}
        }
    }
    Ok(out)
}

/// Base type name of a method receiver, with any pointer stripped.
fn receiver_base_type(receiver: Node, source: &str) -> String {
    let Some(decl) = receiver.named_child(0) else {
        return String::new();
    };
    let Some(ty) = decl.child_by_field_name("type") else {
        return String::new();
    };
    match ty.kind() {
        "pointer_type" => ty
            .named_child(0)
            .map(|inner| node_text(inner, source))
            .unwrap_or_default(),
        _ => node_text(ty, source),
    }
}

/// type_spec under a type declaration.
fn extract_type_definition(node: Node, source: &str) -> StrategyResult {
    let mut context = NativeContext::default();
    let name = field_text(node, "name", source).unwrap_or_default();
    context.qualified_name = name.clone();
    if let Some(ty) = node.child_by_field_name("type") {
        // "struct", "interface", or the aliased type for other specs
        context.signature_type = match ty.kind() {
            "struct_type" => "struct".to_string(),
            "interface_type" => "interface".to_string(),
            _ => try_node_text(ty, source)?,
        };
    }
    if name.chars().next().is_some_and(char::is_uppercase) {
        context.modifiers.push("exported".to_string());
    }
    Ok(context)
}

/// var_spec, const_spec, and short_var_declaration.
fn extract_variable(node: Node, source: &str) -> StrategyResult {
    let mut context = NativeContext::default();
    if node.kind() == "short_var_declaration" {
        if let Some(left) = node.child_by_field_name("left") {
            context.qualified_name = try_node_text(left, source)?;
        }
        if let Some(right) = field_text(node, "right", source) {
            context.annotations = json!({ "value": right }).to_string();
        }
        return Ok(context);
    }
    context.qualified_name = field_text(node, "name", source).unwrap_or_default();
    if let Some(ty) = field_text(node, "type", source) {
        context.signature_type = ty;
    }
    if let Some(value) = field_text(node, "value", source) {
        context.annotations = json!({ "value": value }).to_string();
    }
    if let Some(parent) = node.parent() {
        if parent.kind() == "const_declaration" {
            context.modifiers.push("const".to_string());
        }
    }
    if context.qualified_name.chars().next().is_some_and(char::is_uppercase) {
        context.modifiers.push("exported".to_string());
    }
    Ok(context)
}

fn extract_call(node: Node, source: &str) -> StrategyResult {
    let mut context = NativeContext::default();
    if let Some(function) = node.child_by_field_name("function") {
        context.qualified_name = try_node_text(function, source)?;
        if function.kind() == "selector_expression" {
            context.modifiers.push("method".to_string());
        }
    }
    if let Some(args) = node.child_by_field_name("arguments") {
        for i in 0..args.named_child_count() {
            if let Some(arg) = args.named_child(i) {
                context.parameters.push(ParameterInfo::named(node_text(arg, source)));
            }
        }
    }
    Ok(context)
}

fn extract_import(node: Node, source: &str) -> StrategyResult {
    let mut context = NativeContext::default();
    if let Some(path) = field_text(node, "path", source) {
        context.qualified_name = path.trim_matches('"').to_string();
    }
    // explicit alias, including the blank and dot forms
    if let Some(alias) = field_text(node, "name", source) {
        context.signature_type = alias;
    } else if let Some(last) = context.qualified_name.rsplit('/').next() {
        context.signature_type = last.to_string();
    }
    Ok(context)
}
