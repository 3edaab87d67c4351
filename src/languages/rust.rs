// Rust language registration: classification table + native context
// strategies for the tree-sitter-rust grammar.

use serde_json::json;
use tree_sitter::Node;

use crate::classifier::{Classifier, NodeConfig};
use crate::registry::LanguageSupport;
use crate::semantics::{flags, SemanticType};
use crate::strategy::{
    field_text, find_child, node_text, try_node_text, Category, NativeContext, ParameterInfo,
    StrategyResult, StrategySet,
};

pub fn support() -> LanguageSupport {
    LanguageSupport {
        name: "rust",
        aliases: &["rs"],
        extensions: &["rs"],
        grammar: || tree_sitter_rust::LANGUAGE.into(),
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
    ("function_item", NodeConfig::with_strategy(SemanticType::DEFINITION_FUNCTION, Category::Function)),
    ("function_signature_item", NodeConfig::with_strategy(SemanticType::DEFINITION_FUNCTION, Category::Function)),
    ("closure_expression", NodeConfig::with_strategy(SemanticType::COMPUTATION_LAMBDA, Category::Function)),
    ("struct_item", NodeConfig::with_strategy(SemanticType::DEFINITION_CLASS, Category::Class)),
    ("enum_item", NodeConfig::with_strategy(SemanticType::DEFINITION_CLASS, Category::Class)),
    ("union_item", NodeConfig::with_strategy(SemanticType::DEFINITION_CLASS, Category::Class)),
    ("trait_item", NodeConfig::with_strategy(SemanticType::DEFINITION_CLASS, Category::Class)),
    ("impl_item", NodeConfig::with_strategy(SemanticType::DEFINITION_CLASS, Category::Class)),
    ("type_item", NodeConfig::with_strategy(SemanticType::DEFINITION_CLASS, Category::Class)),
    ("mod_item", NodeConfig::new(SemanticType::DEFINITION_MODULE)),
    ("let_declaration", NodeConfig::with_strategy(SemanticType::DEFINITION_VARIABLE, Category::Variable)),
    ("const_item", NodeConfig::with_strategy(SemanticType::DEFINITION_VARIABLE, Category::Variable)),
    ("static_item", NodeConfig::with_strategy(SemanticType::DEFINITION_VARIABLE, Category::Variable)),
    // External interfaces
    ("use_declaration", NodeConfig::with_strategy(SemanticType::EXTERNAL_IMPORT, Category::Import)),
    ("extern_crate_declaration", NodeConfig::with_strategy(SemanticType::EXTERNAL_IMPORT, Category::Import)),
    ("foreign_mod_item", NodeConfig::with_flags(SemanticType::EXTERNAL_FOREIGN, flags::IS_UNSAFE)),
    // Calls and access
    ("call_expression", NodeConfig::with_strategy(SemanticType::COMPUTATION_CALL, Category::Call)),
    ("macro_invocation", NodeConfig::with_strategy(SemanticType::COMPUTATION_CALL, Category::Call)),
    ("field_expression", NodeConfig::new(SemanticType::COMPUTATION_ACCESS)),
    ("index_expression", NodeConfig::new(SemanticType::COMPUTATION_ACCESS)),
    // Operators
    ("binary_expression", NodeConfig::new(SemanticType::OPERATOR_ARITHMETIC)),
    ("unary_expression", NodeConfig::new(SemanticType::OPERATOR_ARITHMETIC)),
    ("assignment_expression", NodeConfig::new(SemanticType::OPERATOR_ASSIGNMENT)),
    ("compound_assignment_expr", NodeConfig::new(SemanticType::OPERATOR_ASSIGNMENT)),
    ("range_expression", NodeConfig::new(SemanticType::OPERATOR_ARITHMETIC)),
    // Flow control
    ("if_expression", NodeConfig::new(SemanticType::FLOW_CONDITIONAL)),
    ("match_expression", NodeConfig::new(SemanticType::FLOW_CONDITIONAL)),
    ("while_expression", NodeConfig::new(SemanticType::FLOW_LOOP)),
    ("loop_expression", NodeConfig::new(SemanticType::FLOW_LOOP)),
    ("for_expression", NodeConfig::new(SemanticType::FLOW_LOOP)),
    ("return_expression", NodeConfig::new(SemanticType::FLOW_JUMP)),
    ("break_expression", NodeConfig::new(SemanticType::FLOW_JUMP)),
    ("continue_expression", NodeConfig::new(SemanticType::FLOW_JUMP)),
    ("await_expression", NodeConfig::new(SemanticType::FLOW_SYNC)),
    ("async_block", NodeConfig::new(SemanticType::FLOW_SYNC)),
    ("try_expression", NodeConfig::new(SemanticType::ERROR_TRY)),
    ("unsafe_block", NodeConfig::with_flags(SemanticType::ORGANIZATION_BLOCK, flags::IS_UNSAFE)),
    // Patterns
    ("match_arm", NodeConfig::new(SemanticType::PATTERN_MATCH)),
    ("match_pattern", NodeConfig::new(SemanticType::PATTERN_MATCH)),
    ("or_pattern", NodeConfig::new(SemanticType::PATTERN_MATCH)),
    ("tuple_pattern", NodeConfig::new(SemanticType::PATTERN_DESTRUCTURE)),
    ("struct_pattern", NodeConfig::new(SemanticType::PATTERN_DESTRUCTURE)),
    ("tuple_struct_pattern", NodeConfig::new(SemanticType::PATTERN_DESTRUCTURE)),
    ("slice_pattern", NodeConfig::new(SemanticType::PATTERN_DESTRUCTURE)),
    // Names
    ("identifier", NodeConfig::new(SemanticType::NAME_IDENTIFIER)),
    ("field_identifier", NodeConfig::new(SemanticType::NAME_IDENTIFIER)),
    ("type_identifier", NodeConfig::new(SemanticType::NAME_IDENTIFIER)),
    ("scoped_identifier", NodeConfig::new(SemanticType::NAME_QUALIFIED)),
    ("scoped_type_identifier", NodeConfig::new(SemanticType::NAME_QUALIFIED)),
    ("self", NodeConfig::with_flags(SemanticType::NAME_SCOPED, flags::IS_KEYWORD)),
    ("super", NodeConfig::with_flags(SemanticType::NAME_SCOPED, flags::IS_KEYWORD)),
    ("crate", NodeConfig::with_flags(SemanticType::NAME_SCOPED, flags::IS_KEYWORD)),
    // Literals
    ("integer_literal", NodeConfig::new(SemanticType::LITERAL_NUMBER)),
    ("float_literal", NodeConfig::new(SemanticType::LITERAL_NUMBER)),
    ("string_literal", NodeConfig::new(SemanticType::LITERAL_STRING)),
    ("raw_string_literal", NodeConfig::new(SemanticType::LITERAL_STRING)),
    ("char_literal", NodeConfig::new(SemanticType::LITERAL_STRING)),
    ("boolean_literal", NodeConfig::new(SemanticType::LITERAL_ATOMIC)),
    ("array_expression", NodeConfig::new(SemanticType::LITERAL_STRUCTURED)),
    ("tuple_expression", NodeConfig::new(SemanticType::LITERAL_STRUCTURED)),
    ("struct_expression", NodeConfig::new(SemanticType::LITERAL_STRUCTURED)),
    // Types
    ("primitive_type", NodeConfig::new(SemanticType::TYPE_PRIMITIVE)),
    ("reference_type", NodeConfig::new(SemanticType::TYPE_REFERENCE)),
    ("pointer_type", NodeConfig::with_flags(SemanticType::TYPE_REFERENCE, flags::IS_UNSAFE)),
    ("generic_type", NodeConfig::new(SemanticType::TYPE_GENERIC)),
    ("lifetime", NodeConfig::new(SemanticType::TYPE_GENERIC)),
    ("tuple_type", NodeConfig::new(SemanticType::TYPE_COMPOSITE)),
    ("array_type", NodeConfig::new(SemanticType::TYPE_COMPOSITE)),
    ("dynamic_type", NodeConfig::new(SemanticType::TYPE_REFERENCE)),
    // Organization
    ("source_file", NodeConfig::new(SemanticType::ORGANIZATION_CONTAINER)),
    ("block", NodeConfig::new(SemanticType::ORGANIZATION_BLOCK)),
    ("declaration_list", NodeConfig::new(SemanticType::ORGANIZATION_BLOCK)),
    ("parameters", NodeConfig::new(SemanticType::ORGANIZATION_LIST)),
    ("arguments", NodeConfig::new(SemanticType::ORGANIZATION_LIST)),
    ("field_declaration_list", NodeConfig::new(SemanticType::ORGANIZATION_LIST)),
    ("use_list", NodeConfig::new(SemanticType::ORGANIZATION_LIST)),
    // Metadata
    ("line_comment", NodeConfig::new(SemanticType::METADATA_COMMENT)),
    ("block_comment", NodeConfig::new(SemanticType::METADATA_COMMENT)),
    ("attribute_item", NodeConfig::new(SemanticType::METADATA_ANNOTATION)),
    ("inner_attribute_item", NodeConfig::new(SemanticType::METADATA_ANNOTATION)),
    ("visibility_modifier", NodeConfig::with_flags(SemanticType::METADATA_ANNOTATION, flags::IS_PUBLIC)),
    // Statements
    ("expression_statement", NodeConfig::new(SemanticType::EXECUTION_STATEMENT)),
    ("empty_statement", NodeConfig::new(SemanticType::EXECUTION_STATEMENT)),
    // Keyword tokens
    ("fn", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("let", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("pub", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD | flags::IS_PUBLIC)),
    ("struct", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("enum", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("trait", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("impl", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("mod", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("use", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("match", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("if", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("else", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("while", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("for", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("loop", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("return", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("break", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("continue", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("async", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("await", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("move", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("const", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("static", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("unsafe", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD | flags::IS_UNSAFE)),
    ("dyn", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("where", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("in", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("as", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("mut", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
];

/// function_item / function_signature_item / closure_expression.
fn extract_function(node: Node, source: &str) -> StrategyResult {
    let mut context = NativeContext::default();

    if let Some(return_type) = field_text(node, "return_type", source) {
        context.signature_type = return_type;
    }
    if let Some(params) = node.child_by_field_name("parameters") {
        context.parameters = parameter_list(params, source)?;
    }
    context.modifiers = function_modifiers(node, source);
    if let Some(name) = field_text(node, "name", source) {
        context.qualified_name = qualify_in_impl(node, source, &name);
    }
    Ok(context)
}

fn parameter_list(params: Node, source: &str) -> Result<Vec<ParameterInfo>, crate::strategy::StrategyError> {
    let mut out = Vec::new();
    for i in 0..params.child_count() {
        let Some(child) = params.child(i) else { continue };
        match child.kind() {
            "parameter" => {
                let mut param = ParameterInfo::default();
                if let Some(pattern) = child.child_by_field_name("pattern") {
                    param.name = try_node_text(pattern, source)?;
                }
                if let Some(ty) = field_text(child, "type", source) {
                    param.type_name = ty;
                }
                out.push(param);
            }
            "self_parameter" => {
                let mut param = ParameterInfo::named("self");
                param.type_name = try_node_text(child, source)?;
                out.push(param);
            }
            "variadic_parameter" => {
                let mut param = ParameterInfo::named("...");
                param.is_variadic = true;
                out.push(param);
            }
            // closure parameters appear as bare identifiers
            "identifier" => out.push(ParameterInfo::named(try_node_text(child, source)?)),
            _ => {}
        }
    }
    Ok(out)
}

fn function_modifiers(node: Node, source: &str) -> Vec<String> {
    let mut modifiers = Vec::new();
    if let Some(vis) = find_child(node, "visibility_modifier") {
        modifiers.push(node_text(vis, source));
    }
    // the grammar groups async/unsafe/const/extern under one child node
    let grouped = find_child(node, "function_modifiers")
        .map(|mods| node_text(mods, source))
        .unwrap_or_default();
    for keyword in ["async", "unsafe", "const", "extern"] {
        if grouped.contains(keyword) || find_child(node, keyword).is_some() {
            modifiers.push(keyword.to_string());
        }
    }
    modifiers
}

/// "Type::name" when the function sits in an impl block, "mod::name" inside
/// a module, else just the name.
fn qualify_in_impl(node: Node, source: &str, name: &str) -> String {
    let mut current = node.parent();
    while let Some(ancestor) = current {
        match ancestor.kind() {
            "impl_item" => {
                if let Some(ty) = field_text(ancestor, "type", source) {
                    return format!("{}::{}", ty, name);
                }
            }
            "trait_item" | "mod_item" => {
                if let Some(owner) = field_text(ancestor, "name", source) {
                    return format!("{}::{}", owner, name);
                }
            }
            _ => {}
        }
        current = ancestor.parent();
    }
    name.to_string()
}

/// struct/enum/union/trait/impl/type items.
fn extract_type_definition(node: Node, source: &str) -> StrategyResult {
    let mut context = NativeContext::default();
    context.signature_type = node.kind().trim_end_matches("_item").to_string();

    let name = field_text(node, "name", source)
        .or_else(|| field_text(node, "type", source))
        .unwrap_or_default();
    context.qualified_name = name;

    if let Some(vis) = find_child(node, "visibility_modifier") {
        context.modifiers.push(node_text(vis, source));
    }
    if find_child(node, "unsafe").is_some() {
        context.modifiers.push("unsafe".to_string());
    }

    // one JSON object for everything annotation-like: the implemented trait
    // and any preceding attribute siblings
    let mut annotations = serde_json::Map::new();
    if let Some(trait_name) = field_text(node, "trait", source) {
        annotations.insert("implements".to_string(), json!(trait_name));
    }
    let mut attrs = Vec::new();
    let mut prev = node.prev_sibling();
    while let Some(sib) = prev {
        if sib.kind() != "attribute_item" {
            break;
        }
        attrs.push(node_text(sib, source));
        prev = sib.prev_sibling();
    }
    if !attrs.is_empty() {
        attrs.reverse();
        annotations.insert("attributes".to_string(), json!(attrs));
    }
    if !annotations.is_empty() {
        context.annotations = serde_json::Value::Object(annotations).to_string();
    }
    Ok(context)
}

/// let/const/static bindings.
fn extract_variable(node: Node, source: &str) -> StrategyResult {
    let mut context = NativeContext::default();
    if let Some(ty) = field_text(node, "type", source) {
        context.signature_type = ty;
    }
    context.qualified_name = field_text(node, "name", source)
        .or_else(|| field_text(node, "pattern", source))
        .unwrap_or_default();
    if let Some(vis) = find_child(node, "visibility_modifier") {
        context.modifiers.push(node_text(vis, source));
    }
    if node_text(node, source).starts_with("let mut")
        || find_child(node, "mutable_specifier").is_some()
    {
        context.modifiers.push("mut".to_string());
    }
    if let Some(value) = field_text(node, "value", source) {
        context.annotations = json!({ "value": value }).to_string();
    }
    Ok(context)
}

/// call_expression and macro_invocation.
fn extract_call(node: Node, source: &str) -> StrategyResult {
    let mut context = NativeContext::default();
    if node.kind() == "macro_invocation" {
        if let Some(name) = field_text(node, "macro", source) {
            context.qualified_name = format!("{}!", name);
        }
        context.modifiers.push("macro".to_string());
        return Ok(context);
    }
    if let Some(function) = node.child_by_field_name("function") {
        context.qualified_name = try_node_text(function, source)?;
        if function.kind() == "field_expression" {
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

/// use declarations and extern crate.
fn extract_import(node: Node, source: &str) -> StrategyResult {
    let mut context = NativeContext::default();
    let path = field_text(node, "argument", source)
        .or_else(|| field_text(node, "name", source))
        .unwrap_or_default();
    context.qualified_name = path.clone();
    if let Some(last) = path.rsplit("::").next() {
        context.signature_type = last.trim().to_string();
    }
    if find_child(node, "visibility_modifier").is_some() {
        context.modifiers.push("pub".to_string());
    }
    Ok(context)
}
