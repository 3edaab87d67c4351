// JavaScript language registration for the tree-sitter-javascript grammar.

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
        name: "javascript",
        aliases: &["js", "jsx", "ecmascript"],
        extensions: &["js", "mjs", "cjs", "jsx"],
        grammar: || tree_sitter_javascript::LANGUAGE.into(),
        classifier: Classifier::from_table(NODE_TYPES),
        strategies: StrategySet {
            function: Some(extract_function),
            class: Some(extract_class),
            variable: Some(extract_variable),
            call: Some(extract_call),
            import: Some(extract_import),
        },
    }
}

const NODE_TYPES: &[(&str, NodeConfig)] = &[
    // Definitions
    ("function_declaration", NodeConfig::with_strategy(SemanticType::DEFINITION_FUNCTION, Category::Function)),
    ("function_expression", NodeConfig::with_strategy(SemanticType::DEFINITION_FUNCTION, Category::Function)),
    ("generator_function_declaration", NodeConfig::with_strategy(SemanticType::DEFINITION_FUNCTION, Category::Function)),
    ("generator_function", NodeConfig::with_strategy(SemanticType::DEFINITION_FUNCTION, Category::Function)),
    ("arrow_function", NodeConfig::with_strategy(SemanticType::COMPUTATION_LAMBDA, Category::Function)),
    ("method_definition", NodeConfig::with_strategy(SemanticType::DEFINITION_FUNCTION, Category::Function)),
    ("class_declaration", NodeConfig::with_strategy(SemanticType::DEFINITION_CLASS, Category::Class)),
    ("class", NodeConfig::full(SemanticType::DEFINITION_CLASS, flags::KEYWORD_IF_LEAF, Category::Class)),
    ("variable_declaration", NodeConfig::new(SemanticType::DEFINITION_VARIABLE)),
    ("lexical_declaration", NodeConfig::new(SemanticType::DEFINITION_VARIABLE)),
    ("variable_declarator", NodeConfig::with_strategy(SemanticType::DEFINITION_VARIABLE, Category::Variable)),
    ("field_definition", NodeConfig::new(SemanticType::DEFINITION_VARIABLE)),
    // External interfaces
    ("import_statement", NodeConfig::with_strategy(SemanticType::EXTERNAL_IMPORT, Category::Import)),
    ("export_statement", NodeConfig::with_flags(SemanticType::EXTERNAL_EXPORT, flags::IS_PUBLIC)),
    // Calls and access
    ("call_expression", NodeConfig::with_strategy(SemanticType::COMPUTATION_CALL, Category::Call)),
    ("new_expression", NodeConfig::with_strategy(SemanticType::COMPUTATION_CALL, Category::Call)),
    ("member_expression", NodeConfig::new(SemanticType::COMPUTATION_ACCESS)),
    ("subscript_expression", NodeConfig::new(SemanticType::COMPUTATION_ACCESS)),
    // Operators
    ("binary_expression", NodeConfig::new(SemanticType::OPERATOR_ARITHMETIC)),
    ("unary_expression", NodeConfig::new(SemanticType::OPERATOR_ARITHMETIC)),
    ("update_expression", NodeConfig::new(SemanticType::OPERATOR_ARITHMETIC)),
    ("assignment_expression", NodeConfig::new(SemanticType::OPERATOR_ASSIGNMENT)),
    ("augmented_assignment_expression", NodeConfig::new(SemanticType::OPERATOR_ASSIGNMENT)),
    ("ternary_expression", NodeConfig::new(SemanticType::FLOW_CONDITIONAL)),
    // Flow control
    ("if_statement", NodeConfig::new(SemanticType::FLOW_CONDITIONAL)),
    ("else_clause", NodeConfig::new(SemanticType::FLOW_CONDITIONAL)),
    ("switch_statement", NodeConfig::new(SemanticType::FLOW_CONDITIONAL)),
    ("switch_case", NodeConfig::new(SemanticType::PATTERN_MATCH)),
    ("switch_default", NodeConfig::new(SemanticType::PATTERN_MATCH)),
    ("for_statement", NodeConfig::new(SemanticType::FLOW_LOOP)),
    ("for_in_statement", NodeConfig::new(SemanticType::FLOW_LOOP)),
    ("while_statement", NodeConfig::new(SemanticType::FLOW_LOOP)),
    ("do_statement", NodeConfig::new(SemanticType::FLOW_LOOP)),
    ("return_statement", NodeConfig::new(SemanticType::FLOW_JUMP)),
    ("break_statement", NodeConfig::new(SemanticType::FLOW_JUMP)),
    ("continue_statement", NodeConfig::new(SemanticType::FLOW_JUMP)),
    ("await_expression", NodeConfig::new(SemanticType::FLOW_SYNC)),
    ("yield_expression", NodeConfig::new(SemanticType::FLOW_SYNC)),
    // Error handling
    ("try_statement", NodeConfig::new(SemanticType::ERROR_TRY)),
    ("catch_clause", NodeConfig::new(SemanticType::ERROR_CATCH)),
    ("finally_clause", NodeConfig::new(SemanticType::ERROR_FINALLY)),
    ("throw_statement", NodeConfig::new(SemanticType::ERROR_THROW)),
    // Names
    ("identifier", NodeConfig::new(SemanticType::NAME_IDENTIFIER)),
    ("property_identifier", NodeConfig::new(SemanticType::NAME_IDENTIFIER)),
    ("shorthand_property_identifier", NodeConfig::new(SemanticType::NAME_IDENTIFIER)),
    ("shorthand_property_identifier_pattern", NodeConfig::new(SemanticType::NAME_IDENTIFIER)),
    ("statement_identifier", NodeConfig::new(SemanticType::NAME_IDENTIFIER)),
    ("this", NodeConfig::with_flags(SemanticType::NAME_SCOPED, flags::IS_KEYWORD)),
    ("super", NodeConfig::with_flags(SemanticType::NAME_SCOPED, flags::IS_KEYWORD)),
    // Literals
    ("number", NodeConfig::new(SemanticType::LITERAL_NUMBER)),
    ("string", NodeConfig::new(SemanticType::LITERAL_STRING)),
    ("template_string", NodeConfig::new(SemanticType::PATTERN_TEMPLATE)),
    ("template_substitution", NodeConfig::new(SemanticType::PATTERN_TEMPLATE)),
    ("regex", NodeConfig::new(SemanticType::LITERAL_STRING)),
    ("true", NodeConfig::with_flags(SemanticType::LITERAL_ATOMIC, flags::IS_KEYWORD)),
    ("false", NodeConfig::with_flags(SemanticType::LITERAL_ATOMIC, flags::IS_KEYWORD)),
    ("null", NodeConfig::with_flags(SemanticType::LITERAL_ATOMIC, flags::IS_KEYWORD)),
    ("undefined", NodeConfig::with_flags(SemanticType::LITERAL_ATOMIC, flags::IS_KEYWORD)),
    ("array", NodeConfig::new(SemanticType::LITERAL_STRUCTURED)),
    ("object", NodeConfig::new(SemanticType::LITERAL_STRUCTURED)),
    ("pair", NodeConfig::new(SemanticType::LITERAL_STRUCTURED)),
    // Patterns
    ("object_pattern", NodeConfig::new(SemanticType::PATTERN_DESTRUCTURE)),
    ("array_pattern", NodeConfig::new(SemanticType::PATTERN_DESTRUCTURE)),
    ("assignment_pattern", NodeConfig::new(SemanticType::PATTERN_DESTRUCTURE)),
    ("rest_pattern", NodeConfig::new(SemanticType::PATTERN_DESTRUCTURE)),
    ("spread_element", NodeConfig::new(SemanticType::PATTERN_DESTRUCTURE)),
    // Organization
    ("program", NodeConfig::new(SemanticType::ORGANIZATION_CONTAINER)),
    ("statement_block", NodeConfig::new(SemanticType::ORGANIZATION_BLOCK)),
    ("class_body", NodeConfig::new(SemanticType::ORGANIZATION_BLOCK)),
    ("formal_parameters", NodeConfig::new(SemanticType::ORGANIZATION_LIST)),
    ("arguments", NodeConfig::new(SemanticType::ORGANIZATION_LIST)),
    ("expression_statement", NodeConfig::new(SemanticType::EXECUTION_STATEMENT)),
    ("empty_statement", NodeConfig::new(SemanticType::EXECUTION_STATEMENT)),
    ("labeled_statement", NodeConfig::new(SemanticType::EXECUTION_STATEMENT)),
    // Metadata
    ("comment", NodeConfig::new(SemanticType::METADATA_COMMENT)),
    ("decorator", NodeConfig::new(SemanticType::METADATA_ANNOTATION)),
    ("hash_bang_line", NodeConfig::new(SemanticType::METADATA_DIRECTIVE)),
    // Keyword tokens
    ("function", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("const", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("let", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("var", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("if", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("else", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("for", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("while", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("do", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("return", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("async", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("await", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("new", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("import", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("export", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD | flags::IS_PUBLIC)),
    ("from", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("default", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("try", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("catch", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("finally", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("throw", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("switch", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("case", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("break", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("continue", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("typeof", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("instanceof", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("in", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("of", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("static", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("get", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("set", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("yield", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("delete", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("void", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
];

/// Functions, generators, arrow functions, and method definitions.
fn extract_function(node: Node, source: &str) -> StrategyResult {
    let mut context = NativeContext::default();

    if let Some(params) = node.child_by_field_name("parameters") {
        context.parameters = parameter_list(params, source)?;
    } else if let Some(param) = node.child_by_field_name("parameter") {
        // single-identifier arrow function: x => ...
        context.parameters.push(ParameterInfo::named(try_node_text(param, source)?));
    }

    if find_child(node, "async").is_some() {
        context.modifiers.push("async".to_string());
    }
    if node.kind().starts_with("generator_function") || find_child(node, "*").is_some() {
        context.modifiers.push("generator".to_string());
    }
    if node.kind() == "method_definition" {
        for keyword in ["static", "get", "set"] {
            if find_child(node, keyword).is_some() {
                context.modifiers.push(keyword.to_string());
            }
        }
    }

    let name = field_text(node, "name", source).unwrap_or_else(|| assigned_name(node, source));
    context.qualified_name = qualify_in_class(node, source, &name);
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
            "identifier" => out.push(ParameterInfo::named(try_node_text(child, source)?)),
            "assignment_pattern" => {
                let mut param = ParameterInfo::default();
                if let Some(left) = child.child_by_field_name("left") {
                    param.name = try_node_text(left, source)?;
                }
                if let Some(right) = field_text(child, "right", source) {
                    param.default_value = right;
                }
                param.is_optional = true;
                out.push(param);
            }
            "rest_pattern" => {
                let mut param = ParameterInfo::named(try_node_text(child, source)?);
                param.is_variadic = true;
                out.push(param);
            }
            "object_pattern" | "array_pattern" => {
                out.push(ParameterInfo::named(try_node_text(child, source)?));
            }
            _ => {}
        }
    }
    Ok(out)
}

/// Name of the variable an anonymous function is assigned to, if any.
fn assigned_name(node: Node, source: &str) -> String {
    let Some(parent) = node.parent() else {
        return String::new();
    };
    match parent.kind() {
        "variable_declarator" => field_text(parent, "name", source).unwrap_or_default(),
        "pair" => field_text(parent, "key", source).unwrap_or_default(),
        "assignment_expression" => field_text(parent, "left", source).unwrap_or_default(),
        _ => String::new(),
    }
}

fn qualify_in_class(node: Node, source: &str, name: &str) -> String {
    if name.is_empty() {
        return String::new();
    }
    let mut current = node.parent();
    while let Some(ancestor) = current {
        if matches!(ancestor.kind(), "class_declaration" | "class") {
            if let Some(class_name) = field_text(ancestor, "name", source) {
                return format!("{}.{}", class_name, name);
            }
        }
        current = ancestor.parent();
    }
    name.to_string()
}

fn extract_class(node: Node, source: &str) -> StrategyResult {
    let mut context = NativeContext::default();
    context.signature_type = "class".to_string();
    context.qualified_name = field_text(node, "name", source).unwrap_or_default();
    if let Some(heritage) = find_child(node, "class_heritage") {
        // "extends Base"
        let text = try_node_text(heritage, source)?;
        let base = text.trim_start_matches("extends").trim();
        context.annotations = json!({ "extends": base }).to_string();
    }
    Ok(context)
}

/// variable_declarator inside var/let/const declarations.
fn extract_variable(node: Node, source: &str) -> StrategyResult {
    let mut context = NativeContext::default();
    context.qualified_name = field_text(node, "name", source).unwrap_or_default();
    if let Some(parent) = node.parent() {
        if let Some(keyword) = parent.child(0) {
            if matches!(keyword.kind(), "const" | "let" | "var") {
                context.modifiers.push(keyword.kind().to_string());
            }
        }
    }
    if let Some(value) = field_text(node, "value", source) {
        context.annotations = json!({ "value": value }).to_string();
    }
    Ok(context)
}

/// call_expression and new_expression.
fn extract_call(node: Node, source: &str) -> StrategyResult {
    let mut context = NativeContext::default();
    let callee = node
        .child_by_field_name("function")
        .or_else(|| node.child_by_field_name("constructor"));
    if let Some(function) = callee {
        context.qualified_name = try_node_text(function, source)?;
        if function.kind() == "member_expression" {
            context.modifiers.push("method".to_string());
        }
    }
    if node.kind() == "new_expression" {
        context.modifiers.push("new".to_string());
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
    if let Some(source_node) = node.child_by_field_name("source") {
        context.qualified_name = try_node_text(source_node, source)?
            .trim_matches(|c| c == '"' || c == '\'')
            .to_string();
    }
    if let Some(clause) = find_child(node, "import_clause") {
        context.signature_type = node_text(clause, source);
    }
    Ok(context)
}
