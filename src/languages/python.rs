// Python language registration for the tree-sitter-python grammar.

use serde_json::json;
use tree_sitter::Node;

use crate::classifier::{Classifier, NodeConfig};
use crate::registry::LanguageSupport;
use crate::semantics::{flags, SemanticType};
use crate::strategy::{
    field_text, find_child, find_children, node_text, try_node_text, Category, NativeContext,
    ParameterInfo, StrategyResult, StrategySet,
};

pub fn support() -> LanguageSupport {
    LanguageSupport {
        name: "python",
        aliases: &["py", "python3"],
        extensions: &["py", "pyi"],
        grammar: || tree_sitter_python::LANGUAGE.into(),
        classifier: Classifier::from_table(NODE_TYPES),
        strategies: StrategySet {
            function: Some(extract_function),
            class: Some(extract_class),
            variable: Some(extract_assignment),
            call: Some(extract_call),
            import: Some(extract_import),
        },
    }
}

const NODE_TYPES: &[(&str, NodeConfig)] = &[
    // Definitions
    ("function_definition", NodeConfig::with_strategy(SemanticType::DEFINITION_FUNCTION, Category::Function)),
    // The "lambda" kind names both the expression and its keyword token; a
    // leaf occurrence is the token.
    ("lambda", NodeConfig::full(SemanticType::COMPUTATION_LAMBDA, flags::KEYWORD_IF_LEAF, Category::Function)),
    ("class_definition", NodeConfig::with_strategy(SemanticType::DEFINITION_CLASS, Category::Class)),
    ("decorated_definition", NodeConfig::new(SemanticType::DEFINITION_FUNCTION)),
    ("assignment", NodeConfig::with_strategy(SemanticType::DEFINITION_VARIABLE, Category::Variable)),
    ("augmented_assignment", NodeConfig::new(SemanticType::OPERATOR_ASSIGNMENT)),
    ("global_statement", NodeConfig::new(SemanticType::EXECUTION_DECLARATION)),
    ("nonlocal_statement", NodeConfig::new(SemanticType::EXECUTION_DECLARATION)),
    // External interfaces
    ("import_statement", NodeConfig::with_strategy(SemanticType::EXTERNAL_IMPORT, Category::Import)),
    ("import_from_statement", NodeConfig::with_strategy(SemanticType::EXTERNAL_IMPORT, Category::Import)),
    ("future_import_statement", NodeConfig::new(SemanticType::EXTERNAL_IMPORT)),
    // Calls and access
    ("call", NodeConfig::with_strategy(SemanticType::COMPUTATION_CALL, Category::Call)),
    ("attribute", NodeConfig::new(SemanticType::COMPUTATION_ACCESS)),
    ("subscript", NodeConfig::new(SemanticType::COMPUTATION_ACCESS)),
    // Operators
    ("binary_operator", NodeConfig::new(SemanticType::OPERATOR_ARITHMETIC)),
    ("unary_operator", NodeConfig::new(SemanticType::OPERATOR_ARITHMETIC)),
    ("comparison_operator", NodeConfig::new(SemanticType::OPERATOR_COMPARISON)),
    ("boolean_operator", NodeConfig::new(SemanticType::OPERATOR_LOGICAL)),
    ("not_operator", NodeConfig::new(SemanticType::OPERATOR_LOGICAL)),
    ("conditional_expression", NodeConfig::new(SemanticType::FLOW_CONDITIONAL)),
    // Flow control
    ("if_statement", NodeConfig::new(SemanticType::FLOW_CONDITIONAL)),
    ("elif_clause", NodeConfig::new(SemanticType::FLOW_CONDITIONAL)),
    ("else_clause", NodeConfig::new(SemanticType::FLOW_CONDITIONAL)),
    ("match_statement", NodeConfig::new(SemanticType::FLOW_CONDITIONAL)),
    ("case_clause", NodeConfig::new(SemanticType::PATTERN_MATCH)),
    ("for_statement", NodeConfig::new(SemanticType::FLOW_LOOP)),
    ("while_statement", NodeConfig::new(SemanticType::FLOW_LOOP)),
    ("return_statement", NodeConfig::new(SemanticType::FLOW_JUMP)),
    ("break_statement", NodeConfig::new(SemanticType::FLOW_JUMP)),
    ("continue_statement", NodeConfig::new(SemanticType::FLOW_JUMP)),
    ("pass_statement", NodeConfig::new(SemanticType::EXECUTION_STATEMENT)),
    ("await", NodeConfig::new(SemanticType::FLOW_SYNC)),
    ("yield", NodeConfig::new(SemanticType::FLOW_SYNC)),
    ("with_statement", NodeConfig::new(SemanticType::ORGANIZATION_BLOCK)),
    // Error handling
    ("try_statement", NodeConfig::new(SemanticType::ERROR_TRY)),
    ("except_clause", NodeConfig::new(SemanticType::ERROR_CATCH)),
    ("finally_clause", NodeConfig::new(SemanticType::ERROR_FINALLY)),
    ("raise_statement", NodeConfig::new(SemanticType::ERROR_THROW)),
    ("assert_statement", NodeConfig::new(SemanticType::ERROR_THROW)),
    // Names
    ("identifier", NodeConfig::new(SemanticType::NAME_IDENTIFIER)),
    ("dotted_name", NodeConfig::new(SemanticType::NAME_QUALIFIED)),
    ("aliased_import", NodeConfig::new(SemanticType::NAME_QUALIFIED)),
    // Literals
    ("integer", NodeConfig::new(SemanticType::LITERAL_NUMBER)),
    ("float", NodeConfig::new(SemanticType::LITERAL_NUMBER)),
    ("string", NodeConfig::new(SemanticType::LITERAL_STRING)),
    ("concatenated_string", NodeConfig::new(SemanticType::LITERAL_STRING)),
    ("string_content", NodeConfig::new(SemanticType::LITERAL_STRING)),
    ("true", NodeConfig::with_flags(SemanticType::LITERAL_ATOMIC, flags::IS_KEYWORD)),
    ("false", NodeConfig::with_flags(SemanticType::LITERAL_ATOMIC, flags::IS_KEYWORD)),
    ("none", NodeConfig::with_flags(SemanticType::LITERAL_ATOMIC, flags::IS_KEYWORD)),
    ("list", NodeConfig::new(SemanticType::LITERAL_STRUCTURED)),
    ("dictionary", NodeConfig::new(SemanticType::LITERAL_STRUCTURED)),
    ("set", NodeConfig::new(SemanticType::LITERAL_STRUCTURED)),
    ("tuple", NodeConfig::new(SemanticType::LITERAL_STRUCTURED)),
    ("pair", NodeConfig::new(SemanticType::LITERAL_STRUCTURED)),
    // Comprehensions are transforms, not plain literals
    ("list_comprehension", NodeConfig::new(SemanticType::TRANSFORM_PROJECTION)),
    ("dictionary_comprehension", NodeConfig::new(SemanticType::TRANSFORM_PROJECTION)),
    ("set_comprehension", NodeConfig::new(SemanticType::TRANSFORM_PROJECTION)),
    ("generator_expression", NodeConfig::new(SemanticType::TRANSFORM_ITERATION)),
    ("for_in_clause", NodeConfig::new(SemanticType::TRANSFORM_ITERATION)),
    ("if_clause", NodeConfig::new(SemanticType::TRANSFORM_QUERY)),
    // Types
    ("type", NodeConfig::new(SemanticType::TYPE_REFERENCE)),
    ("generic_type", NodeConfig::new(SemanticType::TYPE_GENERIC)),
    ("union_type", NodeConfig::new(SemanticType::TYPE_COMPOSITE)),
    // Patterns
    ("pattern_list", NodeConfig::new(SemanticType::PATTERN_DESTRUCTURE)),
    ("tuple_pattern", NodeConfig::new(SemanticType::PATTERN_DESTRUCTURE)),
    ("list_pattern", NodeConfig::new(SemanticType::PATTERN_DESTRUCTURE)),
    ("list_splat_pattern", NodeConfig::new(SemanticType::PATTERN_DESTRUCTURE)),
    ("dictionary_splat_pattern", NodeConfig::new(SemanticType::PATTERN_DESTRUCTURE)),
    // Organization
    ("module", NodeConfig::new(SemanticType::ORGANIZATION_CONTAINER)),
    ("block", NodeConfig::new(SemanticType::ORGANIZATION_BLOCK)),
    ("parameters", NodeConfig::new(SemanticType::ORGANIZATION_LIST)),
    ("lambda_parameters", NodeConfig::new(SemanticType::ORGANIZATION_LIST)),
    ("argument_list", NodeConfig::new(SemanticType::ORGANIZATION_LIST)),
    ("expression_statement", NodeConfig::new(SemanticType::EXECUTION_STATEMENT)),
    // Metadata
    ("comment", NodeConfig::new(SemanticType::METADATA_COMMENT)),
    ("decorator", NodeConfig::new(SemanticType::METADATA_ANNOTATION)),
    // Keyword tokens
    ("def", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("class", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("if", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("elif", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("else", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("for", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("while", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("return", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("import", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("from", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("try", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("except", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("finally", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("raise", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("with", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("as", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("pass", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("break", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("continue", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("global", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("nonlocal", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("async", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("and", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("or", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("not", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("in", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("is", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("del", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("assert", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("match", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
    ("case", NodeConfig::with_flags(SemanticType::NAME_KEYWORD, flags::IS_KEYWORD)),
];

/// function_definition and lambda.
fn extract_function(node: Node, source: &str) -> StrategyResult {
    let mut context = NativeContext::default();

    if let Some(return_type) = field_text(node, "return_type", source) {
        context.signature_type = return_type;
    }
    if let Some(params) = node.child_by_field_name("parameters") {
        context.parameters = parameter_list(params, source)?;
    }
    if find_child(node, "async").is_some() {
        context.modifiers.push("async".to_string());
    }
    if let Some(name) = field_text(node, "name", source) {
        context.qualified_name = qualify_in_class(node, source, &name);
    }
    let decorators = decorators_of(node, source);
    if !decorators.is_empty() {
        context.annotations = json!({ "decorators": decorators }).to_string();
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
            "identifier" => out.push(ParameterInfo::named(try_node_text(child, source)?)),
            "typed_parameter" => {
                let mut param = ParameterInfo::default();
                if let Some(inner) = child.named_child(0) {
                    param.name = try_node_text(inner, source)?;
                }
                if let Some(ty) = field_text(child, "type", source) {
                    param.type_name = ty;
                }
                out.push(param);
            }
            "default_parameter" | "typed_default_parameter" => {
                let mut param = ParameterInfo::default();
                if let Some(name) = field_text(child, "name", source) {
                    param.name = name;
                }
                if let Some(ty) = field_text(child, "type", source) {
                    param.type_name = ty;
                }
                if let Some(value) = field_text(child, "value", source) {
                    param.default_value = value;
                }
                param.is_optional = true;
                out.push(param);
            }
            "list_splat_pattern" | "dictionary_splat_pattern" => {
                let mut param = ParameterInfo::named(try_node_text(child, source)?);
                param.is_variadic = true;
                out.push(param);
            }
            _ => {}
        }
    }
    Ok(out)
}

/// "Class.method" when the function sits in a class body.
fn qualify_in_class(node: Node, source: &str, name: &str) -> String {
    let mut current = node.parent();
    while let Some(ancestor) = current {
        if ancestor.kind() == "class_definition" {
            if let Some(class_name) = field_text(ancestor, "name", source) {
                return format!("{}.{}", class_name, name);
            }
        }
        current = ancestor.parent();
    }
    name.to_string()
}

/// Decorators hang off a wrapping decorated_definition node.
fn decorators_of(node: Node, source: &str) -> Vec<String> {
    let Some(parent) = node.parent() else {
        return Vec::new();
    };
    if parent.kind() != "decorated_definition" {
        return Vec::new();
    }
    find_children(parent, "decorator")
        .into_iter()
        .map(|d| node_text(d, source))
        .collect()
}

fn extract_class(node: Node, source: &str) -> StrategyResult {
    let mut context = NativeContext::default();
    context.signature_type = "class".to_string();
    context.qualified_name = field_text(node, "name", source).unwrap_or_default();

    let mut bases = Vec::new();
    if let Some(superclasses) = node.child_by_field_name("superclasses") {
        for i in 0..superclasses.named_child_count() {
            if let Some(base) = superclasses.named_child(i) {
                bases.push(try_node_text(base, source)?);
            }
        }
    }
    let decorators = decorators_of(node, source);
    if !bases.is_empty() || !decorators.is_empty() {
        context.annotations = json!({ "bases": bases, "decorators": decorators }).to_string();
    }
    Ok(context)
}

fn extract_assignment(node: Node, source: &str) -> StrategyResult {
    let mut context = NativeContext::default();
    if let Some(left) = node.child_by_field_name("left") {
        context.qualified_name = try_node_text(left, source)?;
    }
    if let Some(ty) = field_text(node, "type", source) {
        context.signature_type = ty;
    }
    if let Some(value) = field_text(node, "right", source) {
        context.annotations = json!({ "value": value }).to_string();
    }
    Ok(context)
}

fn extract_call(node: Node, source: &str) -> StrategyResult {
    let mut context = NativeContext::default();
    if let Some(function) = node.child_by_field_name("function") {
        context.qualified_name = try_node_text(function, source)?;
        if function.kind() == "attribute" {
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

/// import_statement and import_from_statement.
fn extract_import(node: Node, source: &str) -> StrategyResult {
    let mut context = NativeContext::default();
    if node.kind() == "import_from_statement" {
        context.qualified_name = field_text(node, "module_name", source).unwrap_or_default();
        let mut names = Vec::new();
        for child in find_children(node, "dotted_name").into_iter().skip(1) {
            names.push(node_text(child, source));
        }
        for child in find_children(node, "aliased_import") {
            names.push(node_text(child, source));
        }
        context.signature_type = names.join(", ");
        return Ok(context);
    }
    let mut names = Vec::new();
    for child in find_children(node, "dotted_name") {
        names.push(node_text(child, source));
    }
    for child in find_children(node, "aliased_import") {
        names.push(node_text(child, source));
    }
    context.qualified_name = names.join(", ");
    Ok(context)
}
