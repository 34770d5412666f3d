//! Schema inference and compatibility analysis.
//!
//! Works bottom-up over a parsed [`Ast`]: leaves contribute their type and
//! literal text (as examples), aggregates combine their children. Element
//! and cross-document combination is pairwise unification: the first
//! top-level type mismatch collapses the result to [`SchemaType::Any`],
//! with one refinement: `null` against `T` marks `T` nullable instead of
//! giving up. Inference never fails on a well-formed tree.

use crate::ast::{Ast, Node, NodeId};

/// The broad type a schema describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SchemaType {
    String,
    Number,
    Boolean,
    Null,
    Object,
    Array,
    Any,
}

/// Maximum number of example values kept per schema node.
const MAX_EXAMPLES: usize = 5;

/// An inferred schema.
///
/// `properties` is populated only for objects (in field order), `items`
/// only for arrays.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JsonSchema {
    pub schema_type: SchemaType,
    pub properties: Option<Vec<(String, JsonSchema)>>,
    pub items: Option<Box<JsonSchema>>,
    pub nullable: bool,
    pub examples: Vec<String>,
}

impl JsonSchema {
    /// The unconstrained schema: matches anything.
    pub const fn any() -> Self {
        Self {
            schema_type: SchemaType::Any,
            properties: None,
            items: None,
            nullable: false,
            examples: Vec::new(),
        }
    }

    fn leaf(schema_type: SchemaType, example: String) -> Self {
        Self {
            schema_type,
            properties: None,
            items: None,
            nullable: false,
            examples: vec![example],
        }
    }

    /// Looks up an object property's schema by name.
    pub fn property(&self, name: &str) -> Option<&JsonSchema> {
        self.properties
            .as_ref()?
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, schema)| schema)
    }
}

/// Configuration for schema inference.
///
/// # Default Values
///
/// | Setting | Default |
/// |---------|---------|
/// | `max_schema_depth` | 32 |
/// | `infer_array_item_types` | `true` |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InferOptions {
    /// Nesting beyond this depth collapses to `Any`.
    pub max_schema_depth: usize,

    /// When `false`, array item schemas are not inferred and stay `Any`.
    pub infer_array_item_types: bool,
}

impl Default for InferOptions {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl InferOptions {
    /// Default configuration, usable in const contexts.
    pub const DEFAULT: Self = Self {
        max_schema_depth: 32,
        infer_array_item_types: true,
    };

    /// Creates a new configuration with default values.
    #[inline]
    pub const fn new() -> Self {
        Self::DEFAULT
    }

    /// Sets the depth beyond which schemas collapse to `Any`.
    #[inline]
    pub const fn with_max_schema_depth(mut self, depth: usize) -> Self {
        self.max_schema_depth = depth;
        self
    }

    /// Controls whether array item schemas are inferred.
    #[inline]
    pub const fn with_infer_array_item_types(mut self, infer: bool) -> Self {
        self.infer_array_item_types = infer;
        self
    }
}

/// Infers a schema for one parsed document.
pub fn infer_schema(ast: &Ast, options: &InferOptions) -> JsonSchema {
    match ast.root() {
        Some(root) => infer_node(ast, root, options, 0),
        None => JsonSchema::any(),
    }
}

/// Infers one schema describing several independent documents.
///
/// Top-level values are unified pairwise; any type mismatch collapses the
/// result to `Any` (null against `T` sets `nullable` instead).
pub fn infer_combined(asts: &[Ast], options: &InferOptions) -> JsonSchema {
    let mut iter = asts.iter();
    let Some(first) = iter.next() else {
        return JsonSchema::any();
    };
    let mut combined = infer_schema(first, options);
    for ast in iter {
        combined = unify(combined, infer_schema(ast, options), options, 0);
    }
    combined
}

fn infer_node(ast: &Ast, id: NodeId, options: &InferOptions, depth: usize) -> JsonSchema {
    if depth >= options.max_schema_depth {
        return JsonSchema::any();
    }
    match ast.node(id) {
        Node::Null { .. } => JsonSchema {
            nullable: true,
            ..JsonSchema::leaf(SchemaType::Null, "null".to_string())
        },
        Node::Bool { value, .. } => {
            JsonSchema::leaf(SchemaType::Boolean, value.to_string())
        }
        Node::Number { text, .. } => {
            JsonSchema::leaf(SchemaType::Number, ast.text(*text).to_string())
        }
        Node::String { text, .. } => {
            JsonSchema::leaf(SchemaType::String, ast.text(*text).to_string())
        }
        Node::Array { elements, .. } => {
            let items = if options.infer_array_item_types {
                infer_items(ast, ast.children(*elements), options, depth)
            } else {
                JsonSchema::any()
            };
            JsonSchema {
                schema_type: SchemaType::Array,
                properties: None,
                items: Some(Box::new(items)),
                nullable: false,
                examples: Vec::new(),
            }
        }
        Node::Object { properties, .. } => {
            let mut props = Vec::with_capacity(properties.len());
            for child in ast.children(*properties) {
                if let Node::Property { key, value, .. } = ast.node(*child) {
                    let name = match ast.node(*key) {
                        Node::String { text, .. } => ast.text(*text).to_string(),
                        other => other.span().to_string(),
                    };
                    props.push((name, infer_node(ast, *value, options, depth + 1)));
                }
            }
            JsonSchema {
                schema_type: SchemaType::Object,
                properties: Some(props),
                items: None,
                nullable: false,
                examples: Vec::new(),
            }
        }
        // Property nodes never appear in value position.
        Node::Property { value, .. } => infer_node(ast, *value, options, depth),
    }
}

fn infer_items(ast: &Ast, elements: &[NodeId], options: &InferOptions, depth: usize) -> JsonSchema {
    let mut iter = elements.iter();
    let Some(first) = iter.next() else {
        // Nothing to observe: an empty array constrains nothing.
        return JsonSchema::any();
    };
    let mut items = infer_node(ast, *first, options, depth + 1);
    for element in iter {
        if items.schema_type == SchemaType::Any {
            break;
        }
        items = unify(items, infer_node(ast, *element, options, depth + 1), options, depth + 1);
    }
    items
}

/// Pairwise unification of two schemas.
fn unify(a: JsonSchema, b: JsonSchema, options: &InferOptions, depth: usize) -> JsonSchema {
    if depth >= options.max_schema_depth {
        return JsonSchema::any();
    }
    if a.schema_type == SchemaType::Any || b.schema_type == SchemaType::Any {
        return JsonSchema::any();
    }

    // Null refines the other side to nullable instead of collapsing it.
    if a.schema_type == SchemaType::Null && b.schema_type != SchemaType::Null {
        return JsonSchema { nullable: true, ..b };
    }
    if b.schema_type == SchemaType::Null && a.schema_type != SchemaType::Null {
        return JsonSchema { nullable: true, ..a };
    }

    if a.schema_type != b.schema_type {
        return JsonSchema::any();
    }

    let nullable = a.nullable || b.nullable;
    match a.schema_type {
        SchemaType::Object => {
            let mut props = a.properties.unwrap_or_default();
            let mut extra = Vec::new();
            for (name, schema) in b.properties.unwrap_or_default() {
                match props.iter_mut().find(|(key, _)| *key == name) {
                    Some((_, existing)) => {
                        let merged =
                            unify(existing.clone(), schema, options, depth + 1);
                        *existing = merged;
                    }
                    None => extra.push((name, schema)),
                }
            }
            props.extend(extra);
            JsonSchema {
                schema_type: SchemaType::Object,
                properties: Some(props),
                items: None,
                nullable,
                examples: Vec::new(),
            }
        }
        SchemaType::Array => {
            let items = match (a.items, b.items) {
                (Some(left), Some(right)) => unify(*left, *right, options, depth + 1),
                (Some(one), None) | (None, Some(one)) => *one,
                (None, None) => JsonSchema::any(),
            };
            JsonSchema {
                schema_type: SchemaType::Array,
                properties: None,
                items: Some(Box::new(items)),
                nullable,
                examples: Vec::new(),
            }
        }
        _ => {
            let mut examples = a.examples;
            for example in b.examples {
                if examples.len() >= MAX_EXAMPLES {
                    break;
                }
                if !examples.contains(&example) {
                    examples.push(example);
                }
            }
            JsonSchema {
                schema_type: a.schema_type,
                properties: None,
                items: None,
                nullable,
                examples,
            }
        }
    }
}

/// Whether data matching `a` also matches `b`.
///
/// Asymmetric for objects: every property of `a` must exist in `b` with a
/// compatible schema, while `b` may carry extras. Reflexive by
/// construction.
pub fn check_compatible(a: &JsonSchema, b: &JsonSchema) -> bool {
    compatible_at(a, b, InferOptions::DEFAULT.max_schema_depth)
}

fn compatible_at(a: &JsonSchema, b: &JsonSchema, budget: usize) -> bool {
    if budget == 0 {
        return true;
    }
    if a.schema_type == SchemaType::Any || b.schema_type == SchemaType::Any {
        return true;
    }
    if a.schema_type != b.schema_type {
        return false;
    }
    match a.schema_type {
        SchemaType::Object => {
            let empty = Vec::new();
            let theirs = b.properties.as_ref().unwrap_or(&empty);
            a.properties.as_ref().unwrap_or(&empty).iter().all(|(name, schema)| {
                theirs
                    .iter()
                    .find(|(key, _)| key == name)
                    .is_some_and(|(_, other)| compatible_at(schema, other, budget - 1))
            })
        }
        SchemaType::Array => match (&a.items, &b.items) {
            (Some(left), Some(right)) => compatible_at(left, right, budget - 1),
            _ => true,
        },
        _ => true,
    }
}

/// Advisory hints about an inferred schema.
///
/// Free text, never acted on by the parser or linter.
pub fn suggest_optimizations(schema: &JsonSchema) -> Vec<String> {
    let mut out = Vec::new();
    suggest_at(schema, "$", 0, &mut out);
    out
}

fn suggest_at(schema: &JsonSchema, path: &str, nullable_run: usize, out: &mut Vec<String>) {
    let nullable_run = if schema.nullable { nullable_run + 1 } else { 0 };
    if nullable_run == 3 {
        out.push(format!(
            "{path}: three consecutive levels are nullable; consider flattening optional data"
        ));
    }

    match schema.schema_type {
        SchemaType::Object => {
            if let Some(props) = &schema.properties {
                if props.len() > 50 {
                    out.push(format!(
                        "{path}: object has {} properties; consider splitting it into smaller records",
                        props.len()
                    ));
                }
                for (name, prop) in props {
                    suggest_at(prop, &format!("{path}.{name}"), nullable_run, out);
                }
            }
        }
        SchemaType::Array => {
            if let Some(items) = &schema.items {
                if items.schema_type == SchemaType::Any {
                    out.push(format!(
                        "{path}: array mixes element types; consider normalizing to one shape"
                    ));
                }
                suggest_at(items, &format!("{path}[]"), nullable_run, out);
            }
        }
        SchemaType::String => {
            if schema.examples.iter().any(|e| looks_like_url(e)) {
                out.push(format!(
                    "{path}: values look like URLs; consider validating them as URIs"
                ));
            } else if schema.examples.iter().any(|e| looks_like_email(e)) {
                out.push(format!(
                    "{path}: values look like email addresses; consider validating the format"
                ));
            }
        }
        _ => {}
    }
}

fn looks_like_url(text: &str) -> bool {
    text.starts_with("http://") || text.starts_with("https://")
}

fn looks_like_email(text: &str) -> bool {
    let Some((local, domain)) = text.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !text.contains(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParseOptions;
    use crate::lexer::Grammar;
    use crate::parser::parse;

    fn infer(source: &str) -> JsonSchema {
        let ast = parse(source, Grammar::Json, &ParseOptions::default()).unwrap();
        infer_schema(&ast, &InferOptions::default())
    }

    #[test]
    fn test_infer_uniform_array() {
        let schema = infer(r#"{"x": [1, 2, 3]}"#);
        assert_eq!(schema.schema_type, SchemaType::Object);
        let x = schema.property("x").unwrap();
        assert_eq!(x.schema_type, SchemaType::Array);
        assert_eq!(x.items.as_ref().unwrap().schema_type, SchemaType::Number);
    }

    #[test]
    fn test_infer_mixed_array_collapses() {
        let schema = infer(r#"{"x": [1, "a"]}"#);
        let x = schema.property("x").unwrap();
        assert_eq!(x.items.as_ref().unwrap().schema_type, SchemaType::Any);
    }

    #[test]
    fn test_null_elements_mark_nullable() {
        let schema = infer("[1, null, 2]");
        let items = schema.items.unwrap();
        assert_eq!(items.schema_type, SchemaType::Number);
        assert!(items.nullable);
    }

    #[test]
    fn test_empty_array_is_any() {
        let schema = infer("[]");
        assert_eq!(schema.items.unwrap().schema_type, SchemaType::Any);
    }

    #[test]
    fn test_leaf_examples_capped() {
        let schema = infer(r#"["a", "b", "c", "d", "e", "f", "g"]"#);
        let items = schema.items.unwrap();
        assert_eq!(items.schema_type, SchemaType::String);
        assert_eq!(items.examples.len(), 5);
        assert_eq!(items.examples[0], "a");
    }

    #[test]
    fn test_properties_in_field_order() {
        let schema = infer(r#"{"z": 1, "a": 2, "m": 3}"#);
        let names: Vec<&str> = schema
            .properties
            .as_ref()
            .unwrap()
            .iter()
            .map(|(name, _)| name.as_str())
            .collect();
        assert_eq!(names, ["z", "a", "m"]);
    }

    #[test]
    fn test_depth_collapse() {
        let ast = parse(
            r#"{"a": {"b": {"c": 1}}}"#,
            Grammar::Json,
            &ParseOptions::default(),
        )
        .unwrap();
        let schema = infer_schema(&ast, &InferOptions::new().with_max_schema_depth(2));
        let a = schema.property("a").unwrap();
        assert_eq!(a.schema_type, SchemaType::Object);
        assert_eq!(
            a.property("b").unwrap().schema_type,
            SchemaType::Any
        );
    }

    #[test]
    fn test_item_inference_can_be_disabled() {
        let ast = parse("[1, 2]", Grammar::Json, &ParseOptions::default()).unwrap();
        let schema =
            infer_schema(&ast, &InferOptions::new().with_infer_array_item_types(false));
        assert_eq!(schema.items.unwrap().schema_type, SchemaType::Any);
    }

    #[test]
    fn test_combined_unifies_objects() {
        let opts = ParseOptions::default();
        let a = parse(r#"{"id": 1}"#, Grammar::Json, &opts).unwrap();
        let b = parse(r#"{"id": 2, "name": "x"}"#, Grammar::Json, &opts).unwrap();
        let schema = infer_combined(&[a, b], &InferOptions::default());
        assert_eq!(schema.schema_type, SchemaType::Object);
        assert_eq!(
            schema.property("id").unwrap().schema_type,
            SchemaType::Number
        );
        assert_eq!(
            schema.property("name").unwrap().schema_type,
            SchemaType::String
        );
    }

    #[test]
    fn test_combined_mismatch_collapses() {
        let opts = ParseOptions::default();
        let a = parse("1", Grammar::Json, &opts).unwrap();
        let b = parse(r#""one""#, Grammar::Json, &opts).unwrap();
        let schema = infer_combined(&[a, b], &InferOptions::default());
        assert_eq!(schema.schema_type, SchemaType::Any);
    }

    #[test]
    fn test_combined_null_sets_nullable() {
        let opts = ParseOptions::default();
        let a = parse("null", Grammar::Json, &opts).unwrap();
        let b = parse("3.5", Grammar::Json, &opts).unwrap();
        let schema = infer_combined(&[a, b], &InferOptions::default());
        assert_eq!(schema.schema_type, SchemaType::Number);
        assert!(schema.nullable);
    }

    #[test]
    fn test_compatibility_is_reflexive() {
        let schema = infer(r#"{"a": [1], "b": {"c": true}}"#);
        assert!(check_compatible(&schema, &schema));
    }

    #[test]
    fn test_compatibility_is_asymmetric() {
        let narrow = infer(r#"{"id": 1}"#);
        let wide = infer(r#"{"id": 2, "name": "x"}"#);
        assert!(check_compatible(&narrow, &wide));
        assert!(!check_compatible(&wide, &narrow));
    }

    #[test]
    fn test_compatibility_type_mismatch() {
        let a = infer(r#"{"id": 1}"#);
        let b = infer(r#"{"id": "one"}"#);
        assert!(!check_compatible(&a, &b));
    }

    #[test]
    fn test_suggest_mixed_array() {
        let schema = infer(r#"[1, "a"]"#);
        let hints = suggest_optimizations(&schema);
        assert_eq!(hints.len(), 1);
        assert!(hints[0].contains("mixes element types"));
    }

    #[test]
    fn test_suggest_url_strings() {
        let schema = infer(r#"{"link": "https://example.com/a"}"#);
        let hints = suggest_optimizations(&schema);
        assert_eq!(hints.len(), 1);
        assert!(hints[0].contains("URL"));
    }

    #[test]
    fn test_suggest_wide_object() {
        let members: Vec<String> = (0..60).map(|i| format!("\"k{i}\": {i}")).collect();
        let schema = infer(&format!("{{{}}}", members.join(", ")));
        let hints = suggest_optimizations(&schema);
        assert_eq!(hints.len(), 1);
        assert!(hints[0].contains("60 properties"));
    }

    #[test]
    fn test_clean_schema_has_no_suggestions() {
        let schema = infer(r#"{"name": "svc", "port": 8080}"#);
        assert!(suggest_optimizations(&schema).is_empty());
    }
}
