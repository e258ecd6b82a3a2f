//! Translation of schema nodes into OpenAPI 3.0 Schema Objects.

use serde_json::{json, Map, Number, Value};
use vetted_schema::{Schema, SchemaKind};

/// Describe `schema` as an OpenAPI Schema Object.
///
/// Wrappers are unwrapped first; a `Nullable` anywhere in the chain adds
/// `nullable: true` and a `Default` contributes its value as `default`.
/// `None` and schemas with no OpenAPI counterpart describe as `{}`.
pub fn schema_object(schema: Option<&Schema>) -> Value {
    match schema {
        Some(schema) => describe(schema, false),
        None => json!({}),
    }
}

/// Like [`schema_object`], forcing `nullable: true` on typed schemas.
pub fn nullable_schema_object(schema: &Schema) -> Value {
    describe(schema, true)
}

fn describe(schema: &Schema, nullable: bool) -> Value {
    let (base, flags) = schema.unwrap_flags();
    let nullable = nullable || flags.nullable;

    let mut out = Map::new();
    match base.kind() {
        SchemaKind::String(rules) => {
            out.insert("type".into(), json!("string"));
            insert_opt(&mut out, "minLength", rules.min_length.map(Value::from));
            insert_opt(&mut out, "maxLength", rules.max_length.map(Value::from));
        }
        SchemaKind::Number(rules) => {
            out.insert("type".into(), json!("number"));
            insert_opt(&mut out, "minimum", rules.minimum.map(number));
            insert_opt(&mut out, "maximum", rules.maximum.map(number));
        }
        SchemaKind::Boolean => {
            out.insert("type".into(), json!("boolean"));
        }
        SchemaKind::Object(shape) => {
            let properties: Map<String, Value> = shape
                .fields()
                .iter()
                .map(|(name, field)| (name.clone(), describe(field, false)))
                .collect();
            let required: Vec<&str> = shape
                .fields()
                .iter()
                .filter(|(_, field)| !field.is_optional())
                .map(|(name, _)| name.as_str())
                .collect();
            out.insert("type".into(), json!("object"));
            out.insert("properties".into(), Value::Object(properties));
            // OpenAPI 3.0 forbids an empty `required` array.
            if !required.is_empty() {
                out.insert("required".into(), json!(required));
            }
        }
        SchemaKind::Array(rules) => {
            out.insert("type".into(), json!("array"));
            out.insert("items".into(), describe(&rules.items, false));
            insert_opt(&mut out, "minItems", rules.min_items.map(Value::from));
            insert_opt(&mut out, "maxItems", rules.max_items.map(Value::from));
        }
        SchemaKind::Enum(_) | SchemaKind::Tuple(_) => {
            out.insert("type".into(), json!("array"));
        }
        SchemaKind::Any
        | SchemaKind::Optional(_)
        | SchemaKind::Nullable(_)
        | SchemaKind::Default { .. } => return json!({}),
    }

    if nullable {
        out.insert("nullable".into(), json!(true));
    }
    if let Some(fallback) = default_value(schema) {
        out.insert("default".into(), fallback.clone());
    }
    Value::Object(out)
}

fn default_value(schema: &Schema) -> Option<&Value> {
    let mut current = schema;
    loop {
        match current.kind() {
            SchemaKind::Default { value, .. } => return Some(value),
            SchemaKind::Optional(inner) | SchemaKind::Nullable(inner) => current = inner,
            _ => return None,
        }
    }
}

fn insert_opt(out: &mut Map<String, Value>, key: &str, value: Option<Value>) {
    if let Some(value) = value {
        out.insert(key.to_string(), value);
    }
}

/// Bounds are stored as `f64`; whole numbers are written without a fraction.
fn number(value: f64) -> Value {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        Value::from(value as i64)
    } else {
        Number::from_f64(value).map(Value::Number).unwrap_or(Value::Null)
    }
}
