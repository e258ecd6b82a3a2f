use serde_json::{Map, Number, Value};

use crate::node::{ArraySchema, NumberSchema, ObjectSchema, Schema, SchemaKind, StringSchema};
use crate::report::{IssueCode, ValidationReport};

impl Schema {
    /// Validate `value`, returning the typed output or every violation found.
    ///
    /// The output can differ from the input: undeclared object keys are
    /// stripped, defaults are filled in and coerced numbers are converted.
    pub fn validate(&self, value: &Value) -> Result<Value, ValidationReport> {
        self.validate_at(value, "")
    }

    /// Like [`validate`](Self::validate), with every reported field path
    /// rooted at `path`.
    pub fn validate_at(&self, value: &Value, path: &str) -> Result<Value, ValidationReport> {
        let mut report = ValidationReport::new();
        let output = self.check(Some(value), path, &mut report);
        if !report.is_empty() {
            return Err(report);
        }
        Ok(output.unwrap_or(Value::Null))
    }

    /// Validate a value that may be absent altogether.
    ///
    /// Returns `Ok(None)` when the value is absent and the schema allows it.
    pub fn validate_optional(&self, value: Option<&Value>) -> Result<Option<Value>, ValidationReport> {
        let mut report = ValidationReport::new();
        let output = self.check(value, "", &mut report);
        if !report.is_empty() {
            return Err(report);
        }
        Ok(output)
    }

    fn check(&self, value: Option<&Value>, path: &str, report: &mut ValidationReport) -> Option<Value> {
        match (self.kind(), value) {
            (SchemaKind::Optional(_), None) => None,
            (SchemaKind::Optional(inner), Some(_)) => inner.check(value, path, report),
            (SchemaKind::Nullable(_), Some(Value::Null)) => Some(Value::Null),
            (SchemaKind::Nullable(inner), _) => inner.check(value, path, report),
            (SchemaKind::Default { inner, value: fallback }, None) => {
                inner.check(Some(fallback), path, report)
            }
            (SchemaKind::Default { inner, .. }, Some(_)) => inner.check(value, path, report),
            (SchemaKind::Any, v) => v.cloned(),
            (_, None) => {
                report.push(path, IssueCode::Required, "Required");
                None
            }
            (SchemaKind::String(rules), Some(v)) => check_string(rules, v, path, report),
            (SchemaKind::Number(rules), Some(v)) => check_number(rules, v, path, report),
            (SchemaKind::Boolean, Some(v)) => match v {
                Value::Bool(_) => Some(v.clone()),
                other => {
                    invalid_type("boolean", other, path, report);
                    None
                }
            },
            (SchemaKind::Object(shape), Some(v)) => check_object(shape, v, path, report),
            (SchemaKind::Array(rules), Some(v)) => check_array(rules, v, path, report),
            (SchemaKind::Enum(options), Some(v)) => {
                if options.contains(v) {
                    Some(v.clone())
                } else {
                    let expected: Vec<String> = options.iter().map(literal).collect();
                    report.push(
                        path,
                        IssueCode::InvalidEnumValue,
                        format!(
                            "Invalid enum value. Expected {}, received {}",
                            expected.join(" | "),
                            literal(v)
                        ),
                    );
                    None
                }
            }
            (SchemaKind::Tuple(items), Some(v)) => check_tuple(items, v, path, report),
        }
    }
}

fn check_string(rules: &StringSchema, value: &Value, path: &str, report: &mut ValidationReport) -> Option<Value> {
    let Value::String(s) = value else {
        invalid_type("string", value, path, report);
        return None;
    };
    let len = s.chars().count();
    let before = report.len();
    if let Some(min) = rules.min_length {
        if len < min {
            report.push(
                path,
                IssueCode::TooSmall,
                format!("String must contain at least {min} character(s)"),
            );
        }
    }
    if let Some(max) = rules.max_length {
        if len > max {
            report.push(
                path,
                IssueCode::TooBig,
                format!("String must contain at most {max} character(s)"),
            );
        }
    }
    (report.len() == before).then(|| value.clone())
}

fn check_number(rules: &NumberSchema, value: &Value, path: &str, report: &mut ValidationReport) -> Option<Value> {
    let (number, output) = match value {
        Value::Number(n) => match n.as_f64() {
            Some(f) => (f, value.clone()),
            None => {
                invalid_type("number", value, path, report);
                return None;
            }
        },
        Value::String(s) if rules.coerce => match s.trim().parse::<f64>() {
            Ok(f) if f.is_finite() => (f, number_value(f)),
            _ => {
                report.push(path, IssueCode::InvalidType, "Expected number, received nan");
                return None;
            }
        },
        other => {
            invalid_type("number", other, path, report);
            return None;
        }
    };

    let before = report.len();
    if rules.integer && number.fract() != 0.0 {
        report.push(path, IssueCode::NotInteger, "Expected integer, received float");
    }
    if let Some(min) = rules.minimum {
        if number < min {
            report.push(
                path,
                IssueCode::TooSmall,
                format!("Number must be greater than or equal to {min}"),
            );
        }
    }
    if let Some(max) = rules.maximum {
        if number > max {
            report.push(
                path,
                IssueCode::TooBig,
                format!("Number must be less than or equal to {max}"),
            );
        }
    }
    (report.len() == before).then_some(output)
}

fn check_object(shape: &ObjectSchema, value: &Value, path: &str, report: &mut ValidationReport) -> Option<Value> {
    let Value::Object(input) = value else {
        invalid_type("object", value, path, report);
        return None;
    };
    let before = report.len();
    let mut output = Map::new();
    for (name, schema) in shape.fields() {
        let child = join_key(path, name);
        if let Some(v) = schema.check(input.get(name), &child, report) {
            output.insert(name.clone(), v);
        }
    }
    (report.len() == before).then_some(Value::Object(output))
}

fn check_array(rules: &ArraySchema, value: &Value, path: &str, report: &mut ValidationReport) -> Option<Value> {
    let Value::Array(items) = value else {
        invalid_type("array", value, path, report);
        return None;
    };
    let before = report.len();
    if let Some(min) = rules.min_items {
        if items.len() < min {
            report.push(
                path,
                IssueCode::TooSmall,
                format!("Array must contain at least {min} element(s)"),
            );
        }
    }
    if let Some(max) = rules.max_items {
        if items.len() > max {
            report.push(
                path,
                IssueCode::TooBig,
                format!("Array must contain at most {max} element(s)"),
            );
        }
    }
    let output: Vec<Value> = items
        .iter()
        .enumerate()
        .filter_map(|(i, item)| rules.items.check(Some(item), &join_index(path, i), report))
        .collect();
    (report.len() == before).then_some(Value::Array(output))
}

fn check_tuple(schemas: &[Schema], value: &Value, path: &str, report: &mut ValidationReport) -> Option<Value> {
    let Value::Array(items) = value else {
        invalid_type("array", value, path, report);
        return None;
    };
    let expected = schemas.len();
    if items.len() < expected {
        report.push(
            path,
            IssueCode::TooSmall,
            format!("Array must contain at least {expected} element(s)"),
        );
        return None;
    }
    if items.len() > expected {
        report.push(
            path,
            IssueCode::TooBig,
            format!("Array must contain at most {expected} element(s)"),
        );
        return None;
    }
    let before = report.len();
    let output: Vec<Value> = schemas
        .iter()
        .zip(items)
        .enumerate()
        .map(|(i, (schema, item))| {
            schema
                .check(Some(item), &join_index(path, i), report)
                .unwrap_or(Value::Null)
        })
        .collect();
    (report.len() == before).then_some(Value::Array(output))
}

fn invalid_type(expected: &str, received: &Value, path: &str, report: &mut ValidationReport) {
    report.push(
        path,
        IssueCode::InvalidType,
        format!("Expected {expected}, received {}", type_name(received)),
    );
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn literal(value: &Value) -> String {
    match value {
        Value::String(s) => format!("'{s}'"),
        other => other.to_string(),
    }
}

/// Integral results stay integers so `"21"` coerces to `21`, not `21.0`.
fn number_value(f: f64) -> Value {
    if f.fract() == 0.0 && f.abs() < 9_007_199_254_740_992.0 {
        Value::from(f as i64)
    } else {
        Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null)
    }
}

fn join_key(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}

fn join_index(parent: &str, index: usize) -> String {
    format!("{parent}[{index}]")
}
