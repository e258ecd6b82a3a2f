use serde_json::json;
use vetted_schema::{
    any, array, boolean, enumeration, number, object, string, tuple, IssueCode, SchemaExt,
};

// ── Primitives ──────────────────────────────────────────────────────────────

#[test]
fn string_max_length_boundary() {
    let schema: vetted_schema::Schema = string().max(10).into();
    assert!(schema.validate(&json!("abcdefghij")).is_ok());
    let report = schema.validate(&json!("abcdefghijk")).unwrap_err();
    assert_eq!(report.len(), 1);
    assert_eq!(report.errors[0].code, IssueCode::TooBig);
    assert_eq!(report.errors[0].field, "value");
}

#[test]
fn string_counts_characters_not_bytes() {
    let schema: vetted_schema::Schema = string().max(3).into();
    assert!(schema.validate(&json!("héé")).is_ok());
}

#[test]
fn string_rejects_other_types() {
    let schema: vetted_schema::Schema = string().into();
    let report = schema.validate(&json!(42)).unwrap_err();
    assert_eq!(report.errors[0].code, IssueCode::InvalidType);
    assert_eq!(report.errors[0].message, "Expected string, received number");
}

#[test]
fn number_range_boundaries() {
    let schema: vetted_schema::Schema = number().min(18).max(99).into();
    assert_eq!(schema.validate(&json!(18)).unwrap(), json!(18));
    assert_eq!(schema.validate(&json!(99)).unwrap(), json!(99));

    let low = schema.validate(&json!(17)).unwrap_err();
    assert_eq!(low.errors[0].code, IssueCode::TooSmall);
    assert_eq!(low.errors[0].message, "Number must be greater than or equal to 18");

    let high = schema.validate(&json!(100)).unwrap_err();
    assert_eq!(high.errors[0].code, IssueCode::TooBig);
}

#[test]
fn number_coerces_strings_and_keeps_integers_integral() {
    let schema: vetted_schema::Schema = number().coerce().min(18).into();
    assert_eq!(schema.validate(&json!("21")).unwrap(), json!(21));
    assert_eq!(schema.validate(&json!("21.5")).unwrap(), json!(21.5));
    assert!(schema.validate(&json!("3")).is_err());
    assert!(schema.validate(&json!("abc")).is_err());
}

#[test]
fn number_without_coerce_rejects_strings() {
    let schema: vetted_schema::Schema = number().into();
    assert!(schema.validate(&json!("21")).is_err());
}

#[test]
fn integer_rule() {
    let schema: vetted_schema::Schema = number().int().into();
    assert!(schema.validate(&json!(4)).is_ok());
    let report = schema.validate(&json!(4.5)).unwrap_err();
    assert_eq!(report.errors[0].code, IssueCode::NotInteger);
}

#[test]
fn boolean_values() {
    assert!(boolean().validate(&json!(true)).is_ok());
    assert!(boolean().validate(&json!("true")).is_err());
}

// ── Wrappers ────────────────────────────────────────────────────────────────

#[test]
fn optional_accepts_absence_but_not_null() {
    let schema = string().optional();
    assert_eq!(schema.validate_optional(None).unwrap(), None);
    assert!(schema.validate(&json!(null)).is_err());
}

#[test]
fn nullable_accepts_null_but_not_absence() {
    let schema = string().nullable();
    assert_eq!(schema.validate(&json!(null)).unwrap(), json!(null));
    let report = schema.validate_optional(None).unwrap_err();
    assert_eq!(report.errors[0].code, IssueCode::Required);
}

#[test]
fn default_fills_absent_values_only() {
    let schema = string().with_default("blue");
    assert_eq!(schema.validate_optional(None).unwrap(), Some(json!("blue")));
    assert_eq!(schema.validate(&json!("red")).unwrap(), json!("red"));
    assert!(schema.validate(&json!(null)).is_err());
}

#[test]
fn any_accepts_everything() {
    assert_eq!(any().validate(&json!({"x": [1, 2]})).unwrap(), json!({"x": [1, 2]}));
}

// ── Composites ──────────────────────────────────────────────────────────────

fn author() -> vetted_schema::Schema {
    object()
        .field("name", string().max(10))
        .field("age", number().min(18).max(99))
        .field("favoriteColor", string().optional())
        .into()
}

#[test]
fn object_strips_unknown_keys_and_omits_absent_optionals() {
    let output = author()
        .validate(&json!({"name": "John", "age": 21, "extra": true}))
        .unwrap();
    assert_eq!(output, json!({"name": "John", "age": 21}));
}

#[test]
fn object_reports_every_violation() {
    let report = author()
        .validate(&json!({"name": "stringlongerthanten", "favoriteColor": 3}))
        .unwrap_err();
    assert_eq!(report.len(), 3);
    assert!(report.has_field("name"));
    assert!(report.has_field("age"));
    assert!(report.has_field("favoriteColor"));
}

#[test]
fn object_rejects_arrays() {
    let report = author().validate(&json!([])).unwrap_err();
    assert_eq!(report.errors[0].message, "Expected object, received array");
}

#[test]
fn nested_paths_are_dotted_and_indexed() {
    let schema = object().field(
        "authors",
        array(object().field("name", string().max(3))),
    );
    let report = vetted_schema::Schema::from(schema)
        .validate(&json!({"authors": [{"name": "Ann"}, {"name": "Bobby"}]}))
        .unwrap_err();
    assert_eq!(report.errors[0].field, "authors[1].name");
}

#[test]
fn validate_at_prefixes_paths() {
    let report = author().validate_at(&json!({"name": "John"}), "body").unwrap_err();
    assert_eq!(report.errors[0].field, "body.age");

    let schema: vetted_schema::Schema = string().into();
    let root = schema.validate_at(&json!(1), "query").unwrap_err();
    assert_eq!(root.errors[0].field, "query");
}

#[test]
fn array_length_bounds() {
    let schema: vetted_schema::Schema = array(number()).min(1).max(2).into();
    assert!(schema.validate(&json!([1])).is_ok());
    assert_eq!(
        schema.validate(&json!([])).unwrap_err().errors[0].code,
        IssueCode::TooSmall
    );
    assert_eq!(
        schema.validate(&json!([1, 2, 3])).unwrap_err().errors[0].code,
        IssueCode::TooBig
    );
}

#[test]
fn enum_values() {
    let schema = enumeration(["red", "blue"]);
    assert!(schema.validate(&json!("red")).is_ok());
    let report = schema.validate(&json!("green")).unwrap_err();
    assert_eq!(
        report.errors[0].message,
        "Invalid enum value. Expected 'red' | 'blue', received 'green'"
    );
}

#[test]
fn tuple_positions() {
    let schema = tuple([vetted_schema::Schema::from(string()), number().into()]);
    assert_eq!(schema.validate(&json!(["a", 1])).unwrap(), json!(["a", 1]));
    assert!(schema.validate(&json!(["a"])).is_err());
    let report = schema.validate(&json!([1, "a"])).unwrap_err();
    assert!(report.has_field("[0]"));
    assert!(report.has_field("[1]"));
}
