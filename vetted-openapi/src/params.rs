use serde_json::{json, Value};
use vetted_schema::Schema;

use crate::schema::schema_object;

/// Placeholder used wherever a schema carries no description.
pub const NO_DESCRIPTION: &str = "No description available";

/// Where a parameter is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamLocation {
    Path,
    Query,
}

impl ParamLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamLocation::Path => "path",
            ParamLocation::Query => "query",
        }
    }
}

/// One Parameter Object per field of an object-shaped schema.
///
/// Path parameters are always required; query parameters are required
/// unless the field is optional. Anything that is not an object yields no
/// parameters.
pub fn parameter_objects(schema: Option<&Schema>, location: ParamLocation) -> Vec<Value> {
    let Some(fields) = schema.and_then(Schema::object_fields) else {
        return Vec::new();
    };
    fields
        .iter()
        .map(|(name, field)| {
            let required = match location {
                ParamLocation::Path => true,
                ParamLocation::Query => !field.is_optional(),
            };
            json!({
                "in": location.as_str(),
                "name": name,
                "description": field.description().unwrap_or(NO_DESCRIPTION),
                "schema": schema_object(Some(field)),
                "required": required,
            })
        })
        .collect()
}
