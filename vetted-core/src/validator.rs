use serde::de::DeserializeOwned;
use serde_json::Value;
use vetted_schema::{IssueCode, Schema, ValidationReport};

use crate::endpoint::EndpointSchemas;
use crate::error::{EndpointError, HttpError};

/// Untyped request data, as extracted from the transport.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawInput {
    pub query: Option<Value>,
    pub body: Option<Value>,
    pub params: Option<Value>,
}

/// Request data after validation. Each slot is `None` when no data was sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Input {
    pub query: Option<Value>,
    pub body: Option<Value>,
    pub params: Option<Value>,
}

impl Input {
    /// Deserialize the validated query into `T`.
    pub fn query_as<T: DeserializeOwned>(&self) -> Result<T, HttpError> {
        typed(&self.query, Slot::Query)
    }

    /// Deserialize the validated body into `T`.
    ///
    /// Fails with `400 Bad Request` when the client sent no body.
    pub fn body_as<T: DeserializeOwned>(&self) -> Result<T, HttpError> {
        typed(&self.body, Slot::Body)
    }

    /// Deserialize the validated path parameters into `T`.
    pub fn params_as<T: DeserializeOwned>(&self) -> Result<T, HttpError> {
        typed(&self.params, Slot::Params)
    }

    /// A single path parameter, when it validated to a string.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.as_ref()?.get(name)?.as_str()
    }
}

fn typed<T: DeserializeOwned>(value: &Option<Value>, slot: Slot) -> Result<T, HttpError> {
    let value = value
        .as_ref()
        .ok_or_else(|| HttpError::BadRequest(format!("Request {slot} is required")))?;
    serde_json::from_value(value.clone()).map_err(|e| HttpError::Internal(e.to_string()))
}

#[derive(Debug, Clone, Copy)]
enum Slot {
    Query,
    Body,
    Params,
}

impl Slot {
    fn as_str(&self) -> &'static str {
        match self {
            Slot::Query => "query",
            Slot::Body => "body",
            Slot::Params => "params",
        }
    }

    /// Query strings and path parameters arrive as maps; an empty map means
    /// nothing was sent.
    fn is_empty(&self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::Null) => true,
            (Slot::Query | Slot::Params, Value::Object(map)) => map.is_empty(),
            _ => false,
        }
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Applies one endpoint's schemas to incoming data and outgoing responses.
#[derive(Debug, Clone)]
pub struct EndpointValidator {
    schemas: EndpointSchemas,
}

impl EndpointValidator {
    pub fn new(schemas: EndpointSchemas) -> Self {
        Self { schemas }
    }

    pub fn schemas(&self) -> &EndpointSchemas {
        &self.schemas
    }

    /// Validate the three input slots independently.
    ///
    /// A slot with no data is `None` without consulting its schema. Data sent
    /// to a slot without a schema is an error. Violations from every slot are
    /// gathered into one report, with field paths prefixed by the slot name.
    pub fn validate_input(&self, raw: RawInput) -> Result<Input, EndpointError> {
        let mut report = ValidationReport::new();
        let query = self.parse_slot(Slot::Query, raw.query, &mut report);
        let body = self.parse_slot(Slot::Body, raw.body, &mut report);
        let params = self.parse_slot(Slot::Params, raw.params, &mut report);
        if !report.is_empty() {
            return Err(EndpointError::InputValidation(report));
        }
        Ok(Input {
            query,
            body,
            params,
        })
    }

    fn parse_slot(&self, slot: Slot, data: Option<Value>, report: &mut ValidationReport) -> Option<Value> {
        let data = data.filter(|value| !slot.is_empty(value))?;
        let Some(schema) = self.schema_for(slot) else {
            report.push(
                slot.as_str(),
                IssueCode::UnexpectedInput,
                format!("Passed data for {slot} but no schema was provided"),
            );
            return None;
        };
        match schema.validate_at(&data, slot.as_str()) {
            Ok(value) => Some(value),
            Err(errors) => {
                report.extend(errors);
                None
            }
        }
    }

    fn schema_for(&self, slot: Slot) -> Option<&Schema> {
        match slot {
            Slot::Query => self.schemas.query.as_ref(),
            Slot::Body => self.schemas.body.as_ref(),
            Slot::Params => self.schemas.params.as_ref(),
        }
    }

    /// Validate a handler's body against the schema declared for `status`.
    pub fn validate_response(&self, status: u16, body: &Value) -> Result<Value, EndpointError> {
        if self.schemas.responses.is_none() {
            return Err(EndpointError::ResponseConfiguration(
                "No responses were declared but a response was received".to_string(),
            ));
        }
        let schema = self.schemas.response_schema(status).ok_or_else(|| {
            EndpointError::ResponseConfiguration(format!(
                "No response was declared for status code {status}"
            ))
        })?;
        schema
            .validate(body)
            .map_err(|report| EndpointError::ResponseValidation { status, report })
    }
}
