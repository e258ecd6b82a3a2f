use serde::Serialize;

/// Machine-readable reason attached to a [`FieldError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    Required,
    InvalidType,
    TooSmall,
    TooBig,
    NotInteger,
    InvalidEnumValue,
    /// The raw payload could not be decoded as JSON.
    InvalidJson,
    /// Data was supplied for a slot that declares no schema.
    UnexpectedInput,
}

impl IssueCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueCode::Required => "required",
            IssueCode::InvalidType => "invalid_type",
            IssueCode::TooSmall => "too_small",
            IssueCode::TooBig => "too_big",
            IssueCode::NotInteger => "not_integer",
            IssueCode::InvalidEnumValue => "invalid_enum_value",
            IssueCode::InvalidJson => "invalid_json",
            IssueCode::UnexpectedInput => "unexpected_input",
        }
    }
}

impl std::fmt::Display for IssueCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single violated constraint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    /// Dotted path to the offending value (`body.items[0].name`), or `value`
    /// for the root.
    pub field: String,
    pub code: IssueCode,
    pub message: String,
}

/// Every violation found while validating one value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    pub errors: Vec<FieldError>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// A report holding exactly one error.
    pub fn single(field: &str, code: IssueCode, message: impl Into<String>) -> Self {
        let mut report = Self::new();
        report.push(field, code, message);
        report
    }

    pub fn push(&mut self, field: &str, code: IssueCode, message: impl Into<String>) {
        let field = if field.is_empty() {
            "value".to_string()
        } else {
            field.to_string()
        };
        self.errors.push(FieldError {
            field,
            code,
            message: message.into(),
        });
    }

    pub fn extend(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// Whether any error was reported for exactly this field path.
    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }
}

impl std::fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} validation error(s)", self.errors.len())?;
        for error in &self.errors {
            write!(f, "\n  - {}: {} ({})", error.field, error.message, error.code)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationReport {}

impl IntoIterator for ValidationReport {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}
