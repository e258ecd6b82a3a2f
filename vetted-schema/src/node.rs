use serde_json::Value;

/// A composable description of an expected JSON value.
///
/// Nodes are immutable once built. Wrapper variants (`Optional`, `Nullable`,
/// `Default`) always wrap exactly one inner node, so every wrapper chain
/// terminates in a single base node.
///
/// ```ignore
/// use vetted_schema::{number, object, string, SchemaExt};
///
/// let author = object()
///     .field("name", string().max(10))
///     .field("age", number().min(18).max(99))
///     .field("favoriteColor", string().optional());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    kind: SchemaKind,
    description: Option<String>,
}

/// The closed set of node variants.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaKind {
    String(StringSchema),
    Number(NumberSchema),
    Boolean,
    Object(ObjectSchema),
    Array(ArraySchema),
    /// A fixed set of literal values.
    Enum(Vec<Value>),
    /// A fixed-length array with one schema per position.
    Tuple(Vec<Schema>),
    Optional(Box<Schema>),
    Nullable(Box<Schema>),
    Default { inner: Box<Schema>, value: Value },
    /// Accepts any value.
    Any,
}

/// Presence and nullability collected while unwrapping a wrapper chain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WrapperFlags {
    pub optional: bool,
    pub nullable: bool,
}

impl Schema {
    pub fn new(kind: SchemaKind) -> Self {
        Self {
            kind,
            description: None,
        }
    }

    pub fn kind(&self) -> &SchemaKind {
        &self.kind
    }

    /// The human description of this node.
    ///
    /// Wrappers without their own description report the description of the
    /// node they wrap.
    pub fn description(&self) -> Option<&str> {
        if let Some(ref text) = self.description {
            return Some(text);
        }
        match &self.kind {
            SchemaKind::Optional(inner) | SchemaKind::Nullable(inner) => inner.description(),
            SchemaKind::Default { inner, .. } => inner.description(),
            _ => None,
        }
    }

    pub fn is_wrapper(&self) -> bool {
        matches!(
            self.kind,
            SchemaKind::Optional(_) | SchemaKind::Nullable(_) | SchemaKind::Default { .. }
        )
    }

    /// Walk through every wrapper and return the base node together with the
    /// flags picked up on the way.
    pub fn unwrap_flags(&self) -> (&Schema, WrapperFlags) {
        let mut flags = WrapperFlags::default();
        let mut current = self;
        loop {
            match &current.kind {
                SchemaKind::Optional(inner) => {
                    flags.optional = true;
                    current = inner;
                }
                SchemaKind::Nullable(inner) => {
                    flags.nullable = true;
                    current = inner;
                }
                SchemaKind::Default { inner, .. } => current = inner,
                _ => return (current, flags),
            }
        }
    }

    /// Whether an `Optional` wrapper appears anywhere in this node's wrapper chain.
    ///
    /// A `Default` wrapper on its own does not make a node optional.
    pub fn is_optional(&self) -> bool {
        self.unwrap_flags().1.optional
    }

    pub fn is_nullable(&self) -> bool {
        self.unwrap_flags().1.nullable
    }

    /// Named fields, when this node is itself an object schema.
    pub fn object_fields(&self) -> Option<&[(String, Schema)]> {
        match &self.kind {
            SchemaKind::Object(obj) => Some(obj.fields()),
            _ => None,
        }
    }
}

// ── Builders ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StringSchema {
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
}

impl StringSchema {
    pub fn min(mut self, len: usize) -> Self {
        self.min_length = Some(len);
        self
    }

    pub fn max(mut self, len: usize) -> Self {
        self.max_length = Some(len);
        self
    }

    /// Require exactly `len` characters.
    pub fn length(self, len: usize) -> Self {
        self.min(len).max(len)
    }

    pub fn non_empty(self) -> Self {
        self.min(1)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumberSchema {
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    /// Reject values with a fractional part.
    pub integer: bool,
    /// Parse string input into a number before checking it.
    pub coerce: bool,
}

impl NumberSchema {
    pub fn min(mut self, value: impl Into<f64>) -> Self {
        self.minimum = Some(value.into());
        self
    }

    pub fn max(mut self, value: impl Into<f64>) -> Self {
        self.maximum = Some(value.into());
        self
    }

    pub fn int(mut self) -> Self {
        self.integer = true;
        self
    }

    pub fn coerce(mut self) -> Self {
        self.coerce = true;
        self
    }
}

/// Object schema with fields kept in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectSchema {
    fields: Vec<(String, Schema)>,
}

impl ObjectSchema {
    /// Declare a field. Declaring the same name twice replaces the earlier schema.
    pub fn field(mut self, name: impl Into<String>, schema: impl Into<Schema>) -> Self {
        let name = name.into();
        let schema = schema.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = schema,
            None => self.fields.push((name, schema)),
        }
        self
    }

    pub fn fields(&self) -> &[(String, Schema)] {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&Schema> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, schema)| schema)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArraySchema {
    pub items: Box<Schema>,
    pub min_items: Option<usize>,
    pub max_items: Option<usize>,
}

impl ArraySchema {
    pub fn new(items: impl Into<Schema>) -> Self {
        Self {
            items: Box::new(items.into()),
            min_items: None,
            max_items: None,
        }
    }

    pub fn min(mut self, len: usize) -> Self {
        self.min_items = Some(len);
        self
    }

    pub fn max(mut self, len: usize) -> Self {
        self.max_items = Some(len);
        self
    }

    pub fn length(self, len: usize) -> Self {
        self.min(len).max(len)
    }

    pub fn non_empty(self) -> Self {
        self.min(1)
    }
}

impl From<StringSchema> for Schema {
    fn from(value: StringSchema) -> Self {
        Schema::new(SchemaKind::String(value))
    }
}

impl From<NumberSchema> for Schema {
    fn from(value: NumberSchema) -> Self {
        Schema::new(SchemaKind::Number(value))
    }
}

impl From<ObjectSchema> for Schema {
    fn from(value: ObjectSchema) -> Self {
        Schema::new(SchemaKind::Object(value))
    }
}

impl From<ArraySchema> for Schema {
    fn from(value: ArraySchema) -> Self {
        Schema::new(SchemaKind::Array(value))
    }
}

/// Wrapper combinators available on every schema builder.
pub trait SchemaExt: Into<Schema> + Sized {
    /// Allow the value to be absent.
    fn optional(self) -> Schema {
        Schema::new(SchemaKind::Optional(Box::new(self.into())))
    }

    /// Allow the value to be `null`.
    fn nullable(self) -> Schema {
        Schema::new(SchemaKind::Nullable(Box::new(self.into())))
    }

    /// Substitute `value` when the value is absent.
    fn with_default(self, value: impl Into<Value>) -> Schema {
        Schema::new(SchemaKind::Default {
            inner: Box::new(self.into()),
            value: value.into(),
        })
    }

    fn with_description(self, text: impl Into<String>) -> Schema {
        let mut schema = self.into();
        schema.description = Some(text.into());
        schema
    }
}

impl<T: Into<Schema>> SchemaExt for T {}

// ── Constructors ────────────────────────────────────────────────────────────

pub fn string() -> StringSchema {
    StringSchema::default()
}

pub fn number() -> NumberSchema {
    NumberSchema::default()
}

pub fn boolean() -> Schema {
    Schema::new(SchemaKind::Boolean)
}

pub fn object() -> ObjectSchema {
    ObjectSchema::default()
}

pub fn array(items: impl Into<Schema>) -> ArraySchema {
    ArraySchema::new(items)
}

/// One of a fixed set of literal values.
pub fn enumeration<V: Into<Value>>(values: impl IntoIterator<Item = V>) -> Schema {
    Schema::new(SchemaKind::Enum(values.into_iter().map(Into::into).collect()))
}

pub fn tuple<S: Into<Schema>>(items: impl IntoIterator<Item = S>) -> Schema {
    Schema::new(SchemaKind::Tuple(items.into_iter().map(Into::into).collect()))
}

pub fn any() -> Schema {
    Schema::new(SchemaKind::Any)
}
