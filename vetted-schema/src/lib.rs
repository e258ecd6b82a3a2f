//! Composable schema nodes used to validate untyped JSON and to describe it.
//!
//! A [`Schema`] is built from small constructors ([`string`], [`number`],
//! [`object`], [`array`], ...) and wrapper combinators from [`SchemaExt`]
//! (`optional`, `nullable`, `with_default`). Validation collects every
//! violation into a [`ValidationReport`] instead of stopping at the first one.

mod node;
mod report;
mod validate;

pub use node::{
    any, array, boolean, enumeration, number, object, string, tuple, ArraySchema, NumberSchema,
    ObjectSchema, Schema, SchemaExt, SchemaKind, StringSchema, WrapperFlags,
};
pub use report::{FieldError, IssueCode, ValidationReport};
