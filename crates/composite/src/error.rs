//! Error types for schema declaration and document conversion
//!
//! Declaration problems are reported once, as [`ConfigError`], when a schema
//! is registered. Everything that can go wrong while walking a concrete
//! source or target is a [`CompositeError`]. Both derive
//! [`miette::Diagnostic`] so callers get stable codes and help text.

use crate::field::Shape;
use crate::value::ScalarType;
use miette::Diagnostic;
use thiserror::Error;

/// Alias for results of parse and build passes
pub type CompositeResult<T> = std::result::Result<T, CompositeError>;

// ============================================================================
// Declaration errors
// ============================================================================

/// A schema declaration that cannot be registered
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The attribute sub-schema declares fields that are not attribute scalars
    #[error(
        "attribute schema `{schema}` should be declared with attribute fields only, \
         offending fields: {}",
        .fields.join(", ")
    )]
    #[diagnostic(
        code(composite::config::attribute_shape),
        help("declare attribute fields with `Field::attribute`")
    )]
    AttributeShape { schema: String, fields: Vec<String> },

    /// Attribute scalars declared among the content fields of a schema
    #[error("schema `{schema}` declares attribute fields outside its attribute schema: {}", .fields.join(", "))]
    #[diagnostic(
        code(composite::config::misplaced_attribute),
        help("move these fields into `SchemaBuilder::attributes`")
    )]
    MisplacedAttribute { schema: String, fields: Vec<String> },

    /// Two fields share one wire name
    #[error("schema `{schema}` declares wire name `{wire_name}` more than once")]
    #[diagnostic(code(composite::config::duplicate_wire_name))]
    DuplicateWireName { schema: String, wire_name: String },

    /// Two fields share one attribute name
    #[error("schema `{schema}` declares field `{name}` more than once")]
    #[diagnostic(
        code(composite::config::duplicate_field),
        help("use `Field::named` to give one of them a different attribute name")
    )]
    DuplicateField { schema: String, name: String },

    /// A declared default does not fit the field's value constructor
    #[error("default {default} of field `{field}` in schema `{schema}` is not a valid {expected}")]
    #[diagnostic(code(composite::config::invalid_default))]
    InvalidDefault {
        schema: String,
        field: String,
        expected: String,
        default: String,
    },
}

// ============================================================================
// Conversion errors
// ============================================================================

/// Errors raised during a parse or build pass
#[derive(Error, Diagnostic, Debug)]
pub enum CompositeError {
    /// A nested schema failed to register when first reached
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    /// A value constructor rejected a raw value
    #[error("cannot coerce `{found}` into {expected} for field `{field}`")]
    #[diagnostic(code(composite::parse::coercion))]
    Coercion {
        field: String,
        expected: ScalarType,
        found: String,
    },

    /// A visitor was asked for a shape it does not implement
    #[error("{format} visitor does not support {shape} fields (field `{field}`)")]
    #[diagnostic(code(composite::visit::unsupported_shape))]
    UnsupportedShape {
        format: &'static str,
        shape: Shape,
        field: String,
    },

    /// A document value does not match its field's shape
    #[error("field `{field}` holds a {found} value, expected {expected}")]
    #[diagnostic(code(composite::build::value_shape))]
    ValueShape {
        field: String,
        expected: Shape,
        found: &'static str,
    },

    /// The source handed to a format is not the container it reads
    #[error("{format} source `{context}` is not {expected}, found {found}")]
    #[diagnostic(code(composite::parse::source))]
    Source {
        format: &'static str,
        context: String,
        expected: &'static str,
        found: String,
    },

    /// An attribute was written before its carrier was initialised
    #[error("attribute carrier `{carrier}` is missing while writing `{field}`")]
    #[diagnostic(
        code(composite::build::missing_carrier),
        help("call `init_blank_attributes` on the target before visiting attribute fields")
    )]
    MissingCarrier { carrier: String, field: String },

    /// A content field uses a wire name the format reserves for itself
    #[error("{format} reserves `{wire_name}`, which field `{field}` uses as its wire name")]
    #[diagnostic(
        code(composite::visit::reserved_wire_name),
        help("rename the field or configure another attributes key")
    )]
    ReservedWireName {
        format: &'static str,
        field: String,
        wire_name: String,
    },

    /// A document was addressed by a field name its schema does not declare
    #[error("schema `{schema}` has no field `{field}`")]
    #[diagnostic(code(composite::document::unknown_field))]
    UnknownField { schema: String, field: String },

    /// A document was handed to the builder of another schema
    #[error("cannot build a `{found}` document as `{expected}`")]
    #[diagnostic(code(composite::build::schema_mismatch))]
    SchemaMismatch { expected: String, found: String },

    /// The wire text itself could not be decoded
    #[error("failed to decode {format} text")]
    #[diagnostic(code(composite::decode))]
    Decode {
        format: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl CompositeError {
    pub fn decode(
        format: &'static str,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        CompositeError::Decode {
            format,
            source: Box::new(source),
        }
    }
}
