//! Schema registration
//!
//! A schema is declared once through [`SchemaBuilder`] and is immutable
//! afterwards. Registration partitions the declared fields into the field
//! table (attribute name -> [`Field`]) and the field map
//! (wire name -> attribute name), and validates the optional attribute
//! sub-schema.
//!
//! Concrete schema types usually live in a [`SchemaCell`], which registers
//! the schema on first access and hands out the same `&'static Schema` for
//! the rest of the process:
//!
//! ```ignore
//! static USER: SchemaCell = SchemaCell::new(|| {
//!     Schema::builder("User")
//!         .field(Field::scalar("id", ScalarType::Int))
//!         .field(Field::scalar("sign", ScalarType::Str))
//!         .attributes([
//!             Field::attribute("first_name", ScalarType::Str),
//!             Field::attribute("age", ScalarType::Int),
//!         ])
//!         .build()
//! });
//! ```

use crate::builder::{DocumentBuilder, Format};
use crate::document::Document;
use crate::error::{CompositeResult, ConfigError};
use crate::field::{Field, FieldType, Shape};
use ecow::EcoString;
use indexmap::IndexMap;
use once_cell::sync::OnceCell;
use std::fmt;

/// Name suffix of attribute sub-schemas, e.g. `User.attributes`.
pub const ATTRIBUTES_SUFFIX: &str = "attributes";

/// Registered, immutable description of a document type.
#[derive(Debug)]
pub struct Schema {
    name: EcoString,
    fields: IndexMap<EcoString, Field>,
    field_map: IndexMap<EcoString, EcoString>,
    attributes: Option<Box<Schema>>,
}

impl Schema {
    pub fn builder(name: impl Into<EcoString>) -> SchemaBuilder {
        SchemaBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared fields, in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.values()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field by attribute name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    /// Field by wire name.
    pub fn field_by_wire(&self, wire_name: &str) -> Option<&Field> {
        self.field_map
            .get(wire_name)
            .and_then(|name| self.fields.get(name))
    }

    /// Wire name -> attribute name.
    pub fn field_map(&self) -> &IndexMap<EcoString, EcoString> {
        &self.field_map
    }

    /// The attribute sub-schema, if one was declared.
    pub fn attributes(&self) -> Option<&Schema> {
        self.attributes.as_deref()
    }

    pub fn has_attributes(&self) -> bool {
        self.attributes.is_some()
    }

    /// A blank document of this schema, with a blank attribute document
    /// attached when the schema declares one.
    pub fn blank(&'static self) -> Document {
        Document::new(self)
    }

    /// Parse `source` into a document of this schema.
    pub fn parse<F: Format>(&'static self, format: &F, source: &F::Node) -> CompositeResult<Document> {
        DocumentBuilder::new(format).parse(self, source)
    }

    /// Build the wire representation of `document`, which must be of this
    /// schema. `node_name` names the produced object where the format has
    /// a notion of it (the markup element tag).
    pub fn build<F: Format>(
        &'static self,
        format: &F,
        document: &Document,
        node_name: &str,
    ) -> CompositeResult<F::Target> {
        DocumentBuilder::new(format).build_as(self, document, node_name)
    }
}

/// Explicit registration step of a schema.
#[derive(Debug)]
pub struct SchemaBuilder {
    name: EcoString,
    fields: Vec<Field>,
    attributes: Option<Vec<Field>>,
}

impl SchemaBuilder {
    pub fn new(name: impl Into<EcoString>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            attributes: None,
        }
    }

    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn fields(mut self, fields: impl IntoIterator<Item = Field>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Declare the attribute sub-schema. Every field must be an attribute
    /// scalar.
    pub fn attributes(mut self, fields: impl IntoIterator<Item = Field>) -> Self {
        self.attributes
            .get_or_insert_with(Vec::new)
            .extend(fields);
        self
    }

    pub fn build(self) -> Result<Schema, ConfigError> {
        let attributes = match self.attributes {
            Some(fields) => {
                let name: EcoString = format!("{}.{}", self.name, ATTRIBUTES_SUFFIX).into();
                Some(Box::new(build_attribute_schema(name, fields)?))
            }
            None => None,
        };

        let misplaced: Vec<String> = self
            .fields
            .iter()
            .filter(|f| f.shape() == Shape::AttributeScalar)
            .map(|f| f.name().to_string())
            .collect();
        if !misplaced.is_empty() {
            return Err(ConfigError::MisplacedAttribute {
                schema: self.name.to_string(),
                fields: misplaced,
            });
        }

        let (fields, field_map) = partition(&self.name, self.fields)?;
        Ok(Schema {
            name: self.name,
            fields,
            field_map,
            attributes,
        })
    }
}

fn build_attribute_schema(name: EcoString, fields: Vec<Field>) -> Result<Schema, ConfigError> {
    let offending: Vec<String> = fields
        .iter()
        .filter(|f| f.shape() != Shape::AttributeScalar)
        .map(|f| f.name().to_string())
        .collect();
    if !offending.is_empty() {
        return Err(ConfigError::AttributeShape {
            schema: name.to_string(),
            fields: offending,
        });
    }
    let (fields, field_map) = partition(&name, fields)?;
    Ok(Schema {
        name,
        fields,
        field_map,
        attributes: None,
    })
}

type FieldTable = (IndexMap<EcoString, Field>, IndexMap<EcoString, EcoString>);

fn partition(schema: &str, declared: Vec<Field>) -> Result<FieldTable, ConfigError> {
    let mut fields = IndexMap::with_capacity(declared.len());
    let mut field_map = IndexMap::with_capacity(declared.len());
    for field in declared {
        check_default(schema, &field)?;
        let name: EcoString = field.name().into();
        let wire_name: EcoString = field.wire_name().into();
        if fields.contains_key(&name) {
            return Err(ConfigError::DuplicateField {
                schema: schema.to_string(),
                name: name.to_string(),
            });
        }
        if field_map.contains_key(&wire_name) {
            return Err(ConfigError::DuplicateWireName {
                schema: schema.to_string(),
                wire_name: wire_name.to_string(),
            });
        }
        field_map.insert(wire_name, name.clone());
        fields.insert(name, field);
    }
    Ok((fields, field_map))
}

fn check_default(schema: &str, field: &Field) -> Result<(), ConfigError> {
    let Some(default) = field.default() else {
        return Ok(());
    };
    let valid = match (field.shape(), field.ty()) {
        (Shape::List, FieldType::Scalar(ty)) => default
            .as_list()
            .is_some_and(|values| values.iter().all(|v| ty.coerce(v).as_ref() == Some(v))),
        (Shape::Scalar | Shape::AttributeScalar, FieldType::Scalar(ty)) => {
            ty.coerce(default).as_ref() == Some(default)
        }
        _ => false,
    };
    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidDefault {
            schema: schema.to_string(),
            field: field.name().to_string(),
            expected: match field.scalar_type() {
                Some(ty) if field.shape() == Shape::List => format!("list of {}", ty),
                Some(ty) => ty.to_string(),
                None => field.shape().to_string(),
            },
            default: default.to_string(),
        })
    }
}

/// Process-wide, lazily registered schema.
///
/// The registration function runs once, on first [`SchemaCell::get`]; its
/// outcome (schema or configuration error) is cached for the rest of the
/// process.
pub struct SchemaCell {
    cell: OnceCell<Result<Schema, ConfigError>>,
    init: fn() -> Result<Schema, ConfigError>,
}

impl SchemaCell {
    pub const fn new(init: fn() -> Result<Schema, ConfigError>) -> Self {
        Self {
            cell: OnceCell::new(),
            init,
        }
    }

    pub fn get(&'static self) -> Result<&'static Schema, ConfigError> {
        self.cell.get_or_init(self.init).as_ref().map_err(Clone::clone)
    }

    /// The registered schema, without triggering registration.
    pub fn peek(&self) -> Option<&Schema> {
        self.cell.get().and_then(|r| r.as_ref().ok())
    }
}

impl fmt::Debug for SchemaCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.cell.get() {
            Some(Ok(schema)) => write!(f, "SchemaCell({})", schema.name()),
            Some(Err(_)) => write!(f, "SchemaCell(<invalid>)"),
            None => write!(f, "SchemaCell(<unregistered>)"),
        }
    }
}
