//! Parse and build passes
//!
//! [`DocumentBuilder`] walks one schema against one format. Parsing
//! iterates the source's named children and dispatches each recognised
//! wire name to the parse visitor by shape. Building iterates the
//! document's declared fields and dispatches each value to the build
//! visitor. Attribute carriers are handled around those loops: parsed
//! before the content fields, written after them.

use crate::document::Document;
use crate::error::{CompositeError, CompositeResult};
use crate::field::{Field, Shape};
use crate::schema::Schema;
use crate::value::Value;
use crate::visitor::{BuildVisitor, ParseVisitor};
use log::{debug, trace};
use std::collections::HashSet;

/// Node name used when the caller does not pick one.
pub const DEFAULT_NODE_NAME: &str = "document";

/// A wire format plugged into the builder.
pub trait Format: Sized {
    /// Short format name, used in logs and errors.
    const NAME: &'static str;

    /// Parse source, and each named child of it.
    type Node;
    /// Raw attribute value inside a carrier.
    type Scalar: ?Sized;
    /// Attribute carrier of a source.
    type Carrier: ?Sized;
    /// Build output.
    type Target;

    type Parser<'a>: ParseVisitor<Self>
    where
        Self: 'a;
    type Builder<'a>: BuildVisitor<Self>
    where
        Self: 'a;

    fn parse_visitor<'a>(&'a self, document: &'a mut Document) -> Self::Parser<'a>;

    fn build_visitor<'a>(&'a self, target: &'a mut Self::Target) -> Self::Builder<'a>;

    /// Named children of `source`, in source order.
    fn iterate<'s>(&self, source: &'s Self::Node) -> CompositeResult<Vec<(&'s str, &'s Self::Node)>>;

    /// The attribute carrier of `source`, if it carries attribute data.
    fn extract_attribute_carrier<'s>(
        &self,
        source: &'s Self::Node,
    ) -> CompositeResult<Option<&'s Self::Carrier>>;

    /// Named entries of an attribute carrier.
    fn iterate_carrier<'s>(
        &self,
        carrier: &'s Self::Carrier,
    ) -> CompositeResult<Vec<(&'s str, &'s Self::Scalar)>>;

    /// A blank target object.
    fn build_object(&self, node_name: &str) -> Self::Target;

    /// Make sure `target` has an attribute carrier before attribute fields
    /// are written into it.
    fn init_blank_attributes(&self, target: &mut Self::Target);
}

/// Drives one parse or build pass for format `F`.
pub struct DocumentBuilder<'f, F: Format> {
    format: &'f F,
}

impl<'f, F: Format> DocumentBuilder<'f, F> {
    pub fn new(format: &'f F) -> Self {
        Self { format }
    }

    pub fn format(&self) -> &'f F {
        self.format
    }

    pub fn parse(&self, schema: &'static Schema, source: &F::Node) -> CompositeResult<Document> {
        debug!("parsing `{}` from {}", schema.name(), F::NAME);
        let mut document = Document::empty(schema);

        // attributes go first, content visitors may look at them
        if let Some(attribute_schema) = schema.attributes() {
            if let Some(carrier) = self.format.extract_attribute_carrier(source)? {
                let attributes = self.parse_attributes(attribute_schema, carrier)?;
                document.attach_attributes(attributes);
            }
        }

        // a defaulted list present in the source holds only the source
        // values; its default is restored when it never shows up
        let defaulted: Vec<&'static Field> = schema
            .fields()
            .filter(|f| f.shape() == Shape::List && f.default().is_some())
            .collect();
        for field in &defaulted {
            document.put(field, Value::List(Vec::new()))?;
        }
        let mut seen: HashSet<&'static str> = HashSet::new();

        let mut visitor = self.format.parse_visitor(&mut document);
        for (wire_name, child) in self.format.iterate(source)? {
            let Some(field) = schema.field_by_wire(wire_name) else {
                trace!("{}: skipping unknown `{}`", schema.name(), wire_name);
                continue;
            };
            trace!("{}: visiting {} `{}`", schema.name(), field.shape(), wire_name);
            match field.shape() {
                Shape::Scalar => visitor.visit_scalar(field, child)?,
                Shape::List => {
                    seen.insert(field.name());
                    visitor.visit_list_scalar(field, child)?
                }
                Shape::Node => visitor.visit_node(field, child)?,
                Shape::ListNode => visitor.visit_list_node(field, child)?,
                Shape::AttributeScalar => return Err(misplaced::<F>(field)),
            }
        }
        drop(visitor);

        for field in defaulted {
            if !seen.contains(field.name()) {
                document.put(field, field.blank())?;
            }
        }
        Ok(document)
    }

    fn parse_attributes(
        &self,
        schema: &'static Schema,
        carrier: &F::Carrier,
    ) -> CompositeResult<Document> {
        let mut attributes = Document::empty(schema);
        let mut visitor = self.format.parse_visitor(&mut attributes);
        for (wire_name, raw) in self.format.iterate_carrier(carrier)? {
            match schema.field_by_wire(wire_name) {
                Some(field) => visitor.visit_attribute_scalar(field, raw)?,
                None => trace!("{}: skipping unknown attribute `{}`", schema.name(), wire_name),
            }
        }
        drop(visitor);
        Ok(attributes)
    }

    /// Build `document` with the schema it was created from.
    pub fn build(&self, document: &Document, node_name: &str) -> CompositeResult<F::Target> {
        let schema = document.schema();
        debug!("building `{}` as {} `{}`", schema.name(), F::NAME, node_name);
        let mut target = self.format.build_object(node_name);

        let mut visitor = self.format.build_visitor(&mut target);
        for (field, value) in document.iter() {
            match (field.shape(), value) {
                (Shape::Scalar, value) => visitor.visit_scalar(field, value)?,
                (Shape::List, Value::List(values)) => visitor.visit_list_scalar(field, values)?,
                (Shape::Node, Value::Nil) => {
                    trace!("{}: `{}` is absent", schema.name(), field.wire_name())
                }
                (Shape::Node, Value::Node(node)) => visitor.visit_node(field, node)?,
                (Shape::ListNode, Value::Nodes(nodes)) => visitor.visit_list_node(field, nodes)?,
                (Shape::AttributeScalar, _) => return Err(misplaced::<F>(field)),
                (shape, found) => {
                    return Err(CompositeError::ValueShape {
                        field: field.wire_name().to_string(),
                        expected: shape,
                        found: found.kind(),
                    })
                }
            }
        }
        drop(visitor);

        if let Some(attributes) = document.attributes() {
            self.format.init_blank_attributes(&mut target);
            let mut visitor = self.format.build_visitor(&mut target);
            for (field, value) in attributes.iter() {
                visitor.visit_attribute_scalar(field, value)?;
            }
        }
        Ok(target)
    }

    /// Build `document`, which must be of `schema`.
    pub fn build_as(
        &self,
        schema: &'static Schema,
        document: &Document,
        node_name: &str,
    ) -> CompositeResult<F::Target> {
        if !std::ptr::eq(schema, document.schema()) {
            return Err(CompositeError::SchemaMismatch {
                expected: schema.name().to_string(),
                found: document.schema().name().to_string(),
            });
        }
        self.build(document, node_name)
    }
}

fn misplaced<F: Format>(field: &Field) -> CompositeError {
    CompositeError::UnsupportedShape {
        format: F::NAME,
        shape: Shape::AttributeScalar,
        field: field.wire_name().to_string(),
    }
}
