//! Shape-keyed visitors
//!
//! A visitor implements the five shape-specific operations for one format
//! and one direction. The builder picks the operation by matching on
//! [`Shape`]; the visitor only knows how to read or write its format.
//!
//! Node shapes never decode the nested type themselves: they hand the raw
//! child to the nested schema's own [`Schema::parse`] / [`Schema::build`],
//! which is what lets one schema be embedded in another in any format.
//!
//! Operations a format does not support keep the default implementation,
//! which fails with [`CompositeError::UnsupportedShape`].
//!
//! [`Schema::parse`]: crate::schema::Schema::parse
//! [`Schema::build`]: crate::schema::Schema::build

use crate::builder::Format;
use crate::document::Document;
use crate::error::{CompositeError, CompositeResult};
use crate::field::{Field, Shape};
use crate::value::Value;

/// Reads raw format data into the fields of one document.
pub trait ParseVisitor<F: Format> {
    fn visit_scalar(&mut self, field: &Field, raw: &F::Node) -> CompositeResult<()> {
        let _ = raw;
        Err(unsupported::<F>(field, Shape::Scalar))
    }

    /// Called once per occurrence of the wire name; values accumulate.
    fn visit_list_scalar(&mut self, field: &Field, raw: &F::Node) -> CompositeResult<()> {
        let _ = raw;
        Err(unsupported::<F>(field, Shape::List))
    }

    fn visit_attribute_scalar(&mut self, field: &Field, raw: &F::Scalar) -> CompositeResult<()> {
        let _ = raw;
        Err(unsupported::<F>(field, Shape::AttributeScalar))
    }

    fn visit_node(&mut self, field: &Field, raw: &F::Node) -> CompositeResult<()> {
        let _ = raw;
        Err(unsupported::<F>(field, Shape::Node))
    }

    /// Called once per occurrence of the wire name; documents accumulate.
    fn visit_list_node(&mut self, field: &Field, raw: &F::Node) -> CompositeResult<()> {
        let _ = raw;
        Err(unsupported::<F>(field, Shape::ListNode))
    }
}

/// Writes document values into one format target.
pub trait BuildVisitor<F: Format> {
    fn visit_scalar(&mut self, field: &Field, value: &Value) -> CompositeResult<()> {
        let _ = value;
        Err(unsupported::<F>(field, Shape::Scalar))
    }

    fn visit_list_scalar(&mut self, field: &Field, values: &[Value]) -> CompositeResult<()> {
        let _ = values;
        Err(unsupported::<F>(field, Shape::List))
    }

    /// Writes into the target's attribute carrier, which the builder has
    /// initialised beforehand.
    fn visit_attribute_scalar(&mut self, field: &Field, value: &Value) -> CompositeResult<()> {
        let _ = value;
        Err(unsupported::<F>(field, Shape::AttributeScalar))
    }

    fn visit_node(&mut self, field: &Field, node: &Document) -> CompositeResult<()> {
        let _ = node;
        Err(unsupported::<F>(field, Shape::Node))
    }

    fn visit_list_node(&mut self, field: &Field, nodes: &[Document]) -> CompositeResult<()> {
        let _ = nodes;
        Err(unsupported::<F>(field, Shape::ListNode))
    }
}

fn unsupported<F: Format>(field: &Field, shape: Shape) -> CompositeError {
    CompositeError::UnsupportedShape {
        format: F::NAME,
        shape,
        field: field.wire_name().to_string(),
    }
}
