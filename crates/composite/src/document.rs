use crate::error::{CompositeError, CompositeResult};
use crate::field::{Field, Shape};
use crate::schema::Schema;
use crate::value::Value;
use ecow::EcoString;
use indexmap::IndexMap;
use std::fmt;

/// An instance of a schema.
///
/// Holds one [`Value`] per declared field, keyed by attribute name, plus
/// the optional attribute document. The builder creates and fills
/// documents during parse; holders are free to mutate them afterwards.
#[derive(Clone)]
pub struct Document {
    schema: &'static Schema,
    values: IndexMap<EcoString, Value>,
    attributes: Option<Box<Document>>,
}

impl Document {
    /// Blank document: declared defaults or zero values, empty lists, absent
    /// nodes, and a blank attribute document when the schema declares one.
    pub fn new(schema: &'static Schema) -> Self {
        let mut document = Self::empty(schema);
        if let Some(attributes) = schema.attributes() {
            document.attributes = Some(Box::new(Self::empty(attributes)));
        }
        document
    }

    /// Blank document without an attribute document.
    pub fn empty(schema: &'static Schema) -> Self {
        let values = schema
            .fields()
            .map(|field| (EcoString::from(field.name()), field.blank()))
            .collect();
        Self {
            schema,
            values,
            attributes: None,
        }
    }

    pub fn schema(&self) -> &'static Schema {
        self.schema
    }

    /// Wire name -> attribute name, shared with the schema.
    pub fn field_map(&self) -> &'static IndexMap<EcoString, EcoString> {
        self.schema.field_map()
    }

    pub fn has_attributes(&self) -> bool {
        self.attributes.is_some()
    }

    pub fn attributes(&self) -> Option<&Document> {
        self.attributes.as_deref()
    }

    pub fn attributes_mut(&mut self) -> Option<&mut Document> {
        self.attributes.as_deref_mut()
    }

    /// Attach an attribute document. It must be of the schema's attribute
    /// sub-schema.
    pub fn set_attributes(&mut self, attributes: Document) -> CompositeResult<()> {
        match self.schema.attributes() {
            Some(expected) if std::ptr::eq(expected, attributes.schema) => {
                self.attributes = Some(Box::new(attributes));
                Ok(())
            }
            expected => Err(CompositeError::SchemaMismatch {
                expected: expected.map(|s| s.name()).unwrap_or("<none>").to_string(),
                found: attributes.schema.name().to_string(),
            }),
        }
    }

    pub fn take_attributes(&mut self) -> Option<Document> {
        self.attributes.take().map(|attributes| *attributes)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.values.get_mut(name)
    }

    pub fn int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_int)
    }

    pub fn float(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_float)
    }

    pub fn str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    pub fn bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Value::as_bool)
    }

    pub fn list(&self, name: &str) -> Option<&[Value]> {
        self.get(name).and_then(Value::as_list)
    }

    pub fn node(&self, name: &str) -> Option<&Document> {
        self.get(name).and_then(Value::as_node)
    }

    pub fn nodes(&self, name: &str) -> Option<&[Document]> {
        self.get(name).and_then(Value::as_nodes)
    }

    /// Values in declaration order.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.values.values()
    }

    /// Fields paired with their values, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static Field, &Value)> {
        let schema = self.schema;
        schema
            .fields()
            .filter_map(move |field| self.values.get(field.name()).map(|v| (field, v)))
    }

    /// Set a field by attribute name. Scalars go through the field's value
    /// constructor; lists and nodes must already have the field's shape.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> CompositeResult<()> {
        let field = self.lookup(name)?;
        let value = match (field.shape(), value.into()) {
            (Shape::Scalar | Shape::AttributeScalar, value) => field.coerce(&value)?,
            (Shape::List, Value::List(values)) => Value::List(
                values
                    .iter()
                    .map(|v| field.coerce(v))
                    .collect::<CompositeResult<_>>()?,
            ),
            (Shape::Node, Value::Nil) => Value::Nil,
            (Shape::Node, Value::Node(node)) => {
                check_schema(field, &node)?;
                Value::Node(node)
            }
            (Shape::ListNode, Value::Nodes(nodes)) => {
                for node in &nodes {
                    check_schema(field, node)?;
                }
                Value::Nodes(nodes)
            }
            (shape, found) => {
                return Err(CompositeError::ValueShape {
                    field: field.wire_name().to_string(),
                    expected: shape,
                    found: found.kind(),
                })
            }
        };
        self.put(field, value)
    }

    /// Append to a list or node-list field by attribute name.
    pub fn push(&mut self, name: &str, value: impl Into<Value>) -> CompositeResult<()> {
        let field = self.lookup(name)?;
        match (field.shape(), value.into()) {
            (Shape::List, value) => {
                let value = field.coerce(&value)?;
                self.push_value(field, value)
            }
            (Shape::ListNode, Value::Node(node)) => {
                check_schema(field, &node)?;
                self.push_node(field, *node)
            }
            (shape, found) => Err(CompositeError::ValueShape {
                field: field.wire_name().to_string(),
                expected: shape,
                found: found.kind(),
            }),
        }
    }

    /// Store an already coerced value under `field`. Used by parse visitors.
    pub fn put(&mut self, field: &Field, value: Value) -> CompositeResult<()> {
        match self.values.get_mut(field.name()) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(self.unknown(field.name())),
        }
    }

    /// Append an already coerced scalar to a list field.
    pub fn push_value(&mut self, field: &Field, value: Value) -> CompositeResult<()> {
        match self.slot(field)? {
            Value::List(values) => {
                values.push(value);
                Ok(())
            }
            other => Err(CompositeError::ValueShape {
                field: field.wire_name().to_string(),
                expected: Shape::List,
                found: other.kind(),
            }),
        }
    }

    /// Append a nested document to a node-list field.
    pub fn push_node(&mut self, field: &Field, node: Document) -> CompositeResult<()> {
        match self.slot(field)? {
            Value::Nodes(nodes) => {
                nodes.push(node);
                Ok(())
            }
            other => Err(CompositeError::ValueShape {
                field: field.wire_name().to_string(),
                expected: Shape::ListNode,
                found: other.kind(),
            }),
        }
    }

    pub(crate) fn attach_attributes(&mut self, attributes: Document) {
        self.attributes = Some(Box::new(attributes));
    }

    fn slot(&mut self, field: &Field) -> CompositeResult<&mut Value> {
        let schema = self.schema;
        self.values
            .get_mut(field.name())
            .ok_or_else(|| CompositeError::UnknownField {
                schema: schema.name().to_string(),
                field: field.name().to_string(),
            })
    }

    fn lookup(&self, name: &str) -> CompositeResult<&'static Field> {
        let schema = self.schema;
        schema.field(name).ok_or_else(|| self.unknown(name))
    }

    fn unknown(&self, name: &str) -> CompositeError {
        CompositeError::UnknownField {
            schema: self.schema.name().to_string(),
            field: name.to_string(),
        }
    }
}

fn check_schema(field: &Field, node: &Document) -> CompositeResult<()> {
    let expected = field.schema()?;
    if std::ptr::eq(expected, node.schema) {
        Ok(())
    } else {
        Err(CompositeError::SchemaMismatch {
            expected: expected.name().to_string(),
            found: node.schema.name().to_string(),
        })
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.schema, other.schema)
            && self.values == other.values
            && self.attributes == other.attributes
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct(self.schema.name());
        for (name, value) in &self.values {
            s.field(name, value);
        }
        if let Some(attributes) = &self.attributes {
            s.field("attributes", attributes);
        }
        s.finish()
    }
}
