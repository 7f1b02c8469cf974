use crate::error::{CompositeError, CompositeResult};
use crate::schema::{Schema, SchemaCell};
use crate::value::{ScalarType, Value};
use ecow::EcoString;
use std::fmt;

/// How a field sits in the wire representation. Drives visitor dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Shape {
    /// One coerced value
    Scalar,
    /// Ordered sequence of coerced values
    List,
    /// One nested document
    Node,
    /// Ordered sequence of nested documents
    ListNode,
    /// One coerced value stored in the attribute carrier
    AttributeScalar,
}

impl Shape {
    pub fn is_list(&self) -> bool {
        matches!(self, Shape::List | Shape::ListNode)
    }

    pub fn is_node(&self) -> bool {
        matches!(self, Shape::Node | Shape::ListNode)
    }
}

/// The value constructor of a field: a scalar coercion, or a nested schema
/// for node shapes.
#[derive(Clone, Copy)]
pub enum FieldType {
    Scalar(ScalarType),
    Node(&'static SchemaCell),
}

impl fmt::Debug for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Scalar(ty) => write!(f, "Scalar({})", ty),
            FieldType::Node(cell) => match cell.peek() {
                Some(schema) => write!(f, "Node({})", schema.name()),
                None => write!(f, "Node(..)"),
            },
        }
    }
}

/// Declaration of one schema field.
///
/// ```ignore
/// Field::scalar("id", ScalarType::Int)
/// Field::list_node("profile", &USER).named("users")
/// Field::attribute("age", ScalarType::Int).with_default(21)
/// ```
#[derive(Debug, Clone)]
pub struct Field {
    wire_name: EcoString,
    name: EcoString,
    ty: FieldType,
    shape: Shape,
    default: Option<Value>,
}

impl Field {
    fn new(wire_name: impl Into<EcoString>, ty: FieldType, shape: Shape) -> Self {
        let wire_name = wire_name.into();
        Self {
            name: wire_name.clone(),
            wire_name,
            ty,
            shape,
            default: None,
        }
    }

    pub fn scalar(wire_name: impl Into<EcoString>, ty: ScalarType) -> Self {
        Self::new(wire_name, FieldType::Scalar(ty), Shape::Scalar)
    }

    pub fn list(wire_name: impl Into<EcoString>, ty: ScalarType) -> Self {
        Self::new(wire_name, FieldType::Scalar(ty), Shape::List)
    }

    pub fn attribute(wire_name: impl Into<EcoString>, ty: ScalarType) -> Self {
        Self::new(wire_name, FieldType::Scalar(ty), Shape::AttributeScalar)
    }

    pub fn node(wire_name: impl Into<EcoString>, schema: &'static SchemaCell) -> Self {
        Self::new(wire_name, FieldType::Node(schema), Shape::Node)
    }

    pub fn list_node(wire_name: impl Into<EcoString>, schema: &'static SchemaCell) -> Self {
        Self::new(wire_name, FieldType::Node(schema), Shape::ListNode)
    }

    /// Attribute name of the field inside a document, when it differs from
    /// the wire name.
    pub fn named(mut self, name: impl Into<EcoString>) -> Self {
        self.name = name.into();
        self
    }

    /// Value of the field in a blank document. Checked against the value
    /// constructor when the schema is registered.
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn wire_name(&self) -> &str {
        &self.wire_name
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn ty(&self) -> FieldType {
        self.ty
    }

    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn scalar_type(&self) -> Option<ScalarType> {
        match self.ty {
            FieldType::Scalar(ty) => Some(ty),
            FieldType::Node(_) => None,
        }
    }

    /// Nested schema of a node field. Registers it on first use.
    pub fn schema(&self) -> CompositeResult<&'static Schema> {
        match self.ty {
            FieldType::Node(cell) => Ok(cell.get()?),
            FieldType::Scalar(_) => Err(CompositeError::ValueShape {
                field: self.wire_name.to_string(),
                expected: Shape::Node,
                found: "scalar",
            }),
        }
    }

    /// Value this field holds in a blank document.
    pub fn blank(&self) -> Value {
        if let Some(default) = &self.default {
            return default.clone();
        }
        match (self.shape, self.ty) {
            (Shape::List, _) => Value::List(Vec::new()),
            (Shape::ListNode, _) => Value::Nodes(Vec::new()),
            (Shape::Node, _) => Value::Nil,
            (_, FieldType::Scalar(ty)) => ty.zero(),
            (_, FieldType::Node(_)) => Value::Nil,
        }
    }

    /// Run the value constructor over markup text.
    pub fn parse_text(&self, text: &str) -> CompositeResult<Value> {
        let ty = self.expect_scalar_type()?;
        ty.parse_text(text).ok_or_else(|| self.coercion_error(ty, text))
    }

    /// Run the value constructor over a decoded value.
    pub fn coerce(&self, value: &Value) -> CompositeResult<Value> {
        let ty = self.expect_scalar_type()?;
        ty.coerce(value).ok_or_else(|| match value.to_text() {
            Some(text) => self.coercion_error(ty, &text),
            None => self.coercion_error(ty, &value.to_string()),
        })
    }

    fn expect_scalar_type(&self) -> CompositeResult<ScalarType> {
        self.scalar_type().ok_or_else(|| CompositeError::ValueShape {
            field: self.wire_name.to_string(),
            expected: self.shape,
            found: "scalar",
        })
    }

    fn coercion_error(&self, expected: ScalarType, found: &str) -> CompositeError {
        CompositeError::Coercion {
            field: self.wire_name.to_string(),
            expected,
            found: found.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static EMPTY: SchemaCell = SchemaCell::new(|| Schema::builder("Empty").build());

    #[test]
    fn test_names() {
        let field = Field::list_node("profile", &EMPTY).named("users");
        assert_eq!(field.wire_name(), "profile");
        assert_eq!(field.name(), "users");
        assert_eq!(field.shape(), Shape::ListNode);
        assert!(field.shape().is_list());
        assert!(field.shape().is_node());

        let field = Field::scalar("id", ScalarType::Int);
        assert_eq!(field.name(), "id");
        assert_eq!(field.scalar_type(), Some(ScalarType::Int));
    }

    #[test]
    fn test_blank_values() {
        assert_eq!(Field::scalar("id", ScalarType::Int).blank(), Value::Int(0));
        assert_eq!(
            Field::attribute("sign", ScalarType::Str).blank(),
            Value::Str("".into())
        );
        assert_eq!(Field::list("values", ScalarType::Int).blank(), Value::List(vec![]));
        assert_eq!(Field::list_node("users", &EMPTY).blank(), Value::Nodes(vec![]));
        assert_eq!(Field::node("ceo", &EMPTY).blank(), Value::Nil);
        assert_eq!(
            Field::scalar("age", ScalarType::Int).with_default(21).blank(),
            Value::Int(21)
        );
    }

    #[test]
    fn test_parse_text_error_names_field() {
        let field = Field::scalar("id", ScalarType::Int);
        assert_eq!(field.parse_text("1").unwrap(), Value::Int(1));
        match field.parse_text("Acme") {
            Err(CompositeError::Coercion { field, expected, found }) => {
                assert_eq!(field, "id");
                assert_eq!(expected, ScalarType::Int);
                assert_eq!(found, "Acme");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_node_field_has_no_scalar_constructor() {
        let field = Field::node("ceo", &EMPTY);
        assert!(matches!(
            field.coerce(&Value::Int(1)),
            Err(CompositeError::ValueShape { .. })
        ));
        assert_eq!(field.schema().unwrap().name(), "Empty");
    }

    #[test]
    fn test_debug_field_type() {
        let _ = EMPTY.get();
        let field = Field::node("ceo", &EMPTY);
        assert_eq!(format!("{:?}", field.ty()), "Node(Empty)");
    }
}
