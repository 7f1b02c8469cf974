use crate::mapping::{json_kind, Mapping};
use composite::{
    BuildVisitor, CompositeError, CompositeResult, Document, Field, ParseVisitor, Shape, Value,
};
use log::trace;
use serde_json::{Map, Number, Value as JsonValue};

/// Reads `serde_json` values into a document.
///
/// A `null` scalar leaves the field blank, a `null` node leaves it absent.
pub struct MappingParseVisitor<'a> {
    format: &'a Mapping,
    document: &'a mut Document,
}

impl<'a> MappingParseVisitor<'a> {
    pub fn new(format: &'a Mapping, document: &'a mut Document) -> Self {
        Self { format, document }
    }
}

/// Content fields cannot live under the attribute carrier's key.
fn check_wire_name(format: &Mapping, field: &Field) -> CompositeResult<()> {
    if field.wire_name() == format.attributes_key() {
        return Err(CompositeError::ReservedWireName {
            format: <Mapping as composite::Format>::NAME,
            field: field.name().to_string(),
            wire_name: field.wire_name().to_string(),
        });
    }
    Ok(())
}

fn from_json(field: &Field, raw: &JsonValue) -> CompositeResult<Value> {
    let value = match raw {
        JsonValue::Null => {
            trace!("`{}` is null, keeping blank value", field.wire_name());
            // a null list item stands for one zero value, not the whole list
            return Ok(match (field.shape(), field.scalar_type()) {
                (Shape::List, Some(ty)) => ty.zero(),
                _ => field.blank(),
            });
        }
        JsonValue::Bool(b) => Value::Bool(*b),
        JsonValue::Number(n) => from_number(n),
        JsonValue::String(s) => Value::Str(s.as_str().into()),
        other => return Err(shape_error(field, field.shape(), other)),
    };
    field.coerce(&value)
}

/// Integers past `i64` keep their exact digits; the value constructor
/// decides what to make of them.
fn from_number(n: &Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::Int(i)
    } else if n.is_u64() {
        Value::Str(n.to_string().into())
    } else if let Some(f) = n.as_f64() {
        Value::Float(f)
    } else {
        Value::Str(n.to_string().into())
    }
}

fn shape_error(field: &Field, expected: Shape, found: &JsonValue) -> CompositeError {
    CompositeError::ValueShape {
        field: field.wire_name().to_string(),
        expected,
        found: json_kind(found),
    }
}

impl ParseVisitor<Mapping> for MappingParseVisitor<'_> {
    fn visit_scalar(&mut self, field: &Field, raw: &JsonValue) -> CompositeResult<()> {
        check_wire_name(self.format, field)?;
        let value = from_json(field, raw)?;
        self.document.put(field, value)
    }

    fn visit_list_scalar(&mut self, field: &Field, raw: &JsonValue) -> CompositeResult<()> {
        check_wire_name(self.format, field)?;
        match raw {
            JsonValue::Null => self.document.put(field, field.blank()),
            JsonValue::Array(items) => {
                for item in items {
                    let value = from_json(field, item)?;
                    self.document.push_value(field, value)?;
                }
                Ok(())
            }
            other => Err(shape_error(field, Shape::List, other)),
        }
    }

    fn visit_attribute_scalar(&mut self, field: &Field, raw: &JsonValue) -> CompositeResult<()> {
        let value = from_json(field, raw)?;
        self.document.put(field, value)
    }

    fn visit_node(&mut self, field: &Field, raw: &JsonValue) -> CompositeResult<()> {
        check_wire_name(self.format, field)?;
        if raw.is_null() {
            return self.document.put(field, Value::Nil);
        }
        let node = field.schema()?.parse(self.format, raw)?;
        self.document.put(field, node.into())
    }

    fn visit_list_node(&mut self, field: &Field, raw: &JsonValue) -> CompositeResult<()> {
        check_wire_name(self.format, field)?;
        match raw {
            JsonValue::Null => Ok(()),
            JsonValue::Array(items) => {
                let schema = field.schema()?;
                for item in items {
                    let node = schema.parse(self.format, item)?;
                    self.document.push_node(field, node)?;
                }
                Ok(())
            }
            other => Err(shape_error(field, Shape::ListNode, other)),
        }
    }
}

/// Writes a document into a `serde_json` object.
pub struct MappingBuildVisitor<'a> {
    format: &'a Mapping,
    target: &'a mut JsonValue,
}

impl<'a> MappingBuildVisitor<'a> {
    pub fn new(format: &'a Mapping, target: &'a mut JsonValue) -> Self {
        Self { format, target }
    }

    fn object(&mut self) -> CompositeResult<&mut Map<String, JsonValue>> {
        let found = json_kind(self.target);
        self.target
            .as_object_mut()
            .ok_or_else(|| CompositeError::Source {
                format: <Mapping as composite::Format>::NAME,
                context: "target".to_string(),
                expected: "an object",
                found: found.to_string(),
            })
    }

    fn insert(&mut self, field: &Field, value: JsonValue) -> CompositeResult<()> {
        check_wire_name(self.format, field)?;
        self.object()?.insert(field.wire_name().to_string(), value);
        Ok(())
    }
}

fn to_json(value: &Value) -> JsonValue {
    match value {
        Value::Int(i) => JsonValue::from(*i),
        Value::Float(f) => Number::from_f64(*f).map_or(JsonValue::Null, JsonValue::Number),
        Value::Str(s) => JsonValue::String(s.to_string()),
        Value::Bool(b) => JsonValue::Bool(*b),
        Value::List(values) => JsonValue::Array(values.iter().map(to_json).collect()),
        Value::Nil | Value::Node(_) | Value::Nodes(_) => JsonValue::Null,
    }
}

impl BuildVisitor<Mapping> for MappingBuildVisitor<'_> {
    fn visit_scalar(&mut self, field: &Field, value: &Value) -> CompositeResult<()> {
        let value = to_json(&field.coerce(value)?);
        self.insert(field, value)
    }

    fn visit_list_scalar(&mut self, field: &Field, values: &[Value]) -> CompositeResult<()> {
        let items = values
            .iter()
            .map(|value| field.coerce(value).map(|v| to_json(&v)))
            .collect::<CompositeResult<Vec<_>>>()?;
        self.insert(field, JsonValue::Array(items))
    }

    fn visit_attribute_scalar(&mut self, field: &Field, value: &Value) -> CompositeResult<()> {
        let value = to_json(&field.coerce(value)?);
        let format = self.format;
        let key = format.attributes_key();
        let carrier = self
            .object()?
            .get_mut(key)
            .and_then(JsonValue::as_object_mut)
            .ok_or_else(|| CompositeError::MissingCarrier {
                carrier: key.to_string(),
                field: field.wire_name().to_string(),
            })?;
        carrier.insert(field.wire_name().to_string(), value);
        Ok(())
    }

    fn visit_node(&mut self, field: &Field, node: &Document) -> CompositeResult<()> {
        let built = field.schema()?.build(self.format, node, field.wire_name())?;
        self.insert(field, built)
    }

    fn visit_list_node(&mut self, field: &Field, nodes: &[Document]) -> CompositeResult<()> {
        let schema = field.schema()?;
        let items = nodes
            .iter()
            .map(|node| schema.build(self.format, node, field.wire_name()))
            .collect::<CompositeResult<Vec<_>>>()?;
        self.insert(field, JsonValue::Array(items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use composite::ScalarType;
    use serde_json::json;

    #[test]
    fn test_from_json_coerces() {
        let id = Field::scalar("id", ScalarType::Int);
        assert_eq!(from_json(&id, &json!(1)).unwrap(), Value::Int(1));
        assert_eq!(from_json(&id, &json!("7")).unwrap(), Value::Int(7));
        assert_eq!(from_json(&id, &json!(2.0)).unwrap(), Value::Int(2));
        assert_eq!(from_json(&id, &JsonValue::Null).unwrap(), Value::Int(0));
        assert!(matches!(
            from_json(&id, &json!("one")),
            Err(CompositeError::Coercion { .. })
        ));
        assert!(matches!(
            from_json(&id, &json!({"a": 1})),
            Err(CompositeError::ValueShape { found: "object", .. })
        ));

        let sign = Field::scalar("sign", ScalarType::Str);
        assert_eq!(from_json(&sign, &json!(12)).unwrap(), Value::from("12"));
    }

    #[test]
    fn test_null_list_item_is_zero() {
        let values = Field::list("values", ScalarType::Int);
        assert_eq!(from_json(&values, &JsonValue::Null).unwrap(), Value::Int(0));
        let defaulted = Field::list("values", ScalarType::Int).with_default(Value::list([5]));
        assert_eq!(from_json(&defaulted, &JsonValue::Null).unwrap(), Value::Int(0));
    }

    #[test]
    fn test_from_json_past_i64() {
        let id = Field::scalar("id", ScalarType::Int);
        assert_eq!(
            from_json(&id, &json!(9223372036854775807u64)).unwrap(),
            Value::Int(i64::MAX)
        );
        assert!(matches!(
            from_json(&id, &json!(9223372036854775808u64)),
            Err(CompositeError::Coercion { ref found, .. }) if found == "9223372036854775808"
        ));

        let sign = Field::scalar("sign", ScalarType::Str);
        assert_eq!(
            from_json(&sign, &json!(u64::MAX)).unwrap(),
            Value::from("18446744073709551615")
        );
    }

    #[test]
    fn test_to_json() {
        assert_eq!(to_json(&Value::Int(3)), json!(3));
        assert_eq!(to_json(&Value::Float(1.5)), json!(1.5));
        assert_eq!(to_json(&Value::Float(f64::NAN)), JsonValue::Null);
        assert_eq!(to_json(&Value::list(["a", "b"])), json!(["a", "b"]));
    }

    #[test]
    fn test_attribute_needs_carrier() {
        let mapping = Mapping::default();
        let mut target = json!({});
        let mut visitor = MappingBuildVisitor::new(&mapping, &mut target);
        let field = Field::attribute("age", ScalarType::Int);
        let err = visitor
            .visit_attribute_scalar(&field, &Value::Int(23))
            .unwrap_err();
        assert!(matches!(err, CompositeError::MissingCarrier { ref carrier, .. } if carrier == "_attributes"));
    }

    #[test]
    fn test_reserved_wire_name() {
        let mapping = Mapping::default();
        let field = Field::scalar("_attributes", ScalarType::Str);
        let mut target = json!({});
        let err = MappingBuildVisitor::new(&mapping, &mut target)
            .visit_scalar(&field, &Value::from("x"))
            .unwrap_err();
        assert!(matches!(err, CompositeError::ReservedWireName { ref wire_name, .. } if wire_name == "_attributes"));
        assert_eq!(target, json!({}));

        let other = Mapping::with_attributes_key("@");
        MappingBuildVisitor::new(&other, &mut target)
            .visit_scalar(&field, &Value::from("x"))
            .unwrap();
        assert_eq!(target, json!({"_attributes": "x"}));
    }
}
