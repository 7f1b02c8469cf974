use crate::document::Document;
use ecow::EcoString;
use std::fmt::{self, Display, Formatter};

/// Value constructor of a scalar field.
///
/// Every scalar read from a wire representation goes through one of these
/// before it lands in a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
#[strum(serialize_all = "snake_case")]
pub enum ScalarType {
    Int,
    Float,
    Str,
    Bool,
}

impl ScalarType {
    /// The value a blank document holds for a field of this type.
    pub fn zero(&self) -> Value {
        match self {
            ScalarType::Int => Value::Int(0),
            ScalarType::Float => Value::Float(0.0),
            ScalarType::Str => Value::Str(EcoString::new()),
            ScalarType::Bool => Value::Bool(false),
        }
    }

    /// Coerce markup text. Numbers and booleans ignore surrounding whitespace,
    /// strings are taken verbatim.
    pub fn parse_text(&self, text: &str) -> Option<Value> {
        match self {
            ScalarType::Int => text.trim().parse::<i64>().ok().map(Value::Int),
            ScalarType::Float => text.trim().parse::<f64>().ok().map(Value::Float),
            ScalarType::Str => Some(Value::Str(text.into())),
            ScalarType::Bool => parse_bool(text.trim()).map(Value::Bool),
        }
    }

    /// Coerce an already decoded value, e.g. an integer that arrived as a
    /// string or a float without fraction where an integer is declared.
    pub fn coerce(&self, value: &Value) -> Option<Value> {
        match (self, value) {
            (ScalarType::Int, Value::Int(i)) => Some(Value::Int(*i)),
            (ScalarType::Int, Value::Float(f)) => {
                // i64::MAX as f64 rounds up to 2^63, which is already out of range
                if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64 {
                    Some(Value::Int(*f as i64))
                } else {
                    None
                }
            }
            (ScalarType::Float, Value::Float(f)) => Some(Value::Float(*f)),
            (ScalarType::Float, Value::Int(i)) => Some(Value::Float(*i as f64)),
            (ScalarType::Bool, Value::Bool(b)) => Some(Value::Bool(*b)),
            (ScalarType::Bool, Value::Int(0)) => Some(Value::Bool(false)),
            (ScalarType::Bool, Value::Int(1)) => Some(Value::Bool(true)),
            (ScalarType::Str, Value::Str(s)) => Some(Value::Str(s.clone())),
            (ScalarType::Str, Value::Int(_) | Value::Float(_) | Value::Bool(_)) => {
                value.to_text().map(Value::Str)
            }
            (_, Value::Str(s)) => self.parse_text(s),
            _ => None,
        }
    }
}

fn parse_bool(text: &str) -> Option<bool> {
    if text.eq_ignore_ascii_case("true") || text == "1" {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") || text == "0" {
        Some(false)
    } else {
        None
    }
}

/// A runtime field value held by a [`Document`].
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Absent nested document.
    #[default]
    Nil,
    Int(i64),
    Float(f64),
    Str(EcoString),
    Bool(bool),
    List(Vec<Value>),
    Node(Box<Document>),
    Nodes(Vec<Document>),
}

impl Value {
    /// Build a scalar list value.
    pub fn list<T: Into<Value>>(values: impl IntoIterator<Item = T>) -> Value {
        Value::List(values.into_iter().map(Into::into).collect())
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Short kind name, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::Bool(_) => "bool",
            Value::List(_) => "list",
            Value::Node(_) => "node",
            Value::Nodes(_) => "node list",
        }
    }

    /// Text form of a scalar; `None` for nil, lists and nodes.
    pub fn to_text(&self) -> Option<EcoString> {
        match self {
            Value::Int(i) => Some(i.to_string().into()),
            Value::Float(f) => Some(f.to_string().into()),
            Value::Str(s) => Some(s.clone()),
            Value::Bool(b) => Some(if *b { "true".into() } else { "false".into() }),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_node(&self) -> Option<&Document> {
        match self {
            Value::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_nodes(&self) -> Option<&[Document]> {
        match self {
            Value::Nodes(nodes) => Some(nodes),
            _ => None,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(v) => write!(f, "{}", v),
            Value::Str(s) => write!(f, "\"{}\"", s),
            Value::Bool(b) => write!(f, "{}", b),
            Value::List(values) => {
                write!(f, "[")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", value)?;
                }
                write!(f, "]")
            }
            Value::Node(node) => write!(f, "<{}>", node.schema().name()),
            Value::Nodes(nodes) => write!(f, "[{} nodes]", nodes.len()),
        }
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Value {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Value {
        Value::Int(i as i64)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Value {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Value {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Value {
        Value::Str(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Value {
        Value::Str(s.into())
    }
}

impl From<EcoString> for Value {
    fn from(s: EcoString) -> Value {
        Value::Str(s)
    }
}

impl From<Document> for Value {
    fn from(document: Document) -> Value {
        Value::Node(Box::new(document))
    }
}

impl From<Vec<Document>> for Value {
    fn from(documents: Vec<Document>) -> Value {
        Value::Nodes(documents)
    }
}
