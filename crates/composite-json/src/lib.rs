//! Keyed mapping format for `composite` documents
//!
//! Documents map onto JSON objects keyed by wire name. Lists become
//! arrays, nested documents become nested objects, and attribute fields
//! are collected under a reserved key (`_attributes` by default):
//!
//! ```json
//! {"id": 1, "sign": "Pepyako inc.", "_attributes": {"first_name": "Alexander", "age": 23}}
//! ```

mod mapping;
pub use mapping::*;

mod visitor;
pub use visitor::*;

use composite::{
    CompositeError, CompositeResult, Document, DocumentBuilder, Format, Schema, DEFAULT_NODE_NAME,
};
use serde_json::Value as JsonValue;

impl Mapping {
    /// Parse JSON text into a document of `schema`.
    pub fn parse_str(&self, schema: &'static Schema, text: &str) -> CompositeResult<Document> {
        let source: JsonValue =
            serde_json::from_str(text).map_err(|e| CompositeError::decode(Self::NAME, e))?;
        schema.parse(self, &source)
    }

    /// Build `document` into a JSON value.
    pub fn to_value(&self, document: &Document) -> CompositeResult<JsonValue> {
        DocumentBuilder::new(self).build(document, DEFAULT_NODE_NAME)
    }

    pub fn to_text(&self, document: &Document) -> CompositeResult<String> {
        let value = self.to_value(document)?;
        serde_json::to_string(&value).map_err(|e| CompositeError::decode(Self::NAME, e))
    }

    pub fn to_text_pretty(&self, document: &Document) -> CompositeResult<String> {
        let value = self.to_value(document)?;
        serde_json::to_string_pretty(&value).map_err(|e| CompositeError::decode(Self::NAME, e))
    }
}

/// Parse JSON text with the default mapping.
pub fn from_json_str(schema: &'static Schema, text: &str) -> CompositeResult<Document> {
    Mapping::default().parse_str(schema, text)
}

pub fn to_json_value(document: &Document) -> CompositeResult<JsonValue> {
    Mapping::default().to_value(document)
}

pub fn to_json_string(document: &Document) -> CompositeResult<String> {
    Mapping::default().to_text(document)
}

pub fn to_json_string_pretty(document: &Document) -> CompositeResult<String> {
    Mapping::default().to_text_pretty(document)
}
