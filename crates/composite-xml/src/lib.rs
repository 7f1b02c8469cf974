//! Markup format for `composite` documents
//!
//! A document maps onto one element. Content fields become child elements
//! named by wire name, and attribute fields become attributes of that
//! element:
//!
//! ```xml
//! <profile first_name="Alexander" age="23">
//!     <id>1</id>
//!     <sign>Pepyako inc.</sign>
//! </profile>
//! ```
//!
//! XML text is read with `roxmltree` and written by [`ToXml`].

mod element;
pub use element::*;

mod markup;
pub use markup::*;

mod visitor;
pub use visitor::*;

use composite::{CompositeResult, Document, DocumentBuilder, Schema};

impl Markup {
    /// Parse XML text into a document of `schema`. The document element is
    /// the source; its tag name is not checked.
    pub fn parse_str(&self, schema: &'static Schema, text: &str) -> CompositeResult<Document> {
        let root = Element::from_xml(text)?;
        schema.parse(self, &root)
    }

    pub fn to_element(&self, document: &Document, node_name: &str) -> CompositeResult<Element> {
        DocumentBuilder::new(self).build(document, node_name)
    }

    pub fn to_text(&self, document: &Document, node_name: &str) -> CompositeResult<String> {
        Ok(self.to_element(document, node_name)?.to_xml().to_string())
    }
}

pub fn from_xml_str(schema: &'static Schema, text: &str) -> CompositeResult<Document> {
    Markup::default().parse_str(schema, text)
}

pub fn to_element(document: &Document, node_name: &str) -> CompositeResult<Element> {
    Markup::default().to_element(document, node_name)
}

/// Write `document` as XML text, under a root element named `node_name`
/// (usually [`composite::DEFAULT_NODE_NAME`]).
pub fn to_xml_string(document: &Document, node_name: &str) -> CompositeResult<String> {
    Markup::default().to_text(document, node_name)
}
