use crate::element::{Attributes, Element};
use crate::visitor::{MarkupBuildVisitor, MarkupParseVisitor};
use composite::{CompositeResult, Document, Format};

/// Markup format over [`Element`] trees.
///
/// Scalars and lists are child elements named by wire name; a list field
/// repeats its element once per value. Attribute fields live in the
/// element's attribute set, which every element has, so a markup source
/// always carries attributes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Markup {
    trim_text: bool,
}

impl Markup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trim surrounding whitespace from string text before coercion.
    /// Numbers and booleans are always trimmed.
    pub fn trimmed() -> Self {
        Self { trim_text: true }
    }

    pub fn trims_text(&self) -> bool {
        self.trim_text
    }

    pub(crate) fn text<'t>(&self, text: &'t str) -> &'t str {
        if self.trim_text {
            text.trim()
        } else {
            text
        }
    }
}

impl Format for Markup {
    const NAME: &'static str = "markup";

    type Node = Element;
    type Scalar = str;
    type Carrier = Attributes;
    type Target = Element;

    type Parser<'a> = MarkupParseVisitor<'a>;
    type Builder<'a> = MarkupBuildVisitor<'a>;

    fn parse_visitor<'a>(&'a self, document: &'a mut Document) -> MarkupParseVisitor<'a> {
        MarkupParseVisitor::new(self, document)
    }

    fn build_visitor<'a>(&'a self, target: &'a mut Element) -> MarkupBuildVisitor<'a> {
        MarkupBuildVisitor::new(self, target)
    }

    fn iterate<'s>(&self, source: &'s Element) -> CompositeResult<Vec<(&'s str, &'s Element)>> {
        Ok(source
            .children()
            .iter()
            .map(|child| (child.name(), child))
            .collect())
    }

    fn extract_attribute_carrier<'s>(
        &self,
        source: &'s Element,
    ) -> CompositeResult<Option<&'s Attributes>> {
        Ok(Some(source.attributes()))
    }

    fn iterate_carrier<'s>(
        &self,
        carrier: &'s Attributes,
    ) -> CompositeResult<Vec<(&'s str, &'s str)>> {
        Ok(carrier
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .collect())
    }

    fn build_object(&self, node_name: &str) -> Element {
        Element::new(node_name)
    }

    // the attribute set already exists on every element
    fn init_blank_attributes(&self, _target: &mut Element) {}
}
