use crate::element::Element;
use crate::markup::Markup;
use composite::{BuildVisitor, CompositeResult, Document, Field, ParseVisitor, Value};
use log::trace;

/// Reads element text and attributes into a document.
pub struct MarkupParseVisitor<'a> {
    format: &'a Markup,
    document: &'a mut Document,
}

impl<'a> MarkupParseVisitor<'a> {
    pub fn new(format: &'a Markup, document: &'a mut Document) -> Self {
        Self { format, document }
    }
}

impl ParseVisitor<Markup> for MarkupParseVisitor<'_> {
    fn visit_scalar(&mut self, field: &Field, raw: &Element) -> CompositeResult<()> {
        let value = field.parse_text(self.format.text(raw.text()))?;
        self.document.put(field, value)
    }

    fn visit_list_scalar(&mut self, field: &Field, raw: &Element) -> CompositeResult<()> {
        let value = field.parse_text(self.format.text(raw.text()))?;
        self.document.push_value(field, value)
    }

    fn visit_attribute_scalar(&mut self, field: &Field, raw: &str) -> CompositeResult<()> {
        let value = field.parse_text(self.format.text(raw))?;
        self.document.put(field, value)
    }

    fn visit_node(&mut self, field: &Field, raw: &Element) -> CompositeResult<()> {
        let node = field.schema()?.parse(self.format, raw)?;
        self.document.put(field, node.into())
    }

    fn visit_list_node(&mut self, field: &Field, raw: &Element) -> CompositeResult<()> {
        let node = field.schema()?.parse(self.format, raw)?;
        self.document.push_node(field, node)
    }
}

/// Writes a document into an element.
pub struct MarkupBuildVisitor<'a> {
    format: &'a Markup,
    target: &'a mut Element,
}

impl<'a> MarkupBuildVisitor<'a> {
    pub fn new(format: &'a Markup, target: &'a mut Element) -> Self {
        Self { format, target }
    }
}

fn text_of(field: &Field, value: &Value) -> CompositeResult<String> {
    let value = field.coerce(value)?;
    Ok(value.to_text().map(|t| t.to_string()).unwrap_or_default())
}

impl BuildVisitor<Markup> for MarkupBuildVisitor<'_> {
    fn visit_scalar(&mut self, field: &Field, value: &Value) -> CompositeResult<()> {
        let text = text_of(field, value)?;
        self.target.push(Element::new(field.wire_name()).with_text(text));
        Ok(())
    }

    fn visit_list_scalar(&mut self, field: &Field, values: &[Value]) -> CompositeResult<()> {
        trace!("writing {} `{}` elements", values.len(), field.wire_name());
        for value in values {
            self.visit_scalar(field, value)?;
        }
        Ok(())
    }

    fn visit_attribute_scalar(&mut self, field: &Field, value: &Value) -> CompositeResult<()> {
        let text = text_of(field, value)?;
        self.target.set_attribute(field.wire_name(), text);
        Ok(())
    }

    fn visit_node(&mut self, field: &Field, node: &Document) -> CompositeResult<()> {
        let element = field.schema()?.build(self.format, node, field.wire_name())?;
        self.target.push(element);
        Ok(())
    }

    fn visit_list_node(&mut self, field: &Field, nodes: &[Document]) -> CompositeResult<()> {
        let schema = field.schema()?;
        for node in nodes {
            let element = schema.build(self.format, node, field.wire_name())?;
            self.target.push(element);
        }
        Ok(())
    }
}
