use crate::markup::Markup;
use composite::{CompositeError, CompositeResult, Format};
use ecow::EcoString;
use indexmap::IndexMap;

/// Attribute set of an element, in document order.
pub type Attributes = IndexMap<EcoString, EcoString>;

/// A markup element: tag name, attribute set, child elements and the
/// element's own text.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    name: EcoString,
    attributes: Attributes,
    children: Vec<Element>,
    text: EcoString,
}

impl Element {
    pub fn new(name: impl Into<EcoString>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_attribute(
        mut self,
        name: impl Into<EcoString>,
        value: impl Into<EcoString>,
    ) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_text(mut self, text: impl Into<EcoString>) -> Self {
        self.text = text.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(|v| v.as_str())
    }

    pub fn set_attribute(&mut self, name: impl Into<EcoString>, value: impl Into<EcoString>) {
        self.attributes.insert(name.into(), value.into());
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Children with the given tag name.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter(move |c| c.name == name)
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn push(&mut self, child: Element) {
        self.children.push(child);
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<EcoString>) {
        self.text = text.into();
    }

    /// Read XML text into an element tree, rooted at the document element.
    pub fn from_xml(text: &str) -> CompositeResult<Element> {
        let doc = roxmltree::Document::parse(text)
            .map_err(|e| CompositeError::decode(Markup::NAME, e))?;
        Ok(Self::from_node(doc.root_element()))
    }

    fn from_node(node: roxmltree::Node) -> Element {
        let mut element = Element::new(node.tag_name().name());
        for attr in node.attributes() {
            element.set_attribute(attr.name(), attr.value());
        }
        let mut text = String::new();
        for child in node.children() {
            if child.is_element() {
                element.push(Self::from_node(child));
            } else if child.is_text() {
                text.push_str(child.text().unwrap_or_default());
            }
        }
        // whitespace between child elements is layout, not text
        if !(element.has_children() && text.trim().is_empty()) {
            element.text = text.into();
        }
        element
    }
}

pub trait ToXml {
    fn to_xml(&self) -> EcoString;
}

impl ToXml for Element {
    fn to_xml(&self) -> EcoString {
        let mut xml = String::new();
        write_element(self, &mut xml);
        xml.into()
    }
}

fn write_element(element: &Element, xml: &mut String) {
    // start tag
    xml.push('<');
    xml.push_str(&element.name);
    for (k, v) in &element.attributes {
        xml.push_str(&format!(" {}=\"{}\"", k, escape(v, true)));
    }

    if element.children.is_empty() && element.text.is_empty() {
        xml.push_str("/>");
        return;
    }

    xml.push('>');
    xml.push_str(&escape(&element.text, false));
    for child in &element.children {
        write_element(child, xml);
    }

    // end tag
    xml.push_str("</");
    xml.push_str(&element.name);
    xml.push('>');
}

fn escape(text: &str, attribute: bool) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' if attribute => escaped.push_str("&quot;"),
            '\n' if attribute => escaped.push_str("&#10;"),
            '\t' if attribute => escaped.push_str("&#9;"),
            '\r' => escaped.push_str("&#13;"),
            c => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_to_xml() {
        let node = Element::new("profile")
            .with_attribute("name", "ming")
            .with_attribute("age", "12")
            .with_child(Element::new("id").with_text("1"))
            .with_child(Element::new("sign"));
        // insertion order is preserved
        assert_eq!(
            node.to_xml(),
            r#"<profile name="ming" age="12"><id>1</id><sign/></profile>"#
        );
    }

    #[test]
    fn test_escaping() {
        let node = Element::new("sign")
            .with_attribute("quote", "say \"hi\" & <bye>")
            .with_text("a < b && c");
        let xml = node.to_xml();
        assert_eq!(
            xml,
            r#"<sign quote="say &quot;hi&quot; &amp; &lt;bye&gt;">a &lt; b &amp;&amp; c</sign>"#
        );
        assert_eq!(Element::from_xml(&xml).unwrap(), node);
    }

    #[test]
    fn test_from_xml() {
        let xml = r#"
            <users>
                <profile first_name="Alexander" age="23">
                    <id>1</id>
                    <sign>Pepyako inc.</sign>
                </profile>
                <profile first_name="Ivan"/>
            </users>
        "#;
        let root = Element::from_xml(xml).unwrap();
        assert_eq!(root.name(), "users");
        assert_eq!(root.text(), "");
        assert_eq!(root.children().len(), 2);

        let profile = &root.children()[0];
        assert_eq!(profile.attribute("first_name"), Some("Alexander"));
        assert_eq!(profile.attribute("age"), Some("23"));
        let keys: Vec<&str> = profile.attributes().keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["first_name", "age"]);
        assert_eq!(profile.children_named("sign").next().map(|s| s.text()), Some("Pepyako inc."));
        assert!(!root.children()[1].has_children());
    }

    #[test]
    fn test_text_is_verbatim() {
        let root = Element::from_xml("<sign>  padded  </sign>").unwrap();
        assert_eq!(root.text(), "  padded  ");
        let root = Element::from_xml("<sign>a &amp; b</sign>").unwrap();
        assert_eq!(root.text(), "a & b");
    }

    #[test]
    fn test_malformed_xml() {
        let err = Element::from_xml("<users><profile></users>").unwrap_err();
        assert!(matches!(err, CompositeError::Decode { format: "markup", .. }));
    }
}
