use crate::visitor::{MappingBuildVisitor, MappingParseVisitor};
use composite::{CompositeError, CompositeResult, Document, Format};
use ecow::EcoString;
use serde_json::{Map, Value as JsonValue};

/// Reserved key of the attribute carrier.
pub const ATTRIBUTES_KEY: &str = "_attributes";

/// Keyed mapping format over `serde_json::Value` objects.
///
/// Fields are stored under their wire names. Attribute fields live in a
/// nested object under the reserved attributes key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mapping {
    attributes_key: EcoString,
}

impl Default for Mapping {
    fn default() -> Self {
        Self {
            attributes_key: ATTRIBUTES_KEY.into(),
        }
    }
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attributes_key(key: impl Into<EcoString>) -> Self {
        Self {
            attributes_key: key.into(),
        }
    }

    pub fn attributes_key(&self) -> &str {
        &self.attributes_key
    }
}

pub(crate) fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "bool",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

pub(crate) fn expect_object<'s>(
    value: &'s JsonValue,
    context: &str,
) -> CompositeResult<&'s Map<String, JsonValue>> {
    value.as_object().ok_or_else(|| CompositeError::Source {
        format: Mapping::NAME,
        context: context.to_string(),
        expected: "an object",
        found: json_kind(value).to_string(),
    })
}

impl Format for Mapping {
    const NAME: &'static str = "mapping";

    type Node = JsonValue;
    type Scalar = JsonValue;
    type Carrier = JsonValue;
    type Target = JsonValue;

    type Parser<'a> = MappingParseVisitor<'a>;
    type Builder<'a> = MappingBuildVisitor<'a>;

    fn parse_visitor<'a>(&'a self, document: &'a mut Document) -> MappingParseVisitor<'a> {
        MappingParseVisitor::new(self, document)
    }

    fn build_visitor<'a>(&'a self, target: &'a mut JsonValue) -> MappingBuildVisitor<'a> {
        MappingBuildVisitor::new(self, target)
    }

    fn iterate<'s>(&self, source: &'s JsonValue) -> CompositeResult<Vec<(&'s str, &'s JsonValue)>> {
        let object = expect_object(source, "document")?;
        // the carrier key is left in; no content field may claim it
        Ok(object.iter().map(|(key, value)| (key.as_str(), value)).collect())
    }

    fn extract_attribute_carrier<'s>(
        &self,
        source: &'s JsonValue,
    ) -> CompositeResult<Option<&'s JsonValue>> {
        let object = expect_object(source, "document")?;
        Ok(object
            .get(self.attributes_key.as_str())
            .filter(|carrier| !carrier.is_null()))
    }

    fn iterate_carrier<'s>(
        &self,
        carrier: &'s JsonValue,
    ) -> CompositeResult<Vec<(&'s str, &'s JsonValue)>> {
        let object = expect_object(carrier, &self.attributes_key)?;
        Ok(object.iter().map(|(key, value)| (key.as_str(), value)).collect())
    }

    fn build_object(&self, _node_name: &str) -> JsonValue {
        JsonValue::Object(Map::new())
    }

    fn init_blank_attributes(&self, target: &mut JsonValue) {
        if let Some(object) = target.as_object_mut() {
            object.insert(
                self.attributes_key.to_string(),
                JsonValue::Object(Map::new()),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_attributes_key() {
        assert_eq!(Mapping::default().attributes_key(), "_attributes");
        assert_eq!(Mapping::with_attributes_key("@").attributes_key(), "@");
    }

    #[test]
    fn test_iterate_in_source_order() {
        let mapping = Mapping::default();
        let source = json!({"id": 1, "_attributes": {"age": 3}, "sign": "x"});
        let keys: Vec<&str> = mapping
            .iterate(&source)
            .unwrap()
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(keys, vec!["id", "_attributes", "sign"]);
    }

    #[test]
    fn test_carrier_extraction() {
        let mapping = Mapping::default();
        let with = json!({"_attributes": {"age": 3}});
        assert_eq!(
            mapping.extract_attribute_carrier(&with).unwrap(),
            Some(&json!({"age": 3}))
        );
        assert_eq!(mapping.extract_attribute_carrier(&json!({})).unwrap(), None);
        assert_eq!(
            mapping
                .extract_attribute_carrier(&json!({"_attributes": null}))
                .unwrap(),
            None
        );
        assert!(mapping.iterate_carrier(&json!([1, 2])).is_err());
    }

    #[test]
    fn test_source_must_be_object() {
        let err = Mapping::default().iterate(&json!([1, 2])).unwrap_err();
        match err {
            CompositeError::Source { format, found, .. } => {
                assert_eq!(format, "mapping");
                assert_eq!(found, "array");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_init_blank_attributes() {
        let mapping = Mapping::with_attributes_key("attrs");
        let mut target = mapping.build_object("ignored");
        mapping.init_blank_attributes(&mut target);
        assert_eq!(target, json!({"attrs": {}}));
    }
}
