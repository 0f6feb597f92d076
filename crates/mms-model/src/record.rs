//! Source and target records.
//!
//! A [`SourceRecord`] is the marketplace-agnostic scraped product: a flat JSON
//! object with heterogeneous field names. A [`TargetRecord`] is the output of
//! one profile: target fields in profile order, each with its provenance.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::{ModelError, Result};
use crate::provenance::FieldProvenance;
use crate::value::FieldValue;

/// Returns true when a source value counts as absent.
///
/// `null`, blank strings, empty arrays and empty objects are all treated the
/// same as a missing key.
pub fn is_absent(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// A scraped product record keyed by flat field name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceRecord {
    fields: Map<String, Value>,
}

impl SourceRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from a JSON value, which must be an object.
    pub fn from_json(value: Value) -> Result<Self> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(ModelError::NotAnObject {
                found: json_kind(&other),
            }),
        }
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Raw lookup, including `null` and empty values.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Lookup that treats absent/empty values as missing.
    pub fn present(&self, key: &str) -> Option<&Value> {
        self.fields.get(key).filter(|value| !is_absent(value))
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<Map<String, Value>> for SourceRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for SourceRecord {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// One populated output field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetField {
    pub name: String,
    pub value: FieldValue,
    pub provenance: FieldProvenance,
}

/// Output of one profile applied to one source record.
///
/// Fields keep the order in which they were written, which is the profile's
/// mapping order. Serializes as a plain JSON object of `name -> value`; use
/// [`TargetRecord::fields`] for provenance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TargetRecord {
    fields: Vec<TargetField>,
}

impl TargetRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field. Replaces the value if `name` was already written.
    pub fn push(&mut self, name: impl Into<String>, value: FieldValue, provenance: FieldProvenance) {
        let name = name.into();
        if let Some(existing) = self.fields.iter_mut().find(|field| field.name == name) {
            existing.value = value;
            existing.provenance = provenance;
            return;
        }
        self.fields.push(TargetField {
            name,
            value,
            provenance,
        });
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.field(name).map(|field| &field.value)
    }

    pub fn field(&self, name: &str) -> Option<&TargetField> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn provenance(&self, name: &str) -> Option<&FieldProvenance> {
        self.field(name).map(|field| &field.provenance)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    pub fn fields(&self) -> &[TargetField] {
        &self.fields
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|field| field.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for TargetRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for field in &self.fields {
            map.serialize_entry(&field.name, &field.value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn provenance(source: &str) -> FieldProvenance {
        FieldProvenance {
            source_field: source.to_string(),
            transformer: "toString",
            validator: None,
            defaulted: false,
        }
    }

    #[test]
    fn absent_values() {
        assert!(is_absent(&json!(null)));
        assert!(is_absent(&json!("   ")));
        assert!(is_absent(&json!([])));
        assert!(is_absent(&json!({})));
        assert!(!is_absent(&json!(0)));
        assert!(!is_absent(&json!(false)));
        assert!(!is_absent(&json!("x")));
    }

    #[test]
    fn source_record_present_filters_empty() {
        let record = SourceRecord::new()
            .with("product_name", "Shirt")
            .with("brand", "")
            .with("price", Value::Null);
        assert_eq!(record.present("product_name"), Some(&json!("Shirt")));
        assert_eq!(record.present("brand"), None);
        assert_eq!(record.get("brand"), Some(&json!("")));
        assert_eq!(record.present("price"), None);
        assert_eq!(record.present("missing"), None);
    }

    #[test]
    fn source_record_requires_object() {
        let err = SourceRecord::from_json(json!([1, 2])).unwrap_err();
        assert!(matches!(err, ModelError::NotAnObject { found: "array" }));
        let ok = SourceRecord::from_json(json!({"a": 1})).unwrap();
        assert_eq!(ok.len(), 1);
    }

    #[test]
    fn target_record_keeps_write_order() {
        let mut record = TargetRecord::new();
        record.push("상품명", FieldValue::from("Shirt"), provenance("product_name"));
        record.push("판매가", FieldValue::Integer(15000), provenance("price"));
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"상품명":"Shirt","판매가":15000}"#);
        assert_eq!(record.names().collect::<Vec<_>>(), vec!["상품명", "판매가"]);
    }

    #[test]
    fn target_record_push_replaces_existing() {
        let mut record = TargetRecord::new();
        record.push("a", FieldValue::from("1"), provenance("x"));
        record.push("a", FieldValue::from("2"), provenance("y"));
        assert_eq!(record.len(), 1);
        assert_eq!(record.get("a"), Some(&FieldValue::from("2")));
        assert_eq!(record.provenance("a").unwrap().source_field, "y");
    }
}
