use serde::Serialize;

/// Audit trail for one output field: where it came from and which rule made it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldProvenance {
    /// Key read from the source record.
    pub source_field: String,
    /// Transformer that produced the value.
    pub transformer: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validator: Option<&'static str>,
    /// The mapping's default value was used because the source was absent or empty.
    pub defaulted: bool,
}
