use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single historical shipment document as the collection endpoint returns
/// it: a flat map of named JSON values.
///
/// Documents come from a store that enforces no schema, so fields may be
/// missing, null, or non-numeric; `numeric` is the only sanctioned way to
/// read a field for the pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(serde_json::Map<String, Value>);

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Typed field lookup: `Some` only when the field holds a finite number.
    pub fn numeric(&self, field: &str) -> Option<f64> {
        self.0.get(field)?.as_f64().filter(|v| v.is_finite())
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(field.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_reads_finite_numbers() {
        let record: Record = serde_json::from_str(r#"{"Height": 17, "Width": 6.5}"#).unwrap();

        assert_eq!(record.numeric("Height"), Some(17.0));
        assert_eq!(record.numeric("Width"), Some(6.5));
    }

    #[test]
    fn numeric_rejects_null_missing_and_non_numeric() {
        let record: Record =
            serde_json::from_str(r#"{"Weight": null, "Cost": "500", "_id": "abc"}"#).unwrap();

        assert_eq!(record.numeric("Weight"), None);
        assert_eq!(record.numeric("Cost"), None);
        assert_eq!(record.numeric("Height"), None);
    }

    #[test]
    fn deserializes_from_array_payload() {
        let records: Vec<Record> =
            serde_json::from_str(r#"[{"Height": 1}, {"Height": 2}]"#).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].numeric("Height"), Some(2.0));
    }
}
