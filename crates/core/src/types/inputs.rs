//! Component input and output records.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One key/value record from the hosting input list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputRecord {
    /// Input key.
    pub key: String,
    /// Input value.
    pub value: Value,
}

/// Resolved input set for one component run.
///
/// Built once from the key/value records at the boundary; later lookups are
/// plain map reads.
#[derive(Debug, Clone, Default)]
pub struct ComponentInputs {
    values: BTreeMap<String, Value>,
}

impl ComponentInputs {
    /// Build the input map from a list of key/value records.
    ///
    /// Later records win on duplicate keys.
    pub fn from_records(records: Vec<InputRecord>) -> Self {
        let mut values = BTreeMap::new();
        for record in records {
            values.insert(record.key, record.value);
        }
        Self { values }
    }

    /// Insert or replace a single value.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Required text input.
    pub fn text(&self, key: &str) -> Result<&str> {
        self.values
            .get(key)
            .and_then(Value::as_str)
            .ok_or_else(|| Error::missing_input(format!("'{}' (text)", key)))
    }

    /// Optional text input.
    pub fn text_opt(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    /// Required JSON input.
    pub fn json(&self, key: &str) -> Result<&Value> {
        self.values
            .get(key)
            .ok_or_else(|| Error::missing_input(format!("'{}' (json)", key)))
    }

    /// Optional JSON input.
    pub fn json_opt(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Decode a required JSON input into a concrete type.
    pub fn decode<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let value = self.json(key)?;
        Ok(serde_json::from_value(value.clone())?)
    }
}

/// Descriptor of a registered component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentDescriptor {
    /// Unique component name.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Names of the inputs the component consumes.
    pub input_keys: Vec<String>,
}

/// Output of a component run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentOutput {
    /// Whether the run succeeded.
    pub success: bool,

    /// Short human-readable summary.
    pub summary: String,

    /// Structured result payload.
    pub data: Option<Value>,

    /// Names of artifacts written during the run.
    pub artifacts: Vec<String>,
}

impl ComponentOutput {
    /// Successful run with a JSON payload.
    pub fn json(summary: impl Into<String>, data: Value) -> Self {
        Self {
            success: true,
            summary: summary.into(),
            data: Some(data),
            artifacts: Vec::new(),
        }
    }

    /// Attach the name of a written artifact.
    pub fn with_artifact(mut self, name: impl Into<String>) -> Self {
        self.artifacts.push(name.into());
        self
    }

    /// Failed run.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            summary: message.into(),
            data: None,
            artifacts: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(key: &str, value: Value) -> InputRecord {
        InputRecord {
            key: key.to_string(),
            value,
        }
    }

    #[test]
    fn test_later_records_win() {
        let inputs = ComponentInputs::from_records(vec![
            record("data", json!("first.csv")),
            record("data", json!("second.csv")),
        ]);
        assert_eq!(inputs.text("data").unwrap(), "second.csv");
    }

    #[test]
    fn test_missing_text_input() {
        let inputs = ComponentInputs::default();
        assert!(matches!(
            inputs.text("context"),
            Err(Error::MissingInput(_))
        ));
        assert!(inputs.text_opt("context").is_none());
    }

    #[test]
    fn test_decode_json_input() {
        let inputs =
            ComponentInputs::default().set("graph", json!({"nodes": [], "links": []}));
        let value: Value = inputs.decode("graph").unwrap();
        assert!(value["nodes"].as_array().unwrap().is_empty());
    }
}
