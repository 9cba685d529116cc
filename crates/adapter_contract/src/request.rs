//! Raw contract requests.
//!
//! A request is a mapping from field name to raw text. JSON bodies may
//! carry numbers or booleans; they are stringified on receipt so every
//! field reaches validation as text. Absent keys and `null` read as "".

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

/// Currency pair field.
pub const CURRENCY_PAIR: &str = "CURRENCY_PAIR";
/// Maturity field (date or tenor).
pub const MATURITY: &str = "MATURITY";
/// Strike field.
pub const STRIKE: &str = "STRIKE";
/// Notional field.
pub const NOTIONAL: &str = "NOTIONAL";
/// Exotic type field.
pub const EXOTIC_TYPE: &str = "EXOTIC_TYPE";
/// Exercise style field.
pub const EXERCISE: &str = "EXERCISE";
/// Option side field.
pub const TYPE: &str = "TYPE";
/// Spot field.
pub const SPOT: &str = "SPOT";
/// Volatility field.
pub const VOLATILITY: &str = "VOLATILITY";
/// Upper barrier field.
pub const UPPER_BARRIER: &str = "UPPER_BARRIER";
/// Lower barrier field.
pub const LOWER_BARRIER: &str = "LOWER_BARRIER";

/// Immutable field-name to raw-text mapping.
///
/// # Examples
/// ```
/// use adapter_contract::RawContractRequest;
///
/// let request: RawContractRequest = serde_json::from_str(
///     r#"{"STRIKE": 1.1, "TYPE": "CALL", "UPPER_BARRIER": null}"#,
/// ).unwrap();
/// assert_eq!(request.get("STRIKE"), "1.1");
/// assert_eq!(request.get("TYPE"), "CALL");
/// assert_eq!(request.get("UPPER_BARRIER"), "");
/// assert_eq!(request.get("MATURITY"), "");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "BTreeMap<String, Value>")]
pub struct RawContractRequest {
    fields: BTreeMap<String, String>,
}

impl RawContractRequest {
    /// Builds a request from name/value pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Returns a copy with `field` set to `value`.
    pub fn with(mut self, field: &str, value: impl Into<String>) -> Self {
        self.fields.insert(field.to_string(), value.into());
        self
    }

    /// Raw text of `field`, or "" when absent.
    pub fn get(&self, field: &str) -> &str {
        self.fields.get(field).map(String::as_str).unwrap_or("")
    }

    /// Iterates over the fields present.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl From<BTreeMap<String, Value>> for RawContractRequest {
    fn from(map: BTreeMap<String, Value>) -> Self {
        let fields = map
            .into_iter()
            .map(|(key, value)| {
                let text = match value {
                    Value::Null => String::new(),
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                (key, text)
            })
            .collect();
        Self { fields }
    }
}
