use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// An identifier that monday.com may send either as a JSON number or a string.
///
/// Board, item and column ids arrive as numbers in webhook events but as strings
/// in GraphQL responses. Both shapes are kept as received so they can be echoed
/// back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlexibleId {
    Int(i64),
    Text(String),
}

impl FlexibleId {
    /// Convert an arbitrary JSON value. Anything other than an integer or a
    /// string yields `None`.
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Number(n) => n.as_i64().map(Self::Int),
            serde_json::Value::String(s) => Some(Self::Text(s.clone())),
            _ => None,
        }
    }

    /// `0` and the empty string count as missing.
    pub fn is_present(&self) -> bool {
        match self {
            Self::Int(n) => *n != 0,
            Self::Text(s) => !s.is_empty(),
        }
    }

    /// Numeric form, parsing string ids. `None` when the text is not an integer.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for FlexibleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Serde helper: deserialize an optional id, mapping unsupported JSON types to `None`
/// instead of failing the surrounding record.
pub fn lenient_id<'de, D>(deserializer: D) -> Result<Option<FlexibleId>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(FlexibleId::from_value(&value))
}
