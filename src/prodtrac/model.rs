//! Core data types exchanged with the remote product store.
//!
//! [`Product`] is what the server hands back. It is decoded leniently: records
//! with missing text fields or malformed numbers still load, with the gaps made
//! explicit (`String::new()` for text, `None` for numbers) so the view layer can
//! order them deterministically. The id is the one field a record cannot do
//! without: it is accepted as an integer or an integer string, and anything
//! else fails that record.
//!
//! [`ProductPayload`] is what the client sends. It is only ever built from a
//! validated form draft, so every field is present and well-typed.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(deserialize_with = "lenient_id")]
    pub id: i64,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_integer")]
    pub quantity: Option<i64>,
}

impl Product {
    pub fn new(
        id: i64,
        name: impl Into<String>,
        description: impl Into<String>,
        price: f64,
        quantity: i64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            price: Some(price),
            quantity: Some(quantity),
        }
    }

    /// Price as shown in listings: two decimals, absent prices read as zero.
    pub fn price_display(&self) -> String {
        format!("${:.2}", self.price.unwrap_or(0.0))
    }
}

impl From<&ProductPayload> for Product {
    fn from(payload: &ProductPayload) -> Self {
        Self {
            id: payload.id,
            name: payload.name.clone(),
            description: payload.description.clone(),
            price: Some(payload.price),
            quantity: i64::try_from(payload.quantity).ok(),
        }
    }
}

/// Request body for create and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPayload {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub quantity: u64,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub service: String,
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    })
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_number(&value))
}

fn lenient_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    coerce_integer(&value)
        .ok_or_else(|| serde::de::Error::custom(format!("unreadable product id: {}", value)))
}

fn lenient_integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_integer(&value))
}

fn coerce_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.is_finite())
                .filter(|f| *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}
