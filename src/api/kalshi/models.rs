use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Envelope returned by `GET /markets/{ticker}`
#[derive(Debug, Clone, Deserialize)]
pub struct KalshiMarketResponse {
    #[serde(default)]
    pub market: Option<KalshiMarket>,
}

/// A `yes_sub_title` / `no_sub_title` field as sent by Kalshi.
///
/// An absent key and an explicit null are priced differently, so they stay
/// distinct.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum PriceLabel {
    #[default]
    Missing,
    Null,
    Text(String),
}

/// Subset of a Kalshi market used for snapshots.
///
/// Kalshi is inconsistent about number encoding, so numeric fields accept
/// numbers, numeric strings or null and fall back to `0.0`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KalshiMarket {
    #[serde(default)]
    pub ticker: String,
    #[serde(default, deserialize_with = "price_label")]
    pub yes_sub_title: PriceLabel,
    #[serde(default, deserialize_with = "price_label")]
    pub no_sub_title: PriceLabel,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub volume: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub volume_24h: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub liquidity: f64,
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    })
}

// Only called when the key is present; `#[serde(default)]` covers absence.
fn price_label<'de, D>(deserializer: D) -> Result<PriceLabel, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => PriceLabel::Text(s),
        Value::Number(n) => PriceLabel::Text(n.to_string()),
        _ => PriceLabel::Null,
    })
}
