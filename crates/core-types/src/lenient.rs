//! Forgiving field deserializers for `ScenarioInput`.
//!
//! Form clients send numbers as JSON numbers, as numeric strings (`"0"`), or
//! as `""` for a cleared field. All of these must reach validation instead of
//! failing deserialization: a blank or unreadable value becomes `None`, which
//! validation then reports like any other missing field.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use std::str::FromStr;

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDecimal {
    Number(Decimal),
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCount {
    Integer(i64),
    Float(f64),
    Text(String),
}

pub(crate) fn decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<RawDecimal>::deserialize(deserializer)? {
        Some(RawDecimal::Number(value)) => Some(value),
        Some(RawDecimal::Text(text)) => parse_decimal(&text),
        None => None,
    })
}

/// Whole months. Integral floats (`36.0`) are accepted; fractions are not.
pub(crate) fn months<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<RawCount>::deserialize(deserializer)? {
        Some(RawCount::Integer(value)) => Some(value),
        Some(RawCount::Float(value)) => whole(value),
        Some(RawCount::Text(text)) => {
            let text = text.trim();
            text.parse::<i64>()
                .ok()
                .or_else(|| text.parse::<f64>().ok().and_then(whole))
        }
        None => None,
    })
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

fn whole(value: f64) -> Option<i64> {
    let in_range = value >= i64::MIN as f64 && value < i64::MAX as f64;
    (value.is_finite() && value.fract() == 0.0 && in_range).then(|| value as i64)
}
