use crate::error::CoreError;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// The text used on the wire (and in reports) for an unbounded return.
pub const INFINITE_ROI: &str = "Infinite";

/// Return on investment over the scenario's time horizon.
///
/// A scenario with no implementation cost has nothing to pay back, so its
/// return is reported as `Infinite` rather than as a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoiPercentage {
    Finite(Decimal),
    Infinite,
}

impl RoiPercentage {
    pub fn is_infinite(&self) -> bool {
        matches!(self, RoiPercentage::Infinite)
    }

    /// Returns the percentage, or `None` for the infinite sentinel.
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            RoiPercentage::Finite(value) => Some(*value),
            RoiPercentage::Infinite => None,
        }
    }
}

impl fmt::Display for RoiPercentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoiPercentage::Finite(value) => write!(f, "{:.2}%", value),
            RoiPercentage::Infinite => f.write_str(INFINITE_ROI),
        }
    }
}

impl FromStr for RoiPercentage {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case(INFINITE_ROI) {
            return Ok(RoiPercentage::Infinite);
        }
        Decimal::from_str(trimmed.trim_end_matches('%'))
            .map(RoiPercentage::Finite)
            .map_err(|e| CoreError::InvalidInput("roi_percentage".to_string(), e.to_string()))
    }
}

// Serialized as a plain number, or as the string "Infinite".
impl Serialize for RoiPercentage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RoiPercentage::Finite(value) => Serialize::serialize(value, serializer),
            RoiPercentage::Infinite => serializer.serialize_str(INFINITE_ROI),
        }
    }
}

impl<'de> Deserialize<'de> for RoiPercentage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(Decimal),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Number(value) => Ok(RoiPercentage::Finite(value)),
            Repr::Text(text) => text.parse().map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn infinite_serializes_as_sentinel_text() {
        let json = serde_json::to_string(&RoiPercentage::Infinite).unwrap();
        assert_eq!(json, "\"Infinite\"");
    }

    #[test]
    fn finite_serializes_as_number() {
        let json = serde_json::to_value(RoiPercentage::Finite(dec!(2355.2))).unwrap();
        assert!(json.is_number());
        assert_eq!(json.as_f64(), Some(2355.2));
    }

    #[test]
    fn deserializes_both_shapes() {
        let infinite: RoiPercentage = serde_json::from_str("\"Infinite\"").unwrap();
        assert_eq!(infinite, RoiPercentage::Infinite);

        let finite: RoiPercentage = serde_json::from_str("12.5").unwrap();
        assert_eq!(finite, RoiPercentage::Finite(dec!(12.5)));
    }

    #[test]
    fn display_formats_two_decimals_or_sentinel() {
        assert_eq!(RoiPercentage::Finite(dec!(2355.2)).to_string(), "2355.20%");
        assert_eq!(RoiPercentage::Infinite.to_string(), "Infinite");
    }

    #[test]
    fn rejects_unknown_text() {
        assert!("lots".parse::<RoiPercentage>().is_err());
    }
}
