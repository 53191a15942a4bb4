//! Serde adapters for admin weights.
//!
//! The API stores weights as floats (`25.0`) while the toolkit keeps them as
//! integer percentages. Fractional values round to the nearest integer.

use serde::{Deserialize, Deserializer};

use crate::limits::ADMIN_WEIGHT_MAX;

fn to_percent<E: serde::de::Error>(raw: f64) -> Result<u8, E> {
    if !(0.0..=f64::from(ADMIN_WEIGHT_MAX)).contains(&raw) {
        return Err(E::custom(format!(
            "weight must be between 0 and {ADMIN_WEIGHT_MAX}, got {raw}"
        )));
    }
    // In range after the check above.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    Ok(raw.round() as u8)
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    to_percent(f64::deserialize(deserializer)?)
}

pub fn deserialize_opt<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<u8>, D::Error> {
    Option::<f64>::deserialize(deserializer)?
        .map(to_percent)
        .transpose()
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Row {
        #[serde(deserialize_with = "super::deserialize")]
        weight: u8,
        #[serde(default, deserialize_with = "super::deserialize_opt")]
        optional: Option<u8>,
    }

    #[test]
    fn accepts_float_and_integer_weights() {
        let row: Row = serde_json::from_str(r#"{"weight": 25.0, "optional": 10}"#).unwrap();
        assert_eq!(row.weight, 25);
        assert_eq!(row.optional, Some(10));
        let row: Row = serde_json::from_str(r#"{"weight": 33.4}"#).unwrap();
        assert_eq!(row.weight, 33);
        assert_eq!(row.optional, None);
    }

    #[test]
    fn rejects_out_of_range_weight() {
        assert!(serde_json::from_str::<Row>(r#"{"weight": 150}"#).is_err());
        assert!(serde_json::from_str::<Row>(r#"{"weight": -1}"#).is_err());
    }
}
