//! Amounts are held as integer cents and travel as decimal dollars
//! (`120`, `59.99`), which is what the storefront frontend reads.

use serde::de::Error;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Largest dollar amount that still converts to cents without losing precision.
const MAX_DOLLARS: f64 = 1e13;

pub fn cents_from_dollars(dollars: f64) -> Option<i64> {
    if !dollars.is_finite() || dollars.abs() > MAX_DOLLARS {
        return None;
    }
    Some((dollars * 100.0).round() as i64)
}

struct Dollars(i64);

impl Serialize for Dollars {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0 % 100 == 0 {
            serializer.serialize_i64(self.0 / 100)
        } else {
            serializer.serialize_f64(self.0 as f64 / 100.0)
        }
    }
}

/// `#[serde(with = "...")]` for an `i64` cents field.
pub mod dollars {
    use super::*;

    pub fn serialize<S: Serializer>(cents: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        Dollars(*cents).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        let value = f64::deserialize(deserializer)?;
        cents_from_dollars(value)
            .ok_or_else(|| <D::Error as Error>::custom(format!("amount {value} out of range")))
    }
}

/// Same as [`dollars`] for optional fields; pair with `#[serde(default)]`.
pub mod dollars_opt {
    use super::*;

    pub fn serialize<S: Serializer>(
        cents: &Option<i64>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        cents.map(Dollars).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<i64>, D::Error> {
        match Option::<f64>::deserialize(deserializer)? {
            Some(value) => cents_from_dollars(value)
                .map(Some)
                .ok_or_else(|| <D::Error as Error>::custom(format!("amount {value} out of range"))),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Priced {
        #[serde(with = "dollars")]
        price: i64,
        #[serde(default, with = "dollars_opt", skip_serializing_if = "Option::is_none")]
        discount: Option<i64>,
    }

    #[test]
    fn whole_and_fractional_dollars() {
        let whole: Priced = serde_json::from_str(r#"{"price":120}"#).unwrap();
        assert_eq!(whole.price, 12000);
        assert_eq!(whole.discount, None);

        let cents: Priced = serde_json::from_str(r#"{"price":59.99,"discount":0.1}"#).unwrap();
        assert_eq!(cents.price, 5999);
        assert_eq!(cents.discount, Some(10));

        assert_eq!(serde_json::to_string(&whole).unwrap(), r#"{"price":120}"#);
        assert_eq!(
            serde_json::to_string(&cents).unwrap(),
            r#"{"price":59.99,"discount":0.1}"#
        );
    }

    #[test]
    fn rejects_non_numbers_and_huge_amounts() {
        assert!(serde_json::from_str::<Priced>(r#"{"price":"12"}"#).is_err());
        assert!(serde_json::from_str::<Priced>(r#"{"price":1e300}"#).is_err());
        assert_eq!(cents_from_dollars(f64::NAN), None);
    }
}
