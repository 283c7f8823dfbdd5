//! Catalog identifiers
//!
//! Identifiers travel through JSON documents, where an integer id may come back
//! as a float (`2.0`). Every id is normalized to a single integral
//! representation when it is decoded, so comparisons never see the difference.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::domain::error::INVALID_ID;
use crate::domain::storage::StorageKey;
use crate::domain::DomainError;

/// Largest float that still maps onto an `i64` without loss of integrality
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

/// Identifier of a trained model or behaviour, scoped per entity kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CatalogId(i64);

impl CatalogId {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Parse a caller-supplied identifier as a base-10 integer
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        raw.parse::<i64>()
            .map(Self)
            .map_err(|_| DomainError::invalid_argument(INVALID_ID))
    }

    /// Normalize a float that crossed a JSON boundary, if it is integral
    pub fn from_f64(value: f64) -> Option<Self> {
        if value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_EXACT_FLOAT {
            Some(Self(value as i64))
        } else {
            None
        }
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl FromStr for CatalogId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<i64> for CatalogId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for CatalogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for CatalogId {}

impl Serialize for CatalogId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.0)
    }
}

struct CatalogIdVisitor;

impl Visitor<'_> for CatalogIdVisitor {
    type Value = CatalogId;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integral number")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(CatalogId(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        i64::try_from(v)
            .map(CatalogId)
            .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &self))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        CatalogId::from_f64(v).ok_or_else(|| E::invalid_value(de::Unexpected::Float(v), &self))
    }
}

impl<'de> Deserialize<'de> for CatalogId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(CatalogIdVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_base10() {
        assert_eq!(CatalogId::parse("2").unwrap(), CatalogId::new(2));
        assert_eq!(CatalogId::parse("+2").unwrap(), CatalogId::new(2));
        assert_eq!(CatalogId::parse("-7").unwrap(), CatalogId::new(-7));
        assert_eq!(CatalogId::parse("0042").unwrap(), CatalogId::new(42));
    }

    #[test]
    fn test_parse_rejects_non_integers() {
        for raw in ["abc", "", " 1", "1 ", "1.0", "0x1", "1e3", "99999999999999999999"] {
            let err = CatalogId::parse(raw).unwrap_err();
            assert!(
                matches!(err, DomainError::InvalidArgument { .. }),
                "expected invalid argument for {raw:?}"
            );
            assert_eq!(err.message(), "Invalid ID");
        }
    }

    #[test]
    fn test_deserialize_integer_and_integral_float() {
        let from_int: CatalogId = serde_json::from_str("2").unwrap();
        let from_float: CatalogId = serde_json::from_str("2.0").unwrap();

        assert_eq!(from_int, from_float);
        assert_eq!(from_float, CatalogId::parse("2").unwrap());
    }

    #[test]
    fn test_deserialize_rejects_fractional_and_strings() {
        assert!(serde_json::from_str::<CatalogId>("2.5").is_err());
        assert!(serde_json::from_str::<CatalogId>("\"2\"").is_err());
        assert!(serde_json::from_str::<CatalogId>("null").is_err());
        assert!(serde_json::from_str::<CatalogId>("18446744073709551615").is_err());
    }

    #[test]
    fn test_serializes_as_integer() {
        let json = serde_json::to_string(&CatalogId::new(5)).unwrap();
        assert_eq!(json, "5");
    }

    #[test]
    fn test_from_f64_bounds() {
        assert_eq!(CatalogId::from_f64(-3.0), Some(CatalogId::new(-3)));
        assert_eq!(CatalogId::from_f64(f64::NAN), None);
        assert_eq!(CatalogId::from_f64(f64::INFINITY), None);
        assert_eq!(CatalogId::from_f64(1e300), None);
    }
}
