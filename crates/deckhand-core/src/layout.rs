//! Key placement and render target value objects.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::DomainError;

/// Position of a key on the device grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Coordinates {
    #[serde(default)]
    pub column: i64,
    #[serde(default)]
    pub row: i64,
}

impl Coordinates {
    pub const fn new(column: i64, row: i64) -> Self {
        Self { column, row }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

/// Where a visual update (title, image) is applied.
///
/// Serialized as its integer discriminant, as the host expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Target {
    /// Both the physical key and the software preview
    #[default]
    HardwareAndSoftware = 0,

    /// Only the physical key
    HardwareOnly = 1,

    /// Only the software preview
    SoftwareOnly = 2,
}

impl Target {
    /// Returns the wire value.
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Target {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::HardwareAndSoftware),
            1 => Ok(Self::HardwareOnly),
            2 => Ok(Self::SoftwareOnly),
            other => Err(DomainError::InvalidFieldValue {
                field: "target".to_string(),
                value: other.to_string(),
                expected: "0, 1 or 2".to_string(),
            }),
        }
    }
}

impl Serialize for Target {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_u8())
    }
}

impl<'de> Deserialize<'de> for Target {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = u8::deserialize(deserializer)?;
        Target::try_from(raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_serializes_as_integer() {
        assert_eq!(serde_json::to_string(&Target::HardwareAndSoftware).unwrap(), "0");
        assert_eq!(serde_json::to_string(&Target::HardwareOnly).unwrap(), "1");
        assert_eq!(serde_json::to_string(&Target::SoftwareOnly).unwrap(), "2");
    }

    #[test]
    fn test_target_rejects_out_of_range() {
        assert!(serde_json::from_str::<Target>("3").is_err());
        assert_eq!(serde_json::from_str::<Target>("2").unwrap(), Target::SoftwareOnly);
    }

    #[test]
    fn test_coordinates_missing_fields_default_to_zero() {
        let coords: Coordinates = serde_json::from_str(r#"{"column": 3}"#).unwrap();
        assert_eq!(coords, Coordinates::new(3, 0));
    }
}
