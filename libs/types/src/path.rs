//! Conversion route from native currency to the target asset
//!
//! A path is the ordered list of assets the exchange walks through. It always
//! starts at [`AssetId::NATIVE`] and ends at the token the agent delivers.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::PathError;
use crate::ids::AssetId;

/// Validated conversion path.
///
/// Invariants: length >= 2, first hop is native currency, last hop is a token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<AssetId>", into = "Vec<AssetId>")]
pub struct ConversionPath(Vec<AssetId>);

impl ConversionPath {
    pub fn new(hops: Vec<AssetId>) -> Result<Self, PathError> {
        if hops.len() < 2 {
            return Err(PathError::TooShort { length: hops.len() });
        }
        if !hops[0].is_native() {
            return Err(PathError::MustStartWithNative {
                first: hops[0].to_string(),
            });
        }
        if hops[hops.len() - 1].is_native() {
            return Err(PathError::NativeTarget);
        }
        Ok(Self(hops))
    }

    /// Direct route `NATIVE -> target`.
    pub fn direct(target: AssetId) -> Result<Self, PathError> {
        Self::new(vec![AssetId::NATIVE, target])
    }

    /// The asset delivered to the destination wallet.
    pub fn target(&self) -> AssetId {
        // Non-empty by construction.
        self.0[self.0.len() - 1]
    }

    pub fn hops(&self) -> &[AssetId] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<Vec<AssetId>> for ConversionPath {
    type Error = PathError;

    fn try_from(value: Vec<AssetId>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ConversionPath> for Vec<AssetId> {
    fn from(path: ConversionPath) -> Self {
        path.0
    }
}

impl fmt::Display for ConversionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hops: Vec<String> = self.0.iter().map(|hop| hop.to_string()).collect();
        write!(f, "{}", hops.join(" -> "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::Address;

    fn token(label: &str) -> AssetId {
        AssetId::from(Address::from_label(label))
    }

    #[test]
    fn test_path_valid() {
        let path = ConversionPath::new(vec![AssetId::NATIVE, token("relay"), token("IND")]).unwrap();
        assert_eq!(path.len(), 3);
        assert_eq!(path.target(), token("IND"));
        assert_eq!(path.hops()[0], AssetId::NATIVE);
    }

    #[test]
    fn test_path_too_short() {
        assert_eq!(
            ConversionPath::new(vec![AssetId::NATIVE]),
            Err(PathError::TooShort { length: 1 })
        );
        assert_eq!(
            ConversionPath::new(vec![]),
            Err(PathError::TooShort { length: 0 })
        );
    }

    #[test]
    fn test_path_must_start_with_native() {
        let result = ConversionPath::new(vec![token("relay"), token("IND")]);
        assert!(matches!(result, Err(PathError::MustStartWithNative { .. })));
    }

    #[test]
    fn test_path_target_cannot_be_native() {
        let result = ConversionPath::new(vec![AssetId::NATIVE, token("relay"), AssetId::NATIVE]);
        assert_eq!(result, Err(PathError::NativeTarget));
    }

    #[test]
    fn test_path_serialization() {
        let path = ConversionPath::direct(token("IND")).unwrap();
        let json = serde_json::to_string(&path).unwrap();
        let deserialized: ConversionPath = serde_json::from_str(&json).unwrap();
        assert_eq!(path, deserialized);
    }

    #[test]
    fn test_path_deserialization_validates() {
        let json = format!("[\"{}\"]", AssetId::NATIVE.as_address());
        assert!(serde_json::from_str::<ConversionPath>(&json).is_err());
    }
}
