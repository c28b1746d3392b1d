//! Identifier types for accounts, assets and registry services
//!
//! Addresses are 20-byte account identifiers rendered as `0x`-prefixed
//! lowercase hex. Deterministic addresses are derived with SHA-256 so that
//! deployments and test fixtures are reproducible across runs.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

use crate::errors::AddressError;

/// Account or contract address on the ledger
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address([u8; 20]);

impl Address {
    /// The null address. Never a valid destination.
    pub const ZERO: Address = Address([0u8; 20]);

    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Derive a stable address from a human-readable label.
    ///
    /// Used for well-known accounts (owners, wallets) in fixtures.
    pub fn from_label(label: &str) -> Self {
        Self::hashed(&[b"label:", label.as_bytes()])
    }

    /// Derive the address of the `nonce`-th contract created by `creator`.
    pub fn derive(creator: &Address, nonce: u64) -> Self {
        Self::hashed(&[b"create:", &creator.0, &nonce.to_be_bytes()])
    }

    fn hashed(parts: &[&[u8]]) -> Self {
        let mut hasher = Sha256::new();
        for part in parts {
            hasher.update(part);
        }
        let digest = hasher.finalize();
        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(&digest[12..]);
        Self(bytes)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self)
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("0x").ok_or_else(|| AddressError::MissingPrefix {
            input: s.to_string(),
        })?;
        let raw = hex::decode(digits).map_err(|_| AddressError::InvalidHex {
            input: s.to_string(),
        })?;
        let bytes: [u8; 20] = raw
            .as_slice()
            .try_into()
            .map_err(|_| AddressError::InvalidLength { length: raw.len() })?;
        Ok(Self(bytes))
    }
}

impl TryFrom<String> for Address {
    type Error = AddressError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.to_string()
    }
}

/// Fungible asset identifier
///
/// Token assets are identified by their contract address. Native currency
/// has no contract and uses the [`AssetId::NATIVE`] pseudo-identifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(Address);

impl AssetId {
    /// Pseudo-identifier for native currency (`0xeeee…eeee`).
    pub const NATIVE: AssetId = AssetId(Address::from_bytes([0xee; 20]));

    pub const fn from_address(address: Address) -> Self {
        Self(address)
    }

    pub fn as_address(&self) -> &Address {
        &self.0
    }

    pub fn is_native(&self) -> bool {
        *self == Self::NATIVE
    }
}

impl From<Address> for AssetId {
    fn from(address: Address) -> Self {
        Self(address)
    }
}

impl FromStr for AssetId {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_native() {
            write!(f, "NATIVE")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl fmt::Debug for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AssetId({})", self)
    }
}

/// Registry key naming an external service
///
/// A 32-byte right-padded ASCII name, e.g. `"BancorNetwork"` followed by
/// zero bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ServiceId([u8; 32]);

impl ServiceId {
    /// Build an identifier from a name. Names longer than 32 bytes are truncated.
    pub const fn from_name(name: &str) -> Self {
        let bytes = name.as_bytes();
        let mut out = [0u8; 32];
        let mut i = 0;
        while i < bytes.len() && i < 32 {
            out[i] = bytes[i];
            i += 1;
        }
        Self(out)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// The name with trailing padding removed.
    pub fn name(&self) -> String {
        let end = self.0.iter().rposition(|b| *b != 0).map_or(0, |i| i + 1);
        String::from_utf8_lossy(&self.0[..end]).into_owned()
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl fmt::Debug for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ServiceId(0x{})", hex::encode(self.0))
    }
}
