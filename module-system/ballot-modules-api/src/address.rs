use core::fmt;
use core::str::FromStr;

use anyhow::ensure;
use borsh::{BorshDeserialize, BorshSerialize};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A caller identity: a raw 32-byte value rendered as hex. The module system
/// attaches no meaning to the bytes beyond uniqueness.
#[derive(Clone, Copy, PartialEq, Eq, Hash, BorshSerialize, BorshDeserialize)]
pub struct Address {
    addr: [u8; 32],
}

impl Address {
    /// Returns the raw bytes of the address.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.addr
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.addr
    }
}

impl From<[u8; 32]> for Address {
    fn from(addr: [u8; 32]) -> Self {
        Self { addr }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.addr))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl FromStr for Address {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let stripped = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(stripped)?;
        ensure!(bytes.len() == 32, "An address must be 32 bytes long");
        let mut addr = [0u8; 32];
        addr.copy_from_slice(&bytes);
        Ok(Self { addr })
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_string())
        } else {
            Serialize::serialize(&self.addr, serializer)
        }
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let s = <String as Deserialize>::deserialize(deserializer)?;
            Self::from_str(&s).map_err(D::Error::custom)
        } else {
            let addr = <[u8; 32] as Deserialize>::deserialize(deserializer)?;
            Ok(Self { addr })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_round_trips_through_display() {
        let address = Address::from([7; 32]);
        let parsed: Address = address.to_string().parse().unwrap();
        assert_eq!(address, parsed);
    }

    #[test]
    fn test_address_rejects_wrong_length() {
        assert!(Address::from_str("0xff00").is_err());
        assert!(Address::from_str("not hex at all").is_err());
    }

    #[test]
    fn test_address_json_round_trip() {
        let address = Address::from([3; 32]);
        let json = serde_json::to_string(&address).unwrap();
        assert_eq!(json, format!("\"{}\"", address));
        let parsed: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(address, parsed);
    }
}
