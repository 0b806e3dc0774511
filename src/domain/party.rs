use serde::{Deserialize, Serialize};
use std::fmt;

/// An ed25519 public key identifying a party on the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PublicKey(#[serde(with = "hex_bytes")] pub [u8; 32]);

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

/// A participant in an agreement.
///
/// The legal name follows the X.500 style used by the ledger network
/// (`O=PartyA,L=London,C=GB`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Party {
    pub name: String,
    pub key: PublicKey,
}

impl Party {
    pub fn new(name: impl Into<String>, key: PublicKey) -> Self {
        Self {
            name: name.into(),
            key,
        }
    }

    /// The organisation component of the legal name.
    pub fn organisation(&self) -> &str {
        organisation_of(&self.name)
    }

    /// Two parties are the same entity if either their names or keys match.
    pub fn is_same_entity(&self, other: &Party) -> bool {
        self.name.trim() == other.name.trim() || self.key == other.key
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Returns the value of the `O=` component, or the whole name when there is none.
pub fn organisation_of(name: &str) -> &str {
    name.split(',')
        .map(str::trim)
        .find_map(|component| component.strip_prefix("O="))
        .map(str::trim)
        .unwrap_or_else(|| name.trim())
}

/// Fixed-size byte arrays as lowercase hex strings.
pub(crate) mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S, const N: usize>(bytes: &[u8; N], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D, const N: usize>(deserializer: D) -> Result<[u8; N], D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded = String::deserialize(deserializer)?;
        let mut bytes = [0u8; N];
        hex::decode_to_slice(&encoded, &mut bytes).map_err(serde::de::Error::custom)?;
        Ok(bytes)
    }
}
