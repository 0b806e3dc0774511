use super::party::{Party, PublicKey, hex_bytes};
use super::result::RaceResult;
use crate::error::Result;
use ed25519_dalek::{Signer, SigningKey, Verifier, VerifyingKey};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A party together with the private key it signs with.
pub struct SigningIdentity {
    party: Party,
    key: SigningKey,
}

impl SigningIdentity {
    /// Creates an identity with a freshly generated key.
    pub fn generate(name: impl Into<String>) -> Self {
        Self::from_seed(name, rand::random())
    }

    pub fn from_seed(name: impl Into<String>, seed: [u8; 32]) -> Self {
        let key = SigningKey::from_bytes(&seed);
        let party = Party::new(name, PublicKey(key.verifying_key().to_bytes()));
        Self { party, key }
    }

    pub fn party(&self) -> &Party {
        &self.party
    }

    pub fn sign(&self, record: &RaceResult) -> Result<Signature> {
        let message = record.canonical_bytes()?;
        Ok(Signature {
            signer: self.party.key,
            bytes: self.key.sign(&message).to_bytes(),
        })
    }
}

impl fmt::Debug for SigningIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningIdentity")
            .field("party", &self.party)
            .finish_non_exhaustive()
    }
}

/// An ed25519 signature over a record's canonical bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    pub signer: PublicKey,
    #[serde(with = "hex_bytes")]
    pub bytes: [u8; 64],
}

impl Signature {
    pub fn is_by(&self, party: &Party) -> bool {
        self.signer == party.key
    }

    /// Checks the signature against the record it claims to cover.
    pub fn verify(&self, record: &RaceResult) -> bool {
        let Ok(key) = VerifyingKey::from_bytes(&self.signer.0) else {
            return false;
        };
        let Ok(message) = record.canonical_bytes() else {
            return false;
        };
        let signature = ed25519_dalek::Signature::from_bytes(&self.bytes);
        key.verify(&message, &signature).is_ok()
    }
}
