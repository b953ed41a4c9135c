#![cfg_attr(not(feature = "std"), no_std)]

//! # Authorship Fingerprint
//!
//! Content fingerprints for the authorship registry.
//!
//! A fingerprint is a SHA2-256 multihash of the exact bytes of a file:
//!
//! ```text
//! 0x12 (sha2-256) | 0x20 (32 byte digest) | digest[32]
//! ```
//!
//! The canonical text form is the base-58 (Bitcoin alphabet) encoding of those
//! 34 bytes, which is the familiar `Qm...` identifier used by content-addressed
//! stores. The registry keys claims by the 32-byte digest alone; the prefix is
//! constant and is checked whenever a full identifier is decoded.
//!
//! Everything here is pure and allocation-light, so it builds for the runtime
//! (`no_std`) as well as for off-chain tooling.

extern crate alloc;

use alloc::string::String;
use codec::{Decode, Encode, MaxEncodedLen};
use core::{fmt, str::FromStr};
use scale_info::TypeInfo;
use sha2::{Digest, Sha256};

/// Multihash code for SHA2-256.
pub const SHA2_256_CODE: u8 = 0x12;

/// Digest length in bytes for SHA2-256.
pub const SHA2_256_LEN: u8 = 0x20;

/// Length of the binary identifier: code, length and digest.
pub const IDENTIFIER_LEN: usize = 2 + SHA2_256_LEN as usize;

/// Key under which the registry stores a claim.
pub type StorageKey = [u8; 32];

/// Reasons an identifier cannot be decoded. All of them mean the input is not a
/// well-formed SHA2-256 multihash.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FingerprintError {
    /// The text contains a character outside the base-58 alphabet.
    #[error("invalid base-58 character {character:?} at index {index}")]
    InvalidCharacter { character: char, index: usize },
    /// The text is not valid base-58 for another reason (e.g. non-ASCII input).
    #[error("identifier is not valid base-58")]
    InvalidBase58,
    /// The decoded identifier has the wrong number of bytes.
    #[error("identifier decodes to {0} bytes, expected 34")]
    InvalidLength(usize),
    /// The multihash code is not SHA2-256.
    #[error("unsupported hash function code {0:#04x}, expected 0x12")]
    UnsupportedHashFunction(u8),
    /// The declared digest length does not match SHA2-256.
    #[error("declared digest length {0:#04x}, expected 0x20")]
    DigestLengthMismatch(u8),
}

impl From<bs58::decode::Error> for FingerprintError {
    fn from(err: bs58::decode::Error) -> Self {
        match err {
            bs58::decode::Error::InvalidCharacter { character, index } => {
                FingerprintError::InvalidCharacter { character, index }
            }
            _ => FingerprintError::InvalidBase58,
        }
    }
}

/// SHA2-256 content fingerprint.
///
/// Holds only the digest; the multihash prefix is re-attached by
/// [`Fingerprint::to_bytes`] and [`Fingerprint::to_text`]. SCALE encodes as the
/// raw 32-byte digest, so it can be used directly as a storage key.
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Encode, Decode, MaxEncodedLen, TypeInfo,
)]
pub struct Fingerprint(StorageKey);

impl Fingerprint {
    /// Fingerprint the exact bytes of a file. Empty input is valid.
    pub fn compute(content: &[u8]) -> Self {
        let digest = Sha256::digest(content);
        let mut key = [0u8; 32];
        key.copy_from_slice(&digest);
        Fingerprint(key)
    }

    /// Rebuild a fingerprint from a registry key.
    pub const fn from_storage_key(key: StorageKey) -> Self {
        Fingerprint(key)
    }

    /// The registry key: the digest with the constant prefix stripped.
    pub const fn storage_key(&self) -> StorageKey {
        self.0
    }

    /// Borrow the digest.
    pub fn digest(&self) -> &[u8; 32] {
        &self.0
    }

    /// The 34-byte binary identifier.
    pub fn to_bytes(&self) -> [u8; IDENTIFIER_LEN] {
        let mut out = [0u8; IDENTIFIER_LEN];
        out[0] = SHA2_256_CODE;
        out[1] = SHA2_256_LEN;
        out[2..].copy_from_slice(&self.0);
        out
    }

    /// Parse the 34-byte binary identifier, checking code and length.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, FingerprintError> {
        if bytes.len() != IDENTIFIER_LEN {
            return Err(FingerprintError::InvalidLength(bytes.len()));
        }
        if bytes[0] != SHA2_256_CODE {
            return Err(FingerprintError::UnsupportedHashFunction(bytes[0]));
        }
        if bytes[1] != SHA2_256_LEN {
            return Err(FingerprintError::DigestLengthMismatch(bytes[1]));
        }
        let mut key = [0u8; 32];
        key.copy_from_slice(&bytes[2..]);
        Ok(Fingerprint(key))
    }

    /// Accepts either the 34-byte multihash or a bare 32-byte registry key.
    pub fn from_identifier(bytes: &[u8]) -> Result<Self, FingerprintError> {
        match bytes.len() {
            32 => {
                let mut key = [0u8; 32];
                key.copy_from_slice(bytes);
                Ok(Fingerprint(key))
            }
            IDENTIFIER_LEN => Self::from_bytes(bytes),
            other => Err(FingerprintError::InvalidLength(other)),
        }
    }

    /// Canonical base-58 text form.
    pub fn to_text(&self) -> String {
        bs58::encode(self.to_bytes()).into_string()
    }

    /// Parse the canonical base-58 text form.
    pub fn from_text(text: &str) -> Result<Self, FingerprintError> {
        let bytes = bs58::decode(text).into_vec()?;
        Self::from_bytes(&bytes)
    }
}

/// Fingerprint the exact bytes of a file.
pub fn compute_fingerprint(content: &[u8]) -> Fingerprint {
    Fingerprint::compute(content)
}

/// Encode a fingerprint to its canonical text form.
pub fn encode_to_text(fingerprint: &Fingerprint) -> String {
    fingerprint.to_text()
}

/// Decode the canonical text form.
pub fn decode_from_text(text: &str) -> Result<Fingerprint, FingerprintError> {
    Fingerprint::from_text(text)
}

/// Registry key for a fingerprint.
pub fn to_storage_key(fingerprint: &Fingerprint) -> StorageKey {
    fingerprint.storage_key()
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({})", self.to_text())
    }
}

impl FromStr for Fingerprint {
    type Err = FingerprintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Fingerprint::from_text(s)
    }
}

impl From<StorageKey> for Fingerprint {
    fn from(key: StorageKey) -> Self {
        Fingerprint(key)
    }
}

impl From<Fingerprint> for StorageKey {
    fn from(fingerprint: Fingerprint) -> Self {
        fingerprint.0
    }
}

impl AsRef<[u8]> for Fingerprint {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
