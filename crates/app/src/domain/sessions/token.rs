//! Session token generation, formatting and parsing.

use std::{fmt, str::FromStr};

use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};
use zeroize::Zeroize;

use crate::domain::sessions::errors::SessionsServiceError;

/// Session token prefix.
pub const SESSION_TOKEN_PREFIX: &str = "ps";

/// Number of secret bytes encoded in a token.
pub const SESSION_TOKEN_BYTES: usize = 32;

const SESSION_TOKEN_HEX_CHARS: usize = SESSION_TOKEN_BYTES * 2;

const HEX: &[u8; 16] = b"0123456789abcdef";

/// SHA-256 digest a session is stored under.
pub type SessionKey = [u8; 32];

#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken {
    bytes: [u8; SESSION_TOKEN_BYTES],
}

impl SessionToken {
    /// Fresh token from the operating system's RNG.
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0_u8; SESSION_TOKEN_BYTES];

        OsRng.fill_bytes(&mut bytes);

        Self { bytes }
    }

    #[must_use]
    pub const fn from_bytes(bytes: [u8; SESSION_TOKEN_BYTES]) -> Self {
        Self { bytes }
    }

    /// Storage key for this token.
    #[must_use]
    pub fn key(&self) -> SessionKey {
        Sha256::digest(self.bytes).into()
    }

    /// Cookie value, `ps_` followed by the lowercase hex secret.
    #[must_use]
    pub fn encode(&self) -> String {
        let mut encoded =
            String::with_capacity(SESSION_TOKEN_PREFIX.len() + 1 + SESSION_TOKEN_HEX_CHARS);

        encoded.push_str(SESSION_TOKEN_PREFIX);
        encoded.push('_');

        for byte in self.bytes {
            for nibble in [byte >> 4, byte & 0x0f] {
                if let Some(digit) = HEX.get(usize::from(nibble)) {
                    encoded.push(char::from(*digit));
                }
            }
        }

        encoded
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(**redacted**)")
    }
}

impl Drop for SessionToken {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl FromStr for SessionToken {
    type Err = SessionsServiceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (prefix, secret_hex) = value
            .split_once('_')
            .ok_or(SessionsServiceError::MalformedToken)?;

        if prefix != SESSION_TOKEN_PREFIX || secret_hex.len() != SESSION_TOKEN_HEX_CHARS {
            return Err(SessionsServiceError::MalformedToken);
        }

        let mut bytes = [0_u8; SESSION_TOKEN_BYTES];

        for (byte, pair) in bytes.iter_mut().zip(secret_hex.as_bytes().chunks_exact(2)) {
            let [hi, lo] = pair else {
                return Err(SessionsServiceError::MalformedToken);
            };

            let hi = decode_hex_nibble(*hi).ok_or(SessionsServiceError::MalformedToken)?;
            let lo = decode_hex_nibble(*lo).ok_or(SessionsServiceError::MalformedToken)?;

            *byte = (hi << 4) | lo;
        }

        Ok(Self { bytes })
    }
}

fn decode_hex_nibble(value: u8) -> Option<u8> {
    match value {
        b'0'..=b'9' => Some(value - b'0'),
        b'a'..=b'f' => Some(value - b'a' + 10),
        b'A'..=b'F' => Some(value - b'A' + 10),
        _ => None,
    }
}
