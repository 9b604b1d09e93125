//! Passkeys scope a saved annotation collection.

use std::fmt;
use std::str::FromStr;

use annotkit_core::PasskeyError;
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Required passkey length.
pub const PASSKEY_LEN: usize = 12;

/// A validated 12-character alphanumeric access key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Passkey(String);

impl Passkey {
    /// Validates `value` against `[a-zA-Z0-9]{12}`.
    pub fn parse(value: &str) -> Result<Self, PasskeyError> {
        let actual = value.chars().count();
        if actual != PASSKEY_LEN {
            return Err(PasskeyError::InvalidLength {
                expected: PASSKEY_LEN,
                actual,
            });
        }
        if let Some((position, found)) = value
            .chars()
            .enumerate()
            .find(|(_, c)| !c.is_ascii_alphanumeric())
        {
            return Err(PasskeyError::InvalidCharacter { found, position });
        }
        Ok(Self(value.to_string()))
    }

    /// Generates a random passkey for a new collection.
    pub fn generate() -> Self {
        let key: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(PASSKEY_LEN)
            .map(char::from)
            .collect();
        Self(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Passkey {
    type Err = PasskeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Passkey {
    type Error = PasskeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Passkey> for String {
    fn from(key: Passkey) -> Self {
        key.0
    }
}

impl fmt::Display for Passkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
