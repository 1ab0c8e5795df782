//! Contributor identity and the stored record format.
//!
//! A contributor is stored as one hash field: the field key is the username
//! and the value is `name;bio`. Names can never contain `;`, so the first
//! separator always marks the end of the name and the bio keeps any
//! separators of its own.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Separator between name and bio in the stored value.
pub const FIELD_SEPARATOR: char = ';';

const USERNAME_MIN: usize = 3;
const USERNAME_MAX: usize = 20;
const NAME_MIN: usize = 3;
const NAME_MAX: usize = 30;

/// Unique contributor handle: 3–20 characters of `[A-Za-z0-9_]`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and wrap a username.
    pub fn parse(value: impl Into<String>) -> Result<Self, TypeError> {
        let value = value.into();
        let reject = |reason: String| TypeError::InvalidUsername {
            value: value.clone(),
            reason,
        };
        let len = value.chars().count();
        if !(USERNAME_MIN..=USERNAME_MAX).contains(&len) {
            return Err(reject(format!(
                "length must be between {USERNAME_MIN} and {USERNAME_MAX}, got {len}"
            )));
        }
        if let Some(ch) = value
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '_'))
        {
            return Err(reject(format!("contains forbidden character {ch:?}")));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Username {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Username> for String {
    fn from(username: Username) -> Self {
        username.0
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Username({})", self.0)
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Contributor display name: 3–30 characters of `[A-Za-z0-9 ]`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DisplayName(String);

impl DisplayName {
    /// Validate and wrap a display name.
    pub fn parse(value: impl Into<String>) -> Result<Self, TypeError> {
        let value = value.into();
        let reject = |reason: String| TypeError::InvalidName {
            value: value.clone(),
            reason,
        };
        let len = value.chars().count();
        if !(NAME_MIN..=NAME_MAX).contains(&len) {
            return Err(reject(format!(
                "length must be between {NAME_MIN} and {NAME_MAX}, got {len}"
            )));
        }
        if let Some(ch) = value
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == ' '))
        {
            return Err(reject(format!("contains forbidden character {ch:?}")));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for DisplayName {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<DisplayName> for String {
    fn from(name: DisplayName) -> Self {
        name.0
    }
}

impl fmt::Debug for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DisplayName({})", self.0)
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The per-username value held in the contributor hash.
///
/// `name` is kept as a plain string on the read side: values written by
/// other tools are decoded as-is rather than rejected.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributorRecord {
    pub name: String,
    pub bio: String,
}

impl ContributorRecord {
    /// Build a record from a validated name.
    pub fn new(name: DisplayName, bio: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bio: bio.into(),
        }
    }

    /// Encode as `name;bio`.
    pub fn encode(&self) -> String {
        let mut out = String::with_capacity(self.name.len() + 1 + self.bio.len());
        out.push_str(&self.name);
        out.push(FIELD_SEPARATOR);
        out.push_str(&self.bio);
        out
    }

    /// Decode a stored value, splitting at the first separator.
    ///
    /// A value without any separator is all name and an empty bio.
    pub fn decode(raw: &str) -> Self {
        match raw.split_once(FIELD_SEPARATOR) {
            Some((name, bio)) => Self {
                name: name.to_string(),
                bio: bio.to_string(),
            },
            None => Self {
                name: raw.to_string(),
                bio: String::new(),
            },
        }
    }
}

/// One directory entry as returned by listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    pub username: String,
    pub name: String,
    pub bio: String,
}

impl Contributor {
    pub fn from_record(username: impl Into<String>, record: ContributorRecord) -> Self {
        Self {
            username: username.into(),
            name: record.name,
            bio: record.bio,
        }
    }
}
