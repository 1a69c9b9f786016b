//! User roles for role-based access control.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// Role carried in a token's `role` claim.
///
/// Parsing is case-insensitive and happens in exactly one place so every
/// service normalizes role strings identically; serialization always emits
/// the lowercase canonical form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Role {
    /// Full access; the admin principal has no backing database row.
    Admin,
    /// A patient account.
    Patient,
    /// A radiologist account.
    Radiologist,
    /// A doctor account.
    Doctor,
    /// A cashier account.
    Cashier,
}

impl Role {
    /// Returns the canonical lowercase name of the role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Patient => "patient",
            Self::Radiologist => "radiologist",
            Self::Doctor => "doctor",
            Self::Cashier => "cashier",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "patient" => Ok(Self::Patient),
            "radiologist" => Ok(Self::Radiologist),
            "doctor" => Ok(Self::Doctor),
            "cashier" => Ok(Self::Cashier),
            _ => Err(AuthError::InvalidToken),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = AuthError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
