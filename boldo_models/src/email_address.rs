use std::{str::FromStr, sync::LazyLock};

use nutype::nutype;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Shape of an address accepted from the contact form:
/// `local-part@domain.tld`, no whitespace and exactly one `@`.
pub static EMAIL_ADDRESS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

#[nutype(
    sanitize(trim),
    validate(regex = EMAIL_ADDRESS_REGEX),
    derive(Debug, Clone, PartialEq, Eq, Hash, TryFrom, FromStr, Deref, Display, Serialize, Deserialize)
)]
pub struct EmailAddress(String);

/// Mailbox with an optional display name, e.g. `Boldo <hello@boldo.example>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailAddressWithName(pub lettre::message::Mailbox);

impl EmailAddressWithName {
    pub fn email(&self) -> &str {
        self.0.email.as_ref()
    }
}

impl std::fmt::Display for EmailAddressWithName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for EmailAddressWithName {
    type Err = <lettre::message::Mailbox as FromStr>::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}
