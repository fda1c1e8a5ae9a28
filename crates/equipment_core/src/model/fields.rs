//! Validated field value types for equipment records.
//!
//! # Responsibility
//! - Enforce per-field format constraints at construction time.
//! - Keep serde decoding on the same validation path as in-code construction.
//!
//! # Invariants
//! - A value of any type in this module always satisfies its format.
//! - Values are compared by their exact text (no case folding).

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[[:alnum:]][[:alnum:] ]*$").expect("valid name regex"));
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{3,}$").expect("valid phone regex"));
static DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<day>[0-9]{2})-(?P<month>[0-9]{2})-(?P<year>[0-9]{4})$")
        .expect("valid date regex")
});
static ADDRESS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s].*$").expect("valid address regex"));
static SERIAL_NUMBER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[[:alnum:]][[:alnum:]\-]*$").expect("valid serial number regex")
});
static TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[[:alnum:]]+$").expect("valid tag regex"));

/// Field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EquipmentValidationError {
    InvalidName(String),
    InvalidPhone(String),
    InvalidDate(String),
    InvalidAddress(String),
    InvalidSerialNumber(String),
    InvalidTag(String),
}

impl Display for EquipmentValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName(value) => write!(
                f,
                "invalid name `{value}`: names contain only alphanumeric characters and spaces, and must not be blank"
            ),
            Self::InvalidPhone(value) => write!(
                f,
                "invalid phone `{value}`: phone numbers contain only digits and are at least 3 digits long"
            ),
            Self::InvalidDate(value) => write!(
                f,
                "invalid date `{value}`: dates use the dd-mm-yyyy format"
            ),
            Self::InvalidAddress(value) => write!(
                f,
                "invalid address `{value}`: addresses must not be blank or start with whitespace"
            ),
            Self::InvalidSerialNumber(value) => write!(
                f,
                "invalid serial number `{value}`: serial numbers contain only alphanumeric characters and `-`"
            ),
            Self::InvalidTag(value) => write!(
                f,
                "invalid tag `{value}`: tags contain only alphanumeric characters"
            ),
        }
    }
}

impl Error for EquipmentValidationError {}

// Declares a string-backed value type whose constructor runs `$check`.
macro_rules! validated_string {
    ($(#[$meta:meta])* $name:ident, $check:path, $error:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Returns the validated text.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = EquipmentValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                if $check(&value) {
                    Ok(Self(value))
                } else {
                    Err(EquipmentValidationError::$error(value))
                }
            }
        }

        impl FromStr for $name {
            type Err = EquipmentValidationError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                Self::try_from(value.to_string())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

validated_string!(
    /// Display name of a piece of equipment.
    Name,
    is_valid_name,
    InvalidName
);
validated_string!(
    /// Contact phone number for the equipment site.
    Phone,
    is_valid_phone,
    InvalidPhone
);
validated_string!(
    /// Next maintenance date in `dd-mm-yyyy` form.
    Date,
    is_valid_date,
    InvalidDate
);
validated_string!(
    /// Free-form site address.
    Address,
    is_valid_address,
    InvalidAddress
);
validated_string!(
    /// Identity key of an equipment record.
    SerialNumber,
    is_valid_serial_number,
    InvalidSerialNumber
);
validated_string!(
    /// Label attached to equipment records.
    Tag,
    is_valid_tag,
    InvalidTag
);

pub fn is_valid_name(value: &str) -> bool {
    NAME_RE.is_match(value)
}

pub fn is_valid_phone(value: &str) -> bool {
    PHONE_RE.is_match(value)
}

/// Checks the `dd-mm-yyyy` shape and the day/month ranges.
///
/// Day-of-month is not checked against the month length.
pub fn is_valid_date(value: &str) -> bool {
    let Some(caps) = DATE_RE.captures(value) else {
        return false;
    };
    let day = caps["day"].parse::<u32>().unwrap_or(0);
    let month = caps["month"].parse::<u32>().unwrap_or(0);
    (1..=31).contains(&day) && (1..=12).contains(&month)
}

pub fn is_valid_address(value: &str) -> bool {
    ADDRESS_RE.is_match(value)
}

pub fn is_valid_serial_number(value: &str) -> bool {
    SERIAL_NUMBER_RE.is_match(value)
}

pub fn is_valid_tag(value: &str) -> bool {
    TAG_RE.is_match(value)
}
