//! Field-level checks shared by the output parsers.

use crate::error::{Error, Result};
use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

const VERSION_FIELDS_MIN: usize = 2;
const VERSION_FIELDS_MAX: usize = 4;

/// Check if a string is an IPv4 or IPv6 address literal.
///
/// No name resolution takes place, `localhost` is rejected.
pub fn is_valid_address(addr: &str) -> bool {
    addr.parse::<IpAddr>().is_ok()
}

/// Pick one of two accepted words (case-insensitive).
///
/// Returns `true` for `val_true` and `false` for `val_false`. Anything else
/// is reported against the element `elem`.
pub fn choose_boolean(elem: &str, value: &str, val_true: &str, val_false: &str) -> Result<bool> {
    if value.eq_ignore_ascii_case(val_true) {
        return Ok(true);
    }

    if value.eq_ignore_ascii_case(val_false) {
        return Ok(false);
    }

    Err(Error::invalid(format!(
        "Unexpected parameter of the element <{elem}> (expected '{val_true}' or '{val_false}')"
    )))
}

/// Only printable characters as mentioned in RFC 5424, Section 6.
pub fn is_printable_ascii(s: &str) -> bool {
    s.chars().all(|ch| ('!'..='~').contains(&ch))
}

/// Dotted version string with two to four numeric fields.
///
/// Missing trailing fields are zero, so `"1.2"` and `"1.2.0.0"` compare equal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version([u32; VERSION_FIELDS_MAX]);

impl Version {
    pub fn new(major: u32, minor: u32, patch: u32, build: u32) -> Self {
        Version([major, minor, patch, build])
    }

    pub fn fields(&self) -> [u32; VERSION_FIELDS_MAX] {
        self.0
    }

    /// Packed form `0xMMmmpptt`, one byte per field (saturated at 255).
    pub fn to_numeric(&self) -> u32 {
        self.0.iter().fold(0u32, |acc, field| {
            let byte = u8::try_from(*field).unwrap_or(u8::MAX);
            (acc << 8) | u32::from(byte)
        })
    }
}

impl FromStr for Version {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_version(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.0;
        write!(f, "{a}.{b}.{c}.{d}")
    }
}

/// Parse a version string such as `"0.10.2"` or `"1.2.3.4"`.
///
/// Every field must be a plain non-negative decimal number. Fewer than two or
/// more than four fields, empty fields, signs, whitespace or any trailing
/// characters are a format error.
pub fn parse_version(s: &str) -> Result<Version> {
    let format_err = || Error::Format(format!("Invalid version string '{s}'"));

    let mut fields = [0u32; VERSION_FIELDS_MAX];
    let mut count = 0;
    for part in s.split('.') {
        let slot = fields.get_mut(count).ok_or_else(format_err)?;
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(format_err());
        }
        *slot = part.parse().map_err(|_| format_err())?;
        count += 1;
    }

    if count < VERSION_FIELDS_MIN {
        return Err(format_err());
    }

    Ok(Version(fields))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_address() {
        assert!(is_valid_address("127.0.0.1"));
        assert!(is_valid_address("::1"));
        assert!(is_valid_address("fe80::1:2"));
        assert!(!is_valid_address("999.999.999.999"));
        assert!(!is_valid_address("not-an-ip"));
        assert!(!is_valid_address("localhost"));
        assert!(!is_valid_address(""));
    }

    #[test]
    fn test_choose_boolean() {
        assert_eq!(choose_boolean("protocol", "UDP", "UDP", "TCP"), Ok(true));
        assert_eq!(choose_boolean("protocol", "tcp", "UDP", "TCP"), Ok(false));
        assert_eq!(
            choose_boolean("timestamp", "Formatted", "formatted", "unix"),
            Ok(true)
        );
    }

    #[test]
    fn test_choose_boolean_names_element() {
        let err = choose_boolean("tcpFlags", "hex", "formatted", "raw").err();
        assert_eq!(
            err,
            Some(Error::InvalidArgument(
                "Unexpected parameter of the element <tcpFlags> (expected 'formatted' or 'raw')"
                    .to_string()
            ))
        );
    }

    #[test]
    fn test_is_printable_ascii() {
        assert!(is_printable_ascii(""));
        assert!(is_printable_ascii("ipfixcol2"));
        assert!(is_printable_ascii("!~"));
        assert!(!is_printable_ascii("ipfix col"));
        assert!(!is_printable_ascii("ipfix\tcol"));
        assert!(!is_printable_ascii("ipfix\u{7f}"));
        assert!(!is_printable_ascii("název"));
    }

    #[test]
    fn test_parse_version_fills_missing_fields() {
        assert_eq!(parse_version("1.2"), Ok(Version::new(1, 2, 0, 0)));
        assert_eq!(parse_version("0.10.2"), Ok(Version::new(0, 10, 2, 0)));
        assert_eq!(parse_version("1.2.3.4"), Ok(Version::new(1, 2, 3, 4)));
    }

    #[test]
    fn test_parse_version_rejects_malformed() {
        for input in [
            "", "1", "1.2.3.4.5", "a.b", "1.", ".1", "1..2", "1.-2", "+1.2", "1.2 ", " 1.2",
            "1.2a", "99999999999.1",
        ] {
            assert!(
                matches!(parse_version(input), Err(Error::Format(_))),
                "'{input}' should be rejected"
            );
        }
    }

    #[test]
    fn test_version_from_str_and_display() {
        let version: Version = "2.3".parse().unwrap_or_default();
        assert_eq!(version.to_string(), "2.3.0.0");
        assert_eq!(version.fields(), [2, 3, 0, 0]);
    }

    #[test]
    fn test_version_numeric() {
        assert_eq!(Version::new(0, 10, 2, 0).to_numeric(), 0x000a_0200);
        assert_eq!(Version::new(1, 2, 3, 4).to_numeric(), 0x0102_0304);
        assert_eq!(Version::new(300, 0, 0, 0).to_numeric(), 0xff00_0000);
    }

    #[test]
    fn test_version_ordering() {
        assert!(Version::new(0, 9, 0, 0) < Version::new(0, 10, 0, 0));
        assert_eq!(parse_version("1.0"), parse_version("1.0.0.0"));
    }
}
