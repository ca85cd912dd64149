//! Cache keys and their derivation from IPv4 addresses.
//!
//! Every cache in this crate is indexed by a fixed-width [`CacheKey`]. Access
//! logs carry dotted-quad addresses, which [`parse_ipv4_key`] packs into the
//! low 32 bits of a key, first octet most significant:
//!
//! ```text
//!   "10.0.1.7"  ─►  0x0A_00_01_07  ─►  167_772_423
//! ```

use thiserror::Error;

/// Key type shared by every cache layer.
pub type CacheKey = u64;

/// Reasons a line cannot be turned into a [`CacheKey`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyParseError {
    #[error("empty address")]
    Empty,

    #[error("expected 4 octets, found {0}")]
    OctetCount(usize),

    #[error("octet {index} is not a number: {text:?}")]
    NotNumeric { index: usize, text: String },

    #[error("octet {index} out of range: {value}")]
    OutOfRange { index: usize, value: u64 },
}

/// Packs a dotted-quad IPv4 address into a [`CacheKey`].
///
/// Leading and trailing whitespace is ignored, as is anything after the
/// first whitespace-separated field, so raw log lines with extra columns can
/// be passed directly.
///
/// # Example
///
/// ```
/// use arcache::key::{parse_ipv4_key, KeyParseError};
///
/// assert_eq!(parse_ipv4_key("0.0.1.2"), Ok(258));
/// assert_eq!(parse_ipv4_key("255.255.255.255 GET /"), Ok(0xFFFF_FFFF));
/// assert_eq!(parse_ipv4_key("1.2.3"), Err(KeyParseError::OctetCount(3)));
/// ```
pub fn parse_ipv4_key(line: &str) -> Result<CacheKey, KeyParseError> {
    let addr = line.split_whitespace().next().ok_or(KeyParseError::Empty)?;

    let octets: Vec<&str> = addr.split('.').collect();
    if octets.len() != 4 {
        return Err(KeyParseError::OctetCount(octets.len()));
    }

    let mut key: CacheKey = 0;
    for (index, text) in octets.into_iter().enumerate() {
        let value: u64 = text.parse().map_err(|_| KeyParseError::NotNumeric {
            index,
            text: text.to_string(),
        })?;
        if value > 255 {
            return Err(KeyParseError::OutOfRange { index, value });
        }
        key = (key << 8) | value;
    }
    Ok(key)
}
