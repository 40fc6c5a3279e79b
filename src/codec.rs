use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ShareError};

/// Decoded components of a share token
///
/// `payload` is kept in hex form; [`payload_bytes`] splits it into the
/// per-secret-byte y values. Decoding is pure: every call is independent
/// and has no side effects.
///
/// [`payload_bytes`]: ShareComponents::payload_bytes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareComponents {
    /// Share id, the x-coordinate in [1, 255]
    pub id: u8,
    /// Hex-encoded y values, two digits per secret byte
    pub payload: String,
}

impl ShareComponents {
    /// Splits the hex payload into bytes
    ///
    /// Tokens are expected to carry an even number of payload digits; that
    /// is not re-validated here, and a trailing lone digit decodes as its
    /// own value. Callers that need strict framing should check
    /// `payload.len()` is even.
    pub fn payload_bytes(&self) -> Vec<u8> {
        self.payload
            .as_bytes()
            .chunks(2)
            .map(|pair| {
                if pair.len() == 2 {
                    (hex_val(pair[0]) << 4) | hex_val(pair[1])
                } else {
                    hex_val(pair[0])
                }
            })
            .collect()
    }
}

// Input is pre-validated as ASCII hex by `decode`
#[inline]
fn hex_val(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'a'..=b'f' => digit - b'a' + 10,
        _ => digit - b'A' + 10,
    }
}

/// Encodes a share id and payload bytes into a token
///
/// The token is the two-digit zero-padded hex id followed by each payload
/// byte as two zero-padded hex digits, in secret-byte order. Output is
/// always lowercase.
///
/// # Example
/// ```
/// assert_eq!(hexshare::codec::encode(1, &[104, 105]), "016869");
/// ```
pub fn encode(id: u8, payload: &[u8]) -> String {
    let mut token = String::with_capacity(2 + payload.len() * 2);
    let _ = write!(token, "{id:02x}");
    for &byte in payload {
        let _ = write!(token, "{byte:02x}");
    }
    token
}

/// Decodes and validates a share token
///
/// The token must consist of two hex digits (the id) followed by one or
/// more hex digits (the payload); both cases are accepted.
///
/// # Errors
/// [`ShareError::InvalidShareFormat`] when the token does not match the
/// pattern, [`ShareError::InvalidShareId`] when the id is not in
/// [1, [`MAX_SHARES`]].
///
/// [`MAX_SHARES`]: crate::FieldTables::MAX_SHARES
pub fn decode(token: &str) -> Result<ShareComponents> {
    if token.len() < 3 || !token.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ShareError::InvalidShareFormat);
    }

    let id = u8::from_str_radix(&token[..2], 16).map_err(|_| ShareError::InvalidShareFormat)?;
    if id < 1 {
        return Err(ShareError::InvalidShareId(id));
    }

    Ok(ShareComponents {
        id,
        payload: token[2..].to_string(),
    })
}
