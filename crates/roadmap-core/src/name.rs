//! City name validation.
//!
//! A city name is a non-empty byte string containing no byte in
//! `0x01..=0x1F` and no `;`. Two names are equal iff byte-equal — validation
//! operates on raw bytes, not `str`, so no UTF-8 requirement leaks into the
//! rest of the crate.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NameError {
    #[error("city name must not be empty")]
    Empty,

    #[error("city name contains a disallowed control byte 0x{0:02X}")]
    ControlByte(u8),

    #[error("city name contains ';'")]
    Semicolon,
}

/// Validate a candidate city name against the allowed alphabet.
pub fn validate_name(name: &[u8]) -> Result<(), NameError> {
    if name.is_empty() {
        return Err(NameError::Empty);
    }
    for &b in name {
        if b == b';' {
            return Err(NameError::Semicolon);
        }
        if (0x01..=0x1F).contains(&b) {
            return Err(NameError::ControlByte(b));
        }
    }
    Ok(())
}
