//! Opaque page cursors.
//!
//! A cursor is the standard base64 encoding of the decimal, zero-based
//! position of a row in the fixed `(input_index, output_index)` order.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::window::PageError;

pub fn encode_cursor(position: u64) -> String {
    STANDARD.encode(position.to_string())
}

pub fn decode_cursor(cursor: &str) -> Result<u64, PageError> {
    let invalid = || PageError::InvalidCursor(cursor.to_string());
    let bytes = STANDARD.decode(cursor.trim()).map_err(|_| invalid())?;
    let text = std::str::from_utf8(&bytes).map_err(|_| invalid())?;
    // u64 parsing already rejects a leading '-'
    text.parse::<u64>().map_err(|_| invalid())
}
