//! Numeral Codec
//!
//! Text to `i32` and back, with the console number rules:
//! - leading spaces are skipped; a token ends at a space, newline or end of
//!   input
//! - an optional `+`/`-` sign, then decimal digits only
//! - leading zeros are accepted
//! - anything malformed or out of `i32` range parses as 0

use core::fmt;
use core::ops::Deref;

use alloc::vec::Vec;

use crate::drivers::Console;

/// Exact spelling of `i32::MIN`, whose magnitude does not fit in `i32`.
const MIN_LITERAL: &[u8] = b"-2147483648";

/// Longest formatted value: sign plus ten digits.
const MAX_DIGITS: usize = 11;

#[inline]
fn is_separator(byte: u8, have_token: bool) -> bool {
    byte == b'\n' || (byte == b' ' && have_token)
}

/// Slice the first token out of `text`.
pub fn token(text: &[u8]) -> &[u8] {
    let start = text.iter().position(|&b| b != b' ').unwrap_or(text.len());
    let rest = &text[start..];
    let len = rest
        .iter()
        .position(|&b| is_separator(b, true))
        .unwrap_or(rest.len());
    &rest[..len]
}

/// Pull one token from the console, consuming the separator.
pub fn read_token<C: Console + ?Sized>(console: &mut C) -> Vec<u8> {
    let mut buf = Vec::new();
    while let Some(byte) = console.get_char() {
        if is_separator(byte, !buf.is_empty()) {
            break;
        }
        if byte != b' ' {
            buf.push(byte);
        }
    }
    buf
}

/// Parse the first token of `text`. Returns 0 for anything that is not a
/// well-formed `i32`.
pub fn parse_int(text: &[u8]) -> i32 {
    let tok = token(text);

    if tok.is_empty() {
        return 0;
    }
    if tok == MIN_LITERAL {
        return i32::MIN;
    }

    let (negative, digits) = match tok[0] {
        b'-' => (true, &tok[1..]),
        b'+' => (false, &tok[1..]),
        _ => (false, tok),
    };
    if digits.is_empty() {
        return 0;
    }

    let mut magnitude: i64 = 0;
    let mut leading_zero = true;
    for &byte in digits {
        if !byte.is_ascii_digit() {
            return 0;
        }
        if leading_zero && byte == b'0' {
            continue;
        }
        leading_zero = false;
        magnitude = magnitude * 10 + i64::from(byte - b'0');
        if magnitude > i64::from(i32::MAX) {
            return 0;
        }
    }

    let value = magnitude as i32;
    if negative {
        -value
    } else {
        value
    }
}

/// A formatted decimal number held inline.
#[derive(Clone, Copy)]
pub struct NumBuf {
    bytes: [u8; MAX_DIGITS],
    start: usize,
}

impl NumBuf {
    /// The digits, with a leading `-` for negatives.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[self.start..]
    }

    /// Same as [`as_bytes`](Self::as_bytes), as text.
    pub fn as_str(&self) -> &str {
        // Only ASCII digits and '-' are ever written.
        core::str::from_utf8(self.as_bytes()).unwrap_or("")
    }
}

impl Deref for NumBuf {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl fmt::Debug for NumBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NumBuf({:?})", self.as_str())
    }
}

impl fmt::Display for NumBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Minimal decimal form of `value`.
///
/// Digits are taken from the remainder's absolute value one at a time, so
/// `i32::MIN` is never negated.
pub fn format_int(value: i32) -> NumBuf {
    let mut bytes = [0u8; MAX_DIGITS];
    let mut pos = MAX_DIGITS;
    let mut rest = value;

    if rest == 0 {
        pos -= 1;
        bytes[pos] = b'0';
    }
    while rest != 0 {
        pos -= 1;
        bytes[pos] = b'0' + (rest % 10).unsigned_abs() as u8;
        rest /= 10;
    }
    if value < 0 {
        pos -= 1;
        bytes[pos] = b'-';
    }

    NumBuf { bytes, start: pos }
}
