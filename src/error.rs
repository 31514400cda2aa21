//! Error types returned by the string/hex convenience layer.
//!
//! The block-level operations in [`crate::modes`] and [`crate::aes128`] are
//! total functions over fixed-size arrays and never fail. Only the adapters
//! that parse caller-supplied text (IP strings, hex bundles) can fail, and
//! they all report through [`IpCryptError`].

use thiserror::Error;

/// Errors produced while parsing or formatting textual/hex input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IpCryptError {
    /// The given string is not a valid IPv4 or IPv6 address.
    #[error("invalid IP address string: {input:?}")]
    InvalidIpString {
        /// The string that failed to parse.
        input: String,
    },

    /// A hex string contained non-hex characters, had odd length, or
    /// decoded to the wrong number of bytes for the requested operation.
    #[error("invalid hex input")]
    InvalidHex,

    /// A caller-provided output buffer was smaller than required.
    #[error("buffer too small: needed {needed} bytes, got {got}")]
    BufferTooSmall {
        /// Minimum required length in bytes.
        needed: usize,
        /// Actual length of the provided buffer.
        got: usize,
    },
}
