//! Hex encode/decode adapter used by the string-convenience methods on
//! each mode façade.
//!
//! Wraps the `hex` crate (accepting mixed-case input on decode) and maps
//! its errors onto [`IpCryptError`].

use crate::error::IpCryptError;

pub(crate) fn encode(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

pub(crate) fn decode_array<const N: usize>(s: &str) -> Result<[u8; N], IpCryptError> {
    let decoded = hex::decode(s).map_err(|_| IpCryptError::InvalidHex)?;
    if decoded.len() != N {
        return Err(IpCryptError::InvalidHex);
    }
    let mut out = [0u8; N];
    out.copy_from_slice(&decoded);
    Ok(out)
}

/// Decode `s` into `dst`, rejecting a destination buffer smaller than the
/// decoded length with [`IpCryptError::BufferTooSmall`] rather than
/// truncating silently.
pub(crate) fn decode_into(dst: &mut [u8], s: &str) -> Result<(), IpCryptError> {
    let decoded = hex::decode(s).map_err(|_| IpCryptError::InvalidHex)?;
    if decoded.len() > dst.len() {
        return Err(IpCryptError::BufferTooSmall { needed: decoded.len(), got: dst.len() });
    }
    dst[..decoded.len()].copy_from_slice(&decoded);
    Ok(())
}
