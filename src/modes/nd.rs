//! Non-deterministic, KIASU-BC tweakable IP address encryption.
//!
//! Each encryption draws a fresh 8-byte tweak, expands it into a 128-bit
//! mask (see [`crate::tweak`]), and folds it into every AES round key.
//! The output bundle carries the tweak alongside the ciphertext so
//! decryption can recover it; unlike the deterministic mode, the same
//! address encrypted twice produces unrelated ciphertexts.

use zeroize::Zeroize;

use crate::aes128::Aes128KeySchedule;
use crate::error::IpCryptError;
use crate::hexcodec;
use crate::ip16::Ip16;
use crate::tweak::expand_nd_tweak;

/// An 8-byte tweak followed by a 16-byte ciphertext block.
pub type NdBundle = [u8; 24];

/// A non-deterministic (KIASU-BC tweaked) encryption context.
pub struct IpcryptNd {
    schedule: Aes128KeySchedule,
}

impl IpcryptNd {
    pub fn new(key: &[u8; 16]) -> Self {
        IpcryptNd { schedule: Aes128KeySchedule::new(key) }
    }

    pub fn from_hex_key(hex_key: &str) -> Result<Self, IpCryptError> {
        let key: [u8; 16] = hexcodec::decode_array(hex_key)?;
        Ok(IpcryptNd::new(&key))
    }

    /// Encrypt `ip` under the given caller-supplied 8-byte tweak, returning
    /// the tweak∥ciphertext bundle.
    pub fn encrypt_ip16_with_tweak(&self, ip: Ip16, tweak: &[u8; 8]) -> NdBundle {
        let expanded = expand_nd_tweak(tweak);
        let ct = self.schedule.encrypt_block_tweaked(&expanded, ip.0);
        let mut bundle = [0u8; 24];
        bundle[..8].copy_from_slice(tweak);
        bundle[8..].copy_from_slice(&ct);
        bundle
    }

    /// Recover the original address from a tweak∥ciphertext bundle.
    pub fn decrypt_ip16(&self, bundle: &NdBundle) -> Ip16 {
        let tweak: [u8; 8] = bundle[..8].try_into().unwrap();
        let ct: [u8; 16] = bundle[8..].try_into().unwrap();
        let expanded = expand_nd_tweak(&tweak);
        Ip16(self.schedule.decrypt_block_tweaked(&expanded, ct))
    }

    /// Parse `ip_str`, encrypt it under `tweak`, and hex-encode the bundle.
    pub fn encrypt_ip_str_with_tweak(
        &self,
        ip_str: &str,
        tweak: &[u8; 8],
    ) -> Result<String, IpCryptError> {
        let ip: Ip16 = ip_str.parse()?;
        Ok(hexcodec::encode(&self.encrypt_ip16_with_tweak(ip, tweak)))
    }

    /// Decode a hex-encoded bundle and recover the original address string.
    pub fn decrypt_hex_str(&self, hex_bundle: &str) -> Result<String, IpCryptError> {
        let bundle: NdBundle = hexcodec::decode_array(hex_bundle)?;
        Ok(self.decrypt_ip16(&bundle).to_string())
    }

    pub fn deinit(self) {}
}

impl Drop for IpcryptNd {
    fn drop(&mut self) {
        self.schedule.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: [u8; 16] = [
        0x0f, 0x0e, 0x0d, 0x0c, 0x0b, 0x0a, 0x09, 0x08, 0x07, 0x06, 0x05, 0x04, 0x03, 0x02, 0x01,
        0x00,
    ];
    const TWEAK: [u8; 8] = [0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07];

    #[test]
    fn round_trips_through_bundle() {
        let ctx = IpcryptNd::new(&KEY);
        let ip: Ip16 = "::ffff:192.0.2.1".parse().unwrap();
        let bundle = ctx.encrypt_ip16_with_tweak(ip, &TWEAK);
        assert_eq!(&bundle[..8], &TWEAK);
        assert_eq!(ctx.decrypt_ip16(&bundle), ip);
    }

    #[test]
    fn different_tweaks_give_different_ciphertexts() {
        let ctx = IpcryptNd::new(&KEY);
        let ip: Ip16 = "2001:db8::1".parse().unwrap();
        let a = ctx.encrypt_ip16_with_tweak(ip, &TWEAK);
        let b = ctx.encrypt_ip16_with_tweak(ip, &[0xff; 8]);
        assert_ne!(a[8..], b[8..]);
    }

    #[test]
    fn string_bundle_round_trip() {
        let ctx = IpcryptNd::new(&KEY);
        let hex_bundle = ctx.encrypt_ip_str_with_tweak("192.0.2.1", &TWEAK).unwrap();
        let decrypted = ctx.decrypt_hex_str(&hex_bundle).unwrap();
        assert_eq!(decrypted, "192.0.2.1");
    }
}
