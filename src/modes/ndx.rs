//! Non-deterministic, XEX-tweakable IP address encryption.
//!
//! Takes a 32-byte key, split into two independent AES-128 key schedules:
//! one derives a per-call mask from a 16-byte tweak (`encrypt_t(tweak) =
//! AES_encrypt(tweak, tweak_schedule)`), the other encrypts the address
//! XEX-style: `AES_encrypt(address ^ mask, primary_schedule) ^ mask`. The
//! output bundle carries the 16-byte tweak alongside the 16-byte
//! ciphertext.

use zeroize::Zeroize;

use crate::aes128::Aes128KeySchedule;
use crate::error::IpCryptError;
use crate::hexcodec;
use crate::ip16::Ip16;

/// A 16-byte tweak followed by a 16-byte ciphertext block.
pub type NdxBundle = [u8; 32];

fn xor16(a: &[u8; 16], b: &[u8; 16]) -> [u8; 16] {
    let mut out = [0u8; 16];
    for i in 0..16 {
        out[i] = a[i] ^ b[i];
    }
    out
}

/// A non-deterministic, XEX-tweaked encryption context with a 32-byte key.
pub struct IpcryptNdx {
    tweak_schedule: Aes128KeySchedule,
    primary_schedule: Aes128KeySchedule,
}

impl IpcryptNdx {
    /// Expand a 32-byte key: the first 16 bytes are the primary
    /// address-encrypting key, the second 16 bytes derive the tweak mask.
    pub fn new(key: &[u8; 32]) -> Self {
        let primary_key: [u8; 16] = key[..16].try_into().unwrap();
        let tweak_key: [u8; 16] = key[16..].try_into().unwrap();
        IpcryptNdx {
            tweak_schedule: Aes128KeySchedule::new(&tweak_key),
            primary_schedule: Aes128KeySchedule::new(&primary_key),
        }
    }

    pub fn from_hex_key(hex_key: &str) -> Result<Self, IpCryptError> {
        let key: [u8; 32] = hexcodec::decode_array(hex_key)?;
        Ok(IpcryptNdx::new(&key))
    }

    fn derive_mask(&self, tweak: &[u8; 16]) -> [u8; 16] {
        self.tweak_schedule.encrypt_block(*tweak)
    }

    /// Encrypt `ip` under the given caller-supplied 16-byte tweak,
    /// returning the tweak∥ciphertext bundle.
    pub fn encrypt_ip16_with_tweak(&self, ip: Ip16, tweak: &[u8; 16]) -> NdxBundle {
        let mask = self.derive_mask(tweak);
        let masked_in = xor16(&ip.0, &mask);
        let ct = xor16(&self.primary_schedule.encrypt_block(masked_in), &mask);
        let mut bundle = [0u8; 32];
        bundle[..16].copy_from_slice(tweak);
        bundle[16..].copy_from_slice(&ct);
        bundle
    }

    /// Recover the original address from a tweak∥ciphertext bundle.
    pub fn decrypt_ip16(&self, bundle: &NdxBundle) -> Ip16 {
        let tweak: [u8; 16] = bundle[..16].try_into().unwrap();
        let ct: [u8; 16] = bundle[16..].try_into().unwrap();
        let mask = self.derive_mask(&tweak);
        let masked_in = xor16(&ct, &mask);
        Ip16(xor16(&self.primary_schedule.decrypt_block(masked_in), &mask))
    }

    pub fn encrypt_ip_str_with_tweak(
        &self,
        ip_str: &str,
        tweak: &[u8; 16],
    ) -> Result<String, IpCryptError> {
        let ip: Ip16 = ip_str.parse()?;
        Ok(hexcodec::encode(&self.encrypt_ip16_with_tweak(ip, tweak)))
    }

    pub fn decrypt_hex_str(&self, hex_bundle: &str) -> Result<String, IpCryptError> {
        let bundle: NdxBundle = hexcodec::decode_array(hex_bundle)?;
        Ok(self.decrypt_ip16(&bundle).to_string())
    }

    pub fn deinit(self) {}
}

impl Drop for IpcryptNdx {
    fn drop(&mut self) {
        self.tweak_schedule.zeroize();
        self.primary_schedule.zeroize();
    }
}
