//! Deterministic, format-preserving IP address encryption.
//!
//! The plainest of the three modes: a 16-byte IP address in, a 16-byte
//! IP address out, with no tweak and no expansion. Equal inputs under the
//! same key always produce equal outputs, which is the point. This mode
//! exists for analyses that need to correlate repeated appearances of the
//! same address without ever seeing the address itself.

use zeroize::Zeroize;

use crate::aes128::Aes128KeySchedule;
use crate::error::IpCryptError;
use crate::hexcodec;
use crate::ip16::Ip16;

/// A deterministic encryption context bound to a single AES-128 key.
///
/// Immutable after construction: `encrypt_ip16`/`decrypt_ip16` take `&self`
/// and are safe to call concurrently from multiple threads. Call
/// [`Ipcrypt::deinit`] when the context is no longer needed to wipe the
/// key schedule from memory eagerly; it is also wiped on drop.
pub struct Ipcrypt {
    schedule: Aes128KeySchedule,
}

impl Ipcrypt {
    /// Expand a 16-byte key into a new encryption context.
    pub fn new(key: &[u8; 16]) -> Self {
        Ipcrypt { schedule: Aes128KeySchedule::new(key) }
    }

    /// Expand a key given as a 32-character hex string.
    pub fn from_hex_key(hex_key: &str) -> Result<Self, IpCryptError> {
        let key: [u8; 16] = hexcodec::decode_array(hex_key)?;
        Ok(Ipcrypt::new(&key))
    }

    /// Encrypt a 16-byte IP address, returning its ciphertext address.
    pub fn encrypt_ip16(&self, ip: Ip16) -> Ip16 {
        Ip16(self.schedule.encrypt_block(ip.0))
    }

    /// Decrypt a ciphertext address back to the original IP address.
    pub fn decrypt_ip16(&self, ip: Ip16) -> Ip16 {
        Ip16(self.schedule.decrypt_block(ip.0))
    }

    /// Parse `ip_str`, encrypt it, and format the result as an IP string.
    pub fn encrypt_ip_str(&self, ip_str: &str) -> Result<String, IpCryptError> {
        let ip: Ip16 = ip_str.parse()?;
        Ok(self.encrypt_ip16(ip).to_string())
    }

    /// Parse `ip_str` as a previously encrypted address, decrypt it, and
    /// format the result as an IP string.
    pub fn decrypt_ip_str(&self, ip_str: &str) -> Result<String, IpCryptError> {
        let ip: Ip16 = ip_str.parse()?;
        Ok(self.decrypt_ip16(ip).to_string())
    }

    /// Consume the context, wiping the key schedule immediately rather
    /// than waiting for drop.
    pub fn deinit(self) {}
}

impl Drop for Ipcrypt {
    fn drop(&mut self) {
        self.schedule.zeroize();
    }
}
