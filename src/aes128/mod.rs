//! AES-128 core: key expansion and single-block encrypt/decrypt.
//!
//! Three interchangeable backends implement the same eleven-round-key
//! schedule and the same FIPS-197 round structure: a portable table-based
//! fallback (`soft`), an AES-NI backend for x86/x86_64 (`x86`), and an
//! ARMv8 Crypto Extensions backend for aarch64 (`aarch64`). The backend is
//! chosen once, at key-schedule construction time, via runtime CPU feature
//! detection, and cached for the lifetime of the schedule.
//!
//! Round keys are stored as plain bytes (`RoundKeys = [[u8; 16]; 11]`)
//! rather than in a backend-native vector type, so that a schedule can be
//! zeroized uniformly regardless of which backend produced it.

mod soft;

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
mod x86;

#[cfg(target_arch = "aarch64")]
mod aarch64;

use zeroize::Zeroize;

/// Eleven 128-bit round keys: RKS\[0\] is the whitening key, RKS\[1..9\] are
/// the middle-round keys, RKS\[10\] is the final-round key.
pub(crate) type RoundKeys = [[u8; 16]; 11];

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Backend {
    Soft,
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    X86Ni,
    #[cfg(target_arch = "aarch64")]
    Aarch64Ce,
}

fn detect_backend() -> Backend {
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    {
        if is_x86_feature_detected!("aes") && is_x86_feature_detected!("sse2") {
            return Backend::X86Ni;
        }
    }
    #[cfg(target_arch = "aarch64")]
    {
        if std::arch::is_aarch64_feature_detected!("aes")
            && std::arch::is_aarch64_feature_detected!("neon")
        {
            return Backend::Aarch64Ce;
        }
    }
    Backend::Soft
}

/// An expanded AES-128 round-key schedule, bound to the backend that
/// produced it.
pub(crate) struct Aes128KeySchedule {
    rks: RoundKeys,
    backend: Backend,
}

impl Aes128KeySchedule {
    /// Expand a 16-byte key using whichever backend this target supports.
    pub(crate) fn new(key: &[u8; 16]) -> Self {
        let backend = detect_backend();
        Self::with_backend(key, backend)
    }

    /// Force the portable fallback, regardless of what the host supports.
    /// Used to cross-check the accelerated backends against the reference
    /// implementation in tests.
    #[cfg(test)]
    pub(crate) fn new_soft(key: &[u8; 16]) -> Self {
        Self::with_backend(key, Backend::Soft)
    }

    fn with_backend(key: &[u8; 16], backend: Backend) -> Self {
        let rks = match backend {
            Backend::Soft => soft::expand_key(key),
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            Backend::X86Ni => unsafe { x86::expand_key(key) },
            #[cfg(target_arch = "aarch64")]
            Backend::Aarch64Ce => unsafe { aarch64::expand_key(key) },
        };
        Aes128KeySchedule { rks, backend }
    }

    pub(crate) fn encrypt_block(&self, block: [u8; 16]) -> [u8; 16] {
        match self.backend {
            Backend::Soft => soft::encrypt_block(&self.rks, block),
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            Backend::X86Ni => unsafe { x86::encrypt_block(&self.rks, block) },
            #[cfg(target_arch = "aarch64")]
            Backend::Aarch64Ce => unsafe { aarch64::encrypt_block(&self.rks, block) },
        }
    }

    pub(crate) fn decrypt_block(&self, block: [u8; 16]) -> [u8; 16] {
        match self.backend {
            Backend::Soft => soft::decrypt_block(&self.rks, block),
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            Backend::X86Ni => unsafe { x86::decrypt_block(&self.rks, block) },
            #[cfg(target_arch = "aarch64")]
            Backend::Aarch64Ce => unsafe { aarch64::decrypt_block(&self.rks, block) },
        }
    }

    pub(crate) fn encrypt_block_tweaked(&self, tweak: &[u8; 16], block: [u8; 16]) -> [u8; 16] {
        match self.backend {
            Backend::Soft => soft::encrypt_block_tweaked(&self.rks, tweak, block),
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            Backend::X86Ni => unsafe { x86::encrypt_block_tweaked(&self.rks, tweak, block) },
            #[cfg(target_arch = "aarch64")]
            Backend::Aarch64Ce => unsafe { aarch64::encrypt_block_tweaked(&self.rks, tweak, block) },
        }
    }

    pub(crate) fn decrypt_block_tweaked(&self, tweak: &[u8; 16], block: [u8; 16]) -> [u8; 16] {
        match self.backend {
            Backend::Soft => soft::decrypt_block_tweaked(&self.rks, tweak, block),
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            Backend::X86Ni => unsafe { x86::decrypt_block_tweaked(&self.rks, tweak, block) },
            #[cfg(target_arch = "aarch64")]
            Backend::Aarch64Ce => unsafe { aarch64::decrypt_block_tweaked(&self.rks, tweak, block) },
        }
    }
}

impl Zeroize for Aes128KeySchedule {
    fn zeroize(&mut self) {
        self.rks.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIPS_KEY: [u8; 16] = [
        0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e,
        0x0f,
    ];
    const FIPS_PLAINTEXT: [u8; 16] = [
        0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd, 0xee,
        0xff,
    ];
    const FIPS_CIPHERTEXT: [u8; 16] = [
        0x69, 0xc4, 0xe0, 0xd8, 0x6a, 0x7b, 0x04, 0x30, 0xd8, 0xcd, 0xb7, 0x80, 0x70, 0xb4, 0xc5,
        0x5a,
    ];

    #[test]
    fn soft_backend_matches_fips_vector() {
        let sched = Aes128KeySchedule::new_soft(&FIPS_KEY);
        let ct = sched.encrypt_block(FIPS_PLAINTEXT);
        assert_eq!(ct, FIPS_CIPHERTEXT);
        let pt = sched.decrypt_block(ct);
        assert_eq!(pt, FIPS_PLAINTEXT);
    }

    #[test]
    fn native_backend_matches_fips_vector() {
        let sched = Aes128KeySchedule::new(&FIPS_KEY);
        let ct = sched.encrypt_block(FIPS_PLAINTEXT);
        assert_eq!(ct, FIPS_CIPHERTEXT);
        let pt = sched.decrypt_block(ct);
        assert_eq!(pt, FIPS_PLAINTEXT);
    }

    #[test]
    fn native_backend_agrees_with_soft_backend() {
        let key = [
            0x0f, 0x0e, 0x0d, 0x0c, 0x0b, 0x0a, 0x09, 0x08, 0x07, 0x06, 0x05, 0x04, 0x03, 0x02,
            0x01, 0x00,
        ];
        let plaintext = [7u8; 16];
        let native = Aes128KeySchedule::new(&key);
        let soft = Aes128KeySchedule::new_soft(&key);
        assert_eq!(native.encrypt_block(plaintext), soft.encrypt_block(plaintext));
        let ct = native.encrypt_block(plaintext);
        assert_eq!(native.decrypt_block(ct), soft.decrypt_block(ct));
    }

    #[test]
    fn round_trip_is_inverse_for_native_and_soft() {
        let key = [3u8; 16];
        for backend_soft in [false, true] {
            let sched = if backend_soft {
                Aes128KeySchedule::new_soft(&key)
            } else {
                Aes128KeySchedule::new(&key)
            };
            for byte in 0u8..=20 {
                let block = [byte; 16];
                let ct = sched.encrypt_block(block);
                assert_eq!(sched.decrypt_block(ct), block);
            }
        }
    }

    #[test]
    fn tweaked_round_trip_is_inverse() {
        let key = [9u8; 16];
        let tweak = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16];
        for backend_soft in [false, true] {
            let sched = if backend_soft {
                Aes128KeySchedule::new_soft(&key)
            } else {
                Aes128KeySchedule::new(&key)
            };
            let block = [42u8; 16];
            let ct = sched.encrypt_block_tweaked(&tweak, block);
            assert_eq!(sched.decrypt_block_tweaked(&tweak, ct), block);
        }
    }
}
