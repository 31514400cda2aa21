//! AES-NI backend for x86/x86_64.
//!
//! Mirrors the portable backend's round structure exactly, using
//! `_mm_aesenc_si128`/`_mm_aesdec_si128` and friends in place of the
//! table-based substitution/diffusion steps. Round keys are still stored
//! and passed around as `[u8; 16]` so the schedule can be zeroized
//! uniformly; each call loads/stores through `_mm_loadu_si128`.
//!
//! Every function here requires the `aes` and `sse2` target features,
//! checked once by the caller in `detect_backend`.

#[cfg(target_arch = "x86")]
use core::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

use super::RoundKeys;

const NR: usize = 10;
const RCON: [i32; 10] = [0x01, 0x02, 0x04, 0x08, 0x10, 0x20, 0x40, 0x80, 0x1b, 0x36];

#[inline]
unsafe fn load(block: &[u8; 16]) -> __m128i {
    _mm_loadu_si128(block.as_ptr() as *const __m128i)
}

#[inline]
unsafe fn store(v: __m128i) -> [u8; 16] {
    let mut out = [0u8; 16];
    _mm_storeu_si128(out.as_mut_ptr() as *mut __m128i, v);
    out
}

macro_rules! expand_round {
    ($t1:expr, $rc:expr) => {{
        let mut t1 = $t1;
        let mut t2 = _mm_aeskeygenassist_si128(t1, $rc);
        t2 = _mm_shuffle_epi32(t2, 0xff);
        let mut t3 = _mm_slli_si128(t1, 0x4);
        t1 = _mm_xor_si128(t1, t3);
        t3 = _mm_slli_si128(t3, 0x4);
        t1 = _mm_xor_si128(t1, t3);
        t3 = _mm_slli_si128(t3, 0x4);
        t1 = _mm_xor_si128(t1, t3);
        _mm_xor_si128(t1, t2)
    }};
}

#[target_feature(enable = "aes")]
pub(crate) unsafe fn expand_key(key: &[u8; 16]) -> RoundKeys {
    let mut rks: RoundKeys = [[0u8; 16]; 11];
    let mut t = load(key);
    rks[0] = store(t);
    for (round, rc) in RCON.iter().enumerate() {
        t = expand_round!(t, *rc);
        rks[round + 1] = store(t);
    }
    rks
}

#[inline]
unsafe fn invert_round_key(rk: &[u8; 16]) -> __m128i {
    _mm_aesimc_si128(load(rk))
}

#[target_feature(enable = "aes")]
pub(crate) unsafe fn encrypt_block(rks: &RoundKeys, block: [u8; 16]) -> [u8; 16] {
    let mut t = _mm_xor_si128(load(&block), load(&rks[0]));
    for round in 1..NR {
        t = _mm_aesenc_si128(t, load(&rks[round]));
    }
    t = _mm_aesenclast_si128(t, load(&rks[NR]));
    store(t)
}

#[target_feature(enable = "aes")]
pub(crate) unsafe fn decrypt_block(rks: &RoundKeys, block: [u8; 16]) -> [u8; 16] {
    let mut rks_inv = [_mm_setzero_si128(); 9];
    for i in 0..9 {
        rks_inv[i] = invert_round_key(&rks[NR - 1 - i]);
    }
    let mut t = _mm_xor_si128(load(&block), load(&rks[NR]));
    for rk in rks_inv.iter() {
        t = _mm_aesdec_si128(t, *rk);
    }
    t = _mm_aesdeclast_si128(t, load(&rks[0]));
    store(t)
}

#[target_feature(enable = "aes")]
pub(crate) unsafe fn encrypt_block_tweaked(
    rks: &RoundKeys,
    tweak: &[u8; 16],
    block: [u8; 16],
) -> [u8; 16] {
    let tweak_v = load(tweak);
    let mut t = _mm_xor_si128(_mm_xor_si128(load(&block), tweak_v), load(&rks[0]));
    for round in 1..NR {
        t = _mm_aesenc_si128(t, _mm_xor_si128(tweak_v, load(&rks[round])));
    }
    t = _mm_aesenclast_si128(t, _mm_xor_si128(tweak_v, load(&rks[NR])));
    store(t)
}

#[target_feature(enable = "aes")]
pub(crate) unsafe fn decrypt_block_tweaked(
    rks: &RoundKeys,
    tweak: &[u8; 16],
    block: [u8; 16],
) -> [u8; 16] {
    let tweak_v = load(tweak);
    let tweak_inv = _mm_aesimc_si128(tweak_v);
    let mut rks_inv = [_mm_setzero_si128(); 9];
    for i in 0..9 {
        rks_inv[i] = invert_round_key(&rks[NR - 1 - i]);
    }
    let mut t = _mm_xor_si128(_mm_xor_si128(load(&block), tweak_v), load(&rks[NR]));
    for rk in rks_inv.iter() {
        t = _mm_aesdec_si128(t, _mm_xor_si128(tweak_inv, *rk));
    }
    t = _mm_aesdeclast_si128(t, _mm_xor_si128(tweak_v, load(&rks[0])));
    store(t)
}
