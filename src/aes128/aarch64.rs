//! ARMv8 Crypto Extensions backend for aarch64.
//!
//! `vaeseq_u8`/`vaesdq_u8` fold AddRoundKey with SubBytes+ShiftRows (or
//! their inverses), one round "earlier" than the x86 AES-NI instructions
//! do: the round-key index consumed by a given intrinsic call is shifted
//! by one relative to the `x86` backend's loop. MixColumns/InvMixColumns
//! are applied afterwards via `vaesmcq_u8`/`vaesimcq_u8`. See the `x86`
//! backend for the unshifted structure these functions mirror.

use core::arch::aarch64::*;

use super::RoundKeys;

const NR: usize = 10;
const RCON: [u8; 10] = [0x01, 0x02, 0x04, 0x08, 0x10, 0x20, 0x40, 0x80, 0x1b, 0x36];

const KEYGEN_SHUFFLE: [u8; 16] = [4, 1, 14, 11, 1, 14, 11, 4, 12, 9, 6, 3, 9, 6, 3, 12];

#[inline]
unsafe fn load(block: &[u8; 16]) -> uint8x16_t {
    vld1q_u8(block.as_ptr())
}

#[inline]
unsafe fn store(v: uint8x16_t) -> [u8; 16] {
    let mut out = [0u8; 16];
    vst1q_u8(out.as_mut_ptr(), v);
    out
}

#[inline]
unsafe fn byteshl4(a: uint8x16_t) -> uint8x16_t {
    let zero = vdupq_n_u8(0);
    vextq_u8::<12>(zero, a)
}

#[inline]
unsafe fn byteshl8(a: uint8x16_t) -> uint8x16_t {
    let zero = vdupq_n_u8(0);
    vextq_u8::<8>(zero, a)
}

#[inline]
unsafe fn dup_lane3_u32(a: uint8x16_t) -> uint8x16_t {
    let words = vreinterpretq_u32_u8(a);
    vreinterpretq_u8_u32(vdupq_laneq_u32::<3>(words))
}

#[inline]
unsafe fn aes_keygen(t: uint8x16_t, rc: u8) -> uint8x16_t {
    let zero = vdupq_n_u8(0);
    let s = vaeseq_u8(t, zero);
    let idx = load(&KEYGEN_SHUFFLE);
    let shuffled = vqtbl1q_u8(s, idx);
    let rcon_bytes: [u8; 16] = [0, 0, 0, 0, rc, 0, 0, 0, 0, 0, 0, 0, rc, 0, 0, 0];
    veorq_u8(shuffled, load(&rcon_bytes))
}

#[target_feature(enable = "aes")]
#[target_feature(enable = "neon")]
pub(crate) unsafe fn expand_key(key: &[u8; 16]) -> RoundKeys {
    let mut rks: RoundKeys = [[0u8; 16]; 11];
    let mut t = load(key);
    for (i, rc) in RCON.iter().enumerate() {
        rks[i] = store(t);
        let s = aes_keygen(t, *rc);
        t = veorq_u8(t, byteshl4(t));
        t = veorq_u8(t, byteshl8(t));
        t = veorq_u8(t, dup_lane3_u32(s));
    }
    rks[NR] = store(t);
    rks
}

#[target_feature(enable = "aes")]
#[target_feature(enable = "neon")]
pub(crate) unsafe fn encrypt_block(rks: &RoundKeys, block: [u8; 16]) -> [u8; 16] {
    let mut t = vaesmcq_u8(vaeseq_u8(load(&block), load(&rks[0])));
    for round in 1..9 {
        t = vaesmcq_u8(vaeseq_u8(t, load(&rks[round])));
    }
    t = vaeseq_u8(t, load(&rks[9]));
    t = veorq_u8(t, load(&rks[NR]));
    store(t)
}

#[target_feature(enable = "aes")]
#[target_feature(enable = "neon")]
pub(crate) unsafe fn decrypt_block(rks: &RoundKeys, block: [u8; 16]) -> [u8; 16] {
    let mut rks_inv = [vdupq_n_u8(0); 9];
    for i in 0..9 {
        rks_inv[i] = vaesimcq_u8(load(&rks[NR - 1 - i]));
    }
    let mut t = vaesimcq_u8(vaesdq_u8(load(&block), load(&rks[NR])));
    for rk in rks_inv.iter().take(8) {
        t = vaesimcq_u8(vaesdq_u8(t, *rk));
    }
    t = vaesdq_u8(t, rks_inv[8]);
    t = veorq_u8(t, load(&rks[0]));
    store(t)
}

#[target_feature(enable = "aes")]
#[target_feature(enable = "neon")]
pub(crate) unsafe fn encrypt_block_tweaked(
    rks: &RoundKeys,
    tweak: &[u8; 16],
    block: [u8; 16],
) -> [u8; 16] {
    let tweak_v = load(tweak);
    let xor_rk = |i: usize| veorq_u8(tweak_v, load(&rks[i]));

    let mut t = vaesmcq_u8(vaeseq_u8(load(&block), xor_rk(0)));
    for round in 1..9 {
        t = vaesmcq_u8(vaeseq_u8(t, xor_rk(round)));
    }
    t = vaeseq_u8(t, xor_rk(9));
    t = veorq_u8(t, xor_rk(NR));
    store(t)
}

#[target_feature(enable = "aes")]
#[target_feature(enable = "neon")]
pub(crate) unsafe fn decrypt_block_tweaked(
    rks: &RoundKeys,
    tweak: &[u8; 16],
    block: [u8; 16],
) -> [u8; 16] {
    let tweak_v = load(tweak);
    let tweak_inv = vaesimcq_u8(tweak_v);
    let mut rks_inv = [vdupq_n_u8(0); 9];
    for i in 0..9 {
        rks_inv[i] = vaesimcq_u8(load(&rks[NR - 1 - i]));
    }
    let mut t = vaesimcq_u8(vaesdq_u8(load(&block), veorq_u8(tweak_v, load(&rks[NR]))));
    for rk in rks_inv.iter().take(8) {
        t = vaesimcq_u8(vaesdq_u8(t, veorq_u8(tweak_inv, *rk)));
    }
    t = vaesdq_u8(t, veorq_u8(tweak_inv, rks_inv[8]));
    t = veorq_u8(t, veorq_u8(tweak_v, load(&rks[0])));
    store(t)
}
