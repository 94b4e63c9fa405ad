//! Galois-field arithmetic: the two multiply-by-`x` primitives `stretch`
//! drives its key schedule and diffusion step with.
//!
//! Both operations are constant-time by construction (mask arithmetic, no
//! secret-dependent branches), matching this repository's existing
//! convention for field arithmetic (see `core::gf256::GF256::mul`).

#![forbid(unsafe_code)]

/// Degree-`2c` irreducible polynomials used as the LFSR modulus in
/// [`gfmul`], indexed by `c` (`1..=31`); index `0` is unused padding.
///
/// Reproduced verbatim from `mmcrypt_gfpol[]` in the reference
/// implementation. This table is part of the bit-exact contract: an
/// implementation that uses different polynomials produces a different,
/// non-interoperable key schedule.
pub const GFPOL: [u64; 32] = [
    0,
    gf_pol1(1),
    gf_pol1(1),
    gf_pol3(1, 4, 5),
    gf_pol5(2, 4, 5, 6, 7),
    gf_pol5(1, 2, 5, 6, 7),
    gf_pol5(2, 6, 8, 9, 10),
    gf_pol5(1, 3, 4, 5, 11),
    gf_pol5(2, 9, 12, 13, 14),
    gf_pol5(1, 4, 7, 8, 10),
    gf_pol5(1, 10, 14, 16, 18),
    gf_pol5(2, 4, 9, 14, 21),
    gf_pol5(3, 6, 7, 16, 23),
    gf_pol5(1, 6, 15, 17, 24),
    gf_pol5(5, 11, 21, 24, 27),
    gf_pol5(11, 12, 24, 28, 29),
    gf_pol5(1, 3, 12, 17, 30),
    gf_pol5(4, 7, 14, 20, 31),
    gf_pol5(6, 17, 25, 26, 28),
    gf_pol5(6, 9, 11, 20, 36),
    gf_pol5(6, 7, 18, 28, 36),
    gf_pol5(1, 8, 14, 24, 27),
    gf_pol5(5, 16, 25, 40, 43),
    gf_pol5(21, 23, 24, 40, 44),
    gf_pol5(5, 12, 27, 29, 43),
    gf_pol5(5, 6, 16, 21, 36),
    gf_pol5(1, 2, 16, 25, 50),
    gf_pol5(9, 10, 23, 24, 34),
    gf_pol5(5, 20, 28, 38, 45),
    gf_pol5(23, 32, 37, 54, 55),
    gf_pol5(12, 13, 19, 31, 48),
    gf_pol5(2, 9, 16, 18, 48),
];

const fn gf_pol1(p1: u32) -> u64 {
    1u64 | (1u64 << p1)
}

const fn gf_pol3(p1: u32, p2: u32, p3: u32) -> u64 {
    1u64 | (1u64 << p1) | (1u64 << p2) | (1u64 << p3)
}

const fn gf_pol5(p1: u32, p2: u32, p3: u32, p4: u32, p5: u32) -> u64 {
    1u64 | (1u64 << p1) | (1u64 << p2) | (1u64 << p3) | (1u64 << p4) | (1u64 << p5)
}

/// `GF(2^(2c))` multiply-by-`x`: one LFSR step of the per-column key
/// schedule.
///
/// `pol` must be `GFPOL[c]` and `msb1` must be `1 << (2*c)` for the
/// register to stay within its `2c`-bit field. Branchless: the reduction
/// is applied via an all-ones/all-zeros mask derived from the overflow bit,
/// never a conditional.
#[inline(always)]
pub fn gfmul(x: u64, pol: u64, msb1: u64) -> u64 {
    let x = x << 1;
    let carry = 0u64.wrapping_sub(((x & msb1) != 0) as u64);
    (x ^ (pol & carry)) & (msb1 - 1)
}

/// `GF(2^512)` multiply-by-`x`: the diffusing mix step over eight 64-bit
/// limbs (limb 0 most significant), modulo `x^512 + x^8 + x^5 + x^2 + 1`
/// (`0x125`).
///
/// Branchless: the reduction term is masked by the pre-shift sign of limb
/// 0 rather than branched on.
#[inline(always)]
pub fn gfmul_512(x: &mut [u64; 8]) {
    const POLY: u64 = 0x125;
    let msb = x[0] >> 63;
    for i in 0..7 {
        let carry = x[i + 1] >> 63;
        x[i] = (x[i] << 1) | carry;
    }
    let mask = 0u64.wrapping_sub(msb);
    x[7] = (x[7] << 1) ^ (POLY & mask);
}
