//! The `mix` kernel: the branchless data-dependent diffusion step spec.md
//! §4.4.5 describes.
//!
//! Every conditional here is mask arithmetic (`xskip`, `xswap`), never a
//! branch, so the instruction trace is identical regardless of which way
//! a predicate actually went — matching this repository's existing
//! constant-time discipline for field arithmetic (see `core::gf256::Mul`,
//! `core::xor::xor`).

use super::cell::{gfmul_512_cell, limb0_be, xor_cells, Cell, CELL_BYTES};

/// One mix step.
///
/// `x1`, `x2` are the two cells the current schedule step selected as
/// sources; `y1`, `y2` are the cells selected as sinks for the *next*
/// column (spec.md §4.4.4: `(i+1) mod s`). `feedback` accumulates the
/// difference between `x1`/`x2` whenever their top-`c` bits (per `xmask`)
/// disagree, then diffuses via [`gfmul_512_cell`] every call regardless.
///
/// `xmask` must select the top `c` bits of a big-endian-read limb 0 (see
/// [`super::cell::limb0_be`]); callers build it once per `stretch` call.
#[inline]
pub fn mix(feedback: &mut Cell, xmask: u64, x1: &Cell, x2: &Cell, y1: &mut Cell, y2: &mut Cell) {
    let disagree = ((limb0_be(x1) ^ limb0_be(x2)) & xmask) != 0;
    let xskip = 0u8.wrapping_sub(disagree as u8);

    let mut diff = xor_cells(x1, x2);

    for j in 0..CELL_BYTES {
        feedback[j] ^= diff[j] & xskip;
    }
    gfmul_512_cell(feedback);

    // Address-order byte 0, not a host-word MSB: see spec.md §6.
    let xswap = 0u8.wrapping_sub((feedback[0] & 0x80 != 0) as u8);

    gfmul_512_cell(&mut diff);

    for j in 0..CELL_BYTES {
        let t = (y1[j] ^ y2[j] ^ diff[j]) & xswap;
        y1[j] ^= t;
        y2[j] ^= t;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agreeing_top_bits_skip_the_feedback_absorb() {
        // x1 == x2 everywhere -> limb0 xor is zero -> xskip is all-zero,
        // so feedback only ever gets gfmul_512'd, never XORed with a diff.
        let x1 = [0x11u8; CELL_BYTES];
        let x2 = [0x11u8; CELL_BYTES];
        let mut feedback_skip = [0u8; CELL_BYTES];
        let mut feedback_direct = [0u8; CELL_BYTES];
        let mut y1 = [0u8; CELL_BYTES];
        let mut y2 = [0u8; CELL_BYTES];
        mix(&mut feedback_skip, !0u64, &x1, &x2, &mut y1, &mut y2);
        super::gfmul_512_cell(&mut feedback_direct);
        assert_eq!(feedback_skip, feedback_direct);
    }

    #[test]
    fn disagreeing_top_bits_absorb_the_difference() {
        let x1 = [0u8; CELL_BYTES];
        let mut x2 = [0u8; CELL_BYTES];
        x2[0] = 0x80; // flips the top bit of limb0
        let mut feedback_a = [0u8; CELL_BYTES];
        let mut feedback_b = [0u8; CELL_BYTES];
        let mut y1 = [0u8; CELL_BYTES];
        let mut y2 = [0u8; CELL_BYTES];
        mix(&mut feedback_a, !0u64, &x1, &x2, &mut y1, &mut y2);
        mix(&mut feedback_b, !0u64, &x2, &x1, &mut y1, &mut y2);
        // Symmetric in x1/x2 (XOR difference is commutative).
        assert_eq!(feedback_a, feedback_b);
        assert_ne!(feedback_a, [0u8; CELL_BYTES]);
    }

    #[test]
    fn both_branches_of_xswap_are_reachable() {
        let x1 = [0u8; CELL_BYTES];
        let x2 = [0u8; CELL_BYTES];
        let y1_before = [0x01u8; CELL_BYTES];
        let y2_before = [0x02u8; CELL_BYTES];

        let mut saw_swap = false;
        let mut saw_noswap = false;
        for seed in 0u8..=255 {
            let mut feedback = [seed; CELL_BYTES];
            let mut y1 = y1_before;
            let mut y2 = y2_before;
            mix(&mut feedback, !0u64, &x1, &x2, &mut y1, &mut y2);
            if y1 != y1_before || y2 != y2_before {
                saw_swap = true;
            } else {
                saw_noswap = true;
            }
        }
        assert!(saw_swap && saw_noswap, "both xswap outcomes must be reachable");
    }
}
