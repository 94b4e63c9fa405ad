//! The 512-bit cell: the unit `T1`/`T2`/`feedback`/the mix kernel's
//! diffusion buffer are all made of.
//!
//! Byte/bit conventions per spec.md §6 and SPEC_FULL.md §3: a cell is a
//! flat `[u8; 64]` buffer. Arithmetic that cares about 64-bit limb
//! boundaries ([`gfmul_512`](crate::gf::gfmul_512)) reads/writes limbs with
//! native-endian conversion (host order, matching the reference's direct
//! `uint64_t *` reinterpretation of the same scratch bytes); the two
//! predicates that care about a *specific* byte or bit position (`xmask`,
//! `xswap`) read those bytes directly instead, independent of host
//! endianness.

pub const CELL_BYTES: usize = 64;

/// A single 512-bit scratch/feedback/diffusion value.
pub type Cell = [u8; CELL_BYTES];

/// Reinterprets a cell as eight host-endian 64-bit limbs (limb 0 first).
pub fn to_limbs(cell: &Cell) -> [u64; 8] {
    let mut limbs = [0u64; 8];
    for (i, limb) in limbs.iter_mut().enumerate() {
        *limb = u64::from_ne_bytes(cell[i * 8..i * 8 + 8].try_into().unwrap());
    }
    limbs
}

/// Inverse of [`to_limbs`].
pub fn from_limbs(limbs: &[u64; 8]) -> Cell {
    let mut cell = [0u8; CELL_BYTES];
    for (i, limb) in limbs.iter().enumerate() {
        cell[i * 8..i * 8 + 8].copy_from_slice(&limb.to_ne_bytes());
    }
    cell
}

/// [`crate::gf::gfmul_512`], applied in place to a byte-addressed cell.
pub fn gfmul_512_cell(cell: &mut Cell) {
    let mut limbs = to_limbs(cell);
    crate::gf::gfmul_512(&mut limbs);
    *cell = from_limbs(&limbs);
}

/// Limb 0, read as a big-endian 64-bit word regardless of host endianness.
/// Feeds the `xmask`/wrap-index predicates, which are specified over the
/// byte stream's natural (big-endian) reading order.
pub fn limb0_be(cell: &Cell) -> u64 {
    u64::from_be_bytes(cell[0..8].try_into().unwrap())
}

/// Bytewise XOR of two cells.
pub fn xor_cells(a: &Cell, b: &Cell) -> Cell {
    let mut out = [0u8; CELL_BYTES];
    for i in 0..CELL_BYTES {
        out[i] = a[i] ^ b[i];
    }
    out
}
