//! Drawing the per-column key schedule: spec.md §4.4.2 step 3.
//!
//! Each column gets its own `2c`-bit LFSR register, seeded by squeezing one
//! 64-bit word per column from the auxiliary sponge and folding it down to
//! `2c` bits. The low bit is forced to `1` so [`crate::gf::gfmul`]'s
//! multiplicative order (odd elements only, per the field's structure)
//! is never degenerate.

use alloc::vec::Vec;

use crate::duplex::DuplexState;
use crate::error::MmcryptError;

/// Squeezes and folds `s` schedule registers out of `sponge`, one per
/// table column.
///
/// Each register is an 8-byte big-endian squeeze output, right-shifted by
/// `64 - 2c` bits to keep only the top `2c` bits, then OR'd with `1`.
pub fn draw_schedule(
    sponge: &mut DuplexState,
    c: u32,
    s: usize,
) -> Result<Vec<u64>, MmcryptError> {
    let shift = 64 - 2 * c;
    let mut schedule = Vec::new();
    schedule
        .try_reserve_exact(s)
        .map_err(|_| MmcryptError::AllocationFailed)?;

    let mut word = [0u8; 8];
    for _ in 0..s {
        sponge.squeeze(&mut word)?;
        let raw = u64::from_be_bytes(word);
        schedule.push((raw >> shift) | 1);
    }
    Ok(schedule)
}
