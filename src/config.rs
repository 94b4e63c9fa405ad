//! Cost parameters for [`crate::stretch::stretch`].
//!
//! Mirrors this repository's existing configuration convention (see
//! `config::TogmConfig` in the wider project this crate split off from): a
//! plain struct the caller builds, with a `Default` impl and an explicit
//! validation step instead of three bare integers threaded through the API.

use crate::error::MmcryptError;

/// `(iter, c, s)` from spec.md §3–§4.4: outer iteration count, the
/// scratch-table size exponent (`N = 2^c` rows), and the column count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostParams {
    /// Number of outer `stretch` iterations.
    pub iter: u32,
    /// Scratch-table size exponent; `N = 2^c` rows. Must be `1..=31`.
    pub c: u32,
    /// Number of schedule columns / cells per row. Must be `>= 1`.
    pub s: u32,
}

impl Default for CostParams {
    /// The reference test harness's defaults (`original_source/mmcrypt-test.c`):
    /// `iter=1, c=7, s=337`.
    fn default() -> Self {
        CostParams {
            iter: 1,
            c: 7,
            s: 337,
        }
    }
}

impl CostParams {
    /// Total scratch bytes `stretch` would allocate for these parameters:
    /// `2 * 2^c * s * 64`.
    ///
    /// Returns `None` on overflow rather than panicking, so callers can
    /// size-check before committing to a `stretch` call.
    pub fn scratch_bytes(&self) -> Option<u64> {
        let n = 1u64.checked_shl(self.c)?;
        n.checked_mul(self.s as u64)?
            .checked_mul(64)?
            .checked_mul(2)
    }

    /// Validates `1 <= c <= 31`, `s >= 1`, `iter >= 1`, and that
    /// [`scratch_bytes`](Self::scratch_bytes) does not overflow.
    pub fn validate(&self) -> Result<(), MmcryptError> {
        if self.iter < 1 || self.c < 1 || self.c > 31 || self.s < 1 {
            return Err(MmcryptError::InvalidParameters);
        }
        if self.scratch_bytes().is_none() {
            return Err(MmcryptError::InvalidParameters);
        }
        Ok(())
    }
}
