//! The `T1`/`T2` scratch tables and their fill order.
//!
//! spec.md §9 flags the table's row/column grouping and materialization
//! order as an open design choice. SPEC_FULL.md §3 resolves it: a table is
//! a flat, row-major chain of `N * s` cells (`N = 2^c` rows of `s` columns
//! each). spec.md §4.4.3 and `original_source/mmcrypt.c`'s table-fill loop
//! couple the two tables while filling them: each cell squeezed into `T1`
//! is squeezed in the same `Duplexing` call that absorbs a chosen cell out
//! of `T2` into `S1` (and symmetrically for `T2`/`S2`), so `T1` and `T2`
//! are mutually dependent — neither table can be materialized on its own.
//!
//! The absorbed cross-table cell is chosen by a doubling-window "wrap
//! index" rather than always the immediately preceding row, the same trick
//! yescrypt and Lyra2 use to keep every cell dependent on a cell an
//! unpredictable but bounded distance back: the candidate window
//! `[idx-imask-1, idx)` roughly doubles in size every time `idx` doubles.

use alloc::vec::Vec;

use super::cell::{limb0_be, Cell, CELL_BYTES};
use crate::duplex::DuplexState;
use crate::error::MmcryptError;

/// A flat `N * s`-cell scratch table, row-major (`row * s + col`).
pub struct Table {
    cells: Vec<Cell>,
    s: usize,
}

impl Table {
    /// Allocates `rows * s` zeroed cells, failing with
    /// [`MmcryptError::AllocationFailed`] instead of aborting on OOM.
    pub fn try_new(rows: usize, s: usize) -> Result<Self, MmcryptError> {
        let total = rows
            .checked_mul(s)
            .ok_or(MmcryptError::InvalidParameters)?;
        let mut cells = Vec::new();
        cells
            .try_reserve_exact(total)
            .map_err(|_| MmcryptError::AllocationFailed)?;
        cells.resize(total, [0u8; CELL_BYTES]);
        Ok(Table { cells, s })
    }

    #[inline]
    pub fn s(&self) -> usize {
        self.s
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.cells.len() / self.s
    }

    #[inline]
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        &self.cells[row * self.s + col]
    }

    #[inline]
    pub fn cell_mut(&mut self, row: usize, col: usize) -> &mut Cell {
        &mut self.cells[row * self.s + col]
    }
}

impl Drop for Table {
    fn drop(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.iter_mut().for_each(|b| *b = 0);
        }
    }
}

/// Doubling-window wrap index: substitutes for the raw predecessor at
/// `idx - 1`, chosen from the growing window `[idx-imask-1, idx)` by the
/// selecting cell's big-endian limb 0.
fn wrap_index(selector_limb0: u64, imask: u64, idx: u64) -> usize {
    ((selector_limb0 & imask) + idx - imask - 1) as usize
}

/// Jointly fills `t1` and `t2`, coupling the two tables per spec.md §4.4.3:
/// each cell squeezed into `t1` is squeezed in the same `Duplexing` call
/// that absorbs a chosen cell out of `t2` into `s1` (and symmetrically,
/// `t2`'s fill absorbs out of `t1` into `s2`), so neither table can be
/// materialized independently of the other.
///
/// The very first cell of each table (`idx == 0`) has no cross-table
/// predecessor yet and is filled by a squeeze-only call. Every later cell
/// absorbs the other table's cell at the doubling-window wrap index
/// instead of always the immediately preceding row.
pub fn materialize(
    t1: &mut Table,
    t2: &mut Table,
    s1: &mut DuplexState,
    s2: &mut DuplexState,
) -> Result<(), MmcryptError> {
    debug_assert_eq!(t1.cells.len(), t2.cells.len());
    let total = t1.cells.len();
    if total == 0 {
        return Ok(());
    }

    let mut seed1 = [0u8; CELL_BYTES];
    s1.squeeze(&mut seed1)?;
    t1.cells[0] = seed1;

    let mut seed2 = [0u8; CELL_BYTES];
    s2.squeeze(&mut seed2)?;
    t2.cells[0] = seed2;

    let mut imask = 0u64;
    for idx in 1..total {
        let idx_u64 = idx as u64;
        imask |= idx_u64 >> 1;

        let w2 = wrap_index(limb0_be(&t2.cells[idx - 1]), imask, idx_u64);
        debug_assert!(w2 < idx, "wrap index must reference an already-filled cell");
        let cross_from_t2 = t2.cells[w2];
        let mut cell1 = [0u8; CELL_BYTES];
        s1.duplexing(&cross_from_t2, &mut cell1)?;
        t1.cells[idx] = cell1;

        let w1 = wrap_index(limb0_be(&t1.cells[idx - 1]), imask, idx_u64);
        debug_assert!(w1 < idx, "wrap index must reference an already-filled cell");
        let cross_from_t1 = t1.cells[w1];
        let mut cell2 = [0u8; CELL_BYTES];
        s2.duplexing(&cross_from_t1, &mut cell2)?;
        t2.cells[idx] = cell2;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_index_always_stays_in_bounds() {
        let mut imask = 0u64;
        for idx in 1u64..10_000 {
            imask |= idx >> 1;
            for limb0 in [0u64, 1, u64::MAX, 0xAAAA_AAAA_AAAA_AAAA] {
                let w = (limb0 & imask) + idx - imask - 1;
                assert!(w < idx, "idx={idx} limb0={limb0:#x} w={w}");
            }
        }
    }

    #[test]
    fn materialize_fills_every_slot_and_zeroizes_on_drop() {
        let mut s1 = DuplexState::init_duplex();
        s1.absorb(b"table-test-1").unwrap();
        let mut s2 = DuplexState::init_duplex();
        s2.absorb(b"table-test-2").unwrap();
        let mut t1 = Table::try_new(4, 3).unwrap();
        let mut t2 = Table::try_new(4, 3).unwrap();
        materialize(&mut t1, &mut t2, &mut s1, &mut s2).unwrap();

        for table in [&t1, &t2] {
            let all_zero_count = (0..table.rows())
                .flat_map(|r| (0..table.s()).map(move |c| (r, c)))
                .filter(|&(r, c)| *table.cell(r, c) == [0u8; CELL_BYTES])
                .count();
            // Extremely unlikely that a squeeze-derived cell is ever all zero.
            assert_eq!(all_zero_count, 0);
        }
    }

    #[test]
    fn materialize_is_deterministic_given_the_same_sponge_state() {
        let mut a1 = DuplexState::init_duplex();
        a1.absorb(b"seed-1").unwrap();
        let mut a2 = DuplexState::init_duplex();
        a2.absorb(b"seed-2").unwrap();
        let mut ta1 = Table::try_new(4, 2).unwrap();
        let mut ta2 = Table::try_new(4, 2).unwrap();
        materialize(&mut ta1, &mut ta2, &mut a1, &mut a2).unwrap();

        let mut b1 = DuplexState::init_duplex();
        b1.absorb(b"seed-1").unwrap();
        let mut b2 = DuplexState::init_duplex();
        b2.absorb(b"seed-2").unwrap();
        let mut tb1 = Table::try_new(4, 2).unwrap();
        let mut tb2 = Table::try_new(4, 2).unwrap();
        materialize(&mut tb1, &mut tb2, &mut b1, &mut b2).unwrap();

        for r in 0..4 {
            for c in 0..2 {
                assert_eq!(ta1.cell(r, c), tb1.cell(r, c));
                assert_eq!(ta2.cell(r, c), tb2.cell(r, c));
            }
        }
    }

    #[test]
    fn t1_fill_depends_on_t2_and_vice_versa() {
        // Changing only s2's seed input must ripple into t1's later cells
        // too, since t1's fill absorbs cells out of t2.
        let mut s1 = DuplexState::init_duplex();
        s1.absorb(b"shared").unwrap();
        let mut s2 = DuplexState::init_duplex();
        s2.absorb(b"variant-a").unwrap();
        let mut t1 = Table::try_new(4, 2).unwrap();
        let mut t2 = Table::try_new(4, 2).unwrap();
        materialize(&mut t1, &mut t2, &mut s1, &mut s2).unwrap();

        let mut s1b = DuplexState::init_duplex();
        s1b.absorb(b"shared").unwrap();
        let mut s2b = DuplexState::init_duplex();
        s2b.absorb(b"variant-b").unwrap();
        let mut t1b = Table::try_new(4, 2).unwrap();
        let mut t2b = Table::try_new(4, 2).unwrap();
        materialize(&mut t1b, &mut t2b, &mut s1b, &mut s2b).unwrap();

        assert_eq!(t1.cell(0, 0), t1b.cell(0, 0), "seed cell has no cross-table input yet");
        let t1_diverges = (1..4).any(|r| t1.cell(r, 0) != t1b.cell(r, 0) || t1.cell(r, 1) != t1b.cell(r, 1));
        assert!(t1_diverges, "t1 must depend on t2's sponge, not just its own");
    }
}
