//! The memory-hard inner loop: spec.md §4.4.1–§4.4.7.
//!
//! `stretch` is the part of this crate with the actual cost-bearing design:
//! given the absorbed pepper/salt/tag/password already sitting in `ctx`'s
//! sponge, it drives a data-dependent traversal over two `N * s`-cell
//! scratch tables, feeding the result back into the sponge so `squeeze`
//! afterwards yields keying material that required allocating and touching
//! every scratch cell to compute.
//!
//! Submodules split the kernel by concern, following how the reference
//! implementation's single `mmcrypt_stretch` function decomposes in
//! comments, if not in actual function boundaries: [`cell`] (the 512-bit
//! unit), [`schedule`] (per-column LFSR seeds), [`table`] (scratch
//! allocation and fill), [`mix`] (the diffusion kernel).

mod cell;
mod mix;
mod schedule;
mod table;

use alloc::vec::Vec;
use zeroize::Zeroizing;

use crate::config::CostParams;
use crate::ctx::Ctx;
use crate::duplex::DuplexState;
use crate::error::MmcryptError;
use cell::CELL_BYTES;
use table::Table;

/// How many mix steps fire between feedback absorbs into the main sponge.
///
/// Named after the reference implementation's `MMCRYPT_FRATE` constant.
/// Not secret and not a cost parameter; a fixed cadence that keeps the
/// sponge state moving during long per-column traversals instead of only
/// updating it once per column.
const FEEDBACK_RATE: u64 = 65521;

/// Runs the memory-hard stretch step over `ctx`'s already-absorbed state.
///
/// Allocates two scratch tables of `2^c` rows by `s` columns of 64-byte
/// cells each (see [`CostParams::scratch_bytes`] for the total), then for
/// `cost.iter` outer iterations: reseeds both auxiliary sponges and jointly
/// materializes both tables (each table's fill absorbs a cell out of the
/// *other* table into its own auxiliary sponge, so neither can be filled
/// independently), draws one LFSR schedule register per column, and
/// round-robins over every column's register one LFSR step at a time,
/// mixing table cells pairwise and periodically refreshing the feedback
/// accumulator via an in-place absorb-and-squeeze into `ctx`'s sponge,
/// until column 0's register completes one full multiplicative cycle. A
/// final feedback absorb closes out each outer iteration before the two
/// auxiliary sponges swap roles for the next one.
///
/// Every scratch buffer — both tables, the schedule, the feedback and
/// diffusion cells, the two auxiliary sponges — is zeroized on every exit
/// path, including an early `?` return, via `Drop`/`ZeroizeOnDrop`.
pub fn stretch(ctx: &mut Ctx, cost: CostParams) -> Result<(), MmcryptError> {
    cost.validate()?;
    log::debug!(
        "stretch: iter={} c={} s={} scratch_bytes={:?}",
        cost.iter,
        cost.c,
        cost.s,
        cost.scratch_bytes()
    );

    let rows = 1usize << cost.c;
    let s = cost.s as usize;

    absorb_header(ctx, &cost)?;

    let mut t1 = Table::try_new(rows, s)?;
    let mut t2 = Table::try_new(rows, s)?;

    let pol = crate::gf::GFPOL[cost.c as usize];
    let msb1 = 1u64 << (2 * cost.c);
    let xmask = (!0u64) << (64 - cost.c);
    let row_mask = (rows as u64) - 1;

    let mut s1 = DuplexState::init_duplex();
    let mut s2 = DuplexState::init_duplex();

    for iteration in 0..cost.iter {
        log::trace!("stretch: outer iteration {}/{}", iteration + 1, cost.iter);

        // spec.md §4.4.2 steps 1-2: each outer iteration absorbs a fresh
        // 512-bit draw from the main sponge into each auxiliary sponge
        // before that iteration's table materialization, rather than
        // seeding S1/S2 once and reusing stale state across iterations.
        seed_aux(ctx, &mut s1)?;
        seed_aux(ctx, &mut s2)?;

        table::materialize(&mut t1, &mut t2, &mut s1, &mut s2)?;

        let mut schedule = Zeroizing::new(schedule::draw_schedule(&mut ctx.sponge, cost.c, s)?);
        let k0 = schedule[0];
        let mut feedback = Zeroizing::new([0u8; CELL_BYTES]);
        let mut steps = 0u64;

        // spec.md §4.4.4: one shared outer loop sweeps every column's
        // register forward by one LFSR step per pass (round-robin, not one
        // column run to completion before the next starts), repeating the
        // whole sweep until column 0's register returns to its seed.
        loop {
            for col in 0..s {
                schedule[col] = crate::gf::gfmul(schedule[col], pol, msb1);
                let ka = ((schedule[col] >> cost.c) & row_mask) as usize;
                let kb = (schedule[col] & row_mask) as usize;
                let next_col = (col + 1) % s;

                let x1 = *t1.cell(ka, col);
                let x2 = *t2.cell(kb, col);

                // Two disjoint mutable borrows into the same table are not
                // expressible through `cell_mut` alone when `next_col ==
                // col` is possible (it is, when `s == 1`); copy out, mix,
                // write back instead of trying to borrow both at once.
                let mut y1 = *t1.cell(ka, next_col);
                let mut y2 = *t2.cell(kb, next_col);

                mix::mix(&mut feedback, xmask, &x1, &x2, &mut y1, &mut y2);

                *t1.cell_mut(ka, next_col) = y1;
                *t2.cell_mut(kb, next_col) = y2;

                steps += 1;
                if steps % FEEDBACK_RATE == 0 {
                    // spec.md §4.4.4 step 4: an in-place Duplexing that
                    // absorbs `feedback` and squeezes 512 bits back into it
                    // in the same call, not an absorb-only injection — the
                    // accumulator must be refreshed from the sponge here,
                    // not just keep growing from its own XOR-folds.
                    let feedback_in = *feedback;
                    ctx.sponge.duplexing(&feedback_in, &mut feedback)?;
                }
            }
            if schedule[0] == k0 {
                break;
            }
        }

        ctx.absorb(&feedback)?;
        core::mem::swap(&mut s1, &mut s2);
    }

    Ok(())
}

/// Absorbs `[FEEDBACK_RATE, iter, c, s, 0, 0, 0, 0]` as eight big-endian
/// 64-bit words, binding the cost parameters into the derivation before
/// any scratch memory is allocated.
fn absorb_header(ctx: &mut Ctx, cost: &CostParams) -> Result<(), MmcryptError> {
    let words: [u64; 8] = [
        FEEDBACK_RATE,
        cost.iter as u64,
        cost.c as u64,
        cost.s as u64,
        0,
        0,
        0,
        0,
    ];
    let mut header = Vec::new();
    header
        .try_reserve_exact(words.len() * 8)
        .map_err(|_| MmcryptError::AllocationFailed)?;
    for word in words {
        header.extend_from_slice(&word.to_be_bytes());
    }
    ctx.absorb(&header)
}

/// Seeds an auxiliary sponge from the main one, so each outer iteration's
/// table materialization is bound to the derivation's current state
/// without consuming the main sponge's own absorb/squeeze framing.
fn seed_aux(ctx: &mut Ctx, aux: &mut DuplexState) -> Result<(), MmcryptError> {
    let mut seed = [0u8; CELL_BYTES];
    ctx.squeeze(&mut seed)?;
    aux.absorb(&seed)
}
