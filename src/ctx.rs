//! The `Ctx` lifecycle: `init`, `absorb`, `squeeze`, `destroy`.

use crate::duplex::DuplexState;
use crate::error::MmcryptError;

/// Owns the one duplex sponge every derivation is built around.
///
/// Not safe for concurrent use: every operation mutates the owned sponge.
/// Drive it `init -> absorb* -> stretch -> squeeze*`; see
/// [`crate::stretch::stretch`] for the memory-hard step in between.
pub struct Ctx {
    pub(crate) sponge: DuplexState,
}

impl Ctx {
    /// Constructs a fresh sponge at rate 576 / capacity 1024.
    ///
    /// Spec.md §7 treats a failing `InitDuplex` as abortive: "a broken
    /// primitive cannot be recovered from and must never silently yield
    /// zero output." [`DuplexState::init_duplex`] can't fail for the one
    /// rate/capacity pair this crate constructs, so there is nothing left
    /// to abort on here; the panic-on-failure contract is preserved in
    /// spirit by `init_duplex` being infallible rather than silently
    /// degrading.
    pub fn init() -> Self {
        Ctx {
            sponge: DuplexState::init_duplex(),
        }
    }

    /// `Duplexing(sponge, data, 8*data.len(), None, 0)`.
    ///
    /// A single duplex call per invocation: `absorb("ab")` is not the same
    /// as `absorb("a"); absorb("b")` (each call is its own pad10*1 frame).
    /// Accepts up to [`DuplexState::MAX_ABSORB_BYTES`] per call.
    pub fn absorb(&mut self, data: &[u8]) -> Result<(), MmcryptError> {
        self.sponge.absorb(data)
    }

    /// `Duplexing(sponge, None, 0, out, 8*out.len())`.
    ///
    /// A single duplex call per invocation: two consecutive `squeeze`
    /// calls are not equivalent to one call of the combined length.
    pub fn squeeze(&mut self, out: &mut [u8]) -> Result<(), MmcryptError> {
        self.sponge.squeeze(out)
    }

    /// Overwrites `self` with zero bytes.
    ///
    /// `Ctx` also implements `Drop` via `DuplexState`'s `ZeroizeOnDrop`, so
    /// this is a way to force the erasure early and deterministically
    /// rather than the only way it happens.
    pub fn destroy(self) {
        drop(self);
    }
}
