//! Duplex sponge adapter.
//!
//! Wraps a Keccak-*f*[1600] permutation ([`keccak::f1600`]) as the single
//! mutable sponge object spec.md §4.1 calls `DuplexState`, exposing one
//! operation: `Duplexing(state, in, out)`. Padding, rate/capacity split,
//! and the permutation itself are this crate's own construction — spec.md
//! treats the real `KeccakDuplex`/`KeccakNISTInterface` pairing as an
//! external collaborator out of scope for this repository (see
//! SPEC_FULL.md §2a).

use crate::error::MmcryptError;

/// Public bits per `Duplexing` call. The only rate this crate constructs.
pub const RATE_BITS: usize = 576;
/// Hidden bits per `Duplexing` call. The only capacity this crate constructs.
pub const CAPACITY_BITS: usize = 1024;
/// `RATE_BITS / 8`.
pub const RATE_BYTES: usize = RATE_BITS / 8;
/// Total Keccak-*f*[1600] state size in bytes.
const STATE_BYTES: usize = 200;
/// Total Keccak-*f*[1600] state size in 64-bit lanes.
const STATE_WORDS: usize = 25;

/// One 512-bit block, the unit `stretch` absorbs and squeezes throughout.
pub const BLOCK_BYTES: usize = 64;

/// A single Keccak-*f*[1600] duplex, rate 576 / capacity 1024.
///
/// `Ctx` owns one; `stretch` owns two more (`S1`, `S2`) for the duration of
/// a single call. Zeroized on drop so every exit path — success, an early
/// `?`, or a panic unwind — clears the state without relying on the caller
/// to remember to do so.
#[derive(Clone, zeroize::Zeroize, zeroize::ZeroizeOnDrop)]
pub struct DuplexState {
    state: [u64; STATE_WORDS],
}

impl DuplexState {
    /// The only construction this crate permits: rate 576, capacity 1024.
    ///
    /// Spec.md models a failing `InitDuplex` as abortive; this constructor
    /// can't fail because it only ever builds the one permitted rate/capacity
    /// split, so there is nothing left to abort on.
    pub fn init_duplex() -> Self {
        Self {
            state: [0u64; STATE_WORDS],
        }
    }

    /// Largest input this adapter accepts per call.
    ///
    /// The pad10*1 frame needs at least one byte of room in every call, so
    /// the practical cap is `RATE_BYTES - 1` (568 of the 576 rate bits),
    /// comfortably inside the `rate - 4` bits spec.md §4.1 documents as the
    /// reference's typical requirement.
    pub const MAX_ABSORB_BYTES: usize = RATE_BYTES - 1;

    /// `Duplexing(state, in_bits=8*input.len(), out_bits=8*output.len())`.
    ///
    /// Absorbs `input` (padded with pad10*1 into one rate-sized block),
    /// permutes once, then fills `output` from the permuted rate portion.
    /// Byte-addressed per spec.md §6: bit-lengths are always `8 *
    /// byte_length`, so this crate never need track a sub-byte length.
    pub fn duplexing(&mut self, input: &[u8], output: &mut [u8]) -> Result<(), MmcryptError> {
        if input.len() > Self::MAX_ABSORB_BYTES || output.len() > RATE_BYTES {
            return Err(MmcryptError::DuplexFailure);
        }

        let mut block = [0u8; RATE_BYTES];
        block[..input.len()].copy_from_slice(input);
        block[input.len()] ^= 0x01;
        block[RATE_BYTES - 1] ^= 0x80;

        let state_bytes: &mut [u8; STATE_BYTES] = bytemuck::cast_mut(&mut self.state);
        for (s, b) in state_bytes.iter_mut().zip(block.iter()) {
            *s ^= b;
        }

        keccak::f1600(&mut self.state);

        let state_bytes: &[u8; STATE_BYTES] = bytemuck::cast_ref(&self.state);
        output.copy_from_slice(&state_bytes[..output.len()]);
        Ok(())
    }

    /// Convenience: absorb-only call (`Duplexing(state, in, ∅, 0)`).
    pub fn absorb(&mut self, input: &[u8]) -> Result<(), MmcryptError> {
        self.duplexing(input, &mut [])
    }

    /// Convenience: squeeze-only call (`Duplexing(state, ∅, 0, out, n)`).
    pub fn squeeze(&mut self, output: &mut [u8]) -> Result<(), MmcryptError> {
        self.duplexing(&[], output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplexing_is_deterministic() {
        let mut a = DuplexState::init_duplex();
        let mut b = DuplexState::init_duplex();
        let mut out_a = [0u8; 32];
        let mut out_b = [0u8; 32];
        a.absorb(b"hello").unwrap();
        b.absorb(b"hello").unwrap();
        a.squeeze(&mut out_a).unwrap();
        b.squeeze(&mut out_b).unwrap();
        assert_eq!(out_a, out_b);
    }

    #[test]
    fn framing_distinguishes_ab_from_a_then_b() {
        let mut joint = DuplexState::init_duplex();
        joint.absorb(b"ab").unwrap();
        let mut joint_out = [0u8; 32];
        joint.squeeze(&mut joint_out).unwrap();

        let mut split = DuplexState::init_duplex();
        split.absorb(b"a").unwrap();
        split.absorb(b"b").unwrap();
        let mut split_out = [0u8; 32];
        split.squeeze(&mut split_out).unwrap();

        assert_ne!(joint_out, split_out);
    }

    #[test]
    fn consecutive_squeezes_advance_the_sponge() {
        let mut d = DuplexState::init_duplex();
        d.absorb(b"seed").unwrap();
        let mut k1 = [0u8; 64];
        let mut k2 = [0u8; 64];
        d.squeeze(&mut k1).unwrap();
        d.squeeze(&mut k2).unwrap();
        assert_ne!(k1, k2);
    }

    #[test]
    fn rejects_oversized_absorb() {
        let mut d = DuplexState::init_duplex();
        let big = [0u8; RATE_BYTES];
        assert!(d.absorb(&big).is_err());
    }

    #[test]
    fn accepts_max_absorb_len() {
        let mut d = DuplexState::init_duplex();
        let max = [0x42u8; DuplexState::MAX_ABSORB_BYTES];
        assert!(d.absorb(&max).is_ok());
    }
}
