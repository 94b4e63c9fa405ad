//! mmcrypt: a memory-hard key-derivation function built on a Keccak duplex sponge.
//!
//! Callers drive a [`ctx::Ctx`] through `init -> absorb* -> stretch -> squeeze*`.
//! `stretch` is the memory-hard inner loop; see [`stretch`] for the cost
//! parameters and scratch-memory accounting.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod config;
pub mod ctx;
pub mod duplex;
pub mod error;
pub mod gf;
pub mod stretch;

pub use config::CostParams;
pub use ctx::Ctx;
pub use error::MmcryptError;
pub use stretch::stretch;
