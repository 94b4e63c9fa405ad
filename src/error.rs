//! Error types shared by every mmcrypt operation.

use core::fmt;

/// The three failure kinds `Ctx`'s operations can report.
///
/// `init` is abortive and does not use this type (see
/// [`crate::ctx::Ctx::init`]); every other operation returns `Result<_,
/// MmcryptError>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MmcryptError {
    /// `(iter, c, s)` fell outside `1 <= c <= 31, s >= 1, iter >= 1`, or the
    /// scratch-size product would overflow `usize`.
    InvalidParameters,
    /// Scratch allocation for `stretch` failed after the header block was
    /// already absorbed; the caller must discard `ctx` and start over.
    AllocationFailed,
    /// The underlying duplex reported a nonzero return from `absorb` or
    /// `squeeze`. Per spec, `ctx` must be treated as compromised.
    DuplexFailure,
}

impl fmt::Display for MmcryptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MmcryptError::InvalidParameters => write!(f, "invalid stretch parameters"),
            MmcryptError::AllocationFailed => write!(f, "scratch allocation failed"),
            MmcryptError::DuplexFailure => write!(f, "duplex sponge reported failure"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for MmcryptError {}
