//! Fallible buffer allocation for plan construction.

use alloc::vec::Vec;

use crate::fft::FftError;

/// Allocate a vector of `len` copies of `value`, reporting allocator
/// failure as [`FftError::AllocationFailed`] instead of aborting.
pub fn try_vec<V: Clone>(value: V, len: usize) -> Result<Vec<V>, FftError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| FftError::AllocationFailed { len })?;
    buf.resize(len, value);
    Ok(buf)
}
