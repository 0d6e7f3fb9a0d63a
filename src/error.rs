// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
use crate::bindings::BufferHandle;

/// Failures reported by a [`BufferManager`](crate::imp::BufferManager).
///
/// Binding-state changes never fail; only operations that create or fill scratch
/// storage can surface one of these.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error("could not allocate a buffer of {requested} bytes")]
    OutOfMemory { requested: usize },
    #[error("unknown buffer handle {0:?}")]
    UnknownBuffer(BufferHandle),
    #[error("range {offset}..{offset}+{size} is outside buffer {handle:?} of {len} bytes")]
    OutOfRange {
        handle: BufferHandle,
        offset: usize,
        size: usize,
        len: usize,
    },
    #[error("offset or size {value} is not a multiple of the required alignment {alignment}")]
    Misaligned { value: usize, alignment: usize },
}
