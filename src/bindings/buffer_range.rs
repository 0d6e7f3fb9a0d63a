// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*!
Opaque buffer handles and byte ranges within them.

Handles are issued by a [`BufferManager`](crate::imp::BufferManager); this crate never
looks inside them.
*/

/// Opaque handle to a buffer owned by the buffer manager.
///
/// [`BufferHandle::NULL`] means "no buffer"; a binding with a null handle is unbound.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BufferHandle(pub u32);

impl BufferHandle {
    pub const NULL: BufferHandle = BufferHandle(0);

    #[inline]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }
}

/// A byte range of a buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BufferRange {
    pub handle: BufferHandle,
    /// Byte offset of the range within the buffer.
    pub offset: usize,
    /// Size of the range in bytes.
    pub size: usize,
}

impl BufferRange {
    pub const fn new(handle: BufferHandle, offset: usize, size: usize) -> Self {
        BufferRange {
            handle,
            offset,
            size,
        }
    }

    pub const fn null() -> Self {
        BufferRange {
            handle: BufferHandle::NULL,
            offset: 0,
            size: 0,
        }
    }
}

/// The region of a buffer used as the active index source.
pub type IndexRange = BufferRange;
