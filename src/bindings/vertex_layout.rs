// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Vertex input layout descriptions.
//!
//! A draw reads vertex data through two tables of fixed-capacity slots:
//!
//! * **Buffer-binding slots** ([`BufferBindingDescriptor`]) say which buffer range
//!   supplies data, the byte stride between elements, and the instancing divisor.
//! * **Attribute slots** ([`AttributeDescriptor`]) say which buffer-binding slot an
//!   attribute reads from, at what offset within each element, and in which format.
//!
//! # Example
//!
//! ```
//! use vertex_fetch::bindings::{AttributeDescriptor, BufferBindingDescriptor, BufferHandle, BufferRange, VertexFormat};
//!
//! // Interleaved position (3 floats) + color (4 bytes) in one buffer
//! let buffer = BufferBindingDescriptor::new(BufferRange::new(BufferHandle(7), 0, 1600), 16);
//! let position = AttributeDescriptor::new(VertexFormat::Float32x3, 0, 0);
//! let color = AttributeDescriptor::new(VertexFormat::Unorm8x4, 12, 0);
//!
//! assert_eq!(buffer.fetchable_vertex_count(), 100);
//! assert!(!position.is_zero);
//! assert_ne!(position, color);
//! ```

use crate::bindings::buffer_range::BufferRange;
use crate::bindings::vertex_formats::VertexFormat;

/// Number of attribute slots.
pub const MAX_VERTEX_ATTRIBS: usize = 16;
/// Number of buffer-binding slots.
pub const MAX_VERTEX_BUFFERS: usize = 16;

/// Describes one vertex attribute slot.
///
/// Compared by value against the cached copy to decide whether the driver needs an update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct AttributeDescriptor {
    pub format: VertexFormat,
    /// Byte offset within an element of the source buffer.
    pub offset: u32,
    /// Index of the buffer-binding slot this attribute fetches from.
    pub buffer_index: u32,
    /// The shader reads a constant instead of fetching memory.
    pub is_zero: bool,
}

impl AttributeDescriptor {
    pub const fn new(format: VertexFormat, offset: u32, buffer_index: u32) -> Self {
        AttributeDescriptor {
            format,
            offset,
            buffer_index,
            is_zero: false,
        }
    }

    /// An attribute that is not fetched; the shader sees the fallback constant.
    pub const fn zero() -> Self {
        AttributeDescriptor {
            format: VertexFormat::Float32x1,
            offset: 0,
            buffer_index: 0,
            is_zero: true,
        }
    }
}

/// Describes one buffer-binding slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BufferBindingDescriptor {
    /// A null handle means the slot is unbound.
    pub buffer: BufferRange,
    /// Byte distance between consecutive elements.
    pub stride: u32,
    /// Instancing divisor; `0` advances per vertex.
    pub divisor: u32,
}

impl BufferBindingDescriptor {
    pub const fn new(buffer: BufferRange, stride: u32) -> Self {
        BufferBindingDescriptor {
            buffer,
            stride,
            divisor: 0,
        }
    }

    pub const fn with_divisor(mut self, divisor: u32) -> Self {
        self.divisor = divisor;
        self
    }

    pub const fn unbound() -> Self {
        BufferBindingDescriptor {
            buffer: BufferRange::null(),
            stride: 0,
            divisor: 0,
        }
    }

    #[inline]
    pub const fn is_bound(&self) -> bool {
        !self.buffer.handle.is_null()
    }

    /// How many whole elements the range holds; `0` when the stride is `0`.
    #[inline]
    pub const fn fetchable_vertex_count(&self) -> usize {
        if self.stride == 0 {
            0
        } else {
            self.buffer.size / self.stride as usize
        }
    }

    /// Bytes a draw of `vertex_count` vertices may read from this binding.
    #[inline]
    pub const fn required_size(&self, vertex_count: u32) -> usize {
        vertex_count as usize * self.stride as usize
    }
}
