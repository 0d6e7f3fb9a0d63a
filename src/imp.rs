// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*!
Interfaces to the graphics backend.

The vertex array never talks to a graphics API directly. It issues binding-state
changes through [`VertexInputDevice`] and manipulates its private scratch storage
through [`BufferManager`]. Both take effect immediately and in issue order.

[`recording::RecordingDevice`] implements both and records what it was asked to do.
With the `backend_wgpu` feature, `WgpuBufferManager` provides buffer storage on wgpu.
*/

use crate::bindings::{BufferHandle, NumericType};
use crate::error::Error;

pub mod recording;

#[cfg(feature = "backend_wgpu")]
mod wgpu_buffers;
#[cfg(feature = "backend_wgpu")]
pub use wgpu_buffers::WgpuBufferManager;

/// Handle to a driver-side vertex array object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct VertexArrayHandle(pub u32);

/// Vertex-fetch binding state of the graphics driver.
///
/// Slot indices passed here are always within the fixed slot capacities.
pub trait VertexInputDevice {
    fn create_vertex_array(&mut self) -> VertexArrayHandle;
    fn bind_vertex_array(&mut self, vertex_array: VertexArrayHandle);
    fn delete_vertex_array(&mut self, vertex_array: VertexArrayHandle);

    /// Points buffer-binding slot `binding` at `buffer`, starting at `offset`.
    ///
    /// A null `buffer` unbinds the slot.
    fn bind_vertex_buffer(&mut self, binding: usize, buffer: BufferHandle, offset: usize, stride: u32);
    fn set_binding_divisor(&mut self, binding: usize, divisor: u32);

    /// Float-path format: float, normalized, or scaled integer data.
    fn set_attrib_format(
        &mut self,
        attrib: usize,
        components: u8,
        numeric: NumericType,
        normalized: bool,
        offset: u32,
    );
    /// Integer-path format: the shader sees raw integers.
    fn set_attrib_integer_format(&mut self, attrib: usize, components: u8, numeric: NumericType, offset: u32);
    fn set_attrib_binding(&mut self, attrib: usize, binding: usize);

    fn enable_attrib(&mut self, attrib: usize);
    fn disable_attrib(&mut self, attrib: usize);
    /// The value a disabled attribute reads.
    fn set_attrib_constant(&mut self, attrib: usize, value: [f32; 4]);

    /// Makes `buffer` the active index source.
    fn bind_index_buffer(&mut self, buffer: BufferHandle);
}

/// Everything a [`VertexArray`](crate::VertexArray) needs from the backend.
pub trait Backend: VertexInputDevice + BufferManager {}
impl<T: VertexInputDevice + BufferManager + ?Sized> Backend for T {}

/// Creates and fills buffers on behalf of the vertex array.
pub trait BufferManager {
    /// Creates a buffer of `size` bytes with unspecified contents.
    fn create(&mut self, size: usize) -> Result<BufferHandle, Error>;
    /// Reallocates `buffer` to `size` bytes. Contents are not preserved.
    fn resize(&mut self, buffer: BufferHandle, size: usize) -> Result<(), Error>;
    fn copy(
        &mut self,
        src: BufferHandle,
        dst: BufferHandle,
        src_offset: usize,
        dst_offset: usize,
        size: usize,
    ) -> Result<(), Error>;
    /// Sets `size` bytes starting at `offset` to `value`.
    fn clear(&mut self, buffer: BufferHandle, offset: usize, size: usize, value: u8) -> Result<(), Error>;
    fn delete(&mut self, buffer: BufferHandle) -> Result<(), Error>;
}
