// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*!
The vertex-input binding state of one vertex array object.

A [`VertexArray`] caches the last descriptors applied to each attribute and
buffer-binding slot and turns new descriptors into the minimal set of driver calls.
Before each draw it can also check whether any bound buffer is too small for the
requested vertex count and, if so, substitute a zero-padded copy.

Typical frame:

```
use vertex_fetch::{VertexArray, VertexArrayConfig};
use vertex_fetch::bindings::{AttributeDescriptor, BufferBindingDescriptor, BufferRange, VertexFormat};
use vertex_fetch::imp::recording::RecordingDevice;

let mut device = RecordingDevice::new();
let positions = device.create_buffer_with(&[0u8; 48]);

let mut vertex_array = VertexArray::new(&mut device, VertexArrayConfig::default());
vertex_array.bind(&mut device);
vertex_array.set_buffers(&mut device, &[
    BufferBindingDescriptor::new(BufferRange::new(positions, 0, 48), 12),
]);
vertex_array.set_attributes(&mut device, &[
    AttributeDescriptor::new(VertexFormat::Float32x3, 0, 0),
]);

// 4 vertices fit, so this is the fast path
vertex_array.limit_for_draw(&mut device, 4).unwrap();
// ...issue the draw...

// 6 vertices do not fit: binding 0 is patched for this draw
vertex_array.limit_for_draw(&mut device, 6).unwrap();
assert!(vertex_array.buffers_patched().test(0));
// ...issue the draw...
vertex_array.restore_all(&mut device);

vertex_array.release(&mut device).unwrap();
```
*/

mod attributes;
mod buffers;
mod index;
mod limits;

use crate::bindings::vertex_layout::{MAX_VERTEX_ATTRIBS, MAX_VERTEX_BUFFERS};
use crate::bindings::{AttributeDescriptor, BufferBindingDescriptor, IndexRange};
use crate::bittricks::SlotMask;
use crate::config::VertexArrayConfig;
use crate::error::Error;
use crate::imp::{Backend, VertexArrayHandle, VertexInputDevice};
use crate::scratch::ScratchBuffer;

/// Vertex-fetch state for one vertex array object.
///
/// Not thread-safe by design of the underlying driver model: use it on the thread
/// that owns the graphics context, passing that context's device to each call.
#[derive(Debug)]
pub struct VertexArray {
    handle: VertexArrayHandle,
    config: VertexArrayConfig,

    //None until the slot is first written, so the first descriptor always applies
    attribs: [Option<AttributeDescriptor>; MAX_VERTEX_ATTRIBS],
    buffers: [BufferBindingDescriptor; MAX_VERTEX_BUFFERS],
    attrib_count: usize,
    buffer_count: usize,
    needs_attribs_update: bool,
    min_vertex_count: usize,

    attribs_enabled: SlotMask,
    buffers_bound: SlotMask,
    buffers_patched: SlotMask,

    index_range: IndexRange,
    scratch_index: ScratchBuffer,
    scratch_vertex: ScratchBuffer,

    released: bool,
}

impl VertexArray {
    /// Creates the driver-side vertex array object.
    ///
    /// Scratch storage is not allocated until a draw needs it.
    pub fn new<D: VertexInputDevice + ?Sized>(device: &mut D, config: VertexArrayConfig) -> Self {
        let handle = device.create_vertex_array();
        let growth = config.scratch_growth;
        logwise::trace_sync!(
            "VertexArray::new {name}",
            name = logwise::privacy::LogIt(&config.debug_name)
        );
        VertexArray {
            handle,
            config,
            attribs: [None; MAX_VERTEX_ATTRIBS],
            buffers: [BufferBindingDescriptor::unbound(); MAX_VERTEX_BUFFERS],
            attrib_count: 0,
            buffer_count: 0,
            needs_attribs_update: false,
            min_vertex_count: usize::MAX,
            attribs_enabled: SlotMask::EMPTY,
            buffers_bound: SlotMask::EMPTY,
            buffers_patched: SlotMask::EMPTY,
            index_range: IndexRange::null(),
            scratch_index: ScratchBuffer::new(growth, "index"),
            scratch_vertex: ScratchBuffer::new(growth, "vertex"),
            released: false,
        }
    }

    /// Makes this the driver's current vertex array.
    pub fn bind<D: VertexInputDevice + ?Sized>(&self, device: &mut D) {
        device.bind_vertex_array(self.handle);
    }

    pub fn handle(&self) -> VertexArrayHandle {
        self.handle
    }

    pub fn config(&self) -> &VertexArrayConfig {
        &self.config
    }

    /// Attribute slots passed to the most recent [`set_attributes`](Self::set_attributes).
    pub fn attrib_count(&self) -> usize {
        self.attrib_count
    }

    /// Buffer-binding slots passed to the most recent [`set_buffers`](Self::set_buffers).
    pub fn buffer_count(&self) -> usize {
        self.buffer_count
    }

    /// The largest vertex count every bound buffer can serve without patching.
    ///
    /// `usize::MAX` when no buffer is bound.
    pub fn min_fetchable_vertex_count(&self) -> usize {
        self.min_vertex_count
    }

    pub fn attribs_enabled(&self) -> SlotMask {
        self.attribs_enabled
    }

    pub fn buffers_bound(&self) -> SlotMask {
        self.buffers_bound
    }

    /// Buffer-binding slots currently redirected to scratch storage.
    pub fn buffers_patched(&self) -> SlotMask {
        self.buffers_patched
    }

    pub fn attribute(&self, index: usize) -> Option<&AttributeDescriptor> {
        self.attribs[index].as_ref()
    }

    pub fn buffer(&self, index: usize) -> &BufferBindingDescriptor {
        &self.buffers[index]
    }

    pub fn scratch_vertex_capacity(&self) -> usize {
        self.scratch_vertex.capacity()
    }

    pub fn scratch_index_capacity(&self) -> usize {
        self.scratch_index.capacity()
    }

    /// Deletes the scratch buffers and the vertex array object.
    pub fn release<D: Backend + ?Sized>(mut self, device: &mut D) -> Result<(), Error> {
        //mark first; on error the remaining storage is the backend's problem now
        self.released = true;
        let index = self.scratch_index.release(device);
        let vertex = self.scratch_vertex.release(device);
        device.delete_vertex_array(self.handle);
        logwise::trace_sync!(
            "VertexArray::release {name}",
            name = logwise::privacy::LogIt(&self.config.debug_name)
        );
        index.and(vertex)
    }
}

impl Drop for VertexArray {
    fn drop(&mut self) {
        if !self.released {
            logwise::warn_sync!(
                "VertexArray {name} dropped without release; its scratch buffers and vertex array object leak",
                name = logwise::privacy::LogIt(&self.config.debug_name)
            );
        }
    }
}
