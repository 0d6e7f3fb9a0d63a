// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
use crate::bindings::BufferBindingDescriptor;
use crate::bindings::BufferHandle;
use crate::bindings::vertex_layout::MAX_VERTEX_BUFFERS;
use crate::imp::VertexInputDevice;

use super::VertexArray;

impl VertexArray {
    /// Replaces the descriptors of buffer-binding slots `0..descriptors.len()`.
    ///
    /// Bound slots are always re-issued; a null handle unbinds a slot that was bound.
    /// Slots past `descriptors.len()` keep whatever they held. Attributes that depend on
    /// changed slots are re-synchronized by the next [`validate`](Self::validate).
    ///
    /// # Panics
    /// If more than [`MAX_VERTEX_BUFFERS`] descriptors are passed.
    pub fn set_buffers<D: VertexInputDevice + ?Sized>(
        &mut self,
        device: &mut D,
        descriptors: &[BufferBindingDescriptor],
    ) {
        assert!(
            descriptors.len() <= MAX_VERTEX_BUFFERS,
            "{} vertex buffers exceed the {MAX_VERTEX_BUFFERS} binding slots",
            descriptors.len()
        );
        let mut min_vertex_count = usize::MAX;

        for (binding, vb) in descriptors.iter().enumerate() {
            if vb.is_bound() {
                min_vertex_count = min_vertex_count.min(vb.fetchable_vertex_count());

                logwise::trace_sync!(
                    "bind vertex buffer {binding} stride {stride}",
                    binding = binding,
                    stride = vb.stride
                );
                device.bind_vertex_buffer(binding, vb.buffer.handle, vb.buffer.offset, vb.stride);
                device.set_binding_divisor(binding, vb.divisor);
                self.buffers_bound.set(binding);
            } else if self.buffers_bound.test(binding) {
                device.bind_vertex_buffer(binding, BufferHandle::NULL, 0, 0);
                self.buffers_bound.clear(binding);
            }
            //whatever was patched here has just been replaced
            self.buffers_patched.clear(binding);
            self.buffers[binding] = *vb;
        }

        self.buffer_count = descriptors.len();
        self.min_vertex_count = min_vertex_count;
        self.needs_attribs_update = true;
        logwise::debuginternal_sync!(
            "set_buffers: {count} slots, min fetchable vertex count {min}",
            count = descriptors.len(),
            min = min_vertex_count
        );
    }
}
