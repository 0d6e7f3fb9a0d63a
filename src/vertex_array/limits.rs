// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*!
Out-of-bounds vertex fetch protection.

A draw of `n` vertices reads `n * stride` bytes from every per-vertex binding. When a
bound range is shorter than that, the binding is redirected ("patched") to a region of
the scratch vertex buffer holding the range's bytes followed by fill bytes. Patched
regions are laid out back to back in binding order.
*/

use crate::bittricks::SlotMask;
use crate::error::Error;
use crate::imp::{Backend, VertexInputDevice};

use super::VertexArray;

impl VertexArray {
    /// Prepares bindings for a draw consuming `vertex_count` vertices, then [`validate`](Self::validate)s.
    ///
    /// Bindings that can serve the draw are untouched. Undersized ones are patched until
    /// [`restore_all`](Self::restore_all).
    pub fn limit_for_draw<D: Backend + ?Sized>(&mut self, device: &mut D, vertex_count: u32) -> Result<(), Error> {
        self.limit_vertex_buffers(device, vertex_count)?;
        self.validate(device);
        Ok(())
    }

    /// For draws the caller knows are safe: drops any patch, then [`validate`](Self::validate)s.
    pub fn skip_limit<D: VertexInputDevice + ?Sized>(&mut self, device: &mut D) {
        self.restore_all(device);
        self.validate(device);
    }

    /// Rebinds every patched binding to its own buffer.
    pub fn restore_all<D: VertexInputDevice + ?Sized>(&mut self, device: &mut D) {
        if self.buffers_patched.is_empty() {
            return;
        }
        for binding in self.buffers_patched {
            let vb = &self.buffers[binding];
            device.bind_vertex_buffer(binding, vb.buffer.handle, vb.buffer.offset, vb.stride);
        }
        self.buffers_patched = SlotMask::EMPTY;
    }

    fn limit_vertex_buffers<D: Backend + ?Sized>(&mut self, device: &mut D, vertex_count: u32) -> Result<(), Error> {
        if vertex_count as usize <= self.min_vertex_count {
            return Ok(());
        }

        //lay out every undersized binding first; growing the scratch buffer discards its contents
        let scratch_size: usize = self
            .buffers_bound
            .iter()
            .map(|binding| &self.buffers[binding])
            .filter(|vb| vb.buffer.size < vb.required_size(vertex_count))
            .map(|vb| vb.required_size(vertex_count))
            .sum();
        if scratch_size == 0 {
            return Ok(());
        }

        let _patch = logwise::perfwarn_begin!("VertexArray::limit_for_draw patch");
        let scratch = self.scratch_vertex.ensure_capacity(device, scratch_size)?;
        let fill_value = self.config.fill_value;
        let mut scratch_offset = 0;

        for binding in self.buffers_bound {
            let vb = self.buffers[binding];
            let required = vb.required_size(vertex_count);
            if vb.buffer.size >= required {
                continue;
            }

            device.copy(vb.buffer.handle, scratch, vb.buffer.offset, scratch_offset, vb.buffer.size)?;
            device.clear(
                scratch,
                scratch_offset + vb.buffer.size,
                required - vb.buffer.size,
                fill_value,
            )?;
            device.bind_vertex_buffer(binding, scratch, scratch_offset, vb.stride);
            logwise::debuginternal_sync!(
                "patched binding {binding}: {size} of {required} bytes at scratch offset {offset}",
                binding = binding,
                size = vb.buffer.size,
                required = required,
                offset = scratch_offset
            );

            scratch_offset += required;
            self.buffers_patched.set(binding);
        }
        Ok(())
    }
}
