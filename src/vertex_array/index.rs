// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
use crate::bindings::IndexRange;
use crate::error::Error;
use crate::imp::{Backend, VertexInputDevice};

use super::VertexArray;

impl VertexArray {
    /// Stores `range` and binds its buffer as the index source.
    pub fn set_index_range<D: VertexInputDevice + ?Sized>(&mut self, device: &mut D, range: IndexRange) {
        self.index_range = range;
        device.bind_index_buffer(range.handle);
    }

    pub fn index_range(&self) -> IndexRange {
        self.index_range
    }

    /// Copies the stored index range to the start of the scratch index buffer and binds that.
    ///
    /// Indexed draws then address the range from offset `0`.
    /// Undo with [`restore_range`](Self::restore_range).
    pub fn restrict_to_range<D: Backend + ?Sized>(&mut self, device: &mut D) -> Result<(), Error> {
        let range = self.index_range;
        if range.handle.is_null() {
            device.bind_index_buffer(range.handle);
            return Ok(());
        }
        let scratch = self.scratch_index.ensure_capacity(device, range.size)?;
        device.copy(range.handle, scratch, range.offset, 0, range.size)?;
        device.bind_index_buffer(scratch);
        Ok(())
    }

    /// Rebinds the stored range's own buffer.
    pub fn restore_range<D: VertexInputDevice + ?Sized>(&mut self, device: &mut D) {
        device.bind_index_buffer(self.index_range.handle);
    }
}
