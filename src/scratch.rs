// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*!
Privately owned, monotonically growing buffers.

The vertex array keeps two of these: one for index sub-ranges and one for padded
vertex data. Storage is created on first use and never shrinks.
*/

use crate::bindings::BufferHandle;
use crate::config::ScratchGrowth;
use crate::error::Error;
use crate::imp::BufferManager;

#[derive(Debug)]
pub(crate) struct ScratchBuffer {
    handle: BufferHandle,
    capacity: usize,
    growth: ScratchGrowth,
    label: &'static str,
}

impl ScratchBuffer {
    pub(crate) fn new(growth: ScratchGrowth, label: &'static str) -> Self {
        ScratchBuffer {
            handle: BufferHandle::NULL,
            capacity: 0,
            growth,
            label,
        }
    }

    pub(crate) fn handle(&self) -> BufferHandle {
        self.handle
    }

    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    /// Makes the buffer at least `size` bytes and returns its handle.
    ///
    /// Growing does not preserve contents.
    pub(crate) fn ensure_capacity<B: BufferManager + ?Sized>(
        &mut self,
        buffers: &mut B,
        size: usize,
    ) -> Result<BufferHandle, Error> {
        if size <= self.capacity && !self.handle.is_null() {
            return Ok(self.handle);
        }
        let new_capacity = self.growth.capacity_for(size.max(self.capacity));
        if self.handle.is_null() {
            self.handle = buffers.create(new_capacity)?;
        } else {
            buffers.resize(self.handle, new_capacity)?;
        }
        logwise::debuginternal_sync!(
            "scratch {label} grew {old} -> {new} bytes",
            label = logwise::privacy::LogIt(&self.label),
            old = self.capacity,
            new = new_capacity
        );
        self.capacity = new_capacity;
        Ok(self.handle)
    }

    /// Deletes the storage if it was ever created.
    pub(crate) fn release<B: BufferManager + ?Sized>(&mut self, buffers: &mut B) -> Result<(), Error> {
        if !self.is_allocated() {
            return Ok(());
        }
        let handle = std::mem::replace(&mut self.handle, BufferHandle::NULL);
        self.capacity = 0;
        buffers.delete(handle)
    }

    pub(crate) fn is_allocated(&self) -> bool {
        !self.handle.is_null()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imp::recording::{DeviceCall, RecordingDevice};

    #[test]
    fn created_lazily_then_grows_only() {
        let mut device = RecordingDevice::new();
        let mut scratch = ScratchBuffer::new(ScratchGrowth::Exact, "test");
        assert!(!scratch.is_allocated());

        let h = scratch.ensure_capacity(&mut device, 80).unwrap();
        assert_eq!(scratch.capacity(), 80);
        assert_eq!(device.take_calls(), vec![DeviceCall::CreateBuffer { buffer: h, size: 80 }]);

        //smaller request is free
        assert_eq!(scratch.ensure_capacity(&mut device, 16).unwrap(), h);
        assert!(device.calls().is_empty());
        assert_eq!(scratch.capacity(), 80);

        scratch.ensure_capacity(&mut device, 100).unwrap();
        assert_eq!(device.take_calls(), vec![DeviceCall::ResizeBuffer { buffer: h, size: 100 }]);
        assert_eq!(scratch.capacity(), 100);
    }

    #[test]
    fn zero_size_request_still_allocates() {
        let mut device = RecordingDevice::new();
        let mut scratch = ScratchBuffer::new(ScratchGrowth::Exact, "test");
        let h = scratch.ensure_capacity(&mut device, 0).unwrap();
        assert!(!h.is_null());
        assert_eq!(device.buffer_contents(h).map(|c| c.len()), Some(0));
    }

    #[test]
    fn power_of_two_growth() {
        let mut device = RecordingDevice::new();
        let mut scratch = ScratchBuffer::new(ScratchGrowth::PowerOfTwo, "test");
        scratch.ensure_capacity(&mut device, 80).unwrap();
        assert_eq!(scratch.capacity(), 128);
        scratch.ensure_capacity(&mut device, 120).unwrap();
        assert_eq!(device.count_calls(|c| matches!(c, DeviceCall::ResizeBuffer { .. })), 0);
    }

    #[test]
    fn release_once() {
        let mut device = RecordingDevice::new();
        let mut scratch = ScratchBuffer::new(ScratchGrowth::Exact, "test");
        //never created: nothing to delete
        scratch.release(&mut device).unwrap();
        assert!(device.calls().is_empty());

        let h = scratch.ensure_capacity(&mut device, 4).unwrap();
        scratch.release(&mut device).unwrap();
        scratch.release(&mut device).unwrap();
        assert_eq!(device.count_calls(|c| *c == DeviceCall::DeleteBuffer(h)), 1);
        assert_eq!(device.live_buffer_count(), 0);
    }
}
