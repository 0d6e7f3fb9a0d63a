// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Scratch buffer storage on wgpu.
//!
//! wgpu has no per-slot vertex-fetch state to mutate, so only the [`BufferManager`]
//! half of the backend lives here. Buffers are created with vertex, index and copy
//! usages so they can stand in for any caller buffer.

use std::collections::HashMap;

use wgpu::{BufferDescriptor, BufferUsages, CommandEncoderDescriptor};

use crate::bindings::BufferHandle;
use crate::error::Error;
use crate::imp::BufferManager;

const ALIGNMENT: usize = wgpu::COPY_BUFFER_ALIGNMENT as usize;

/// A [`BufferManager`] that owns `wgpu::Buffer`s.
///
/// Caller-owned buffers can be registered with [`insert`](Self::insert) so the vertex
/// array can copy out of them.
#[derive(Debug)]
pub struct WgpuBufferManager {
    device: wgpu::Device,
    queue: wgpu::Queue,
    buffers: HashMap<BufferHandle, wgpu::Buffer>,
    next_handle: u32,
    debug_name: String,
}

impl WgpuBufferManager {
    pub fn new(device: wgpu::Device, queue: wgpu::Queue, debug_name: &str) -> Self {
        WgpuBufferManager {
            device,
            queue,
            buffers: HashMap::new(),
            next_handle: 1,
            debug_name: debug_name.to_string(),
        }
    }

    /// Registers an existing buffer and returns its handle.
    pub fn insert(&mut self, buffer: wgpu::Buffer) -> BufferHandle {
        let handle = BufferHandle(self.next_handle);
        self.next_handle += 1;
        self.buffers.insert(handle, buffer);
        handle
    }

    pub fn get(&self, handle: BufferHandle) -> Option<&wgpu::Buffer> {
        self.buffers.get(&handle)
    }

    fn lookup(&self, handle: BufferHandle) -> Result<&wgpu::Buffer, Error> {
        self.buffers.get(&handle).ok_or(Error::UnknownBuffer(handle))
    }

    fn allocate(&self, size: usize) -> Result<wgpu::Buffer, Error> {
        //wgpu needs sizes in multiples of COPY_BUFFER_ALIGNMENT
        let allocated_size = size
            .checked_add(ALIGNMENT - 1)
            .map(|s| s & !(ALIGNMENT - 1))
            .ok_or(Error::OutOfMemory { requested: size })?;
        if allocated_size as u64 > self.device.limits().max_buffer_size {
            return Err(Error::OutOfMemory { requested: size });
        }
        Ok(self.device.create_buffer(&BufferDescriptor {
            label: Some(&self.debug_name),
            size: allocated_size as u64,
            usage: BufferUsages::VERTEX | BufferUsages::INDEX | BufferUsages::COPY_SRC | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }))
    }

    fn check_range(&self, handle: BufferHandle, offset: usize, size: usize) -> Result<(), Error> {
        let len = self.lookup(handle)?.size() as usize;
        match offset.checked_add(size) {
            Some(end) if end <= len => Ok(()),
            _ => Err(Error::OutOfRange {
                handle,
                offset,
                size,
                len,
            }),
        }
    }
}

fn check_aligned(values: &[usize]) -> Result<(), Error> {
    for &value in values {
        if value % ALIGNMENT != 0 {
            return Err(Error::Misaligned {
                value,
                alignment: ALIGNMENT,
            });
        }
    }
    Ok(())
}

impl BufferManager for WgpuBufferManager {
    fn create(&mut self, size: usize) -> Result<BufferHandle, Error> {
        let buffer = self.allocate(size)?;
        Ok(self.insert(buffer))
    }

    fn resize(&mut self, handle: BufferHandle, size: usize) -> Result<(), Error> {
        self.lookup(handle)?;
        let buffer = self.allocate(size)?;
        if let Some(old) = self.buffers.insert(handle, buffer) {
            old.destroy();
        }
        Ok(())
    }

    fn copy(
        &mut self,
        src: BufferHandle,
        dst: BufferHandle,
        src_offset: usize,
        dst_offset: usize,
        size: usize,
    ) -> Result<(), Error> {
        check_aligned(&[src_offset, dst_offset, size])?;
        self.check_range(src, src_offset, size)?;
        self.check_range(dst, dst_offset, size)?;
        if size == 0 {
            return Ok(());
        }
        let mut encoder = self.device.create_command_encoder(&CommandEncoderDescriptor {
            label: Some("vertex_fetch copy"),
        });
        encoder.copy_buffer_to_buffer(
            self.lookup(src)?,
            src_offset as u64,
            self.lookup(dst)?,
            dst_offset as u64,
            size as u64,
        );
        self.queue.submit(std::iter::once(encoder.finish()));
        Ok(())
    }

    fn clear(&mut self, handle: BufferHandle, offset: usize, size: usize, value: u8) -> Result<(), Error> {
        check_aligned(&[offset, size])?;
        self.check_range(handle, offset, size)?;
        if size == 0 {
            return Ok(());
        }
        let buffer = self.lookup(handle)?;
        if value == 0 {
            let mut encoder = self.device.create_command_encoder(&CommandEncoderDescriptor {
                label: Some("vertex_fetch clear"),
            });
            encoder.clear_buffer(buffer, offset as u64, Some(size as u64));
            self.queue.submit(std::iter::once(encoder.finish()));
        } else {
            //clear_buffer only writes zero
            self.queue.write_buffer(buffer, offset as u64, &vec![value; size]);
        }
        Ok(())
    }

    fn delete(&mut self, handle: BufferHandle) -> Result<(), Error> {
        let buffer = self
            .buffers
            .remove(&handle)
            .ok_or(Error::UnknownBuffer(handle))?;
        buffer.destroy();
        Ok(())
    }
}
