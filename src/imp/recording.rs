// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*!
A backend that records instead of rendering.

[`RecordingDevice`] implements [`VertexInputDevice`] and [`BufferManager`] without a
graphics context. Every call is appended to a log of [`DeviceCall`]s, buffer contents
are kept in memory, and the effective per-slot state is tracked so callers can ask
"what would the driver fetch right now?".

Freshly created or resized storage is filled with [`RecordingDevice::GARBAGE`] rather
than zero, so a missing clear is visible.
*/

use std::collections::HashMap;

use crate::bindings::{BufferHandle, NumericType};
use crate::bindings::vertex_layout::{MAX_VERTEX_ATTRIBS, MAX_VERTEX_BUFFERS};
use crate::error::Error;
use crate::imp::{BufferManager, VertexArrayHandle, VertexInputDevice};

/// One call made on a [`RecordingDevice`].
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceCall {
    CreateVertexArray(VertexArrayHandle),
    BindVertexArray(VertexArrayHandle),
    DeleteVertexArray(VertexArrayHandle),
    BindVertexBuffer {
        binding: usize,
        buffer: BufferHandle,
        offset: usize,
        stride: u32,
    },
    SetBindingDivisor {
        binding: usize,
        divisor: u32,
    },
    SetAttribFormat {
        attrib: usize,
        components: u8,
        numeric: NumericType,
        normalized: bool,
        offset: u32,
    },
    SetAttribIntegerFormat {
        attrib: usize,
        components: u8,
        numeric: NumericType,
        offset: u32,
    },
    SetAttribBinding {
        attrib: usize,
        binding: usize,
    },
    EnableAttrib(usize),
    DisableAttrib(usize),
    SetAttribConstant {
        attrib: usize,
        value: [f32; 4],
    },
    BindIndexBuffer(BufferHandle),
    CreateBuffer {
        buffer: BufferHandle,
        size: usize,
    },
    ResizeBuffer {
        buffer: BufferHandle,
        size: usize,
    },
    CopyBuffer {
        src: BufferHandle,
        dst: BufferHandle,
        src_offset: usize,
        dst_offset: usize,
        size: usize,
    },
    ClearBuffer {
        buffer: BufferHandle,
        offset: usize,
        size: usize,
        value: u8,
    },
    DeleteBuffer(BufferHandle),
}

impl DeviceCall {
    /// Whether this call sets an attribute's fetch format.
    pub fn is_format_update(&self) -> bool {
        matches!(
            self,
            DeviceCall::SetAttribFormat { .. } | DeviceCall::SetAttribIntegerFormat { .. }
        )
    }

    /// Whether this call writes buffer contents.
    pub fn is_buffer_write(&self) -> bool {
        matches!(self, DeviceCall::CopyBuffer { .. } | DeviceCall::ClearBuffer { .. })
    }
}

/// The binding a buffer-binding slot currently fetches through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EffectiveBinding {
    pub buffer: BufferHandle,
    pub offset: usize,
    pub stride: u32,
}

/// A fake driver and buffer manager.
#[derive(Debug)]
pub struct RecordingDevice {
    calls: Vec<DeviceCall>,
    buffers: HashMap<BufferHandle, Vec<u8>>,
    next_buffer: u32,
    next_vertex_array: u32,
    live_vertex_arrays: Vec<VertexArrayHandle>,
    bound_vertex_array: VertexArrayHandle,
    bindings: [EffectiveBinding; MAX_VERTEX_BUFFERS],
    attribs_enabled: [bool; MAX_VERTEX_ATTRIBS],
    index_buffer: BufferHandle,
}

impl RecordingDevice {
    /// Byte pattern of uninitialized storage.
    pub const GARBAGE: u8 = 0xCD;

    pub fn new() -> Self {
        RecordingDevice {
            calls: Vec::new(),
            buffers: HashMap::new(),
            next_buffer: 1,
            next_vertex_array: 1,
            live_vertex_arrays: Vec::new(),
            bound_vertex_array: VertexArrayHandle::default(),
            bindings: [EffectiveBinding::default(); MAX_VERTEX_BUFFERS],
            attribs_enabled: [false; MAX_VERTEX_ATTRIBS],
            index_buffer: BufferHandle::NULL,
        }
    }

    /// Creates a buffer holding `contents`, without recording a call.
    ///
    /// Use this to set up caller-owned vertex and index data.
    pub fn create_buffer_with(&mut self, contents: &[u8]) -> BufferHandle {
        let handle = self.allocate_handle();
        self.buffers.insert(handle, contents.to_vec());
        handle
    }

    pub fn calls(&self) -> &[DeviceCall] {
        &self.calls
    }

    /// Returns the recorded calls and starts a fresh log.
    pub fn take_calls(&mut self) -> Vec<DeviceCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    pub fn count_calls(&self, predicate: impl Fn(&DeviceCall) -> bool) -> usize {
        self.calls.iter().filter(|c| predicate(c)).count()
    }

    pub fn buffer_contents(&self, buffer: BufferHandle) -> Option<&[u8]> {
        self.buffers.get(&buffer).map(Vec::as_slice)
    }

    pub fn live_buffer_count(&self) -> usize {
        self.buffers.len()
    }

    pub fn binding(&self, binding: usize) -> EffectiveBinding {
        self.bindings[binding]
    }

    /// The bytes a draw of `vertex_count` vertices may fetch through `binding`,
    /// or `None` if that would read past the end of the bound buffer.
    pub fn fetchable_bytes(&self, binding: usize, vertex_count: u32) -> Option<&[u8]> {
        let b = self.bindings[binding];
        let contents = self.buffers.get(&b.buffer)?;
        let end = b.offset + vertex_count as usize * b.stride as usize;
        contents.get(b.offset..end)
    }

    pub fn attrib_enabled(&self, attrib: usize) -> bool {
        self.attribs_enabled[attrib]
    }

    pub fn index_buffer(&self) -> BufferHandle {
        self.index_buffer
    }

    pub fn bound_vertex_array(&self) -> VertexArrayHandle {
        self.bound_vertex_array
    }

    pub fn is_vertex_array_live(&self, vertex_array: VertexArrayHandle) -> bool {
        self.live_vertex_arrays.contains(&vertex_array)
    }

    fn allocate_handle(&mut self) -> BufferHandle {
        let handle = BufferHandle(self.next_buffer);
        self.next_buffer += 1;
        handle
    }

    fn storage_mut(&mut self, buffer: BufferHandle) -> Result<&mut Vec<u8>, Error> {
        self.buffers
            .get_mut(&buffer)
            .ok_or(Error::UnknownBuffer(buffer))
    }

    fn check_range(&self, buffer: BufferHandle, offset: usize, size: usize) -> Result<(), Error> {
        let len = self
            .buffers
            .get(&buffer)
            .ok_or(Error::UnknownBuffer(buffer))?
            .len();
        match offset.checked_add(size) {
            Some(end) if end <= len => Ok(()),
            _ => Err(Error::OutOfRange {
                handle: buffer,
                offset,
                size,
                len,
            }),
        }
    }
}

impl Default for RecordingDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl VertexInputDevice for RecordingDevice {
    fn create_vertex_array(&mut self) -> VertexArrayHandle {
        let handle = VertexArrayHandle(self.next_vertex_array);
        self.next_vertex_array += 1;
        self.live_vertex_arrays.push(handle);
        self.calls.push(DeviceCall::CreateVertexArray(handle));
        handle
    }

    fn bind_vertex_array(&mut self, vertex_array: VertexArrayHandle) {
        self.bound_vertex_array = vertex_array;
        self.calls.push(DeviceCall::BindVertexArray(vertex_array));
    }

    fn delete_vertex_array(&mut self, vertex_array: VertexArrayHandle) {
        self.live_vertex_arrays.retain(|v| *v != vertex_array);
        if self.bound_vertex_array == vertex_array {
            self.bound_vertex_array = VertexArrayHandle::default();
        }
        self.calls.push(DeviceCall::DeleteVertexArray(vertex_array));
    }

    fn bind_vertex_buffer(&mut self, binding: usize, buffer: BufferHandle, offset: usize, stride: u32) {
        self.bindings[binding] = EffectiveBinding {
            buffer,
            offset,
            stride,
        };
        self.calls.push(DeviceCall::BindVertexBuffer {
            binding,
            buffer,
            offset,
            stride,
        });
    }

    fn set_binding_divisor(&mut self, binding: usize, divisor: u32) {
        self.calls.push(DeviceCall::SetBindingDivisor { binding, divisor });
    }

    fn set_attrib_format(
        &mut self,
        attrib: usize,
        components: u8,
        numeric: NumericType,
        normalized: bool,
        offset: u32,
    ) {
        self.calls.push(DeviceCall::SetAttribFormat {
            attrib,
            components,
            numeric,
            normalized,
            offset,
        });
    }

    fn set_attrib_integer_format(&mut self, attrib: usize, components: u8, numeric: NumericType, offset: u32) {
        self.calls.push(DeviceCall::SetAttribIntegerFormat {
            attrib,
            components,
            numeric,
            offset,
        });
    }

    fn set_attrib_binding(&mut self, attrib: usize, binding: usize) {
        self.calls.push(DeviceCall::SetAttribBinding { attrib, binding });
    }

    fn enable_attrib(&mut self, attrib: usize) {
        self.attribs_enabled[attrib] = true;
        self.calls.push(DeviceCall::EnableAttrib(attrib));
    }

    fn disable_attrib(&mut self, attrib: usize) {
        self.attribs_enabled[attrib] = false;
        self.calls.push(DeviceCall::DisableAttrib(attrib));
    }

    fn set_attrib_constant(&mut self, attrib: usize, value: [f32; 4]) {
        self.calls.push(DeviceCall::SetAttribConstant { attrib, value });
    }

    fn bind_index_buffer(&mut self, buffer: BufferHandle) {
        self.index_buffer = buffer;
        self.calls.push(DeviceCall::BindIndexBuffer(buffer));
    }
}

impl BufferManager for RecordingDevice {
    fn create(&mut self, size: usize) -> Result<BufferHandle, Error> {
        let buffer = self.allocate_handle();
        self.buffers.insert(buffer, vec![Self::GARBAGE; size]);
        self.calls.push(DeviceCall::CreateBuffer { buffer, size });
        Ok(buffer)
    }

    fn resize(&mut self, buffer: BufferHandle, size: usize) -> Result<(), Error> {
        *self.storage_mut(buffer)? = vec![Self::GARBAGE; size];
        self.calls.push(DeviceCall::ResizeBuffer { buffer, size });
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
        self.check_range(src, src_offset, size)?;
        self.check_range(dst, dst_offset, size)?;
        let bytes = self.buffers[&src][src_offset..src_offset + size].to_vec();
        self.storage_mut(dst)?[dst_offset..dst_offset + size].copy_from_slice(&bytes);
        self.calls.push(DeviceCall::CopyBuffer {
            src,
            dst,
            src_offset,
            dst_offset,
            size,
        });
        Ok(())
    }

    fn clear(&mut self, buffer: BufferHandle, offset: usize, size: usize, value: u8) -> Result<(), Error> {
        self.check_range(buffer, offset, size)?;
        self.storage_mut(buffer)?[offset..offset + size].fill(value);
        self.calls.push(DeviceCall::ClearBuffer {
            buffer,
            offset,
            size,
            value,
        });
        Ok(())
    }

    fn delete(&mut self, buffer: BufferHandle) -> Result<(), Error> {
        self.buffers
            .remove(&buffer)
            .ok_or(Error::UnknownBuffer(buffer))?;
        self.calls.push(DeviceCall::DeleteBuffer(buffer));
        Ok(())
    }
}
