// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
use crate::bindings::AttributeDescriptor;
use crate::bindings::vertex_layout::MAX_VERTEX_ATTRIBS;
use crate::imp::VertexInputDevice;

use super::VertexArray;

/// What a disabled attribute reads.
pub(crate) const FALLBACK_CONSTANT: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

impl VertexArray {
    /// Applies attribute descriptors to slots `0..descriptors.len()` and disables the rest.
    ///
    /// A descriptor equal to the cached one costs nothing. A "zero" attribute is
    /// disabled so the shader reads `(0, 0, 0, 1)`; no format is issued for it.
    ///
    /// # Panics
    /// If more than [`MAX_VERTEX_ATTRIBS`] descriptors are passed.
    pub fn set_attributes<D: VertexInputDevice + ?Sized>(
        &mut self,
        device: &mut D,
        descriptors: &[AttributeDescriptor],
    ) {
        assert!(
            descriptors.len() <= MAX_VERTEX_ATTRIBS,
            "{} vertex attributes exceed the {MAX_VERTEX_ATTRIBS} attribute slots",
            descriptors.len()
        );

        for (index, attrib) in descriptors.iter().enumerate() {
            if self.attribs[index].as_ref() == Some(attrib) {
                continue;
            }

            if attrib.is_zero {
                self.disable_attrib(device, index);
            } else {
                self.enable_attrib(device, index);

                let info = attrib.format.info();
                logwise::trace_sync!(
                    "attrib {index} format {format} offset {offset} from binding {binding}",
                    index = index,
                    format = logwise::privacy::LogIt(&attrib.format),
                    offset = attrib.offset,
                    binding = attrib.buffer_index
                );
                if info.uses_float_path() {
                    device.set_attrib_format(
                        index,
                        info.components,
                        info.numeric,
                        info.normalized,
                        attrib.offset,
                    );
                } else {
                    device.set_attrib_integer_format(index, info.components, info.numeric, attrib.offset);
                }
                device.set_attrib_binding(index, attrib.buffer_index as usize);
            }

            self.attribs[index] = Some(*attrib);
        }

        self.attrib_count = descriptors.len();

        for index in descriptors.len()..MAX_VERTEX_ATTRIBS {
            self.disable_attrib(device, index);
        }
    }

    /// Re-synchronizes attribute enable state with the current buffer bindings.
    ///
    /// Active attributes whose binding slot is out of range or unbound are disabled.
    /// After a [`set_buffers`](Self::set_buffers), the remaining ones are re-enabled.
    pub fn validate<D: VertexInputDevice + ?Sized>(&mut self, device: &mut D) {
        for index in 0..self.attrib_count {
            let Some(attrib) = self.attribs[index] else {
                continue;
            };
            if attrib.is_zero {
                continue;
            }

            let binding = attrib.buffer_index as usize;
            if binding >= self.buffer_count || !self.buffers[binding].is_bound() {
                self.disable_attrib(device, index);
                continue;
            }

            if self.needs_attribs_update {
                self.enable_attrib(device, index);
            }
        }

        self.needs_attribs_update = false;
    }

    #[inline]
    fn enable_attrib<D: VertexInputDevice + ?Sized>(&mut self, device: &mut D, index: usize) {
        if !self.attribs_enabled.test(index) {
            self.attribs_enabled.set(index);
            device.enable_attrib(index);
        }
    }

    #[inline]
    fn disable_attrib<D: VertexInputDevice + ?Sized>(&mut self, device: &mut D, index: usize) {
        if self.attribs_enabled.test(index) {
            self.attribs_enabled.clear(index);
            device.disable_attrib(index);
            device.set_attrib_constant(index, FALLBACK_CONSTANT);
        }
    }
}
