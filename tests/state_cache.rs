// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Tests that the attribute/buffer state cache only issues the driver calls it must.
//!
//! These run against the recording backend, which logs every driver call.

use vertex_fetch::bindings::{AttributeDescriptor, BufferBindingDescriptor, BufferHandle, BufferRange, VertexFormat};
use vertex_fetch::imp::recording::{DeviceCall, RecordingDevice};
use vertex_fetch::{VertexArray, VertexArrayConfig};

fn interleaved_layout() -> [AttributeDescriptor; 3] {
    [
        AttributeDescriptor::new(VertexFormat::Float32x3, 0, 0),
        AttributeDescriptor::new(VertexFormat::Unorm8x4, 12, 0),
        AttributeDescriptor::new(VertexFormat::Float32x2, 0, 1),
    ]
}

#[test]
fn set_attributes_twice_is_free() {
    let mut device = RecordingDevice::new();
    let mut va = VertexArray::new(&mut device, VertexArrayConfig::default());

    va.set_attributes(&mut device, &interleaved_layout());
    assert_eq!(device.count_calls(DeviceCall::is_format_update), 3);

    device.clear_calls();
    va.set_attributes(&mut device, &interleaved_layout());
    assert_eq!(device.count_calls(DeviceCall::is_format_update), 0);
    assert!(device.calls().is_empty());
    va.release(&mut device).unwrap();
}

#[test]
fn only_changed_slots_are_reissued() {
    let mut device = RecordingDevice::new();
    let mut va = VertexArray::new(&mut device, VertexArrayConfig::default());
    va.set_attributes(&mut device, &interleaved_layout());
    device.clear_calls();

    let mut layout = interleaved_layout();
    layout[1].offset = 16;
    va.set_attributes(&mut device, &layout);

    let calls = device.take_calls();
    assert_eq!(calls.iter().filter(|c| c.is_format_update()).count(), 1);
    assert!(calls.contains(&DeviceCall::SetAttribFormat {
        attrib: 1,
        components: 4,
        numeric: vertex_fetch::bindings::NumericType::U8,
        normalized: true,
        offset: 16,
    }));
    //already enabled, so no toggle
    assert!(!calls.iter().any(|c| matches!(c, DeviceCall::EnableAttrib(_))));
    va.release(&mut device).unwrap();
}

#[test]
fn zero_attribute_is_disabled_without_format() {
    let mut device = RecordingDevice::new();
    let mut va = VertexArray::new(&mut device, VertexArrayConfig::default());
    let buffer = device.create_buffer_with(&[0; 64]);
    va.set_buffers(
        &mut device,
        &[BufferBindingDescriptor::new(BufferRange::new(buffer, 0, 64), 16)],
    );

    let mut layout = [AttributeDescriptor::new(VertexFormat::Float32x4, 0, 0); 4];
    layout[3] = AttributeDescriptor::zero();
    device.clear_calls();
    va.set_attributes(&mut device, &layout);

    assert!(!va.attribs_enabled().test(3));
    assert!(!device.attrib_enabled(3));
    assert!(!device.calls().iter().any(|c| matches!(
        c,
        DeviceCall::SetAttribFormat { attrib: 3, .. }
            | DeviceCall::SetAttribIntegerFormat { attrib: 3, .. }
            | DeviceCall::SetAttribBinding { attrib: 3, .. }
    )));

    //validation leaves zero attributes alone
    va.validate(&mut device);
    assert!(!va.attribs_enabled().test(3));
    assert_eq!(va.attribs_enabled().bits(), 0b0111);
    va.release(&mut device).unwrap();
}

#[test]
fn enabled_attribute_becomes_zero() {
    let mut device = RecordingDevice::new();
    let mut va = VertexArray::new(&mut device, VertexArrayConfig::default());
    va.set_attributes(&mut device, &[AttributeDescriptor::new(VertexFormat::Float32x4, 0, 0)]);
    assert!(device.attrib_enabled(0));

    device.clear_calls();
    va.set_attributes(&mut device, &[AttributeDescriptor::zero()]);
    assert_eq!(
        device.take_calls(),
        vec![
            DeviceCall::DisableAttrib(0),
            DeviceCall::SetAttribConstant {
                attrib: 0,
                value: [0.0, 0.0, 0.0, 1.0]
            },
        ]
    );
    va.release(&mut device).unwrap();
}

#[test]
fn unbinding_buffer_disables_dependent_attribute() {
    let mut device = RecordingDevice::new();
    let mut va = VertexArray::new(&mut device, VertexArrayConfig::default());
    let a = device.create_buffer_with(&[0; 64]);
    let b = device.create_buffer_with(&[0; 64]);
    let bound = [
        BufferBindingDescriptor::new(BufferRange::new(a, 0, 64), 16),
        BufferBindingDescriptor::new(BufferRange::new(b, 0, 64), 8),
    ];

    va.set_buffers(&mut device, &bound);
    va.set_attributes(
        &mut device,
        &[
            AttributeDescriptor::new(VertexFormat::Float32x4, 0, 0),
            AttributeDescriptor::new(VertexFormat::Float32x2, 0, 1),
        ],
    );
    va.validate(&mut device);
    assert_eq!(va.attribs_enabled().bits(), 0b11);

    //attribute 1 reads binding 1, which goes away
    va.set_buffers(&mut device, &[bound[0], BufferBindingDescriptor::unbound()]);
    device.clear_calls();
    va.validate(&mut device);
    assert!(va.attribs_enabled().test(0));
    assert!(!va.attribs_enabled().test(1));
    assert!(!device.attrib_enabled(1));
    assert!(device.calls().contains(&DeviceCall::DisableAttrib(1)));
    //no format work during validation
    assert_eq!(device.count_calls(DeviceCall::is_format_update), 0);

    //and comes back
    va.set_buffers(&mut device, &bound);
    va.validate(&mut device);
    assert_eq!(va.attribs_enabled().bits(), 0b11);
    assert!(device.attrib_enabled(1));
    va.release(&mut device).unwrap();
}

#[test]
fn shrinking_attribute_count_disables_tail() {
    let mut device = RecordingDevice::new();
    let mut va = VertexArray::new(&mut device, VertexArrayConfig::default());
    va.set_attributes(&mut device, &interleaved_layout());
    assert_eq!(va.attribs_enabled().bits(), 0b111);

    va.set_attributes(&mut device, &interleaved_layout()[..1]);
    assert_eq!(va.attrib_count(), 1);
    assert_eq!(va.attribs_enabled().bits(), 0b1);
    for index in 1..16 {
        assert!(!device.attrib_enabled(index));
    }

    //tail slots keep their cached descriptors, so re-growing reuses them
    device.clear_calls();
    va.set_attributes(&mut device, &interleaved_layout());
    assert_eq!(device.count_calls(DeviceCall::is_format_update), 0);
    //but validation is what re-enables them after a rebinding
    let buffer = device.create_buffer_with(&[0; 32]);
    let desc = BufferBindingDescriptor::new(BufferRange::new(buffer, 0, 32), 16);
    va.set_buffers(&mut device, &[desc, desc]);
    va.validate(&mut device);
    assert_eq!(va.attribs_enabled().bits(), 0b111);
    va.release(&mut device).unwrap();
}

#[test]
fn bitmasks_match_driver_state() {
    let mut device = RecordingDevice::new();
    let mut va = VertexArray::new(&mut device, VertexArrayConfig::default());
    let a = device.create_buffer_with(&[0; 64]);
    va.set_buffers(
        &mut device,
        &[
            BufferBindingDescriptor::unbound(),
            BufferBindingDescriptor::new(BufferRange::new(a, 0, 64), 16),
            BufferBindingDescriptor::unbound(),
            BufferBindingDescriptor::new(BufferRange::new(a, 16, 48), 16),
        ],
    );
    for binding in 0..4 {
        assert_eq!(
            va.buffers_bound().test(binding),
            device.binding(binding).buffer != BufferHandle::NULL
        );
    }
    assert_eq!(va.buffers_bound().iter().collect::<Vec<_>>(), vec![1, 3]);
    assert_eq!(va.min_fetchable_vertex_count(), 3);

    va.set_attributes(
        &mut device,
        &[
            AttributeDescriptor::new(VertexFormat::Float32x4, 0, 0),
            AttributeDescriptor::new(VertexFormat::Float32x4, 0, 1),
            AttributeDescriptor::new(VertexFormat::Sint32x4, 0, 3),
        ],
    );
    va.validate(&mut device);
    for attrib in 0..16 {
        assert_eq!(va.attribs_enabled().test(attrib), device.attrib_enabled(attrib));
    }
    assert_eq!(va.attribs_enabled().bits(), 0b110);
    va.release(&mut device).unwrap();
}

#[test]
fn vertex_array_lifecycle() {
    let mut device = RecordingDevice::new();
    let va = VertexArray::new(&mut device, VertexArrayConfig::default().with_debug_name("lifecycle"));
    assert!(device.is_vertex_array_live(va.handle()));
    va.bind(&mut device);
    assert_eq!(device.bound_vertex_array(), va.handle());

    let handle = va.handle();
    va.release(&mut device).unwrap();
    assert!(!device.is_vertex_array_live(handle));
    //nothing was ever allocated for scratch storage
    assert_eq!(device.count_calls(|c| matches!(c, DeviceCall::DeleteBuffer(_))), 0);
}
