// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*! vertex_fetch is the vertex-input binding layer between a hardware-agnostic command
stream and a graphics driver's vertex-fetch state.

It turns logical descriptors (which buffer supplies which attribute, at what stride,
format and offset) into the minimal sequence of driver state changes that makes the
next draw correct, and it keeps draws from fetching past the end of undersized buffers.

# Concepts

| Piece                          | Where                                 | Job                                                            |
|--------------------------------|---------------------------------------|----------------------------------------------------------------|
| Descriptors                    | [`bindings`]                          | What the caller wants bound                                    |
| Slot masks                     | [`SlotMask`]                          | Which slots are enabled, bound, or patched                     |
| State cache                    | [`VertexArray::set_buffers`], [`VertexArray::set_attributes`] | Diff against the last applied state |
| Validation                     | [`VertexArray::validate`]             | Disable attributes whose buffer went away                      |
| Index controller               | [`VertexArray::set_index_range`]      | Bind an index range, or a copy of it at offset zero            |
| Bounds safety                  | [`VertexArray::limit_for_draw`]       | Substitute zero-padded copies for undersized buffers           |
| Backend                        | [`imp`]                               | The driver and buffer-manager interfaces                       |

# Draw protocol

1. [`VertexArray::set_buffers`]
2. [`VertexArray::set_attributes`]
3. optionally [`VertexArray::set_index_range`]
4. [`VertexArray::limit_for_draw`] with the vertex count the draw consumes
   (or [`VertexArray::skip_limit`] when the draw is known to be safe)
5. issue the draw
6. [`VertexArray::restore_all`] before changing to a different vertex count regime

Everything runs on the thread that owns the graphics context. Calls take effect
immediately, in order.

# Backends

The crate talks to the graphics API only through [`imp::VertexInputDevice`] and
[`imp::BufferManager`]. [`imp::recording::RecordingDevice`] implements both without a GPU.
With the `backend_wgpu` feature, `imp::WgpuBufferManager` provides real buffer storage.
*/

logwise::declare_logging_domain!();

pub mod bindings;
mod bittricks;
mod config;
mod error;
pub mod imp;
mod scratch;
mod vertex_array;

pub use bittricks::{SetBits, SlotMask};
pub use config::{ScratchGrowth, VertexArrayConfig};
pub use error::Error;
pub use vertex_array::VertexArray;
