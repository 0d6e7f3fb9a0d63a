/*! Defines the logical descriptors the vertex array consumes */

pub mod buffer_range;
pub mod vertex_formats;
pub mod vertex_layout;

pub use buffer_range::{BufferHandle, BufferRange, IndexRange};
pub use vertex_formats::{FormatInfo, NumericType, VertexFormat};
pub use vertex_layout::{AttributeDescriptor, BufferBindingDescriptor};
