// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Logical vertex attribute formats.
//!
//! Each [`VertexFormat`] describes how the driver should decode one attribute element:
//! how many components it has, the numeric type of each component in memory, and
//! whether integers are normalized (mapped to `0..=1` / `-1..=1`) or scaled
//! (converted to float without normalization).
//!
//! The driver has two fetch paths. Formats that produce floating-point values in the
//! shader (float, normalized, or scaled) go through the float path; pure integer formats
//! go through the integer path. [`FormatInfo::uses_float_path`] makes that decision.
//!
//! ```
//! use vertex_fetch::bindings::vertex_formats::{VertexFormat, NumericType};
//!
//! let info = VertexFormat::Unorm8x4.info();
//! assert_eq!(info.components, 4);
//! assert_eq!(info.numeric, NumericType::U8);
//! assert!(info.uses_float_path());
//!
//! assert!(!VertexFormat::Uint16x2.info().uses_float_path());
//! ```

/// Numeric type of a single component as stored in the vertex buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericType {
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    F16,
    F32,
}

impl NumericType {
    pub const fn byte_size(self) -> u32 {
        match self {
            NumericType::U8 | NumericType::I8 => 1,
            NumericType::U16 | NumericType::I16 | NumericType::F16 => 2,
            NumericType::U32 | NumericType::I32 | NumericType::F32 => 4,
        }
    }

    pub const fn is_float(self) -> bool {
        matches!(self, NumericType::F16 | NumericType::F32)
    }
}

/// How an attribute format decodes into the shader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FormatInfo {
    /// Component count, `1..=4`.
    pub components: u8,
    pub numeric: NumericType,
    pub normalized: bool,
    pub scaled: bool,
}

impl FormatInfo {
    /// Whether the driver's float-attribute path decodes this format.
    #[inline]
    pub const fn uses_float_path(&self) -> bool {
        self.numeric.is_float() || self.normalized || self.scaled
    }

    /// Size of one element in bytes.
    pub const fn byte_size(&self) -> u32 {
        self.components as u32 * self.numeric.byte_size()
    }
}

macro_rules! vertex_formats {
    ($($variant:ident => ($components:literal, $numeric:ident, $normalized:literal, $scaled:literal)),* $(,)?) => {
        /// Logical format of a vertex attribute.
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
        #[non_exhaustive]
        pub enum VertexFormat {
            #[default]
            $($variant,)*
        }

        impl VertexFormat {
            /// Classification used when issuing the driver's format update.
            pub const fn info(self) -> FormatInfo {
                match self {
                    $(VertexFormat::$variant => FormatInfo {
                        components: $components,
                        numeric: NumericType::$numeric,
                        normalized: $normalized,
                        scaled: $scaled,
                    },)*
                }
            }
        }
    };
}

vertex_formats! {
    Float32x1 => (1, F32, false, false),
    Float32x2 => (2, F32, false, false),
    Float32x3 => (3, F32, false, false),
    Float32x4 => (4, F32, false, false),
    Float16x1 => (1, F16, false, false),
    Float16x2 => (2, F16, false, false),
    Float16x3 => (3, F16, false, false),
    Float16x4 => (4, F16, false, false),

    Unorm8x1 => (1, U8, true, false),
    Unorm8x2 => (2, U8, true, false),
    Unorm8x3 => (3, U8, true, false),
    Unorm8x4 => (4, U8, true, false),
    Snorm8x1 => (1, I8, true, false),
    Snorm8x2 => (2, I8, true, false),
    Snorm8x3 => (3, I8, true, false),
    Snorm8x4 => (4, I8, true, false),
    Uscaled8x1 => (1, U8, false, true),
    Uscaled8x2 => (2, U8, false, true),
    Uscaled8x3 => (3, U8, false, true),
    Uscaled8x4 => (4, U8, false, true),
    Sscaled8x1 => (1, I8, false, true),
    Sscaled8x2 => (2, I8, false, true),
    Sscaled8x3 => (3, I8, false, true),
    Sscaled8x4 => (4, I8, false, true),
    Uint8x1 => (1, U8, false, false),
    Uint8x2 => (2, U8, false, false),
    Uint8x3 => (3, U8, false, false),
    Uint8x4 => (4, U8, false, false),
    Sint8x1 => (1, I8, false, false),
    Sint8x2 => (2, I8, false, false),
    Sint8x3 => (3, I8, false, false),
    Sint8x4 => (4, I8, false, false),

    Unorm16x1 => (1, U16, true, false),
    Unorm16x2 => (2, U16, true, false),
    Unorm16x3 => (3, U16, true, false),
    Unorm16x4 => (4, U16, true, false),
    Snorm16x1 => (1, I16, true, false),
    Snorm16x2 => (2, I16, true, false),
    Snorm16x3 => (3, I16, true, false),
    Snorm16x4 => (4, I16, true, false),
    Uscaled16x1 => (1, U16, false, true),
    Uscaled16x2 => (2, U16, false, true),
    Uscaled16x3 => (3, U16, false, true),
    Uscaled16x4 => (4, U16, false, true),
    Sscaled16x1 => (1, I16, false, true),
    Sscaled16x2 => (2, I16, false, true),
    Sscaled16x3 => (3, I16, false, true),
    Sscaled16x4 => (4, I16, false, true),
    Uint16x1 => (1, U16, false, false),
    Uint16x2 => (2, U16, false, false),
    Uint16x3 => (3, U16, false, false),
    Uint16x4 => (4, U16, false, false),
    Sint16x1 => (1, I16, false, false),
    Sint16x2 => (2, I16, false, false),
    Sint16x3 => (3, I16, false, false),
    Sint16x4 => (4, I16, false, false),

    Uint32x1 => (1, U32, false, false),
    Uint32x2 => (2, U32, false, false),
    Uint32x3 => (3, U32, false, false),
    Uint32x4 => (4, U32, false, false),
    Sint32x1 => (1, I32, false, false),
    Sint32x2 => (2, I32, false, false),
    Sint32x3 => (3, I32, false, false),
    Sint32x4 => (4, I32, false, false),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_path_classification() {
        assert!(VertexFormat::Float32x3.info().uses_float_path());
        assert!(VertexFormat::Float16x2.info().uses_float_path());
        assert!(VertexFormat::Snorm16x4.info().uses_float_path());
        assert!(VertexFormat::Uscaled8x1.info().uses_float_path());
        assert!(VertexFormat::Sscaled16x3.info().uses_float_path());

        assert!(!VertexFormat::Uint8x4.info().uses_float_path());
        assert!(!VertexFormat::Sint16x1.info().uses_float_path());
        assert!(!VertexFormat::Uint32x2.info().uses_float_path());
    }

    #[test]
    fn element_sizes() {
        assert_eq!(VertexFormat::Float32x3.info().byte_size(), 12);
        assert_eq!(VertexFormat::Unorm8x4.info().byte_size(), 4);
        assert_eq!(VertexFormat::Float16x3.info().byte_size(), 6);
        assert_eq!(VertexFormat::Sint32x1.info().byte_size(), 4);
    }

    #[test]
    fn default_is_float() {
        assert_eq!(VertexFormat::default(), VertexFormat::Float32x1);
    }
}
