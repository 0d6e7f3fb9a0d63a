// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Tunables for a [`VertexArray`](crate::VertexArray).

/// How scratch buffers grow when a request exceeds their capacity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScratchGrowth {
    /// Grow to exactly the requested size.
    #[default]
    Exact,
    /// Grow to the next power of two at or above the requested size.
    PowerOfTwo,
}

impl ScratchGrowth {
    pub(crate) fn capacity_for(self, requested: usize) -> usize {
        match self {
            ScratchGrowth::Exact => requested,
            ScratchGrowth::PowerOfTwo => requested.checked_next_power_of_two().unwrap_or(requested),
        }
    }
}

/// Configuration for a [`VertexArray`](crate::VertexArray).
///
/// ```
/// use vertex_fetch::{ScratchGrowth, VertexArrayConfig};
///
/// let config = VertexArrayConfig::default()
///     .with_fill_value(0xFF)
///     .with_scratch_growth(ScratchGrowth::PowerOfTwo)
///     .with_debug_name("terrain");
/// assert_eq!(config.fill_value, 0xFF);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexArrayConfig {
    /// Byte written past the valid prefix of a patched vertex buffer.
    pub fill_value: u8,
    pub scratch_growth: ScratchGrowth,
    /// Shows up in logs.
    pub debug_name: String,
}

impl Default for VertexArrayConfig {
    fn default() -> Self {
        VertexArrayConfig {
            fill_value: 0,
            scratch_growth: ScratchGrowth::Exact,
            debug_name: String::from("vertex_array"),
        }
    }
}

impl VertexArrayConfig {
    pub fn with_fill_value(mut self, fill_value: u8) -> Self {
        self.fill_value = fill_value;
        self
    }

    pub fn with_scratch_growth(mut self, scratch_growth: ScratchGrowth) -> Self {
        self.scratch_growth = scratch_growth;
        self
    }

    pub fn with_debug_name(mut self, debug_name: impl Into<String>) -> Self {
        self.debug_name = debug_name.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn growth_policies() {
        assert_eq!(ScratchGrowth::Exact.capacity_for(80), 80);
        assert_eq!(ScratchGrowth::PowerOfTwo.capacity_for(80), 128);
        assert_eq!(ScratchGrowth::PowerOfTwo.capacity_for(64), 64);
        assert_eq!(ScratchGrowth::PowerOfTwo.capacity_for(usize::MAX), usize::MAX);
    }

    #[test]
    fn defaults_fill_with_zero() {
        let config = VertexArrayConfig::default();
        assert_eq!(config.fill_value, 0);
        assert_eq!(config.scratch_growth, ScratchGrowth::Exact);
    }
}
