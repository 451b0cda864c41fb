//! Resource limits applied while parsing.
//!
//! The parser recurses once per nested array or object, so the nesting depth
//! is bounded to keep hostile payloads from exhausting the stack.

/// Default maximum nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Parser limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum input size in bytes
    pub max_input_size: usize,
    /// Maximum nesting depth of arrays and objects
    pub max_depth: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_input_size: usize::MAX,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Limits {
    /// Set maximum input size.
    #[must_use]
    pub const fn with_max_input_size(mut self, size: usize) -> Self {
        self.max_input_size = size;
        self
    }

    /// Set maximum nesting depth.
    #[must_use]
    pub const fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits() {
        let limits = Limits::default();
        assert_eq!(limits.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(limits.max_input_size, usize::MAX);
    }

    #[test]
    fn test_builders() {
        let limits = Limits::default().with_max_depth(4).with_max_input_size(64);
        assert_eq!(limits.max_depth, 4);
        assert_eq!(limits.max_input_size, 64);
    }
}
