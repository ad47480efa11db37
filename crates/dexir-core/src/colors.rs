//! ANSI color codes for dump output.
//!
//! The palette is semantic rather than literal:
//! - Section: `[strings]`, `[classes]` and other section headers
//! - Label: index labels such as `S00`, `T03`, `M1`
//! - Literal: string data and descriptors
//! - Dim: offsets, sizes and other metadata
//! - Reset: return to default

/// ANSI palette for dump output.
///
/// Sticks to the 16-color ANSI set so it reads in both light and dark themes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Colors {
    pub section: &'static str,
    pub label: &'static str,
    pub literal: &'static str,
    pub dim: &'static str,
    pub reset: &'static str,
}

impl Default for Colors {
    fn default() -> Self {
        Self::OFF
    }
}

impl Colors {
    pub const ON: Self = Self {
        section: "\x1b[1;34m",
        label: "\x1b[36m",
        literal: "\x1b[32m",
        dim: "\x1b[2m",
        reset: "\x1b[0m",
    };

    pub const OFF: Self = Self {
        section: "",
        label: "",
        literal: "",
        dim: "",
        reset: "",
    };

    pub fn new(enabled: bool) -> Self {
        if enabled { Self::ON } else { Self::OFF }
    }

    pub fn is_enabled(&self) -> bool {
        !self.reset.is_empty()
    }

    /// Wrap `text` in `color` and a trailing reset.
    pub fn paint(&self, color: &'static str, text: impl std::fmt::Display) -> String {
        if color.is_empty() {
            text.to_string()
        } else {
            format!("{color}{text}{}", self.reset)
        }
    }
}
