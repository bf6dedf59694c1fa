//! ANSI styling for automaton dumps and execution traces.

/// Terminal palette.
///
/// `kind` marks node kinds and label type names, `value` marks literals and
/// accepted labels, `miss` marks rejected labels and failed branches.
#[derive(Clone, Copy, Debug)]
pub struct Colors {
    pub kind: &'static str,
    pub value: &'static str,
    pub miss: &'static str,
    pub dim: &'static str,
    pub reset: &'static str,
}

impl Default for Colors {
    fn default() -> Self {
        Self::OFF
    }
}

impl Colors {
    /// ANSI escapes for terminal output.
    pub const ON: Self = Self {
        kind: "\x1b[34m",
        value: "\x1b[32m",
        miss: "\x1b[31m",
        dim: "\x1b[2m",
        reset: "\x1b[0m",
    };

    /// Empty strings; output carries no escapes.
    pub const OFF: Self = Self {
        kind: "",
        value: "",
        miss: "",
        dim: "",
        reset: "",
    };

    /// `ON` when `enabled`, `OFF` otherwise.
    pub fn new(enabled: bool) -> Self {
        if enabled { Self::ON } else { Self::OFF }
    }

    /// Whether this palette emits escapes.
    pub fn is_enabled(&self) -> bool {
        !self.reset.is_empty()
    }

    /// Wraps `text` in `color` followed by a reset, or returns it unchanged when disabled.
    pub fn paint(&self, color: &str, text: &str) -> String {
        if color.is_empty() {
            text.to_owned()
        } else {
            format!("{color}{text}{}", self.reset)
        }
    }
}
