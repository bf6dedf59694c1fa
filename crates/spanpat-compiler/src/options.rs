/// Upper bound for unbounded repetitions (`*`, `+`, `{n,}`).
pub const DEFAULT_LOOP_LIMIT: u32 = 10_000;

/// Maximum nesting of groups and pin conditions.
pub const DEFAULT_RECURSION_LIMIT: u32 = 256;

/// Compiler limits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompileOptions {
    pub(crate) loop_limit: u32,
    pub(crate) recursion_limit: u32,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            loop_limit: DEFAULT_LOOP_LIMIT,
            recursion_limit: DEFAULT_RECURSION_LIMIT,
        }
    }
}

impl CompileOptions {
    /// Options with the default limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the repetition cap. Explicit bounds above it are clamped.
    pub fn loop_limit(mut self, limit: u32) -> Self {
        self.loop_limit = limit;
        self
    }

    /// Set the maximum nesting depth of groups and pin conditions.
    pub fn recursion_limit(mut self, limit: u32) -> Self {
        self.recursion_limit = limit;
        self
    }

    /// Current repetition cap.
    pub fn get_loop_limit(&self) -> u32 {
        self.loop_limit
    }

    /// Current nesting limit.
    pub fn get_recursion_limit(&self) -> u32 {
        self.recursion_limit
    }
}
