//! Control flow for the interpreter.

/// How a statement finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    /// Fall through to the next statement
    Normal,
    /// Leave the innermost loop
    Break,
    /// Skip to the next iteration of the innermost loop
    Continue,
}

impl Flow {
    pub(crate) fn is_signal(self) -> bool {
        self != Flow::Normal
    }
}
